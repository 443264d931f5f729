use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::data::frame_spec::ColourWeights;
use crate::core::fractals::escape_time::EscapeTime;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightedColourMapError {
    IterationsExceedMax { iterations: u16, max_iterations: u32 },
}

impl fmt::Display for WeightedColourMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IterationsExceedMax {
                iterations,
                max_iterations,
            } => write!(
                f,
                "iteration count {} is beyond what a budget of {} can produce",
                iterations, max_iterations
            ),
        }
    }
}

impl Error for WeightedColourMapError {}

/// Interior points are black; escaped points get `(r·i, g·i, b·i) mod 256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedColourMap {
    weights: ColourWeights,
    max_iterations: u32,
}

fn channel(weight: u32, iterations: u16) -> u8 {
    ((u64::from(weight) * u64::from(iterations)) % 256) as u8
}

impl ColourMap<EscapeTime> for WeightedColourMap {
    fn map(&self, value: EscapeTime) -> Result<Colour, Box<dyn Error + Send + Sync>> {
        match value {
            EscapeTime::Interior => Ok(Colour::BLACK),
            EscapeTime::Escaped { iterations } => {
                if u32::from(iterations) > self.max_iterations.saturating_add(1) {
                    return Err(Box::new(WeightedColourMapError::IterationsExceedMax {
                        iterations,
                        max_iterations: self.max_iterations,
                    }));
                }

                Ok(Colour {
                    r: channel(self.weights.r, iterations),
                    g: channel(self.weights.g, iterations),
                    b: channel(self.weights.b, iterations),
                })
            }
        }
    }

    fn display_name(&self) -> &str {
        "Weighted modulo"
    }
}

impl WeightedColourMap {
    #[must_use]
    pub fn new(weights: ColourWeights, max_iterations: u32) -> Self {
        Self {
            weights,
            max_iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> ColourWeights {
        ColourWeights { r: 15, g: 25, b: 18 }
    }

    #[test]
    fn test_interior_is_black() {
        let map = WeightedColourMap::new(weights(), 100);

        assert_eq!(map.map(EscapeTime::Interior).unwrap(), Colour::BLACK);
    }

    #[test]
    fn test_channels_wrap_modulo_256() {
        let map = WeightedColourMap::new(weights(), 100);
        let colour = map.map(EscapeTime::Escaped { iterations: 20 }).unwrap();

        // 300 % 256, 500 % 256, 360 % 256
        assert_eq!(colour, Colour { r: 44, g: 244, b: 104 });
    }

    #[test]
    fn test_large_weights_do_not_overflow() {
        let map = WeightedColourMap::new(
            ColourWeights {
                r: u32::MAX,
                g: 256,
                b: 1,
            },
            65534,
        );
        let colour = map.map(EscapeTime::Escaped { iterations: 65535 }).unwrap();

        assert_eq!(colour, Colour { r: 1, g: 0, b: 255 });
    }

    #[test]
    fn test_budget_plus_one_is_allowed() {
        let map = WeightedColourMap::new(weights(), 10);

        assert!(map.map(EscapeTime::Escaped { iterations: 11 }).is_ok());
        assert!(map.map(EscapeTime::Escaped { iterations: 12 }).is_err());
    }
}
