use crate::core::data::viewport::{Viewport, ViewportError};
use crate::core::fractals::fractal_kinds::FractalKind;
use std::error::Error;
use std::fmt;

/// Largest budget whose counts (up to `max_iterations + 1`) still fit in `u16`.
pub const MAX_SUPPORTED_ITERATIONS: u32 = u16::MAX as u32 - 1;

#[derive(Debug, Clone, PartialEq)]
pub enum FrameSpecError {
    ZeroMaxIterationsError,
    MaxIterationsTooLarge { max_iterations: u32 },
    NonFiniteParameter { name: &'static str },
    InvalidZoomAmount { zoom_amount: f64 },
}

impl fmt::Display for FrameSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxIterationsError => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::MaxIterationsTooLarge { max_iterations } => {
                write!(
                    f,
                    "maximum iterations {} exceeds supported maximum {}",
                    max_iterations, MAX_SUPPORTED_ITERATIONS
                )
            }
            Self::NonFiniteParameter { name } => write!(f, "{} must be a finite number", name),
            Self::InvalidZoomAmount { zoom_amount } => {
                write!(f, "zoom amount must be positive, got {}", zoom_amount)
            }
        }
    }
}

impl Error for FrameSpecError {}

/// Per-channel multipliers applied to the iteration count (modulo 256).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColourWeights {
    pub r: u32,
    pub g: u32,
    pub b: u32,
}

/// Moves the centering search is allowed to make from a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl SearchDirections {
    pub const ALL: Self = Self {
        up: true,
        down: true,
        left: true,
        right: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centering {
    /// Threshold is `mean + sigma * standard_deviation`.
    pub sigma: f64,
    pub directions: SearchDirections,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

/// How the viewport of the following frame is derived from this one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NextFrameBehaviour {
    pub zoom: Option<f64>,
    pub centering: Option<Centering>,
    pub translation: Option<Translation>,
}

impl NextFrameBehaviour {
    /// False when the next frame's explicit bounds should be used instead.
    #[must_use]
    pub fn is_automatic(&self) -> bool {
        self.zoom.is_some() || self.centering.is_some() || self.translation.is_some()
    }
}

/// Explicit bounds of a frame; `None` carries the previous value over.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundOverrides {
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub ymin: Option<f64>,
    pub ymax: Option<f64>,
}

impl BoundOverrides {
    #[must_use]
    pub fn all(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin: Some(xmin),
            xmax: Some(xmax),
            ymin: Some(ymin),
            ymax: Some(ymax),
        }
    }

    /// The viewport described by these bounds, when all four are present.
    #[must_use]
    pub fn to_viewport(&self) -> Option<Result<Viewport, ViewportError>> {
        match (self.xmin, self.xmax, self.ymin, self.ymax) {
            (Some(xmin), Some(xmax), Some(ymin), Some(ymax)) => {
                Some(Viewport::from_f64(xmin, xmax, ymin, ymax))
            }
            _ => None,
        }
    }
}

/// Configuration of one frame of the animation.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSpec {
    kind: FractalKind,
    max_iterations: u32,
    colour_weights: ColourWeights,
    bounds: BoundOverrides,
    behaviour: NextFrameBehaviour,
}

fn require_finite(value: f64, name: &'static str) -> Result<(), FrameSpecError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FrameSpecError::NonFiniteParameter { name })
    }
}

impl FrameSpec {
    pub fn new(
        kind: FractalKind,
        max_iterations: u32,
        colour_weights: ColourWeights,
        bounds: BoundOverrides,
        behaviour: NextFrameBehaviour,
    ) -> Result<Self, FrameSpecError> {
        if max_iterations == 0 {
            return Err(FrameSpecError::ZeroMaxIterationsError);
        }

        if max_iterations > MAX_SUPPORTED_ITERATIONS {
            return Err(FrameSpecError::MaxIterationsTooLarge { max_iterations });
        }

        if let FractalKind::Julia { a, b } = kind {
            require_finite(a, "julia_a")?;
            require_finite(b, "julia_b")?;
        }

        for (value, name) in [
            (bounds.xmin, "xmin"),
            (bounds.xmax, "xmax"),
            (bounds.ymin, "ymin"),
            (bounds.ymax, "ymax"),
        ] {
            if let Some(value) = value {
                require_finite(value, name)?;
            }
        }

        if let Some(zoom_amount) = behaviour.zoom {
            if !zoom_amount.is_finite() || zoom_amount <= 0.0 {
                return Err(FrameSpecError::InvalidZoomAmount { zoom_amount });
            }
        }

        if let Some(centering) = behaviour.centering {
            require_finite(centering.sigma, "centering_sigma")?;
        }

        if let Some(translation) = behaviour.translation {
            require_finite(translation.x, "move_x")?;
            require_finite(translation.y, "move_y")?;
        }

        Ok(Self {
            kind,
            max_iterations,
            colour_weights,
            bounds,
            behaviour,
        })
    }

    #[must_use]
    pub fn kind(&self) -> FractalKind {
        self.kind
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn colour_weights(&self) -> ColourWeights {
        self.colour_weights
    }

    #[must_use]
    pub fn bounds(&self) -> BoundOverrides {
        self.bounds
    }

    #[must_use]
    pub fn behaviour(&self) -> NextFrameBehaviour {
        self.behaviour
    }
}
