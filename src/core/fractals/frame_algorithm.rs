use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::frame_size::FrameSize;
use crate::core::data::point::Point;
use crate::core::fractals::algorithm_error::AlgorithmConstructorError;
use crate::core::fractals::escape_time::EscapeTime;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::fractals::julia::algorithm::JuliaAlgorithm;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::util::pixel_to_complex_coords::{PixelToComplexCoordsError, PlaneMapping};

/// Algorithm selected by a frame's fractal kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameAlgorithm {
    Julia(JuliaAlgorithm),
    Mandelbrot(MandelbrotAlgorithm),
}

impl FrameAlgorithm {
    pub fn new(
        kind: FractalKind,
        mapping: PlaneMapping,
        max_iterations: u32,
    ) -> Result<Self, AlgorithmConstructorError> {
        Ok(match kind {
            FractalKind::Julia { a, b } => {
                Self::Julia(JuliaAlgorithm::new(mapping, a, b, max_iterations)?)
            }
            FractalKind::Mandelbrot => {
                Self::Mandelbrot(MandelbrotAlgorithm::new(mapping, max_iterations)?)
            }
        })
    }
}

impl FractalAlgorithm for FrameAlgorithm {
    type Success = EscapeTime;
    type Failure = PixelToComplexCoordsError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        match self {
            Self::Julia(algorithm) => algorithm.compute(pixel),
            Self::Mandelbrot(algorithm) => algorithm.compute(pixel),
        }
    }

    fn frame_size(&self) -> FrameSize {
        match self {
            Self::Julia(algorithm) => algorithm.frame_size(),
            Self::Mandelbrot(algorithm) => algorithm.frame_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::viewport::Viewport;

    fn mapping() -> PlaneMapping {
        let viewport = Viewport::from_f64(-2.0, 2.0, -2.0, 2.0).unwrap();

        PlaneMapping::new(&viewport, FrameSize::new(4, 4).unwrap(), 64)
    }

    #[test]
    fn test_kind_selects_algorithm() {
        let julia = FrameAlgorithm::new(FractalKind::Julia { a: 0.39, b: 0.6 }, mapping(), 10);
        let mandelbrot = FrameAlgorithm::new(FractalKind::Mandelbrot, mapping(), 10);

        assert!(matches!(julia, Ok(FrameAlgorithm::Julia(_))));
        assert!(matches!(mandelbrot, Ok(FrameAlgorithm::Mandelbrot(_))));
    }

    #[test]
    fn test_center_differs_between_kinds() {
        let center = Point { x: 2, y: 2 };
        let julia =
            FrameAlgorithm::new(FractalKind::Julia { a: 3.0, b: 0.0 }, mapping(), 10).unwrap();
        let mandelbrot = FrameAlgorithm::new(FractalKind::Mandelbrot, mapping(), 10).unwrap();

        // z0 = 0 with c = 3 escapes after one step; the Mandelbrot origin never does
        assert_eq!(
            julia.compute(center),
            Ok(EscapeTime::Escaped { iterations: 2 })
        );
        assert_eq!(mandelbrot.compute(center), Ok(EscapeTime::Interior));
        assert_eq!(julia.frame_size(), FrameSize::new(4, 4).unwrap());
    }
}
