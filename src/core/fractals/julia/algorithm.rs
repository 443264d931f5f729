use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::frame_size::FrameSize;
use crate::core::data::point::Point;
use crate::core::data::viewport::IEEE_DOUBLE_BITS;
use crate::core::fractals::algorithm_error::{AlgorithmConstructorError, check_max_iterations};
use crate::core::fractals::escape_time::{EscapeTime, iterate_escape_time};
use crate::core::util::pixel_to_complex_coords::{
    PixelToComplexCoordsError, PlaneMapping, pixel_to_complex_coords,
};
use rug::Float;

/// `z0` is the pixel, `c = a + bi` is the same for every pixel of the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct JuliaAlgorithm {
    mapping: PlaneMapping,
    a: Float,
    b: Float,
    max_iterations: u32,
}

impl FractalAlgorithm for JuliaAlgorithm {
    type Success = EscapeTime;
    type Failure = PixelToComplexCoordsError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let z = pixel_to_complex_coords(pixel, &self.mapping)?;

        Ok(iterate_escape_time(
            z.real,
            z.imag,
            &self.a,
            &self.b,
            self.max_iterations,
        ))
    }

    fn frame_size(&self) -> FrameSize {
        self.mapping.frame_size()
    }
}

impl JuliaAlgorithm {
    pub fn new(
        mapping: PlaneMapping,
        a: f64,
        b: f64,
        max_iterations: u32,
    ) -> Result<Self, AlgorithmConstructorError> {
        check_max_iterations(max_iterations)?;

        if !(a.is_finite() && b.is_finite()) {
            return Err(AlgorithmConstructorError::NonFiniteConstant { a, b });
        }

        Ok(Self {
            mapping,
            a: Float::with_val(IEEE_DOUBLE_BITS, a),
            b: Float::with_val(IEEE_DOUBLE_BITS, b),
            max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::viewport::Viewport;

    fn mapping(width: u32, height: u32, bits: u32) -> PlaneMapping {
        let viewport = Viewport::from_f64(-1.25, 1.25, -1.25, 1.25).unwrap();

        PlaneMapping::new(&viewport, FrameSize::new(width, height).unwrap(), bits)
    }

    #[test]
    fn test_valid_constructor() {
        let algorithm = JuliaAlgorithm::new(mapping(700, 400, 64), 0.39, 0.6, 256);

        assert!(algorithm.is_ok());
    }

    #[test]
    fn test_max_iterations_must_be_greater_than_zero() {
        let algorithm = JuliaAlgorithm::new(mapping(700, 400, 64), 0.39, 0.6, 0);

        assert_eq!(
            algorithm,
            Err(AlgorithmConstructorError::ZeroMaxIterationsError)
        );
    }

    #[test]
    fn test_constant_must_be_finite() {
        let algorithm = JuliaAlgorithm::new(mapping(10, 10, 64), f64::INFINITY, 0.6, 10);

        assert!(matches!(
            algorithm,
            Err(AlgorithmConstructorError::NonFiniteConstant { .. })
        ));
    }

    #[test]
    fn test_top_left_pixel_of_reference_frame() {
        let algorithm = JuliaAlgorithm::new(mapping(1920, 1088, 64), 0.39, 0.6, 100).unwrap();

        assert_eq!(
            algorithm.compute(Point { x: 0, y: 0 }),
            Ok(EscapeTime::Escaped { iterations: 2 })
        );
    }

    #[test]
    fn test_compute_returns_error_for_pixel_outside_frame() {
        let algorithm = JuliaAlgorithm::new(mapping(10, 10, 64), 0.39, 0.6, 10).unwrap();
        let point = Point { x: 11, y: 0 };

        assert_eq!(
            algorithm.compute(point),
            Err(PixelToComplexCoordsError::PointOutsideFrame {
                point,
                frame_size: algorithm.frame_size()
            })
        );
    }
}
