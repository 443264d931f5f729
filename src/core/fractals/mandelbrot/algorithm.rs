use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::frame_size::FrameSize;
use crate::core::data::point::Point;
use crate::core::fractals::algorithm_error::{AlgorithmConstructorError, check_max_iterations};
use crate::core::fractals::escape_time::{EscapeTime, iterate_escape_time};
use crate::core::util::pixel_to_complex_coords::{
    PixelToComplexCoordsError, PlaneMapping, pixel_to_complex_coords,
};
use rug::Float;

#[derive(Debug, Clone, PartialEq)]
pub struct MandelbrotAlgorithm {
    mapping: PlaneMapping,
    max_iterations: u32,
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Success = EscapeTime;
    type Failure = PixelToComplexCoordsError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let c = pixel_to_complex_coords(pixel, &self.mapping)?;
        let bits = self.mapping.bits();

        Ok(iterate_escape_time(
            Float::new(bits),
            Float::new(bits),
            &c.real,
            &c.imag,
            self.max_iterations,
        ))
    }

    fn frame_size(&self) -> FrameSize {
        self.mapping.frame_size()
    }
}

impl MandelbrotAlgorithm {
    pub fn new(
        mapping: PlaneMapping,
        max_iterations: u32,
    ) -> Result<Self, AlgorithmConstructorError> {
        check_max_iterations(max_iterations)?;

        Ok(Self {
            mapping,
            max_iterations,
        })
    }
}
