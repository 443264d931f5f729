use crate::core::data::frame_size::FrameSize;
use crate::core::data::point::Point;
use std::error::Error;

/// Per-pixel computation of one frame.
///
/// Implementations are shared read-only between workers, so `compute` must depend on
/// nothing but `pixel` and the algorithm's own immutable state.
pub trait FractalAlgorithm {
    type Success;
    type Failure: Error;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure>;

    fn frame_size(&self) -> FrameSize;
}
