use crate::core::data::iteration_grid::IterationGrid;
use crate::core::data::pixel_buffer::PixelBuffer;
use std::error::Error;

/// One finished frame, borrowed for the duration of `FrameSink::emit`.
#[derive(Debug, Clone, Copy)]
pub struct RenderedFrame<'a> {
    /// Zero-based position in the frame sequence.
    pub index: usize,
    pub iterations: &'a IterationGrid,
    pub pixels: &'a PixelBuffer,
}

/// Destination for the artifacts of each frame, called once per frame in order.
pub trait FrameSink {
    fn emit(&mut self, frame: RenderedFrame<'_>) -> Result<(), Box<dyn Error + Send + Sync>>;
}
