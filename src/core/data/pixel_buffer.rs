use crate::core::data::colour::Colour;
use crate::core::data::frame_size::FrameSize;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

fn frame_size_to_buffer_size(size: FrameSize) -> usize {
    size.pixel_count() * 3
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    BoundsMismatch {
        frame_buffer_size: usize,
        buffer_size: usize,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                frame_buffer_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "frame needs {} bytes but buffer holds {}",
                    frame_buffer_size, buffer_size
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

pub type PixelBufferData = Vec<u8>;

/// Packed RGB8 image of one frame, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    size: FrameSize,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    pub fn from_data(size: FrameSize, buffer: PixelBufferData) -> Result<Self, PixelBufferError> {
        let frame_buffer_size = frame_size_to_buffer_size(size);

        if frame_buffer_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                frame_buffer_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { size, buffer })
    }

    #[must_use]
    pub fn size(&self) -> FrameSize {
        self.size
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    #[must_use]
    pub fn colour_at(&self, pixel: Point) -> Option<Colour> {
        if !self.size.contains_point(pixel) {
            return None;
        }

        let index = self.size.index_of(pixel) * 3;

        Some(Colour {
            r: self.buffer[index],
            g: self.buffer[index + 1],
            b: self.buffer[index + 2],
        })
    }
}
