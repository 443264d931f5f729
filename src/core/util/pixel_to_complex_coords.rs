use crate::core::data::frame_size::FrameSize;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use rug::Float;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelToComplexCoordsError {
    PointOutsideFrame { point: Point, frame_size: FrameSize },
}

impl fmt::Display for PixelToComplexCoordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutsideFrame { point, frame_size } => {
                write!(
                    f,
                    "point (x: {}, y: {}) is outside the {}x{} frame",
                    point.x,
                    point.y,
                    frame_size.width(),
                    frame_size.height()
                )
            }
        }
    }
}

impl Error for PixelToComplexCoordsError {}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexCoords {
    pub real: Float,
    pub imag: Float,
}

/// Maps pixels of one frame onto its viewport at a fixed precision.
///
/// Column 0 lands on `xmin`; row 0 lands on `ymax`, rows grow downward while the
/// imaginary axis grows upward. Neither `xmax` nor `ymin` is ever sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneMapping {
    frame_size: FrameSize,
    bits: u32,
    xmin: Float,
    ymax: Float,
    span_x: Float,
    span_y: Float,
}

impl PlaneMapping {
    #[must_use]
    pub fn new(viewport: &Viewport, frame_size: FrameSize, bits: u32) -> Self {
        Self {
            frame_size,
            bits,
            xmin: viewport.xmin().clone(),
            ymax: viewport.ymax().clone(),
            span_x: viewport.width(bits),
            span_y: viewport.height(bits),
        }
    }

    #[must_use]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    #[must_use]
    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }
}

/// `x = xmin + col * (xmax - xmin) / width`, `y = ymax - row * (ymax - ymin) / height`,
/// every operation rounded to the mapping's precision.
pub fn pixel_to_complex_coords(
    pixel: Point,
    mapping: &PlaneMapping,
) -> Result<ComplexCoords, PixelToComplexCoordsError> {
    if !mapping.frame_size.contains_point(pixel) {
        return Err(PixelToComplexCoordsError::PointOutsideFrame {
            point: pixel,
            frame_size: mapping.frame_size,
        });
    }

    let mut offset_x = Float::with_val(mapping.bits, &mapping.span_x * pixel.x);
    offset_x /= mapping.frame_size.width();
    let real = Float::with_val(mapping.bits, &mapping.xmin + &offset_x);

    let mut offset_y = Float::with_val(mapping.bits, &mapping.span_y * pixel.y);
    offset_y /= mapping.frame_size.height();
    let imag = Float::with_val(mapping.bits, &mapping.ymax - &offset_y);

    Ok(ComplexCoords { real, imag })
}
