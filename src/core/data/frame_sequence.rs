use crate::core::data::frame_spec::FrameSpec;
use crate::core::data::viewport::{Viewport, ViewportError};
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FrameSequenceError {
    NoUsableRows,
    MissingStartBounds,
    InvalidStartBounds(ViewportError),
}

impl fmt::Display for FrameSequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoUsableRows => write!(f, "frame sequence has no usable rows"),
            Self::MissingStartBounds => {
                write!(f, "first frame must give xmin, xmax, ymin and ymax")
            }
            Self::InvalidStartBounds(err) => write!(f, "first frame bounds: {}", err),
        }
    }
}

impl Error for FrameSequenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidStartBounds(err) => Some(err),
            _ => None,
        }
    }
}

/// Ordered, immutable list of frames with the viewport the first one starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSequence {
    frames: Vec<FrameSpec>,
    start_viewport: Viewport,
}

impl FrameSequence {
    pub fn new(frames: Vec<FrameSpec>) -> Result<Self, FrameSequenceError> {
        let first = frames.first().ok_or(FrameSequenceError::NoUsableRows)?;
        let start_viewport = first
            .bounds()
            .to_viewport()
            .ok_or(FrameSequenceError::MissingStartBounds)?
            .map_err(FrameSequenceError::InvalidStartBounds)?;

        Ok(Self {
            frames,
            start_viewport,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FrameSpec> {
        self.frames.get(index)
    }

    #[must_use]
    pub fn frames(&self) -> &[FrameSpec] {
        &self.frames
    }

    #[must_use]
    pub fn start_viewport(&self) -> &Viewport {
        &self.start_viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::frame_spec::{BoundOverrides, ColourWeights, NextFrameBehaviour};
    use crate::core::fractals::fractal_kinds::FractalKind;

    fn frame(bounds: BoundOverrides) -> FrameSpec {
        FrameSpec::new(
            FractalKind::Mandelbrot,
            50,
            ColourWeights::default(),
            bounds,
            NextFrameBehaviour::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        assert_eq!(
            FrameSequence::new(Vec::new()),
            Err(FrameSequenceError::NoUsableRows)
        );
    }

    #[test]
    fn test_first_frame_needs_all_bounds() {
        let partial = BoundOverrides {
            xmin: Some(-2.0),
            xmax: Some(1.0),
            ymin: Some(-1.0),
            ymax: None,
        };

        assert_eq!(
            FrameSequence::new(vec![frame(partial)]),
            Err(FrameSequenceError::MissingStartBounds)
        );
    }

    #[test]
    fn test_first_frame_bounds_must_be_ordered() {
        let inverted = BoundOverrides::all(1.0, -2.0, -1.0, 1.0);

        assert!(matches!(
            FrameSequence::new(vec![frame(inverted)]),
            Err(FrameSequenceError::InvalidStartBounds(_))
        ));
    }

    #[test]
    fn test_later_frames_may_leave_bounds_blank() {
        let sequence = FrameSequence::new(vec![
            frame(BoundOverrides::all(-2.0, 1.0, -1.0, 1.0)),
            frame(BoundOverrides::default()),
        ])
        .unwrap();

        assert_eq!(sequence.len(), 2);
        assert!(sequence.get(2).is_none());
        assert_eq!(sequence.start_viewport().xmin().to_f64(), -2.0);
    }
}
