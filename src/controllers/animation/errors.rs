use crate::core::actions::adjust_precision::PrecisionError;
use crate::core::actions::render_frame::RenderFrameError;
use crate::core::actions::transform_viewport::TransformViewportError;
use crate::core::data::checkpoint::CheckpointError;
use crate::core::fractals::algorithm_error::AlgorithmConstructorError;
use crate::core::util::pixel_to_complex_coords::PixelToComplexCoordsError;
use rayon::ThreadPoolBuildError;
use std::error::Error;
use std::fmt;

/// Why a run stopped early.
///
/// Per-frame variants carry the zero-based index of the frame that failed. Every frame before
/// it has been emitted and checkpointed.
#[derive(Debug)]
pub enum AnimationError {
    ThreadPool(ThreadPoolBuildError),
    InvalidStart {
        next_frame: usize,
        frame_count: usize,
    },
    InvalidCheckpoint(CheckpointError),
    Precision {
        frame: usize,
        source: PrecisionError,
    },
    Algorithm {
        frame: usize,
        source: AlgorithmConstructorError,
    },
    Render {
        frame: usize,
        source: RenderFrameError<PixelToComplexCoordsError>,
    },
    NoFurtherDetail {
        frame: usize,
    },
    Viewport {
        frame: usize,
        source: TransformViewportError,
    },
    Output {
        frame: usize,
        source: Box<dyn Error + Send + Sync>,
    },
    Checkpoint {
        frame: usize,
        source: Box<dyn Error + Send + Sync>,
    },
}

impl AnimationError {
    /// Index of the frame that failed, if the run got as far as a frame.
    #[must_use]
    pub fn frame(&self) -> Option<usize> {
        match self {
            Self::ThreadPool(_) | Self::InvalidStart { .. } | Self::InvalidCheckpoint(_) => None,
            Self::Precision { frame, .. }
            | Self::Algorithm { frame, .. }
            | Self::Render { frame, .. }
            | Self::NoFurtherDetail { frame }
            | Self::Viewport { frame, .. }
            | Self::Output { frame, .. }
            | Self::Checkpoint { frame, .. } => Some(*frame),
        }
    }
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreadPool(err) => write!(f, "could not start worker pool: {}", err),
            Self::InvalidStart {
                next_frame,
                frame_count,
            } => write!(
                f,
                "cannot start at frame {} of a {}-frame sequence",
                next_frame + 1,
                frame_count
            ),
            Self::InvalidCheckpoint(err) => write!(f, "checkpoint cannot be resumed: {}", err),
            Self::Precision { frame, source } => write!(f, "frame {}: {}", frame + 1, source),
            Self::Algorithm { frame, source } => write!(f, "frame {}: {}", frame + 1, source),
            Self::Render { frame, source } => write!(f, "frame {}: {}", frame + 1, source),
            Self::NoFurtherDetail { frame } => write!(
                f,
                "frame {}: no further detail to track, centering search found no interesting pixel",
                frame + 1
            ),
            Self::Viewport { frame, source } => write!(f, "frame {}: {}", frame + 1, source),
            Self::Output { frame, source } => {
                write!(f, "frame {}: could not write artifacts: {}", frame + 1, source)
            }
            Self::Checkpoint { frame, source } => {
                write!(f, "frame {}: could not save checkpoint: {}", frame + 1, source)
            }
        }
    }
}

impl Error for AnimationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ThreadPool(err) => Some(err),
            Self::InvalidCheckpoint(err) => Some(err),
            Self::Precision { source, .. } => Some(source),
            Self::Algorithm { source, .. } => Some(source),
            Self::Render { source, .. } => Some(source),
            Self::Viewport { source, .. } => Some(source),
            Self::Output { source, .. } | Self::Checkpoint { source, .. } => Some(source.as_ref()),
            Self::InvalidStart { .. } | Self::NoFurtherDetail { .. } => None,
        }
    }
}

impl From<ThreadPoolBuildError> for AnimationError {
    fn from(err: ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err)
    }
}
