use std::error::Error;
use std::fmt;
use std::time::Duration;

use rug::Float;
use serde::{Deserialize, Serialize};

use crate::core::data::viewport::{Viewport, ViewportError};

#[derive(Debug, Clone, PartialEq)]
pub enum CheckpointError {
    InvalidPrecision { bound: &'static str, precision_bits: u32 },
    InvalidBound { bound: &'static str, value: String },
    InvalidElapsed { elapsed_secs: f64 },
    Viewport(ViewportError),
}

impl fmt::Display for CheckpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrecision {
                bound,
                precision_bits,
            } => write!(f, "{} has unusable precision of {} bits", bound, precision_bits),
            Self::InvalidBound { bound, value } => {
                write!(f, "{} is not a finite number: {:?}", bound, value)
            }
            Self::InvalidElapsed { elapsed_secs } => {
                write!(f, "elapsed time {} is not a valid duration", elapsed_secs)
            }
            Self::Viewport(err) => write!(f, "stored viewport is invalid: {}", err),
        }
    }
}

impl Error for CheckpointError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Viewport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ViewportError> for CheckpointError {
    fn from(err: ViewportError) -> Self {
        Self::Viewport(err)
    }
}

/// One viewport bound, stored with its own precision.
///
/// `value` holds as many decimal digits as MPFR needs to read back the identical float at
/// `precision_bits`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBound {
    pub precision_bits: u32,
    pub value: String,
}

impl StoredBound {
    #[must_use]
    pub fn capture(value: &Float) -> Self {
        Self {
            precision_bits: value.prec(),
            value: value.to_string_radix(10, None),
        }
    }

    pub fn restore(&self, bound: &'static str) -> Result<Float, CheckpointError> {
        if !(rug::float::prec_min()..=rug::float::prec_max()).contains(&self.precision_bits) {
            return Err(CheckpointError::InvalidPrecision {
                bound,
                precision_bits: self.precision_bits,
            });
        }

        let invalid = || CheckpointError::InvalidBound {
            bound,
            value: self.value.clone(),
        };
        let parsed = Float::parse_radix(&self.value, 10).map_err(|_| invalid())?;
        let value = Float::with_val(self.precision_bits, parsed);

        if value.is_finite() { Ok(value) } else { Err(invalid()) }
    }
}

/// Everything needed to continue a run after the last finished frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Index of the first frame not yet rendered.
    pub next_frame: usize,
    pub xmin: StoredBound,
    pub xmax: StoredBound,
    pub ymin: StoredBound,
    pub ymax: StoredBound,
    /// Wall-clock time spent on the run so far, across resumes.
    pub elapsed_secs: f64,
}

impl Checkpoint {
    #[must_use]
    pub fn capture(next_frame: usize, viewport: &Viewport, elapsed: Duration) -> Self {
        Self {
            next_frame,
            xmin: StoredBound::capture(viewport.xmin()),
            xmax: StoredBound::capture(viewport.xmax()),
            ymin: StoredBound::capture(viewport.ymin()),
            ymax: StoredBound::capture(viewport.ymax()),
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }

    pub fn viewport(&self) -> Result<Viewport, CheckpointError> {
        Ok(Viewport::new(
            self.xmin.restore("xmin")?,
            self.xmax.restore("xmax")?,
            self.ymin.restore("ymin")?,
            self.ymax.restore("ymax")?,
        )?)
    }

    pub fn elapsed(&self) -> Result<Duration, CheckpointError> {
        Duration::try_from_secs_f64(self.elapsed_secs).map_err(|_| {
            CheckpointError::InvalidElapsed {
                elapsed_secs: self.elapsed_secs,
            }
        })
    }

    /// Checks that the record describes a usable viewport and duration.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        self.viewport()?;
        self.elapsed()?;

        Ok(())
    }
}
