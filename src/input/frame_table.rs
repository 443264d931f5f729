//! Reader for `;`-separated frame tables.
//!
//! The first non-blank line is a header. Every other row describes one frame with these
//! columns, in order:
//!
//! `type_fractal; max_iterations; julia_a; julia_b; xmin; xmax; ymin; ymax; r; g; b;
//! opt_next_image; zoom_amount; centering_sigma; centering_up; centering_down;
//! centering_left; centering_right; move_x; move_y`
//!
//! Rows that cannot be turned into a frame are logged and skipped.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::core::data::frame_sequence::{FrameSequence, FrameSequenceError};
use crate::core::data::frame_spec::{
    BoundOverrides, Centering, ColourWeights, FrameSpec, FrameSpecError, NextFrameBehaviour,
    SearchDirections, Translation,
};
use crate::core::fractals::fractal_kinds::FractalKind;

const DELIMITER: char = ';';
const COLUMN_COUNT: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub enum RowError {
    ColumnCount { found: usize },
    InvalidField { field: &'static str, value: String },
    UnknownFractal { value: String },
    Frame(FrameSpecError),
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnCount { found } => {
                write!(f, "expected {} columns, found {}", COLUMN_COUNT, found)
            }
            Self::InvalidField { field, value } => write!(f, "{}: cannot parse {:?}", field, value),
            Self::UnknownFractal { value } => write!(f, "unknown fractal type {:?}", value),
            Self::Frame(err) => write!(f, "{}", err),
        }
    }
}

impl Error for RowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Frame(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FrameSpecError> for RowError {
    fn from(err: FrameSpecError) -> Self {
        Self::Frame(err)
    }
}

#[derive(Debug)]
pub enum ReadFrameTableError {
    Io { path: PathBuf, source: io::Error },
    Sequence(FrameSequenceError),
}

impl fmt::Display for ReadFrameTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Sequence(err) => write!(f, "{}", err),
        }
    }
}

impl Error for ReadFrameTableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Sequence(err) => Some(err),
        }
    }
}

impl From<FrameSequenceError> for ReadFrameTableError {
    fn from(err: FrameSequenceError) -> Self {
        Self::Sequence(err)
    }
}

fn required<T: FromStr>(value: &str, field: &'static str) -> Result<T, RowError> {
    value.parse().map_err(|_| RowError::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn optional(value: &str, field: &'static str) -> Result<Option<f64>, RowError> {
    if value.is_empty() {
        Ok(None)
    } else {
        required(value, field).map(Some)
    }
}

fn flag(value: &str, field: &'static str) -> Result<bool, RowError> {
    match value {
        "" | "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(RowError::InvalidField {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_kind(kind: &str, a: &str, b: &str) -> Result<FractalKind, RowError> {
    match kind.to_ascii_lowercase().as_str() {
        "julia" => Ok(FractalKind::Julia {
            a: required(a, "julia_a")?,
            b: required(b, "julia_b")?,
        }),
        "mandelbrot" => Ok(FractalKind::Mandelbrot),
        _ => Err(RowError::UnknownFractal {
            value: kind.to_string(),
        }),
    }
}

fn parse_behaviour(fields: &[&str]) -> Result<NextFrameBehaviour, RowError> {
    let options = fields[11].to_ascii_uppercase();

    let zoom = if options.contains("ZOOM") {
        Some(required(fields[12], "zoom_amount")?)
    } else {
        None
    };

    let centering = if options.contains("CENTERING") {
        Some(Centering {
            sigma: required(fields[13], "centering_sigma")?,
            directions: SearchDirections {
                up: flag(fields[14], "centering_up")?,
                down: flag(fields[15], "centering_down")?,
                left: flag(fields[16], "centering_left")?,
                right: flag(fields[17], "centering_right")?,
            },
        })
    } else {
        None
    };

    let translation = if options.contains("MOVE") {
        Some(Translation {
            x: optional(fields[18], "move_x")?.unwrap_or(0.0),
            y: optional(fields[19], "move_y")?.unwrap_or(0.0),
        })
    } else {
        None
    };

    Ok(NextFrameBehaviour {
        zoom,
        centering,
        translation,
    })
}

/// Turns one data row into a frame.
pub fn parse_row(row: &str) -> Result<FrameSpec, RowError> {
    let fields: Vec<&str> = row.split(DELIMITER).map(str::trim).collect();
    if fields.len() != COLUMN_COUNT {
        return Err(RowError::ColumnCount {
            found: fields.len(),
        });
    }

    let kind = parse_kind(fields[0], fields[2], fields[3])?;
    let max_iterations = required(fields[1], "max_iterations")?;
    let bounds = BoundOverrides {
        xmin: optional(fields[4], "xmin")?,
        xmax: optional(fields[5], "xmax")?,
        ymin: optional(fields[6], "ymin")?,
        ymax: optional(fields[7], "ymax")?,
    };
    let colour_weights = ColourWeights {
        r: required(fields[8], "r")?,
        g: required(fields[9], "g")?,
        b: required(fields[10], "b")?,
    };
    let behaviour = parse_behaviour(&fields)?;

    Ok(FrameSpec::new(
        kind,
        max_iterations,
        colour_weights,
        bounds,
        behaviour,
    )?)
}

/// Parses a whole table, skipping the header, blank lines and unusable rows.
pub fn parse_frame_table(text: &str) -> Result<FrameSequence, FrameSequenceError> {
    let mut frames = Vec::new();

    let rows = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .skip(1);

    for (index, line) in rows {
        match parse_row(line) {
            Ok(frame) => frames.push(frame),
            Err(err) => warn!(line = index + 1, error = %err, "skipping frame row"),
        }
    }

    debug!(frames = frames.len(), "parsed frame table");

    FrameSequence::new(frames)
}

pub fn read_frame_table(path: &Path) -> Result<FrameSequence, ReadFrameTableError> {
    let text = fs::read_to_string(path).map_err(|source| ReadFrameTableError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_frame_table(&text)?)
}
