use crate::core::data::precision::Precision;
use crate::core::data::viewport::Viewport;
use rug::Float;
use std::error::Error;
use std::fmt;

/// Significant digits kept per frame unless configured otherwise.
pub const DEFAULT_SIGNIFICANT_DIGITS: u32 = 6;

/// Past this the frame would be too slow to compute in any useful time.
pub const MAX_PRECISION_DIGITS: u32 = 4096;

// Enough to place log10 of the span in the right integer bracket.
const LOG10_BITS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrecisionError {
    DegenerateSpan { axis: Axis },
    CeilingExceeded { required_digits: i64, ceiling: u32 },
}

impl fmt::Display for PrecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateSpan { axis } => {
                write!(f, "viewport span on the {} axis collapsed to zero", axis)
            }
            Self::CeilingExceeded {
                required_digits,
                ceiling,
            } => write!(
                f,
                "frame needs {} significant digits, above the ceiling of {}",
                required_digits, ceiling
            ),
        }
    }
}

impl Error for PrecisionError {}

/// `floor(log10(span))` of a strictly positive, finite span.
fn span_magnitude(span: &Float, axis: Axis) -> Result<i64, PrecisionError> {
    if !span.is_finite() || *span <= 0 {
        return Err(PrecisionError::DegenerateSpan { axis });
    }

    let magnitude = Float::with_val(LOG10_BITS, span.log10_ref()).floor();

    magnitude
        .to_i32_saturating()
        .map(i64::from)
        .ok_or(PrecisionError::DegenerateSpan { axis })
}

/// Digits needed so that `significant_digits` of each axis span stay distinguishable.
///
/// Per axis this is `significant_digits - floor(log10(max - min))`; the larger axis wins and
/// the result never drops below [`Precision::MIN_DIGITS`].
pub fn adjust_precision(
    viewport: &Viewport,
    significant_digits: u32,
) -> Result<Precision, PrecisionError> {
    let bits = viewport.bound_precision();
    let x_magnitude = span_magnitude(&viewport.width(bits), Axis::X)?;
    let y_magnitude = span_magnitude(&viewport.height(bits), Axis::Y)?;

    let significant_digits = i64::from(significant_digits);
    let required_digits = (significant_digits - x_magnitude).max(significant_digits - y_magnitude);

    if required_digits > i64::from(MAX_PRECISION_DIGITS) {
        return Err(PrecisionError::CeilingExceeded {
            required_digits,
            ceiling: MAX_PRECISION_DIGITS,
        });
    }

    let digits = u32::try_from(required_digits.max(i64::from(Precision::MIN_DIGITS)))
        .unwrap_or(Precision::MIN_DIGITS);

    Ok(Precision::from_digits(digits))
}
