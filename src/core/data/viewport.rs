use rug::Float;
use std::error::Error;
use std::fmt;

/// Mantissa bits of an IEEE double; scalars from the frame table enter at this precision.
pub const IEEE_DOUBLE_BITS: u32 = 53;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewportError {
    InvalidSize { width: f64, height: f64 },
    NotFinite,
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "viewport size must be positive: {}x{}", width, height)
            }
            Self::NotFinite => write!(f, "viewport bounds must be finite"),
        }
    }
}

impl Error for ViewportError {}

/// Region of the complex plane mapped onto the pixel grid.
///
/// Bounds keep whatever precision they were computed at; a frame's arithmetic
/// rounds its results to that frame's precision without touching the inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    xmin: Float,
    xmax: Float,
    ymin: Float,
    ymax: Float,
}

impl Viewport {
    pub fn new(xmin: Float, xmax: Float, ymin: Float, ymax: Float) -> Result<Self, ViewportError> {
        if !(xmin.is_finite() && xmax.is_finite() && ymin.is_finite() && ymax.is_finite()) {
            return Err(ViewportError::NotFinite);
        }

        if xmax <= xmin || ymax <= ymin {
            return Err(ViewportError::InvalidSize {
                width: (Float::with_val(IEEE_DOUBLE_BITS, &xmax - &xmin)).to_f64(),
                height: (Float::with_val(IEEE_DOUBLE_BITS, &ymax - &ymin)).to_f64(),
            });
        }

        Ok(Self {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    pub fn from_f64(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, ViewportError> {
        Self::new(
            Float::with_val(IEEE_DOUBLE_BITS, xmin),
            Float::with_val(IEEE_DOUBLE_BITS, xmax),
            Float::with_val(IEEE_DOUBLE_BITS, ymin),
            Float::with_val(IEEE_DOUBLE_BITS, ymax),
        )
    }

    #[must_use]
    pub fn xmin(&self) -> &Float {
        &self.xmin
    }

    #[must_use]
    pub fn xmax(&self) -> &Float {
        &self.xmax
    }

    #[must_use]
    pub fn ymin(&self) -> &Float {
        &self.ymin
    }

    #[must_use]
    pub fn ymax(&self) -> &Float {
        &self.ymax
    }

    /// `xmax - xmin` rounded to `bits`.
    #[must_use]
    pub fn width(&self, bits: u32) -> Float {
        Float::with_val(bits, &self.xmax - &self.xmin)
    }

    /// `ymax - ymin` rounded to `bits`.
    #[must_use]
    pub fn height(&self, bits: u32) -> Float {
        Float::with_val(bits, &self.ymax - &self.ymin)
    }

    /// Highest precision carried by any of the four bounds.
    #[must_use]
    pub fn bound_precision(&self) -> u32 {
        self.xmin
            .prec()
            .max(self.xmax.prec())
            .max(self.ymin.prec())
            .max(self.ymax.prec())
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x({}, {}) y({}, {})",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}
