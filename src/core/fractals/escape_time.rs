use crate::core::data::iteration_grid::INTERIOR_MARKER;
use rug::{Assign, Float};

const ESCAPE_RADIUS_SQUARED: u32 = 4;

/// Outcome of iterating one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeTime {
    /// Loop counter when `|z|² > 4` was first seen; always in `1..=max_iterations + 1`.
    Escaped { iterations: u16 },
    /// Still bounded after the whole iteration budget.
    Interior,
}

impl EscapeTime {
    /// Value stored in the iteration grid.
    #[must_use]
    pub fn iteration_count(self) -> u16 {
        match self {
            Self::Escaped { iterations } => iterations,
            Self::Interior => INTERIOR_MARKER,
        }
    }
}

/// Runs `z ← z² + c` from `z0 = (x, y)` with `c = (a, b)`.
///
/// Every intermediate is rounded to `x`'s precision, which callers set to the frame
/// precision; `a` and `b` keep their own precision and are added into that. `max_iterations`
/// must fit the grid (see `MAX_SUPPORTED_ITERATIONS`).
pub fn iterate_escape_time(
    mut x: Float,
    mut y: Float,
    a: &Float,
    b: &Float,
    max_iterations: u32,
) -> EscapeTime {
    let bits = x.prec();
    y.set_prec(bits);

    let mut x_squared = Float::new(bits);
    let mut y_squared = Float::new(bits);
    let mut norm = Float::new(bits);
    let mut cross = Float::new(bits);
    let mut i: u32 = 1;

    loop {
        x_squared.assign(x.square_ref());
        y_squared.assign(y.square_ref());
        norm.assign(&x_squared + &y_squared);

        if i > max_iterations || norm > ESCAPE_RADIUS_SQUARED {
            break;
        }

        cross.assign(&x * &y);
        cross *= 2u32;
        cross += b;

        x.assign(&x_squared - &y_squared);
        x += a;
        std::mem::swap(&mut y, &mut cross);

        i += 1;
    }

    if i > max_iterations && norm <= ESCAPE_RADIUS_SQUARED {
        EscapeTime::Interior
    } else {
        EscapeTime::Escaped {
            iterations: u16::try_from(i).unwrap_or(u16::MAX),
        }
    }
}
