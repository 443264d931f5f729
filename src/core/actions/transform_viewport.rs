use crate::core::data::frame_size::FrameSize;
use crate::core::data::frame_spec::{BoundOverrides, NextFrameBehaviour};
use crate::core::data::point::Point;
use crate::core::data::precision::Precision;
use crate::core::data::viewport::{IEEE_DOUBLE_BITS, Viewport, ViewportError};
use rug::Float;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TransformViewportError {
    MissingInterestingPoint,
    PointOutsideFrame { point: Point },
    Viewport(ViewportError),
}

impl fmt::Display for TransformViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInterestingPoint => {
                write!(f, "centering is enabled but no interesting pixel was given")
            }
            Self::PointOutsideFrame { point } => {
                write!(f, "centre pixel ({}, {}) is outside the frame", point.x, point.y)
            }
            Self::Viewport(err) => write!(f, "transformed viewport is invalid: {}", err),
        }
    }
}

impl Error for TransformViewportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Viewport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ViewportError> for TransformViewportError {
    fn from(err: ViewportError) -> Self {
        Self::Viewport(err)
    }
}

struct Bounds {
    xmin: Float,
    xmax: Float,
    ymin: Float,
    ymax: Float,
}

impl Bounds {
    fn span_x(&self, bits: u32) -> Float {
        Float::with_val(bits, &self.xmax - &self.xmin)
    }

    fn span_y(&self, bits: u32) -> Float {
        Float::with_val(bits, &self.ymax - &self.ymin)
    }
}

fn recentre(
    bounds: &mut Bounds,
    point: Point,
    frame_size: FrameSize,
    bits: u32,
) -> Result<(), TransformViewportError> {
    if !frame_size.contains_point(point) {
        return Err(TransformViewportError::PointOutsideFrame { point });
    }

    let width = bounds.span_x(bits);
    let height = bounds.span_y(bits);

    let mut offset_x = Float::with_val(bits, &width / frame_size.width());
    offset_x *= point.x;
    let centre_x = Float::with_val(bits, &bounds.xmin + &offset_x);

    let mut offset_y = Float::with_val(bits, &height / frame_size.height());
    offset_y *= point.y;
    let centre_y = Float::with_val(bits, &bounds.ymax - &offset_y);

    let half_width = Float::with_val(bits, &width / 2u32);
    let half_height = Float::with_val(bits, &height / 2u32);

    bounds.xmin = Float::with_val(bits, &centre_x - &half_width);
    bounds.xmax = Float::with_val(bits, &centre_x + &half_width);
    bounds.ymin = Float::with_val(bits, &centre_y - &half_height);
    bounds.ymax = Float::with_val(bits, &centre_y + &half_height);

    Ok(())
}

fn translate(bounds: &mut Bounds, x: f64, y: f64, bits: u32) {
    let dx = Float::with_val(IEEE_DOUBLE_BITS, x);
    let dy = Float::with_val(IEEE_DOUBLE_BITS, y);

    bounds.xmin = Float::with_val(bits, &bounds.xmin + &dx);
    bounds.xmax = Float::with_val(bits, &bounds.xmax + &dx);
    bounds.ymin = Float::with_val(bits, &bounds.ymin + &dy);
    bounds.ymax = Float::with_val(bits, &bounds.ymax + &dy);
}

fn zoom(bounds: &mut Bounds, zoom_amount: f64, bits: u32) {
    let inverse = Float::with_val(IEEE_DOUBLE_BITS, 1.0 - zoom_amount);

    let mut shift_x = Float::with_val(bits, bounds.span_x(bits) * &inverse);
    shift_x /= 2u32;
    let mut shift_y = Float::with_val(bits, bounds.span_y(bits) * &inverse);
    shift_y /= 2u32;

    bounds.xmin = Float::with_val(bits, &bounds.xmin + &shift_x);
    bounds.xmax = Float::with_val(bits, &bounds.xmax - &shift_x);
    bounds.ymin = Float::with_val(bits, &bounds.ymin + &shift_y);
    bounds.ymax = Float::with_val(bits, &bounds.ymax - &shift_y);
}

fn override_bounds(current: &Viewport, next: BoundOverrides) -> Result<Viewport, ViewportError> {
    let pick = |value: Option<f64>, carried: &Float| match value {
        Some(value) => Float::with_val(IEEE_DOUBLE_BITS, value),
        None => carried.clone(),
    };

    Viewport::new(
        pick(next.xmin, current.xmin()),
        pick(next.xmax, current.xmax()),
        pick(next.ymin, current.ymin()),
        pick(next.ymax, current.ymax()),
    )
}

/// Derives the viewport of the next frame from the one just rendered.
///
/// Steps run in order, each only when enabled: recentre on `nearest` keeping the window size,
/// shift by the translation, contract by `(1 - zoom_amount) / 2` of the span on every side.
/// All arithmetic is rounded to `precision`. When `behaviour` enables nothing, the explicit
/// bounds of the next frame replace the current ones field by field (blank fields carry
/// over); without a next frame the viewport is returned unchanged.
pub fn transform_viewport(
    current: &Viewport,
    behaviour: NextFrameBehaviour,
    next_bounds: Option<BoundOverrides>,
    nearest: Option<Point>,
    frame_size: FrameSize,
    precision: Precision,
) -> Result<Viewport, TransformViewportError> {
    if !behaviour.is_automatic() {
        return match next_bounds {
            Some(next) => Ok(override_bounds(current, next)?),
            None => Ok(current.clone()),
        };
    }

    let bits = precision.bits();
    let mut bounds = Bounds {
        xmin: current.xmin().clone(),
        xmax: current.xmax().clone(),
        ymin: current.ymin().clone(),
        ymax: current.ymax().clone(),
    };

    if behaviour.centering.is_some() {
        let point = nearest.ok_or(TransformViewportError::MissingInterestingPoint)?;
        recentre(&mut bounds, point, frame_size, bits)?;
    }

    if let Some(translation) = behaviour.translation {
        translate(&mut bounds, translation.x, translation.y, bits);
    }

    if let Some(zoom_amount) = behaviour.zoom {
        zoom(&mut bounds, zoom_amount, bits);
    }

    Ok(Viewport::new(
        bounds.xmin,
        bounds.xmax,
        bounds.ymin,
        bounds.ymax,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::frame_spec::{Centering, SearchDirections, Translation};

    fn square(half: f64) -> Viewport {
        Viewport::from_f64(-half, half, -half, half).unwrap()
    }

    fn size() -> FrameSize {
        FrameSize::new(4, 4).unwrap()
    }

    fn precision() -> Precision {
        Precision::from_digits(20)
    }

    fn centering() -> Option<Centering> {
        Some(Centering {
            sigma: 1.0,
            directions: SearchDirections::ALL,
        })
    }

    fn as_f64(viewport: &Viewport) -> (f64, f64, f64, f64) {
        (
            viewport.xmin().to_f64(),
            viewport.xmax().to_f64(),
            viewport.ymin().to_f64(),
            viewport.ymax().to_f64(),
        )
    }

    #[test]
    fn test_centering_on_centre_pixel_keeps_window() {
        let behaviour = NextFrameBehaviour {
            centering: centering(),
            ..NextFrameBehaviour::default()
        };

        let next = transform_viewport(
            &square(2.0),
            behaviour,
            None,
            Some(Point { x: 2, y: 2 }),
            size(),
            precision(),
        )
        .unwrap();

        assert_eq!(as_f64(&next), (-2.0, 2.0, -2.0, 2.0));
    }

    #[test]
    fn test_centering_on_top_left_pixel() {
        let behaviour = NextFrameBehaviour {
            centering: centering(),
            ..NextFrameBehaviour::default()
        };

        let next = transform_viewport(
            &square(2.0),
            behaviour,
            None,
            Some(Point { x: 0, y: 0 }),
            size(),
            precision(),
        )
        .unwrap();

        assert_eq!(as_f64(&next), (-4.0, 0.0, 0.0, 4.0));
    }

    #[test]
    fn test_centering_without_point_fails() {
        let behaviour = NextFrameBehaviour {
            centering: centering(),
            ..NextFrameBehaviour::default()
        };

        assert_eq!(
            transform_viewport(&square(2.0), behaviour, None, None, size(), precision()),
            Err(TransformViewportError::MissingInterestingPoint)
        );
    }

    #[test]
    fn test_translation_shifts_both_axes() {
        let behaviour = NextFrameBehaviour {
            translation: Some(Translation { x: 0.5, y: -0.25 }),
            ..NextFrameBehaviour::default()
        };

        let next =
            transform_viewport(&square(1.0), behaviour, None, None, size(), precision()).unwrap();

        assert_eq!(as_f64(&next), (-0.5, 1.5, -1.25, 0.75));
    }

    #[test]
    fn test_zoom_contracts_towards_centre() {
        let behaviour = NextFrameBehaviour {
            zoom: Some(0.5),
            ..NextFrameBehaviour::default()
        };

        let next =
            transform_viewport(&square(2.0), behaviour, None, None, size(), precision()).unwrap();

        assert_eq!(as_f64(&next), (-1.0, 1.0, -1.0, 1.0));
    }

    #[test]
    fn test_steps_apply_in_order() {
        // recentre on (0, 0) -> [-4, 0] x [0, 4]; shift by (1, -1) -> [-3, 1] x [-1, 3];
        // zoom by 0.5 -> [-2, 0] x [0, 2]
        let behaviour = NextFrameBehaviour {
            zoom: Some(0.5),
            centering: centering(),
            translation: Some(Translation { x: 1.0, y: -1.0 }),
        };

        let next = transform_viewport(
            &square(2.0),
            behaviour,
            None,
            Some(Point { x: 0, y: 0 }),
            size(),
            precision(),
        )
        .unwrap();

        assert_eq!(as_f64(&next), (-2.0, 0.0, 0.0, 2.0));
    }

    #[test]
    fn test_results_carry_frame_precision() {
        let behaviour = NextFrameBehaviour {
            zoom: Some(0.975),
            ..NextFrameBehaviour::default()
        };

        let next =
            transform_viewport(&square(1.25), behaviour, None, None, size(), precision()).unwrap();

        assert_eq!(next.xmin().prec(), precision().bits());
        assert_eq!(next.ymax().prec(), precision().bits());
    }

    #[test]
    fn test_fallback_uses_next_bounds_and_carries_blanks() {
        let next_bounds = BoundOverrides {
            xmin: Some(-0.5),
            ymax: Some(0.25),
            ..BoundOverrides::default()
        };

        let next = transform_viewport(
            &square(1.0),
            NextFrameBehaviour::default(),
            Some(next_bounds),
            Some(Point { x: 0, y: 0 }),
            size(),
            precision(),
        )
        .unwrap();

        assert_eq!(as_f64(&next), (-0.5, 1.0, -1.0, 0.25));
    }

    #[test]
    fn test_fallback_without_next_frame_keeps_viewport() {
        let current = square(1.0);

        let next = transform_viewport(
            &current,
            NextFrameBehaviour::default(),
            None,
            None,
            size(),
            precision(),
        )
        .unwrap();

        assert_eq!(next, current);
    }

    #[test]
    fn test_fallback_rejects_inverted_bounds() {
        let next_bounds = BoundOverrides {
            xmin: Some(5.0),
            ..BoundOverrides::default()
        };

        assert!(matches!(
            transform_viewport(
                &square(1.0),
                NextFrameBehaviour::default(),
                Some(next_bounds),
                None,
                size(),
                precision()
            ),
            Err(TransformViewportError::Viewport(ViewportError::InvalidSize { .. }))
        ));
    }

    #[test]
    fn test_collapse_at_low_precision_is_rejected() {
        // 4 bits cannot tell 1024 from 1025
        let current = Viewport::from_f64(1024.0, 1025.0, 0.0, 1.0).unwrap();
        let behaviour = NextFrameBehaviour {
            translation: Some(Translation { x: 0.0, y: 0.0 }),
            ..NextFrameBehaviour::default()
        };

        let result = transform_viewport(
            &current,
            behaviour,
            None,
            None,
            size(),
            Precision::from_digits(1),
        );

        assert!(matches!(
            result,
            Err(TransformViewportError::Viewport(ViewportError::InvalidSize { .. }))
        ));
    }
}
