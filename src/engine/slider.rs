use crate::automation::{Element, Pointer};
use crate::engine::types::{Orientation, Point, Range, Rect};
use crate::errors::AutoconfResult;

/// Non-draggable margin rendered at both ends of every slider track.
pub const SLIDER_BORDER: i32 = 13;

/// Track extent along the axis of motion, low-value end first.
///
/// Vertical sliders grow upwards, so their low end is the bottom edge.
pub fn track(bounds: &Rect, orientation: Orientation) -> (i32, i32) {
    match orientation {
        Orientation::Horizontal => (bounds.left, bounds.right),
        Orientation::Vertical => (bounds.bottom, bounds.top),
    }
}

/// Screen coordinate along the track for `value`.
///
/// `range.min` lands on `low + border` and `range.max` on `high - border`.
/// Values outside the range are not clamped and extrapolate past the track.
pub fn pixel_for(value: i32, range: Range, (low, high): (i32, i32)) -> i32 {
    let per_unit = (high - low - 2 * SLIDER_BORDER) as f64 / range.span() as f64;
    // Truncation of the scaled offset decides the pixel; keep this order.
    let offset = (value - range.min) as f64 * per_unit;
    low + SLIDER_BORDER + offset as i32
}

/// Full click point: the mapped coordinate on the motion axis and the
/// slider's own clickable coordinate on the cross axis.
pub fn click_point(
    value: i32,
    range: Range,
    bounds: &Rect,
    clickable: Point,
    orientation: Orientation,
) -> Point {
    let along = pixel_for(value, range, track(bounds, orientation));
    match orientation {
        Orientation::Horizontal => Point { x: along, y: clickable.y },
        Orientation::Vertical => Point { x: clickable.x, y: along },
    }
}

/// Clicks `slider` at the position representing `value`.
pub fn set_slider<E: Element, P: Pointer + ?Sized>(
    pointer: &mut P,
    slider: &E,
    value: i32,
    range: Range,
    orientation: Orientation,
) -> AutoconfResult<Point> {
    let point = click_point(
        value,
        range,
        &slider.bounds()?,
        slider.clickable_point()?,
        orientation,
    );
    tracing::debug!(slider = %slider.name(), value, x = point.x, y = point.y, "slider click");
    pointer.move_to(point)?;
    pointer.left_click()?;
    Ok(point)
}
