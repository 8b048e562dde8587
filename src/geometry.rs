//! Arrow frame computation.

use crate::arrow::{ARROW_HEIGHT, ARROW_WIDTH};
use crate::placement::Placement;
use crate::rect::Rect;

/// Returns the arrow’s x origin for a desired center, keeping the arrow fully inside the
/// container.
///
/// The result is in `0..=container_width - arrow_width` as long as the arrow fits; for a container
/// narrower than the arrow it is negative.
pub fn clamped_arrow_origin_x(desired_center_x: f64, container_width: f64, arrow_width: f64) -> f64 {
    let half = arrow_width / 2.;
    if desired_center_x + half > container_width {
        container_width - arrow_width
    } else if desired_center_x - half < 0. {
        0.
    } else {
        desired_center_x - half
    }
}

/// Returns the arrow’s y origin for a placement.
///
/// A hidden arrow is placed just above the container. This keeps a hidden frame distinct from a
/// real frame at the top edge, so showing the arrow again always registers as a frame change.
pub fn arrow_origin_y(placement: Placement, container_height: f64, arrow_height: f64) -> f64 {
    match placement {
        Placement::Top => 0.,
        Placement::Bottom => container_height - arrow_height,
        Placement::Hidden => -arrow_height,
    }
}

/// The arrow frame in container bounds for a desired center x.
pub fn arrow_frame(container_bounds: Rect, desired_center_x: f64, placement: Placement) -> Rect {
    Rect::from_xywh(
        clamped_arrow_origin_x(desired_center_x, container_bounds.width(), ARROW_WIDTH),
        arrow_origin_y(placement, container_bounds.height(), ARROW_HEIGHT),
        ARROW_WIDTH,
        ARROW_HEIGHT,
    )
}
