//! Arrow placement.

use cgmath::Point2;

/// Which edge of the callout the arrow sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// On the top edge, pointing up.
    Top,
    /// On the bottom edge, pointing down.
    Bottom,
    /// Not shown; no space is reserved.
    Hidden,
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Hidden
    }
}

impl Placement {
    pub fn is_visible(self) -> bool {
        self != Placement::Hidden
    }
}

/// Picks the edge facing a target view.
///
/// Both centers must be in the same (root) coordinate space and come from up-to-date layout. Only
/// vertical center positions are compared, so a large target that overlaps the callout may get
/// an arrow on an edge that does not strictly face it.
///
/// Never returns [`Placement::Hidden`].
pub fn resolve_placement(callout_center: Point2<f64>, target_center: Point2<f64>) -> Placement {
    if callout_center.y < target_center.y {
        Placement::Bottom
    } else {
        Placement::Top
    }
}

#[test]
fn test_resolve_placement() {
    let callout = Point2::new(100., 100.);
    assert_eq!(resolve_placement(callout, Point2::new(0., 150.)), Placement::Bottom);
    assert_eq!(resolve_placement(callout, Point2::new(300., 50.)), Placement::Top);
    // same height counts as above
    assert_eq!(resolve_placement(callout, Point2::new(100., 100.)), Placement::Top);
    assert!(Placement::Top.is_visible() && Placement::Bottom.is_visible());
    assert!(!Placement::Hidden.is_visible());
}
