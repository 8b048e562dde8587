//! The arrow glyph.
//!
//! The glyph is a fixed shape drawn pointing downwards; it is flipped vertically when it sits on
//! the top edge of a callout. Its size and path are constants and must be changed together.

use crate::placement::Placement;
use cgmath::{Matrix3, Point2, SquareMatrix, Vector2, Vector3};

/// Width of the arrow glyph.
pub const ARROW_WIDTH: f64 = 34.;

/// Height of the arrow glyph; also the padding reserved on the edge the arrow sits on.
pub const ARROW_HEIGHT: f64 = 8.;

/// Default duration of arrow and padding animations, in seconds.
pub const ANIMATION_DURATION: f64 = 0.15;

/// Size of the arrow glyph.
pub fn arrow_size() -> Vector2<f64> {
    Vector2::new(ARROW_WIDTH, ARROW_HEIGHT)
}

/// A path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo(Point2<f64>),
    LineTo(Point2<f64>),
    /// Cubic bézier curve: `(to, control1, control2)`.
    CurveTo(Point2<f64>, Point2<f64>, Point2<f64>),
    Close,
}

/// A vector path used to mask the arrow glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowPath {
    elements: Vec<PathElement>,
}

impl ArrowPath {
    /// The downward-pointing chevron, with rounded shoulders and tip.
    pub fn chevron() -> ArrowPath {
        fn p(x: f64, y: f64) -> Point2<f64> {
            Point2::new(x, y)
        }

        ArrowPath {
            elements: vec![
                PathElement::MoveTo(p(0., 0.)),
                PathElement::CurveTo(p(9., 3.), p(0., 0.), p(5., 0.)),
                PathElement::CurveTo(p(16., 8.), p(13., 6.), p(13., 8.)),
                PathElement::CurveTo(p(23., 3.), p(19., 8.), p(19., 6.)),
                PathElement::CurveTo(p(32., 0.), p(27., 0.), p(32., 0.)),
                PathElement::LineTo(p(0., 0.)),
                PathElement::Close,
            ],
        }
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Bounding box of all points, including control points, as `(min, max)`.
    ///
    /// Bézier curves never leave the hull of their control points, so the shape is inside this box.
    pub fn control_bounds(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let mut points = self.elements.iter().flat_map(|element| match *element {
            PathElement::MoveTo(a) | PathElement::LineTo(a) => vec![a],
            PathElement::CurveTo(a, b, c) => vec![a, b, c],
            PathElement::Close => Vec::new(),
        });

        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), point| {
            (
                Point2::new(min.x.min(point.x), min.y.min(point.y)),
                Point2::new(max.x.max(point.x), max.y.max(point.y)),
            )
        }))
    }
}

/// The glyph transform for a placement.
///
/// The path points downwards, so it needs a vertical flip on the top edge.
pub fn arrow_transform(placement: Placement) -> Matrix3<f64> {
    let scale_y = match placement {
        Placement::Top => -1.,
        Placement::Bottom | Placement::Hidden => 1.,
    };
    Matrix3::from_diagonal(Vector3::new(1., scale_y, 1.))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chevron_fits_glyph() {
        let chevron = ArrowPath::chevron();
        assert_eq!(chevron.elements().first(), Some(&PathElement::MoveTo(Point2::new(0., 0.))));
        assert_eq!(chevron.elements().last(), Some(&PathElement::Close));

        let (min, max) = chevron.control_bounds().unwrap();
        assert!(min.x >= 0. && min.y >= 0.);
        assert!(max.x <= ARROW_WIDTH && max.y <= ARROW_HEIGHT);
        // the tip touches the bottom edge
        assert_eq!(max.y, ARROW_HEIGHT);
    }

    #[test]
    fn only_top_placement_flips() {
        assert_eq!(arrow_transform(Placement::Top).y.y, -1.);
        assert_eq!(arrow_transform(Placement::Bottom), Matrix3::identity());
        assert_eq!(arrow_transform(Placement::Hidden), Matrix3::identity());
    }
}
