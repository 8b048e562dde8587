//! Rectangles and edge insets.

use cgmath::{EuclideanSpace, Point2, Vector2, Zero};
use serde::Deserialize;

/// A rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin.
    pub origin: Point2<f64>,

    /// Rectangle size.
    pub size: Vector2<f64>,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Point2<f64>, size: Vector2<f64>) -> Rect {
        Rect { origin, size }
    }

    /// Creates a new rectangle from its components.
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            origin: Point2::new(x, y),
            size: Vector2::new(width, height),
        }
    }

    /// Returns a zero-sized rectangle at the origin.
    pub fn zero() -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size: Vector2::zero(),
        }
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    /// Returns the center point.
    pub fn center(&self) -> Point2<f64> {
        self.origin + self.size / 2.
    }

    /// Returns this rectangle moved to the origin; i.e. the bounds of a view with this frame.
    pub fn bounds(&self) -> Rect {
        self.with_origin(Point2::origin())
    }

    /// Returns a new rectangle shrunk by the given insets.
    ///
    /// Insets larger than the rectangle produce a negative size; this is not clamped.
    pub fn inset_by(&self, insets: EdgeInsets) -> Rect {
        Rect {
            origin: (self.origin.x + insets.left, self.origin.y + insets.top).into(),
            size: (
                self.size.x - insets.left - insets.right,
                self.size.y - insets.top - insets.bottom,
            )
                .into(),
        }
    }

    /// Returns a new rectangle with the given origin.
    pub fn with_origin(&self, origin: Point2<f64>) -> Rect {
        Rect {
            origin,
            size: self.size,
        }
    }

    /// Linearly interpolates between two rectangles.
    pub fn lerp(&self, to: Rect, t: f64) -> Rect {
        Rect {
            origin: self.origin + (to.origin - self.origin) * t,
            size: self.size + (to.size - self.size) * t,
        }
    }
}

/// Insets for each edge of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> EdgeInsets {
        EdgeInsets {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same inset on all four edges.
    pub fn uniform(inset: f64) -> EdgeInsets {
        EdgeInsets::new(inset, inset, inset, inset)
    }

    /// Insets on the top and bottom edges only.
    pub fn vertical(top: f64, bottom: f64) -> EdgeInsets {
        EdgeInsets::new(top, 0., bottom, 0.)
    }

    /// Total horizontal and vertical inset.
    pub fn total(&self) -> Vector2<f64> {
        Vector2::new(self.left + self.right, self.top + self.bottom)
    }
}

#[test]
fn test_rect_inset_and_center() {
    let rect = Rect::from_xywh(10., 20., 100., 50.);
    let inset = rect.inset_by(EdgeInsets::new(8., 4., 0., 6.));
    assert_eq!(inset, Rect::from_xywh(14., 28., 90., 42.));
    assert_eq!(rect.center(), Point2::new(60., 45.));
    assert_eq!(rect.bounds(), Rect::from_xywh(0., 0., 100., 50.));
}

#[test]
fn test_rect_lerp() {
    let a = Rect::from_xywh(0., -8., 34., 8.);
    let b = Rect::from_xywh(20., 52., 34., 8.);
    assert_eq!(a.lerp(b, 0.), a);
    assert_eq!(a.lerp(b, 1.), b);
    assert_eq!(a.lerp(b, 0.5), Rect::from_xywh(10., 22., 34., 8.));
}
