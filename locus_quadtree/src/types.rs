// Copyright 2025 the Locus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types: labeled points and half-open rectangles.

use alloc::string::String;
use core::fmt;

use crate::error::QuadtreeError;

/// A 2D point with an optional label.
///
/// Points are immutable once created. Two points compare equal when their
/// coordinates and labels match exactly; coincident points are allowed.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
    label: Option<String>,
}

impl Point {
    /// Create an unlabeled point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, label: None }
    }

    /// Create a point carrying a label, e.g. the id of the entity it locates.
    pub fn labeled(x: f64, y: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            label: Some(label.into()),
        }
    }

    /// The x coordinate.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// The y coordinate.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// The label, if any.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The coordinates as a [`kurbo::Point`].
    #[inline]
    pub const fn to_kurbo(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }

    /// Squared Euclidean distance to another point.
    #[inline]
    pub fn distance_sq(&self, other: &Self) -> f64 {
        self.to_kurbo().distance_squared(other.to_kurbo())
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "Point({:.2}, {:.2}, {label})", self.x, self.y),
            None => write!(f, "Point({:.2}, {:.2})", self.x, self.y),
        }
    }
}

/// Axis-aligned rectangle covering the half-open region
/// `[x, x + width) × [y, y + height)`.
///
/// Width and height are always positive and finite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rectangle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rectangle {
    /// Create a rectangle from its origin and size.
    ///
    /// # Errors
    ///
    /// Returns [`QuadtreeError::NonFiniteOrigin`] if either origin coordinate is
    /// NaN or infinite, and [`QuadtreeError::InvalidSize`] unless both `width`
    /// and `height` are positive and finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use locus_quadtree::{QuadtreeError, Rectangle};
    ///
    /// assert!(Rectangle::new(0.0, 0.0, 1000.0, 1000.0).is_ok());
    /// assert_eq!(
    ///     Rectangle::new(0.0, 0.0, 0.0, 10.0),
    ///     Err(QuadtreeError::InvalidSize { width: 0.0, height: 10.0 }),
    /// );
    /// ```
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, QuadtreeError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(QuadtreeError::NonFiniteOrigin { x, y });
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(width) || !positive(height) {
            return Err(QuadtreeError::InvalidSize { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Left edge.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Top edge.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Extent along x.
    #[inline]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Extent along y.
    #[inline]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Whether the point lies in the half-open region.
    #[inline]
    pub fn contains(&self, p: &Point) -> bool {
        self.x <= p.x && p.x < self.x + self.width && self.y <= p.y && p.y < self.y + self.height
    }

    /// Squared distance from `p` to the closest point of the rectangle, or 0 if
    /// `p` is inside.
    ///
    /// This never overestimates the distance to anything stored inside the
    /// rectangle, so it is safe to prune with.
    #[inline]
    pub fn distance_sq_to_point(&self, p: &Point) -> f64 {
        let dx = f64::max(0.0, f64::max(self.x - p.x, p.x - (self.x + self.width)));
        let dy = f64::max(0.0, f64::max(self.y - p.y, p.y - (self.y + self.height)));
        dx * dx + dy * dy
    }

    /// Where the vertical and horizontal split lines cross.
    ///
    /// These are exactly the origins of the eastern and southern quadrants.
    #[inline]
    pub(crate) fn split(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether halving this rectangle still leaves quadrants with positive size.
    #[inline]
    pub(crate) fn can_split(&self) -> bool {
        self.width / 2.0 > 0.0 && self.height / 2.0 > 0.0
    }

    /// The four quadrants in NW, NE, SW, SE order.
    ///
    /// Each has half the width and height; together they cover `self` without
    /// overlap under half-open semantics.
    pub fn quadrants(&self) -> [Self; 4] {
        let w = self.width / 2.0;
        let h = self.height / 2.0;
        let (mx, my) = self.split();
        let q = |x, y| Self {
            x,
            y,
            width: w,
            height: h,
        };
        [q(self.x, self.y), q(mx, self.y), q(self.x, my), q(mx, my)]
    }

    /// The rectangle as a [`kurbo::Rect`].
    #[inline]
    pub fn to_kurbo(&self) -> kurbo::Rect {
        kurbo::Rect::from_origin_size((self.x, self.y), (self.width, self.height))
    }
}

impl TryFrom<kurbo::Rect> for Rectangle {
    type Error = QuadtreeError;

    fn try_from(r: kurbo::Rect) -> Result<Self, Self::Error> {
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rectangle};
    use crate::error::QuadtreeError;
    use alloc::string::ToString;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
        Rectangle::new(x, y, w, h).unwrap()
    }

    #[test]
    fn contains_is_half_open() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(&Point::new(0.0, 0.0)));
        assert!(r.contains(&Point::new(9.999, 9.999)));
        assert!(!r.contains(&Point::new(10.0, 5.0)));
        assert!(!r.contains(&Point::new(5.0, 10.0)));
        assert!(!r.contains(&Point::new(-0.001, 5.0)));
    }

    #[test]
    fn distance_is_zero_inside_and_squared_outside() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r.distance_sq_to_point(&Point::new(5.0, 5.0)), 0.0);
        // Straight out of one side.
        assert_eq!(r.distance_sq_to_point(&Point::new(13.0, 5.0)), 9.0);
        assert_eq!(r.distance_sq_to_point(&Point::new(5.0, -2.0)), 4.0);
        // Off a corner.
        assert_eq!(r.distance_sq_to_point(&Point::new(13.0, 14.0)), 25.0);
        assert_eq!(r.distance_sq_to_point(&Point::new(-3.0, -4.0)), 25.0);
    }

    #[test]
    fn quadrants_partition_the_parent() {
        let r = rect(10.0, 20.0, 8.0, 4.0);
        let [nw, ne, sw, se] = r.quadrants();
        assert_eq!(nw, rect(10.0, 20.0, 4.0, 2.0));
        assert_eq!(ne, rect(14.0, 20.0, 4.0, 2.0));
        assert_eq!(sw, rect(10.0, 22.0, 4.0, 2.0));
        assert_eq!(se, rect(14.0, 22.0, 4.0, 2.0));

        // Every probe lands in exactly one quadrant, including the split lines.
        for &(x, y) in &[(10.0, 20.0), (14.0, 21.0), (12.0, 22.0), (14.0, 22.0), (17.9, 23.9)] {
            let p = Point::new(x, y);
            let hits = r.quadrants().iter().filter(|q| q.contains(&p)).count();
            assert_eq!(hits, 1, "({x}, {y}) should be in exactly one quadrant");
        }
    }

    #[test]
    fn rejects_degenerate_rectangles() {
        assert_eq!(
            Rectangle::new(0.0, 0.0, -1.0, 5.0),
            Err(QuadtreeError::InvalidSize {
                width: -1.0,
                height: 5.0
            })
        );
        assert!(matches!(
            Rectangle::new(0.0, 0.0, 5.0, f64::NAN),
            Err(QuadtreeError::InvalidSize { .. })
        ));
        assert!(matches!(
            Rectangle::new(f64::INFINITY, 0.0, 5.0, 5.0),
            Err(QuadtreeError::NonFiniteOrigin { .. })
        ));
    }

    #[test]
    fn kurbo_round_trip() {
        let r = rect(1.0, 2.0, 3.0, 4.0);
        let k = r.to_kurbo();
        assert_eq!(k, kurbo::Rect::new(1.0, 2.0, 4.0, 6.0));
        assert_eq!(Rectangle::try_from(k), Ok(r));
        assert!(Rectangle::try_from(kurbo::Rect::new(5.0, 5.0, 5.0, 9.0)).is_err());

        let p = Point::from(kurbo::Point::new(3.0, 4.0));
        assert_eq!(p, Point::new(3.0, 4.0));
        assert_eq!(p.distance_sq(&Point::new(0.0, 0.0)), 25.0);
    }

    #[test]
    fn display_matches_label_presence() {
        assert_eq!(
            Point::labeled(1.0, 2.5, "Driver-7").to_string(),
            "Point(1.00, 2.50, Driver-7)"
        );
        assert_eq!(Point::new(1.0, 2.5).to_string(), "Point(1.00, 2.50)");
    }
}
