use serde::{Deserialize, Serialize};

use crate::units::centered_span;

/// A 2D point in grid units (database units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle defined by lower-left and upper-right corners.
///
/// Always normalized: `min.x <= max.x` and `min.y <= max.y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self {
            min: Point::new(x1.min(x2), y1.min(y2)),
            max: Point::new(x1.max(x2), y1.max(y2)),
        }
    }

    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// A `width` x `height` rectangle centered on `center`.
    ///
    /// Odd sizes put the extra unit on the high side, so the size is exact.
    pub fn centered_at(center: Point, width: i64, height: i64) -> Self {
        let (x1, x2) = centered_span(center.x, width);
        let (y1, y2) = centered_span(center.y, height);
        Self::new(x1, y1, x2, y2)
    }

    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self::from_corners(*first, *first);
        for p in &points[1..] {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> i64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i64 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Center of the rectangle, rounded toward negative infinity on odd spans.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x).div_euclid(2),
            (self.min.y + self.max.y).div_euclid(2),
        )
    }

    /// Overlap with positive area, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min_x = self.min.x.max(other.min.x);
        let min_y = self.min.y.max(other.min.y);
        let max_x = self.max.x.min(other.max.x);
        let max_y = self.max.y.min(other.max.y);
        if min_x < max_x && min_y < max_y {
            Some(Rect::new(min_x, min_y, max_x, max_y))
        } else {
            None
        }
    }

    /// True when the two rectangles overlap or share a boundary segment of
    /// positive length. Touching at a single corner does not count.
    pub fn connects(&self, other: &Rect) -> bool {
        let ox = self.max.x.min(other.max.x) - self.min.x.max(other.min.x);
        let oy = self.max.y.min(other.max.y) - self.min.y.max(other.min.y);
        ox >= 0 && oy >= 0 && (ox > 0 || oy > 0)
    }

    pub fn union(&self, other: &Rect) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Corners in counter-clockwise order starting at the lower-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }
}

/// A closed polygon defined by a list of vertices. The closing edge from the
/// last vertex back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn bbox(&self) -> Option<Rect> {
        Rect::from_points(&self.vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Boundary edges, skipping zero-length ones.
    pub fn edges(&self) -> Vec<Edge> {
        let n = self.vertices.len();
        if n < 2 {
            return Vec::new();
        }
        (0..n)
            .map(|i| Edge::new(self.vertices[i], self.vertices[(i + 1) % n]))
            .filter(|e| !e.is_degenerate())
            .collect()
    }

    /// True when every edge is axis-parallel.
    pub fn is_rectilinear(&self) -> bool {
        self.edges().iter().all(Edge::is_axis_aligned)
    }

    /// Enclosed area (shoelace formula), always non-negative.
    pub fn area(&self) -> i64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0;
        }
        let twice: i64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() / 2
    }
}

/// A directed boundary segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    pub fn is_axis_aligned(&self) -> bool {
        self.is_horizontal() || self.is_vertical()
    }

    pub fn length(&self) -> f64 {
        let dx = (self.end.x - self.start.x) as f64;
        let dy = (self.end.y - self.start.y) as f64;
        dx.hypot(dy)
    }
}

/// A piece of geometry stored on a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Rect(Rect),
    Polygon(Polygon),
}

impl Shape {
    pub fn bbox(&self) -> Option<Rect> {
        match self {
            Shape::Rect(r) => Some(*r),
            Shape::Polygon(p) => p.bbox(),
        }
    }

    pub fn area(&self) -> i64 {
        match self {
            Shape::Rect(r) => r.area(),
            Shape::Polygon(p) => p.area(),
        }
    }

    /// Boundary edges of the shape.
    pub fn edges(&self) -> Vec<Edge> {
        match self {
            Shape::Rect(r) => Polygon::new(r.corners().to_vec()).edges(),
            Shape::Polygon(p) => p.edges(),
        }
    }
}

impl From<Rect> for Shape {
    fn from(rect: Rect) -> Self {
        Shape::Rect(rect)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_normalizes_corners() {
        let r = Rect::new(10, 5, 0, 0);
        assert_eq!(r.min, Point::new(0, 0));
        assert_eq!(r.max, Point::new(10, 5));
        assert_eq!(r.area(), 50);
    }

    #[test]
    fn test_center_floors_odd_spans() {
        assert_eq!(Rect::new(0, 0, 5, 5).center(), Point::new(2, 2));
        assert_eq!(Rect::new(-5, -5, 0, 0).center(), Point::new(-3, -3));
        assert_eq!(Rect::new(-4, 2, 4, 6).center(), Point::new(0, 4));
    }

    #[test]
    fn test_centered_at_keeps_exact_size() {
        let even = Rect::centered_at(Point::new(100, 100), 8, 8);
        assert_eq!(even, Rect::new(96, 96, 104, 104));
        let odd = Rect::centered_at(Point::new(0, 0), 5, 3);
        assert_eq!(odd, Rect::new(-2, -1, 3, 2));
        assert_eq!(odd.width(), 5);
        assert_eq!(odd.height(), 3);
    }

    #[test]
    fn test_intersection_requires_positive_area() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersection(&Rect::new(5, 5, 15, 15)), Some(Rect::new(5, 5, 10, 10)));
        assert_eq!(a.intersection(&Rect::new(10, 0, 20, 10)), None);
        assert_eq!(a.intersection(&Rect::new(20, 20, 30, 30)), None);
    }

    #[test]
    fn test_connects_ignores_corner_contact() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.connects(&Rect::new(10, 2, 20, 8)));
        assert!(a.connects(&Rect::new(5, 5, 15, 15)));
        assert!(!a.connects(&Rect::new(10, 10, 20, 20)));
        assert!(!a.connects(&Rect::new(11, 0, 20, 10)));
    }

    #[test]
    fn test_polygon_edges_and_area() {
        let l_shape = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(20, 0),
            Point::new(20, 10),
            Point::new(10, 10),
            Point::new(10, 20),
            Point::new(0, 20),
        ]);
        assert_eq!(l_shape.edges().len(), 6);
        assert!(l_shape.is_rectilinear());
        assert_eq!(l_shape.area(), 300);
        assert_eq!(l_shape.bbox(), Some(Rect::new(0, 0, 20, 20)));
    }

    #[test]
    fn test_polygon_skips_repeated_vertices() {
        let tri = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(0, 10),
        ]);
        assert_eq!(tri.edges().len(), 3);
        assert!(!tri.is_rectilinear());
    }

    #[test]
    fn test_rect_shape_has_four_edges() {
        let shape = Shape::from(Rect::new(0, 0, 4, 2));
        let edges = shape.edges();
        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(Edge::is_axis_aligned));
        assert_eq!(shape.area(), 8);
    }
}
