use serde::{Deserialize, Serialize};

/// A point in screen space (y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds of a body whose position is its center.
    pub fn from_center(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            x: center_x - width / 2.0,
            y: center_y - height / 2.0,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Circle given by center and radius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Strict AABB overlap: rectangles that only share an edge do not overlap.
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Strict circle overlap: tangent circles do not overlap.
pub fn circle_overlap(a: &Circle, b: &Circle) -> bool {
    distance(a.center(), b.center()) < a.radius + b.radius
}

/// Inclusive containment: a point on the boundary is inside.
pub fn point_in_rect(p: Point, r: &Rect) -> bool {
    p.x >= r.x && p.x <= r.right() && p.y >= r.y && p.y <= r.bottom()
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Slab-method intersection of the segment `start -> end` with `rect`.
///
/// Returns the entry point, or `None` when the segment misses the rectangle
/// or enters it only beyond `end`. An axis-aligned segment divides by zero
/// and the resulting infinities flow through the slab bounds unchanged.
/// A `0/0` (segment lying on an edge line) yields NaN, which `f32::min` and
/// `f32::max` skip; for rectangles with positive extents this still reports
/// a miss.
pub fn ray_rect_intersection(start: Point, end: Point, rect: &Rect) -> Option<Point> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;

    let t1 = (rect.x - start.x) / dx;
    let t2 = (rect.right() - start.x) / dx;
    let t3 = (rect.y - start.y) / dy;
    let t4 = (rect.bottom() - start.y) / dy;

    let tmin = t1.min(t2).max(t3.min(t4));
    let tmax = t1.max(t2).min(t3.max(t4));

    if tmax >= 0.0 && tmin <= tmax && tmin >= 0.0 && tmin <= 1.0 {
        Some(Point::new(start.x + tmin * dx, start.y + tmin * dy))
    } else {
        None
    }
}
