// src/geometry.rs

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point at `distance` from `self` along the direction to `toward`.
    /// Returns `self` when the two points coincide.
    pub fn toward(&self, toward: &Point2, distance: f64) -> Point2 {
        let length = self.distance_to(toward);
        if length <= f64::EPSILON {
            return *self;
        }
        let t = distance / length;
        Point2::new(self.x + (toward.x - self.x) * t, self.y + (toward.y - self.y) * t)
    }

    pub fn scaled(&self, factor: f64) -> Point2 {
        Point2::new(self.x * factor, self.y * factor)
    }

    pub fn to_vec2(self) -> glam::Vec2 {
        glam::Vec2::new(self.x as f32, self.y as f32)
    }
}

/// Integer bounding region in canvas units.
///
/// `min_x < max_x` and `min_y < max_y` are expected but never enforced:
/// inverted or empty regions produce degenerate shapes instead of errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Region {
    pub const fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self { min_x, max_x, min_y, max_y }
    }

    pub fn min_x(&self) -> f64 {
        self.min_x as f64
    }

    pub fn max_x(&self) -> f64 {
        self.max_x as f64
    }

    pub fn min_y(&self) -> f64 {
        self.min_y as f64
    }

    pub fn max_y(&self) -> f64 {
        self.max_y as f64
    }

    /// Clamps each coordinate into the region. Never panics on an inverted
    /// region; the lower bound wins in that case.
    pub fn clamp(&self, p: Point2) -> Point2 {
        Point2::new(
            clamp_lenient(p.x, self.min_x(), self.max_x()),
            clamp_lenient(p.y, self.min_y(), self.max_y()),
        )
    }

    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// The region's rectangle with every coordinate multiplied by `scale`,
    /// as `(origin, width, height)`.
    pub fn scaled_rect(&self, scale: f64) -> (Point2, f64, f64) {
        let origin = Point2::new(self.min_x() * scale, self.min_y() * scale);
        let width = self.max_x() * scale - origin.x;
        let height = self.max_y() * scale - origin.y;
        (origin, width, height)
    }
}

/// `max(lo, min(hi, v))`. Unlike `f64::clamp` this accepts `lo > hi`.
pub fn clamp_lenient(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}

/// A single sub-path of straight segments, optionally closed.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Path {
    points: Vec<Point2>,
    closed: bool,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { points: Vec::with_capacity(capacity), closed: false }
    }

    pub fn move_to(&mut self, p: Point2) -> &mut Self {
        self.points.clear();
        self.closed = false;
        self.points.push(p);
        self
    }

    pub fn line_to(&mut self, p: Point2) -> &mut Self {
        self.points.push(p);
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.closed = true;
        self
    }

    pub fn segment(a: Point2, b: Point2) -> Self {
        Self { points: vec![a, b], closed: false }
    }

    pub fn polygon(points: &[Point2]) -> Self {
        Self { points: points.to_vec(), closed: true }
    }

    pub fn rect(origin: Point2, width: f64, height: f64) -> Self {
        Self::polygon(&[
            origin,
            Point2::new(origin.x + width, origin.y),
            Point2::new(origin.x + width, origin.y + height),
            Point2::new(origin.x, origin.y + height),
        ])
    }

    /// Ellipse inscribed in the box at `origin` of size `width`×`height`,
    /// approximated by `segments` straight edges.
    pub fn ellipse(origin: Point2, width: f64, height: f64, segments: usize) -> Self {
        let segments = segments.max(3);
        let rx = width / 2.0;
        let ry = height / 2.0;
        let cx = origin.x + rx;
        let cy = origin.y + ry;
        let points = (0..segments)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / segments as f64;
                Point2::new(cx + rx * angle.cos(), cy + ry * angle.sin())
            })
            .collect();
        Self { points, closed: true }
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of straight segments a stroke of this path draws.
    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            2 => 1,
            n if self.closed => n,
            n => n - 1,
        }
    }
}
