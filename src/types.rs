//! Type definitions for the debug canvas
//!
//! Real-space points are integer engineering units (e.g. microns); canvas
//! points are output units of the SVG document.

use serde::{Deserialize, Serialize};

/// Integer point in real space (or a rounded canvas point)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// Real-valued point, used for sub-unit canvas placement
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round both coordinates half away from zero
    pub fn round(self) -> Point {
        Point::new(self.x.round() as i64, self.y.round() as i64)
    }
}

/// Axis-aligned bounding box in real space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point,
    pub max: Point,
}

impl Aabb {
    pub fn new(min: impl Into<Point>, max: impl Into<Point>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::new(*first, *first);
        for p in rest {
            aabb.include(*p);
        }
        Some(aabb)
    }

    /// Smallest box containing every vertex of every ring
    pub fn from_rings<R: AsRef<[Point]>>(rings: &[R]) -> Option<Self> {
        let mut result: Option<Self> = None;
        for ring in rings {
            if let Some(ring_box) = Self::from_points(ring.as_ref()) {
                match result.as_mut() {
                    Some(aabb) => {
                        aabb.include(ring_box.min);
                        aabb.include(ring_box.max);
                    }
                    None => result = Some(ring_box),
                }
            }
        }
        result
    }

    /// Grow the box so it contains `p`
    pub fn include(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Grow the box by `margin` real units on every side
    pub fn expand(&mut self, margin: i64) {
        self.min.x = self.min.x.saturating_sub(margin);
        self.min.y = self.min.y.saturating_sub(margin);
        self.max.x = self.max.x.saturating_add(margin);
        self.max.y = self.max.y.saturating_add(margin);
    }

    /// Extent along x, computed in floating point so extreme corners cannot overflow
    pub fn width(&self) -> f64 {
        self.max.x as f64 - self.min.x as f64
    }

    pub fn height(&self) -> f64 {
        self.max.y as f64 - self.min.y as f64
    }

    /// `min` does not exceed `max` on either axis
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

/// Canvas dimensions in output units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(1024, 1024)
    }
}
