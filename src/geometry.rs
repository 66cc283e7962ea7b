//! Real-space to canvas-space mapping
//!
//! One uniform scale factor for both axes, computed once from the bounding
//! region and the usable (border-inset) canvas. The mapped region is centered
//! on the axis that has slack.

use crate::types::{Aabb, CanvasSize, Point, PointF};

/// Affine mapping from real space into canvas space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    region: Aabb,
    canvas_size: CanvasSize,
    scale: f64,
    offset: PointF,
    flip_y: bool,
}

impl CoordinateTransform {
    /// Build the mapping. Inputs are assumed valid (the canvas validates them);
    /// a zero-extent axis is treated as extent 1 so the scale stays finite.
    pub fn new(region: Aabb, canvas_size: CanvasSize, border: u32, flip_y: bool) -> Self {
        let usable_w = canvas_size.width as f64 - 2.0 * border as f64;
        let usable_h = canvas_size.height as f64 - 2.0 * border as f64;
        let region_w = region.width();
        let region_h = region.height();

        let scale = (usable_w / region_w.max(1.0)).min(usable_h / region_h.max(1.0));

        let offset = PointF::new(
            border as f64 + (usable_w - region_w * scale) / 2.0,
            border as f64 + (usable_h - region_h * scale) / 2.0,
        );

        Self {
            region,
            canvas_size,
            scale,
            offset,
            flip_y,
        }
    }

    /// Scaling factor applied to convert real space to canvas space
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn region(&self) -> Aabb {
        self.region
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas_size
    }

    /// Transform a real-space point to the nearest canvas unit
    pub fn transform(&self, p: Point) -> Point {
        self.transform_f(p).round()
    }

    /// Transform a real-space point to canvas space without rounding
    pub fn transform_f(&self, p: Point) -> PointF {
        let x = (p.x as f64 - self.region.min.x as f64) * self.scale + self.offset.x;
        let y = (p.y as f64 - self.region.min.y as f64) * self.scale + self.offset.y;
        if self.flip_y {
            PointF::new(x, self.canvas_size.height as f64 - y)
        } else {
            PointF::new(x, y)
        }
    }
}
