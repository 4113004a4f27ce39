//! Axis-aligned boxes for players and obstacles
//!
//! Screen convention: y grows downwards, so `top < bottom`.

use crate::error::GeometryFault;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Box of the given size whose bottom edge is centred on `(center_x, bottom)`
    pub fn from_bottom_center(center_x: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self::new(center_x - width / 2.0, bottom - height, width, height)
    }

    /// Box of the given size centred horizontally on `center_x` with its top at `top`
    pub fn from_top_center(center_x: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(center_x - width / 2.0, top, width, height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Reject boxes that cannot take part in an overlap test
    pub fn check(&self) -> Result<(), GeometryFault> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(GeometryFault::NonFinite);
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(GeometryFault::NegativeSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Intersection area with another box, zero when they only touch
    pub fn intersection(&self, other: &Rect) -> f32 {
        let x1 = self.left().max(other.left());
        let y1 = self.top().max(other.top());
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 <= x1 || y2 <= y1 {
            return 0.0;
        }

        (x2 - x1) * (y2 - y1)
    }

    /// Strict overlap; boxes sharing only an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> Result<bool, GeometryFault> {
        self.check()?;
        other.check()?;
        Ok(self.intersection(other) > 0.0)
    }
}
