//! Plain geometry types shared by layouts, screens and the window provider.
//!
//! Coordinates follow the top-left-origin convention: `origin` is the top-left
//! corner and `y` grows downwards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Point { Point { x, y } }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Size { Size { width, height } }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(origin: Point, size: Size) -> Rect { Rect { origin, size } }

    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    pub fn min_x(&self) -> f64 { self.origin.x }

    pub fn min_y(&self) -> f64 { self.origin.y }

    pub fn max_x(&self) -> f64 { self.origin.x + self.size.width }

    pub fn max_y(&self) -> f64 { self.origin.y + self.size.height }

    pub fn mid(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Returns a rect of `size` centered on this rect. The size is clamped so
    /// the result never exceeds the bounds of `self`.
    pub fn centered(&self, size: Size) -> Rect {
        let width = size.width.min(self.size.width).max(0.0);
        let height = size.height.min(self.size.height).max(0.0);
        let mid = self.mid();
        Rect::from_xywh(mid.x - width / 2.0, mid.y - height / 2.0, width, height)
    }
}

pub trait Round {
    fn round(&self) -> Self;
}

impl Round for Rect {
    fn round(&self) -> Self {
        // Round edges rather than origin and size independently so that
        // adjacent rects keep sharing an edge.
        let min_x = self.min_x().round();
        let min_y = self.min_y().round();
        let max_x = self.max_x().round();
        let max_y = self.max_y().round();
        Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}
