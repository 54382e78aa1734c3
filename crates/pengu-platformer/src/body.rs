use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Kinematic body written by the external physics step.
///
/// `(x, y)` is the center of the body. `touching_down` is the physics
/// step's ground-contact verdict; gameplay code reads it and never sets it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub touching_down: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            velocity_x: 0.0,
            velocity_y: 0.0,
            touching_down: false,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bounds used for overlap tests, derived from center and half extents.
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.x, self.y, self.width, self.height)
    }
}
