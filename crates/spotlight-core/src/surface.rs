use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Size;

/// Straight RGBA colour; `a` is the opacity in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with its opacity scaled by `factor`.
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }
}

/// CSS `rgba(...)` form, as accepted by canvas `fillStyle`/`strokeStyle`.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Drawing commands the particle field issues once per frame.
pub trait Surface {
    /// Wipe the whole drawing area.
    fn clear(&mut self, size: Size);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, colour: Rgba);
    fn fill_circle(&mut self, centre: Vec2, radius: f32, colour: Rgba);
}
