use glam::Vec2;
use rand::Rng;

use crate::config::FieldConfig;
use crate::geometry::Size;

/// One point of the background field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// Random particle inside `bounds`, using the velocity and radius ranges
    /// from `config`. A zero-sized surface puts every particle at the origin.
    pub fn spawn<R: Rng + ?Sized>(bounds: Size, config: &FieldConfig, rng: &mut R) -> Self {
        let position = Vec2::new(
            uniform(rng, 0.0, bounds.width),
            uniform(rng, 0.0, bounds.height),
        );
        let velocity = Vec2::new(
            uniform(rng, -config.max_speed, config.max_speed),
            uniform(rng, -config.max_speed, config.max_speed),
        );
        let radius = uniform(rng, config.radius_min, config.radius_max);
        Self::new(position, velocity, radius)
    }

    /// Advance by one frame of velocity, then reflect the velocity on every
    /// axis that is now outside `bounds`. Position is not clamped, so a
    /// particle may sit past the edge for a frame.
    pub fn advance(&mut self, bounds: Size) {
        self.position += self.velocity;
        if self.position.x < 0.0 || self.position.x > bounds.width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > bounds.height {
            self.velocity.y = -self.velocity.y;
        }
    }
}

// `gen_range` panics on an empty range, which a zero-sized surface produces.
fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}
