use glam::Vec2;
use rand::Rng;

use crate::config::FieldConfig;
use crate::geometry::Size;
use crate::particle::Particle;
use crate::surface::Surface;

/// Opacity of the line joining a particle to the pointer.
///
/// Linear falloff: `1.0` at distance zero, approaching `0.0` at `threshold`.
/// Returns `None` at or beyond the threshold, where no line is drawn.
#[inline]
pub fn link_opacity(distance: f32, threshold: f32) -> Option<f32> {
    if distance < threshold {
        Some(1.0 - distance / threshold)
    } else {
        None
    }
}

/// Bouncing particles with pointer links, simulated in surface pixels.
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub config: FieldConfig,
    size: Size,
    pointer: Option<Vec2>,
}

impl ParticleField {
    /// Seed `config.particle_count` particles uniformly over `size`.
    pub fn new<R: Rng + ?Sized>(size: Size, config: FieldConfig, rng: &mut R) -> Self {
        let size = size.sanitized();
        let particles = (0..config.particle_count)
            .map(|_| Particle::spawn(size, &config, rng))
            .collect();
        Self::with_particles(size, config, particles)
    }

    /// Field with an explicit particle population.
    pub fn with_particles(size: Size, config: FieldConfig, particles: Vec<Particle>) -> Self {
        Self {
            particles,
            config,
            size: size.sanitized(),
            pointer: None,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Re-measure the surface. Particles keep their positions and bounce back
    /// in on their own if the surface shrank.
    pub fn resize(&mut self, size: Size) {
        self.size = size.sanitized();
    }

    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = Some(position);
    }

    /// Run one frame: clear, move, link to the pointer, draw.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear(self.size);

        let link_distance = self.config.link_distance;
        let attraction = self.config.attraction;
        let link_colour = self.config.link_colour;
        let particle_colour = self.config.particle_colour;

        for p in self.particles.iter_mut() {
            p.advance(self.size);

            if let Some(pointer) = self.pointer {
                let distance = p.position.distance(pointer);
                if let Some(opacity) = link_opacity(distance, link_distance) {
                    surface.stroke_line(p.position, pointer, link_colour.fade(opacity));
                    p.position = p.position.lerp(pointer, attraction);
                }
            }

            surface.fill_circle(p.position, p.radius, particle_colour);
        }
    }
}
