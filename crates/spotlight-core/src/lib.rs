//! Platform-free core of the spotlight page effects.
//!
//! Everything here is plain state and numerics: the particle field that runs
//! behind a focused section, the focus controller and scroll carousel that
//! decide which section is focused, and the one-shot reveal tracker. The
//! browser bindings in `spotlight-wasm` plug the DOM in through the
//! [`focus::Page`] and [`surface::Surface`] traits.

pub mod carousel;
pub mod config;
pub mod error;
pub mod field;
pub mod focus;
pub mod frame;
pub mod geometry;
pub mod particle;
pub mod reveal;
pub mod surface;

pub use carousel::{nearest_section, ScrollCarousel};
pub use config::{FieldConfig, FocusConfig, RevealConfig, SpotlightConfig};
pub use error::ConfigError;
pub use field::{link_opacity, ParticleField};
pub use focus::{ClickOutcome, Effect, FocusChange, FocusController, Page, SectionId};
pub use frame::{FrameGate, FrameHandle};
pub use geometry::{Bounds, Size};
pub use particle::Particle;
pub use reveal::{meets_threshold, RevealOutcome, RevealTracker};
pub use surface::{Rgba, Surface};
