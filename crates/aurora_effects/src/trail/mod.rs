//! # Mouse Trail
//!
//! The one dynamic population. Pointer moves spawn particles into a
//! fixed slot pool; every frame ages, moves and draws the survivors onto a
//! 2D overlay in client pixels.
//!
//! ```text
//! InputRouter ──PointerSample──► feed ──► MouseTrailEmitter::tick ──► TrailCanvas
//! ```

mod canvas;
mod emitter;

pub use canvas::{DrawCommand, DrawList, TrailCanvas};
pub use emitter::{spawn_count, MouseTrailEmitter, TrailStats};

use aurora_core::Vec2;

/// Raw pointer position in client pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Client x.
    pub x: f32,
    /// Client y.
    pub y: f32,
}

impl PointerSample {
    /// Creates a sample.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Converts to a vector.
    #[must_use]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// One live trail particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailParticle {
    /// Position in client pixels.
    pub position: Vec2,
    /// Pixels per frame.
    pub velocity: Vec2,
    /// Remaining life, 1 at spawn.
    pub life: f32,
    /// Life span in seconds.
    pub max_life: f32,
    /// Blob radius at full life.
    pub size: f32,
    /// Hue in degrees.
    pub hue: f32,
}

impl TrailParticle {
    /// Ages the particle by one nominal frame and moves it.
    ///
    /// Returns `false` once life reaches zero.
    pub fn advance(&mut self, nominal_delta: f32, damping: f32) -> bool {
        self.life -= nominal_delta / self.max_life;
        self.position = self.position + self.velocity;
        self.velocity = self.velocity * damping;
        self.life > 0.0
    }
}
