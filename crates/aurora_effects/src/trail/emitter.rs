//! Pointer-driven trail emitter.

use aurora_core::{streams, ParamSampler, Rgba, SlotPool, TrailConfig, Vec2};
use crossbeam_channel::Receiver;

use super::{PointerSample, TrailCanvas, TrailParticle};

/// Cursor glow color at the center (`#00d4ff` at 8%).
const GLOW_INNER: Rgba = Rgba::new(0.0, 212.0 / 255.0, 1.0, 0.08);
/// Cursor glow color at the edge.
const GLOW_OUTER: Rgba = Rgba::new(0.0, 212.0 / 255.0, 1.0, 0.0);

/// Particles to spawn for a pointer move of `speed` pixels.
///
/// `min(floor(speed * spawn_per_speed), max_spawn_per_event)`, never
/// negative. Non-finite speeds spawn nothing.
#[must_use]
pub fn spawn_count(speed: f32, config: &TrailConfig) -> u32 {
    let raw = (speed * config.spawn_per_speed).floor();
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    // Float to int casts saturate
    (raw as u32).min(config.max_spawn_per_event)
}

/// Lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrailStats {
    /// Particles placed in the pool.
    pub spawned: u64,
    /// Spawns dropped because the pool was full.
    pub dropped: u64,
    /// Particles removed after their life ran out.
    pub expired: u64,
}

/// Dynamic trail population behind the pointer.
///
/// Spawning happens on pointer moves, either pushed directly through
/// [`MouseTrailEmitter::on_pointer_move`] or drained from a feed channel
/// at the start of [`MouseTrailEmitter::tick`].
#[derive(Debug)]
pub struct MouseTrailEmitter {
    config: TrailConfig,
    particles: SlotPool<TrailParticle>,
    sampler: ParamSampler,
    feed: Option<Receiver<PointerSample>>,
    last_pointer: Option<Vec2>,
    stats: TrailStats,
}

impl MouseTrailEmitter {
    /// Creates an emitter with a pool of `config.capacity` particles.
    #[must_use]
    pub fn new(config: &TrailConfig, seed: u64) -> Self {
        Self {
            config: config.clone(),
            particles: SlotPool::with_capacity(config.capacity),
            sampler: ParamSampler::new(seed, streams::TRAIL),
            feed: None,
            last_pointer: None,
            stats: TrailStats::default(),
        }
    }

    /// Drains pointer samples from `feed` on every tick.
    #[must_use]
    pub fn with_feed(mut self, feed: Receiver<PointerSample>) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Live particle count.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    /// Pool capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.particles.capacity()
    }

    /// Lifetime counters.
    #[must_use]
    pub const fn stats(&self) -> TrailStats {
        self.stats
    }

    /// Last pointer position seen, in client pixels.
    #[must_use]
    pub const fn pointer(&self) -> Option<Vec2> {
        self.last_pointer
    }

    /// Iterates live particles.
    pub fn particles(&self) -> impl Iterator<Item = &TrailParticle> {
        self.particles.iter()
    }

    /// Handles one pointer move in client pixels. Returns particles spawned.
    ///
    /// Speed is the distance from the previous sample; the first sample has
    /// no predecessor and spawns nothing.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> u32 {
        if !x.is_finite() || !y.is_finite() {
            return 0;
        }
        let pointer = Vec2::new(x, y);
        let speed = self
            .last_pointer
            .map_or(0.0, |previous| (pointer - previous).length());
        self.last_pointer = Some(pointer);

        let count = spawn_count(speed, &self.config);
        let mut placed = 0;
        for _ in 0..count {
            let particle = self.sample_particle(pointer);
            if self.particles.insert(particle).is_some() {
                placed += 1;
            } else {
                self.stats.dropped += 1;
            }
        }
        self.stats.spawned += u64::from(placed);

        if placed < count {
            tracing::debug!(
                "Trail pool full ({}), dropped {} spawns",
                self.particles.capacity(),
                count - placed
            );
        }
        placed
    }

    fn sample_particle(&mut self, pointer: Vec2) -> TrailParticle {
        let s = &mut self.sampler;
        TrailParticle {
            position: Vec2::new(pointer.x + s.centered(8.0), pointer.y + s.centered(8.0)),
            velocity: Vec2::new(s.centered(1.5), s.centered(1.5)),
            life: 1.0,
            max_life: s.range(0.6, 1.2),
            size: s.range(1.5, 4.0),
            hue: s.range(180.0, 270.0),
        }
    }

    /// Runs one frame: drain pending samples, age and draw every particle,
    /// then draw the cursor glow.
    pub fn tick(&mut self, canvas: &mut dyn TrailCanvas) {
        if let Some(feed) = self.feed.take() {
            while let Ok(sample) = feed.try_recv() {
                self.on_pointer_move(sample.x, sample.y);
            }
            self.feed = Some(feed);
        }

        canvas.clear();

        let delta = self.config.nominal_frame_delta;
        let damping = self.config.damping;
        let expired = self.particles.retain_mut(|p| {
            if !p.advance(delta, damping) {
                return false;
            }
            let alpha = p.life * 0.6;
            canvas.radial_blob(
                p.position,
                p.size * p.life,
                Rgba::from_hsla(p.hue, 1.0, 0.7, alpha),
                Rgba::from_hsla(p.hue, 1.0, 0.5, 0.0),
            );
            true
        });
        self.stats.expired += expired as u64;

        let glow_at = self.last_pointer.unwrap_or(Vec2::ZERO);
        canvas.radial_blob(glow_at, self.config.glow_radius, GLOW_INNER, GLOW_OUTER);
    }

    /// Drops every live particle and forgets the pointer.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.last_pointer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::{DrawCommand, DrawList};

    #[test]
    fn test_spawn_count_formula() {
        let config = TrailConfig::default();
        assert_eq!(spawn_count(0.0, &config), 0);
        assert_eq!(spawn_count(3.0, &config), 0);
        assert_eq!(spawn_count(4.0, &config), 1);
        assert_eq!(spawn_count(10.0, &config), 3);
        assert_eq!(spawn_count(1_000.0, &config), 5);
        assert_eq!(spawn_count(-50.0, &config), 0);
        assert_eq!(spawn_count(f32::NAN, &config), 0);
        assert_eq!(spawn_count(f32::INFINITY, &config), 0);
    }

    #[test]
    fn test_first_sample_spawns_nothing() {
        let mut trail = MouseTrailEmitter::new(&TrailConfig::default(), 1);
        assert_eq!(trail.on_pointer_move(500.0, 500.0), 0);
        assert_eq!(trail.on_pointer_move(510.0, 500.0), 3);
        assert_eq!(trail.live_count(), 3);
    }

    #[test]
    fn test_spawn_parameters() {
        let mut trail = MouseTrailEmitter::new(&TrailConfig::default(), 9);
        trail.on_pointer_move(100.0, 100.0);
        for step in 1..=40 {
            trail.on_pointer_move(100.0 + step as f32 * 20.0, 100.0);
        }
        let pointer = trail.pointer().unwrap();
        assert_eq!(pointer, Vec2::new(900.0, 100.0));
        for p in trail.particles() {
            assert_eq!(p.life, 1.0);
            assert!((0.6..1.2).contains(&p.max_life));
            assert!((1.5..4.0).contains(&p.size));
            assert!((180.0..270.0).contains(&p.hue));
            assert!(p.velocity.x.abs() <= 0.75 && p.velocity.y.abs() <= 0.75);
        }
    }

    #[test]
    fn test_life_decreases_until_removed() {
        let config = TrailConfig::default();
        let mut trail = MouseTrailEmitter::new(&config, 3);
        let mut canvas = DrawList::with_capacity(64, 800.0, 600.0);
        trail.on_pointer_move(0.0, 0.0);
        trail.on_pointer_move(20.0, 0.0);
        let spawned = trail.live_count();
        assert_eq!(spawned, 5);

        let mut last: Vec<f32> = trail.particles().map(|p| p.life).collect();
        // max_life < 1.2 so every particle is gone within 1.2 / 0.016 frames
        for _ in 0..80 {
            trail.tick(&mut canvas);
            let now: Vec<f32> = trail.particles().map(|p| p.life).collect();
            assert!(now.iter().all(|&l| l > 0.0));
            if now.len() == last.len() {
                assert!(now.iter().zip(&last).all(|(a, b)| a < b));
            }
            last = now;
        }
        assert_eq!(trail.live_count(), 0);
        assert_eq!(trail.stats().expired, spawned as u64);
    }

    #[test]
    fn test_full_pool_drops() {
        let config = TrailConfig {
            capacity: 4,
            ..TrailConfig::default()
        };
        let mut trail = MouseTrailEmitter::new(&config, 5);
        trail.on_pointer_move(0.0, 0.0);
        assert_eq!(trail.on_pointer_move(100.0, 0.0), 4);
        assert_eq!(trail.stats().dropped, 1);
        assert_eq!(trail.live_count(), 4);
    }

    #[test]
    fn test_tick_draws_blobs_then_glow() {
        let mut trail = MouseTrailEmitter::new(&TrailConfig::default(), 2);
        let mut canvas = DrawList::with_capacity(16, 800.0, 600.0);
        trail.on_pointer_move(300.0, 200.0);
        trail.on_pointer_move(320.0, 200.0);
        trail.tick(&mut canvas);

        let commands = canvas.commands();
        assert_eq!(commands.first(), Some(&DrawCommand::Clear));
        assert_eq!(canvas.blobs().count(), 6);
        match commands.last() {
            Some(DrawCommand::Blob { center, radius, inner, .. }) => {
                assert_eq!(*center, Vec2::new(320.0, 200.0));
                assert_eq!(*radius, 30.0);
                assert_eq!(*inner, GLOW_INNER);
            }
            other => panic!("expected glow, got {other:?}"),
        }
    }

    #[test]
    fn test_feed_is_drained() {
        let (tx, rx) = crossbeam_channel::bounded(8);
        let mut trail = MouseTrailEmitter::new(&TrailConfig::default(), 4).with_feed(rx);
        tx.send(PointerSample::new(0.0, 0.0)).unwrap();
        tx.send(PointerSample::new(0.0, 10.0)).unwrap();

        let mut canvas = DrawList::with_capacity(16, 800.0, 600.0);
        trail.tick(&mut canvas);
        assert_eq!(trail.stats().spawned, 3);
        assert!(tx.is_empty());
    }
}
