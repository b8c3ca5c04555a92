//! Render Loop - one call per display refresh
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      FRAME TIMELINE                       │
//! ├───────────────────────────────────────────────────────────┤
//! │  ├── Tick FrameClock                                      │
//! │  ├── Take one InputSnapshot from the SignalBus            │
//! │  ├── Tick every mounted SceneComposer                     │
//! │  │   └── each InstanceUpdater writes its own surfaces     │
//! │  ├── Tick the mouse trail onto the overlay                │
//! │  └── Present (renderer uploads dirty surfaces)            │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in a frame blocks on input. Events land on the bus whenever the
//! host delivers them; the frame reads whatever was last written.

use std::sync::Arc;
use std::time::Instant;

use aurora_core::{AnimationConfig, FrameClock, SignalBus};

use super::Renderer;
use crate::error::{EffectsError, EffectsResult};
use crate::scene::{SceneComposer, SceneId, Section};
use crate::trail::{DrawList, MouseTrailEmitter};

/// Result of a single frame
#[derive(Debug, Clone)]
pub struct FrameResult {
    /// Frame number
    pub frame_number: u64,
    /// Elapsed animation time (seconds)
    pub elapsed: f32,
    /// Total frame time (microseconds)
    pub frame_time_us: u32,
    /// Time spent in scene updaters
    pub update_us: u32,
    /// Time spent on the trail
    pub trail_us: u32,
    /// Time spent presenting
    pub render_us: u32,
    /// Scenes ticked
    pub scenes: u32,
    /// Instances written
    pub instances_updated: u32,
    /// Trail particles alive after the tick
    pub trail_particles: u32,
    /// Over budget warning
    pub over_budget: bool,
}

/// Statistics for the render loop
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderLoopStats {
    /// Total frames rendered
    pub total_frames: u64,
    /// Average frame time (microseconds)
    pub avg_frame_time_us: u32,
    /// Worst frame time (microseconds)
    pub worst_frame_time_us: u32,
    /// Frames over budget
    pub frames_over_budget: u32,
}

/// Drives every mounted section, the trail and the renderer.
///
/// Stopping (explicitly or on drop) unmounts every section and detaches
/// the signal bus, so host listeners can no longer write into it.
pub struct RenderLoop<R: Renderer> {
    config: AnimationConfig,
    clock: FrameClock,
    bus: Arc<SignalBus>,
    renderer: R,
    composers: Vec<SceneComposer>,
    next_scene: u32,
    trail: Option<MouseTrailEmitter>,
    overlay: DrawList,
    running: bool,
    stats: RenderLoopStats,
}

impl<R: Renderer> RenderLoop<R> {
    /// Creates a running loop with a wall clock and no sections.
    ///
    /// # Errors
    ///
    /// Returns [`EffectsError::Config`] if `config` fails validation.
    pub fn new(config: &AnimationConfig, bus: Arc<SignalBus>, renderer: R) -> EffectsResult<Self> {
        config.validate()?;

        let viewport = bus.snapshot().viewport;
        // Every live particle plus the clear and the cursor glow
        let overlay =
            DrawList::with_capacity(config.trail.capacity + 2, viewport.width, viewport.height);

        tracing::info!(
            "Render loop started (budget {}us)",
            config.render_loop.frame_budget_us
        );

        Ok(Self {
            config: config.clone(),
            clock: FrameClock::start(&config.clock),
            bus,
            renderer,
            composers: Vec::new(),
            next_scene: 0,
            trail: None,
            overlay,
            running: true,
            stats: RenderLoopStats::default(),
        })
    }

    /// Replaces the clock (e.g. a manual clock for offline rendering).
    #[must_use]
    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    /// Adds a mouse trail drawn onto the overlay every frame.
    #[must_use]
    pub fn with_trail(mut self, trail: MouseTrailEmitter) -> Self {
        self.trail = Some(trail);
        self
    }

    /// Builds and mounts `section`.
    ///
    /// # Errors
    ///
    /// Returns [`EffectsError::DuplicateSection`] if it is already mounted,
    /// otherwise the errors of [`SceneComposer::new`].
    pub fn mount_section(&mut self, section: Section) -> EffectsResult<SceneId> {
        if self.composers.iter().any(|c| c.section() == section) {
            return Err(EffectsError::DuplicateSection(section));
        }

        let id = SceneId(self.next_scene);
        let mut composer = SceneComposer::new(id, section, &self.config, &self.bus)?;
        composer.mount(&mut self.renderer);
        self.next_scene += 1;
        self.composers.push(composer);
        Ok(id)
    }

    /// Unmounts `section`. Returns false if it was not mounted.
    pub fn unmount_section(&mut self, section: Section) -> bool {
        let Some(index) = self.composers.iter().position(|c| c.section() == section) else {
            return false;
        };
        let mut composer = self.composers.remove(index);
        composer.unmount(&mut self.renderer);
        true
    }

    /// Executes one frame. Returns `None` once stopped.
    pub fn frame(&mut self) -> Option<FrameResult> {
        if !self.running {
            return None;
        }
        let frame_start = Instant::now();

        let time = self.clock.tick();
        let input = self.bus.snapshot();
        if self.overlay.size() != (input.viewport.width, input.viewport.height) {
            self.overlay
                .resize(input.viewport.width, input.viewport.height);
        }

        // === PHASE 1: Scene updaters ===
        let update_start = Instant::now();
        let mut instances = 0;
        for composer in &mut self.composers {
            instances += composer.tick(time, &input);
        }
        let update_time = update_start.elapsed();

        // === PHASE 2: Trail overlay ===
        let trail_start = Instant::now();
        let trail_particles = match &mut self.trail {
            Some(trail) => {
                trail.tick(&mut self.overlay);
                trail.live_count()
            }
            None => 0,
        };
        let trail_time = trail_start.elapsed();

        // === PHASE 3: Present ===
        let render_start = Instant::now();
        self.renderer.present(&time, &self.overlay);
        let render_time = render_start.elapsed();

        let total_us = frame_start.elapsed().as_micros() as u32;
        let over_budget = self.record(total_us);
        if over_budget {
            tracing::warn!(
                "Frame {} over budget: {}us > {}us",
                time.frame,
                total_us,
                self.config.render_loop.frame_budget_us
            );
        }

        Some(FrameResult {
            frame_number: time.frame,
            elapsed: time.elapsed,
            frame_time_us: total_us,
            update_us: update_time.as_micros() as u32,
            trail_us: trail_time.as_micros() as u32,
            render_us: render_time.as_micros() as u32,
            scenes: self.composers.len() as u32,
            instances_updated: instances as u32,
            trail_particles: trail_particles as u32,
            over_budget,
        })
    }

    fn record(&mut self, total_us: u32) -> bool {
        let stats = &mut self.stats;
        stats.total_frames += 1;
        let n = stats.total_frames;
        let avg = (u64::from(stats.avg_frame_time_us) * (n - 1) + u64::from(total_us)) / n;
        stats.avg_frame_time_us = avg as u32;
        if total_us > stats.worst_frame_time_us {
            stats.worst_frame_time_us = total_us;
        }
        let over_budget = total_us > self.config.render_loop.frame_budget_us;
        if over_budget {
            stats.frames_over_budget += 1;
        }
        over_budget
    }

    /// Unmounts everything and detaches the bus. Idempotent.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        for composer in &mut self.composers {
            composer.unmount(&mut self.renderer);
        }
        self.composers.clear();
        if let Some(trail) = &mut self.trail {
            trail.reset();
        }
        self.bus.detach();

        tracing::info!(
            "Render loop stopped after {} frames",
            self.stats.total_frames
        );
    }

    /// True until [`RenderLoop::stop`].
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Returns statistics
    #[must_use]
    pub const fn stats(&self) -> RenderLoopStats {
        self.stats
    }

    /// Mounted scenes.
    #[must_use]
    pub fn scenes(&self) -> &[SceneComposer] {
        &self.composers
    }

    /// The trail emitter, if any.
    #[must_use]
    pub const fn trail(&self) -> Option<&MouseTrailEmitter> {
        self.trail.as_ref()
    }

    /// The overlay as drawn by the last frame.
    #[must_use]
    pub const fn overlay(&self) -> &DrawList {
        &self.overlay
    }

    /// The signal bus.
    #[must_use]
    pub fn bus(&self) -> &Arc<SignalBus> {
        &self.bus
    }

    /// The renderer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable renderer access.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Mutable clock access (advance a manual clock between frames).
    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }
}

impl<R: Renderer> Drop for RenderLoop<R> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::HeadlessRenderer;
    use aurora_core::{ClockConfig, PopulationConfig};

    fn small_config() -> AnimationConfig {
        let mut config = AnimationConfig {
            seed: Some(7),
            ..AnimationConfig::default()
        };
        config.populations = PopulationConfig {
            starfield: 50,
            nebula: 50,
            warp_particles: 40,
            vortex: 60,
            accent: 20,
            data_stream: 30,
            ..PopulationConfig::default()
        };
        config
    }

    fn manual_loop() -> RenderLoop<HeadlessRenderer> {
        let config = small_config();
        RenderLoop::new(&config, SignalBus::new(), HeadlessRenderer::new())
            .unwrap()
            .with_clock(FrameClock::manual(&ClockConfig::default()))
    }

    #[test]
    fn test_frame_ticks_every_scene() {
        let mut render_loop = manual_loop();
        render_loop.mount_section(Section::Work).unwrap();
        render_loop.mount_section(Section::Contact).unwrap();

        render_loop.clock_mut().advance(1.0 / 60.0);
        let result = render_loop.frame().unwrap();

        assert_eq!(result.frame_number, 1);
        assert_eq!(result.scenes, 2);
        assert_eq!(result.instances_updated, 40 + 12 + 20 + 60 + 20 + 2);
        assert!(render_loop.renderer().stats().uploads > 0);
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let mut render_loop = manual_loop();
        render_loop.mount_section(Section::Hero).unwrap();
        assert!(matches!(
            render_loop.mount_section(Section::Hero),
            Err(EffectsError::DuplicateSection(Section::Hero))
        ));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut render_loop = manual_loop();
        render_loop.mount_section(Section::Space).unwrap();
        assert!(render_loop.frame().is_some());

        render_loop.stop();
        render_loop.stop();

        assert!(render_loop.frame().is_none());
        assert!(!render_loop.bus().is_attached());
        assert_eq!(render_loop.renderer().scene_count(), 0);
        assert_eq!(render_loop.stats().total_frames, 1);
    }

    #[test]
    fn test_unmount_section() {
        let mut render_loop = manual_loop();
        render_loop.mount_section(Section::About).unwrap();
        assert!(render_loop.unmount_section(Section::About));
        assert!(!render_loop.unmount_section(Section::About));
        assert_eq!(render_loop.renderer().scene_count(), 0);
        // Remount gets a fresh id
        assert_eq!(render_loop.mount_section(Section::About).unwrap(), SceneId(1));
    }

    #[test]
    fn test_remount_returns_hover_ids() {
        let mut render_loop = manual_loop();
        render_loop.mount_section(Section::Service).unwrap();
        let first = render_loop.scenes()[0].hover_ids().to_vec();

        for cycle in 0..30 {
            assert!(render_loop.unmount_section(Section::Service));
            assert_eq!(render_loop.bus().hover_targets_in_use(), 0);

            render_loop.mount_section(Section::Service).unwrap_or_else(|e| {
                panic!("remount {cycle} failed: {e}");
            });
            render_loop.mount_section(Section::Hero).unwrap();
            assert_eq!(render_loop.bus().hover_targets_in_use(), 7);
            assert!(render_loop.unmount_section(Section::Hero));
        }
        assert_eq!(render_loop.scenes()[0].hover_ids(), first.as_slice());

        render_loop.stop();
        assert_eq!(render_loop.bus().hover_targets_in_use(), 0);
    }

    #[test]
    fn test_exhausted_mount_keeps_no_ids() {
        let mut render_loop = manual_loop();
        for _ in 0..60 {
            render_loop.bus().register_hover_target().unwrap();
        }

        assert!(matches!(
            render_loop.mount_section(Section::Service),
            Err(EffectsError::HoverTargetsExhausted(Section::Service))
        ));
        assert_eq!(render_loop.bus().hover_targets_in_use(), 60);
        assert!(render_loop.mount_section(Section::Hero).is_ok());
    }
}
