//! Rendering statistics.

/// Statistics from the last presented frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStats {
    /// Frames presented.
    pub frames: u64,
    /// Live surfaces across all open scenes.
    pub surfaces: u32,
    /// Instances (or line points) across all live surfaces.
    pub instances: u32,
    /// Surfaces uploaded this frame.
    pub uploads: u32,
    /// Bytes uploaded this frame.
    pub bytes_uploaded: u64,
    /// Overlay commands drawn this frame.
    pub overlay_commands: u32,
    /// Point lights across all open scenes.
    pub lights: u32,
    /// Frame time in milliseconds.
    pub frame_time_ms: f32,
}

impl RenderStats {
    /// Returns FPS calculated from frame time.
    #[must_use]
    pub fn fps(&self) -> f32 {
        if self.frame_time_ms > 0.0 {
            1000.0 / self.frame_time_ms
        } else {
            0.0
        }
    }

    /// Returns true if meeting `target` frames per second.
    #[must_use]
    pub fn meets_target(&self, target: f32) -> bool {
        self.fps() >= target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps() {
        let stats = RenderStats {
            frame_time_ms: 16.0,
            ..RenderStats::default()
        };
        assert!((stats.fps() - 62.5).abs() < 1e-4);
        assert!(stats.meets_target(60.0));
        assert!(!stats.meets_target(120.0));
        assert_eq!(RenderStats::default().fps(), 0.0);
    }
}
