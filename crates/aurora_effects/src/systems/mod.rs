//! # Visual Systems
//!
//! One module per page section. Each system samples its parameter sets
//! once at construction and implements [`crate::InstanceUpdater`].
//!
//! Most systems are closed-form in `t`: the transform for slot `i` is a
//! pure function of the parameter set, the elapsed time and the input
//! snapshot. The hover-driven spins (AI core, hologram shapes) and the
//! spotlight integrate per-frame deltas instead.

pub mod about;
pub mod contact;
pub mod hero;
pub mod service;
pub mod space;
pub mod work;

use aurora_core::Vec3;

/// Point on a circle of `radius` in the XZ plane.
#[inline]
pub(crate) fn orbit_xz(angle: f32, radius: f32) -> (f32, f32) {
    (angle.cos() * radius, angle.sin() * radius)
}

/// Point on a circle of `radius` in the XY plane, at depth `z`.
#[inline]
pub(crate) fn orbit_xy(angle: f32, radius: f32, z: f32) -> Vec3 {
    Vec3::new(angle.cos() * radius, angle.sin() * radius, z)
}
