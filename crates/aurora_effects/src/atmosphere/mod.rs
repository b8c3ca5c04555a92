//! Scene atmosphere: background, fog and lights.

mod fog;
mod lighting;

pub use fog::{Environment, Fog};
pub use lighting::{Lighting, PointLight, MAX_POINT_LIGHTS};
