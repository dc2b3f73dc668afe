//! # embers - pooled 2D particle effects
//!
//! A small effects engine for decorating interactive surfaces: particles are
//! simulated on the CPU through a reuse pool and rendered as instanced,
//! rotated quads. Four spawn patterns cover the common shapes - bursts,
//! explosions, fountains and cursor trails - plus ephemeral overlay effects
//! (ripples, confetti showers, rain) that expire on a timer instead of
//! simulating physics.
//!
//! ## Quick Start
//!
//! ```ignore
//! use embers::{EngineConfig, ParticleEngine, SpawnOptions};
//!
//! let mut engine = ParticleEngine::new(EngineConfig::default());
//! engine.resize(960.0, 640.0);
//!
//! engine.spawn_burst(480.0, 320.0, 24, &SpawnOptions::default());
//!
//! // Each frame, driven by your window's redraw cycle:
//! let mut instances = Vec::new();
//! while engine.tick() {
//!     instances.clear();
//!     engine.emit_instances(&mut instances);
//!     // hand `instances` to a Renderer (or your own drawing code)
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Engine and pool
//!
//! [`ParticleEngine`] owns a [`ParticlePool`], the frame clock and a seeded
//! random source. The pool preallocates its configured capacity, grows on
//! demand, and discards releases past capacity so steady-state memory stays
//! bounded. A global budget caps live particles; spawn calls at the budget
//! are silently dropped.
//!
//! ### Explicit scheduling
//!
//! The engine never schedules itself. Your event loop calls
//! [`ParticleEngine::tick`] once per frame and keeps requesting frames while
//! it returns `true`; `pause()` makes the next tick return `false` with no
//! cancellation race. See [`app::App`] for the full winit wiring.
//!
//! ### Spawn patterns
//!
//! | Pattern | Angle distribution | Speed profile |
//! |---------|--------------------|---------------|
//! | [`spawn_burst`] | evenly spaced around the circle | configured range |
//! | [`spawn_explosion`] | uniformly random | hotter than burst |
//! | [`spawn_fountain`] | narrow spread around straight up | upward-biased |
//! | [`spawn_trail`] | uniformly random | slow, short-lived, small |
//!
//! Every per-spawn default is overridable through [`SpawnOptions`], and all
//! randomness flows through one seeded generator so behavior is reproducible
//! in tests.
//!
//! ### Rendering
//!
//! [`Renderer`] owns the wgpu surface and draws whatever [`Instance`] slice
//! it is given, so the simulation stays testable without a GPU.
//!
//! [`spawn_burst`]: ParticleEngine::spawn_burst
//! [`spawn_explosion`]: ParticleEngine::spawn_explosion
//! [`spawn_fountain`]: ParticleEngine::spawn_fountain
//! [`spawn_trail`]: ParticleEngine::spawn_trail

mod engine;
mod particle;
mod pool;
mod render;
mod shader;

pub mod app;
pub mod config;
pub mod error;
pub mod overlay;
pub mod spawn;
pub mod time;

pub use config::{ConstrainedProfile, DeviceProfile, EngineConfig, Palette, ValueRange};
pub use engine::{EngineState, EngineStats, ParticleEngine};
pub use error::{ConfigError, GpuError};
pub use glam::{Vec2, Vec4};
pub use overlay::OverlayEffects;
pub use particle::{Instance, Particle};
pub use pool::ParticlePool;
pub use render::Renderer;
pub use spawn::{SpawnOptions, SpawnRng};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use embers::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{DeviceProfile, EngineConfig, Palette, ValueRange};
    pub use crate::engine::{EngineState, EngineStats, ParticleEngine};
    pub use crate::overlay::OverlayEffects;
    pub use crate::render::Renderer;
    pub use crate::spawn::SpawnOptions;
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec4};
}
