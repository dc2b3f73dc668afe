//! The particle engine: pool, clock, budget, and the spawn patterns.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

use crate::config::EngineConfig;
use crate::particle::{Instance, Particle};
use crate::pool::ParticlePool;
use crate::spawn::{SpawnOptions, SpawnRng};
use crate::time::FrameClock;

/// Engine lifecycle. `Destroyed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Paused,
    Destroyed,
}

/// Read-only diagnostics snapshot.
#[derive(Clone, Copy, Debug)]
pub struct EngineStats {
    pub active_particles: usize,
    pub max_particles: usize,
    pub pool_capacity: usize,
    pub fps: f32,
    pub surface_size: (f32, f32),
}

/// Owns the particle pool and drives the simulation clock.
///
/// The engine is simulation-only and never touches the GPU; pair it with a
/// [`Renderer`](crate::Renderer) to draw the instances it emits. There is no
/// global instance - whoever compiles the application owns the engine and
/// hands it to the components that spawn effects.
///
/// Frame scheduling is explicit: an external driver calls [`tick`] once per
/// frame and keeps scheduling frames while it returns `true`. Pausing is a
/// state check inside `tick`, not a cancellation race.
///
/// [`tick`]: ParticleEngine::tick
pub struct ParticleEngine {
    config: EngineConfig,
    spawn_rate: f32,
    pool: ParticlePool,
    rng: SpawnRng,
    clock: FrameClock,
    state: EngineState,
    surface_size: Vec2,
}

impl ParticleEngine {
    /// Create an engine from a startup configuration.
    ///
    /// The device profile is collapsed into concrete limits here; it cannot
    /// change for the engine's lifetime.
    pub fn new(config: EngineConfig) -> Self {
        let spawn_rate = config.spawn_rate();
        let config = config.resolved();
        Self {
            spawn_rate,
            pool: ParticlePool::new(config.pool_capacity),
            rng: SpawnRng::new(config.seed),
            clock: FrameClock::new(),
            state: EngineState::Running,
            surface_size: Vec2::ZERO,
            config,
        }
    }

    // =========================================================================
    // SPAWN PATTERNS
    // =========================================================================
    //
    // All four silently no-op at the particle budget, and scale the requested
    // count by the constrained profile's spawn rate (rounding up).

    /// `count` particles evenly spaced around a full circle.
    pub fn spawn_burst(&mut self, x: f32, y: f32, count: usize, opts: &SpawnOptions) {
        let n = self.scaled_count(count);
        if !self.may_spawn() || n == 0 {
            return;
        }
        let now = self.clock.elapsed();
        for i in 0..n {
            if self.at_budget() {
                break;
            }
            let mut per = *opts;
            if per.angle.is_none() {
                per.angle = Some(TAU * i as f32 / n as f32);
            }
            let particle = self.pool.acquire();
            particle.spawn(x, y, &per, &self.config, &mut self.rng, now);
        }
    }

    /// `count` particles at independent random angles with a hotter speed
    /// range than a burst.
    pub fn spawn_explosion(&mut self, x: f32, y: f32, count: usize, opts: &SpawnOptions) {
        let n = self.scaled_count(count);
        if !self.may_spawn() || n == 0 {
            return;
        }
        let now = self.clock.elapsed();
        let speed = self.config.speed;
        for _ in 0..n {
            if self.at_budget() {
                break;
            }
            let mut per = *opts;
            if per.angle.is_none() {
                per.angle = Some(self.rng.range(0.0, TAU));
            }
            if per.speed.is_none() {
                per.speed = Some(self.rng.range(speed.min, speed.max * 2.0));
            }
            let particle = self.pool.acquire();
            particle.spawn(x, y, &per, &self.config, &mut self.rng, now);
        }
    }

    /// `count` particles jetting upward within the configured angular spread.
    pub fn spawn_fountain(&mut self, x: f32, y: f32, count: usize, opts: &SpawnOptions) {
        let n = self.scaled_count(count);
        if !self.may_spawn() || n == 0 {
            return;
        }
        let now = self.clock.elapsed();
        let spread = self.config.fountain_spread;
        let speed = self.config.speed;
        for _ in 0..n {
            if self.at_budget() {
                break;
            }
            let mut per = *opts;
            if per.angle.is_none() {
                per.angle = Some(-FRAC_PI_2 + self.rng.range(-spread / 2.0, spread / 2.0));
            }
            if per.speed.is_none() {
                let mid = (speed.min + speed.max) * 0.5;
                per.speed = Some(self.rng.range(mid, speed.max * 1.5));
            }
            let particle = self.pool.acquire();
            particle.spawn(x, y, &per, &self.config, &mut self.rng, now);
        }
    }

    /// Small, slow, short-lived particles for continuous-motion trails.
    pub fn spawn_trail(&mut self, x: f32, y: f32, count: usize, opts: &SpawnOptions) {
        let n = self.scaled_count(count);
        if !self.may_spawn() || n == 0 {
            return;
        }
        let now = self.clock.elapsed();
        let size = self.config.size;
        let speed = self.config.speed;
        let lifetime = self.config.lifetime;
        for _ in 0..n {
            if self.at_budget() {
                break;
            }
            let mut per = *opts;
            if per.angle.is_none() {
                per.angle = Some(self.rng.range(0.0, TAU));
            }
            if per.speed.is_none() {
                per.speed = Some(self.rng.range(0.0, speed.min));
            }
            if per.size.is_none() {
                per.size = Some(self.rng.range(size.min * 0.5, size.min));
            }
            if per.lifetime.is_none() {
                per.lifetime = Some(self.rng.range(lifetime.min * 0.3, lifetime.min * 0.6));
            }
            let particle = self.pool.acquire();
            particle.spawn(x, y, &per, &self.config, &mut self.rng, now);
        }
    }

    // =========================================================================
    // FRAME CYCLE
    // =========================================================================

    /// One frame of simulation.
    ///
    /// Advances the clock and FPS counter, then steps every live particle.
    /// Returns whether the driver should schedule another frame; paused and
    /// destroyed engines do no work.
    pub fn tick(&mut self) -> bool {
        match self.state {
            EngineState::Destroyed | EngineState::Paused => false,
            EngineState::Running => {
                let (now, _delta) = self.clock.update();
                self.pool.update_all(now, &self.config);
                true
            }
        }
    }

    /// Collect render instances for the current frame.
    pub fn emit_instances(&self, out: &mut Vec<Instance>) {
        if self.state == EngineState::Destroyed {
            return;
        }
        self.pool.instances(&self.config, out);
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Stop the clock and the frame loop. Idempotent.
    pub fn pause(&mut self) {
        if self.state == EngineState::Running {
            self.clock.pause();
            self.state = EngineState::Paused;
        }
    }

    /// Restart after a pause. Idempotent.
    ///
    /// The clock's last-frame timestamp resets so the first delta after
    /// resuming stays small.
    pub fn resume(&mut self) {
        if self.state == EngineState::Paused {
            self.clock.resume();
            self.state = EngineState::Running;
        }
    }

    /// Tear the engine down: pause, release every particle, and refuse all
    /// further work. Terminal - there is no restart without a new engine.
    ///
    /// The render surface is owned by the driver and must be dropped
    /// alongside the engine.
    pub fn destroy(&mut self) {
        if self.state == EngineState::Destroyed {
            return;
        }
        self.pause();
        self.pool.clear();
        self.state = EngineState::Destroyed;
    }

    /// Release every live particle.
    pub fn clear(&mut self) {
        self.pool.clear();
    }

    /// Cache the logical surface size for spawn coordinate math.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface_size = Vec2::new(width, height);
    }

    // =========================================================================
    // INSPECTION
    // =========================================================================

    /// Read-only diagnostics snapshot.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            active_particles: self.pool.active_count(),
            max_particles: self.config.max_particles,
            pool_capacity: self.pool.capacity(),
            fps: self.clock.fps(),
            surface_size: (self.surface_size.x, self.surface_size.y),
        }
    }

    /// Number of currently live particles.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Elapsed engine time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    /// Cached logical surface size.
    #[inline]
    pub fn surface_size(&self) -> Vec2 {
        self.surface_size
    }

    /// Iterate the live particles.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.pool.iter()
    }

    /// Pin the clock to a fixed step for deterministic tests.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.clock.set_fixed_delta(delta);
    }

    fn may_spawn(&self) -> bool {
        self.state != EngineState::Destroyed && !self.at_budget()
    }

    fn at_budget(&self) -> bool {
        self.pool.active_count() >= self.config.max_particles
    }

    fn scaled_count(&self, count: usize) -> usize {
        (count as f32 * self.spawn_rate).ceil() as usize
    }
}
