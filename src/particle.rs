//! Particle state and per-step behavior.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};
use std::f32::consts::TAU;

use crate::config::EngineConfig;
use crate::spawn::{SpawnOptions, SpawnRng};

/// A single simulated particle.
///
/// Owned exclusively by the pool. `active == false` means the slot is free
/// for reuse and its fields hold stale data from a previous life; `spawn`
/// overwrites every field and makes no assumption that they were zeroed.
#[derive(Clone, Debug)]
pub struct Particle {
    /// Center position in logical pixels.
    pub position: Vec2,
    /// Velocity in units per frame.
    pub velocity: Vec2,
    /// Edge length in pixels.
    pub size: f32,
    /// RGBA color.
    pub color: Vec4,
    /// Rotation in radians.
    pub rotation: f32,
    /// Spin in radians per frame.
    pub rotation_speed: f32,
    /// Remaining-life fraction: 1.0 at spawn, 0.0 at expiry.
    pub normalized_life: f32,
    /// Total lifetime in seconds.
    pub lifetime: f32,
    /// Engine-clock timestamp at spawn, in seconds.
    pub birth: f32,
    /// Whether this particle is in the live set.
    pub active: bool,
}

impl Particle {
    /// An inert slot placeholder.
    pub(crate) fn inert() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            size: 0.0,
            color: Vec4::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            normalized_life: 0.0,
            lifetime: 0.0,
            birth: 0.0,
            active: false,
        }
    }

    /// Reinitialize every field for a fresh life at `(x, y)`.
    ///
    /// Fields not overridden in `opts` are sampled from the configured
    /// ranges; an unset angle launches in a uniformly random direction.
    pub fn spawn(
        &mut self,
        x: f32,
        y: f32,
        opts: &SpawnOptions,
        config: &EngineConfig,
        rng: &mut SpawnRng,
        now: f32,
    ) {
        let angle = opts.angle.unwrap_or_else(|| rng.range(0.0, TAU));
        let speed = opts.speed.unwrap_or_else(|| rng.sample(config.speed));

        self.position = Vec2::new(x, y);
        self.velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
        self.size = opts.size.unwrap_or_else(|| rng.sample(config.size));
        self.color = opts
            .color
            .unwrap_or_else(|| rng.palette_color(&config.palette));
        self.rotation = rng.range(0.0, TAU);
        self.rotation_speed = rng.sample(config.rotation_speed);
        self.lifetime = opts.lifetime.unwrap_or_else(|| rng.sample(config.lifetime));
        self.birth = now;
        self.normalized_life = 1.0;
        self.active = true;
    }

    /// One simulation step.
    ///
    /// Gravity, then friction (a flat per-step multiplier), then position and
    /// rotation integration. Life is recomputed from the clock; a particle
    /// whose life reaches zero deactivates on the same pass, never a frame
    /// late.
    pub fn update(&mut self, now: f32, config: &EngineConfig) {
        if !self.active {
            return;
        }

        self.velocity.y += config.gravity;
        self.velocity *= config.friction;
        self.position += self.velocity;
        self.rotation += self.rotation_speed;

        self.normalized_life = 1.0 - (now - self.birth) / self.lifetime;
        if self.normalized_life <= 0.0 {
            self.active = false;
        }
    }

    /// Render data for this particle, `None` while inactive or expired.
    ///
    /// Opacity tracks remaining life when fade-out is enabled.
    pub fn instance(&self, config: &EngineConfig) -> Option<Instance> {
        if !self.active || self.normalized_life <= 0.0 {
            return None;
        }
        let alpha = if config.fade_out {
            self.normalized_life
        } else {
            1.0
        };
        Some(Instance {
            pos_size: [self.position.x, self.position.y, self.size, self.rotation],
            color: [self.color.x, self.color.y, self.color.z, self.color.w * alpha],
        })
    }

    /// Return the slot to its inert default state.
    pub(crate) fn reset(&mut self) {
        *self = Self::inert();
    }
}

/// GPU instance data - matches the WGSL `Instance` input (32 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Instance {
    /// xy = center position in logical pixels, z = edge length, w = rotation.
    pub pos_size: [f32; 4],
    /// RGBA, already multiplied by the fade alpha.
    pub color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Palette;
    use glam::Vec4;

    fn setup() -> (EngineConfig, SpawnRng) {
        let mut config = EngineConfig::default();
        config.seed = Some(11);
        let rng = SpawnRng::new(config.seed);
        (config, rng)
    }

    #[test]
    fn spawn_honors_overrides() {
        let (config, mut rng) = setup();
        let opts = SpawnOptions {
            angle: Some(0.0),
            speed: Some(3.0),
            size: Some(7.5),
            color: Some(Vec4::new(0.1, 0.2, 0.3, 1.0)),
            lifetime: Some(2.0),
        };

        let mut p = Particle::inert();
        p.spawn(10.0, 20.0, &opts, &config, &mut rng, 0.5);

        assert!(p.active);
        assert_eq!(p.position, Vec2::new(10.0, 20.0));
        assert!((p.velocity.x - 3.0).abs() < 1e-6);
        assert!(p.velocity.y.abs() < 1e-6);
        assert_eq!(p.size, 7.5);
        assert_eq!(p.color, Vec4::new(0.1, 0.2, 0.3, 1.0));
        assert_eq!(p.lifetime, 2.0);
        assert_eq!(p.birth, 0.5);
        assert_eq!(p.normalized_life, 1.0);
    }

    #[test]
    fn spawn_defaults_stay_in_configured_ranges() {
        let (config, mut rng) = setup();
        let mut p = Particle::inert();

        for _ in 0..50 {
            p.spawn(0.0, 0.0, &SpawnOptions::default(), &config, &mut rng, 0.0);
            let speed = p.velocity.length();
            assert!(speed >= config.speed.min && speed < config.speed.max + 1e-4);
            assert!(p.size >= config.size.min && p.size < config.size.max);
            assert!(p.lifetime >= config.lifetime.min && p.lifetime < config.lifetime.max);
        }
    }

    #[test]
    fn update_deactivates_on_the_expiring_pass() {
        let (config, mut rng) = setup();
        let mut p = Particle::inert();
        p.spawn(
            0.0,
            0.0,
            &SpawnOptions {
                lifetime: Some(1.0),
                ..SpawnOptions::default()
            },
            &config,
            &mut rng,
            0.0,
        );

        p.update(0.5, &config);
        assert!(p.active);
        assert!((p.normalized_life - 0.5).abs() < 1e-6);

        p.update(1.0, &config);
        assert!(!p.active, "life hit zero but the particle stayed active");
        assert!(p.normalized_life <= 0.0);
    }

    #[test]
    fn life_is_non_increasing() {
        let (config, mut rng) = setup();
        let mut p = Particle::inert();
        p.spawn(0.0, 0.0, &SpawnOptions::default(), &config, &mut rng, 0.0);

        let mut last = p.normalized_life;
        let mut now = 0.0;
        while p.active {
            now += 0.1;
            p.update(now, &config);
            assert!(p.normalized_life <= last);
            last = p.normalized_life;
        }
        assert!(now <= p.lifetime + 0.1 + 1e-4);
    }

    #[test]
    fn friction_and_gravity_shape_velocity() {
        let (mut config, mut rng) = setup();
        config.gravity = 0.1;
        config.friction = 0.5;

        let mut p = Particle::inert();
        p.spawn(
            0.0,
            0.0,
            &SpawnOptions {
                angle: Some(0.0),
                speed: Some(4.0),
                lifetime: Some(10.0),
                ..SpawnOptions::default()
            },
            &config,
            &mut rng,
            0.0,
        );

        p.update(0.1, &config);
        // vx halves; vy picks up gravity then halves.
        assert!((p.velocity.x - 2.0).abs() < 1e-6);
        assert!((p.velocity.y - 0.05).abs() < 1e-6);
        assert_eq!(p.position, Vec2::new(2.0, 0.05));
    }

    #[test]
    fn inactive_particles_do_not_render() {
        let (mut config, mut rng) = setup();
        config.palette = Palette::Mono;

        let mut p = Particle::inert();
        assert!(p.instance(&config).is_none());

        p.spawn(5.0, 6.0, &SpawnOptions::default(), &config, &mut rng, 0.0);
        let instance = p.instance(&config).expect("live particle renders");
        assert_eq!(instance.pos_size[0], 5.0);
        assert_eq!(instance.pos_size[1], 6.0);
        assert_eq!(instance.color[3], 1.0);
    }

    #[test]
    fn fade_out_scales_alpha_with_life() {
        let (config, mut rng) = setup();
        let mut p = Particle::inert();
        p.spawn(
            0.0,
            0.0,
            &SpawnOptions {
                lifetime: Some(1.0),
                ..SpawnOptions::default()
            },
            &config,
            &mut rng,
            0.0,
        );

        p.update(0.75, &config);
        let instance = p.instance(&config).unwrap();
        assert!((instance.color[3] - 0.25).abs() < 1e-4);
    }

    #[test]
    fn instance_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Instance>(), 32);
        assert_eq!(std::mem::align_of::<Instance>(), 4);
    }
}
