//! Integration tests for the engine: pool accounting, the particle budget,
//! spawn-pattern geometry, and the lifecycle state machine.
//!
//! Every engine is seeded so spawn-time sampling is reproducible.

use std::f32::consts::{FRAC_PI_2, TAU};

use embers::{
    DeviceProfile, EngineConfig, EngineState, Palette, ParticleEngine, SpawnOptions, Vec4,
};

fn test_config() -> EngineConfig {
    EngineConfig {
        seed: Some(1234),
        ..EngineConfig::default()
    }
}

fn test_engine() -> ParticleEngine {
    ParticleEngine::new(test_config())
}

/// Velocity angle in [0, tau).
fn launch_angle(velocity: embers::Vec2) -> f32 {
    velocity.y.atan2(velocity.x).rem_euclid(TAU)
}

// ============================================================================
// Spawn patterns
// ============================================================================

#[test]
fn burst_spawns_exactly_the_requested_count() {
    let mut engine = test_engine();
    engine.spawn_burst(100.0, 100.0, 12, &SpawnOptions::default());
    assert_eq!(engine.active_count(), 12);
}

#[test]
fn burst_angles_are_evenly_spaced() {
    let mut engine = test_engine();
    engine.spawn_burst(0.0, 0.0, 8, &SpawnOptions::default());

    let mut angles: Vec<f32> = engine
        .particles()
        .map(|p| launch_angle(p.velocity))
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap());

    for (i, angle) in angles.iter().enumerate() {
        let expected = TAU * i as f32 / 8.0;
        assert!(
            (angle - expected).abs() < 1e-3,
            "angle {i} was {angle}, expected {expected}"
        );
    }
}

#[test]
fn explosion_speeds_run_hotter_than_the_configured_range() {
    let config = test_config();
    let mut engine = ParticleEngine::new(config.clone());
    engine.spawn_explosion(0.0, 0.0, 30, &SpawnOptions::default());

    for p in engine.particles() {
        let speed = p.velocity.length();
        assert!(speed >= config.speed.min - 1e-4);
        assert!(speed < config.speed.max * 2.0 + 1e-4);
    }
}

#[test]
fn fountain_angles_stay_within_the_configured_spread() {
    let config = test_config();
    let spread = config.fountain_spread;
    let mut engine = ParticleEngine::new(config);
    engine.spawn_fountain(100.0, 100.0, 10, &SpawnOptions::default());

    assert_eq!(engine.active_count(), 10);
    for p in engine.particles() {
        let angle = p.velocity.y.atan2(p.velocity.x);
        assert!(
            angle >= -FRAC_PI_2 - spread / 2.0 - 1e-4,
            "angle {angle} below spread"
        );
        assert!(
            angle <= -FRAC_PI_2 + spread / 2.0 + 1e-4,
            "angle {angle} above spread"
        );
        // y grows downward, so a fountain launches with negative vy.
        assert!(p.velocity.y < 0.0);
    }
}

#[test]
fn trail_particles_are_small_slow_and_short_lived() {
    let config = test_config();
    let mut engine = ParticleEngine::new(config.clone());
    engine.spawn_trail(50.0, 50.0, 10, &SpawnOptions::default());

    for p in engine.particles() {
        assert!(p.size <= config.size.min);
        assert!(p.velocity.length() <= config.speed.min);
        assert!(p.lifetime < config.lifetime.min);
    }
}

#[test]
fn spawn_options_override_pattern_defaults() {
    let mut engine = test_engine();
    engine.spawn_explosion(
        0.0,
        0.0,
        4,
        &SpawnOptions {
            speed: Some(2.5),
            size: Some(6.0),
            color: Some(Vec4::new(0.2, 0.4, 0.6, 1.0)),
            lifetime: Some(3.0),
            ..SpawnOptions::default()
        },
    );

    for p in engine.particles() {
        assert!((p.velocity.length() - 2.5).abs() < 1e-4);
        assert_eq!(p.size, 6.0);
        assert_eq!(p.color, Vec4::new(0.2, 0.4, 0.6, 1.0));
        assert_eq!(p.lifetime, 3.0);
    }
}

// ============================================================================
// Budget enforcement
// ============================================================================

#[test]
fn spawning_at_the_budget_changes_nothing() {
    let mut config = test_config();
    config.max_particles = 10;
    let mut engine = ParticleEngine::new(config);

    engine.spawn_burst(0.0, 0.0, 10, &SpawnOptions::default());
    assert_eq!(engine.active_count(), 10);

    engine.spawn_burst(0.0, 0.0, 5, &SpawnOptions::default());
    assert_eq!(engine.active_count(), 10);
}

#[test]
fn a_spawn_crossing_the_budget_is_truncated() {
    let mut config = test_config();
    config.max_particles = 10;
    let mut engine = ParticleEngine::new(config);

    engine.spawn_burst(0.0, 0.0, 8, &SpawnOptions::default());
    engine.spawn_explosion(0.0, 0.0, 8, &SpawnOptions::default());
    assert_eq!(engine.active_count(), 10);
}

// ============================================================================
// Constrained profile
// ============================================================================

#[test]
fn constrained_profile_scales_spawn_counts_up_rounded() {
    let mut config = test_config();
    config.profile = DeviceProfile::Constrained;
    config.constrained.spawn_rate = 0.5;
    let mut engine = ParticleEngine::new(config);

    engine.spawn_burst(0.0, 0.0, 20, &SpawnOptions::default());
    assert_eq!(engine.active_count(), 10);

    engine.clear();
    engine.spawn_burst(0.0, 0.0, 5, &SpawnOptions::default());
    assert_eq!(engine.active_count(), 3); // ceil(5 * 0.5)
}

#[test]
fn constrained_profile_lowers_the_budget_and_lifetimes() {
    let mut config = test_config();
    config.profile = DeviceProfile::Constrained;
    config.constrained.spawn_rate = 1.0;
    let constrained_max = config.constrained.max_particles;
    let full_lifetime_max = config.lifetime.max;
    let scale = config.constrained.lifetime_scale;
    let mut engine = ParticleEngine::new(config);

    engine.spawn_explosion(0.0, 0.0, constrained_max + 50, &SpawnOptions::default());
    assert_eq!(engine.active_count(), constrained_max);
    assert_eq!(engine.stats().max_particles, constrained_max);

    for p in engine.particles() {
        assert!(p.lifetime <= full_lifetime_max * scale + 1e-4);
    }
}

// ============================================================================
// Lifetime behavior
// ============================================================================

#[test]
fn particles_expire_no_later_than_their_lifetime() {
    let mut engine = test_engine();
    engine.set_fixed_delta(Some(0.1));

    engine.spawn_burst(
        0.0,
        0.0,
        4,
        &SpawnOptions {
            lifetime: Some(0.5),
            ..SpawnOptions::default()
        },
    );

    for _ in 0..4 {
        engine.tick();
    }
    assert_eq!(engine.active_count(), 4, "expired early");

    engine.tick(); // elapsed reaches the lifetime exactly
    assert_eq!(engine.active_count(), 0, "survived past lifetime");
}

#[test]
fn normalized_life_never_increases() {
    let mut engine = test_engine();
    engine.set_fixed_delta(Some(0.05));
    engine.spawn_burst(0.0, 0.0, 1, &SpawnOptions::default());

    let mut last = f32::INFINITY;
    while engine.active_count() > 0 {
        let life = engine.particles().next().unwrap().normalized_life;
        assert!(life <= last);
        last = life;
        engine.tick();
    }
}

#[test]
fn recycled_particles_reflect_only_new_spawn_inputs() {
    let mut config = test_config();
    config.palette = Palette::Mono;
    config.pool_capacity = 1;
    let mut engine = ParticleEngine::new(config);
    engine.set_fixed_delta(Some(0.1));

    engine.spawn_burst(
        0.0,
        0.0,
        1,
        &SpawnOptions {
            color: Some(Vec4::new(0.9, 0.1, 0.2, 1.0)),
            lifetime: Some(0.15),
            ..SpawnOptions::default()
        },
    );
    while engine.active_count() > 0 {
        engine.tick();
    }

    // The same slot comes back; no explicit color this time, so the palette
    // must win over the previous spawn's override.
    engine.spawn_burst(0.0, 0.0, 1, &SpawnOptions::default());
    let p = engine.particles().next().unwrap();
    assert_eq!(p.color, Vec4::new(1.0, 1.0, 1.0, 1.0));
}

// ============================================================================
// Lifecycle state machine
// ============================================================================

#[test]
fn pause_and_resume_gate_the_tick() {
    let mut engine = test_engine();
    assert!(engine.tick());

    engine.pause();
    assert_eq!(engine.state(), EngineState::Paused);
    assert!(!engine.tick());

    engine.pause(); // idempotent
    engine.resume();
    assert_eq!(engine.state(), EngineState::Running);
    assert!(engine.tick());
}

#[test]
fn spawning_while_paused_is_allowed() {
    let mut engine = test_engine();
    engine.pause();

    engine.spawn_burst(0.0, 0.0, 6, &SpawnOptions::default());
    assert_eq!(engine.active_count(), 6);
}

#[test]
fn destroy_is_terminal() {
    let mut engine = test_engine();
    engine.spawn_burst(0.0, 0.0, 8, &SpawnOptions::default());

    engine.destroy();
    assert_eq!(engine.state(), EngineState::Destroyed);
    assert_eq!(engine.active_count(), 0);
    assert!(!engine.tick());

    engine.spawn_burst(0.0, 0.0, 8, &SpawnOptions::default());
    assert_eq!(engine.active_count(), 0);

    engine.resume(); // must not revive a destroyed engine
    assert_eq!(engine.state(), EngineState::Destroyed);
    assert!(!engine.tick());
}

#[test]
fn clear_releases_every_live_particle() {
    let mut engine = test_engine();
    engine.spawn_explosion(0.0, 0.0, 20, &SpawnOptions::default());
    assert_eq!(engine.active_count(), 20);

    engine.clear();
    assert_eq!(engine.active_count(), 0);
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn stats_snapshot_reflects_engine_state() {
    let config = test_config();
    let mut engine = ParticleEngine::new(config.clone());
    engine.resize(800.0, 600.0);
    engine.spawn_burst(0.0, 0.0, 7, &SpawnOptions::default());

    let stats = engine.stats();
    assert_eq!(stats.active_particles, 7);
    assert_eq!(stats.max_particles, config.max_particles);
    assert_eq!(stats.pool_capacity, config.pool_capacity);
    assert_eq!(stats.surface_size, (800.0, 600.0));
}

#[test]
fn emit_instances_matches_the_live_set() {
    let mut engine = test_engine();
    engine.spawn_burst(10.0, 10.0, 5, &SpawnOptions::default());

    let mut instances = Vec::new();
    engine.emit_instances(&mut instances);
    assert_eq!(instances.len(), 5);

    engine.destroy();
    instances.clear();
    engine.emit_instances(&mut instances);
    assert!(instances.is_empty());
}
