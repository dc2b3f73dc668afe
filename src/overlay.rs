//! Ephemeral overlay effects: ripples, confetti showers, rain.
//!
//! Structurally these are the particle system's little siblings: no pooling
//! and no physics sweep. Each sprite carries an absolute expiry timestamp
//! and is dropped on the first update past its deadline, the same
//! fire-and-forget shape as a removal timer. The only limiter is a cap on
//! simultaneously live sprites.

use glam::{Vec2, Vec4};
use std::f32::consts::TAU;

use crate::particle::Instance;
use crate::spawn::SpawnRng;

/// Upper bound on simultaneously live overlay sprites.
const MAX_SPRITES: usize = 120;

const RIPPLE_DURATION: f32 = 0.8;
const CONFETTI_DURATION: f32 = 3.0;
const RAIN_DURATION: f32 = 1.6;

/// Ring expansion range in pixels over a ripple's life.
const RIPPLE_START_SIZE: f32 = 8.0;
const RIPPLE_END_SIZE: f32 = 96.0;

const CONFETTI_COLORS: &[[f32; 3]] = &[
    [1.0, 0.84, 0.31],
    [0.96, 0.45, 0.62],
    [0.45, 0.85, 0.90],
    [0.72, 0.53, 0.96],
    [0.55, 0.90, 0.55],
];

const RAIN_COLOR: Vec4 = Vec4::new(0.55, 0.70, 0.95, 0.55);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SpriteKind {
    Ripple,
    Confetti,
    Rain,
}

#[derive(Clone, Debug)]
struct Sprite {
    kind: SpriteKind,
    position: Vec2,
    velocity: Vec2,
    size: f32,
    color: Vec4,
    rotation: f32,
    spin: f32,
    born: f32,
    expires: f32,
}

impl Sprite {
    fn progress(&self, now: f32) -> f32 {
        ((now - self.born) / (self.expires - self.born)).clamp(0.0, 1.0)
    }
}

/// Bounded set of short-lived overlay sprites.
pub struct OverlayEffects {
    sprites: Vec<Sprite>,
    rng: SpawnRng,
}

impl OverlayEffects {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            sprites: Vec::new(),
            rng: SpawnRng::new(seed),
        }
    }

    /// One expanding, fading ring at `(x, y)`.
    pub fn spawn_ripple(&mut self, x: f32, y: f32, now: f32) {
        if self.sprites.len() >= MAX_SPRITES {
            return;
        }
        self.sprites.push(Sprite {
            kind: SpriteKind::Ripple,
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            size: RIPPLE_START_SIZE,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            rotation: 0.0,
            spin: 0.0,
            born: now,
            expires: now + RIPPLE_DURATION,
        });
    }

    /// `count` tinted flakes falling from the top edge across `width`.
    pub fn spawn_confetti(&mut self, count: usize, width: f32, now: f32) {
        for _ in 0..count {
            if self.sprites.len() >= MAX_SPRITES {
                break;
            }
            let [r, g, b] = CONFETTI_COLORS[self.rng.index(CONFETTI_COLORS.len())];
            self.sprites.push(Sprite {
                kind: SpriteKind::Confetti,
                position: Vec2::new(self.rng.range(0.0, width), self.rng.range(-40.0, -8.0)),
                velocity: Vec2::new(self.rng.range(-0.6, 0.6), self.rng.range(1.2, 3.0)),
                size: self.rng.range(4.0, 8.0),
                color: Vec4::new(r, g, b, 1.0),
                rotation: self.rng.range(0.0, TAU),
                spin: self.rng.range(-0.25, 0.25),
                born: now,
                expires: now + CONFETTI_DURATION,
            });
        }
    }

    /// `count` fast droplets falling from the top edge across `width`.
    pub fn spawn_rain(&mut self, count: usize, width: f32, now: f32) {
        for _ in 0..count {
            if self.sprites.len() >= MAX_SPRITES {
                break;
            }
            self.sprites.push(Sprite {
                kind: SpriteKind::Rain,
                position: Vec2::new(self.rng.range(0.0, width), self.rng.range(-60.0, -10.0)),
                velocity: Vec2::new(self.rng.range(-0.2, 0.2), self.rng.range(4.0, 7.0)),
                size: self.rng.range(2.0, 3.5),
                color: RAIN_COLOR,
                rotation: 0.0,
                spin: 0.0,
                born: now,
                expires: now + RAIN_DURATION,
            });
        }
    }

    /// Drop sprites past their deadline and advance the rest one step.
    pub fn update(&mut self, now: f32) {
        self.sprites.retain(|s| now < s.expires);
        for sprite in &mut self.sprites {
            sprite.position += sprite.velocity;
            sprite.rotation += sprite.spin;
        }
    }

    /// Collect render instances for the current frame.
    pub fn instances(&self, now: f32, out: &mut Vec<Instance>) {
        for sprite in &self.sprites {
            let progress = sprite.progress(now);
            let (size, alpha) = match sprite.kind {
                SpriteKind::Ripple => (
                    RIPPLE_START_SIZE + (RIPPLE_END_SIZE - RIPPLE_START_SIZE) * progress,
                    (1.0 - progress) * 0.35,
                ),
                // Flakes and drops hold full opacity until the final quarter.
                SpriteKind::Confetti | SpriteKind::Rain => {
                    (sprite.size, ((1.0 - progress) / 0.25).min(1.0))
                }
            };
            out.push(Instance {
                pos_size: [sprite.position.x, sprite.position.y, size, sprite.rotation],
                color: [
                    sprite.color.x,
                    sprite.color.y,
                    sprite.color.z,
                    sprite.color.w * alpha,
                ],
            });
        }
    }

    /// Number of currently live sprites.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.sprites.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprites_expire_at_their_deadline() {
        let mut overlay = OverlayEffects::new(Some(4));
        overlay.spawn_confetti(10, 800.0, 0.0);
        assert_eq!(overlay.live_count(), 10);

        overlay.update(CONFETTI_DURATION - 0.01);
        assert_eq!(overlay.live_count(), 10);

        overlay.update(CONFETTI_DURATION);
        assert_eq!(overlay.live_count(), 0);
    }

    #[test]
    fn live_count_is_capped() {
        let mut overlay = OverlayEffects::new(Some(4));
        overlay.spawn_confetti(MAX_SPRITES * 2, 800.0, 0.0);
        assert_eq!(overlay.live_count(), MAX_SPRITES);

        overlay.spawn_ripple(10.0, 10.0, 0.0);
        assert_eq!(overlay.live_count(), MAX_SPRITES);
    }

    #[test]
    fn ripple_expands_and_fades() {
        let mut overlay = OverlayEffects::new(Some(4));
        overlay.spawn_ripple(100.0, 100.0, 0.0);

        let mut early = Vec::new();
        overlay.instances(RIPPLE_DURATION * 0.25, &mut early);
        let mut late = Vec::new();
        overlay.instances(RIPPLE_DURATION * 0.75, &mut late);

        assert!(late[0].pos_size[2] > early[0].pos_size[2]);
        assert!(late[0].color[3] < early[0].color[3]);
    }

    #[test]
    fn rain_falls_downward() {
        let mut overlay = OverlayEffects::new(Some(4));
        overlay.spawn_rain(5, 800.0, 0.0);

        let before: Vec<f32> = overlay.sprites.iter().map(|s| s.position.y).collect();
        overlay.update(0.1);
        for (sprite, y0) in overlay.sprites.iter().zip(before) {
            assert!(sprite.position.y > y0);
        }
    }

    #[test]
    fn mixed_kinds_expire_independently() {
        let mut overlay = OverlayEffects::new(Some(4));
        overlay.spawn_rain(3, 800.0, 0.0);
        overlay.spawn_confetti(3, 800.0, 0.0);

        overlay.update(RAIN_DURATION + 0.01);
        assert_eq!(overlay.live_count(), 3);
    }
}
