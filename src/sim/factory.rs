//! Entity factory
//!
//! All randomized attribute generation goes through here so that a seeded
//! RNG reproduces a run exactly. Each function returns a fully initialized
//! record; recycling overwrites a slot with a fresh one.

use glam::Vec2;
use rand::Rng;

use super::biome::{Balloon, Confetti};
use super::events::{MUSIC_NOTE_SECS, MUSIC_NOTES, SoundEvent, Tone, Waveform};
use super::state::{
    Bird, Cloud, Hill, Hsl, Mountain, Obstacle, ObstacleKind, Particle, ParticleKind, PowerKind,
    PowerUp, SierraScenery,
};
use crate::consts::*;

/// Roll a per-tick probability; chances above 1.0 always succeed
#[inline]
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f32) -> bool {
    rng.random::<f32>() < p
}

/// Obstacle with a random kind whose left edge sits at `x`
pub fn obstacle<R: Rng + ?Sized>(rng: &mut R, x: f32) -> Obstacle {
    let kind = if chance(rng, 0.6) {
        ObstacleKind::Tree
    } else {
        ObstacleKind::Building
    };
    let (width, height, color): (f32, f32, Hsl) = match kind {
        ObstacleKind::Tree => (
            14.0,
            rng.random_range(40.0..60.0),
            Hsl::new(rng.random_range(100.0..120.0), 50.0, 30.0),
        ),
        ObstacleKind::Building => (
            24.0,
            rng.random_range(70.0..120.0),
            Hsl::new(
                rng.random_range(210.0..220.0),
                15.0,
                rng.random_range(40.0..60.0),
            ),
        ),
    };
    Obstacle::new(
        Vec2::new(x, VIEW_HEIGHT - height),
        Vec2::new(width, height),
        kind,
        color,
    )
}

/// The canonical starting ring: slot i at 480 + 120 * i
pub fn obstacle_ring<R: Rng + ?Sized>(rng: &mut R) -> [Obstacle; OBSTACLE_SLOTS] {
    std::array::from_fn(|i| obstacle(rng, VIEW_WIDTH + i as f32 * OBSTACLE_SPACING))
}

pub fn cloud<R: Rng + ?Sized>(rng: &mut R, x: f32) -> Cloud {
    Cloud {
        pos: Vec2::new(x, rng.random_range(20.0..80.0)),
        speed: rng.random_range(0.4..0.7),
        shade: Hsl::new(
            rng.random_range(190.0..200.0),
            60.0,
            rng.random_range(85.0..95.0),
        ),
    }
}

/// Re-entry point for a cloud that drifted off the left edge
pub fn cloud_reentry_x<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    VIEW_WIDTH + rng.random_range(0.0..40.0_f32)
}

pub fn hill_height<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(40.0..70.0)
}

pub fn hill<R: Rng + ?Sized>(rng: &mut R, x: f32) -> Hill {
    Hill {
        x,
        height: hill_height(rng),
        color: Hsl::new(rng.random_range(100.0..120.0), 40.0, 35.0),
    }
}

pub fn rain<R: Rng + ?Sized>(rng: &mut R) -> Particle {
    Particle {
        kind: ParticleKind::Rain,
        pos: Vec2::new(rng.random_range(0.0..VIEW_WIDTH), PARTICLE_SPAWN_Y),
        fall: rng.random_range(3.0..5.0),
    }
}

pub fn snow<R: Rng + ?Sized>(rng: &mut R) -> Particle {
    Particle {
        kind: ParticleKind::Snow {
            phase: rng.random_range(-1.0..1.0),
        },
        pos: Vec2::new(rng.random_range(0.0..VIEW_WIDTH), PARTICLE_SPAWN_Y),
        fall: rng.random_range(0.5..1.5),
    }
}

/// Pickup entering at the right edge with a uniformly chosen kind
pub fn power_up<R: Rng + ?Sized>(rng: &mut R) -> PowerUp {
    let kind = PowerKind::ALL[rng.random_range(0..PowerKind::ALL.len())];
    PowerUp {
        kind,
        pos: Vec2::new(VIEW_WIDTH, rng.random_range(80.0..260.0)),
        size: Vec2::splat(POWER_UP_SIZE),
        collected: false,
    }
}

/// New wind target in ±range/2
pub fn wind_target<R: Rng + ?Sized>(rng: &mut R, range: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * range
}

pub fn wind_gust<R: Rng + ?Sized>(rng: &mut R) -> SoundEvent {
    SoundEvent::Wind {
        freq: rng.random_range(220.0..280.0),
    }
}

pub fn music_note<R: Rng + ?Sized>(rng: &mut R) -> Tone {
    let freq = MUSIC_NOTES[rng.random_range(0..MUSIC_NOTES.len())];
    Tone::new(freq, MUSIC_NOTE_SECS, Waveform::Sine)
}

pub fn mountain_height<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(60.0..100.0)
}

pub fn mountain<R: Rng + ?Sized>(rng: &mut R, x: f32) -> Mountain {
    Mountain {
        x,
        width: MOUNTAIN_WIDTH,
        height: mountain_height(rng),
        color: Hsl::new(rng.random_range(220.0..230.0), 40.0, 45.0),
    }
}

pub fn bird_altitude<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(80.0..180.0)
}

pub fn bird<R: Rng + ?Sized>(rng: &mut R) -> Bird {
    Bird {
        pos: Vec2::new(rng.random_range(0.0..VIEW_WIDTH), bird_altitude(rng)),
        vx: rng.random_range(0.6..0.9),
    }
}

pub fn sierra_scenery<R: Rng + ?Sized>(rng: &mut R) -> SierraScenery {
    SierraScenery {
        mountains: std::array::from_fn(|i| mountain(rng, i as f32 * MOUNTAIN_WIDTH)),
        birds: std::array::from_fn(|_| bird(rng)),
    }
}

/// Balloon launched from the bottom-left of the title screen
pub fn balloon() -> Balloon {
    Balloon {
        pos: Vec2::new(-20.0, 260.0),
        vy: -0.3,
        active: true,
    }
}

pub fn confetti<R: Rng + ?Sized>(rng: &mut R) -> Confetti {
    Confetti {
        pos: Vec2::new(
            rng.random_range(0.0..VIEW_WIDTH),
            rng.random_range(0.0..VIEW_HEIGHT),
        ),
        vel: Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-3.0..0.0)),
        color: Hsl::new(rng.random_range(0.0..360.0), 80.0, 60.0),
    }
}
