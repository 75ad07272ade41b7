//! Scene decorations that do not affect gameplay
//!
//! Sierra mountains and birds, plus the title screen balloon and the
//! birthday confetti.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::factory;
use super::state::{Hsl, SierraScenery};
use crate::consts::*;

/// Scroll the mountain range and let the flock glide
pub fn update_sierra<R: Rng + ?Sized>(scenery: &mut SierraScenery, frame: u64, rng: &mut R) {
    let ring = MOUNTAIN_WIDTH * scenery.mountains.len() as f32;
    for mountain in scenery.mountains.iter_mut() {
        mountain.x -= 1.0;
        if mountain.x + mountain.width < 0.0 {
            mountain.x += ring;
            mountain.height = factory::mountain_height(rng);
        }
    }

    let t = frame as f32 / 30.0;
    for bird in scenery.birds.iter_mut() {
        bird.pos.x += bird.vx;
        bird.pos.y += (t + bird.pos.x / 50.0).sin() * 0.2;
        if bird.pos.x > BIRD_EXIT_X {
            bird.pos.x = -rng.random_range(0.0..50.0_f32);
            bird.pos.y = factory::bird_altitude(rng);
        }
    }
}

/// The purple balloon drifting across the title screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balloon {
    pub pos: Vec2,
    pub vy: f32,
    pub active: bool,
}

impl Default for Balloon {
    fn default() -> Self {
        Self {
            pos: Vec2::new(-50.0, 200.0),
            vy: -0.3,
            active: false,
        }
    }
}

/// How a balloon flight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalloonExit {
    /// Reached the top of its climb
    Summit,
    /// Drifted off the right edge
    Drifted,
}

impl Balloon {
    /// Launch chance per tick while idle
    pub const LAUNCH_CHANCE: f32 = 0.002;
    pub const DRIFT: f32 = 0.5;
    pub const SUMMIT_Y: f32 = 40.0;

    /// Move the balloon, launching it now and then
    ///
    /// Returns how the flight ended on the tick it ends.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<BalloonExit> {
        if !self.active {
            if factory::chance(rng, Self::LAUNCH_CHANCE) {
                *self = factory::balloon();
            }
            return None;
        }
        self.pos.x += Self::DRIFT;
        self.pos.y += self.vy;
        if self.pos.x > BIRD_EXIT_X {
            self.active = false;
            Some(BalloonExit::Drifted)
        } else if self.pos.y < Self::SUMMIT_Y {
            self.active = false;
            Some(BalloonExit::Summit)
        } else {
            None
        }
    }
}

/// One confetti piece
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confetti {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Hsl,
}

/// Fall under light gravity; pieces below the view are dropped
pub fn update_confetti(confetti: &mut Vec<Confetti>) {
    for piece in confetti.iter_mut() {
        piece.pos += piece.vel;
        piece.vel.y += 0.02;
    }
    confetti.retain(|c| c.pos.y < CONFETTI_KILL_Y);
}

pub fn burst_confetti<R: Rng + ?Sized>(rng: &mut R) -> Vec<Confetti> {
    (0..CONFETTI_COUNT).map(|_| factory::confetti(rng)).collect()
}
