//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One `tick` per rendered frame, no wall-clock time
//! - Seeded RNG only (`World::rng`)
//! - Fixed-size entity rings, recycled in place
//! - No rendering, audio or platform dependencies

pub mod biome;
pub mod collision;
pub mod events;
pub mod factory;
pub mod physics;
pub mod powerup;
pub mod recycle;
pub mod state;
pub mod tick;
pub mod weather;

pub use biome::{Balloon, BalloonExit, Confetti};
pub use collision::Aabb;
pub use events::{SoundEvent, Tone, Waveform};
pub use physics::PhysicsOutcome;
pub use state::{
    Biome, Bird, Cloud, Difficulty, Hill, Hsl, Mountain, Obstacle, ObstacleKind, Particle,
    ParticleKind, Player, PowerKind, PowerUp, SierraScenery, Weather, WeatherState, Wind, World,
};
pub use tick::{TickInput, tick};
