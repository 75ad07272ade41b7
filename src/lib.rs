//! Parachute Pilot - a scrolling parachute arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, weather, power-ups, recycling)
//! - `scene`: Scene controller (menu, help, birthday, game, sierra)
//! - `renderer`: Draw-list builder and Canvas 2D backend
//! - `audio`: Tone synthesis sink
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Headless pilot for native smoke runs

pub mod audio;
pub mod autopilot;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use scene::{Scene, SceneController, Snapshot};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Playfield geometry constants
pub mod consts {
    /// Canvas dimensions
    pub const VIEW_WIDTH: f32 = 480.0;
    pub const VIEW_HEIGHT: f32 = 320.0;
    /// Touching this line ends the run (16px above the canvas bottom)
    pub const GROUND_Y: f32 = 304.0;

    /// Player spawn and size
    pub const PLAYER_START_X: f32 = 240.0;
    pub const PLAYER_START_Y: f32 = 60.0;
    pub const PLAYER_WIDTH: f32 = 16.0;
    pub const PLAYER_HEIGHT: f32 = 18.0;

    /// Obstacle ring
    pub const OBSTACLE_SLOTS: usize = 6;
    pub const OBSTACLE_SPACING: f32 = 120.0;
    pub const OBSTACLE_WRAP: f32 = OBSTACLE_SPACING * OBSTACLE_SLOTS as f32;

    /// Background layers
    pub const CLOUD_COUNT: usize = 8;
    pub const CLOUD_SPACING: f32 = 80.0;
    pub const CLOUD_EXIT_X: f32 = -60.0;
    pub const HILL_COUNT: usize = 6;
    pub const HILL_WIDTH: f32 = 160.0;
    pub const HILL_SPEED: f32 = 1.0;

    /// Sierra decorations
    pub const MOUNTAIN_COUNT: usize = 5;
    pub const MOUNTAIN_WIDTH: f32 = 160.0;
    pub const BIRD_COUNT: usize = 6;
    pub const BIRD_EXIT_X: f32 = 500.0;

    /// Power-up pickups are square
    pub const POWER_UP_SIZE: f32 = 12.0;

    /// Particles spawn just above the view and die below it
    pub const PARTICLE_SPAWN_Y: f32 = -10.0;
    pub const PARTICLE_KILL_Y: f32 = VIEW_HEIGHT;

    /// Birthday celebration
    pub const CONFETTI_COUNT: usize = 150;
    pub const CONFETTI_KILL_Y: f32 = 340.0;
    pub const BIRTHDAY_DURATION_MS: f64 = 4000.0;

    /// Score is displayed in tenths of ticks
    pub const SCORE_DIVISOR: u64 = 10;
}
