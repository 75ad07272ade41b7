//! World state and core simulation types
//!
//! Every collection the renderer reads lives on [`World`]. Background layers
//! and the obstacle ring are fixed-size arrays recycled in place; only
//! particles and power-ups grow and shrink.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::factory;
use crate::consts::*;
use crate::tuning::Tuning;

/// A colour in HSL space (hue degrees, saturation/lightness percent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// CSS `hsl()` string
    pub fn css(&self) -> String {
        format!("hsl({:.1},{:.1}%,{:.1}%)", self.h, self.s, self.l)
    }
}

/// Timed status effects; only one can be active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerKind {
    /// Slow fall
    Feather,
    /// Obstacles are passed through
    Shield,
    /// Calms the wind
    Stabilizer,
}

impl PowerKind {
    pub const ALL: [PowerKind; 3] = [PowerKind::Feather, PowerKind::Shield, PowerKind::Stabilizer];

    pub fn name(&self) -> &'static str {
        match self {
            PowerKind::Feather => "feather",
            PowerKind::Shield => "shield",
            PowerKind::Stabilizer => "stabilizer",
        }
    }

    /// Pickup and glow colour
    pub fn color(&self) -> &'static str {
        match self {
            PowerKind::Feather => "#ffd166",
            PowerKind::Shield => "#06d6a0",
            PowerKind::Stabilizer => "#118ab2",
        }
    }
}

/// The parachutist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Render-only lean, clamp(vx * 0.1, -1, 1)
    pub tilt: f32,
    pub power: Option<PowerKind>,
    /// Ticks left on the active power
    pub power_ticks: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            tilt: 0.0,
            power: None,
            power_ticks: 0,
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Activate a power, replacing whatever was running
    pub fn grant_power(&mut self, kind: PowerKind, ticks: u32) {
        self.power = Some(kind);
        self.power_ticks = ticks;
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    Building,
}

/// A ground obstacle, one slot of the scrolling ring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
    pub color: Hsl,
}

impl Obstacle {
    pub fn new(pos: Vec2, size: Vec2, kind: ObstacleKind, color: Hsl) -> Self {
        debug_assert!(size.x >= 0.0 && size.y >= 0.0, "negative obstacle size {size}");
        Self {
            pos,
            size,
            kind,
            color,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Right edge has passed the left side of the view
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Decorative cloud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub speed: f32,
    pub shade: Hsl,
}

/// Decorative hill, 160 units wide
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hill {
    pub x: f32,
    pub height: f32,
    pub color: Hsl,
}

/// Weather particle kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Drifts with the wind
    Rain,
    /// Sways on a sine wave offset by `phase`
    Snow { phase: f32 },
}

/// A rain drop or snow flake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    /// Fall speed per tick
    pub fall: f32,
}

/// A floating pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
}

impl PowerUp {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Weather modes, visited in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Clear,
    Windy,
    Rain,
    Storm,
    Snow,
    Night,
}

impl Weather {
    pub const CYCLE: [Weather; 6] = [
        Weather::Clear,
        Weather::Windy,
        Weather::Rain,
        Weather::Storm,
        Weather::Snow,
        Weather::Night,
    ];

    /// Next state in the fixed cycle
    pub fn next(self) -> Self {
        match self {
            Weather::Clear => Weather::Windy,
            Weather::Windy => Weather::Rain,
            Weather::Rain => Weather::Storm,
            Weather::Storm => Weather::Snow,
            Weather::Snow => Weather::Night,
            Weather::Night => Weather::Clear,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Windy => "windy",
            Weather::Rain => "rain",
            Weather::Storm => "storm",
            Weather::Snow => "snow",
            Weather::Night => "night",
        }
    }

    pub fn is_raining(&self) -> bool {
        matches!(self, Weather::Rain | Weather::Storm)
    }
}

/// Weather mode plus its countdowns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherState {
    pub current: Weather,
    /// Ticks spent in the current mode
    pub timer: u32,
    /// Lightning flash ticks remaining (storm only)
    pub lightning: u32,
}

impl WeatherState {
    pub fn new(current: Weather) -> Self {
        Self {
            current,
            timer: 0,
            lightning: 0,
        }
    }
}

/// Wind, eased toward a target that is re-rolled now and then
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Wind {
    pub current: f32,
    pub target: f32,
}

/// Values ramped up as the run goes on
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Difficulty {
    pub obstacle_speed: f32,
    pub power_up_chance: f32,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacle_speed: tuning.obstacle_speed,
            power_up_chance: tuning.power_up_chance,
        }
    }
}

/// Background layer the run is played over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Biome {
    Meadow,
    Sierra,
}

impl Biome {
    /// Weather a fresh run starts in
    pub fn initial_weather(&self) -> Weather {
        match self {
            Biome::Meadow => Weather::Clear,
            Biome::Sierra => Weather::Snow,
        }
    }
}

/// Distant mountain (sierra)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mountain {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub color: Hsl,
}

/// Gliding bird (sierra)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    pub vx: f32,
}

/// Sierra-only decorations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SierraScenery {
    pub mountains: [Mountain; MOUNTAIN_COUNT],
    pub birds: [Bird; BIRD_COUNT],
}

/// The complete simulation state, owned by the scene controller
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub biome: Biome,
    pub player: Player,
    pub obstacles: [Obstacle; OBSTACLE_SLOTS],
    pub clouds: [Cloud; CLOUD_COUNT],
    pub hills: [Hill; HILL_COUNT],
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    pub weather: WeatherState,
    pub wind: Wind,
    pub difficulty: Difficulty,
    pub sierra: Option<SierraScenery>,
    /// Ticks survived this run
    pub score: u64,
    /// Simulation tick counter
    pub frame: u64,
    pub game_over: bool,
    /// Ticks since the last music note
    pub music_ticks: u32,
}

impl World {
    /// Create a meadow world with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let obstacles = factory::obstacle_ring(&mut rng);
        let clouds = std::array::from_fn(|i| {
            factory::cloud(&mut rng, i as f32 * CLOUD_SPACING)
        });
        let hills = std::array::from_fn(|i| factory::hill(&mut rng, i as f32 * HILL_WIDTH));
        let difficulty = Difficulty::new(&tuning);
        Self {
            seed,
            rng,
            tuning,
            biome: Biome::Meadow,
            player: Player::default(),
            obstacles,
            clouds,
            hills,
            particles: Vec::new(),
            power_ups: Vec::new(),
            weather: WeatherState::new(Weather::Clear),
            wind: Wind::default(),
            difficulty,
            sierra: None,
            score: 0,
            frame: 0,
            game_over: false,
            music_ticks: 0,
        }
    }

    /// Full reset into a fresh run over `biome`
    ///
    /// The RNG stream carries on so consecutive runs differ.
    pub fn reset(&mut self, biome: Biome) {
        let rng = &mut self.rng;
        self.obstacles = factory::obstacle_ring(rng);
        self.clouds = std::array::from_fn(|i| factory::cloud(rng, i as f32 * CLOUD_SPACING));
        self.hills = std::array::from_fn(|i| factory::hill(rng, i as f32 * HILL_WIDTH));
        self.sierra = match biome {
            Biome::Meadow => None,
            Biome::Sierra => Some(factory::sierra_scenery(rng)),
        };

        self.biome = biome;
        self.player = Player::default();
        self.particles.clear();
        self.power_ups.clear();
        self.weather = WeatherState::new(biome.initial_weather());
        self.wind = Wind::default();
        self.difficulty = Difficulty::new(&self.tuning);
        self.score = 0;
        self.frame = 0;
        self.game_over = false;
        self.music_ticks = 0;

        log::info!("Run reset ({:?}, seed {})", biome, self.seed);
    }

    /// Score as shown on the HUD
    pub fn display_score(&self) -> u64 {
        self.score / SCORE_DIVISOR
    }

    /// Check structural invariants (debug builds only)
    pub fn debug_validate(&self) {
        debug_assert!(
            self.obstacles.iter().all(|o| o.size.x >= 0.0 && o.size.y >= 0.0),
            "obstacle with negative size"
        );
        debug_assert!(
            self.weather.lightning <= self.tuning.lightning_ticks,
            "lightning countdown out of range"
        );
        debug_assert!(
            self.player.power.is_some() || self.player.power_ticks == 0,
            "power timer running without a power"
        );
        debug_assert!(
            self.power_ups.iter().all(|p| !p.collected),
            "collected power-up survived the sweep"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_layout() {
        let world = World::new(7, Tuning::default());
        assert_eq!(world.obstacles.len(), OBSTACLE_SLOTS);
        for (i, o) in world.obstacles.iter().enumerate() {
            assert_eq!(o.pos.x, 480.0 + 120.0 * i as f32);
            assert!((o.pos.y + o.size.y - VIEW_HEIGHT).abs() < 1e-3);
        }
        assert_eq!(world.clouds[3].pos.x, 240.0);
        assert_eq!(world.hills[5].x, 800.0);
        assert_eq!(world.weather.current, Weather::Clear);
        assert!(!world.game_over);
    }

    #[test]
    fn test_weather_cycle_order() {
        let mut w = Weather::Clear;
        for expected in Weather::CYCLE.iter().cycle().skip(1).take(6) {
            w = w.next();
            assert_eq!(w, *expected);
        }
        assert_eq!(w, Weather::Clear);
    }

    #[test]
    fn test_reset_sierra_starts_snowing() {
        let mut world = World::new(3, Tuning::default());
        world.score = 500;
        world.frame = 500;
        world.game_over = true;
        world.player.grant_power(PowerKind::Shield, 10);

        world.reset(Biome::Sierra);
        assert_eq!(world.weather.current, Weather::Snow);
        assert!(world.sierra.is_some());
        assert_eq!(world.score, 0);
        assert_eq!(world.frame, 0);
        assert!(!world.game_over);
        assert_eq!(world.player.power, None);

        world.reset(Biome::Meadow);
        assert_eq!(world.weather.current, Weather::Clear);
        assert!(world.sierra.is_none());
    }

    #[test]
    fn test_hsl_css() {
        assert_eq!(Hsl::new(100.0, 50.0, 30.0).css(), "hsl(100.0,50.0%,30.0%)");
    }
}
