//! Scene controller
//!
//! Owns the [`World`] and decides, once per rendered frame, which scene is
//! live and what that frame does: menu decorations, the birthday countdown or
//! one simulation tick. Game and sierra share the same tick pipeline and only
//! differ in biome.

use serde::{Deserialize, Serialize};

use crate::audio::SoundSink;
use crate::consts::BIRTHDAY_DURATION_MS;
use crate::input::{FrameInput, Key};
use crate::settings::Settings;
use crate::sim::biome::{self, Balloon, BalloonExit, Confetti};
use crate::sim::{
    Biome, Cloud, Hill, Obstacle, Particle, Player, PowerUp, SierraScenery, SoundEvent,
    TickInput, Weather, World, tick, weather,
};
use crate::tuning::Tuning;

/// Top-level mode; exactly one is live at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    /// Title screen (help overlay is a flag on top of it)
    Menu,
    /// Confetti celebration, returns to the menu on its own
    Birthday,
    /// Meadow run
    Game,
    /// Mountain run
    Sierra,
}

impl Scene {
    /// Biome simulated by this scene, if it runs the world at all
    pub fn biome(self) -> Option<Biome> {
        match self {
            Scene::Game => Some(Biome::Meadow),
            Scene::Sierra => Some(Biome::Sierra),
            Scene::Menu | Scene::Birthday => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scene::Menu => "menu",
            Scene::Birthday => "birthday",
            Scene::Game => "game",
            Scene::Sierra => "sierra",
        }
    }
}

/// Title screen decorations
#[derive(Debug, Clone, Default)]
struct MenuState {
    frame: u64,
    balloon: Balloon,
    confetti: Vec<Confetti>,
    birthday_remaining_ms: f64,
    birthday_seen: bool,
}

/// Drives scenes and owns all mutable game state
pub struct SceneController {
    scene: Scene,
    help_visible: bool,
    world: World,
    settings: Settings,
    menu: MenuState,
    /// Sounds queued since the last drain
    sounds: Vec<SoundEvent>,
}

impl SceneController {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        log::info!("Scene controller ready (seed {})", seed);
        Self {
            scene: Scene::Menu,
            help_visible: false,
            world: World::new(seed, tuning),
            settings,
            menu: MenuState::default(),
            sounds: Vec::new(),
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Advance one rendered frame
    pub fn frame(&mut self, input: &FrameInput) {
        match self.scene {
            Scene::Menu => self.menu_frame(input),
            Scene::Birthday => self.birthday_frame(input.dt_ms),
            Scene::Game | Scene::Sierra => self.run_frame(input),
        }
    }

    fn menu_frame(&mut self, input: &FrameInput) {
        for key in &input.pressed {
            match key {
                Key::Space => return self.start(Scene::Game),
                Key::Sierra => return self.start(Scene::Sierra),
                Key::Help => {
                    self.help_visible = !self.help_visible;
                    log::debug!("Help overlay: {}", self.help_visible);
                }
                Key::Music => {
                    let on = self.settings.toggle_music();
                    log::info!("Music {}", if on { "on" } else { "off" });
                }
                _ => {}
            }
        }

        self.menu.frame += 1;
        let exit = self.menu.balloon.update(&mut self.world.rng);
        if exit == Some(BalloonExit::Summit) && !self.menu.birthday_seen {
            self.trigger_birthday();
        }
    }

    fn birthday_frame(&mut self, dt_ms: f64) {
        biome::update_confetti(&mut self.menu.confetti);
        self.menu.birthday_remaining_ms -= dt_ms.max(0.0);
        if self.menu.birthday_remaining_ms <= 0.0 {
            self.menu.confetti.clear();
            self.menu.birthday_remaining_ms = 0.0;
            self.scene = Scene::Menu;
            log::info!("Birthday over, back to menu");
        }
    }

    fn run_frame(&mut self, input: &FrameInput) {
        if self.world.game_over {
            if input.was_pressed(Key::Space) {
                self.start(self.scene);
            }
            return;
        }
        let tick_input = TickInput {
            keys: input.held,
            music: self.settings.music_enabled,
        };
        tick(&mut self.world, &tick_input, &mut self.sounds);
    }

    /// Enter a playable scene with a freshly reset world
    fn start(&mut self, scene: Scene) {
        let Some(biome) = scene.biome() else {
            return;
        };
        self.world.reset(biome);
        self.help_visible = false;
        self.scene = scene;
        log::info!("Entering {}", scene.name());
    }

    /// Start the birthday celebration from the menu
    ///
    /// Returns false (and does nothing) outside the menu.
    pub fn trigger_birthday(&mut self) -> bool {
        if self.scene != Scene::Menu {
            return false;
        }
        self.menu.confetti = biome::burst_confetti(&mut self.world.rng);
        self.menu.birthday_remaining_ms = BIRTHDAY_DURATION_MS;
        self.menu.birthday_seen = true;
        self.help_visible = false;
        self.scene = Scene::Birthday;
        self.sounds.push(SoundEvent::Birthday);
        log::info!("Happy birthday!");
        true
    }

    /// Hand every queued sound to `sink`
    pub fn drain_sounds<S: SoundSink + ?Sized>(&mut self, sink: &mut S) {
        for event in self.sounds.drain(..) {
            sink.play(event);
        }
    }

    /// Read-only view of this frame for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        let world = &self.world;
        let flash = if self.settings.effective_lightning() {
            weather::lightning_alpha(world.weather.lightning, world.tuning.lightning_ticks)
        } else {
            0.0
        };
        Snapshot {
            scene: self.scene,
            help_visible: self.help_visible,
            music_enabled: self.settings.music_enabled,
            player: &world.player,
            obstacles: &world.obstacles,
            clouds: &world.clouds,
            hills: &world.hills,
            particles: &world.particles,
            power_ups: &world.power_ups,
            sierra: world.sierra.as_ref(),
            weather: world.weather.current,
            lightning_timer: world.weather.lightning,
            lightning_alpha: flash,
            score: world.display_score(),
            game_over: world.game_over,
            frame: world.frame,
            menu_frame: self.menu.frame,
            balloon: &self.menu.balloon,
            confetti: &self.menu.confetti,
        }
    }
}

/// Everything a renderer may look at for one frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub scene: Scene,
    pub help_visible: bool,
    pub music_enabled: bool,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub clouds: &'a [Cloud],
    pub hills: &'a [Hill],
    pub particles: &'a [Particle],
    pub power_ups: &'a [PowerUp],
    pub sierra: Option<&'a SierraScenery>,
    pub weather: Weather,
    /// Ticks left on the current lightning flash
    pub lightning_timer: u32,
    /// Overlay opacity derived from the timer, zero under reduced motion
    pub lightning_alpha: f32,
    /// Score as displayed (ticks / 10)
    pub score: u64,
    pub game_over: bool,
    /// Simulation tick of the current run
    pub frame: u64,
    pub menu_frame: u64,
    pub balloon: &'a Balloon,
    pub confetti: &'a [Confetti],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::input::HeldKeys;

    fn controller() -> SceneController {
        SceneController::new(2024, Tuning::default(), Settings::default())
    }

    fn press(keys: &[Key]) -> FrameInput {
        FrameInput {
            held: HeldKeys::default(),
            pressed: keys.to_vec(),
            dt_ms: 16.0,
        }
    }

    fn idle() -> FrameInput {
        press(&[])
    }

    #[test]
    fn test_space_starts_fresh_game() {
        let mut ctl = controller();
        for _ in 0..50 {
            ctl.frame(&idle());
        }
        ctl.frame(&press(&[Key::Space]));
        assert_eq!(ctl.scene(), Scene::Game);

        let world = ctl.world();
        assert_eq!(world.score, 0);
        assert_eq!(world.frame, 0);
        assert_eq!(world.biome, Biome::Meadow);
        for (i, o) in world.obstacles.iter().enumerate() {
            assert_eq!(o.pos.x, 480.0 + 120.0 * i as f32);
            assert!((o.pos.y + o.size.y - VIEW_HEIGHT).abs() < 1e-3);
        }
    }

    #[test]
    fn test_help_toggles_on_menu_only() {
        let mut ctl = controller();
        ctl.frame(&press(&[Key::Help]));
        assert!(ctl.help_visible());
        ctl.frame(&press(&[Key::Help]));
        assert!(!ctl.help_visible());

        ctl.frame(&press(&[Key::Help]));
        ctl.frame(&press(&[Key::Space]));
        assert!(!ctl.help_visible());
        ctl.frame(&press(&[Key::Help]));
        assert!(!ctl.help_visible());
        assert_eq!(ctl.scene(), Scene::Game);
    }

    #[test]
    fn test_sierra_starts_in_snow() {
        let mut ctl = controller();
        ctl.frame(&press(&[Key::Sierra]));
        assert_eq!(ctl.scene(), Scene::Sierra);
        let world = ctl.world();
        assert_eq!(world.weather.current, Weather::Snow);
        assert!(world.sierra.is_some());
        assert!(ctl.snapshot().sierra.is_some());
    }

    #[test]
    fn test_music_toggle() {
        let mut ctl = controller();
        ctl.frame(&press(&[Key::Music]));
        assert!(!ctl.settings().music_enabled);
        assert!(!ctl.snapshot().music_enabled);
        ctl.frame(&press(&[Key::Music]));
        assert!(ctl.settings().music_enabled);
    }

    #[test]
    fn test_menu_does_not_tick_world() {
        let mut ctl = controller();
        for _ in 0..10 {
            ctl.frame(&idle());
        }
        assert_eq!(ctl.world().frame, 0);
        assert_eq!(ctl.snapshot().menu_frame, 10);
    }

    #[test]
    fn test_restart_keeps_scene() {
        let mut ctl = controller();
        ctl.frame(&press(&[Key::Sierra]));
        while !ctl.world().game_over {
            ctl.frame(&idle());
        }
        let mut sink = Vec::new();
        ctl.drain_sounds(&mut sink);
        assert_eq!(sink.iter().filter(|e| **e == SoundEvent::Crash).count(), 1);

        let frozen = ctl.world().frame;
        ctl.frame(&idle());
        assert_eq!(ctl.world().frame, frozen);

        ctl.frame(&press(&[Key::Space]));
        assert_eq!(ctl.scene(), Scene::Sierra);
        assert!(!ctl.world().game_over);
        assert_eq!(ctl.world().score, 0);
        assert_eq!(ctl.world().weather.current, Weather::Snow);
    }

    #[test]
    fn test_birthday_returns_after_delay() {
        let mut ctl = controller();
        assert!(ctl.trigger_birthday());
        assert_eq!(ctl.scene(), Scene::Birthday);
        assert_eq!(ctl.snapshot().confetti.len(), CONFETTI_COUNT);

        let mut sink = Vec::new();
        ctl.drain_sounds(&mut sink);
        assert_eq!(sink, vec![SoundEvent::Birthday]);

        let step = FrameInput {
            dt_ms: 1000.0,
            ..idle()
        };
        for _ in 0..3 {
            ctl.frame(&step);
            assert_eq!(ctl.scene(), Scene::Birthday);
        }
        ctl.frame(&step);
        assert_eq!(ctl.scene(), Scene::Menu);
        assert!(ctl.snapshot().confetti.is_empty());
    }

    #[test]
    fn test_birthday_only_from_menu() {
        let mut ctl = controller();
        ctl.frame(&press(&[Key::Space]));
        assert!(!ctl.trigger_birthday());
        assert_eq!(ctl.scene(), Scene::Game);
    }

    #[test]
    fn test_balloon_summit_fires_birthday_once() {
        let mut ctl = controller();
        ctl.menu.balloon = Balloon {
            pos: glam::Vec2::new(100.0, Balloon::SUMMIT_Y + 0.1),
            vy: -0.3,
            active: true,
        };
        ctl.frame(&idle());
        assert_eq!(ctl.scene(), Scene::Birthday);

        ctl.frame(&FrameInput {
            dt_ms: BIRTHDAY_DURATION_MS,
            ..idle()
        });
        assert_eq!(ctl.scene(), Scene::Menu);

        ctl.menu.balloon.active = true;
        ctl.menu.balloon.pos.y = Balloon::SUMMIT_Y + 0.1;
        ctl.frame(&idle());
        assert_eq!(ctl.scene(), Scene::Menu);
    }

    #[test]
    fn test_held_keys_reach_player() {
        let mut ctl = controller();
        ctl.frame(&press(&[Key::Space]));
        let input = FrameInput {
            held: HeldKeys {
                right: true,
                ..Default::default()
            },
            ..idle()
        };
        ctl.frame(&input);
        assert!(ctl.world().player.vel.x > 0.0);
    }

    #[test]
    fn test_snapshot_lightning_timer_and_alpha() {
        let mut ctl = controller();
        ctl.frame(&press(&[Key::Space]));
        ctl.world.weather.lightning = 5;
        let snap = ctl.snapshot();
        assert_eq!(snap.lightning_timer, 5);
        assert!((snap.lightning_alpha - 0.5).abs() < 1e-6);

        let calm = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let mut ctl = SceneController::new(2024, Tuning::default(), calm);
        ctl.frame(&press(&[Key::Space]));
        ctl.world.weather.lightning = 5;
        let snap = ctl.snapshot();
        assert_eq!(snap.lightning_timer, 5);
        assert_eq!(snap.lightning_alpha, 0.0);
    }
}
