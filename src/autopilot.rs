//! Headless autopilot
//!
//! Flies the parachutist without a browser: holds a cruising altitude above
//! the tallest obstacle, keeps to the middle of the view and restarts after
//! every crash. Used by the native binary to smoke-test a tuning.

use serde::Serialize;

use crate::audio::SoundSink;
use crate::consts::*;
use crate::input::{FrameInput, HeldKeys, Key};
use crate::renderer::Renderer;
use crate::scene::SceneController;
use crate::sim::{SoundEvent, Weather, World};

/// Top edge of the cruising band; every obstacle stays below y = 200
pub const CRUISE_Y: f32 = 110.0;
const DRIFT_MARGIN: f32 = 40.0;

/// Movement keys the pilot would hold this tick
pub fn steer(world: &World) -> HeldKeys {
    let player = &world.player;
    let center = VIEW_WIDTH / 2.0 - player.size.x / 2.0;
    HeldKeys {
        up: player.pos.y > CRUISE_Y,
        down: false,
        left: player.pos.x > center + DRIFT_MARGIN,
        right: player.pos.x < center - DRIFT_MARGIN,
    }
}

/// What happened during a headless session
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSummary {
    pub frames: u64,
    pub runs: u32,
    pub crashes: u32,
    pub best_score: u64,
    pub pickups: u32,
    pub weather_seen: Vec<Weather>,
}

/// Sink that tallies the events the summary cares about
#[derive(Default)]
struct Tally {
    crashes: u32,
    pickups: u32,
}

impl SoundSink for Tally {
    fn play(&mut self, event: SoundEvent) {
        match event {
            SoundEvent::Crash => self.crashes += 1,
            SoundEvent::Power => self.pickups += 1,
            _ => {}
        }
    }
}

/// Drive `controller` for `frames` frames at a nominal 60 fps
pub fn run_session<R: Renderer + ?Sized>(
    controller: &mut SceneController,
    renderer: &mut R,
    frames: u64,
) -> SessionSummary {
    let mut summary = SessionSummary::default();
    let mut tally = Tally::default();

    for _ in 0..frames {
        let world = controller.world();
        let mut input = FrameInput {
            held: HeldKeys::default(),
            pressed: Vec::new(),
            dt_ms: 1000.0 / 60.0,
        };
        if controller.scene().biome().is_none() || world.game_over {
            if world.game_over {
                summary.best_score = summary.best_score.max(world.display_score());
            }
            input.pressed.push(Key::Space);
            summary.runs += 1;
        } else {
            input.held = steer(world);
        }

        controller.frame(&input);
        controller.drain_sounds(&mut tally);
        renderer.render(&controller.snapshot());

        let world = controller.world();
        if !summary.weather_seen.contains(&world.weather.current) {
            summary.weather_seen.push(world.weather.current);
        }
        summary.best_score = summary.best_score.max(world.display_score());
        summary.frames += 1;
    }

    summary.crashes = tally.crashes;
    summary.pickups = tally.pickups;
    summary
}
