//! Per-frame simulation tick
//!
//! One call advances every sub-system in a fixed order. Later phases read
//! what earlier ones wrote (collision sees post-scroll positions), so the
//! order below is part of the game's behavior.

use super::biome;
use super::collision::overlaps_any;
use super::events::SoundEvent;
use super::factory;
use super::physics::{PhysicsOutcome, step_player};
use super::powerup;
use super::recycle;
use super::state::{Obstacle, PowerKind, Weather, World};
use super::weather;
use crate::input::HeldKeys;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement keys held this tick
    pub keys: HeldKeys,
    /// Whether background music notes should be emitted
    pub music: bool,
}

/// Advance the world by one tick, queueing any sounds into `events`
///
/// A finished run is frozen: nothing moves until the world is reset.
pub fn tick(world: &mut World, input: &TickInput, events: &mut Vec<SoundEvent>) {
    if world.game_over {
        return;
    }

    world.frame += 1;
    world.score += 1;
    recycle::ramp_difficulty(&mut world.difficulty, world.frame, &world.tuning);

    // Wind and power timers feed the physics step
    weather::update_wind(world);
    powerup::apply_power_effects(world);

    let outcome = step_player(&mut world.player, &input.keys, world.wind.current, &world.tuning);
    if outcome == PhysicsOutcome::Landed {
        end_run(world, events);
        return;
    }

    if weather::update_weather(world) == Some(Weather::Windy) {
        events.push(factory::wind_gust(&mut world.rng));
    }

    powerup::update_power_ups(world, events);

    // Recycling
    recycle::scroll_clouds(&mut world.clouds, &mut world.rng);
    recycle::scroll_hills(&mut world.hills, &mut world.rng);
    recycle::scroll_obstacles(
        &mut world.obstacles,
        world.difficulty.obstacle_speed,
        &mut world.rng,
    );
    recycle::tint_terrain(&mut world.hills, &mut world.obstacles, world.frame);
    if let Some(scenery) = world.sierra.as_mut() {
        biome::update_sierra(scenery, world.frame, &mut world.rng);
    }

    // Collision, against post-scroll positions
    if obstacle_hit(world) {
        end_run(world, events);
        return;
    }

    powerup::maybe_spawn_power_up(world);

    world.music_ticks += 1;
    if world.music_ticks >= world.tuning.music_interval_ticks {
        world.music_ticks = 0;
        if input.music {
            events.push(SoundEvent::Note(factory::music_note(&mut world.rng)));
        }
    }

    world.debug_validate();
}

/// True if the player overlaps an obstacle and is not shielded
pub fn obstacle_hit(world: &World) -> bool {
    if world.player.power == Some(PowerKind::Shield) {
        return false;
    }
    overlaps_any(
        &world.player.bounds(),
        world.obstacles.iter().map(Obstacle::bounds),
    )
}

/// Mark the run as over; only the first call has any effect
pub fn end_run(world: &mut World, events: &mut Vec<SoundEvent>) {
    if world.game_over {
        return;
    }
    world.game_over = true;
    events.push(SoundEvent::Crash);
    log::info!(
        "Game over at frame {} (score {})",
        world.frame,
        world.display_score()
    );
}
