//! Power-up lifecycle: spawn, pickup, timed effect, expiry

use super::events::SoundEvent;
use super::factory::{self, chance};
use super::state::{PowerKind, World};

/// Count down the active power and apply its per-tick side effects
///
/// Returns the power that expired this tick, if any.
pub fn apply_power_effects(world: &mut World) -> Option<PowerKind> {
    let player = &mut world.player;
    let mut expired = None;
    if player.power_ticks > 0 {
        player.power_ticks -= 1;
        if player.power_ticks == 0 {
            expired = player.power.take();
            if let Some(kind) = expired {
                log::debug!("Power expired: {}", kind.name());
            }
        }
    }

    if player.power == Some(PowerKind::Stabilizer) {
        world.wind.current *= world.tuning.stabilizer_wind_damping;
    }
    expired
}

/// Scroll pickups, collect the ones the player touches, sweep the rest
///
/// Returns the kind collected this tick, if any.
pub fn update_power_ups(world: &mut World, events: &mut Vec<SoundEvent>) -> Option<PowerKind> {
    let speed = world.difficulty.obstacle_speed;
    let mut picked = None;
    for pickup in world.power_ups.iter_mut() {
        pickup.pos.x -= speed;
        if world.player.bounds().overlaps(&pickup.bounds()) {
            world
                .player
                .grant_power(pickup.kind, world.tuning.power_duration_ticks);
            pickup.collected = true;
            events.push(SoundEvent::Power);
            log::debug!("Picked up {}", pickup.kind.name());
            picked = Some(pickup.kind);
        }
    }
    world
        .power_ups
        .retain(|p| !p.collected && p.pos.x + p.size.x >= 0.0);
    picked
}

/// Roll for a new pickup at the right edge
pub fn maybe_spawn_power_up(world: &mut World) -> bool {
    if chance(&mut world.rng, world.difficulty.power_up_chance) {
        world.power_ups.push(factory::power_up(&mut world.rng));
        true
    } else {
        false
    }
}
