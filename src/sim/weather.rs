//! Weather state machine, wind and weather particles
//!
//! Weather advances through a fixed cycle on a timer. Rain and snow spawn
//! particles; storms roll for lightning. The renderer owns the flash itself,
//! this module only counts it down.

use super::factory::{self, chance};
use super::state::{Biome, ParticleKind, Weather, World};
use crate::consts::*;

/// Ease the wind toward its target, re-rolling the target now and then
pub fn update_wind(world: &mut World) {
    let tuning = &world.tuning;
    let wind = &mut world.wind;
    if chance(&mut world.rng, tuning.wind_retarget_chance) {
        wind.target = factory::wind_target(&mut world.rng, tuning.wind_range);
    }
    // Mountain gusts are stronger
    if world.biome == Biome::Sierra && chance(&mut world.rng, tuning.wind_retarget_chance) {
        wind.target = factory::wind_target(&mut world.rng, tuning.sierra_wind_range);
    }
    wind.current += (wind.target - wind.current) * tuning.wind_smoothing;
}

/// Advance the weather by one tick
///
/// Returns the new weather on the tick the cycle moves on.
pub fn update_weather(world: &mut World) -> Option<Weather> {
    let tuning = &world.tuning;
    let weather = &mut world.weather;

    let mut changed = None;
    weather.timer += 1;
    if weather.timer >= tuning.weather_period_ticks {
        weather.timer = 0;
        weather.current = weather.current.next();
        log::debug!("Weather -> {}", weather.current.name());
        changed = Some(weather.current);
    }

    // Spawn
    if weather.current.is_raining() {
        if chance(&mut world.rng, tuning.rain_chance) {
            world.particles.push(factory::rain(&mut world.rng));
        }
    } else if weather.current == Weather::Snow && chance(&mut world.rng, tuning.snow_chance) {
        world.particles.push(factory::snow(&mut world.rng));
    }

    // Move
    let sway_time = world.frame as f32 * 0.05;
    let gust = world.wind.current * 4.0;
    for particle in world.particles.iter_mut() {
        particle.pos.y += particle.fall;
        particle.pos.x += match particle.kind {
            ParticleKind::Rain => gust,
            ParticleKind::Snow { phase } => (sway_time + phase).sin(),
        };
    }
    world.particles.retain(|p| p.pos.y <= PARTICLE_KILL_Y);

    // Lightning
    if weather.current == Weather::Storm && chance(&mut world.rng, tuning.lightning_chance) {
        weather.lightning = tuning.lightning_ticks;
        log::debug!("Lightning strike at frame {}", world.frame);
    }
    weather.lightning = weather.lightning.saturating_sub(1);

    changed
}

/// Opacity of the lightning overlay (countdown / full duration)
pub fn lightning_alpha(lightning: u32, lightning_ticks: u32) -> f32 {
    if lightning_ticks == 0 {
        return 0.0;
    }
    lightning as f32 / lightning_ticks as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Particle, WeatherState};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn world() -> World {
        World::new(1234, Tuning::default())
    }

    #[test]
    fn test_full_cycle_returns_to_clear() {
        let mut world = world();
        let mut visited = Vec::new();
        for _ in 0..900 * 6 {
            if let Some(w) = update_weather(&mut world) {
                visited.push(w);
            }
        }
        assert_eq!(
            visited,
            vec![
                Weather::Windy,
                Weather::Rain,
                Weather::Storm,
                Weather::Snow,
                Weather::Night,
                Weather::Clear
            ]
        );
        assert_eq!(world.weather.current, Weather::Clear);
    }

    #[test]
    fn test_changes_exactly_on_period() {
        let mut world = world();
        for _ in 0..899 {
            assert_eq!(update_weather(&mut world), None);
        }
        assert_eq!(update_weather(&mut world), Some(Weather::Windy));
    }

    #[test]
    fn test_clear_spawns_nothing() {
        let mut world = world();
        for _ in 0..500 {
            update_weather(&mut world);
        }
        assert!(world.particles.is_empty());
    }

    #[test]
    fn test_rain_spawns_and_dies_below_view() {
        let mut world = world();
        world.weather = WeatherState::new(Weather::Rain);
        for _ in 0..200 {
            update_weather(&mut world);
            assert!(world.particles.iter().all(|p| p.pos.y <= PARTICLE_KILL_Y));
            assert!(world.particles.iter().all(|p| p.kind == ParticleKind::Rain));
        }
        assert!(!world.particles.is_empty());
        // Stop spawning: everything drains out
        world.weather = WeatherState::new(Weather::Clear);
        for _ in 0..200 {
            update_weather(&mut world);
        }
        assert!(world.particles.is_empty());
    }

    #[test]
    fn test_rain_drifts_with_wind() {
        let mut world = world();
        world.wind.current = 0.1;
        world.particles.push(Particle {
            kind: ParticleKind::Rain,
            pos: Vec2::new(100.0, 0.0),
            fall: 4.0,
        });
        world.tuning.rain_chance = 0.0;
        update_weather(&mut world);
        let p = &world.particles[0];
        assert!((p.pos.x - 100.4).abs() < 1e-4);
        assert_eq!(p.pos.y, 4.0);
    }

    #[test]
    fn test_snow_spawns_snowflakes() {
        let mut world = world();
        world.weather = WeatherState::new(Weather::Snow);
        for _ in 0..200 {
            update_weather(&mut world);
        }
        // 0.2 per tick over 200 ticks, none old enough to melt yet
        assert!(world.particles.len() > 10);
        assert!(world.particles.len() <= 200);
        assert!(world
            .particles
            .iter()
            .all(|p| matches!(p.kind, ParticleKind::Snow { .. })));
    }

    #[test]
    fn test_snow_sways_ignoring_wind() {
        let mut world = world();
        world.tuning.snow_chance = 0.0;
        world.weather = WeatherState::new(Weather::Snow);
        world.wind.current = 0.1;
        world.frame = 20;
        world.particles.push(Particle {
            kind: ParticleKind::Snow { phase: 0.3 },
            pos: Vec2::new(100.0, 0.0),
            fall: 1.0,
        });
        update_weather(&mut world);
        let p = &world.particles[0];
        let sway = (20.0f32 * 0.05 + 0.3).sin();
        assert!((p.pos.x - (100.0 + sway)).abs() < 1e-4);
        assert_eq!(p.pos.y, 1.0);
    }

    #[test]
    fn test_sierra_rolls_stronger_gusts() {
        let mut world = world();
        world.tuning.wind_retarget_chance = 1.0;
        world.tuning.wind_range = 0.0;

        // Meadow: only the calm roll
        update_wind(&mut world);
        assert_eq!(world.wind.target, 0.0);

        world.biome = Biome::Sierra;
        let mut strongest = 0.0f32;
        for _ in 0..200 {
            update_wind(&mut world);
            assert!(world.wind.target.abs() <= 0.3);
            strongest = strongest.max(world.wind.target.abs());
        }
        assert!(strongest > 0.15);
    }

    #[test]
    fn test_lightning_only_in_storm() {
        let mut world = world();
        world.tuning.lightning_chance = 1.0;
        update_weather(&mut world);
        assert_eq!(world.weather.lightning, 0);

        world.weather = WeatherState::new(Weather::Storm);
        update_weather(&mut world);
        assert_eq!(world.weather.lightning, 9);

        world.tuning.lightning_chance = 0.0;
        for _ in 0..20 {
            update_weather(&mut world);
        }
        assert_eq!(world.weather.lightning, 0);
    }

    #[test]
    fn test_wind_eases_toward_target() {
        let mut world = world();
        world.tuning.wind_retarget_chance = 0.0;
        world.wind.target = 0.1;
        update_wind(&mut world);
        assert!((world.wind.current - 0.001).abs() < 1e-7);
        for _ in 0..2000 {
            update_wind(&mut world);
        }
        assert!((world.wind.current - 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_lightning_alpha() {
        assert_eq!(lightning_alpha(10, 10), 1.0);
        assert_eq!(lightning_alpha(5, 10), 0.5);
        assert_eq!(lightning_alpha(3, 0), 0.0);
    }
}
