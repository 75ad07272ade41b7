//! Scrolling and in-place recycling of fixed-size entity rings
//!
//! Nothing here allocates: an entity that leaves the view on the left is
//! overwritten with fresh attributes further right.

use rand::Rng;

use super::factory;
use super::state::{Cloud, Difficulty, Hill, Obstacle, ObstacleKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Raise speed and pickup chance every `ramp_interval_ticks`
///
/// Returns true on the ticks the ramp fires. There is no ceiling. A zero
/// interval never ramps.
pub fn ramp_difficulty(difficulty: &mut Difficulty, frame: u64, tuning: &Tuning) -> bool {
    if frame == 0 || frame.checked_rem(tuning.ramp_interval_ticks) != Some(0) {
        return false;
    }
    difficulty.obstacle_speed += tuning.ramp_speed_step;
    difficulty.power_up_chance += tuning.ramp_chance_step;
    log::debug!(
        "Difficulty ramp at frame {}: speed {:.2}, pickup chance {:.4}",
        frame,
        difficulty.obstacle_speed,
        difficulty.power_up_chance
    );
    true
}

pub fn scroll_clouds<R: Rng + ?Sized>(clouds: &mut [Cloud], rng: &mut R) {
    for cloud in clouds.iter_mut() {
        cloud.pos.x -= cloud.speed;
        if cloud.pos.x < CLOUD_EXIT_X {
            cloud.pos.x = factory::cloud_reentry_x(rng);
        }
    }
}

/// Each hill re-enters one full ring width to the right with a new height
pub fn scroll_hills<R: Rng + ?Sized>(hills: &mut [Hill], rng: &mut R) {
    let ring = HILL_WIDTH * hills.len() as f32;
    for hill in hills.iter_mut() {
        hill.x -= HILL_SPEED;
        if hill.x < -HILL_WIDTH {
            hill.x += ring;
            hill.height = factory::hill_height(rng);
        }
    }
}

/// Move the ring left; any slot fully off-screen is regenerated 720 units on
///
/// Returns the number of slots recycled this tick.
pub fn scroll_obstacles<R: Rng + ?Sized>(
    obstacles: &mut [Obstacle; OBSTACLE_SLOTS],
    speed: f32,
    rng: &mut R,
) -> usize {
    let mut recycled = 0;
    for slot in obstacles.iter_mut() {
        slot.pos.x -= speed;
        if slot.is_off_screen() {
            *slot = factory::obstacle(rng, slot.pos.x + OBSTACLE_WRAP);
            recycled += 1;
        }
    }
    recycled
}

/// Slow hue drift on hills and trees; buildings keep their colour
pub fn tint_terrain(hills: &mut [Hill], obstacles: &mut [Obstacle], frame: u64) {
    let t = frame as f32;
    let hill_hue = 100.0 + (t / 300.0).sin() * 20.0;
    for hill in hills.iter_mut() {
        hill.color.h = hill_hue;
    }
    let tree_hue = 100.0 + (t / 100.0).sin() * 20.0;
    for obstacle in obstacles.iter_mut().filter(|o| o.kind == ObstacleKind::Tree) {
        obstacle.color.h = tree_hue;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::World;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_recycled_obstacle_reappears_720_on() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut ring = factory::obstacle_ring(&mut rng);
        ring[0].pos.x = -ring[0].size.x + 1.0;
        let old_x = ring[0].pos.x - 2.0;

        let recycled = scroll_obstacles(&mut ring, 2.0, &mut rng);
        assert_eq!(recycled, 1);
        assert!((ring[0].pos.x - (old_x + OBSTACLE_WRAP)).abs() < 1e-4);
        assert!((ring[0].pos.y + ring[0].size.y - VIEW_HEIGHT).abs() < 1e-3);
    }

    #[test]
    fn test_ring_keeps_spacing_over_time() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut ring = factory::obstacle_ring(&mut rng);
        for _ in 0..1000 {
            scroll_obstacles(&mut ring, 2.6, &mut rng);
        }
        let mut xs: Vec<f32> = ring.iter().map(|o| o.pos.x).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in xs.windows(2) {
            assert!((pair[1] - pair[0] - OBSTACLE_SPACING).abs() < 0.1);
        }
    }

    #[test]
    fn test_clouds_wrap_right() {
        let mut world = World::new(1, Tuning::default());
        world.clouds[0].pos.x = CLOUD_EXIT_X + 0.1;
        world.clouds[0].speed = 0.5;
        scroll_clouds(&mut world.clouds, &mut world.rng);
        assert!((VIEW_WIDTH..VIEW_WIDTH + 40.0).contains(&world.clouds[0].pos.x));
    }

    #[test]
    fn test_hills_wrap_one_ring_width() {
        let mut world = World::new(1, Tuning::default());
        world.hills[0].x = -HILL_WIDTH + 0.5;
        scroll_hills(&mut world.hills, &mut world.rng);
        assert_eq!(world.hills[0].x, -HILL_WIDTH - 0.5 + HILL_WIDTH * HILL_COUNT as f32);
        assert!((40.0..70.0).contains(&world.hills[0].height));
        assert_eq!(world.hills[1].x, HILL_WIDTH - 1.0);
    }

    #[test]
    fn test_ramp_every_interval() {
        let tuning = Tuning::default();
        let mut difficulty = Difficulty::new(&tuning);
        assert!(!ramp_difficulty(&mut difficulty, 0, &tuning));
        assert!(!ramp_difficulty(&mut difficulty, 599, &tuning));
        assert!(ramp_difficulty(&mut difficulty, 600, &tuning));
        assert!(ramp_difficulty(&mut difficulty, 1200, &tuning));
        assert!((difficulty.obstacle_speed - 2.4).abs() < 1e-5);
        assert!((difficulty.power_up_chance - 0.009).abs() < 1e-6);
    }

    #[test]
    fn test_zero_ramp_interval_never_ramps() {
        let tuning = Tuning {
            ramp_interval_ticks: 0,
            ..Tuning::default()
        };
        let mut difficulty = Difficulty::new(&tuning);
        for frame in [1, 600, 1200] {
            assert!(!ramp_difficulty(&mut difficulty, frame, &tuning));
        }
        assert_eq!(difficulty.obstacle_speed, tuning.obstacle_speed);
        assert_eq!(difficulty.power_up_chance, tuning.power_up_chance);
    }

    #[test]
    fn test_tint_leaves_buildings() {
        let mut world = World::new(21, Tuning::default());
        let before: Vec<_> = world.obstacles.iter().map(|o| o.color).collect();
        tint_terrain(&mut world.hills, &mut world.obstacles, 150);
        let tree_hue = 100.0 + (1.5f32).sin() * 20.0;
        for (o, old) in world.obstacles.iter().zip(before) {
            match o.kind {
                ObstacleKind::Tree => assert!((o.color.h - tree_hue).abs() < 1e-4),
                ObstacleKind::Building => assert_eq!(o.color, old),
            }
        }
    }
}
