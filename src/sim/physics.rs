//! Player physics
//!
//! Semi-implicit Euler: forces are accumulated into velocity, damping is
//! applied, then position integrates once. The order matters, it sets the
//! terminal fall speed.

use super::state::{Player, PowerKind};
use crate::consts::*;
use crate::input::HeldKeys;
use crate::tuning::Tuning;

/// Result of a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsOutcome {
    /// Still in the air
    Airborne,
    /// Bottom edge crossed the ground line
    Landed,
}

/// Gravity after the active power's modifier
pub fn effective_gravity(power: Option<PowerKind>, tuning: &Tuning) -> f32 {
    match power {
        Some(PowerKind::Feather) => tuning.gravity * tuning.feather_gravity_scale,
        Some(PowerKind::Shield) => tuning.gravity * tuning.shield_gravity_scale,
        Some(PowerKind::Stabilizer) | None => tuning.gravity,
    }
}

/// Advance the player by one tick
pub fn step_player(player: &mut Player, keys: &HeldKeys, wind: f32, tuning: &Tuning) -> PhysicsOutcome {
    // Control input
    if keys.left {
        player.vel.x -= tuning.control_force;
    }
    if keys.right {
        player.vel.x += tuning.control_force;
    }
    if keys.up {
        player.vel.y -= tuning.vertical_impulse;
    }
    if keys.down {
        player.vel.y += tuning.vertical_impulse;
    }

    // Forces, then damping
    player.vel.x += wind;
    player.vel.y += effective_gravity(player.power, tuning);
    player.vel *= tuning.damping;

    player.pos += player.vel;

    // Side walls are inelastic
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
        player.vel.x = 0.0;
    }
    if player.pos.x + player.size.x > VIEW_WIDTH {
        player.pos.x = VIEW_WIDTH - player.size.x;
        player.vel.x = 0.0;
    }
    // Ceiling
    if player.pos.y < 0.0 {
        player.pos.y = 0.0;
        player.vel.y = 0.0;
    }

    player.tilt = (player.vel.x * 0.1).clamp(-1.0, 1.0);

    if player.pos.y + player.size.y > GROUND_Y {
        PhysicsOutcome::Landed
    } else {
        PhysicsOutcome::Airborne
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_fall_converges_to_terminal_speed() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        let keys = HeldKeys::default();
        let mut last = 0.0;
        for _ in 0..400 {
            // Hold altitude so neither the ceiling nor the ground interferes
            player.pos.y = 100.0;
            step_player(&mut player, &keys, 0.0, &tuning);
            assert!(player.vel.y >= last);
            last = player.vel.y;
        }
        assert!((player.vel.y - tuning.terminal_fall_speed()).abs() < 1e-3);
        assert!(player.vel.y < tuning.gravity / (1.0 - tuning.damping));
    }

    #[test]
    fn test_first_step_order() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        let keys = HeldKeys {
            right: true,
            ..Default::default()
        };
        step_player(&mut player, &keys, 0.01, &tuning);
        // (0 + 0.05 + 0.01) * 0.97 and (0 + 0.04) * 0.97
        assert!((player.vel.x - 0.0582).abs() < 1e-6);
        assert!((player.vel.y - 0.0388).abs() < 1e-6);
        assert!((player.pos.x - (PLAYER_START_X + 0.0582)).abs() < 1e-4);
    }

    #[test]
    fn test_power_gravity_modifiers() {
        let tuning = Tuning::default();
        assert!((effective_gravity(Some(PowerKind::Feather), &tuning) - 0.016).abs() < 1e-6);
        assert!((effective_gravity(Some(PowerKind::Shield), &tuning) - 0.036).abs() < 1e-6);
        assert_eq!(effective_gravity(Some(PowerKind::Stabilizer), &tuning), 0.04);
        assert_eq!(effective_gravity(None, &tuning), 0.04);
    }

    #[test]
    fn test_walls_are_inelastic() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.pos.x = 1.0;
        player.vel.x = -5.0;
        step_player(&mut player, &HeldKeys::default(), 0.0, &tuning);
        assert_eq!(player.pos.x, 0.0);
        assert_eq!(player.vel.x, 0.0);

        player.pos.x = VIEW_WIDTH - player.size.x - 1.0;
        player.vel.x = 5.0;
        step_player(&mut player, &HeldKeys::default(), 0.0, &tuning);
        assert_eq!(player.pos.x, VIEW_WIDTH - player.size.x);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_ceiling_clamps() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.pos.y = 0.5;
        player.vel.y = -3.0;
        step_player(&mut player, &HeldKeys::default(), 0.0, &tuning);
        assert_eq!(player.pos.y, 0.0);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_ground_is_terminal_not_clamped() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.pos.y = GROUND_Y - player.size.y - 0.5;
        player.vel.y = 2.0;
        let outcome = step_player(&mut player, &HeldKeys::default(), 0.0, &tuning);
        assert_eq!(outcome, PhysicsOutcome::Landed);
        assert!(player.pos.y + player.size.y > GROUND_Y);
    }

    #[test]
    fn test_tilt_is_clamped() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.vel = Vec2::new(30.0, 0.0);
        step_player(&mut player, &HeldKeys::default(), 0.0, &tuning);
        assert_eq!(player.tilt, 1.0);
    }

    proptest! {
        #[test]
        fn prop_player_stays_inside_walls(
            x in 0.0f32..464.0,
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            wind in -0.3f32..0.3,
            left in any::<bool>(),
            right in any::<bool>(),
            up in any::<bool>(),
        ) {
            let tuning = Tuning::default();
            let mut player = Player::default();
            player.pos.x = x;
            player.vel = Vec2::new(vx, vy);
            let keys = HeldKeys { left, right, up, down: false };
            for _ in 0..50 {
                let outcome = step_player(&mut player, &keys, wind, &tuning);
                prop_assert!(player.pos.x >= 0.0);
                prop_assert!(player.pos.x <= VIEW_WIDTH - player.size.x);
                prop_assert!(player.pos.y >= 0.0);
                prop_assert!((-1.0..=1.0).contains(&player.tilt));
                if outcome == PhysicsOutcome::Landed {
                    break;
                }
            }
        }
    }
}
