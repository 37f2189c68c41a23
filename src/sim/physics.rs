//! Movement integrators
//!
//! Top-down levels move the player directly by intent. The platformer adds
//! gravity, a jump impulse, and landing on platform tops.

use glam::Vec2;

use super::collision::Rect;
use super::state::Player;
use crate::tuning::Tuning;

/// Move by `intent * speed` on both axes
pub fn step_top_down(player: &mut Player, intent: Vec2, speed: f32) {
    player.pos += intent * speed;
}

/// One platformer tick
///
/// Grounded is recomputed from scratch: it is only true if some platform was
/// landed on during this tick. There is no side or ceiling collision.
pub fn step_platformer(
    player: &mut Player,
    on_ground: &mut bool,
    dx: f32,
    jump: bool,
    platforms: &[Rect],
    tuning: &Tuning,
) {
    player.pos.x += dx * tuning.player_speed;

    if jump && *on_ground {
        player.vel.y = tuning.jump_impulse;
        *on_ground = false;
    }
    player.vel.y += tuning.gravity;
    player.pos.y += player.vel.y;

    *on_ground = false;
    for platform in platforms {
        if player.vel.y >= 0.0 && player.rect().intersects(platform) {
            player.pos.y = platform.y - player.rect().h;
            player.vel.y = 0.0;
            *on_ground = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_SIZE;
    use crate::sim::layout::PLATFORMS;

    fn on_floor() -> Player {
        Player {
            pos: Vec2::new(60.0, PLATFORMS[0].y - PLAYER_SIZE),
            vel: Vec2::ZERO,
        }
    }

    #[test]
    fn test_resting_on_platform() {
        let tuning = Tuning::default();
        let mut player = on_floor();
        let mut grounded = true;

        for _ in 0..10 {
            step_platformer(&mut player, &mut grounded, 0.0, false, &PLATFORMS, &tuning);
            assert!(grounded);
            assert_eq!(player.vel.y, 0.0);
            assert_eq!(player.pos.y, 546.0);
        }
    }

    #[test]
    fn test_grounded_has_no_hysteresis() {
        let tuning = Tuning::default();
        let mut player = on_floor();
        let mut grounded = true;

        // Support removed for one tick
        step_platformer(&mut player, &mut grounded, 0.0, false, &[], &tuning);
        assert!(!grounded);
        assert!(player.vel.y > 0.0);

        // Platform back: lands again on the next overlap
        step_platformer(&mut player, &mut grounded, 0.0, false, &PLATFORMS, &tuning);
        assert!(grounded);
        assert_eq!(player.vel.y, 0.0);
        assert_eq!(player.pos.y, 546.0);
    }

    #[test]
    fn test_jump_arc_returns_to_floor() {
        let tuning = Tuning::default();
        let mut player = on_floor();
        let mut grounded = true;

        step_platformer(&mut player, &mut grounded, 0.0, true, &PLATFORMS, &tuning);
        assert!(!grounded);
        assert!(player.vel.y < 0.0);
        let mut apex = player.pos.y;

        let mut ticks = 0;
        while !grounded && ticks < 200 {
            step_platformer(&mut player, &mut grounded, 0.0, false, &PLATFORMS, &tuning);
            apex = apex.min(player.pos.y);
            ticks += 1;
        }
        assert!(grounded);
        assert_eq!(player.pos.y, 546.0);
        // Roughly 12^2 / (2 * 0.6) = 120px of height
        assert!(546.0 - apex > 100.0);
    }

    #[test]
    fn test_jump_ignored_in_midair() {
        let tuning = Tuning::default();
        let mut player = Player {
            pos: Vec2::new(60.0, 100.0),
            vel: Vec2::ZERO,
        };
        let mut grounded = false;
        step_platformer(&mut player, &mut grounded, 1.0, true, &PLATFORMS, &tuning);
        assert!(player.vel.y > 0.0);
        assert_eq!(player.pos.x, 63.5);
    }

    #[test]
    fn test_rising_through_platform_does_not_land() {
        let tuning = Tuning::default();
        // Just under the 200..320 platform, moving up fast
        let mut player = Player {
            pos: Vec2::new(210.0, 445.0),
            vel: Vec2::new(0.0, -8.0),
        };
        let mut grounded = false;
        step_platformer(&mut player, &mut grounded, 0.0, false, &PLATFORMS, &tuning);
        assert!(!grounded);
        assert!(player.vel.y < 0.0);
    }

    #[test]
    fn test_top_down_step() {
        let mut player = Player::default();
        step_top_down(&mut player, Vec2::new(-1.0, 1.0), 3.5);
        assert_eq!(player.pos, Vec2::new(-3.5, 3.5));
    }
}
