//! Player firing

use glam::Vec2;

use super::state::{GameEvent, GameState, PowerUpKind, Projectile};
use crate::consts::PROJECTILE_RADIUS;
use crate::{angle_between, direction};

/// Cooldown between shots given the player's active power-ups
pub fn fire_cooldown_ms(state: &GameState) -> f64 {
    if state
        .player
        .power_ups
        .is_active(PowerUpKind::RapidFire, state.now())
    {
        state.tuning.rapid_fire_cooldown_ms
    } else {
        state.tuning.fire_cooldown_ms
    }
}

/// Fire toward a screen point.
///
/// Returns the number of projectiles created: zero while inactive or cooling
/// down, three with multi-shot, otherwise one.
pub fn fire(state: &mut GameState, target: Vec2) -> usize {
    if !state.is_active() {
        return 0;
    }

    let now = state.now();
    let cooldown = fire_cooldown_ms(state);
    if state
        .player
        .last_shot_ms
        .is_some_and(|last| now - last < cooldown)
    {
        return 0;
    }
    state.player.last_shot_ms = Some(now);

    let angle = angle_between(state.player.pos, target);
    let multi_shot = state.player.power_ups.is_active(PowerUpKind::MultiShot, now);
    let shots: Vec<(f32, f32, u32)> = if multi_shot {
        let speed = state.tuning.multi_shot_speed;
        let spread = state.tuning.multi_shot_spread;
        vec![
            (angle, speed, 2),
            (angle - spread, speed, 1),
            (angle + spread, speed, 1),
        ]
    } else {
        vec![(angle, state.tuning.projectile_speed, 1)]
    };

    let count = shots.len();
    for (angle, speed, damage) in shots {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: state.player.pos,
            vel: direction(angle) * speed,
            radius: PROJECTILE_RADIUS,
            damage,
            spent: false,
        });
    }

    state.events.push(GameEvent::Fired { shots: count as u8 });
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn active_state() -> GameState {
        let mut state = GameState::new(1, 800.0, 600.0, Tuning::default());
        state.start();
        state
    }

    #[test]
    fn test_fire_ignored_when_idle() {
        let mut state = GameState::new(1, 800.0, 600.0, Tuning::default());
        assert_eq!(fire(&mut state, Vec2::new(0.0, 0.0)), 0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_single_shot_aims_at_target() {
        let mut state = active_state();
        assert_eq!(fire(&mut state, Vec2::new(800.0, 300.0)), 1);
        let p = &state.projectiles[0];
        assert_eq!(p.pos, state.player.pos);
        assert!((p.vel.x - 5.0).abs() < 1e-5);
        assert!(p.vel.y.abs() < 1e-5);
        assert_eq!(p.damage, 1);
        assert_eq!(p.radius, PROJECTILE_RADIUS);
    }

    #[test]
    fn test_cooldown() {
        let mut state = active_state();
        assert_eq!(fire(&mut state, Vec2::ZERO), 1);
        state.clock_ms = 200.0;
        assert_eq!(fire(&mut state, Vec2::ZERO), 0);
        state.clock_ms = 250.0;
        assert_eq!(fire(&mut state, Vec2::ZERO), 1);

        // Rapid fire shortens the cooldown
        state.player.power_ups.set(PowerUpKind::RapidFire, 10_000.0);
        state.clock_ms = 360.0;
        assert_eq!(fire(&mut state, Vec2::ZERO), 1);
    }

    #[test]
    fn test_multi_shot_spread() {
        let mut state = active_state();
        state.player.power_ups.set(PowerUpKind::MultiShot, 10_000.0);
        assert_eq!(fire(&mut state, Vec2::new(800.0, 300.0)), 3);

        let damages: Vec<u32> = state.projectiles.iter().map(|p| p.damage).collect();
        assert_eq!(damages, vec![2, 1, 1]);
        for p in &state.projectiles {
            assert!((p.vel.length() - 6.0).abs() < 1e-4);
        }
        let side = state.projectiles[2].vel;
        assert!((side.y.atan2(side.x) - 0.2).abs() < 1e-4);
    }
}
