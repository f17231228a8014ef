//! Enemy, power-up and particle creation

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{Enemy, EnemyKind, GameEvent, GameState, Particle, PowerUp, PowerUpKind, Tint};
use crate::consts::*;
use crate::{direction, velocity_toward};

/// Explosion palette used when no tint is given
const BURST_PALETTE: [u32; 5] = [0xff4d4d, 0xffff4d, 0x4dff4d, 0x4d4dff, 0xff4dff];

/// Spawn radius range for a level: higher levels roll smaller enemies
pub fn enemy_radius_range(level: u32) -> (f32, f32) {
    let min = (30.0 - level as f32).max(8.0);
    let max = (min + 20.0).max(40.0);
    (min, max)
}

/// Enemy travel speed toward the player at spawn (px/frame)
pub fn enemy_speed(level: u32) -> f32 {
    0.7 + level as f32 * 0.1
}

/// Spawn one enemy just off a random screen edge, aimed at the player.
///
/// Returns the new enemy's id, or `None` if the enemy cap is reached or
/// configured as non-positive.
pub fn spawn_enemy(state: &mut GameState) -> Option<u32> {
    let cap = state.tuning.max_enemies;
    if cap <= 0 || state.enemies.len() >= cap as usize {
        return None;
    }

    let level = state.level;
    let (min_r, max_r) = enemy_radius_range(level);
    let rng = &mut state.rng;
    let mut radius = rng.random::<f32>() * (max_r - min_r) + min_r;

    let pos = if rng.random_bool(0.5) {
        let x = if rng.random_bool(0.5) {
            -radius
        } else {
            state.width + radius
        };
        Vec2::new(x, rng.random::<f32>() * state.height)
    } else {
        let y = if rng.random_bool(0.5) {
            -radius
        } else {
            state.height + radius
        };
        Vec2::new(rng.random::<f32>() * state.width, y)
    };

    let hue = rng.random::<f32>() * 360.0;
    let kind = EnemyKind::from_roll(level, rng.random::<f32>());
    if kind == EnemyKind::Boss {
        radius *= BOSS_RADIUS_SCALE;
    }

    let vel = velocity_toward(pos, state.player.pos, enemy_speed(level));
    let id = state.next_entity_id();
    state
        .enemies
        .push(Enemy::new(id, kind, pos, vel, radius, Tint::Hue(hue)));

    log::debug!("Spawned {:?} enemy #{} (r={:.1})", kind, id, radius);
    state.events.push(GameEvent::EnemySpawned { kind });
    Some(id)
}

/// Roll for a power-up drop at a kill location
pub fn try_spawn_power_up(state: &mut GameState, pos: Vec2) -> bool {
    let chance = state.tuning.power_up_chance;
    // NaN and non-positive chances disable drops
    if chance.is_nan() || chance <= 0.0 {
        return false;
    }
    if !state.rng.random_bool(chance.min(1.0)) {
        return false;
    }

    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let heading = state.rng.random::<f32>() * TAU;
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp {
        id,
        kind,
        pos,
        vel: direction(heading) * POWER_UP_SPEED,
        radius: POWER_UP_RADIUS,
        created_ms: state.clock_ms,
        lifespan_ms: state.tuning.power_up_lifespan_ms,
    });

    log::debug!("Power-up {:?} dropped at ({:.0}, {:.0})", kind, pos.x, pos.y);
    state.events.push(GameEvent::PowerUpSpawned { kind });
    true
}

/// Burst of particles at `pos`; random palette colours when `tint` is `None`
pub fn create_explosion(state: &mut GameState, pos: Vec2, tint: Option<Tint>, count: usize) {
    let room = state
        .tuning
        .max_particles
        .saturating_sub(state.particles.len());

    for _ in 0..count.min(room) {
        let rng = &mut state.rng;
        let speed = rng.random::<f32>() * 6.0 + 1.0;
        let angle = rng.random::<f32>() * TAU;
        let radius = rng.random::<f32>() * 3.0 + 1.0;
        let tint = tint.unwrap_or_else(|| {
            Tint::Rgb(BURST_PALETTE[rng.random_range(0..BURST_PALETTE.len())])
        });

        state.particles.push(Particle {
            pos,
            vel: direction(angle) * speed,
            radius,
            tint,
            alpha: 1.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn active_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, 800.0, 600.0, Tuning::default());
        state.start();
        state
    }

    #[test]
    fn test_radius_range_shrinks_with_level() {
        assert_eq!(enemy_radius_range(1), (29.0, 49.0));
        assert_eq!(enemy_radius_range(10), (20.0, 40.0));
        assert_eq!(enemy_radius_range(30), (8.0, 40.0));
    }

    #[test]
    fn test_spawned_enemy_off_screen_and_aimed() {
        let mut state = active_state(7);
        for _ in 0..20 {
            spawn_enemy(&mut state);
        }
        assert_eq!(state.enemies.len(), 20);

        let center = state.center();
        for enemy in &state.enemies {
            let off_x = enemy.pos.x <= 0.0 || enemy.pos.x >= state.width;
            let off_y = enemy.pos.y <= 0.0 || enemy.pos.y >= state.height;
            assert!(off_x || off_y, "enemy spawned on screen at {:?}", enemy.pos);

            // Velocity points at the player
            let to_player = (center - enemy.pos).normalize();
            assert!(enemy.vel.normalize().dot(to_player) > 0.999);
            assert!((enemy.vel.length() - enemy_speed(1)).abs() < 1e-4);

            assert_eq!(enemy.health, (enemy.original_radius / 10.0).ceil() as u32);
            // Level 1 never rolls homing or boss
            assert!(matches!(enemy.kind, EnemyKind::Standard | EnemyKind::Zigzag));
        }
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut state = active_state(1);
        state.tuning.max_enemies = 3;
        for _ in 0..10 {
            spawn_enemy(&mut state);
        }
        assert_eq!(state.enemies.len(), 3);
    }

    #[test]
    fn test_non_positive_cap_is_noop() {
        let mut state = active_state(1);
        state.tuning.max_enemies = -5;
        assert!(spawn_enemy(&mut state).is_none());
        state.tuning.max_enemies = 0;
        assert!(spawn_enemy(&mut state).is_none());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_bosses_are_larger() {
        let mut state = active_state(3);
        state.level = 5;
        state.tuning.max_enemies = 1000;
        for _ in 0..400 {
            spawn_enemy(&mut state);
        }
        let (_, max_r) = enemy_radius_range(5);
        let bosses: Vec<_> = state
            .enemies
            .iter()
            .filter(|e| e.kind == EnemyKind::Boss)
            .collect();
        assert!(!bosses.is_empty());
        assert!(bosses.iter().any(|b| b.original_radius > max_r));
        assert!(state
            .enemies
            .iter()
            .filter(|e| e.kind != EnemyKind::Boss)
            .all(|e| e.original_radius <= max_r));
    }

    #[test]
    fn test_power_up_chance_extremes() {
        let mut state = active_state(5);
        state.tuning.power_up_chance = 0.0;
        assert!(!try_spawn_power_up(&mut state, Vec2::new(100.0, 100.0)));
        assert!(state.power_ups.is_empty());

        state.tuning.power_up_chance = 1.0;
        assert!(try_spawn_power_up(&mut state, Vec2::new(100.0, 100.0)));
        let p = &state.power_ups[0];
        assert_eq!(p.pos, Vec2::new(100.0, 100.0));
        assert!((p.vel.length() - POWER_UP_SPEED).abs() < 1e-5);
        assert_eq!(p.lifespan_ms, 10_000.0);
    }

    #[test]
    fn test_nan_power_up_chance_drops_nothing() {
        let mut state = active_state(5);
        state.tuning.power_up_chance = f64::NAN;
        assert!(!try_spawn_power_up(&mut state, Vec2::new(100.0, 100.0)));
        assert!(state.power_ups.is_empty());

        state.tuning.power_up_chance = 7.0;
        assert!(try_spawn_power_up(&mut state, Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_explosion_respects_particle_cap() {
        let mut state = active_state(2);
        state.tuning.max_particles = 30;
        create_explosion(&mut state, Vec2::ZERO, None, 20);
        create_explosion(&mut state, Vec2::ZERO, Some(Tint::WHITE), 20);
        assert_eq!(state.particles.len(), 30);
        assert!(state.particles[25].tint == Tint::WHITE);
    }
}
