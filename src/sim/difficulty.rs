//! Difficulty escalation

use super::spawn::create_explosion;
use super::state::{GameEvent, GameState, Tint};

/// Particles in the level-up burst at screen centre
const LEVEL_UP_BURST: usize = 50;

/// Raise the level by one.
///
/// Enemies spawn faster from here on (the spawn timer restarts with the new
/// period), later spawns are smaller and quicker, and the level banner shows.
pub fn increase_difficulty(state: &mut GameState) {
    state.level += 1;
    state.spawn_interval_ms = state.tuning.spawn_interval_for_level(state.level);
    state.spawn_accum_ms = 0.0;
    state.level_banner_ms = state.tuning.level_banner_ms;

    let center = state.center();
    create_explosion(state, center, Some(Tint::WHITE), LEVEL_UP_BURST);

    log::info!(
        "Level {} (spawn every {:.0} ms)",
        state.level,
        state.spawn_interval_ms
    );
    state.events.push(GameEvent::LevelUp { level: state.level });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_level_up_resets_spawn_timer() {
        let mut state = GameState::new(1, 800.0, 600.0, Tuning::default());
        state.start();
        state.spawn_accum_ms = 900.0;

        increase_difficulty(&mut state);
        assert_eq!(state.level, 2);
        assert_eq!(state.spawn_interval_ms, 1300.0);
        assert_eq!(state.spawn_accum_ms, 0.0);
        assert!(state.level_banner_ms > 0.0);
        assert_eq!(state.particles.len(), LEVEL_UP_BURST);
        assert!(state.drain_events().contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_spawn_interval_bottoms_out() {
        let mut state = GameState::new(1, 800.0, 600.0, Tuning::default());
        state.start();
        for _ in 0..19 {
            increase_difficulty(&mut state);
        }
        assert_eq!(state.level, 20);
        assert_eq!(state.spawn_interval_ms, 500.0);
    }
}
