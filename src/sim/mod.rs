//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` handed to `tick`
//! - Seeded RNG only
//! - Removal is mark-then-compact, never mid-iteration
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use collision::{circle_gap, circles_touch, edge_bounce, fully_off_screen};
pub use difficulty::increase_difficulty;
pub use spawn::{create_explosion, spawn_enemy, try_spawn_power_up};
pub use state::{
    Enemy, EnemyKind, GameEvent, GamePhase, GameState, Particle, Player, PowerUp, PowerUpKind,
    PowerUpTimers, Projectile, Tint,
};
pub use tick::{TickInput, apply_power_up, tick};
pub use weapon::fire;
