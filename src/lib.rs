//! Orb Shooter - hold the centre of the screen against waves of orbs
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, difficulty)
//! - `renderer`: 2D canvas rendering pass over the simulation state
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences
//! - `audio`: Procedural sound effects driven by simulation events

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// One simulation step per display frame (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum steps per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    pub const PLAYER_RADIUS: f32 = 12.0;
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const POWER_UP_RADIUS: f32 = 15.0;
    /// Power-up drift speed (pixels per frame)
    pub const POWER_UP_SPEED: f32 = 1.0;

    /// One point of enemy health per this many pixels of spawn radius
    pub const RADIUS_PER_HEALTH: f32 = 10.0;
    /// Bosses spawn this much larger than a regular roll
    pub const BOSS_RADIUS_SCALE: f32 = 1.5;
    /// Bosses travel at this fraction of their nominal velocity
    pub const BOSS_SPEED_SCALE: f32 = 0.7;

    /// Enemy/player and enemy/projectile trigger at near-contact
    pub const CONTACT_THRESHOLD: f32 = 1.0;
    /// Power-up pickup requires actual overlap
    pub const PICKUP_THRESHOLD: f32 = 0.0;

    pub const PARTICLE_FRICTION: f32 = 0.98;
    pub const PARTICLE_FADE: f32 = 0.01;
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of the line from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Velocity of magnitude `speed` heading from `from` toward `to`
#[inline]
pub fn velocity_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    direction(angle_between(from, to)) * speed
}
