//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a session can be
//! re-tuned from a JSON document without touching code. Missing fields fall
//! back to the defaults below.

use serde::{Deserialize, Serialize};

/// Gameplay tuning for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Enemy spawn period at level 1 (ms)
    pub initial_spawn_interval_ms: f64,
    /// Floor for the enemy spawn period (ms)
    pub min_spawn_interval_ms: f64,
    /// Spawn period reduction per level (ms)
    pub spawn_interval_step_ms: f64,
    /// Time between level-ups (ms)
    pub difficulty_interval_ms: f64,
    /// Maximum live enemies; non-positive disables spawning
    pub max_enemies: i32,

    /// Chance of a power-up drop per kill (0-1)
    pub power_up_chance: f64,
    /// How long a collected power-up stays active (ms)
    pub power_up_duration_ms: f64,
    /// How long an uncollected power-up drifts before vanishing (ms)
    pub power_up_lifespan_ms: f64,

    /// Minimum time between shots (ms)
    pub fire_cooldown_ms: f64,
    /// Minimum time between shots with rapid fire (ms)
    pub rapid_fire_cooldown_ms: f64,
    /// Projectile speed (px/frame)
    pub projectile_speed: f32,
    /// Projectile speed while multi-shot is active (px/frame)
    pub multi_shot_speed: f32,
    /// Angle between the centre shot and each side shot (radians)
    pub multi_shot_spread: f32,

    /// Shield time lost per absorbed enemy (ms)
    pub shield_hit_penalty_ms: f64,
    /// Shield time guaranteed to remain after an absorbed enemy (ms)
    pub shield_min_remaining_ms: f64,

    /// Homing enemies re-aim at the player this often (ms)
    pub homing_retarget_ms: f64,
    /// Live particle cap
    pub max_particles: usize,
    /// How long the "LEVEL n" banner stays up (ms)
    pub level_banner_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_spawn_interval_ms: 1500.0,
            min_spawn_interval_ms: 500.0,
            spawn_interval_step_ms: 100.0,
            difficulty_interval_ms: 10_000.0,
            max_enemies: 30,

            power_up_chance: 0.05,
            power_up_duration_ms: 10_000.0,
            power_up_lifespan_ms: 10_000.0,

            fire_cooldown_ms: 250.0,
            rapid_fire_cooldown_ms: 100.0,
            projectile_speed: 5.0,
            multi_shot_speed: 6.0,
            multi_shot_spread: 0.2,

            shield_hit_penalty_ms: 3000.0,
            shield_min_remaining_ms: 2000.0,

            homing_retarget_ms: 500.0,
            max_particles: 1000,
            level_banner_ms: 1200.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Clamp values that would otherwise break the simulation.
    ///
    /// Non-positive caps and intervals are left alone: the spawner and
    /// difficulty controller treat them as "disabled".
    pub fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            log::warn!("power_up_chance {} out of range, clamping", self.power_up_chance);
            self.power_up_chance = self.power_up_chance.clamp(0.0, 1.0);
        }
        if self.power_up_chance.is_nan() {
            self.power_up_chance = 0.0;
        }
        if self.min_spawn_interval_ms > self.initial_spawn_interval_ms {
            log::warn!("min_spawn_interval_ms exceeds initial interval, lowering floor");
            self.min_spawn_interval_ms = self.initial_spawn_interval_ms;
        }
        self.fire_cooldown_ms = self.fire_cooldown_ms.max(0.0);
        self.rapid_fire_cooldown_ms = self.rapid_fire_cooldown_ms.max(0.0);
        self.shield_min_remaining_ms = self.shield_min_remaining_ms.max(0.0);
        self
    }

    /// Enemy spawn period for a level: shrinks linearly, floored at the minimum
    pub fn spawn_interval_for_level(&self, level: u32) -> f64 {
        (self.initial_spawn_interval_ms - level as f64 * self.spawn_interval_step_ms)
            .max(self.min_spawn_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_interval_floor() {
        let tuning = Tuning::default();
        assert_eq!(tuning.spawn_interval_for_level(2), 1300.0);
        assert_eq!(tuning.spawn_interval_for_level(10), 500.0);
        assert_eq!(tuning.spawn_interval_for_level(20), 500.0);
    }

    #[test]
    fn test_partial_json() {
        let tuning = Tuning::from_json(r#"{ "max_enemies": 5, "power_up_chance": 1.0 }"#).unwrap();
        assert_eq!(tuning.max_enemies, 5);
        assert_eq!(tuning.power_up_chance, 1.0);
        assert_eq!(tuning.initial_spawn_interval_ms, 1500.0);
    }

    #[test]
    fn test_malformed_values_clamped() {
        let tuning =
            Tuning::from_json(r#"{ "power_up_chance": 4.0, "max_enemies": -3 }"#).unwrap();
        assert_eq!(tuning.power_up_chance, 1.0);
        // Negative caps survive parsing; the spawner refuses them
        assert_eq!(tuning.max_enemies, -3);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Tuning::from_json("{ not json").is_err());
        assert!(Tuning::from_json(r#"{ "max_enemies": "lots" }"#).is_err());
    }

    proptest! {
        #[test]
        fn spawn_interval_non_increasing(level in 1u32..500) {
            let tuning = Tuning::default();
            let a = tuning.spawn_interval_for_level(level);
            let b = tuning.spawn_interval_for_level(level + 1);
            prop_assert!(b <= a);
            prop_assert!(b >= tuning.min_spawn_interval_ms);
        }
    }
}
