//! Per-frame simulation step
//!
//! Advances the session by one display frame. Order within a step is fixed:
//! timers, firing, particles, power-ups, projectiles, power-up expiry,
//! enemies (with their collision checks), then compaction. Anything that dies
//! mid-step is only marked; removal happens once iteration is over.

use glam::Vec2;

use super::collision::{circles_touch, fully_off_screen};
use super::difficulty::increase_difficulty;
use super::spawn::{create_explosion, spawn_enemy, try_spawn_power_up};
use super::state::{GameEvent, GamePhase, GameState, PowerUpKind, Tint};
use super::weapon::fire;
use crate::consts::*;

/// Points for a hit that doesn't kill
const HIT_POINTS: u64 = 25;
/// Points for an enemy absorbed by the shield
const SHIELD_KILL_POINTS: u64 = 100;
/// Particles in the pickup burst
const PICKUP_BURST: usize = 20;

/// Input gathered since the last step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Screen point the player clicked
    pub fire_at: Option<Vec2>,
    /// Start (or restart) the session
    pub start: bool,
    /// New viewport size
    pub resize: Option<(f32, f32)>,
    /// Demo mode - fire at the nearest enemy every frame
    pub auto_aim: bool,
}

/// Advance the game state by one frame of `dt_ms` simulated milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    if let Some((width, height)) = input.resize {
        state.resize(width, height);
    }

    if input.start && state.phase != GamePhase::Active {
        state.start();
    }

    // Don't tick unless a session is running
    if state.phase != GamePhase::Active {
        return;
    }

    state.frame += 1;
    state.clock_ms += dt_ms;
    state.level_banner_ms = (state.level_banner_ms - dt_ms).max(0.0);

    advance_timers(state, dt_ms);

    let target = input
        .fire_at
        .or_else(|| input.auto_aim.then(|| nearest_enemy(state)).flatten());
    if let Some(target) = target {
        fire(state, target);
    }

    update_particles(state);
    update_power_ups(state);
    update_projectiles(state);

    let now = state.now();
    state.player.power_ups.expire(now);

    update_enemies(state);

    // Compaction
    state.enemies.retain(|e| !e.destroyed);
    state.projectiles.retain(|p| !p.spent);
}

/// Run the difficulty and spawn accumulators
fn advance_timers(state: &mut GameState, dt_ms: f64) {
    let difficulty_interval = state.tuning.difficulty_interval_ms;
    if difficulty_interval > 0.0 {
        state.difficulty_accum_ms += dt_ms;
        while state.difficulty_accum_ms >= difficulty_interval {
            state.difficulty_accum_ms -= difficulty_interval;
            increase_difficulty(state);
        }
    }

    // Re-read after any level-up above
    if state.spawn_interval_ms > 0.0 {
        state.spawn_accum_ms += dt_ms;
        while state.spawn_accum_ms >= state.spawn_interval_ms {
            state.spawn_accum_ms -= state.spawn_interval_ms;
            spawn_enemy(state);
        }
    }
}

fn update_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.advance();
    }
    state.particles.retain(|p| p.alpha > 0.0);
}

/// Move power-ups, apply pickups, drop expired ones
fn update_power_ups(state: &mut GameState) {
    let now = state.now();
    let (width, height) = (state.width, state.height);
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let mut collected = Vec::new();

    state.power_ups.retain_mut(|power_up| {
        power_up.advance(width, height);
        if circles_touch(
            player_pos,
            player_radius,
            power_up.pos,
            power_up.radius,
            PICKUP_THRESHOLD,
        ) {
            collected.push(power_up.kind);
            return false;
        }
        !power_up.expired(now)
    });

    for kind in collected {
        apply_power_up(state, kind);
    }
}

/// Start (or refresh) a power-up on the player
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    let expiry = state.now() + state.tuning.power_up_duration_ms;
    state.player.power_ups.set(kind, expiry);

    let pos = state.player.pos;
    create_explosion(state, pos, Some(Tint::WHITE), PICKUP_BURST);

    log::debug!("Collected {:?} until {:.0} ms", kind, expiry);
    state.events.push(GameEvent::PowerUpCollected { kind });
}

fn update_projectiles(state: &mut GameState) {
    let (width, height) = (state.width, state.height);
    for projectile in state.projectiles.iter_mut() {
        projectile.advance();
        if fully_off_screen(projectile.pos, projectile.radius, width, height) {
            projectile.spent = true;
        }
    }
    state.projectiles.retain(|p| !p.spent);
}

/// Move enemies and resolve their contacts with the player and projectiles
fn update_enemies(state: &mut GameState) {
    let now = state.now();
    let level = state.level;
    let retarget_ms = state.tuning.homing_retarget_ms;

    for i in 0..state.enemies.len() {
        let player_pos = state.player.pos;
        state.enemies[i].advance(player_pos, level, now, retarget_ms);

        // Player contact
        let enemy = &state.enemies[i];
        if circles_touch(
            player_pos,
            state.player.radius,
            enemy.pos,
            enemy.radius,
            CONTACT_THRESHOLD,
        ) {
            if state.player.shielded(now) {
                absorb_with_shield(state, i);
                continue;
            }
            state.end_game();
            return;
        }

        for j in 0..state.projectiles.len() {
            if state.enemies[i].destroyed {
                break;
            }
            let projectile = &state.projectiles[j];
            let enemy = &state.enemies[i];
            if projectile.spent
                || !circles_touch(
                    projectile.pos,
                    projectile.radius,
                    enemy.pos,
                    enemy.radius,
                    CONTACT_THRESHOLD,
                )
            {
                continue;
            }
            resolve_hit(state, i, j);
        }
    }
}

/// A shielded player destroys the enemy and pays for it in shield time
fn absorb_with_shield(state: &mut GameState, enemy_idx: usize) {
    let now = state.now();
    let enemy = &mut state.enemies[enemy_idx];
    enemy.destroyed = true;
    let (pos, tint, radius) = (enemy.pos, enemy.tint, enemy.radius);

    create_explosion(state, pos, Some(tint), (radius * 3.0) as usize);
    state.add_score(SHIELD_KILL_POINTS);

    let shield = state.player.power_ups.shield;
    let penalized = (now + state.tuning.shield_min_remaining_ms)
        .max(shield - state.tuning.shield_hit_penalty_ms);
    state.player.power_ups.shield = penalized;

    state.events.push(GameEvent::ShieldAbsorb { pos });
}

/// Projectile `proj_idx` strikes enemy `enemy_idx`
fn resolve_hit(state: &mut GameState, enemy_idx: usize, proj_idx: usize) {
    let projectile = &mut state.projectiles[proj_idx];
    projectile.spent = true;
    let (impact, damage) = (projectile.pos, projectile.damage);

    let enemy = &state.enemies[enemy_idx];
    let (tint, burst) = (enemy.tint, (enemy.radius * 2.0) as usize);
    create_explosion(state, impact, Some(tint), burst);
    state.events.push(GameEvent::EnemyHit { pos: impact });

    let enemy = &mut state.enemies[enemy_idx];
    if !enemy.take_damage(damage) {
        state.add_score(HIT_POINTS);
        return;
    }

    enemy.destroyed = true;
    let (kind, pos) = (enemy.kind, enemy.pos);
    let points = kind.points();
    state.add_score(points);
    state.events.push(GameEvent::EnemyDestroyed { kind, points });
    try_spawn_power_up(state, pos);
}

/// Closest live enemy to the player
fn nearest_enemy(state: &GameState) -> Option<Vec2> {
    let player = state.player.pos;
    state
        .enemies
        .iter()
        .map(|e| e.pos)
        .min_by(|a, b| {
            a.distance_squared(player)
                .partial_cmp(&b.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
