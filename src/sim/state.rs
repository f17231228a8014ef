//! Game state and core simulation types
//!
//! Everything one session owns lives in [`GameState`]; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;
use crate::velocity_toward;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start; simulation not advancing
    Idle,
    /// Loop running, input accepted
    Active,
    /// Run ended; final score on display until restart
    GameOver,
}

/// Enemy types, each with its own movement pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Standard,
    /// Straight line with a sinusoidal wobble
    Zigzag,
    /// Re-aims at the player periodically
    Homing,
    /// Big and slow
    Boss,
}

impl EnemyKind {
    /// Pick a kind from a uniform roll in [0, 1).
    ///
    /// Thresholds are checked boss first, so the bands are mutually exclusive.
    pub fn from_roll(level: u32, roll: f32) -> Self {
        if level >= 3 && roll < 0.1 {
            EnemyKind::Boss
        } else if level >= 2 && roll < 0.2 {
            EnemyKind::Homing
        } else if level >= 1 && roll < 0.3 {
            EnemyKind::Zigzag
        } else {
            EnemyKind::Standard
        }
    }

    /// Points for destroying this enemy
    pub fn points(&self) -> u64 {
        match self {
            EnemyKind::Boss => 500,
            EnemyKind::Homing => 250,
            EnemyKind::Zigzag => 150,
            EnemyKind::Standard => 100,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    MultiShot,
    RapidFire,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::MultiShot,
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::MultiShot => "Multi Shot",
            PowerUpKind::RapidFire => "Rapid Fire",
            PowerUpKind::Shield => "Shield",
        }
    }
}

/// Colour of an enemy or particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Tint {
    /// Saturated hue in degrees (enemies are `hsl(h, 70%, 50%)`)
    Hue(f32),
    /// Packed 0xRRGGBB
    Rgb(u32),
}

impl Tint {
    pub const WHITE: Tint = Tint::Rgb(0xffffff);
}

/// Expiry timestamps (simulation clock, ms) for each power-up. Zero means off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUpTimers {
    pub multi_shot: f64,
    pub rapid_fire: f64,
    pub shield: f64,
}

impl PowerUpTimers {
    pub fn expiry(&self, kind: PowerUpKind) -> f64 {
        match kind {
            PowerUpKind::MultiShot => self.multi_shot,
            PowerUpKind::RapidFire => self.rapid_fire,
            PowerUpKind::Shield => self.shield,
        }
    }

    pub fn set(&mut self, kind: PowerUpKind, expiry: f64) {
        match kind {
            PowerUpKind::MultiShot => self.multi_shot = expiry,
            PowerUpKind::RapidFire => self.rapid_fire = expiry,
            PowerUpKind::Shield => self.shield = expiry,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind, now: f64) -> bool {
        self.expiry(kind) > now
    }

    /// Milliseconds left on a power-up (0 if inactive)
    pub fn remaining_ms(&self, kind: PowerUpKind, now: f64) -> f64 {
        (self.expiry(kind) - now).max(0.0)
    }

    /// Zero out every timer that has run out
    pub fn expire(&mut self, now: f64) {
        for kind in PowerUpKind::ALL {
            let expiry = self.expiry(kind);
            if expiry > 0.0 && expiry < now {
                self.set(kind, 0.0);
            }
        }
    }
}

/// The player's avatar (fixed at screen centre)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub power_ups: PowerUpTimers,
    /// Clock time of the last shot (ms)
    pub last_shot_ms: Option<f64>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            power_ups: PowerUpTimers::default(),
            last_shot_ms: None,
        }
    }

    pub fn shielded(&self, now: f64) -> bool {
        self.power_ups.is_active(PowerUpKind::Shield, now)
    }
}

/// Fraction of the remaining gap the displayed radius closes each frame
const RADIUS_EASE: f32 = 0.1;
/// Cosmetic pulsation speed and range
const PULSE_SPEED: f32 = 0.02;
const PULSE_RANGE: f32 = 2.0;
/// Zigzag phase advance per frame and lateral amplitude
const ZIGZAG_STEP: f32 = 0.05;
const ZIGZAG_AMPLITUDE: f32 = 2.0;

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Current (displayed and collidable) radius
    pub radius: f32,
    /// Radius the enemy is easing toward after taking damage
    pub target_radius: f32,
    pub original_radius: f32,
    pub health: u32,
    pub tint: Tint,
    /// Zigzag phase (radians)
    pub zigzag_phase: f32,
    /// Clock time of the last homing re-aim
    pub last_retarget_ms: Option<f64>,
    /// Cosmetic pulsation offset added to the drawn radius
    pub pulse: f32,
    pulse_dir: f32,
    /// Marked for removal at the end of the step
    #[serde(skip)]
    pub destroyed: bool,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, vel: Vec2, radius: f32, tint: Tint) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            radius,
            target_radius: radius,
            original_radius: radius,
            health: health_for_radius(radius),
            tint,
            zigzag_phase: 0.0,
            last_retarget_ms: None,
            pulse: 0.0,
            pulse_dir: 1.0,
            destroyed: false,
        }
    }

    /// Health at spawn
    pub fn max_health(&self) -> u32 {
        health_for_radius(self.original_radius)
    }

    /// Remaining health as a fraction of spawn health
    pub fn health_fraction(&self) -> f32 {
        let max = self.max_health();
        if max == 0 {
            0.0
        } else {
            self.health as f32 / max as f32
        }
    }

    /// Apply damage, shrinking toward the remaining-health fraction.
    ///
    /// The shrink compounds: each hit scales the previous target radius.
    /// Returns true if this hit killed the enemy.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        self.health = self.health.saturating_sub(damage);
        if self.health > 0 {
            self.target_radius *= self.health_fraction();
            false
        } else {
            true
        }
    }

    /// Advance one frame along this enemy's movement pattern
    pub fn advance(&mut self, player_pos: Vec2, level: u32, now: f64, retarget_ms: f64) {
        self.pulse += PULSE_SPEED * self.pulse_dir;
        if self.pulse.abs() > PULSE_RANGE {
            self.pulse_dir = -self.pulse_dir;
        }

        match self.kind {
            EnemyKind::Standard => {
                self.pos += self.vel;
            }
            EnemyKind::Zigzag => {
                self.zigzag_phase += ZIGZAG_STEP;
                self.pos.x += self.vel.x;
                self.pos.y += self.vel.y + self.zigzag_phase.sin() * ZIGZAG_AMPLITUDE;
            }
            EnemyKind::Homing => {
                let due = self
                    .last_retarget_ms
                    .is_none_or(|last| now - last > retarget_ms);
                if due {
                    self.vel = velocity_toward(self.pos, player_pos, homing_speed(level));
                    self.last_retarget_ms = Some(now);
                }
                self.pos += self.vel;
            }
            EnemyKind::Boss => {
                self.pos += self.vel * BOSS_SPEED_SCALE;
            }
        }

        if self.radius != self.target_radius {
            self.radius += (self.target_radius - self.radius) * RADIUS_EASE;
            if (self.radius - self.target_radius).abs() < 0.01 {
                self.radius = self.target_radius;
            }
        }
    }
}

/// Spawn health: one point per 10 px of radius, rounded up
pub fn health_for_radius(radius: f32) -> u32 {
    (radius / RADIUS_PER_HEALTH).ceil().max(0.0) as u32
}

/// Speed of homing enemies after a re-aim (px/frame)
pub fn homing_speed(level: u32) -> f32 {
    0.5 + level as f32 * 0.1
}

/// A projectile fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: u32,
    /// Marked for removal at the end of the step
    #[serde(skip)]
    pub spent: bool,
}

impl Projectile {
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub tint: Tint,
    /// Opacity, 1 at birth, removed at 0
    pub alpha: f32,
}

impl Particle {
    pub fn advance(&mut self) {
        self.vel *= PARTICLE_FRICTION;
        self.pos += self.vel;
        self.alpha -= PARTICLE_FADE;
    }
}

/// A power-up drifting around the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub created_ms: f64,
    pub lifespan_ms: f64,
}

impl PowerUp {
    /// Bounce off the screen edges, then drift
    pub fn advance(&mut self, width: f32, height: f32) {
        self.vel = super::collision::edge_bounce(self.pos, self.vel, self.radius, width, height);
        self.pos += self.vel;
    }

    pub fn expired(&self, now: f64) -> bool {
        now - self.created_ms >= self.lifespan_ms
    }

    /// Fraction of lifespan left (1 at creation, 0 at expiry)
    pub fn life_remaining(&self, now: f64) -> f64 {
        if self.lifespan_ms <= 0.0 {
            return 0.0;
        }
        (1.0 - (now - self.created_ms) / self.lifespan_ms).clamp(0.0, 1.0)
    }

    /// Blink during the final 30% of lifespan
    pub fn is_blinking(&self, now: f64) -> bool {
        self.life_remaining(now) < 0.3
    }
}

/// Something the UI, audio or logs may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Fired { shots: u8 },
    EnemySpawned { kind: EnemyKind },
    EnemyHit { pos: Vec2 },
    EnemyDestroyed { kind: EnemyKind, points: u64 },
    ShieldAbsorb { pos: Vec2 },
    PowerUpSpawned { kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    LevelUp { level: u32 },
    ScoreChanged { score: u64 },
    GameOver { final_score: u64 },
}

fn session_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Difficulty level, starts at 1
    pub level: u32,
    /// Frames simulated this session
    pub frame: u64,
    /// Simulation clock (ms since start)
    pub clock_ms: f64,
    /// Viewport size in pixels
    pub width: f32,
    pub height: f32,
    pub tuning: Tuning,

    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,

    /// Current enemy spawn period (ms)
    pub spawn_interval_ms: f64,
    /// Time accumulated toward the next spawn
    pub spawn_accum_ms: f64,
    /// Time accumulated toward the next level-up
    pub difficulty_accum_ms: f64,
    /// Time left on the "LEVEL n" banner
    pub level_banner_ms: f64,

    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip, default = "session_rng")]
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle session for a viewport
    pub fn new(seed: u64, width: f32, height: f32, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let spawn_interval_ms = tuning.initial_spawn_interval_ms;
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            frame: 0,
            clock_ms: 0.0,
            width,
            height,
            tuning,
            player: Player::new(Vec2::new(width / 2.0, height / 2.0)),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            spawn_interval_ms,
            spawn_accum_ms: 0.0,
            difficulty_accum_ms: 0.0,
            level_banner_ms: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Begin (or restart) a session: everything but the viewport and RNG resets
    pub fn start(&mut self) {
        self.phase = GamePhase::Active;
        self.score = 0;
        self.level = 1;
        self.frame = 0;
        self.clock_ms = 0.0;
        self.player = Player::new(self.center());
        self.enemies.clear();
        self.projectiles.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.spawn_interval_ms = self.tuning.initial_spawn_interval_ms;
        self.spawn_accum_ms = 0.0;
        self.difficulty_accum_ms = 0.0;
        self.level_banner_ms = 0.0;
        self.next_id = 1;

        log::info!("Session started ({}x{})", self.width, self.height);
        self.events.push(GameEvent::Started);
        self.events.push(GameEvent::ScoreChanged { score: 0 });
    }

    /// Terminal transition: timers stop, final score is published
    pub fn end_game(&mut self) {
        if self.phase != GamePhase::Active {
            return;
        }
        self.phase = GamePhase::GameOver;
        log::info!("Game over: score {} at level {}", self.score, self.level);
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
    }

    /// Current simulation time (ms)
    pub fn now(&self) -> f64 {
        self.clock_ms
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Apply a new viewport size; the player stays centred
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.player.pos = self.center();
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        self.events.push(GameEvent::ScoreChanged { score: self.score });
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_kind_roll_bands() {
        assert_eq!(EnemyKind::from_roll(1, 0.05), EnemyKind::Zigzag);
        assert_eq!(EnemyKind::from_roll(2, 0.05), EnemyKind::Homing);
        assert_eq!(EnemyKind::from_roll(3, 0.05), EnemyKind::Boss);
        assert_eq!(EnemyKind::from_roll(3, 0.15), EnemyKind::Homing);
        assert_eq!(EnemyKind::from_roll(3, 0.25), EnemyKind::Zigzag);
        assert_eq!(EnemyKind::from_roll(9, 0.3), EnemyKind::Standard);
    }

    #[test]
    fn test_points() {
        assert_eq!(EnemyKind::Standard.points(), 100);
        assert_eq!(EnemyKind::Zigzag.points(), 150);
        assert_eq!(EnemyKind::Homing.points(), 250);
        assert_eq!(EnemyKind::Boss.points(), 500);
    }

    #[test]
    fn test_damage_shrinks_toward_fraction() {
        let mut enemy = Enemy::new(1, EnemyKind::Standard, Vec2::ZERO, Vec2::ZERO, 40.0, Tint::WHITE);
        assert_eq!(enemy.health, 4);

        assert!(!enemy.take_damage(1));
        assert_eq!(enemy.health, 3);
        assert_eq!(enemy.target_radius, 30.0);
        // The collidable radius eases instead of snapping
        assert_eq!(enemy.radius, 40.0);
        enemy.advance(Vec2::ZERO, 1, 0.0, 500.0);
        assert!(enemy.radius < 40.0 && enemy.radius > 30.0);
        for _ in 0..200 {
            enemy.advance(Vec2::ZERO, 1, 0.0, 500.0);
        }
        assert_eq!(enemy.radius, 30.0);

        // Second hit scales the already shrunk radius: 30 * 2/4
        assert!(!enemy.take_damage(1));
        assert_eq!(enemy.health, 2);
        assert_eq!(enemy.target_radius, 15.0);
        for _ in 0..200 {
            enemy.advance(Vec2::ZERO, 1, 0.0, 500.0);
        }
        assert_eq!(enemy.radius, 15.0);

        assert!(enemy.take_damage(10));
        assert_eq!(enemy.health, 0);
    }

    #[test]
    fn test_homing_retargets_every_interval() {
        let mut enemy = Enemy::new(1, EnemyKind::Homing, Vec2::ZERO, Vec2::ZERO, 20.0, Tint::WHITE);
        enemy.advance(Vec2::new(100.0, 0.0), 1, 0.0, 500.0);
        assert_eq!(enemy.last_retarget_ms, Some(0.0));
        assert!((enemy.vel.length() - homing_speed(1)).abs() < 1e-5);
        assert!(enemy.vel.x > 0.0);

        // Player moves behind; no re-aim until the interval passes
        enemy.advance(Vec2::new(-100.0, 0.0), 1, 400.0, 500.0);
        assert!(enemy.vel.x > 0.0);
        enemy.advance(Vec2::new(-100.0, 0.0), 1, 600.0, 500.0);
        assert!(enemy.vel.x < 0.0);
        assert_eq!(enemy.last_retarget_ms, Some(600.0));
    }

    #[test]
    fn test_zigzag_and_boss_motion() {
        let mut zig = Enemy::new(1, EnemyKind::Zigzag, Vec2::ZERO, Vec2::new(1.0, 0.0), 20.0, Tint::WHITE);
        zig.advance(Vec2::ZERO, 1, 0.0, 500.0);
        assert!((zig.pos.x - 1.0).abs() < 1e-5);
        assert!((zig.pos.y - 0.05f32.sin() * 2.0).abs() < 1e-5);

        let mut boss = Enemy::new(2, EnemyKind::Boss, Vec2::ZERO, Vec2::new(1.0, 1.0), 45.0, Tint::WHITE);
        boss.advance(Vec2::ZERO, 3, 0.0, 500.0);
        assert!((boss.pos.x - 0.7).abs() < 1e-5);
        assert!((boss.pos.y - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_particle_fades() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            radius: 2.0,
            tint: Tint::WHITE,
            alpha: 1.0,
        };
        p.advance();
        assert!((p.vel.x - 0.98).abs() < 1e-6);
        assert!((p.alpha - 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_timers_expire() {
        let mut timers = PowerUpTimers::default();
        timers.set(PowerUpKind::Shield, 1000.0);
        timers.set(PowerUpKind::RapidFire, 3000.0);
        assert!(timers.is_active(PowerUpKind::Shield, 999.0));
        timers.expire(1500.0);
        assert_eq!(timers.shield, 0.0);
        assert_eq!(timers.rapid_fire, 3000.0);
        assert_eq!(timers.remaining_ms(PowerUpKind::RapidFire, 1500.0), 1500.0);
    }

    #[test]
    fn test_power_up_blinks_late() {
        let p = PowerUp {
            id: 1,
            kind: PowerUpKind::Shield,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: POWER_UP_RADIUS,
            created_ms: 0.0,
            lifespan_ms: 10_000.0,
        };
        assert!(!p.is_blinking(6000.0));
        assert!(p.is_blinking(7500.0));
        assert!(!p.expired(9999.0));
        assert!(p.expired(10_000.0));
    }

    #[test]
    fn test_new_session_sanitizes_tuning() {
        let tuning = Tuning {
            power_up_chance: f64::NAN,
            fire_cooldown_ms: -50.0,
            ..Tuning::default()
        };
        let state = GameState::new(1, 800.0, 600.0, tuning);
        assert_eq!(state.tuning.power_up_chance, 0.0);
        assert_eq!(state.tuning.fire_cooldown_ms, 0.0);
    }

    proptest! {
        #[test]
        fn health_matches_radius(radius in 1.0f32..120.0, damage in 0u32..20) {
            let mut enemy = Enemy::new(1, EnemyKind::Standard, Vec2::ZERO, Vec2::ZERO, radius, Tint::WHITE);
            prop_assert_eq!(enemy.health, (radius / 10.0).ceil() as u32);
            let killed = enemy.take_damage(damage);
            prop_assert_eq!(killed, enemy.health == 0);
            prop_assert!(enemy.target_radius <= enemy.original_radius);
        }
    }
}
