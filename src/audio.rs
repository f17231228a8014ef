//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects, driven by the simulation's event queue.

use crate::sim::{EnemyKind, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fires
    Shoot,
    /// Projectile wounds an enemy
    EnemyHit,
    /// Regular enemy destroyed
    EnemyDestroyed,
    /// Boss destroyed
    BossDestroyed,
    /// Shield soaks a collision
    ShieldAbsorb,
    /// Power-up collected
    PowerUpCollect,
    /// Difficulty level increased
    LevelUp,
    GameOver,
}

impl SoundEffect {
    /// Which sound (if any) an event should trigger
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Fired { .. } => Some(SoundEffect::Shoot),
            GameEvent::EnemyHit { .. } => Some(SoundEffect::EnemyHit),
            GameEvent::EnemyDestroyed {
                kind: EnemyKind::Boss,
                ..
            } => Some(SoundEffect::BossDestroyed),
            GameEvent::EnemyDestroyed { .. } => Some(SoundEffect::EnemyDestroyed),
            GameEvent::ShieldAbsorb { .. } => Some(SoundEffect::ShieldAbsorb),
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::PowerUpCollect),
            GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::Started
            | GameEvent::EnemySpawned { .. }
            | GameEvent::PowerUpSpawned { .. }
            | GameEvent::ScoreChanged { .. } => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: settings.master_volume.clamp(0.0, 1.0),
                muted: !settings.sound,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.master_volume }
        }

        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Shoot => self.play_shoot(ctx, vol),
                SoundEffect::EnemyHit => self.play_enemy_hit(ctx, vol),
                SoundEffect::EnemyDestroyed => self.play_pop(ctx, vol),
                SoundEffect::BossDestroyed => self.play_boss_down(ctx, vol),
                SoundEffect::ShieldAbsorb => self.play_shield(ctx, vol),
                SoundEffect::PowerUpCollect => {
                    self.play_arpeggio(ctx, vol * 0.25, &[600.0, 800.0, 1000.0], 0.08, 0.15)
                }
                SoundEffect::LevelUp => {
                    self.play_arpeggio(ctx, vol * 0.3, &[400.0, 500.0, 600.0, 800.0], 0.1, 0.4)
                }
                SoundEffect::GameOver => {
                    self.play_arpeggio(ctx, vol * 0.3, &[400.0, 350.0, 300.0, 200.0], 0.2, 0.3)
                }
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short pitch sweep with an exponential decay
        fn sweep(
            &self,
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            peak: f32,
            decay: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(peak, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + decay)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + decay)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + decay + 0.05).ok();
        }

        /// Pew - fires often, so it stays quiet
        fn play_shoot(&self, ctx: &AudioContext, vol: f32) {
            self.sweep(ctx, OscillatorType::Square, 880.0, 440.0, vol * 0.08, 0.08);
        }

        fn play_enemy_hit(&self, ctx: &AudioContext, vol: f32) {
            self.sweep(ctx, OscillatorType::Triangle, 300.0, 200.0, vol * 0.25, 0.05);
        }

        /// Orb pops - low boom plus a bright crack
        fn play_pop(&self, ctx: &AudioContext, vol: f32) {
            self.sweep(ctx, OscillatorType::Sawtooth, 100.0, 30.0, vol * 0.4, 0.3);

            let t = ctx.current_time();
            if let Some((osc, gain)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.15).ok();
            }
        }

        /// Boss down - deep metallic clang
        fn play_boss_down(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            self.sweep(ctx, OscillatorType::Sine, 80.0, 40.0, vol * 0.5, 0.25);

            if let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.frequency().set_value_at_time(400.0, t).ok();
                osc.frequency().set_value_at_time(300.0, t + 0.05).ok();
                osc.frequency().set_value_at_time(200.0, t + 0.1).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.25).ok();
            }
        }

        /// Shield absorb - shimmering chime
        fn play_shield(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [1200.0, 1800.0, 2400.0].iter().enumerate() {
                let delay = i as f64 * 0.02;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.2, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.35).ok();
                }
            }
        }

        /// Notes played one after another
        fn play_arpeggio(&self, ctx: &AudioContext, peak: f32, notes: &[f32], step: f64, decay: f64) {
            for (i, freq) in notes.iter().enumerate() {
                let delay = i as f64 * step;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(peak, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + decay)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + decay + 0.1).ok();
                }
            }
        }
    }
}
