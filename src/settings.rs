//! Presentation preferences
//!
//! Read from the page's query string (`?quality=low&sound=off`). Nothing is
//! stored between visits.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 150,
            QualityPreset::Medium => 1000,
            QualityPreset::High => 3000,
        }
    }

    /// Opacity of the per-frame background wash (higher = shorter trails)
    pub fn trail_alpha(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.35,
            QualityPreset::Medium => 0.1,
            QualityPreset::High => 0.08,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle effects (explosions, pickup bursts, level-up bursts)
    pub particles: bool,
    /// Motion trails behind moving objects
    pub trails: bool,

    // === HUD ===
    /// Show active power-up countdowns
    pub show_power_up_timers: bool,

    // === Audio ===
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no blinking, no shield pulse)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            particles: true,
            trails: true,

            show_power_up_timers: true,

            sound: true,
            master_volume: 0.8,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops trails for performance
        if preset == QualityPreset::Low {
            self.trails = false;
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Opacity of the background wash drawn at the start of each frame
    pub fn trail_alpha(&self) -> f32 {
        if self.trails {
            self.quality.trail_alpha()
        } else {
            1.0
        }
    }

    /// Effective blink/pulse animation (respects reduced_motion)
    pub fn effective_blink(&self) -> bool {
        !self.reduced_motion
    }

    /// Query keys read by [`Settings::from_params`]
    pub const PARAM_KEYS: [&'static str; 7] = [
        "quality",
        "particles",
        "trails",
        "timers",
        "sound",
        "reduced_motion",
        "volume",
    ];

    /// Build settings from decoded query parameters such as `quality=low`.
    ///
    /// `get` returns the value for a key, if present. Unknown keys and
    /// unparseable values are ignored.
    pub fn from_params(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        for key in Self::PARAM_KEYS {
            let Some(value) = get(key) else { continue };
            let value = value.trim();
            match key {
                "quality" => match QualityPreset::from_str(value) {
                    Some(preset) => settings.apply_preset(preset),
                    None => log::warn!("Unknown quality preset: {}", value),
                },
                "particles" => set_flag(&mut settings.particles, value),
                "trails" => set_flag(&mut settings.trails, value),
                "timers" => set_flag(&mut settings.show_power_up_timers, value),
                "sound" => set_flag(&mut settings.sound, value),
                "reduced_motion" => set_flag(&mut settings.reduced_motion, value),
                "volume" => {
                    if let Ok(v) = value.parse::<f32>() {
                        settings.master_volume = v.clamp(0.0, 1.0);
                    }
                }
                _ => {}
            }
        }

        settings
    }

    /// Load settings from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params = web_sys::UrlSearchParams::new_with_str(&search).ok();
        let settings = Self::from_params(|key| params.as_ref().and_then(|p| p.get(key)));
        log::info!("Settings: quality={}", settings.quality.as_str());
        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn set_flag(flag: &mut bool, value: &str) {
    // A bare `?sound` arrives as an empty value
    match value {
        "" | "1" | "on" | "true" | "yes" => *flag = true,
        "0" | "off" | "false" | "no" => *flag = false,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_params(|key| map.get(key).cloned())
    }

    #[test]
    fn test_from_params() {
        let s = from_pairs(&[("quality", "low"), ("sound", "off"), ("volume", "0.25")]);
        assert_eq!(s.quality, QualityPreset::Low);
        assert!(!s.trails);
        assert!(!s.sound);
        assert_eq!(s.master_volume, 0.25);
    }

    #[test]
    fn test_decoded_values() {
        // What `?quality=%20High%20&reduced_motion` decodes to
        let s = from_pairs(&[("quality", " High "), ("reduced_motion", "")]);
        assert_eq!(s.quality, QualityPreset::High);
        assert!(s.reduced_motion);
        assert!(!s.effective_blink());
    }

    #[test]
    fn test_from_params_ignores_garbage() {
        let s = from_pairs(&[
            ("quality", "ultra"),
            ("volume", "loud"),
            ("bogus", "1"),
            ("particles", "maybe"),
        ]);
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_particles_off_caps_to_zero() {
        let s = from_pairs(&[("particles", "off")]);
        assert_eq!(s.max_particles(), 0);
        assert_eq!(Settings::from_preset(QualityPreset::High).max_particles(), 3000);
    }

    #[test]
    fn test_trail_alpha() {
        assert_eq!(Settings::from_preset(QualityPreset::Low).trail_alpha(), 1.0);
        assert!(Settings::default().trail_alpha() < 1.0);
    }
}
