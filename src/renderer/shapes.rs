//! Colours and icon geometry for 2D primitives

use glam::Vec2;

use crate::sim::{EnemyKind, PowerUpKind, Tint};

pub const PLAYER_COLOR: &str = "#4df0ff";
pub const PROJECTILE_COLOR: &str = "#ffffff";
pub const HEALTH_RING_COLOR: &str = "rgba(255, 255, 255, 0.5)";

/// CSS colour for a tint
pub fn css(tint: Tint) -> String {
    match tint {
        Tint::Hue(hue) => format!("hsl({:.0}, 70%, 50%)", hue),
        Tint::Rgb(rgb) => format!("#{:06x}", rgb & 0xffffff),
    }
}

/// Badge colour for a power-up
pub fn power_up_color(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::MultiShot => "#ffff00",
        PowerUpKind::RapidFire => "#ff0000",
        PowerUpKind::Shield => "#00ffff",
    }
}

/// Dark rim colour of an enemy's radial gradient (`None` = flat fill)
pub fn enemy_rim(kind: EnemyKind) -> Option<(f32, &'static str)> {
    match kind {
        EnemyKind::Standard => None,
        EnemyKind::Boss => Some((0.4, "#440000")),
        EnemyKind::Zigzag => Some((0.6, "#004400")),
        EnemyKind::Homing => Some((0.6, "#000044")),
    }
}

/// Centres of the three dots on the multi-shot badge
pub fn multi_shot_dots(center: Vec2) -> [Vec2; 3] {
    [
        center + Vec2::new(0.0, -5.0),
        center + Vec2::new(-4.0, 3.0),
        center + Vec2::new(4.0, 3.0),
    ]
}

/// Lightning bolt outline for the rapid-fire badge
pub fn lightning_bolt(center: Vec2) -> [Vec2; 7] {
    [
        center + Vec2::new(-3.0, -5.0),
        center + Vec2::new(2.0, 0.0),
        center + Vec2::new(-1.0, 0.0),
        center + Vec2::new(3.0, 5.0),
        center + Vec2::new(0.0, 1.0),
        center + Vec2::new(3.0, 1.0),
        center + Vec2::new(-3.0, -5.0),
    ]
}

/// Pulsing opacity used by the shield ring and expiring power-ups
pub fn pulse(now: f64, base: f32, amplitude: f32) -> f32 {
    base + (now / 100.0).sin() as f32 * amplitude
}
