//! 2D rendering module
//!
//! The draw pass only reads [`GameState`]; it issues primitive calls against a
//! [`Surface`], so the browser canvas and headless tests share one code path.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{GameState, PowerUpKind};
use shapes::*;

const HUD_FONT: &str = "16px Arial";
const LEVEL_FONT: &str = "18px Arial";
const BANNER_FONT: &str = "bold 40px Arial";
const HUD_COLOR: &str = "#ffffff";

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Minimal immediate-mode 2D drawing target
pub trait Surface {
    /// Wash the whole surface with a (usually translucent) colour
    fn fade(&mut self, color: &str);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    /// Stroke an arc from `start` to `end` radians, clockwise
    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: &str, width: f32);
    /// Fill a circle with a radial gradient; stops are (offset, colour)
    fn gradient_circle(&mut self, center: Vec2, radius: f32, stops: &[(f32, &str)]);
    /// Fill a closed polygon
    fn fill_path(&mut self, points: &[Vec2], color: &str);
    fn text(&mut self, text: &str, pos: Vec2, font: &str, color: &str, align: TextAlign);
    /// Global opacity for subsequent calls
    fn set_alpha(&mut self, alpha: f32);
}

/// Draw one frame of the session
pub fn draw_frame(surface: &mut impl Surface, state: &GameState, settings: &Settings) {
    let now = state.now();

    surface.fade(&format!("rgba(0, 0, 0, {})", settings.trail_alpha()));

    draw_player(surface, state, settings);

    if settings.particles {
        for p in &state.particles {
            surface.set_alpha(p.alpha.clamp(0.0, 1.0));
            surface.fill_circle(p.pos, p.radius, &css(p.tint));
        }
        surface.set_alpha(1.0);
    }

    for power_up in &state.power_ups {
        let alpha = if settings.effective_blink() && power_up.is_blinking(now) {
            pulse(now, 0.5, 0.5)
        } else {
            1.0
        };
        surface.set_alpha(alpha);
        let color = power_up_color(power_up.kind);
        surface.gradient_circle(
            power_up.pos,
            power_up.radius,
            &[(0.0, "#ffffff"), (0.5, color), (1.0, "#000000")],
        );
        draw_power_up_icon(surface, power_up.kind, power_up.pos);
    }
    surface.set_alpha(1.0);

    // Entities marked during a game-over step are never compacted
    for projectile in state.projectiles.iter().filter(|p| !p.spent) {
        surface.fill_circle(projectile.pos, projectile.radius, PROJECTILE_COLOR);
    }

    for enemy in state.enemies.iter().filter(|e| !e.destroyed) {
        let radius = (enemy.radius + enemy.pulse).max(1.0);
        let color = css(enemy.tint);
        match enemy_rim(enemy.kind) {
            Some((offset, rim)) => {
                let stops = [(0.0, "#ffffff"), (offset, color.as_str()), (1.0, rim)];
                surface.gradient_circle(enemy.pos, radius, &stops)
            }
            None => surface.fill_circle(enemy.pos, radius, &color),
        }

        if enemy.health > 1 {
            let sweep = std::f32::consts::TAU * enemy.health_fraction();
            let ring = (enemy.radius - 2.0).max(0.0);
            surface.stroke_arc(enemy.pos, ring, 0.0, sweep, HEALTH_RING_COLOR, 2.0);
        }
    }

    draw_hud(surface, state, settings);
}

fn draw_player(surface: &mut impl Surface, state: &GameState, settings: &Settings) {
    let player = &state.player;
    let now = state.now();

    if player.shielded(now) {
        let alpha = if settings.effective_blink() {
            pulse(now, 0.3, 0.2)
        } else {
            0.4
        };
        surface.stroke_arc(
            player.pos,
            player.radius + 10.0,
            0.0,
            std::f32::consts::TAU,
            &format!("rgba(77, 255, 255, {:.2})", alpha),
            3.0,
        );
    }

    surface.fill_circle(player.pos, player.radius, PLAYER_COLOR);
    surface.fill_circle(player.pos, player.radius * 0.7, "#ffffff");
}

fn draw_power_up_icon(surface: &mut impl Surface, kind: PowerUpKind, center: Vec2) {
    match kind {
        PowerUpKind::MultiShot => {
            for dot in multi_shot_dots(center) {
                surface.fill_circle(dot, 2.0, "#ffffff");
            }
        }
        PowerUpKind::RapidFire => surface.fill_path(&lightning_bolt(center), "#ffffff"),
        PowerUpKind::Shield => {
            surface.stroke_arc(center, 5.0, 0.0, std::f32::consts::TAU, "#ffffff", 2.0)
        }
    }
}

fn draw_hud(surface: &mut impl Surface, state: &GameState, settings: &Settings) {
    let now = state.now();

    if settings.show_power_up_timers {
        let timers = &state.player.power_ups;
        let active = PowerUpKind::ALL
            .into_iter()
            .filter(|&kind| timers.is_active(kind, now));
        for (i, kind) in active.enumerate() {
            let secs = (timers.remaining_ms(kind, now) / 1000.0).ceil();
            surface.text(
                &format!("{}: {}s", kind.label(), secs),
                Vec2::new(40.0 + 150.0 * i as f32, 40.0),
                HUD_FONT,
                power_up_color(kind),
                TextAlign::Left,
            );
        }
    }

    surface.text(
        &format!("Level: {}", state.level()),
        Vec2::new(state.width - 100.0, 40.0),
        LEVEL_FONT,
        HUD_COLOR,
        TextAlign::Left,
    );

    if state.level_banner_ms > 0.0 {
        let banner_alpha = if settings.effective_blink() {
            (state.level_banner_ms / state.tuning.level_banner_ms.max(1.0)).clamp(0.0, 1.0) as f32
        } else {
            1.0
        };
        surface.set_alpha(banner_alpha);
        surface.text(
            &format!("LEVEL {}", state.level()),
            state.center(),
            BANNER_FONT,
            HUD_COLOR,
            TextAlign::Center,
        );
        surface.set_alpha(1.0);
    }
}
