//! Render Pass
//!
//! Pure read of the game state into drawing-primitive calls on a
//! `Surface`. The pass never advances timers, spawns entities, or
//! touches currency; it takes the state by shared reference so the
//! compiler holds that line. Exact visuals are host territory; this
//! module only decides what gets drawn where.

use crate::game::config::{GameConfig, HostileObjective};
use crate::game::state::{GameState, ParticleKind};

/// A fixed-size 2D drawing surface.
///
/// Colors are CSS-style strings, matching what the browser hosts feed
/// straight into a canvas context.
pub trait Surface {
    /// Fill the whole surface.
    fn clear(&mut self, color: &str);

    /// Set the global alpha for subsequent calls.
    fn set_alpha(&mut self, alpha: f64);

    /// Axis-aligned filled rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);

    /// Filled circle.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);

    /// Circle outline.
    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);

    /// Line segment.
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str);

    /// Text anchored at a baseline point.
    fn text(&mut self, x: f64, y: f64, text: &str, color: &str);
}

const SKY: &str = "#4A90E2";
const GROUND: &str = "#8B7355";
const GOLD: &str = "#FFD700";
const HOSTILE: &str = "#8B0000";
const HEALTH_BAR: &str = "#2ECC40";
const SOLDIER: &str = "#696969";
const PLAYER: &str = "#8B6914";
const WING: &str = "#654321";
const KEEP: &str = "#555555";
const HUD: &str = "#FFFFFF";

const GROUND_HEIGHT: f64 = 50.0;

/// Draw one frame of the current state.
pub fn render(state: &GameState, config: &GameConfig, surface: &mut impl Surface) {
    surface.clear(SKY);
    surface.fill_rect(
        0.0,
        config.height - GROUND_HEIGHT,
        config.width,
        GROUND_HEIGHT,
        GROUND,
    );

    // The keep, where a variant defends one.
    if matches!(
        config.hostiles.as_ref().map(|h| h.objective),
        Some(HostileObjective::Keep)
    ) {
        let center = config.center();
        surface.fill_circle(center.x, center.y, 18.0, KEEP);
    }

    for piece in &state.collectibles {
        surface.set_alpha(piece.opacity.clamp(0.0, 1.0));
        surface.fill_circle(piece.position.x, piece.position.y, 8.0, GOLD);
        surface.set_alpha(1.0);
    }

    for hostile in &state.hostiles {
        surface.fill_circle(hostile.position.x, hostile.position.y, 12.0, HOSTILE);
        let fraction = (hostile.health / hostile.max_health).clamp(0.0, 1.0);
        surface.fill_rect(
            hostile.position.x - 12.0,
            hostile.position.y - 18.0,
            24.0 * fraction,
            3.0,
            HEALTH_BAR,
        );
    }

    for soldier in &state.soldiers {
        surface.fill_circle(soldier.position.x, soldier.position.y, 8.0, SOLDIER);
        let tip_x = soldier.position.x + soldier.facing.cos() * 14.0;
        let tip_y = soldier.position.y + soldier.facing.sin() * 14.0;
        surface.line(soldier.position.x, soldier.position.y, tip_x, tip_y, SOLDIER);
    }

    draw_player(state, surface);

    for particle in &state.particles {
        let color = match particle.kind {
            ParticleKind::Sparkle => GOLD,
            ParticleKind::Burst => HOSTILE,
            ParticleKind::Shot => HUD,
        };
        surface.fill_circle(particle.position.x, particle.position.y, 2.5, color);
    }

    draw_hud(state, config, surface);
}

fn draw_player(state: &GameState, surface: &mut impl Surface) {
    let p = state.player.position;
    surface.fill_circle(p.x, p.y, 17.0, PLAYER);

    // Flapping wings, one up one down.
    let flap = state.player.wing_phase.sin() * 15.0;
    surface.line(p.x - 8.0, p.y, p.x - 14.0, p.y - flap, WING);
    surface.line(p.x - 8.0, p.y, p.x - 14.0, p.y + flap, WING);
}

fn draw_hud(state: &GameState, config: &GameConfig, surface: &mut impl Surface) {
    surface.text(
        10.0,
        20.0,
        &format!("{}g", format_amount(state.gold)),
        HUD,
    );
    surface.text(10.0, 40.0, &format!("Lv {}", state.level), HUD);

    if state.combo.count > 0 {
        surface.text(10.0, 60.0, &format!("Combo x{}", state.combo.count), HUD);
    }

    if config.hostiles.is_some() {
        let vitals = format!(
            "HP {}/{}",
            state.player.health.floor(),
            state.stats.max_health.floor()
        );
        surface.text(config.width - 110.0, 20.0, &vitals, HUD);
    }

    if state.downed_for.is_some() {
        surface.text(config.width / 2.0 - 30.0, config.height / 2.0, "DOWN", HUD);
    }
}

/// Compact display form for currency amounts: 2.50M, 1.25K, 999.
pub fn format_amount(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.2}K", value / 1_000.0)
    } else {
        format!("{}", value.floor() as i64)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::config::GameConfig;
    use crate::game::state::GameState;

    /// Surface that just counts primitive calls.
    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        rects: usize,
        circles: usize,
        strokes: usize,
        lines: usize,
        texts: Vec<String>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _color: &str) {
            self.clears += 1;
        }
        fn set_alpha(&mut self, _alpha: f64) {}
        fn fill_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64, _color: &str) {
            self.rects += 1;
        }
        fn fill_circle(&mut self, _x: f64, _y: f64, _radius: f64, _color: &str) {
            self.circles += 1;
        }
        fn stroke_circle(&mut self, _x: f64, _y: f64, _radius: f64, _color: &str) {
            self.strokes += 1;
        }
        fn line(&mut self, _x1: f64, _y1: f64, _x2: f64, _y2: f64, _color: &str) {
            self.lines += 1;
        }
        fn text(&mut self, _x: f64, _y: f64, text: &str, _color: &str) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn test_render_never_mutates_state() {
        let config = GameConfig::goblin_rush();
        let mut state = GameState::new(&config, 5);
        state.spawn_collectible(Vec2::new(50.0, 50.0), 1.0);
        state.spawn_hostile(Vec2::new(10.0, 10.0), 20.0, 40.0, &config);

        let before = serde_json::to_string(&state).unwrap();
        let mut surface = RecordingSurface::default();
        render(&state, &config, &mut surface);
        let after = serde_json::to_string(&state).unwrap();

        assert_eq!(before, after);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_render_draws_every_entity() {
        let config = GameConfig::keep_siege();
        let mut state = GameState::new(&config, 5);
        state.spawn_collectible(Vec2::new(50.0, 50.0), 1.0);
        state.spawn_hostile(Vec2::new(10.0, 10.0), 20.0, 40.0, &config);
        crate::game::soldier::sync_population(&mut state, &config);

        let mut surface = RecordingSurface::default();
        render(&state, &config, &mut surface);

        assert_eq!(surface.clears, 1);
        // keep + piece + hostile + soldier + player at minimum
        assert!(surface.circles >= 5);
        // ground + hostile health bar
        assert!(surface.rects >= 2);
        // soldier facing + two wings
        assert!(surface.lines >= 3);
        // gold and level lines always present
        assert!(surface.texts.iter().any(|t| t.ends_with('g')));
        assert!(surface.texts.iter().any(|t| t.starts_with("Lv ")));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.9), "999");
        assert_eq!(format_amount(1000.0), "1.00K");
        assert_eq!(format_amount(1250.0), "1.25K");
        assert_eq!(format_amount(2_500_000.0), "2.50M");
    }
}
