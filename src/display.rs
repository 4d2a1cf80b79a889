//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! simulation.  No game logic is performed; this module only translates the
//! pixel-space world onto the terminal grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use invaders::compute::SimulationState;
use invaders::entities::{GameStatus, SpriteId};
use invaders::geometry::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_ALIEN_TOP: Color = Color::Magenta;
const C_ALIEN_MID: Color = Color::Cyan;
const C_ALIEN_LOW: Color = Color::Green;
const C_MYSTERY: Color = Color::Red;
const C_STRUCTURE: Color = Color::DarkGreen;
const C_LASER: Color = Color::Rgb { r: 243, g: 216, b: 63 };
const C_HINT: Color = Color::DarkGrey;

/// HUD labels.  Rebuilt only when the simulation reports a change.
#[derive(Debug, Clone)]
pub struct Hud {
    pub score: String,
    pub lives: String,
}

impl Hud {
    pub fn new(score: u32, lives: u32) -> Self {
        Self {
            score: format!("Score: {}", score),
            lives: format!("Lives: {}", lives),
        }
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = format!("Score: {}", score);
    }

    pub fn set_lives(&mut self, lives: u32) {
        self.lives = format!("Lives: {}", lives);
    }
}

/// Maps world pixels onto the play area inside the border.
struct Viewport {
    cols: f32,
    rows: f32,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    fn new(width: u16, height: u16, state: &SimulationState) -> Self {
        let cols = width.saturating_sub(2).max(1) as f32;
        let rows = height.saturating_sub(4).max(1) as f32;
        Self {
            cols,
            rows,
            scale_x: cols / state.config.screen_width,
            scale_y: rows / state.config.screen_height,
        }
    }

    /// Top-left cell and width in cells, or `None` if fully off screen.
    fn project(&self, rect: &Rect) -> Option<(u16, u16, usize)> {
        let col = (rect.x as f32 * self.scale_x).floor();
        let row = (rect.y as f32 * self.scale_y).floor();
        let span = ((rect.width as f32 * self.scale_x).round() as usize).max(1);

        if col + span as f32 <= 0.0 || col >= self.cols || row < 0.0 || row >= self.rows {
            return None;
        }
        let col = col.max(0.0);
        let span = span.min((self.cols - col) as usize).max(1);
        Some((col as u16 + 1, row as u16 + 2, span))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &SimulationState, hud: &Hud) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(width, height, state);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, hud, width)?;

    let registry = &state.registry;
    if !registry.mystery_ship.destroyed {
        draw_sprite(out, &view, &registry.mystery_ship.bounds, registry.mystery_ship.sprite)?;
    }
    for alien in registry.live_aliens() {
        draw_sprite(out, &view, &alien.bounds, alien.sprite)?;
    }
    for structure in registry.live_structures() {
        draw_sprite(out, &view, &structure.bounds, structure.sprite)?;
    }
    for laser in registry
        .player_lasers
        .iter()
        .chain(registry.alien_lasers.iter())
        .filter(|l| !l.destroyed)
    {
        draw_laser(out, &view, &laser.bounds)?;
    }
    draw_sprite(out, &view, &registry.player.bounds, registry.player.sprite)?;

    draw_controls_hint(out, height)?;

    match state.status {
        GameStatus::Paused => draw_banner(out, width, height, &[("PAUSED", Color::Yellow)])?,
        GameStatus::Over => draw_game_over(out, state, width, height)?,
        GameStatus::Active => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&hud.score))?;

    let lx = width.saturating_sub(hud.lives.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&hud.lives))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn sprite_style(sprite: SpriteId) -> (&'static str, Color) {
    match sprite {
        SpriteId::Alien3 => ("<o>", C_ALIEN_TOP),
        SpriteId::Alien2 => ("{#}", C_ALIEN_MID),
        SpriteId::Alien1 => ("/M\\", C_ALIEN_LOW),
        SpriteId::Mystery => ("<=O=>", C_MYSTERY),
        SpriteId::Player => ("/▲\\", C_PLAYER),
        SpriteId::Structure => ("▓", C_STRUCTURE),
    }
}

/// Fit a glyph to `span` cells: repeat single-char glyphs, otherwise pad or cut.
fn fit_glyph(glyph: &str, span: usize) -> String {
    let len = glyph.chars().count();
    if len == 1 {
        glyph.repeat(span)
    } else if len >= span {
        glyph.chars().take(span).collect()
    } else {
        format!("{:^width$}", glyph, width = span)
    }
}

fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    bounds: &Rect,
    sprite: SpriteId,
) -> std::io::Result<()> {
    let Some((col, row, span)) = view.project(bounds) else {
        return Ok(());
    };
    let (glyph, color) = sprite_style(sprite);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(fit_glyph(glyph, span)))?;
    Ok(())
}

fn draw_laser<W: Write>(out: &mut W, view: &Viewport, bounds: &Rect) -> std::io::Result<()> {
    if let Some((col, row, _)) = view.project(bounds) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_LASER))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   P : Pause   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &SimulationState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score());
    draw_banner(
        out,
        width,
        height,
        &[
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            ("R - Play Again  Q - Quit", Color::White),
        ],
    )
}
