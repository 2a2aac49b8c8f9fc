/// Rendering layer — all terminal I/O lives here.
///
/// `TerminalCanvas` rasterises the playfield drawing primitives onto a grid
/// of character cells; `render_frame` writes that grid plus the HUD to the
/// terminal.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::entities::{GameState, TickEvents, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::persistence::{persist_tick, ScoreStore};
use crate::render::{Paint, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS_HINT: &str = "← → / A D : Move   SPACE : Shoot   Q : Quit";

fn to_color(paint: Paint) -> Color {
    let (r, g, b) = paint.rgb();
    Color::Rgb { r, g, b }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

/// A `Surface` backed by a grid of coloured terminal cells.
///
/// Each cell covers an equal slice of the 800×600 playfield.  A primitive
/// paints every cell whose centre it covers, and always at least the cell
/// holding its own centre, so small shapes such as bullets never vanish.
pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    cells: Vec<Paint>,
    fill: Paint,
    stroke: Paint,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![Paint::White; cols as usize * rows as usize],
            fill: Paint::Black,
            stroke: Paint::Black,
        }
    }

    /// Canvas for a terminal of the given size, leaving the top row for the
    /// HUD and the bottom row for the controls hint.
    pub fn for_terminal(width: u16, height: u16) -> Self {
        Self::new(width, height.saturating_sub(2))
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<Paint> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row as usize * self.cols as usize + col as usize])
    }

    fn cell_width(&self) -> f32 {
        SCREEN_WIDTH / self.cols as f32
    }

    fn cell_height(&self) -> f32 {
        SCREEN_HEIGHT / self.rows as f32
    }

    fn put(&mut self, col: i64, row: i64, paint: Paint) {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells[idx] = paint;
    }

    /// Cell containing a playfield point.
    fn cell_at(&self, x: f32, y: f32) -> (i64, i64) {
        (
            (x / self.cell_width()).floor() as i64,
            (y / self.cell_height()).floor() as i64,
        )
    }
}

/// Index range of cells whose centres fall inside `[lo, hi)`.
fn centre_span(lo: f32, hi: f32, cell: f32) -> (i64, i64) {
    let first = (lo / cell - 0.5).ceil() as i64;
    let last = (hi / cell - 0.5).ceil() as i64 - 1;
    (first, last)
}

impl Surface for TerminalCanvas {
    fn set_fill(&mut self, paint: Paint) {
        self.fill = paint;
    }

    // Lines are always one cell thick; the width has no visible effect at
    // terminal resolution.
    fn set_stroke(&mut self, paint: Paint, _width: f32) {
        self.stroke = paint;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (c0, c1) = centre_span(x, x + width, self.cell_width());
        let (r0, r1) = centre_span(y, y + height, self.cell_height());
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.put(col, row, self.fill);
            }
        }
        let (col, row) = self.cell_at(x + width / 2.0, y + height / 2.0);
        self.put(col, row, self.fill);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        let cw = self.cell_width();
        let ch = self.cell_height();
        let (c0, c1) = centre_span(cx - radius, cx + radius, cw);
        let (r0, r1) = centre_span(cy - radius, cy + radius, ch);
        for row in r0..=r1 {
            for col in c0..=c1 {
                let dx = (col as f32 + 0.5) * cw - cx;
                let dy = (row as f32 + 0.5) * ch - cy;
                if dx * dx + dy * dy <= radius * radius {
                    self.put(col, row, self.fill);
                }
            }
        }
        let (col, row) = self.cell_at(cx, cy);
        self.put(col, row, self.fill);
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        let steps = ((x1 - x0).abs() / self.cell_width())
            .max((y1 - y0).abs() / self.cell_height())
            .ceil() as i64
            + 1;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let (col, row) = self.cell_at(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t);
            self.put(col, row, self.stroke);
        }
    }
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// The four text regions shown above the playfield.
///
/// Score and high score change only after a hit; level and threshold only
/// after a level-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub high_score: String,
    pub level: String,
    pub next_level: String,
}

impl Hud {
    pub fn new(state: &GameState) -> Self {
        Self {
            score: score_text(state),
            high_score: high_score_text(state),
            level: level_text(state),
            next_level: next_level_text(state),
        }
    }

    /// Refresh whichever regions the tick touched.
    pub fn apply(&mut self, state: &GameState, events: &TickEvents) {
        if events.scored {
            self.score = score_text(state);
            self.high_score = high_score_text(state);
        }
        if events.leveled_up {
            self.level = level_text(state);
            self.next_level = next_level_text(state);
        }
    }
}

fn score_text(state: &GameState) -> String {
    format!("Score: {}", state.score)
}

fn high_score_text(state: &GameState) -> String {
    format!("High Score: {}", state.high_score)
}

fn level_text(state: &GameState) -> String {
    format!("Level: {}", state.level)
}

fn next_level_text(state: &GameState) -> String {
    format!("Next level at: {}", state.next_level_at)
}

// ── Tick observers ────────────────────────────────────────────────────────────

/// Everything that reacts to a finished tick: HUD text and the saved best.
pub fn apply_tick(
    hud: &mut Hud,
    store: &mut impl ScoreStore,
    state: &GameState,
    events: &TickEvents,
) {
    hud.apply(state, events);
    persist_tick(store, events);
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Write one complete frame: HUD row, playfield cells, controls hint.
pub fn render_frame<W: Write>(
    out: &mut W,
    canvas: &TerminalCanvas,
    hud: &Hud,
) -> std::io::Result<()> {
    draw_hud(out, canvas, hud)?;
    draw_playfield(out, canvas)?;
    draw_controls_hint(out, canvas)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, canvas.rows + 1))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, canvas: &TerminalCanvas, hud: &Hud) -> std::io::Result<()> {
    let width = canvas.cols as usize;
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::ResetColor)?;
    out.queue(Print(" ".repeat(width)))?;

    // Score and high score — left
    let left = format!(" {}  {}", hud.score, hud.high_score);
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&left))?;

    // Level and threshold — right
    let right = format!("{}  {} ", hud.level, hud.next_level);
    let rx = canvas
        .cols
        .saturating_sub(right.chars().count() as u16)
        .max(left.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&right))?;
    Ok(())
}

// ── Playfield (rows 1..=rows) ─────────────────────────────────────────────────

fn draw_playfield<W: Write>(out: &mut W, canvas: &TerminalCanvas) -> std::io::Result<()> {
    for row in 0..canvas.rows {
        out.queue(cursor::MoveTo(0, row + 1))?;
        let mut current: Option<Paint> = None;
        let mut run = String::new();
        for col in 0..canvas.cols {
            let paint = canvas.cells[row as usize * canvas.cols as usize + col as usize];
            if current != Some(paint) {
                if let Some(prev) = current {
                    out.queue(style::SetBackgroundColor(to_color(prev)))?;
                    out.queue(Print(&run))?;
                    run.clear();
                }
                current = Some(paint);
            }
            run.push(' ');
        }
        if let Some(prev) = current {
            out.queue(style::SetBackgroundColor(to_color(prev)))?;
            out.queue(Print(&run))?;
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, canvas: &TerminalCanvas) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, canvas.rows + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS_HINT))?;
    Ok(())
}
