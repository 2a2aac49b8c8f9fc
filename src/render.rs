/// Drawing contract between the simulation and whatever paints it.
///
/// `draw` only reads the game state; the backend behind `Surface` decides
/// how logical playfield coordinates become pixels or terminal cells.

use crate::entities::{
    BalloonColor, BalloonKind, GameState, BALLOON_SIZE, BULLET_SIZE, PLAYER_HEIGHT, PLAYER_WIDTH,
    SCREEN_HEIGHT, SCREEN_WIDTH,
};

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Paint {
    Black,
    White,
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Gold,
}

impl Paint {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Paint::Black => (0x00, 0x00, 0x00),
            Paint::White => (0xFF, 0xFF, 0xFF),
            Paint::Red => (0xFF, 0x00, 0x00),
            Paint::Blue => (0x00, 0x00, 0xFF),
            Paint::Green => (0x00, 0xFF, 0x00),
            Paint::Yellow => (0xFF, 0xFF, 0x00),
            Paint::Purple => (0x80, 0x00, 0x80),
            Paint::Gold => (0xFF, 0xD7, 0x00),
        }
    }
}

impl From<BalloonColor> for Paint {
    fn from(color: BalloonColor) -> Self {
        match color {
            BalloonColor::Red => Paint::Red,
            BalloonColor::Blue => Paint::Blue,
            BalloonColor::Green => Paint::Green,
            BalloonColor::Yellow => Paint::Yellow,
            BalloonColor::Purple => Paint::Purple,
            BalloonColor::Gold => Paint::Gold,
        }
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

/// Minimal 2D drawing surface in playfield coordinates (800×600).
pub trait Surface {
    fn set_fill(&mut self, paint: Paint);
    fn set_stroke(&mut self, paint: Paint, width: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32);
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32);
}

const BARREL_WIDTH: f32 = 10.0;
const BARREL_HEIGHT: f32 = 20.0;
const BARREL_RISE: f32 = 15.0;
const STRING_LENGTH: f32 = 10.0;
const STRING_WIDTH: f32 = 2.0;

// ── Public entry point ────────────────────────────────────────────────────────

/// Paint one complete frame.
pub fn draw<S: Surface>(state: &GameState, surface: &mut S) {
    surface.set_fill(Paint::White);
    surface.fill_rect(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT);

    draw_player(state, surface);

    surface.set_fill(Paint::Black);
    for bullet in &state.bullets {
        surface.fill_rect(bullet.x, bullet.y, BULLET_SIZE, BULLET_SIZE);
    }

    for balloon in &state.balloons {
        let cx = balloon.x + BALLOON_SIZE / 2.0;
        let cy = balloon.y + BALLOON_SIZE / 2.0;

        surface.set_fill(balloon.color.into());
        surface.fill_circle(cx, cy, BALLOON_SIZE / 2.0);

        // String
        surface.set_stroke(Paint::Black, STRING_WIDTH);
        surface.stroke_line(
            cx,
            balloon.y + BALLOON_SIZE,
            cx,
            balloon.y + BALLOON_SIZE + STRING_LENGTH,
        );

        if balloon.kind == BalloonKind::Special {
            surface.set_fill(Paint::White);
            surface.fill_circle(cx, cy, BALLOON_SIZE / 4.0);
        }
    }
}

fn draw_player<S: Surface>(state: &GameState, surface: &mut S) {
    // Body with a barrel poking out of the top centre
    let p = &state.player;
    surface.set_fill(Paint::Black);
    surface.fill_rect(p.x, p.y, PLAYER_WIDTH, PLAYER_HEIGHT);
    surface.fill_rect(
        p.x + PLAYER_WIDTH / 2.0 - BARREL_WIDTH / 2.0,
        p.y - BARREL_RISE,
        BARREL_WIDTH,
        BARREL_HEIGHT,
    );
}
