/// All game entity types — pure data, no logic.
///
/// Distances are logical playfield units per tick, not per second: the
/// simulation speed is tied to how often the host calls `tick`.

// ── Playfield & entity dimensions ─────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 30.0;
pub const PLAYER_SPEED: f32 = 8.0;

pub const BULLET_SIZE: f32 = 5.0;
pub const BULLET_SPEED: f32 = 10.0;

pub const BALLOON_SIZE: f32 = 40.0;

/// Holding fire yields one bullet on every frame divisible by this.
pub const FIRE_INTERVAL: u64 = 10;

// ── Scoring & levels ──────────────────────────────────────────────────────────

pub const NORMAL_POINTS: u32 = 10;
pub const SPECIAL_POINTS: u32 = 30;

pub const FIRST_LEVEL_THRESHOLD: u32 = 100;
pub const LEVEL_MULTIPLIER: f64 = 1.5;

// ── Balloons ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalloonKind {
    Normal,
    Special,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalloonColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    /// Reserved for special balloons.
    Gold,
}

/// Colours a normal balloon is drawn from.
pub const NORMAL_PALETTE: [BalloonColor; 5] = [
    BalloonColor::Red,
    BalloonColor::Blue,
    BalloonColor::Green,
    BalloonColor::Yellow,
    BalloonColor::Purple,
];

#[derive(Clone, Debug, PartialEq)]
pub struct Balloon {
    /// Left edge of the hit box.
    pub x: f32,
    /// Top edge of the hit box.
    pub y: f32,
    /// Downward distance per tick, fixed at spawn.
    pub speed: f32,
    pub color: BalloonColor,
    pub kind: BalloonKind,
    pub points: u32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
}

// ── Collision boxes ───────────────────────────────────────────────────────────

/// Axis-aligned box in playfield coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: BULLET_SIZE,
            height: BULLET_SIZE,
        }
    }
}

impl Balloon {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: BALLOON_SIZE,
            height: BALLOON_SIZE,
        }
    }
}

// ── Level tuning ──────────────────────────────────────────────────────────────

/// Difficulty knobs derived from the current level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelSettings {
    pub min_speed: f32,
    pub max_speed: f32,
    /// Ticks between balloon spawns.
    pub spawn_delay: u32,
    /// Probability in [0, 1) that a spawned balloon is special.
    pub special_chance: f64,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Level-triggered key state, sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub balloons: Vec<Balloon>,
    pub score: u32,
    /// Best score seen so far, including the saved one loaded at startup.
    pub high_score: u32,
    pub level: u32,
    /// Score at which the next level-up happens.
    pub next_level_at: u32,
    pub settings: LevelSettings,
    /// Ticks since the last balloon spawn.
    pub spawn_timer: u32,
    /// Ticks since start; the fire-rate gate keys off this.
    pub frame: u64,
}

/// What a single tick surfaced to observers (HUD, persistence).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// At least one balloon was hit this tick.
    pub scored: bool,
    /// The level went up this tick.
    pub leveled_up: bool,
    /// Set when the score beat the previous high score; the value to persist.
    pub new_high_score: Option<u32>,
}
