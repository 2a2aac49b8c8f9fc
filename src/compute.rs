/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use log::{debug, info, trace};
use rand::Rng;

use crate::entities::{
    Balloon, BalloonColor, BalloonKind, Bullet, GameState, InputState, LevelSettings, Player,
    Rect, TickEvents, BALLOON_SIZE, BULLET_SIZE, BULLET_SPEED, FIRE_INTERVAL,
    FIRST_LEVEL_THRESHOLD, LEVEL_MULTIPLIER, NORMAL_PALETTE, NORMAL_POINTS, PLAYER_HEIGHT,
    PLAYER_SPEED, PLAYER_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH, SPECIAL_POINTS,
};

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Tuning for a given level.  Total over all inputs; levels below 1 are not
/// expected but still produce clamped values.
pub fn level_settings(level: u32) -> LevelSettings {
    let l = level as f64;
    LevelSettings {
        min_speed: (1.0 + 0.2 * l) as f32,
        max_speed: (3.0 + 0.3 * l) as f32,
        spawn_delay: (60 - 5 * i64::from(level)).max(10) as u32,
        special_chance: (0.2 + 0.05 * l).min(0.5),
    }
}

/// Score needed for the level after the one reached at `threshold`.
pub fn next_threshold(threshold: u32) -> u32 {
    (f64::from(threshold) * LEVEL_MULTIPLIER).floor() as u32
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state, carrying over a previously saved high score.
pub fn init_state(high_score: u32) -> GameState {
    GameState {
        player: Player {
            x: SCREEN_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
            y: SCREEN_HEIGHT - PLAYER_HEIGHT - 10.0,
        },
        bullets: Vec::new(),
        balloons: Vec::new(),
        score: 0,
        high_score,
        level: 1,
        next_level_at: FIRST_LEVEL_THRESHOLD,
        settings: level_settings(1),
        spawn_timer: 0,
        frame: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// One step left, provided the left edge is still inside the playfield.
pub fn move_player_left(state: &GameState) -> GameState {
    if state.player.x <= 0.0 {
        return state.clone();
    }
    GameState {
        player: Player {
            x: state.player.x - PLAYER_SPEED,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// One step right, provided the right edge is still inside the playfield.
pub fn move_player_right(state: &GameState) -> GameState {
    if state.player.x >= SCREEN_WIDTH - PLAYER_WIDTH {
        return state.clone();
    }
    GameState {
        player: Player {
            x: state.player.x + PLAYER_SPEED,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// A bullet centred on the cannon, starting at its top edge.
pub fn bullet_from(player: &Player) -> Bullet {
    Bullet {
        x: player.x + PLAYER_WIDTH / 2.0 - BULLET_SIZE / 2.0,
        y: player.y,
    }
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Strict AABB overlap: boxes that only share an edge do not collide.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Create one balloon at the top edge using the given level tuning.
pub fn spawn_balloon(settings: &LevelSettings, rng: &mut impl Rng) -> Balloon {
    let x = rng.gen::<f32>() * (SCREEN_WIDTH - BALLOON_SIZE);
    let speed = settings.min_speed + rng.gen::<f32>() * (settings.max_speed - settings.min_speed);

    let (kind, color, points) = if rng.gen::<f64>() < settings.special_chance {
        (BalloonKind::Special, BalloonColor::Gold, SPECIAL_POINTS)
    } else {
        let color = NORMAL_PALETTE[rng.gen_range(0..NORMAL_PALETTE.len())];
        (BalloonKind::Normal, color, NORMAL_POINTS)
    };

    Balloon {
        x,
        y: 0.0,
        speed,
        color,
        kind,
        points,
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Steps run in a fixed order; later steps see the earlier ones' effects.
pub fn tick(
    state: &GameState,
    input: &InputState,
    rng: &mut impl Rng,
) -> (GameState, TickEvents) {
    let mut events = TickEvents::default();
    let frame = state.frame + 1;

    // ── 1. Move the cannon ───────────────────────────────────────────────────
    // Left resolves first; the right bound is checked against the moved x.
    let mut next = state.clone();
    if input.left {
        next = move_player_left(&next);
    }
    if input.right {
        next = move_player_right(&next);
    }
    let player = next.player;

    // ── 2. Fire, gated on absolute frame number ──────────────────────────────
    let mut bullets = state.bullets.clone();
    if input.fire && frame % FIRE_INTERVAL == 0 {
        bullets.push(bullet_from(&player));
    }

    // ── 3. Move bullets, dropping any that left the top ──────────────────────
    let mut bullets: Vec<Bullet> = bullets
        .into_iter()
        .map(|b| Bullet {
            y: b.y - BULLET_SPEED,
            ..b
        })
        .filter(|b| b.y >= 0.0)
        .collect();

    // ── 4. Level up ──────────────────────────────────────────────────────────
    let mut level = state.level;
    let mut next_level_at = state.next_level_at;
    let mut settings = state.settings;
    if state.score >= next_level_at {
        level += 1;
        next_level_at = next_threshold(next_level_at);
        settings = level_settings(level);
        events.leveled_up = true;
        info!("level {} reached, next level at {}", level, next_level_at);
    }

    // ── 5. Spawn a balloon ───────────────────────────────────────────────────
    let mut balloons = state.balloons.clone();
    let mut spawn_timer = state.spawn_timer + 1;
    if spawn_timer >= settings.spawn_delay {
        spawn_timer = 0;
        let balloon = spawn_balloon(&settings, rng);
        trace!("spawned {:?} balloon at x={:.1}", balloon.kind, balloon.x);
        balloons.push(balloon);
    }

    // ── 6. Move balloons, dropping any that escaped the bottom ───────────────
    let mut balloons: Vec<Balloon> = balloons
        .into_iter()
        .map(|b| Balloon {
            y: b.y + b.speed,
            ..b
        })
        .filter(|b| b.y <= SCREEN_HEIGHT)
        .collect();

    // ── 7. Collision: bullets ↔ balloons ─────────────────────────────────────
    // Walk both lists back to front; a bullet pops at most one balloon.
    let mut score = state.score;
    let mut high_score = state.high_score;
    for bi in (0..bullets.len()).rev() {
        let bullet_box = bullets[bi].rect();
        let hit = (0..balloons.len())
            .rev()
            .find(|&ei| overlaps(&bullet_box, &balloons[ei].rect()));

        if let Some(ei) = hit {
            let balloon = balloons.remove(ei);
            bullets.remove(bi);
            score += balloon.points;
            events.scored = true;
            debug!("hit {:?} balloon for {} points", balloon.kind, balloon.points);

            if score > high_score {
                high_score = score;
                events.new_high_score = Some(high_score);
            }
        }
    }

    let next = GameState {
        player,
        bullets,
        balloons,
        score,
        high_score,
        level,
        next_level_at,
        settings,
        spawn_timer,
        frame,
    };
    (next, events)
}
