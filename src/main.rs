use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use balloon_shooter::compute::{init_state, tick};
use balloon_shooter::config::GameConfig;
use balloon_shooter::display::{apply_tick, render_frame, Hud, TerminalCanvas};
use balloon_shooter::entities::InputState;
use balloon_shooter::error::AppError;
use balloon_shooter::persistence::{load_high_score, save_on_exit, FileStore};
use balloon_shooter::render::draw;

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Last-seen frame of every key with a recent press or repeat.
///
/// A key counts as "held" while its last event is at most `window` frames
/// old.  Terminals without release events only send repeats after the OS
/// repeat delay, so `window` comes from `GameConfig::hold_window_frames`.
struct HeldKeys {
    last_seen: HashMap<KeyCode, u64>,
    window: u64,
}

impl HeldKeys {
    fn new(window: u64) -> Self {
        Self {
            last_seen: HashMap::new(),
            window,
        }
    }

    fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= self.window)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|k| self.is_held(k, frame))
    }

    /// Level-triggered input derived from the keys currently held.
    fn input_state(&self, frame: u64) -> InputState {
        InputState {
            left: self.any_held(
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            ),
            right: self.any_held(
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            ),
            fire: self.is_held(&KeyCode::Char(' '), frame),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: rather than acting on each key event, we keep a `HeldKeys`
/// map recording the frame of the last press/repeat for every key.  Each frame
/// the keys still "fresh" become the `InputState` for the next tick, so Space
/// and a direction can be held together.  Terminals with keyboard
/// enhancement send `Release` and drop keys immediately; classic terminals
/// let keys expire after the configured hold window.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    store: &mut FileStore,
) -> std::io::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_budget: Duration = config.frame_duration();

    let mut state = init_state(load_high_score(&*store));
    let mut hud = Hud::new(&state);
    let (width, height) = terminal::size()?;
    let mut canvas = TerminalCanvas::for_terminal(width, height);

    let mut held = HeldKeys::new(config.hold_window_frames());

    loop {
        let frame_start = Instant::now();
        let frame = state.frame;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        held.last_seen.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return quit(store, state.high_score);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return quit(store, state.high_score);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        held.last_seen.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        held.last_seen.remove(&code);
                    }
                },
                Event::Resize(width, height) => {
                    debug!("terminal resized to {}x{}", width, height);
                    out.queue(terminal::Clear(terminal::ClearType::All))?;
                    canvas = TerminalCanvas::for_terminal(width, height);
                }
                _ => {}
            }
        }

        // ── Simulate ──────────────────────────────────────────────────────────
        let input = held.input_state(frame);
        let (next, events) = tick(&state, &input, &mut rng);
        state = next;

        apply_tick(&mut hud, store, &state, &events);

        // ── Draw ──────────────────────────────────────────────────────────────
        draw(&state, &mut canvas);
        render_frame(out, &canvas, &hud)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            std::thread::sleep(frame_budget - elapsed);
        }
    }
}

fn quit(store: &mut FileStore, high_score: u32) -> std::io::Result<()> {
    save_on_exit(store, high_score);
    info!("quitting with high score {}", high_score);
    Ok(())
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Send log output to a file so it never scribbles over the game screen.
fn init_logging(config: &GameConfig) -> Result<(), AppError> {
    let path = config.log_file();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| AppError::Log {
            path: path.clone(),
            source,
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| AppError::Log {
            path: path.clone(),
            source,
        })?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), AppError> {
    let config = GameConfig::from_env()?;
    init_logging(&config)?;
    info!("balloon shooter starting: {:?}", config);

    let mut store = FileStore::new(config.data_dir());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::Clear(terminal::ClearType::All))?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    debug!("keyboard enhancement: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &config, &mut store);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("balloon shooter stopped");
    result.map_err(AppError::from)
}
