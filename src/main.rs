mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal, ExecutableCommand, QueueableCommand,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use invaders::compute::Simulation;
use invaders::config::{load_config, GameConfig};
use invaders::entities::GameStatus;
use invaders::events::{FrameEvent, InputSnapshot};

use display::Hud;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// OS key-repeat keeps refreshing the timestamp while the key is down.
const HOLD_WINDOW: u64 = 8;

/// Longest frame the simulation is asked to absorb, in seconds.  Stops a
/// stalled terminal from teleporting everything on the next frame.
const MAX_FRAME_DT: f32 = 0.1;

fn config_path() -> PathBuf {
    std::env::var_os("INVADERS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("invaders.toml"))
}

/// Logs go to a file; stderr would scribble over the alternate screen.
fn init_logging(config: &GameConfig) -> anyhow::Result<()> {
    let file = std::fs::File::create(&config.log_file)
        .with_context(|| format!("failed to create log file '{}'", config.log_file))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key, so held keys (movement, fire) combine freely.  The
/// pause key is edge-triggered and only reported on the frame it is pressed.
fn game_loop<W: Write>(
    out: &mut W,
    sim: &mut Simulation,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> anyhow::Result<()> {
    let frame_budget = Duration::from_millis(config.frame_millis);
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut hud = Hud::new(sim.current_state().score(), sim.current_state().lives());
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut pause_pressed = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => pause_pressed = true,
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if sim.current_state().status == GameStatus::Over =>
                        {
                            sim.restart();
                            hud = Hud::new(sim.current_state().score(), sim.current_state().lives());
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = InputSnapshot {
            move_left: any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            ),
            move_right: any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            ),
            fire: is_held(&key_frame, &KeyCode::Char(' '), frame),
            pause_toggle: pause_pressed,
        };

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32().min(MAX_FRAME_DT);
        last = now;

        // ── Simulate, then hand the events to the HUD and "mixer" ─────────────
        let mut ring = false;
        for event in sim.tick(dt, input) {
            match event {
                FrameEvent::ScoreChanged(score) => hud.set_score(score),
                FrameEvent::LivesChanged(lives) => hud.set_lives(lives),
                FrameEvent::LaserFired | FrameEvent::ExplosionOccurred => ring = true,
                FrameEvent::GameOver => info!(score = sim.current_state().score(), "game over"),
            }
        }

        display::render(out, sim.current_state(), &hud)?;
        if ring && config.bell {
            out.queue(Print('\u{7}'))?;
            out.flush()?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let path = config_path();
    let config = load_config(&path)
        .with_context(|| format!("failed to load config from '{}'", path.display()))?;
    init_logging(&config)?;
    info!(config = ?config, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal does not report key releases; using hold window");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut sim = Simulation::new(&config);
    let result = game_loop(&mut out, &mut sim, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        warn!(error = %e, "exiting with error");
    }
    result
}
