//! Simulation driver.
//!
//! [`tick`] advances a [`SimulationState`] by one frame: movement, then timed
//! spawns, then collision resolution, then compaction.  All randomness comes
//! through the injected RNG so callers control determinism (tests use a
//! seeded `StdRng`).  [`Simulation`] bundles a state with its RNG for callers
//! that just want `tick(dt, input)`.

pub mod collision;
pub mod movement;
pub mod spawn;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::constants::MYSTERY_LEFT_EXIT;
use crate::entities::GameStatus;
use crate::events::{FrameEvent, FrameEvents, InputSnapshot};
use crate::registry::EntityRegistry;

use self::spawn::FireTimers;

// ── State ─────────────────────────────────────────────────────────────────────

/// The entire game state.  Owned by the driver and handed to renderers as a
/// read-only snapshot.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub registry: EntityRegistry,
    pub timers: FireTimers,
    pub status: GameStatus,
    pub config: GameConfig,
    /// Number of simulated (non-paused) ticks.
    pub frame: u64,
}

impl SimulationState {
    pub fn score(&self) -> u32 {
        self.registry.player.score
    }

    pub fn lives(&self) -> u32 {
        self.registry.player.lives
    }
}

/// Build the starting state for `config`.
pub fn init_state(config: &GameConfig) -> SimulationState {
    SimulationState {
        registry: EntityRegistry::new(config),
        timers: FireTimers::default(),
        status: GameStatus::Active,
        config: config.clone(),
        frame: 0,
    }
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame of `dt` seconds.
///
/// A pause toggle consumes the frame.  Once the game is over nothing changes
/// and no events are produced.
pub fn tick(
    state: &mut SimulationState,
    dt: f32,
    input: InputSnapshot,
    rng: &mut impl Rng,
) -> FrameEvents {
    let mut events = FrameEvents::new();

    match state.status {
        GameStatus::Over => return events,
        GameStatus::Paused => {
            if input.pause_toggle {
                state.status = GameStatus::Active;
                info!(frame = state.frame, "resumed");
            }
            return events;
        }
        GameStatus::Active if input.pause_toggle => {
            state.status = GameStatus::Paused;
            info!(frame = state.frame, "paused");
            return events;
        }
        GameStatus::Active => {}
    }

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    state.frame += 1;
    let frame = state.frame;
    trace!(frame, dt, "tick");

    let SimulationState {
        registry,
        timers,
        config,
        ..
    } = state;

    // ── 1. Movement ──────────────────────────────────────────────────────────
    movement::move_player(&mut registry.player, &input, dt, config.screen_width);

    if spawn::update_mystery_window(
        &mut registry.mystery_ship,
        timers,
        dt,
        config.mystery_spawn_interval,
        config.screen_width,
        MYSTERY_LEFT_EXIT,
    ) {
        debug!(frame, velocity = registry.mystery_ship.velocity, "mystery ship launched");
    }
    movement::move_mystery_ship(&mut registry.mystery_ship, dt);

    if movement::move_formation(
        &mut registry.aliens,
        dt,
        config.screen_width,
        config.formation_drop,
    ) {
        debug!(frame, drop = config.formation_drop, "formation reversed");
    }

    movement::move_lasers(
        &mut registry.player_lasers,
        dt,
        config.laser_speed,
        config.screen_height,
    );
    movement::move_lasers(
        &mut registry.alien_lasers,
        dt,
        config.laser_speed,
        config.screen_height,
    );

    // ── 2. Timed spawns ──────────────────────────────────────────────────────
    if spawn::player_fire(
        registry,
        timers,
        input.fire,
        dt,
        config.player_fire_interval,
    ) {
        events.push(FrameEvent::LaserFired);
    }

    if spawn::alien_fire(registry, timers, dt, config.alien_fire_interval, rng) {
        events.push(FrameEvent::LaserFired);
    }

    // ── 3. Collisions ────────────────────────────────────────────────────────
    collision::resolve(registry, &mut events);

    // ── 4. Compaction ────────────────────────────────────────────────────────
    registry.compact();

    if registry.player.is_defeated() {
        state.status = GameStatus::Over;
        events.push(FrameEvent::GameOver);
        info!(score = state.score(), frame, "game over");
    }

    events
}

// ── Driver ────────────────────────────────────────────────────────────────────

/// A simulation state paired with the RNG that drives alien fire.
pub struct Simulation<R = StdRng> {
    state: SimulationState,
    rng: R,
}

impl Simulation<StdRng> {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(config: &GameConfig, rng: R) -> Self {
        Self {
            state: init_state(config),
            rng,
        }
    }

    pub fn tick(&mut self, dt: f32, input: InputSnapshot) -> FrameEvents {
        tick(&mut self.state, dt, input, &mut self.rng)
    }

    pub fn current_state(&self) -> &SimulationState {
        &self.state
    }

    /// Mutable access for scripted setups.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Throw the current game away and start over with the same config.
    pub fn restart(&mut self) {
        self.state = init_state(&self.state.config);
        info!("restarted");
    }
}
