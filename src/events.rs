//! Per-frame input and output of the simulation.

/// Decoded keyboard state for one frame.
///
/// Movement and fire are level-triggered (held keys).  `pause_toggle` is
/// edge-triggered: set it only on the frame the pause key went down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub pause_toggle: bool,
}

/// A side effect for the renderer, mixer or HUD to act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    /// Play the laser sound.
    LaserFired,
    /// Play the explosion sound.
    ExplosionOccurred,
    /// Refresh the score label.
    ScoreChanged(u32),
    /// Refresh the lives label.
    LivesChanged(u32),
    GameOver,
}

/// Everything that happened during one tick, in order.
pub type FrameEvents = Vec<FrameEvent>;
