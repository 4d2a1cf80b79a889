//! Simulation core for a fixed-camera invaders-style shooter.
//!
//! The crate owns the authoritative game state and advances it one frame at a
//! time.  Rendering, audio and keyboard polling live outside: callers pass an
//! [`events::InputSnapshot`] plus a delta time into [`compute::Simulation::tick`]
//! and receive the frame's [`events::FrameEvents`] back.

pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod events;
pub mod geometry;
pub mod registry;
