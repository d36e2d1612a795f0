//! Hidden Hunt - a first-person single-room hidden-object game
//!
//! Core modules:
//! - `session`: Deterministic session core (run generation, aim-and-hold
//!   interaction, phase/timer state machine, scoring)
//! - `levels`: Static room catalog with candidate prop pools
//! - `rng`: Seeded RNG for reproducible run layouts
//! - `share`: Score-share link encoding
//! - `telemetry`: Run event logging abstraction
//! - `audio`: Named sound cues for the audio collaborator
//! - `net`: Network abstraction (local loopback only)

pub mod audio;
pub mod levels;
pub mod net;
pub mod rng;
pub mod session;
pub mod share;
pub mod telemetry;

pub use levels::{Difficulty, LevelConfig};
pub use session::{FrameInput, GamePhase, Session, tick};

/// Game configuration constants
pub mod consts {
    /// Seconds added to the final score per wrong selection
    pub const WRONG_PICK_PENALTY_SECS: f64 = 10.0;

    /// Inventory slots
    pub const MAX_INVENTORY: usize = 4;
    /// Most tools a chest can spawn with
    pub const MAX_CHEST_TOOLS: usize = 2;
    /// Multiplier applied to a level's tool spawn chance per tool kind
    pub const TOOL_SPAWN_FACTOR: f32 = 0.7;

    /// Cosine threshold for reticle alignment (~32 degrees)
    pub const AIM_COS_THRESHOLD: f32 = 0.85;
    /// Extra reach beyond a prop's interact radius
    pub const REACH_PADDING: f32 = 1.0;
    /// Distance at which the chest becomes interactable
    pub const CHEST_INTERACT_DISTANCE: f32 = 3.0;

    /// Delay between the last find and the won phase
    pub const WIN_DELAY_SECS: f64 = 0.5;
    /// Hint / reveal highlight lifetime
    pub const EFFECT_DURATION_SECS: f64 = 5.0;
    /// Toast auto-dismiss deadline
    pub const TOAST_DURATION_SECS: f64 = 3.0;

    /// Axis threshold separating "center" from the four compass quadrants
    pub const QUADRANT_THRESHOLD: f32 = 2.0;

    /// Longest frame delta the tick will honor (hitches grant no hold time)
    pub const MAX_FRAME_DT: f64 = 0.25;
}
