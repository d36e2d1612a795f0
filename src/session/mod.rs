//! Deterministic session core
//!
//! Everything gameplay lives here and stays renderer-free:
//! - Seeded layouts only (`rungen`); wall-clock time enters through
//!   action/tick parameters, never read directly
//! - Stable iteration order: targets before decoys, list order within
//! - Collaborators mutate state exclusively through `Session` actions

pub mod interact;
pub mod rungen;
pub mod state;
pub mod tick;
pub mod tools;

pub use interact::resolve_hover;
pub use rungen::{RunLayout, generate_run};
pub use state::{
    Decoy, GamePhase, HintMarker, Hovered, RevealMarker, Session, SessionEvent, Target, Toast,
    ToastKind, Tool, ToolKind,
};
pub use tick::{FrameInput, tick};
pub use tools::{ALL_TOOL_KINDS, Quadrant, ToolDef, classify_quadrant};
