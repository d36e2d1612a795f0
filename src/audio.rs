//! Audio cue routing
//!
//! The core names its sound moments; an audio collaborator decides what
//! they sound like. Cues are fire-and-forget notifications with no return
//! value and no effect on state.

use crate::session::SessionEvent;

/// Named sound moments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// UI button press
    ButtonClick,
    /// Reticle settled on a prop
    HoverStart,
    /// Hold progress milestone while confirming
    HoldTick,
    /// Correct object confirmed
    TargetFound,
    /// Decoy confirmed (penalty)
    DecoyRevealed,
    /// Tool moved from chest to inventory
    ToolPickup,
    /// Tool consumed
    ToolUse,
    /// Chest lid opened
    ChestOpen,
    /// Run complete
    Victory,
}

/// Playback sink implemented by the audio collaborator
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Silent sink for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Map a session event to its cue, if it has one
pub fn cue_for(event: &SessionEvent) -> Option<AudioCue> {
    match event {
        SessionEvent::HoverStarted => Some(AudioCue::HoverStart),
        SessionEvent::HoldTick { .. } => Some(AudioCue::HoldTick),
        SessionEvent::TargetFound { .. } => Some(AudioCue::TargetFound),
        SessionEvent::DecoyRevealed { .. } => Some(AudioCue::DecoyRevealed),
        SessionEvent::ToolPickedUp { .. } => Some(AudioCue::ToolPickup),
        SessionEvent::ToolUsed { .. } => Some(AudioCue::ToolUse),
        SessionEvent::ChestOpened => Some(AudioCue::ChestOpen),
        SessionEvent::Victory => Some(AudioCue::Victory),
        SessionEvent::RunStarted | SessionEvent::ChestClosed | SessionEvent::InventoryFull => None,
    }
}
