//! Session state and named actions
//!
//! The session is the single source of mutable truth for one play session.
//! Collaborators read it freely but signal intent only through the action
//! methods here; nothing outside this module flips a target flag or a
//! counter directly.

use glam::Vec3;
use rand::Rng as _;
use serde::{Deserialize, Serialize};

use super::{rungen, tools};
use crate::consts::*;
use crate::levels::{Difficulty, LevelConfig, VantageZone, builtin_levels};
use crate::session::tools::Quadrant;

/// Coarse session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting for the player to pick a name
    #[default]
    NameEntry,
    /// Level/difficulty select
    Menu,
    /// Active run
    Playing,
    /// Run frozen; paused wall-clock never counts toward score
    Paused,
    /// Run complete; terminal until restart/next/menu
    Won,
}

/// A must-find object instance for the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Per-run id, `target_<index>_<kind>`
    pub id: String,
    pub kind: String,
    pub pos: Vec3,
    pub yaw: f32,
    pub scale: f32,
    pub found: bool,
    pub interact_radius: f32,
    /// Seconds of sustained aim-and-hold required to confirm
    pub hold_seconds: f32,
    /// Some props only read correctly from one spot
    pub vantage: Option<VantageZone>,
}

/// An incorrect look-alike; selecting it only costs time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoy {
    /// Per-run id, `decoy_<index>_<kind>`
    pub id: String,
    pub kind: String,
    pub pos: Vec3,
    pub yaw: f32,
    pub scale: f32,
    /// Stays in the scene once revealed; purely punitive
    pub revealed: bool,
    pub interact_radius: f32,
    pub hold_seconds: f32,
}

/// Tool kinds the chest can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    /// Beacon on one unfound target
    Hint,
    /// Names the room quadrant of one unfound target
    Reveal,
}

/// An inventory item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub kind: ToolKind,
}

impl Tool {
    /// Display name/icon/description from the static definition table
    pub fn def(&self) -> &'static tools::ToolDef {
        self.kind.def()
    }
}

/// What the reticle currently rests on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hovered {
    Target { id: String },
    Decoy { id: String },
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToastKind {
    Success,
    Warning,
    Info,
}

/// A transient player-facing notice with an auto-dismiss deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
    pub until: f64,
}

/// Active hint beacon (renderer draws it through walls)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintMarker {
    pub target_id: String,
    pub pos: Vec3,
    pub until: f64,
}

/// Active reveal highlight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealMarker {
    pub quadrant: Quadrant,
    /// Unfound targets at the moment of use
    pub remaining: u32,
    pub until: f64,
}

/// Events the session emits for the audio/telemetry/render collaborators
///
/// Drained once per frame by the host; purely outbound, never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    RunStarted,
    HoverStarted,
    HoldTick { progress: f32 },
    TargetFound { id: String },
    DecoyRevealed { id: String },
    ToolPickedUp { kind: ToolKind },
    ToolUsed { kind: ToolKind },
    InventoryFull,
    ChestOpened,
    ChestClosed,
    Victory,
}

/// The aggregate root for one play session
///
/// Replaced run-scope state wholesale on every start/restart/next; never
/// incrementally reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub phase: GamePhase,
    pub player_name: String,
    pub difficulty: Difficulty,
    pub level_index: usize,
    pub run_id: String,

    /// Wall-clock seconds at run start, shifted forward on resume and
    /// while the player is not engaged so frozen time never counts
    pub start_time: f64,
    /// Cached `now - start_time`, updated on tick while playing
    pub elapsed: f64,
    pub wrong_selections: u32,
    pub found_count: u32,
    pub required_count: u32,

    pub targets: Vec<Target>,
    pub decoys: Vec<Decoy>,
    pub chest_tools: Vec<Tool>,
    pub inventory: Vec<Tool>,

    pub chest_open: bool,
    pub near_chest: bool,
    pub hovered: Option<Hovered>,
    pub hold_seconds: f32,
    /// Hold completion in [0,1]
    pub hold_progress: f32,

    pub hint: Option<HintMarker>,
    pub reveal: Option<RevealMarker>,
    pub toasts: Vec<Toast>,

    levels: Vec<LevelConfig>,
    pub(crate) paused_at: Option<f64>,
    pub(crate) last_tick_at: Option<f64>,
    /// Deadline for the deferred Playing -> Won transition
    pub(crate) win_at: Option<f64>,
    #[serde(skip)]
    events: Vec<SessionEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(builtin_levels())
    }
}

impl Session {
    pub fn new(levels: Vec<LevelConfig>) -> Self {
        let levels = if levels.is_empty() { builtin_levels() } else { levels };
        Self {
            phase: GamePhase::NameEntry,
            player_name: "player".to_string(),
            difficulty: Difficulty::default(),
            level_index: 0,
            run_id: String::new(),
            start_time: 0.0,
            elapsed: 0.0,
            wrong_selections: 0,
            found_count: 0,
            required_count: 0,
            targets: Vec::new(),
            decoys: Vec::new(),
            chest_tools: Vec::new(),
            inventory: Vec::new(),
            chest_open: false,
            near_chest: false,
            hovered: None,
            hold_seconds: 0.0,
            hold_progress: 0.0,
            hint: None,
            reveal: None,
            toasts: Vec::new(),
            levels,
            paused_at: None,
            last_tick_at: None,
            win_at: None,
            events: Vec::new(),
        }
    }

    /// The level the session is currently on
    pub fn level(&self) -> &LevelConfig {
        &self.levels[self.level_index]
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    // --- phase transitions ---

    /// NameEntry -> Menu
    pub fn confirm_name_entry(&mut self, name: &str) {
        if self.phase != GamePhase::NameEntry {
            return;
        }
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.player_name = trimmed.to_string();
        }
        self.phase = GamePhase::Menu;
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// {Menu, Paused, Won} -> Playing with a fresh entropy-drawn run id
    pub fn start_game(&mut self, now: f64) {
        let run_id = format!("run_{:08x}", rand::rng().random::<u32>());
        self.start_game_with_run_id(run_id, now);
    }

    /// Start a run under an explicit run id (replays, peer symmetry, tests)
    ///
    /// The layout is fully re-derivable from (level id, run id), so two
    /// clients handed the same id stay symmetric.
    pub fn start_game_with_run_id(&mut self, run_id: impl Into<String>, now: f64) {
        if !matches!(self.phase, GamePhase::Menu | GamePhase::Paused | GamePhase::Won) {
            return;
        }
        let run_id = run_id.into();
        let layout = rungen::generate_run(&self.levels[self.level_index], &run_id, self.difficulty);

        self.phase = GamePhase::Playing;
        self.run_id = run_id;
        self.start_time = now;
        self.elapsed = 0.0;
        self.wrong_selections = 0;
        self.found_count = 0;
        self.required_count = layout.targets.len() as u32;
        self.targets = layout.targets;
        self.decoys = layout.decoys;
        self.chest_tools = layout.chest_tools;
        self.inventory.clear();
        self.chest_open = false;
        self.near_chest = false;
        self.hovered = None;
        self.hold_seconds = 0.0;
        self.hold_progress = 0.0;
        self.hint = None;
        self.reveal = None;
        self.toasts.clear();
        self.paused_at = None;
        self.win_at = None;

        log::info!(
            "run {} started: {} on {} ({} targets, {} decoys, {} chest tools)",
            self.run_id,
            self.player_name,
            self.level().name,
            self.targets.len(),
            self.decoys.len(),
            self.chest_tools.len()
        );
        self.push_event(SessionEvent::RunStarted);
    }

    /// Playing -> Paused; no-op otherwise
    pub fn pause_game(&mut self, now: f64) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Paused;
        self.paused_at = Some(now);
    }

    /// Paused -> Playing, shifting the start time by the pause duration so
    /// elapsed-time accounting stays continuous
    pub fn resume_game(&mut self, now: f64) {
        if self.phase != GamePhase::Paused {
            return;
        }
        if let Some(paused_at) = self.paused_at.take() {
            self.start_time += now - paused_at;
        }
        self.phase = GamePhase::Playing;
    }

    /// Same level, new run id, freshly reseeded
    pub fn restart_level(&mut self, now: f64) {
        self.start_game(now);
    }

    /// Advance to the next level (wrapping) and start it
    pub fn next_level(&mut self, now: f64) {
        if !matches!(self.phase, GamePhase::Menu | GamePhase::Paused | GamePhase::Won) {
            return;
        }
        self.level_index = (self.level_index + 1) % self.levels.len();
        self.start_game(now);
    }

    /// Any state -> Menu
    pub fn go_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
        self.level_index = 0;
        self.inventory.clear();
        self.toasts.clear();
        self.hovered = None;
        self.hold_seconds = 0.0;
        self.hold_progress = 0.0;
        self.paused_at = None;
    }

    // --- chest & inventory ---

    /// Explicit (non-hold) action; requires standing near the chest
    pub fn open_chest(&mut self) {
        if self.phase != GamePhase::Playing || self.chest_open || !self.near_chest {
            return;
        }
        self.chest_open = true;
        // An open chest suppresses hover detection entirely
        self.hovered = None;
        self.hold_seconds = 0.0;
        self.hold_progress = 0.0;
        self.push_event(SessionEvent::ChestOpened);
    }

    pub fn close_chest(&mut self) {
        if !self.chest_open {
            return;
        }
        self.chest_open = false;
        self.push_event(SessionEvent::ChestClosed);
    }

    /// Move a tool from the chest pool into inventory
    ///
    /// Rejected (not queued) when the inventory already holds 4.
    pub fn take_tool(&mut self, chest_index: usize, now: f64) {
        if self.phase != GamePhase::Playing || !self.chest_open {
            return;
        }
        if chest_index >= self.chest_tools.len() {
            return;
        }
        if self.inventory.len() >= MAX_INVENTORY {
            self.push_toast(ToastKind::Warning, "Your pack is full", now);
            self.push_event(SessionEvent::InventoryFull);
            return;
        }
        let tool = self.chest_tools.remove(chest_index);
        self.push_event(SessionEvent::ToolPickedUp { kind: tool.kind });
        self.push_toast(
            ToastKind::Info,
            format!("Picked up: {}", tool.def().name),
            now,
        );
        self.inventory.push(tool);
    }

    /// Consume an inventory slot and apply its effect
    ///
    /// The tool is spent even when no unfound target remains.
    pub fn use_tool(&mut self, slot: usize, now: f64) {
        if self.phase != GamePhase::Playing || slot >= self.inventory.len() {
            return;
        }
        let tool = self.inventory.remove(slot);
        self.push_event(SessionEvent::ToolUsed { kind: tool.kind });
        match tool.kind {
            ToolKind::Hint => tools::apply_hint(self, now),
            ToolKind::Reveal => tools::apply_reveal(self, now),
        }
    }

    // --- selection resolution (called by the tick) ---

    /// Mark a target found; idempotent per id
    ///
    /// Returns false when the id is unknown or already resolved, so a
    /// double confirm can never count twice.
    pub(crate) fn resolve_target(&mut self, id: &str, now: f64) -> bool {
        let Some(target) = self.targets.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if target.found {
            return false;
        }
        target.found = true;
        let kind = target.kind.clone();
        self.found_count += 1;
        self.push_event(SessionEvent::TargetFound { id: id.to_string() });
        self.push_toast(
            ToastKind::Success,
            format!("Found the {}!", display_kind(&kind)),
            now,
        );
        if self.found_count >= self.required_count && self.win_at.is_none() {
            // Short celebratory beat before the phase flips
            self.win_at = Some(now + WIN_DELAY_SECS);
        }
        true
    }

    /// Mark a decoy revealed; idempotent per id
    pub(crate) fn resolve_decoy(&mut self, id: &str, now: f64) -> bool {
        let Some(decoy) = self.decoys.iter_mut().find(|d| d.id == id) else {
            return false;
        };
        if decoy.revealed {
            return false;
        }
        decoy.revealed = true;
        self.wrong_selections += 1;
        self.push_event(SessionEvent::DecoyRevealed { id: id.to_string() });
        self.push_toast(
            ToastKind::Warning,
            format!("That's not it! +{:.0}s penalty", WRONG_PICK_PENALTY_SECS),
            now,
        );
        true
    }

    // --- scoring ---

    /// Elapsed time plus the fixed penalty per wrong selection; lower is
    /// better. Pure over the current counters.
    pub fn final_score(&self) -> f64 {
        self.elapsed + self.wrong_selections as f64 * WRONG_PICK_PENALTY_SECS
    }

    // --- transient plumbing ---

    pub fn push_toast(&mut self, kind: ToastKind, text: impl Into<String>, now: f64) {
        self.toasts.push(Toast {
            kind,
            text: text.into(),
            until: now + TOAST_DURATION_SECS,
        });
    }

    pub(crate) fn push_event(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Take this frame's outbound events
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop expired toasts and hint/reveal markers
    pub(crate) fn expire_transients(&mut self, now: f64) {
        self.toasts.retain(|t| t.until > now);
        if self.hint.as_ref().is_some_and(|h| h.until <= now) {
            self.hint = None;
        }
        if self.reveal.as_ref().is_some_and(|r| r.until <= now) {
            self.reveal = None;
        }
    }
}

/// "pocket_watch" -> "pocket watch" for player-facing text
pub(crate) fn display_kind(kind: &str) -> String {
    kind.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tick::{FrameInput, tick};

    fn session_in_menu() -> Session {
        let mut s = Session::default();
        s.confirm_name_entry("Ava");
        s
    }

    #[test]
    fn test_name_entry_to_menu() {
        let mut s = Session::default();
        assert_eq!(s.phase, GamePhase::NameEntry);
        s.confirm_name_entry("  Ava  ");
        assert_eq!(s.phase, GamePhase::Menu);
        assert_eq!(s.player_name, "Ava");

        // Confirm is a no-op outside NameEntry
        s.confirm_name_entry("Bea");
        assert_eq!(s.player_name, "Ava");
    }

    #[test]
    fn test_empty_name_falls_back() {
        let mut s = Session::default();
        s.confirm_name_entry("   ");
        assert_eq!(s.player_name, "player");
        assert_eq!(s.phase, GamePhase::Menu);
    }

    #[test]
    fn test_start_game_guard() {
        let mut s = Session::default();
        // Still in NameEntry: rejected
        s.start_game_with_run_id("run_a", 0.0);
        assert_eq!(s.phase, GamePhase::NameEntry);
        assert!(s.targets.is_empty());

        s.confirm_name_entry("Ava");
        s.start_game_with_run_id("run_a", 0.0);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.targets.len() as u32, s.required_count);
        assert_eq!(s.found_count, 0);
        assert_eq!(s.wrong_selections, 0);

        // Already playing: rejected, same run
        s.start_game_with_run_id("run_b", 1.0);
        assert_eq!(s.run_id, "run_a");
    }

    #[test]
    fn test_pause_resume_time_continuity() {
        let mut s = session_in_menu();
        s.start_game_with_run_id("run_a", 100.0);
        let input = FrameInput::idle();

        tick(&mut s, &input, 110.0);
        assert!((s.elapsed - 10.0).abs() < 1e-6);

        s.pause_game(110.0);
        assert_eq!(s.phase, GamePhase::Paused);
        tick(&mut s, &input, 112.0); // ticks while paused change nothing
        assert!((s.elapsed - 10.0).abs() < 1e-6);

        s.resume_game(115.0); // 5s of wall clock spent paused
        assert_eq!(s.phase, GamePhase::Playing);
        tick(&mut s, &input, 116.0);
        assert!((s.elapsed - 11.0).abs() < 1e-6, "elapsed {}", s.elapsed);
    }

    #[test]
    fn test_resume_only_from_paused() {
        let mut s = session_in_menu();
        s.start_game_with_run_id("run_a", 0.0);
        s.resume_game(50.0);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.start_time, 0.0);
    }

    #[test]
    fn test_next_level_wraps() {
        let mut s = session_in_menu();
        let count = s.level_count();
        for expected in (1..count).chain([0]) {
            s.next_level(0.0);
            assert_eq!(s.level_index, expected);
            assert_eq!(s.phase, GamePhase::Playing);
            s.go_to_menu();
            s.level_index = expected; // go_to_menu resets; restore for the walk
        }
    }

    #[test]
    fn test_go_to_menu_resets() {
        let mut s = session_in_menu();
        s.level_index = 1;
        s.start_game_with_run_id("run_a", 0.0);
        s.inventory.push(Tool {
            id: "tool_hint_0".to_string(),
            kind: ToolKind::Hint,
        });
        s.push_toast(ToastKind::Info, "hi", 0.0);
        s.go_to_menu();
        assert_eq!(s.phase, GamePhase::Menu);
        assert_eq!(s.level_index, 0);
        assert!(s.inventory.is_empty());
        assert!(s.toasts.is_empty());
    }

    #[test]
    fn test_resolve_target_idempotent() {
        let mut s = session_in_menu();
        s.start_game_with_run_id("run_a", 0.0);
        let id = s.targets[0].id.clone();
        assert!(s.resolve_target(&id, 1.0));
        assert_eq!(s.found_count, 1);
        assert!(!s.resolve_target(&id, 2.0));
        assert_eq!(s.found_count, 1);
        assert!(!s.resolve_target("target_99_nothing", 2.0));
    }

    #[test]
    fn test_win_scheduled_exactly_once() {
        let mut s = session_in_menu();
        s.start_game_with_run_id("run_a", 0.0);
        let ids: Vec<String> = s.targets.iter().map(|t| t.id.clone()).collect();
        for (i, id) in ids.iter().enumerate() {
            assert!(s.win_at.is_none(), "win scheduled at {} of {}", i, ids.len());
            s.resolve_target(id, i as f64);
        }
        let scheduled = s.win_at;
        assert_eq!(scheduled, Some((ids.len() - 1) as f64 + WIN_DELAY_SECS));
        assert_eq!(s.found_count, s.required_count);

        // Re-resolving the last target must not reschedule
        s.resolve_target(ids.last().map(String::as_str).unwrap_or(""), 99.0);
        assert_eq!(s.win_at, scheduled);
    }

    #[test]
    fn test_decoy_penalty_monotonic() {
        let mut s = session_in_menu();
        s.set_difficulty(Difficulty::Hard);
        s.start_game_with_run_id("run_a", 0.0);
        assert!(!s.decoys.is_empty());
        let id = s.decoys[0].id.clone();
        assert!(s.resolve_decoy(&id, 1.0));
        assert_eq!(s.wrong_selections, 1);
        // Still in the scene, but inert
        assert!(s.decoys[0].revealed);
        assert!(!s.resolve_decoy(&id, 2.0));
        assert_eq!(s.wrong_selections, 1);
    }

    #[test]
    fn test_inventory_cap_rejects_fifth_tool() {
        let mut s = session_in_menu();
        s.start_game_with_run_id("run_a", 0.0);
        for i in 0..MAX_INVENTORY {
            s.inventory.push(Tool {
                id: format!("tool_hint_{i}"),
                kind: ToolKind::Hint,
            });
        }
        s.near_chest = true;
        s.open_chest();
        s.chest_tools.push(Tool {
            id: "tool_reveal_9".to_string(),
            kind: ToolKind::Reveal,
        });
        let chest_before = s.chest_tools.clone();
        s.take_tool(s.chest_tools.len() - 1, 1.0);
        assert_eq!(s.inventory.len(), MAX_INVENTORY);
        assert_eq!(s.chest_tools, chest_before);
        assert!(s.toasts.iter().any(|t| t.kind == ToastKind::Warning));
        assert!(s.drain_events().contains(&SessionEvent::InventoryFull));
    }

    #[test]
    fn test_open_chest_requires_proximity() {
        let mut s = session_in_menu();
        s.start_game_with_run_id("run_a", 0.0);
        s.open_chest();
        assert!(!s.chest_open);
        s.near_chest = true;
        s.open_chest();
        assert!(s.chest_open);
    }

    #[test]
    fn test_final_score_formula() {
        let mut s = session_in_menu();
        s.start_game_with_run_id("run_a", 0.0);
        s.elapsed = 42.3;
        s.wrong_selections = 2;
        assert!((s.final_score() - 62.3).abs() < 1e-9);
    }

    #[test]
    fn test_final_score_monotonic() {
        let mut s = session_in_menu();
        s.start_game_with_run_id("run_a", 0.0);
        s.elapsed = 10.0;
        s.wrong_selections = 0;
        let base = s.final_score();
        s.elapsed = 11.5;
        assert!(s.final_score() > base);
        s.wrong_selections = 1;
        assert!(s.final_score() > base + WRONG_PICK_PENALTY_SECS);
    }

    #[test]
    fn test_use_tool_invalid_slot_is_noop() {
        let mut s = session_in_menu();
        s.start_game_with_run_id("run_a", 0.0);
        s.use_tool(0, 1.0);
        assert!(s.drain_events().iter().all(|e| !matches!(e, SessionEvent::ToolUsed { .. })));
    }

    #[test]
    fn test_expire_transients() {
        let mut s = session_in_menu();
        s.push_toast(ToastKind::Info, "short lived", 0.0);
        s.hint = Some(HintMarker {
            target_id: "target_0_marble".to_string(),
            pos: Vec3::ZERO,
            until: 5.0,
        });
        s.expire_transients(1.0);
        assert_eq!(s.toasts.len(), 1);
        assert!(s.hint.is_some());
        s.expire_transients(10.0);
        assert!(s.toasts.is_empty());
        assert!(s.hint.is_none());
    }
}
