//! Per-frame session tick
//!
//! Drives the timer gate, deadline expiries, the aim-and-hold protocol and
//! the deferred win transition. Order inside a frame matters: hover
//! resolves before hold progress, hold resolution lands before the win
//! check, so the frame that finds the last target is the frame that starts
//! the victory delay.

use glam::Vec3;

use super::interact;
use super::state::{GamePhase, Hovered, Session, SessionEvent};
use crate::consts::MAX_FRAME_DT;

/// Raw per-frame input, forwarded by the rendering collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInput {
    /// Eye position in room space
    pub eye: Vec3,
    /// Normalized view direction (the screen-center ray)
    pub look: Vec3,
    /// Primary action held this frame
    pub hold: bool,
    /// Host-judged engagement gate: pointer captured on desktop, or the
    /// explicit "mobile game started" flag on touch. Elapsed time freezes
    /// while this is false.
    pub engaged: bool,
}

impl FrameInput {
    /// Engaged but otherwise inert input
    pub fn idle() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.6, 0.0),
            look: Vec3::NEG_Z,
            hold: false,
            engaged: true,
        }
    }
}

/// Advance the session by one rendered frame
pub fn tick(session: &mut Session, input: &FrameInput, now: f64) {
    let dt = session
        .last_tick_at
        .map(|last| (now - last).clamp(0.0, MAX_FRAME_DT))
        .unwrap_or(0.0);
    session.last_tick_at = Some(now);

    session.expire_transients(now);

    if session.phase != GamePhase::Playing {
        return;
    }

    // Disengaged frames push the start forward, freezing elapsed
    if !input.engaged {
        session.start_time += dt;
    }
    session.elapsed = (now - session.start_time).max(0.0);

    session.near_chest = interact::near_chest(input.eye, session.level().chest_pos);

    if session.chest_open {
        // The chest UI swallows aim and hold entirely until closed
        session.hovered = None;
        session.hold_seconds = 0.0;
        session.hold_progress = 0.0;
    } else {
        update_hover_and_hold(session, input, now, dt);
    }

    if let Some(win_at) = session.win_at {
        if now >= win_at {
            finish_run(session);
        }
    }
}

fn update_hover_and_hold(session: &mut Session, input: &FrameInput, now: f64, dt: f64) {
    let hover = interact::resolve_hover(input.eye, input.look, &session.targets, &session.decoys);
    if hover != session.hovered {
        // A changed best candidate always throws away in-progress hold;
        // accumulation starts on the next frame
        session.hold_seconds = 0.0;
        session.hold_progress = 0.0;
        session.hovered = hover;
        if session.hovered.is_some() {
            log::debug!("hover -> {:?}", session.hovered);
            session.push_event(SessionEvent::HoverStarted);
        }
        return;
    }

    let Some(hovered) = session.hovered.clone() else {
        return;
    };
    if !input.hold {
        // Releasing early cancels with no effect: no credit, no penalty
        session.hold_seconds = 0.0;
        session.hold_progress = 0.0;
        return;
    }

    let required = match &hovered {
        Hovered::Target { id } => session
            .targets
            .iter()
            .find(|t| t.id == *id)
            .map(|t| t.hold_seconds),
        Hovered::Decoy { id } => session
            .decoys
            .iter()
            .find(|d| d.id == *id)
            .map(|d| d.hold_seconds),
    };
    let Some(required) = required else {
        // Hovered item vanished underneath us; drop the hold silently
        session.hovered = None;
        session.hold_seconds = 0.0;
        session.hold_progress = 0.0;
        return;
    };

    session.hold_seconds += dt as f32;
    let progress = (session.hold_seconds / required.max(f32::EPSILON)).min(1.0);
    let prev_quarter = (session.hold_progress * 4.0) as u8;
    let quarter = (progress * 4.0) as u8;
    session.hold_progress = progress;
    if progress < 1.0 && quarter > prev_quarter {
        session.push_event(SessionEvent::HoldTick { progress });
    }

    if progress >= 1.0 {
        match &hovered {
            Hovered::Target { id } => {
                session.resolve_target(id, now);
            }
            Hovered::Decoy { id } => {
                session.resolve_decoy(id, now);
            }
        }
        // Either way the hold is spent; the same object cannot re-trigger
        session.hovered = None;
        session.hold_seconds = 0.0;
        session.hold_progress = 0.0;
    }
}

fn finish_run(session: &mut Session) {
    session.phase = GamePhase::Won;
    session.win_at = None;
    log::info!(
        "run {} won: {:.1}s elapsed, {} wrong, final score {:.1}",
        session.run_id,
        session.elapsed,
        session.wrong_selections,
        session.final_score()
    );
    session.push_event(SessionEvent::Victory);
}
