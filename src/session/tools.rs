//! Tool definitions and effect resolution
//!
//! Tools are consumed on use no matter what they accomplish. Both effects
//! pick the first unfound target in list order; that pick is part of the
//! deterministic replay surface, so it stays list-order even though
//! "nearest" might feel more natural.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{EFFECT_DURATION_SECS, QUADRANT_THRESHOLD};
use crate::session::state::{
    HintMarker, RevealMarker, Session, ToastKind, ToolKind, display_kind,
};

/// Every kind the chest can roll, in draw order
pub const ALL_TOOL_KINDS: [ToolKind; 2] = [ToolKind::Hint, ToolKind::Reveal];

/// Static display definition for a tool kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDef {
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

const HINT_DEF: ToolDef = ToolDef {
    name: "Dowsing Charm",
    icon: "charm",
    description: "Marks one hidden object with a glow you can see through walls.",
};

const REVEAL_DEF: ToolDef = ToolDef {
    name: "Compass Needle",
    icon: "needle",
    description: "Names the part of the room where a hidden object waits.",
};

impl ToolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Hint => "hint",
            ToolKind::Reveal => "reveal",
        }
    }

    pub fn def(&self) -> &'static ToolDef {
        match self {
            ToolKind::Hint => &HINT_DEF,
            ToolKind::Reveal => &REVEAL_DEF,
        }
    }
}

/// Compass quadrant for reveal effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    North,
    South,
    East,
    West,
    Center,
}

impl Quadrant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::North => "north",
            Quadrant::South => "south",
            Quadrant::East => "east",
            Quadrant::West => "west",
            Quadrant::Center => "center",
        }
    }
}

/// Classify a room position into a compass quadrant
///
/// Center unless at least one axis magnitude exceeds the threshold; the
/// dominant axis and its sign pick the direction. North is the -Z
/// half-space (camera-forward convention), east is +X.
pub fn classify_quadrant(pos: Vec3, threshold: f32) -> Quadrant {
    let ax = pos.x.abs();
    let az = pos.z.abs();
    if ax <= threshold && az <= threshold {
        return Quadrant::Center;
    }
    if ax >= az {
        if pos.x > 0.0 { Quadrant::East } else { Quadrant::West }
    } else if pos.z < 0.0 {
        Quadrant::North
    } else {
        Quadrant::South
    }
}

/// Beacon the first unfound target for a few seconds
pub(crate) fn apply_hint(session: &mut Session, now: f64) {
    let Some((id, pos)) = session
        .targets
        .iter()
        .find(|t| !t.found)
        .map(|t| (t.id.clone(), t.pos))
    else {
        session.push_toast(ToastKind::Info, "Nothing left to find", now);
        return;
    };
    session.hint = Some(HintMarker {
        target_id: id,
        pos,
        until: now + EFFECT_DURATION_SECS,
    });
}

/// Name the quadrant of the first unfound target
pub(crate) fn apply_reveal(session: &mut Session, now: f64) {
    let remaining = session.targets.iter().filter(|t| !t.found).count() as u32;
    let Some(target) = session.targets.iter().find(|t| !t.found) else {
        session.push_toast(ToastKind::Info, "Nothing left to find", now);
        return;
    };
    let quadrant = classify_quadrant(target.pos, QUADRANT_THRESHOLD);
    let kind = target.kind.clone();
    session.reveal = Some(RevealMarker {
        quadrant,
        remaining,
        until: now + EFFECT_DURATION_SECS,
    });
    session.push_toast(
        ToastKind::Info,
        format!(
            "{} object{} left - a {} waits to the {}",
            remaining,
            if remaining == 1 { "" } else { "s" },
            display_kind(&kind),
            quadrant.as_str(),
        ),
        now,
    );
}
