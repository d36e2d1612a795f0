//! Seeded run generation
//!
//! Three independently seeded sub-streams keep the target layout stable
//! even if the decoy or tool draw ever changes shape: targets seed from
//! `"<level>:<run>"`, decoys from `"<run>_decoys"`, tools from
//! `"<run>_tools"`. Regenerating from the same (level, run) pair yields
//! byte-identical layouts, which is what peer symmetry and replay tests
//! lean on.

use crate::consts::{MAX_CHEST_TOOLS, TOOL_SPAWN_FACTOR};
use crate::levels::{Difficulty, LevelConfig, PropSpec};
use crate::rng::SeededRng;
use crate::session::state::{Decoy, Target, Tool};
use crate::session::tools::ALL_TOOL_KINDS;

/// Everything a fresh run owns
#[derive(Debug, Clone, PartialEq)]
pub struct RunLayout {
    pub targets: Vec<Target>,
    pub decoys: Vec<Decoy>,
    pub chest_tools: Vec<Tool>,
}

/// Sample the active targets, decoys, and chest tools for one run
pub fn generate_run(level: &LevelConfig, run_id: &str, difficulty: Difficulty) -> RunLayout {
    let settings = difficulty.settings();
    RunLayout {
        targets: draw_targets(level, run_id, settings.target_count, settings.hold_seconds),
        decoys: draw_decoys(level, run_id, settings.decoy_count, settings.hold_seconds),
        chest_tools: draw_tools(level, run_id, difficulty),
    }
}

fn draw_targets(level: &LevelConfig, run_id: &str, count: usize, hold_seconds: f32) -> Vec<Target> {
    let mut rng = SeededRng::from_key(&format!("{}:{}", level.id, run_id));
    rng.sample(&level.candidate_targets, count)
        .into_iter()
        .enumerate()
        .map(|(index, spec)| target_from_spec(index, spec, hold_seconds))
        .collect()
}

fn draw_decoys(level: &LevelConfig, run_id: &str, count: usize, hold_seconds: f32) -> Vec<Decoy> {
    let mut rng = SeededRng::from_key(&format!("{run_id}_decoys"));
    rng.sample(&level.candidate_decoys, count.min(level.candidate_decoys.len()))
        .into_iter()
        .enumerate()
        .map(|(index, spec)| Decoy {
            id: format!("decoy_{}_{}", index, spec.kind),
            kind: spec.kind,
            pos: spec.pos,
            yaw: spec.yaw,
            scale: spec.scale,
            revealed: false,
            interact_radius: spec.interact_radius,
            hold_seconds,
        })
        .collect()
}

fn target_from_spec(index: usize, spec: PropSpec, hold_seconds: f32) -> Target {
    Target {
        id: format!("target_{}_{}", index, spec.kind),
        kind: spec.kind,
        pos: spec.pos,
        yaw: spec.yaw,
        scale: spec.scale,
        found: false,
        interact_radius: spec.interact_radius,
        // The difficulty override always wins over the candidate default
        hold_seconds,
        vantage: spec.vantage,
    }
}

fn draw_tools(level: &LevelConfig, run_id: &str, difficulty: Difficulty) -> Vec<Tool> {
    let mut rng = SeededRng::from_key(&format!("{run_id}_tools"));
    let spawn_chance = level.tool_spawn_chance * TOOL_SPAWN_FACTOR;

    let mut tools: Vec<Tool> = Vec::new();
    for (index, &kind) in ALL_TOOL_KINDS.iter().enumerate() {
        if rng.chance(spawn_chance) {
            tools.push(Tool {
                id: format!("tool_{}_{}", kind.as_str(), index),
                kind,
            });
        }
    }

    // Easy always hands the player something to work with
    if difficulty == Difficulty::Easy && tools.is_empty() {
        if let Some(&kind) = rng.pick(&ALL_TOOL_KINDS) {
            tools.push(Tool {
                id: format!("tool_{}_0", kind.as_str()),
                kind,
            });
        }
    }

    tools.truncate(MAX_CHEST_TOOLS);
    tools
}
