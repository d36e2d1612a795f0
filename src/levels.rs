//! Static room catalog and difficulty tuning
//!
//! Rooms are declarative: geometry parameters for the renderer, a spawn
//! pose, a chest location, and oversized candidate pools the run generator
//! samples from. Nothing in here mutates at runtime.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Per-difficulty tuning table
    pub fn settings(&self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                hold_seconds: 3.0,
                target_count: 5,
                decoy_count: 2,
            },
            Difficulty::Normal => DifficultySettings {
                hold_seconds: 4.0,
                target_count: 5,
                decoy_count: 4,
            },
            Difficulty::Hard => DifficultySettings {
                hold_seconds: 5.0,
                target_count: 5,
                decoy_count: 6,
            },
        }
    }
}

/// Knobs a difficulty preset turns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Seconds of sustained aim needed to confirm a selection
    pub hold_seconds: f32,
    /// Targets sampled per run
    pub target_count: usize,
    /// Decoys sampled per run
    pub decoy_count: usize,
}

/// A zone the viewer must stand in before an angle-dependent prop
/// becomes interactable at all
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VantageZone {
    pub pos: Vec3,
    pub radius: f32,
}

/// A candidate prop in a level pool
///
/// Candidates are templates. The run generator copies one into a live
/// target or decoy, assigns a per-run id, and overrides the hold duration
/// with the difficulty setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropSpec {
    /// Semantic kind, e.g. "pocket_watch"
    pub kind: String,
    pub pos: Vec3,
    pub yaw: f32,
    pub scale: f32,
    pub interact_radius: f32,
    /// Default hold seconds; the difficulty override always wins
    pub hold_seconds: f32,
    pub vantage: Option<VantageZone>,
}

/// Where the player starts a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPose {
    pub pos: Vec3,
    pub yaw: f32,
}

/// Room shell parameters for the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomGeometry {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

/// One room description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub id: String,
    /// Display name, e.g. "Cozy Bedroom"
    pub name: String,
    pub room: RoomGeometry,
    pub spawn: SpawnPose,
    pub chest_pos: Vec3,
    /// Base probability in [0,1] that each tool kind spawns in the chest
    pub tool_spawn_chance: f32,
    pub candidate_targets: Vec<PropSpec>,
    pub candidate_decoys: Vec<PropSpec>,
}

fn prop(kind: &str, x: f32, y: f32, z: f32) -> PropSpec {
    PropSpec {
        kind: kind.to_string(),
        pos: Vec3::new(x, y, z),
        yaw: 0.0,
        scale: 1.0,
        interact_radius: 2.5,
        hold_seconds: 4.0,
        vantage: None,
    }
}

/// Built-in rooms, in play order
pub fn builtin_levels() -> Vec<LevelConfig> {
    vec![cozy_bedroom(), cluttered_study(), dusty_attic()]
}

fn cozy_bedroom() -> LevelConfig {
    LevelConfig {
        id: "cozy_bedroom".to_string(),
        name: "Cozy Bedroom".to_string(),
        room: RoomGeometry {
            width: 8.0,
            depth: 8.0,
            height: 3.0,
        },
        spawn: SpawnPose {
            pos: Vec3::new(0.0, 1.6, 3.2),
            yaw: std::f32::consts::PI,
        },
        chest_pos: Vec3::new(3.0, 0.4, -3.1),
        tool_spawn_chance: 0.6,
        candidate_targets: vec![
            PropSpec {
                yaw: 0.6,
                ..prop("pocket_watch", 2.6, 0.8, -2.2)
            },
            prop("brass_key", -3.1, 0.4, -1.4),
            // Tucked behind the headboard; only readable from the bedside
            PropSpec {
                vantage: Some(VantageZone {
                    pos: Vec3::new(-1.2, 1.6, -2.0),
                    radius: 1.4,
                }),
                ..prop("locket", -2.4, 0.9, -3.4)
            },
            prop("fountain_pen", 1.8, 1.1, 2.9),
            PropSpec {
                scale: 0.5,
                interact_radius: 2.0,
                ..prop("thimble", 3.4, 1.0, 1.2)
            },
            prop("dried_rose", -0.6, 1.4, -3.6),
            PropSpec {
                scale: 0.4,
                interact_radius: 2.0,
                ..prop("marble", 0.9, 0.2, -0.8)
            },
            prop("spectacles", -3.3, 0.9, 2.4),
            PropSpec {
                yaw: -0.9,
                ..prop("music_box", 2.2, 0.5, -3.5)
            },
        ],
        candidate_decoys: vec![
            prop("tin_watch", -2.8, 0.8, -2.6),
            prop("iron_key", 3.2, 0.4, 0.2),
            prop("pendant", -1.6, 0.9, 3.1),
            prop("ballpoint_pen", 1.2, 1.1, 3.3),
            PropSpec {
                scale: 0.5,
                interact_radius: 2.0,
                ..prop("button", -0.4, 0.2, 1.6)
            },
            prop("silk_rose", 0.8, 1.4, -3.6),
            PropSpec {
                scale: 0.4,
                interact_radius: 2.0,
                ..prop("pebble", -2.1, 0.2, 0.4)
            },
            prop("reading_glasses", 3.5, 0.9, 2.8),
        ],
    }
}

fn cluttered_study() -> LevelConfig {
    LevelConfig {
        id: "cluttered_study".to_string(),
        name: "Cluttered Study".to_string(),
        room: RoomGeometry {
            width: 10.0,
            depth: 8.0,
            height: 3.2,
        },
        spawn: SpawnPose {
            pos: Vec3::new(-3.8, 1.6, 2.8),
            yaw: 2.4,
        },
        chest_pos: Vec3::new(-4.2, 0.4, -3.0),
        tool_spawn_chance: 0.5,
        candidate_targets: vec![
            prop("wax_seal", 2.4, 1.0, -2.8),
            prop("quill", -1.8, 1.1, -3.2),
            PropSpec {
                yaw: 1.2,
                ..prop("magnifier", 4.1, 0.9, 1.6)
            },
            prop("ink_bottle", 0.6, 1.0, -3.5),
            // On the top shelf; only readable from just below it
            PropSpec {
                vantage: Some(VantageZone {
                    pos: Vec3::new(2.6, 1.6, -1.6),
                    radius: 1.4,
                }),
                ..prop("compass", 3.8, 2.2, -3.4)
            },
            prop("letter_opener", -3.6, 0.9, -0.8),
            PropSpec {
                scale: 0.6,
                interact_radius: 2.2,
                ..prop("globe_gem", -4.3, 1.3, 1.8)
            },
            prop("pipe", 1.4, 0.6, 3.2),
            prop("hourglass", -0.8, 1.5, 2.6),
        ],
        candidate_decoys: vec![
            prop("rubber_stamp", 3.0, 1.0, -2.4),
            prop("goose_feather", -2.6, 1.1, -3.0),
            prop("paperweight_lens", 4.4, 0.9, 0.6),
            prop("glue_bottle", 1.2, 1.0, -3.3),
            prop("toy_compass", -4.0, 0.6, 0.6),
            prop("butter_knife", -2.9, 0.9, -1.4),
            PropSpec {
                scale: 0.6,
                interact_radius: 2.2,
                ..prop("glass_bead", 0.2, 1.3, 3.4)
            },
            prop("egg_timer", -1.4, 1.5, 2.1),
        ],
    }
}

fn dusty_attic() -> LevelConfig {
    LevelConfig {
        id: "dusty_attic".to_string(),
        name: "Dusty Attic".to_string(),
        room: RoomGeometry {
            width: 9.0,
            depth: 9.0,
            height: 2.6,
        },
        spawn: SpawnPose {
            pos: Vec3::new(0.0, 1.6, 0.0),
            yaw: 0.0,
        },
        chest_pos: Vec3::new(0.4, 0.4, 3.9),
        tool_spawn_chance: 0.8,
        candidate_targets: vec![
            prop("tin_soldier", -3.8, 0.7, -3.2),
            prop("railway_lantern", 3.6, 0.5, -3.8),
            PropSpec {
                scale: 0.6,
                interact_radius: 2.2,
                ..prop("chess_knight", 1.9, 0.9, -1.6)
            },
            // Pinned inside a crate; read it through the open side
            PropSpec {
                vantage: Some(VantageZone {
                    pos: Vec3::new(-2.0, 1.6, 2.2),
                    radius: 1.3,
                }),
                ..prop("war_medal", -3.4, 0.6, 3.3)
            },
            prop("skeleton_key", -0.9, 1.2, -4.0),
            prop("snow_globe", 2.8, 1.0, 2.4),
            prop("harmonica", -4.1, 1.0, -0.6),
            PropSpec {
                scale: 0.5,
                interact_radius: 2.0,
                ..prop("cameo_brooch", 0.8, 0.3, -2.9)
            },
            prop("kaleidoscope", 4.0, 0.8, 0.9),
        ],
        candidate_decoys: vec![
            prop("candle_lantern", 2.9, 0.5, -4.0),
            PropSpec {
                scale: 0.6,
                interact_radius: 2.2,
                ..prop("chess_pawn", 1.3, 0.9, -1.9)
            },
            prop("bottle_cap", -1.6, 0.3, -3.4),
            prop("bent_key", -0.2, 1.2, -4.1),
            prop("paperweight", 3.3, 1.0, 1.8),
            prop("kazoo", -4.2, 1.0, 0.4),
            prop("tin_brooch", 1.5, 0.3, -3.2),
            prop("hand_lens", 3.9, 0.8, 1.7),
        ],
    }
}
