//! Aim resolution for the hold-to-confirm protocol
//!
//! A hover candidate must be close enough to reach, viewed from inside any
//! declared vantage zone (targets only), and aligned with the screen-center
//! ray. Targets and decoys compete in a single pool; the best alignment
//! above the acceptance threshold wins, irrespective of type.

use glam::Vec3;

use crate::consts::{AIM_COS_THRESHOLD, CHEST_INTERACT_DISTANCE, REACH_PADDING};
use crate::levels::VantageZone;
use crate::session::state::{Decoy, Hovered, Target};

/// Cosine of the angle between the view ray and the direction to a point
///
/// 1.0 means dead center; degenerate zero-length offsets count as aligned.
pub fn aim_cos(eye: Vec3, look: Vec3, point: Vec3) -> f32 {
    let to = point - eye;
    let len = to.length();
    if len <= f32::EPSILON {
        return 1.0;
    }
    look.normalize_or_zero().dot(to / len)
}

/// Whether the viewer is close enough to interact with a prop at all
pub fn within_reach(eye: Vec3, pos: Vec3, interact_radius: f32) -> bool {
    eye.distance(pos) <= interact_radius + REACH_PADDING
}

/// Whether the viewer stands inside a vantage zone (doubled radius)
pub fn vantage_ok(eye: Vec3, vantage: Option<&VantageZone>) -> bool {
    match vantage {
        Some(v) => eye.distance(v.pos) <= v.radius * 2.0,
        None => true,
    }
}

/// Whether the viewer is close enough to work the chest
pub fn near_chest(eye: Vec3, chest_pos: Vec3) -> bool {
    eye.distance(chest_pos) < CHEST_INTERACT_DISTANCE
}

/// Resolve the single best hover candidate for this frame
///
/// Resolved items (found targets, revealed decoys) never re-enter the pool.
pub fn resolve_hover(
    eye: Vec3,
    look: Vec3,
    targets: &[Target],
    decoys: &[Decoy],
) -> Option<Hovered> {
    let mut best_cos = AIM_COS_THRESHOLD;
    let mut best: Option<Hovered> = None;

    for target in targets {
        if target.found
            || !within_reach(eye, target.pos, target.interact_radius)
            || !vantage_ok(eye, target.vantage.as_ref())
        {
            continue;
        }
        let cos = aim_cos(eye, look, target.pos);
        if cos > best_cos {
            best_cos = cos;
            best = Some(Hovered::Target {
                id: target.id.clone(),
            });
        }
    }

    for decoy in decoys {
        if decoy.revealed || !within_reach(eye, decoy.pos, decoy.interact_radius) {
            continue;
        }
        let cos = aim_cos(eye, look, decoy.pos);
        if cos > best_cos {
            best_cos = cos;
            best = Some(Hovered::Decoy {
                id: decoy.id.clone(),
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: &str, pos: Vec3) -> Target {
        Target {
            id: id.to_string(),
            kind: "marble".to_string(),
            pos,
            yaw: 0.0,
            scale: 1.0,
            found: false,
            interact_radius: 2.5,
            hold_seconds: 4.0,
            vantage: None,
        }
    }

    fn decoy(id: &str, pos: Vec3) -> Decoy {
        Decoy {
            id: id.to_string(),
            kind: "pebble".to_string(),
            pos,
            yaw: 0.0,
            scale: 1.0,
            revealed: false,
            interact_radius: 2.5,
            hold_seconds: 4.0,
        }
    }

    const EYE: Vec3 = Vec3::new(0.0, 1.6, 0.0);

    #[test]
    fn test_aim_cos_dead_center() {
        let look = Vec3::new(0.0, 0.0, -1.0);
        let cos = aim_cos(EYE, look, Vec3::new(0.0, 1.6, -2.0));
        assert!((cos - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_aim_cos_perpendicular() {
        let look = Vec3::new(0.0, 0.0, -1.0);
        let cos = aim_cos(EYE, look, Vec3::new(2.0, 1.6, 0.0));
        assert!(cos.abs() < 1e-6);
    }

    #[test]
    fn test_hover_requires_alignment() {
        let targets = [target("target_0_marble", Vec3::new(0.0, 1.6, -2.0))];
        // Looking straight at it
        let hit = resolve_hover(EYE, Vec3::new(0.0, 0.0, -1.0), &targets, &[]);
        assert_eq!(
            hit,
            Some(Hovered::Target {
                id: "target_0_marble".to_string()
            })
        );
        // Looking 90 degrees away
        let miss = resolve_hover(EYE, Vec3::new(1.0, 0.0, 0.0), &targets, &[]);
        assert_eq!(miss, None);
    }

    #[test]
    fn test_hover_requires_reach() {
        // Same bearing, but 10 units out with a 2.5 radius
        let targets = [target("target_0_marble", Vec3::new(0.0, 1.6, -10.0))];
        let miss = resolve_hover(EYE, Vec3::new(0.0, 0.0, -1.0), &targets, &[]);
        assert_eq!(miss, None);
    }

    #[test]
    fn test_best_alignment_wins_across_types() {
        let targets = [target("target_0_marble", Vec3::new(0.4, 1.6, -2.0))];
        let decoys = [decoy("decoy_0_pebble", Vec3::new(0.05, 1.6, -2.0))];
        // The decoy sits closer to the ray than the target
        let hit = resolve_hover(EYE, Vec3::new(0.0, 0.0, -1.0), &targets, &decoys);
        assert_eq!(
            hit,
            Some(Hovered::Decoy {
                id: "decoy_0_pebble".to_string()
            })
        );
    }

    #[test]
    fn test_resolved_items_leave_the_pool() {
        let mut t = target("target_0_marble", Vec3::new(0.0, 1.6, -2.0));
        t.found = true;
        let mut d = decoy("decoy_0_pebble", Vec3::new(0.1, 1.6, -2.0));
        d.revealed = true;
        let hit = resolve_hover(EYE, Vec3::new(0.0, 0.0, -1.0), &[t], &[d]);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_vantage_zone_gates_targets() {
        let mut t = target("target_0_locket", Vec3::new(0.0, 1.6, -2.0));
        t.vantage = Some(VantageZone {
            pos: Vec3::new(4.0, 1.6, -2.0),
            radius: 1.0,
        });
        let look = Vec3::new(0.0, 0.0, -1.0);
        // Aligned and in reach, but standing outside the vantage zone
        assert_eq!(resolve_hover(EYE, look, std::slice::from_ref(&t), &[]), None);

        // From inside the (doubled) vantage radius it resolves
        let vantage_eye = Vec3::new(3.2, 1.6, -2.0);
        let vantage_look = (t.pos - vantage_eye).normalize();
        assert_eq!(
            resolve_hover(vantage_eye, vantage_look, std::slice::from_ref(&t), &[]),
            Some(Hovered::Target {
                id: "target_0_locket".to_string()
            })
        );
    }

    #[test]
    fn test_near_chest_threshold() {
        let chest = Vec3::new(3.0, 0.4, -3.0);
        assert!(near_chest(Vec3::new(3.0, 1.6, -1.5), chest));
        assert!(!near_chest(Vec3::new(-3.0, 1.6, 3.0), chest));
    }
}
