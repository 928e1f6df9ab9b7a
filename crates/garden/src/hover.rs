//! What the pointer is over, as a plain data payload.
//!
//! Picking works on the ground plane: the renderer casts the cursor ray onto
//! y = 0 and hands the hit point to `pick`. Flowers win over the patch they
//! stand in; outside every patch nothing is hovered.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::FLOWER_RENDER_SIZE;
use crate::scene::GardenScene;

/// Pick radius of a flower before growth scaling: the drawn head's radius.
pub const FLOWER_PICK_RADIUS: f32 = FLOWER_RENDER_SIZE * 0.5;

/// Tooltip payload for the hovered element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HoverInfo {
    #[serde(rename_all = "camelCase")]
    Patch {
        goal_id: String,
        goal_name: String,
        habit_count: usize,
    },
    #[serde(rename_all = "camelCase")]
    Habit {
        habit_id: String,
        habit_name: String,
        goal_id: String,
        goal_name: String,
        stage: u8,
        streak: u32,
    },
}

impl HoverInfo {
    pub fn title(&self) -> &str {
        match self {
            HoverInfo::Patch { goal_name, .. } => goal_name,
            HoverInfo::Habit { habit_name, .. } => habit_name,
        }
    }
}

/// Sent whenever the hovered element changes, including to nothing.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HoverChanged(pub Option<HoverInfo>);

/// Current hover target, kept in sync with the last `HoverChanged`.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct HoverState(pub Option<HoverInfo>);

/// JSON handed to an embedding page; `null` when nothing is hovered.
pub fn hover_payload(hover: Option<&HoverInfo>) -> serde_json::Value {
    serde_json::to_value(hover).unwrap_or(serde_json::Value::Null)
}

/// Resolve a ground-plane point (world x, world z) to the element under it.
pub fn pick(scene: &GardenScene, ground: Vec2) -> Option<HoverInfo> {
    let patch = scene
        .patches
        .iter()
        .find(|p| p.ground_position().distance(ground) <= p.radius)?;
    let goal = scene.goal_for_patch(patch)?;

    let flower = scene
        .flowers_of(patch.goal_index)
        .map(|f| {
            let d = Vec2::new(f.world_position.x, f.world_position.z).distance(ground);
            (f, d)
        })
        .filter(|(f, d)| *d <= FLOWER_PICK_RADIUS * f.scale)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(f, _)| f);

    Some(match flower {
        Some(f) => HoverInfo::Habit {
            habit_id: f.habit_id.clone(),
            habit_name: f.habit_name.clone(),
            goal_id: goal.id.clone(),
            goal_name: goal.name.clone(),
            stage: f.stage,
            streak: f.streak,
        },
        None => HoverInfo::Patch {
            goal_id: goal.id.clone(),
            goal_name: goal.name.clone(),
            habit_count: goal.habits.len(),
        },
    })
}
