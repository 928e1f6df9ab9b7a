//! Golden-angle flower placement inside a patch.
//!
//! Flower `i` of `n` sits at angle `(i + 0.5) * GOLDEN_ANGLE` and radius
//! `R * margin * sqrt((i + 0.5) / n)`. The square root keeps the area density
//! roughly even, so small patches with many habits do not clump at the centre.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;
use xxhash_rust::xxh32::xxh32;

use crate::config::{GardenConfig, FLOWER_HEIGHT};
use crate::growth::grow;
use crate::layout::Patch;
use crate::snapshot::Goal;

/// π(3 − √5) ≈ 2.39996 rad.
pub fn golden_angle() -> f32 {
    PI * (3.0 - 5.0_f32.sqrt())
}

/// Local (patch-relative) position of flower `index` out of `count`.
pub fn spiral_point(index: usize, count: usize, radius: f32, margin: f32) -> Vec3 {
    let shifted = index as f32 + 0.5;
    let angle = shifted * golden_angle();
    let r = radius * margin * (shifted / count.max(1) as f32).sqrt();
    Vec3::new(r * angle.cos(), FLOWER_HEIGHT, r * angle.sin())
}

pub fn distribute(count: usize, radius: f32, margin: f32) -> Vec<Vec3> {
    (0..count)
        .map(|i| spiral_point(i, count, radius, margin))
        .collect()
}

/// Stable heading for a habit, so a flower faces the same way on every rebuild.
pub fn habit_heading(habit_id: &str) -> f32 {
    xxh32(habit_id.as_bytes(), 0) as f32 / u32::MAX as f32 * TAU
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flower {
    pub habit_id: String,
    pub habit_name: String,
    pub goal_index: usize,
    pub streak: u32,
    pub stage: u8,
    pub scale: f32,
    /// Rotation about Y in radians.
    pub heading: f32,
    /// Offset from the patch centre.
    pub local_position: Vec3,
    pub world_position: Vec3,
}

/// Flowers for every habit of `goal`, placed inside `patch`.
pub fn flowers_for_patch(patch: &Patch, goal: &Goal, config: &GardenConfig) -> Vec<Flower> {
    let count = goal.habits.len();
    goal.habits
        .iter()
        .enumerate()
        .map(|(i, habit)| {
            let streak = habit.streak_days();
            let growth = grow(streak, &config.growth);
            let local = spiral_point(i, count, patch.radius, config.flower_margin);
            Flower {
                habit_id: habit.id.clone(),
                habit_name: habit.name.clone(),
                goal_index: patch.goal_index,
                streak,
                stage: growth.stage,
                scale: growth.scale,
                heading: habit_heading(&habit.id),
                local_position: local,
                world_position: patch.position + local,
            }
        })
        .collect()
}
