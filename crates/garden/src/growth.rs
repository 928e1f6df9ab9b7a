//! Streak → flower growth.
//!
//! The stage is a coarse step function used to pick the flower model; the
//! scale keeps growing smoothly so two flowers in the same stage still look
//! different. Both saturate at `FULL_BLOOM_STREAK` days.

use serde::{Deserialize, Serialize};

/// Streak (days) at which scale stops growing and stage 5 is reached.
pub const FULL_BLOOM_STREAK: u32 = 30;

/// Inclusive lower streak bounds for stages 2..=5.
const STAGE_THRESHOLDS: [(u32, u8); 4] = [(30, 5), (14, 4), (7, 3), (3, 2)];

pub const MIN_STAGE: u8 = 1;
pub const MAX_STAGE: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    pub base_scale: f32,
    pub max_scale_addition: f32,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            base_scale: 0.32,
            max_scale_addition: 0.38,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Growth {
    pub stage: u8,
    pub scale: f32,
}

/// Negative streaks read as zero.
pub fn clamp_streak(streak: i64) -> u32 {
    streak.clamp(0, u32::MAX as i64) as u32
}

pub fn growth_stage(streak: u32) -> u8 {
    STAGE_THRESHOLDS
        .iter()
        .find(|(min, _)| streak >= *min)
        .map(|&(_, stage)| stage)
        .unwrap_or(MIN_STAGE)
}

pub fn growth_scale(streak: u32, params: &GrowthParams) -> f32 {
    let progress = (streak as f32 / FULL_BLOOM_STREAK as f32).min(1.0);
    params.base_scale + progress * params.max_scale_addition
}

pub fn grow(streak: u32, params: &GrowthParams) -> Growth {
    Growth {
        stage: growth_stage(streak),
        scale: growth_scale(streak, params),
    }
}
