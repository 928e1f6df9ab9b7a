//! Dense field elements (grass) over a disk, kept clear of every obstacle.
//!
//! Candidates are area-correct: `radius = P * sqrt(u)`. Sampling the radius
//! linearly would crowd blades around the centre.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use super::obstacles::Obstacle;
use super::sampler::{rejection_sample, SampleBudget, Sampled};
use crate::config::{FieldConfig, FIELD_ATTEMPT_FACTOR};

#[derive(Debug, Clone, PartialEq)]
pub struct FieldElement {
    pub position: Vec2,
    pub heading: f32,
    pub height: f32,
}

impl FieldElement {
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(self.position.x, 0.0, self.position.y)
    }
}

/// Slack of `point` against the closest exclusion zone (negative = inside).
pub fn field_clearance(point: Vec2, zones: &[Obstacle], safety_margin: f32) -> f32 {
    zones
        .iter()
        .map(|z| point.distance(z.position) - z.required_clearance(safety_margin))
        .fold(f32::INFINITY, f32::min)
}

/// Area-correct point in a disk of `radius` around the origin.
pub fn sample_disk<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec2 {
    let r = radius * rng.gen::<f32>().sqrt();
    let angle = rng.gen::<f32>() * TAU;
    Vec2::new(angle.cos(), angle.sin()) * r
}

pub fn scatter_field<R: Rng + ?Sized>(
    rng: &mut R,
    field: &FieldConfig,
    zones: &[Obstacle],
) -> Sampled<FieldElement> {
    let budget = SampleBudget::total(field.count.saturating_mul(FIELD_ATTEMPT_FACTOR));
    scatter_field_with_budget(rng, field, zones, budget)
}

pub fn scatter_field_with_budget<R: Rng + ?Sized>(
    rng: &mut R,
    field: &FieldConfig,
    zones: &[Obstacle],
    budget: SampleBudget,
) -> Sampled<FieldElement> {
    let (lo, hi) = field.height_range;
    rejection_sample(
        rng,
        field.count,
        budget,
        |rng, _| FieldElement {
            position: sample_disk(rng, field.radius),
            heading: rng.gen::<f32>() * TAU,
            height: rng.gen_range(lo..=hi),
        },
        // Blades may overlap each other; only the zones matter.
        |blade, _| field_clearance(blade.position, zones, field.safety_margin),
    )
}
