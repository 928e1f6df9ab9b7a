//! Procedural placement of background elements.
//!
//! 1. **Obstacles** -- trees and rocks in an outer-biased ring around the
//!    patch grid, spaced apart with a per-slot retry limit.
//! 2. **Field** -- thousands of grass blades over a disk, each clear of every
//!    patch, obstacle, and special area.
//!
//! Both run on the same bounded rejection sampler in `sampler`.

mod field;
mod obstacles;
mod sampler;

pub use field::{
    field_clearance, sample_disk, scatter_field, scatter_field_with_budget, FieldElement,
};
pub use obstacles::{
    patch_exclusion_zones, scatter_obstacles, special_area_zones, Obstacle, ObstacleKind,
};
pub use sampler::{rejection_sample, SampleBudget, Sampled};
