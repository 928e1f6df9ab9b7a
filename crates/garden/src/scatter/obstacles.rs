//! Trees and rocks in an annulus around the patch grid.
//!
//! Each slot gets its own angular sector (`slot / count * TAU` plus jitter),
//! so the ring closes evenly. Radial distance uses `inner + span * sqrt(u)`,
//! which piles obstacles toward the outer edge: the garden reads as a clearing
//! inside a ring of trees. This is deliberately not the area-correct sampler
//! the grass uses.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::sampler::{rejection_sample, SampleBudget, Sampled};
use crate::config::{GardenConfig, ScatterRing, OBSTACLE_RETRIES};
use crate::layout::GardenLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Tree,
    Rock,
    Patch,
    SpecialArea,
}

impl ObstacleKind {
    /// Scales the drawn radius into the collision radius.
    pub fn multiplier(self) -> f32 {
        match self {
            // Grass grows up to the trunk, under the canopy edge.
            ObstacleKind::Tree => 0.6,
            ObstacleKind::Rock => 1.0,
            ObstacleKind::Patch => 1.0,
            ObstacleKind::SpecialArea => 1.1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ObstacleKind::Tree => "trees",
            ObstacleKind::Rock => "rocks",
            ObstacleKind::Patch => "patches",
            ObstacleKind::SpecialArea => "special areas",
        }
    }
}

/// A placed prop, or any other disk other things must keep clear of.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Ground-plane position (world x, world z).
    pub position: Vec2,
    pub base_radius: f32,
    pub scale: f32,
    pub heading: f32,
}

impl Obstacle {
    pub fn zone(kind: ObstacleKind, position: Vec2, radius: f32) -> Self {
        Self {
            kind,
            position,
            base_radius: radius,
            scale: 1.0,
            heading: 0.0,
        }
    }

    pub fn effective_radius(&self) -> f32 {
        self.base_radius * self.scale * self.kind.multiplier()
    }

    /// Distance a field element must keep from this obstacle's centre.
    pub fn required_clearance(&self, safety_margin: f32) -> f32 {
        self.effective_radius() + safety_margin
    }

    pub fn world_position(&self) -> Vec3 {
        Vec3::new(self.position.x, 0.0, self.position.y)
    }
}

/// Every patch as an exclusion zone.
pub fn patch_exclusion_zones(layout: &GardenLayout) -> Vec<Obstacle> {
    layout
        .patches
        .iter()
        .map(|p| Obstacle::zone(ObstacleKind::Patch, p.ground_position(), p.radius))
        .collect()
}

pub fn special_area_zones(config: &GardenConfig) -> Vec<Obstacle> {
    config
        .special_areas
        .iter()
        .map(|a| Obstacle::zone(ObstacleKind::SpecialArea, a.position, a.radius))
        .collect()
}

fn ring_candidate<R: Rng + ?Sized>(rng: &mut R, ring: &ScatterRing, slot: usize) -> Obstacle {
    let sector = TAU / ring.count.max(1) as f32;
    let jitter = (rng.gen::<f32>() - 0.5) * sector * ring.angle_jitter;
    let angle = slot as f32 * sector + jitter;
    let span = ring.outer_radius - ring.inner_radius;
    let distance = ring.inner_radius + span * rng.gen::<f32>().sqrt();
    let (lo, hi) = ring.scale_range;
    Obstacle {
        kind: ring.kind,
        position: Vec2::new(angle.cos(), angle.sin()) * distance,
        base_radius: ring.base_radius,
        scale: rng.gen_range(lo..=hi),
        heading: rng.gen::<f32>() * TAU,
    }
}

/// Required centre distance between a new obstacle and an existing one.
fn separation(ring: &ScatterRing, candidate: &Obstacle, other: &Obstacle) -> f32 {
    ring.min_separation
        .max(candidate.effective_radius() + other.effective_radius())
}

/// Scatter one ring of obstacles, keeping clear of `existing` ones too.
///
/// Each slot gets `OBSTACLE_RETRIES` tries; after that its best candidate is
/// kept, so the result always has `ring.count` items.
pub fn scatter_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    ring: &ScatterRing,
    existing: &[Obstacle],
) -> Sampled<Obstacle> {
    rejection_sample(
        rng,
        ring.count,
        SampleBudget::relaxed(ring.count, OBSTACLE_RETRIES),
        |rng, slot| ring_candidate(rng, ring, slot),
        |candidate, placed| {
            placed
                .iter()
                .chain(existing)
                .map(|other| {
                    candidate.position.distance(other.position)
                        - separation(ring, candidate, other)
                })
                .fold(f32::INFINITY, f32::min)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_effective_radius_uses_all_factors() {
        let tree = Obstacle {
            kind: ObstacleKind::Tree,
            position: Vec2::ZERO,
            base_radius: 2.0,
            scale: 1.5,
            heading: 0.0,
        };
        assert!((tree.effective_radius() - 2.0 * 1.5 * 0.6).abs() < 1e-6);
        assert!((tree.required_clearance(0.5) - 2.3).abs() < 1e-6);
    }

    #[test]
    fn test_ring_count_always_reached() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let ring = ScatterRing::trees();
        let out = scatter_obstacles(&mut rng, &ring, &[]);
        assert_eq!(out.items.len(), ring.count);
        assert!(out.attempts <= ring.count * OBSTACLE_RETRIES);
    }

    #[test]
    fn test_obstacles_stay_in_annulus() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let ring = ScatterRing::rocks();
        for o in scatter_obstacles(&mut rng, &ring, &[]).items {
            let d = o.position.length();
            assert!(d >= ring.inner_radius - 1e-4 && d <= ring.outer_radius + 1e-4);
            assert!(o.scale >= ring.scale_range.0 && o.scale <= ring.scale_range.1);
        }
    }

    #[test]
    fn test_trees_mostly_respect_separation() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let ring = ScatterRing::trees();
        let out = scatter_obstacles(&mut rng, &ring, &[]);
        let strict = out.items.len() - out.relaxed;
        assert!(strict >= ring.count * 9 / 10, "only {strict} trees met spacing");

        // A tree crowding an earlier one can only be a relaxed slot.
        let crowding = (1..out.items.len())
            .filter(|&j| {
                out.items[..j].iter().any(|earlier| {
                    let tree = &out.items[j];
                    tree.position.distance(earlier.position) < separation(&ring, tree, earlier)
                })
            })
            .count();
        assert!(crowding <= out.relaxed, "{crowding} crowded, {} relaxed", out.relaxed);
    }

    #[test]
    fn test_sparse_ring_is_pairwise_separated() {
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        let ring = ScatterRing {
            count: 16,
            ..ScatterRing::trees()
        };
        let out = scatter_obstacles(&mut rng, &ring, &[]);
        assert_eq!(out.items.len(), 16);
        assert_eq!(out.relaxed, 0);
        for (i, a) in out.items.iter().enumerate() {
            for b in &out.items[i + 1..] {
                let gap = a.position.distance(b.position);
                assert!(gap >= ring.min_separation, "trees {gap} apart");
            }
        }
    }

    #[test]
    fn test_outer_bias() {
        // Sqrt of a uniform has mean 2/3, above the midpoint of the annulus.
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let ring = ScatterRing {
            count: 400,
            min_separation: 0.0,
            ..ScatterRing::trees()
        };
        let out = scatter_obstacles(&mut rng, &ring, &[]);
        let mid = (ring.inner_radius + ring.outer_radius) * 0.5;
        let outer = out.items.iter().filter(|o| o.position.length() > mid).count();
        assert!(outer > out.items.len() * 6 / 10, "{outer} of 400 beyond midpoint");
    }

    #[test]
    fn test_keeps_clear_of_existing_zone() {
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let ring = ScatterRing::trees();
        let pond = Obstacle::zone(ObstacleKind::SpecialArea, Vec2::new(45.0, 0.0), 4.0);
        let out = scatter_obstacles(&mut rng, &ring, std::slice::from_ref(&pond));
        let inside = out
            .items
            .iter()
            .filter(|t| t.position.distance(pond.position) < pond.effective_radius())
            .count();
        assert_eq!(inside, 0);
    }

    #[test]
    fn test_same_seed_same_ring() {
        let ring = ScatterRing::trees();
        let a = scatter_obstacles(&mut ChaCha8Rng::seed_from_u64(16), &ring, &[]);
        let b = scatter_obstacles(&mut ChaCha8Rng::seed_from_u64(16), &ring, &[]);
        assert_eq!(a, b);
    }
}
