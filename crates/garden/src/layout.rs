//! Goal → patch grid assignment.
//!
//! goal[i] lands in row `i / grid_size`, column `i % grid_size`. World
//! coordinates are `index * cell - offset` on each axis so the grid is
//! centred on the origin. X follows columns and Z follows rows.

use bevy::prelude::*;

use crate::config::GardenConfig;
use crate::snapshot::Goal;
use crate::warnings::SceneWarning;

#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub row: usize,
    pub col: usize,
    /// Centre of the patch on the ground plane (y = 0).
    pub position: Vec3,
    pub radius: f32,
    /// Index of the owning goal in the snapshot.
    pub goal_index: usize,
    pub goal_id: String,
}

impl Patch {
    pub fn ground_position(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GardenLayout {
    pub patches: Vec<Patch>,
    /// Goals past grid capacity that got no patch.
    pub dropped: usize,
    pub capacity: usize,
}

impl GardenLayout {
    pub fn patch_for_goal(&self, goal_id: &str) -> Option<&Patch> {
        self.patches.iter().find(|p| p.goal_id == goal_id)
    }

    pub fn warning(&self) -> Option<SceneWarning> {
        (self.dropped > 0).then(|| SceneWarning::CapacityExceeded {
            dropped: self.dropped,
            capacity: self.capacity,
        })
    }
}

/// Distance between neighbouring patch centres.
pub fn cell_size(config: &GardenConfig) -> f32 {
    2.0 * config.patch_radius + config.patch_gap
}

/// Shift that centres the grid on the origin.
pub fn centering_offset(config: &GardenConfig) -> f32 {
    (config.grid_size.saturating_sub(1)) as f32 * cell_size(config) * 0.5
}

/// World position of grid cell (row, col).
pub fn cell_to_world(row: usize, col: usize, config: &GardenConfig) -> Vec3 {
    let cell = cell_size(config);
    let offset = centering_offset(config);
    Vec3::new(col as f32 * cell - offset, 0.0, row as f32 * cell - offset)
}

pub fn layout_goals(goals: &[Goal], config: &GardenConfig) -> GardenLayout {
    let capacity = config.capacity();
    let placed = goals.len().min(capacity);
    let grid = config.grid_size.max(1);

    let patches = goals
        .iter()
        .take(placed)
        .enumerate()
        .map(|(i, goal)| {
            let row = i / grid;
            let col = i % grid;
            Patch {
                row,
                col,
                position: cell_to_world(row, col, config),
                radius: config.patch_radius,
                goal_index: i,
                goal_id: goal.id.clone(),
            }
        })
        .collect();

    GardenLayout {
        patches,
        dropped: goals.len() - placed,
        capacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals(n: usize) -> Vec<Goal> {
        (0..n)
            .map(|i| Goal::new(format!("g{i}"), format!("Goal {i}"), Vec::new()))
            .collect()
    }

    #[test]
    fn test_row_major_assignment() {
        let config = GardenConfig::default();
        let layout = layout_goals(&goals(5), &config);
        let cells: Vec<(usize, usize)> = layout.patches.iter().map(|p| (p.row, p.col)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1)]);
        assert_eq!(layout.dropped, 0);
        assert!(layout.warning().is_none());
    }

    #[test]
    fn test_full_grid_is_centered() {
        let config = GardenConfig::default();
        let layout = layout_goals(&goals(config.capacity()), &config);
        let sum = layout
            .patches
            .iter()
            .fold(Vec3::ZERO, |acc, p| acc + p.position);
        assert!(sum.length() < 1e-3, "grid centroid should be the origin");
    }

    #[test]
    fn test_patches_do_not_overlap() {
        let config = GardenConfig::default();
        let layout = layout_goals(&goals(config.capacity()), &config);
        for (i, a) in layout.patches.iter().enumerate() {
            for b in &layout.patches[i + 1..] {
                let d = a.ground_position().distance(b.ground_position());
                assert!(d >= a.radius + b.radius + config.patch_gap - 1e-4);
            }
        }
    }

    #[test]
    fn test_capacity_exceeded_drops_tail() {
        let config = GardenConfig::default();
        let layout = layout_goals(&goals(12), &config);
        assert_eq!(layout.patches.len(), 9);
        assert_eq!(layout.dropped, 3);
        assert!(layout.patch_for_goal("g9").is_none());
        assert_eq!(
            layout.warning(),
            Some(SceneWarning::CapacityExceeded {
                dropped: 3,
                capacity: 9
            })
        );
    }

    #[test]
    fn test_layout_is_deterministic() {
        let config = GardenConfig::default();
        let input = goals(7);
        assert_eq!(layout_goals(&input, &config), layout_goals(&input, &config));
    }

    #[test]
    fn test_single_cell_grid() {
        let config = GardenConfig {
            grid_size: 1,
            ..GardenConfig::default()
        };
        let layout = layout_goals(&goals(2), &config);
        assert_eq!(layout.patches[0].position, Vec3::ZERO);
        assert_eq!(layout.dropped, 1);
    }

    #[test]
    fn test_empty_goal_list() {
        let layout = layout_goals(&[], &GardenConfig::default());
        assert!(layout.patches.is_empty());
        assert_eq!(layout.dropped, 0);
    }
}
