// ---------------------------------------------------------------------------
// SceneWarning: recoverable conditions found while building a garden
// ---------------------------------------------------------------------------

use std::fmt;

/// Something the scene builder degraded around.
///
/// None of these stop a build; they are collected on the `GardenScene` and
/// logged so the surrounding app can surface them if it wants to.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneWarning {
    /// More goals than grid cells; the tail of the list was dropped.
    CapacityExceeded { dropped: usize, capacity: usize },
    /// Rejection sampling ran out of attempts before reaching its target.
    PlacementUnderflow {
        what: &'static str,
        requested: usize,
        placed: usize,
    },
    /// No visual resource for a stage or obstacle kind; a placeholder is used.
    MissingAsset { key: String },
    /// A habit arrived without a streak and was treated as streak 0.
    MalformedHabit { habit_id: String },
}

impl fmt::Display for SceneWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneWarning::CapacityExceeded { dropped, capacity } => write!(
                f,
                "{dropped} goal(s) dropped: the garden holds at most {capacity} patches"
            ),
            SceneWarning::PlacementUnderflow {
                what,
                requested,
                placed,
            } => write!(f, "placed {placed} of {requested} {what}"),
            SceneWarning::MissingAsset { key } => {
                write!(f, "no asset for '{key}', using placeholder")
            }
            SceneWarning::MalformedHabit { habit_id } => {
                write!(f, "habit '{habit_id}' has no streak, treating it as 0")
            }
        }
    }
}
