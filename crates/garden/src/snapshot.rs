//! Goal/habit input feed.
//!
//! The garden only decorates data that lives elsewhere. The persistence
//! service is reached through [`GoalFeed`]; whatever goes wrong there, the
//! scene falls back to an empty garden instead of failing the view.

use std::fmt;
use std::path::PathBuf;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::growth::clamp_streak;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    /// Externally computed streak. `None` when the record arrived without one.
    #[serde(default)]
    pub streak: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Habit {
    pub fn new(id: impl Into<String>, name: impl Into<String>, streak: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            streak: Some(streak),
            category: None,
        }
    }

    /// Streak in days; missing or negative values read as 0.
    pub fn streak_days(&self) -> u32 {
        self.streak.map(clamp_streak).unwrap_or(0)
    }

    pub fn is_malformed(&self) -> bool {
        self.streak.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub habits: Vec<Habit>,
}

impl Goal {
    pub fn new(id: impl Into<String>, name: impl Into<String>, habits: Vec<Habit>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            habits,
        }
    }
}

/// Immutable goal/habit data for one scene build.
///
/// Replacing this resource (not mutating goals in place) is what triggers a
/// rebuild of the garden.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct GardenSnapshot {
    pub user_id: String,
    pub goals: Vec<Goal>,
}

impl GardenSnapshot {
    pub fn new(user_id: impl Into<String>, goals: Vec<Goal>) -> Self {
        Self {
            user_id: user_id.into(),
            goals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn habit_count(&self) -> usize {
        self.goals.iter().map(|g| g.habits.len()).sum()
    }
}

/// Accepted payload shapes: `{"goals": [...]}` or a bare goal array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedBody {
    Wrapped { goals: Vec<Goal> },
    Bare(Vec<Goal>),
}

impl FeedBody {
    fn into_goals(self) -> Vec<Goal> {
        match self {
            FeedBody::Wrapped { goals } | FeedBody::Bare(goals) => goals,
        }
    }
}

/// Parse a feed payload.
pub fn parse_goals(text: &str) -> Result<Vec<Goal>, FeedError> {
    let body: FeedBody = serde_json::from_str(text)?;
    Ok(body.into_goals())
}

/// What the persistence collaborator answered.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedResponse {
    pub status: u16,
    pub goals: Vec<Goal>,
}

impl FeedResponse {
    pub fn ok(goals: Vec<Goal>) -> Self {
        Self { status: 200, goals }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of goal/habit records, keyed on user id.
pub trait GoalFeed {
    fn fetch(&self, user_id: &str) -> Result<FeedResponse, FeedError>;
}

/// Reads `<dir>/<user_id>.json`.
#[derive(Debug, Clone)]
pub struct FileFeed {
    pub dir: PathBuf,
}

impl FileFeed {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl GoalFeed for FileFeed {
    fn fetch(&self, user_id: &str) -> Result<FeedResponse, FeedError> {
        if user_id.is_empty() || user_id.contains(['/', '\\']) || user_id.contains("..") {
            return Err(FeedError::Status(400));
        }
        let path = self.dir.join(format!("{user_id}.json"));
        let text = std::fs::read_to_string(path)?;
        Ok(FeedResponse::ok(parse_goals(&text)?))
    }
}

/// In-memory feed, used by the demo build and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    pub response: Option<FeedResponse>,
}

impl StaticFeed {
    pub fn new(goals: Vec<Goal>) -> Self {
        Self {
            response: Some(FeedResponse::ok(goals)),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, FeedError> {
        Ok(Self::new(parse_goals(text)?))
    }
}

impl GoalFeed for StaticFeed {
    fn fetch(&self, _user_id: &str) -> Result<FeedResponse, FeedError> {
        self.response.clone().ok_or(FeedError::Status(404))
    }
}

/// Fetch a snapshot for `user_id`.
///
/// Errors, non-success statuses, and empty answers all become an empty
/// snapshot; the failure is logged for the surrounding application.
pub fn load_snapshot(feed: &dyn GoalFeed, user_id: &str) -> GardenSnapshot {
    match feed.fetch(user_id) {
        Ok(response) if response.is_success() => {
            if response.goals.is_empty() {
                info!("Goal feed for '{}' is empty; rendering an empty garden", user_id);
            }
            GardenSnapshot::new(user_id, response.goals)
        }
        Ok(response) => {
            warn!(
                "Goal feed for '{}' answered status {}; rendering an empty garden",
                user_id, response.status
            );
            GardenSnapshot::new(user_id, Vec::new())
        }
        Err(e) => {
            warn!("Goal feed for '{}' failed: {}; rendering an empty garden", user_id, e);
            GardenSnapshot::new(user_id, Vec::new())
        }
    }
}

/// The feed the running app pulls snapshots from.
#[derive(Resource)]
pub struct GardenFeed {
    pub user_id: String,
    feed: Box<dyn GoalFeed + Send + Sync>,
}

impl GardenFeed {
    pub fn new(user_id: impl Into<String>, feed: impl GoalFeed + Send + Sync + 'static) -> Self {
        Self {
            user_id: user_id.into(),
            feed: Box::new(feed),
        }
    }

    pub fn load(&self) -> GardenSnapshot {
        load_snapshot(self.feed.as_ref(), &self.user_id)
    }
}

/// Ask the plugin to fetch a fresh snapshot from `GardenFeed`.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ReloadGarden;

/// Errors that can occur while fetching goal data.
#[derive(Debug)]
pub enum FeedError {
    Io(std::io::Error),
    Decode(String),
    /// The collaborator refused the request.
    Status(u16),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Io(e) => write!(f, "I/O error: {e}"),
            FeedError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            FeedError::Status(code) => write!(f, "Feed answered status {code}"),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FeedError {
    fn from(e: std::io::Error) -> Self {
        FeedError::Io(e)
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Decode(e.to_string())
    }
}
