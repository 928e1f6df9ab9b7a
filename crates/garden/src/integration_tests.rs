//! Integration tests for the garden using the `TestGarden` harness.
//!
//! These run a headless Bevy App with `GardenPlugin` and check how the feed,
//! rebuild and hover systems behave together across frames.

mod hover_tests;
