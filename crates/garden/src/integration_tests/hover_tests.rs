use bevy::prelude::*;

use crate::hover::{pick, HoverInfo};
use crate::snapshot::{Goal, Habit};
use crate::test_harness::TestGarden;

fn garden() -> TestGarden {
    TestGarden::new().with_goals(vec![Goal::new(
        "sleep",
        "Sleep well",
        vec![Habit::new("lights-out", "Lights out by 11", 12)],
    )])
}

#[test]
fn test_hover_event_updates_state() {
    let mut garden = garden();
    assert_eq!(garden.hovered(), None);

    let patch = &garden.scene().patches[0];
    let info = pick(garden.scene(), patch.ground_position() + Vec2::new(0.0, 4.5));
    assert!(matches!(info, Some(HoverInfo::Patch { .. })));

    garden.hover(info.clone());
    assert_eq!(garden.hovered(), info.as_ref());

    garden.hover(None);
    assert_eq!(garden.hovered(), None);
}

#[test]
fn test_latest_hover_event_wins() {
    let mut garden = garden();
    let flower = garden.scene().flowers[0].clone();
    let over_flower = pick(
        garden.scene(),
        Vec2::new(flower.world_position.x, flower.world_position.z),
    );
    assert_eq!(over_flower.as_ref().map(HoverInfo::title), Some("Lights out by 11"));

    garden
        .world_mut()
        .send_event(crate::hover::HoverChanged(None));
    garden.hover(over_flower.clone());
    assert_eq!(garden.hovered(), over_flower.as_ref());
}
