//! Snapshots and lock events serialize for external observers.

use blockfall::core::{GameConfig, GameSession, GameSnapshot, Shape};
use blockfall::types::{GameAction, LockEvent, SessionState};
use serde_json::Value;

#[test]
fn snapshot_json_has_expected_fields() {
    let mut session = GameSession::with_seed(6);
    session.apply(GameAction::HardDrop);
    session.apply(GameAction::Hold);

    let value: Value = serde_json::to_value(session.snapshot()).unwrap();
    let obj = value.as_object().unwrap();
    for key in [
        "width",
        "height",
        "cells",
        "active",
        "ghost_row",
        "held",
        "can_hold",
        "score",
        "level",
        "lines",
        "speed_multiplier",
        "state",
    ] {
        assert!(obj.contains_key(key), "missing {key}");
    }

    assert_eq!(obj["width"], 10);
    assert_eq!(obj["height"], 20);
    assert_eq!(obj["cells"].as_array().unwrap().len(), 200);
    assert_eq!(obj["state"], "Running");
    assert_eq!(obj["can_hold"], false);
    assert!(obj["held"].is_object());
}

#[test]
fn snapshot_json_round_trip() {
    let mut session = GameSession::with_seed(6);
    for _ in 0..3 {
        session.apply(GameAction::HardDrop);
    }
    let snap = session.snapshot();

    let json = serde_json::to_string(&snap).unwrap();
    let back: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn shape_json_outside_bounds_is_rejected() {
    for json in [
        r#"{"rows":9,"cols":9,"bits":65535}"#,
        r#"{"rows":0,"cols":1,"bits":0}"#,
        r#"{"rows":1,"cols":2,"bits":7}"#,
        r#"{"rows":2,"cols":2,"bits":3}"#,
    ] {
        assert!(serde_json::from_str::<Shape>(json).is_err(), "{json} accepted");
    }

    let good: Shape = serde_json::from_str(r#"{"rows":2,"cols":2,"bits":51}"#).unwrap();
    assert_eq!(good.to_string(), "XX\nXX");
}

#[test]
fn snapshot_with_broken_active_shape_fails_to_load() {
    let mut value = serde_json::to_value(GameSession::with_seed(6).snapshot()).unwrap();
    value["active"]["shape"] = serde_json::json!({ "rows": 9, "cols": 9, "bits": 65535 });
    assert!(serde_json::from_value::<GameSnapshot>(value).is_err());
}

#[test]
fn game_over_snapshot_reports_final_score() {
    let mut session = GameSession::new(GameConfig::default().with_seed(10)).unwrap();
    while !session.is_game_over() {
        session.apply(GameAction::HardDrop);
    }

    let snap = session.snapshot();
    assert_eq!(snap.state, SessionState::GameOver);
    assert!(snap.active.is_none());
    assert_eq!(snap.final_score(), Some(session.score()));

    let value = serde_json::to_value(&snap).unwrap();
    assert_eq!(value["state"], "GameOver");
    assert!(value["active"].is_null());
}

#[test]
fn lock_event_json() {
    let event = LockEvent {
        rows_cleared: 2,
        points: 100,
        leveled_up: false,
        topped_out: false,
    };
    let json = serde_json::to_string(&event).unwrap();
    assert_eq!(
        json,
        r#"{"rows_cleared":2,"points":100,"leveled_up":false,"topped_out":false}"#
    );
    let back: LockEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}
