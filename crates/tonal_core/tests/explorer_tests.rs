use pretty_assertions::assert_eq;
use serde_json::json;

use tonal_core::{Action, ExplorerState, IntervalPattern, NoteName, ResolvedScale};

fn note(s: &str) -> NoteName {
    s.parse().unwrap()
}

fn names(resolved: &ResolvedScale) -> String {
    resolved
        .note_names()
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn apply(state: ExplorerState, actions: &[&str]) -> ExplorerState {
    actions
        .iter()
        .map(|text| text.parse::<Action>().unwrap())
        .fold(state, |state, action| state.reduce(&action))
}

#[test]
fn test_explorer_session() {
    let state = apply(
        ExplorerState::default(),
        &["pattern:2 1 2 2 1 2 2", "tonic+15"],
    );
    assert_eq!(state.tonic, note("A"));
    assert_eq!(names(&state.view().resolved), "A B C D E F G A");

    // D natural minor re-centered on A
    let state = apply(state, &["context+5"]);
    let view = state.view();
    assert_eq!(view.resolved.transform_targets(), &[note("D")]);
    assert_eq!(names(&view.resolved), "A B♭ C D E F G A");

    let state = apply(state, &["degree+2"]);
    let view = state.view();
    assert_eq!(names(&view.home), "A B♭ C D E F G A");
    assert_eq!(names(&view.resolved), "C D E F G A B♭ C");
    assert_eq!(view.layout.as_ref().map(|rows| rows.len()), Some(6));

    // C natural minor has no A
    let state = apply(state, &["context-2"]);
    let view = state.view();
    assert!(!view.home.can_transform());
    assert_eq!(view.home.transform_targets(), &[note("C")]);
    // The rotation re-resolves from the unreachable home
    assert!(view.resolved.can_transform());
    assert_eq!(view.resolved.transform_targets(), &[view.resolved.tonic().note]);
    assert!(view.layout.is_none());
}

#[test]
fn test_layout_follows_origin_changes() {
    let state = apply(ExplorerState::default(), &["origin:5=D2"]);
    let layout = state.view().layout.unwrap();
    assert_eq!(layout[5].origin.to_string(), "D2");
    assert_eq!(layout[5].slots[0].note, Some(note("D")));
    assert_eq!(layout[5].slots[0].octave, 2);
}

#[test]
fn test_set_pattern_from_json_action() {
    let action: Action =
        serde_json::from_value(json!({ "type": "setPattern", "pattern": [2, 2, 3, 2, 3] })).unwrap();
    let state = apply(ExplorerState::default(), &["mode+4"]).reduce(&action);
    assert_eq!(state.interval_pattern, IntervalPattern::new(vec![2, 2, 3, 2, 3]));
    assert_eq!(state.modal_shift, 0);
    // Every step advances one letter, even across a minor third
    assert_eq!(names(&state.view().resolved), "C D E F♯♯ G♯♯ A♯♯♯");
}

#[test]
fn test_action_json_shape() {
    let action = Action::ShiftContext { offset: -2 };
    assert_eq!(
        serde_json::to_value(&action).unwrap(),
        json!({ "type": "shiftContext", "offset": -2 })
    );
    let origin: Action =
        serde_json::from_value(json!({ "type": "setOrigin", "index": 0, "origin": "F♯3" })).unwrap();
    assert_eq!(origin.to_string(), "origin:0=F♯3");
}

#[test]
fn test_state_round_trips_through_json() {
    let state = apply(
        ExplorerState::default(),
        &["tonic+3", "mode+1", "degree+2", "context+7", "toggle:3"],
    );
    let json = serde_json::to_string(&state).unwrap();
    let restored: ExplorerState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);
    assert_eq!(restored.view(), state.view());
}

#[test]
fn test_view_json_reports_missing_layout_as_null() {
    let view = apply(ExplorerState::default(), &["context+6"]).view();
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["layout"], json!(null));
    assert_eq!(
        json["home"]["context"],
        json!({ "status": "unreachable", "targets": ["F♯", "G♭"] })
    );
}
