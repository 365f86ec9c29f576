use std::collections::BTreeSet;

use pretty_assertions::assert_eq;

use tonal_core::{
    ContextStatus, IntervalPattern, NoteName, Origin, PitchClass, ResolvedScale, ScaleNote,
    apply_degree_rotation, apply_harmonic_transform, map_scale_to_layout, resolve_scale,
    scale_to_map,
};

const MAJOR: [&str; 13] = [
    "G♭ A♭ B♭ C♭ D♭ E♭ F G♭",
    "D♭ E♭ F G♭ A♭ B♭ C D♭",
    "A♭ B♭ C D♭ E♭ F G A♭",
    "E♭ F G A♭ B♭ C D E♭",
    "B♭ C D E♭ F G A B♭",
    "F G A B♭ C D E F",
    "C D E F G A B C",
    "G A B C D E F♯ G",
    "D E F♯ G A B C♯ D",
    "A B C♯ D E F♯ G♯ A",
    "E F♯ G♯ A B C♯ D♯ E",
    "B C♯ D♯ E F♯ G♯ A♯ B",
    "F♯ G♯ A♯ B C♯ D♯ E♯ F♯",
];

const MINOR: [&str; 13] = [
    "E♭ F G♭ A♭ B♭ C♭ D♭ E♭",
    "B♭ C D♭ E♭ F G♭ A♭ B♭",
    "F G A♭ B♭ C D♭ E♭ F",
    "C D E♭ F G A♭ B♭ C",
    "G A B♭ C D E♭ F G",
    "D E F G A B♭ C D",
    "A B C D E F G A",
    "E F♯ G A B C D E",
    "B C♯ D E F♯ G A B",
    "F♯ G♯ A B C♯ D E F♯",
    "C♯ D♯ E F♯ G♯ A B C♯",
    "G♯ A♯ B C♯ D♯ E F♯ G♯",
    "D♯ E♯ F♯ G♯ A♯ B C♯ D♯",
];

fn note(s: &str) -> NoteName {
    s.parse().unwrap()
}

fn origin(s: &str) -> Origin {
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

fn tonic_of(row: &str) -> NoteName {
    note(row.split(' ').next().unwrap())
}

#[test]
fn test_major_spellings_across_the_circle_of_fifths() {
    for expected in MAJOR {
        let resolved = resolve_scale(tonic_of(expected), &IntervalPattern::major(), 0);
        assert_eq!(names(&resolved), expected);
    }
}

#[test]
fn test_minor_spellings_across_the_circle_of_fifths() {
    for expected in MINOR {
        let resolved = resolve_scale(tonic_of(expected), &IntervalPattern::natural_minor(), 0);
        assert_eq!(names(&resolved), expected);
    }
}

#[test]
fn test_modal_shift_moves_between_parallel_modes() {
    // Major read from its sixth step is the parallel minor, and minor read
    // from its third step is the parallel major
    for row in MAJOR {
        let tonic = tonic_of(row);
        assert_eq!(
            names(&resolve_scale(tonic, &IntervalPattern::major(), 5)),
            names(&resolve_scale(tonic, &IntervalPattern::natural_minor(), 0))
        );
        assert_eq!(
            names(&resolve_scale(tonic, &IntervalPattern::natural_minor(), 2)),
            row
        );
    }
}

#[test]
fn test_resolved_scale_shape() {
    let patterns = [
        IntervalPattern::major(),
        IntervalPattern::natural_minor(),
        IntervalPattern::new(vec![2, 2, 3, 2, 3]),
        IntervalPattern::new(vec![3, 4]),
        IntervalPattern::new(vec![1; 12]),
    ];
    for tonic in tonal_core::note::CHROMATIC_SPELLINGS.iter().copied() {
        for pattern in &patterns {
            let resolved = resolve_scale(tonic, pattern, 0);
            let scale = resolved.scale();
            assert_eq!(scale.len(), pattern.len() + 1);
            assert_eq!(
                scale[0],
                ScaleNote {
                    note: tonic,
                    degree: 1,
                    pitch_class: tonic.pitch_class(),
                }
            );
            for (index, member) in scale.iter().enumerate() {
                assert_eq!(member.degree, index + 1);
                assert!(member.pitch_class.value() < 12);
                assert_eq!(member.note.pitch_class(), member.pitch_class);
            }
        }
    }
}

#[test]
fn test_rotation_by_length_round_trips() {
    let major = IntervalPattern::major();
    assert_eq!(major.rotate(major.len()), major);
    assert_eq!(major.rotate(3).rotate(4), major);
}

#[test]
fn test_degree_rotation_then_zero_is_stable() {
    let c_major = resolve_scale(note("C"), &IntervalPattern::major(), 0);
    for k in 0..14 {
        let rotated = apply_degree_rotation(&c_major, k);
        assert_eq!(apply_degree_rotation(&rotated, 0), rotated);
    }
}

#[test]
fn test_degree_rotation_walks_the_modes() {
    let c_major = resolve_scale(note("C"), &IntervalPattern::major(), 0);
    let expected = [
        "C D E F G A B C",
        "D E F G A B C D",
        "E F G A B C D E",
        "F G A B C D E F",
        "G A B C D E F G",
        "A B C D E F G A",
        "B C D E F G A B",
    ];
    for (k, row) in expected.iter().enumerate() {
        assert_eq!(names(&apply_degree_rotation(&c_major, k)), *row);
    }
}

#[test]
fn test_harmonic_transform_over_every_offset() {
    let c_major = resolve_scale(note("C"), &IntervalPattern::major(), 0);
    let cases: [(i32, bool, &[&str], &str); 11] = [
        (1, true, &["C♯", "D♭"], "C D♭ E♭ F G♭ A♭ B♭ C"),
        (2, false, &["D"], "D E F♯ G A B C♯ D"),
        (3, true, &["D♯", "E♭"], "C D E♭ F G A♭ B♭ C"),
        (4, false, &["E"], "E F♯ G♯ A B C♯ D♯ E"),
        (5, true, &["F"], "C D E F G A B♭ C"),
        (6, false, &["F♯", "G♭"], "F♯ G♯ A♯ B C♯ D♯ E♯ F♯"),
        (7, true, &["G"], "C D E F♯ G A B C"),
        (8, true, &["G♯", "A♭"], "C D♭ E♭ F G A♭ B♭ C"),
        (9, false, &["A"], "A B C♯ D E F♯ G♯ A"),
        (10, true, &["A♯", "B♭"], "C D E♭ F G A B♭ C"),
        (11, false, &["B"], "B C♯ D♯ E F♯ G♯ A♯ B"),
    ];

    for (offset, reachable, targets, expected) in cases {
        let result = apply_harmonic_transform(&c_major, offset);
        let targets: Vec<NoteName> = targets.iter().map(|t| note(t)).collect();
        assert_eq!(result.can_transform(), reachable, "offset {}", offset);
        assert_eq!(result.transform_targets(), targets.as_slice(), "offset {}", offset);
        assert_eq!(names(&result), expected, "offset {}", offset);
        if reachable {
            assert_eq!(result.tonic().note, note("C"));
        }
    }
}

#[test]
fn test_harmonic_transform_from_minor_tonic() {
    let a_minor = resolve_scale(note("A"), &IntervalPattern::natural_minor(), 0);
    let result = apply_harmonic_transform(&a_minor, 3);
    assert_eq!(result.context(), &ContextStatus::Unreachable(vec![note("C")]));

    let d_major = resolve_scale(note("D"), &IntervalPattern::major(), 0);
    let result = apply_harmonic_transform(&d_major, 5);
    assert_eq!(result.context(), &ContextStatus::Reachable(vec![note("G")]));
    assert_eq!(names(&result), "D E F♯ G A B C D");
}

#[test]
fn test_canonicalizer_keeps_first_occurrence() {
    let scale = [
        ScaleNote {
            note: note("C"),
            degree: 1,
            pitch_class: PitchClass::new(0),
        },
        ScaleNote {
            note: note("B♯"),
            degree: 2,
            pitch_class: PitchClass::new(0),
        },
    ];
    assert_eq!(scale_to_map(&scale).get(PitchClass::new(0)).map(|n| n.note), Some(note("C")));
}

#[test]
fn test_keyboard_projection() {
    let c_major = resolve_scale(note("C"), &IntervalPattern::major(), 0);
    let rows = map_scale_to_layout(&scale_to_map(c_major.scale()), &[origin("C4")]);
    let filled: Vec<usize> = rows[0]
        .slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.note.is_some())
        .map(|(index, _)| index)
        .collect();
    assert_eq!(filled, vec![0, 2, 4, 5, 7, 9, 11, 12]);
}

#[test]
fn test_guitar_projection_of_a_transformed_scale() {
    let c_major = resolve_scale(note("C"), &IntervalPattern::major(), 0);
    let lydian_context = apply_harmonic_transform(&c_major, 7);
    let origins: Vec<Origin> = ["E4", "B3", "G3", "D3", "A2", "E2"]
        .iter()
        .map(|s| origin(s))
        .collect();
    let rows = map_scale_to_layout(&scale_to_map(lydian_context.scale()), &origins);

    assert_eq!(rows.len(), 6);
    // F♯ replaces F on every string
    for row in &rows {
        let notes = row.notes();
        assert!(notes.contains(&note("F♯")));
        assert!(!notes.contains(&note("F")));
    }
    assert_eq!(rows[0].slots[2].note, Some(note("F♯")));
    assert_eq!(rows[0].slots[2].degree, Some(4));
    assert_eq!(rows[5].slots[8].octave, 3);
}

#[test]
fn test_hidden_degrees_blank_layout_slots() {
    let c_major = resolve_scale(note("C"), &IntervalPattern::major(), 0);
    let rows = map_scale_to_layout(&scale_to_map(c_major.scale()), &[origin("C4")]);
    let hidden: BTreeSet<usize> = [2, 6].into_iter().collect();
    let names: Vec<String> = rows[0]
        .hide_degrees(&hidden)
        .notes()
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(names, vec!["C", "E", "F", "G", "B", "C"]);
}

#[test]
fn test_resolved_scale_json() {
    let resolved = resolve_scale(note("G"), &IntervalPattern::major(), 0);
    let json = serde_json::to_value(&resolved).unwrap();
    assert_eq!(json["intervalPattern"], serde_json::json!([2, 2, 1, 2, 2, 2, 1]));
    assert_eq!(json["canRotate"], serde_json::json!(true));
    assert_eq!(
        json["context"],
        serde_json::json!({ "status": "reachable", "targets": ["G"] })
    );
    assert_eq!(
        json["scale"][6],
        serde_json::json!({ "note": "F♯", "degree": 7, "pitchClass": 6 })
    );
}
