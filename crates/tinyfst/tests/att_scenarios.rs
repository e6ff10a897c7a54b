//! End-to-end tests: AT&T text in, packed automaton out.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use tinyfst::{NOT_FINAL, PackedFst, ParseError, TinyFstError, parse_att, parse_att_str};

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn expect_parse_error(text: &str) -> (usize, ParseError) {
    match parse_att_str(text) {
        Ok(fst) => panic!("expected failure, got {fst:?}"),
        Err(TinyFstError::Parse { line, kind }) => (line, kind),
        Err(other) => panic!("expected parse error, got {other}"),
    }
}

/// Check that every state's arc slice is in range and the slices tile the
/// arc array in state order.
fn assert_contiguous(fst: &PackedFst) {
    let mut next = 0usize;
    for state in fst.states() {
        if state.arc_count == 0 {
            continue;
        }
        assert_eq!(state.first_arc_index as usize, next);
        next += state.arc_count as usize;
    }
    assert_eq!(next, fst.arc_count());
}

#[test]
fn arc_with_weight_then_final() {
    let fst = parse_att_str("0\t1\ta\tb\t0.5\n1\n").unwrap();
    assert_eq!(fst.state_count(), 2);
    assert_eq!(fst.arc_count(), 1);

    let arc = fst.arcs_of(0)[0];
    assert_eq!(arc.target_state, 1);
    assert_eq!(&fst.symbols()[arc.input_symbol], "a");
    assert_eq!(&fst.symbols()[arc.output_symbol], "b");
    assert_eq!(arc.weight, 0.5);

    assert_eq!(fst.states()[0].weight, NOT_FINAL);
    assert_eq!(fst.final_weight(1), Some(0.0));
}

#[test]
fn three_fields_fail_on_first_line() {
    let (line, kind) = expect_parse_error("0\ta\tb\n");
    assert_eq!(line, 1);
    assert!(matches!(kind, ParseError::ThreeColumns { .. }));
}

#[test]
fn blank_line_fails() {
    assert_eq!(expect_parse_error("\n"), (1, ParseError::EmptyLine));
}

#[test]
fn missing_arc_weight_defaults_to_zero() {
    let fst = parse_att_str("0\t1\ta\tb\n1\n").unwrap();
    assert_eq!(fst.arcs_of(0)[0].weight, 0.0);
}

#[test]
fn repeated_label_interned_once() {
    let fst = parse_att_str("0\t1\tx\ty\n1\t2\tz\tx\n2\n").unwrap();
    let first = fst.arcs_of(0)[0];
    let second = fst.arcs_of(1)[0];
    assert_eq!(first.input_symbol, second.output_symbol);
    assert_eq!(fst.symbol_count(), 4);
}

#[test]
fn six_fields_fail() {
    let (line, kind) = expect_parse_error("0\n0\t1\ta\tb\t1\t2\n");
    assert_eq!(line, 2);
    assert_eq!(
        kind,
        ParseError::TooManyColumns {
            field: "2".to_string()
        }
    );
}

#[test]
fn error_message_names_line_and_field() {
    let err = parse_att_str("0\t1\ta\tb\n1\tnope\n").unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert_eq!(err.to_string(), "line 2: \"nope\" not a float");
}

#[test]
fn reads_file_fixture() {
    let file = File::open(data_path("words.att")).unwrap();
    let fst = parse_att(BufReader::new(file)).unwrap();

    assert_eq!(fst.state_count(), 9);
    assert_eq!(fst.arc_count(), 8);
    // epsilon + k t i s a l o
    assert_eq!(fst.symbol_count(), 8);
    assert_eq!(fst.final_weight(4), Some(1.25));
    assert_eq!(fst.final_weight(8), Some(0.75));
    for s in [0, 1, 2, 3, 5, 6, 7] {
        assert!(!fst.is_final(s), "state {s} should not be final");
    }
    assert_eq!(fst.arcs_of(0).len(), 2);
    assert_eq!(fst.arcs_of(0)[1].weight, 0.5);
    assert_contiguous(&fst);
}

#[test]
fn arcs_keep_line_order() {
    let text = "0\t3\tc\tc\n0\t1\ta\ta\n0\t2\tb\tb\n1\t3\td\td\n2\n3\n";
    let fst = parse_att_str(text).unwrap();
    let targets: Vec<u32> = fst.arcs_of(0).iter().map(|a| a.target_state).collect();
    assert_eq!(targets, vec![3, 1, 2]);
    let labels: Vec<&str> = fst
        .arcs_of(0)
        .iter()
        .map(|a| &fst.symbols()[a.input_symbol])
        .collect();
    assert_eq!(labels, vec!["c", "a", "b"]);
    assert_contiguous(&fst);
}

#[test]
fn counts_follow_input() {
    let text = "0\t1\ta\tb\n0\t2\ta\tc\t1.5\n1\t7\tb\ta\n2\t0.5\n7\n";
    let fst = parse_att_str(text).unwrap();
    // highest referenced state is 7
    assert_eq!(fst.state_count(), 8);
    assert_eq!(fst.arc_count(), 3);
    assert_eq!(fst.symbol_count(), 4);
    assert_contiguous(&fst);
}

#[test]
fn regrouped_state_is_rejected() {
    let (line, kind) = expect_parse_error("0\t1\ta\ta\n1\t2\tb\tb\n0\t2\tc\tc\n2\n");
    assert_eq!(line, 3);
    assert_eq!(kind, ParseError::UnorderedState { state: 0, current: 1 });
}

#[test]
fn parsed_automaton_is_shrunk() {
    let fst = parse_att_str("0\t1\ta\tb\n1\n").unwrap();
    assert_eq!(fst.state_bytes().len(), 2 * 12);
    assert_eq!(fst.arc_bytes().len(), 16);
    let a = parse_att_str("0\t1\ta\tb\n1\n").unwrap();
    assert_eq!(a.byte_footprint(), fst.byte_footprint());
}
