#![allow(clippy::unwrap_used, reason = "tests unwrap resolved slices")]

use pretty_assertions::assert_eq;

use super::*;
use tlist_core::ListErrorKind;

// Scalar indices

#[test]
fn non_negative_indices_resolve_in_range() {
    assert_eq!(resolve_index(0, 3), Some(0));
    assert_eq!(resolve_index(2, 3), Some(2));
    assert_eq!(resolve_index(3, 3), None);
}

#[test]
fn negative_indices_count_from_end() {
    assert_eq!(resolve_index(-1, 3), Some(2));
    assert_eq!(resolve_index(-3, 3), Some(0));
    assert_eq!(resolve_index(-4, 3), None);
}

#[test]
fn nothing_resolves_in_empty_list() {
    assert_eq!(resolve_index(0, 0), None);
    assert_eq!(resolve_index(-1, 0), None);
}

#[test]
fn extreme_indices_do_not_overflow() {
    assert_eq!(resolve_index(i64::MIN, 5), None);
    assert_eq!(resolve_index(i64::MAX, 5), None);
}

// Insert positions

#[test]
fn insert_positions_clamp() {
    assert_eq!(clamp_position(0, 4), 0);
    assert_eq!(clamp_position(4, 4), 4);
    assert_eq!(clamp_position(5, 4), 4);
    assert_eq!(clamp_position(-1, 4), 3);
    assert_eq!(clamp_position(-4, 4), 0);
    assert_eq!(clamp_position(-5, 4), 0);
    assert_eq!(clamp_position(i64::MIN, 4), 0);
    assert_eq!(clamp_position(i64::MAX, 4), 4);
}

// Slices

fn positions(spec: SliceSpec, len: usize) -> Vec<usize> {
    spec.resolve(len).unwrap().positions().collect()
}

#[test]
fn zero_step_is_rejected() {
    let err = SliceSpec::stepped(0, 3, 0).resolve(5).unwrap_err();
    assert_eq!(err.kind, ListErrorKind::Value);
    assert_eq!(err.message, "slice step cannot be zero");
}

#[test]
fn zero_step_is_rejected_even_for_empty_lists() {
    assert!(SliceSpec::new(None, None, Some(0)).resolve(0).is_err());
}

#[test]
fn full_slice_selects_everything() {
    assert_eq!(positions(SliceSpec::FULL, 4), vec![0, 1, 2, 3]);
}

#[test]
fn omitted_bounds_with_negative_step_walk_backwards() {
    let spec = SliceSpec::new(None, None, Some(-1));
    assert_eq!(positions(spec, 4), vec![3, 2, 1, 0]);
    let resolved = spec.resolve(4).unwrap();
    assert_eq!(resolved.start, 3);
    assert_eq!(resolved.stop, -1);
}

#[test]
fn out_of_range_bounds_clamp() {
    assert_eq!(positions(SliceSpec::range(-100, 100), 3), vec![0, 1, 2]);
    assert_eq!(positions(SliceSpec::stepped(100, -100, -1), 3), vec![2, 1, 0]);
}

#[test]
fn crossed_bounds_select_nothing() {
    let resolved = SliceSpec::range(3, 1).resolve(5).unwrap();
    assert_eq!(resolved.count, 0);
    let resolved = SliceSpec::stepped(1, 3, -1).resolve(5).unwrap();
    assert_eq!(resolved.count, 0);
}

#[test]
fn strided_count_rounds_up() {
    assert_eq!(positions(SliceSpec::stepped(0, 10, 3), 10), vec![0, 3, 6, 9]);
    assert_eq!(positions(SliceSpec::stepped(0, 9, 3), 10), vec![0, 3, 6]);
    assert_eq!(positions(SliceSpec::stepped(-2, 0, -3), 11), vec![9, 6, 3]);
}

#[test]
fn huge_steps_select_one_element() {
    assert_eq!(positions(SliceSpec::new(None, None, Some(i64::MAX)), 5), vec![0]);
    assert_eq!(positions(SliceSpec::new(None, None, Some(i64::MIN)), 5), vec![4]);
}

#[test]
fn ascending_walk_reverses_negative_steps() {
    let resolved = SliceSpec::stepped(-2, 0, -3).resolve(11).unwrap();
    assert_eq!(resolved.ascending(), (3, 3));
    let resolved = SliceSpec::stepped(1, 8, 2).resolve(10).unwrap();
    assert_eq!(resolved.ascending(), (1, 2));
}

#[test]
fn contiguity_is_step_one() {
    assert!(SliceSpec::range(0, 2).resolve(4).unwrap().is_contiguous());
    assert!(!SliceSpec::stepped(0, 2, 2).resolve(4).unwrap().is_contiguous());
}

#[test]
fn constructors_fill_the_right_fields() {
    assert_eq!(SliceSpec::from(2), SliceSpec::new(Some(2), None, None));
    assert_eq!(SliceSpec::to(2), SliceSpec::new(None, Some(2), None));
    assert_eq!(SliceSpec::default(), SliceSpec::FULL);
}
