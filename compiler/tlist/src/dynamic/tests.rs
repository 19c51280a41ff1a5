#![allow(clippy::unwrap_used, reason = "tests unwrap successful operations")]

use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{balanced, handle, held};
use tlist_core::ListErrorKind;

fn int_list(items: &[i64]) -> AnyList {
    let values: Vec<Value> = items.iter().map(|&i| Value::Int(i)).collect();
    AnyList::from_values(None, &values).unwrap()
}

// Construction

#[test]
fn kind_is_inferred_from_values() {
    let list = AnyList::from_values(None, &[Value::Bool(true), Value::Int(2)]).unwrap();
    assert_eq!(list.kind(), ElemKind::Int);
    assert_eq!(list.to_values(), vec![Value::Int(1), Value::Int(2)]);

    let list = AnyList::from_values(None, &[Value::Int(1), Value::Float(0.5)]).unwrap();
    assert_eq!(list.kind(), ElemKind::Float);
    assert_eq!(format!("{list:?}"), "[1.0, 0.5]");
}

#[test]
fn declared_kind_widens_for_values() {
    let list = AnyList::from_values(Some(ElemKind::Bool), &[Value::Int(3)]).unwrap();
    assert_eq!(list.kind(), ElemKind::Int);
    let list = AnyList::from_values(Some(ElemKind::Float), &[]).unwrap();
    assert_eq!(list.kind(), ElemKind::Float);
    assert!(list.is_empty());
}

#[test]
fn empty_source_without_hint_cannot_be_inferred() {
    let err = AnyList::from_values(None, &[]).unwrap_err();
    assert_eq!(err.kind, ListErrorKind::Type);
    assert_eq!(err.message, "cannot infer element kind of an empty list");
}

#[test]
fn refs_and_scalars_do_not_mix() {
    let err = AnyList::from_values(None, &[Value::Int(1), Value::Ref(handle(1))]).unwrap_err();
    assert_eq!(err.kind, ListErrorKind::Type);
    assert!(balanced());
}

#[test]
fn empty_lists_of_each_kind() {
    for kind in [ElemKind::Bool, ElemKind::Int, ElemKind::Float, ElemKind::Ref] {
        let list = AnyList::empty(kind);
        assert_eq!(list.kind(), kind);
        assert!(!list.is_truthy());
    }
}

#[test]
fn typed_lists_convert_into_any_list() {
    let typed = TypedList::from_slice(&[1.5_f64]).unwrap();
    let list = AnyList::from(typed);
    assert_eq!(list.kind(), ElemKind::Float);
    assert_eq!(list.len(), 1);
}

// Promotion on the way in

#[test]
fn values_promote_into_the_list_kind() {
    let mut list = AnyList::empty(ElemKind::Float);
    list.append_value(Value::Int(2)).unwrap();
    list.append_value(Value::Bool(true)).unwrap();
    list.insert_value(0, Value::Float(0.5)).unwrap();
    assert_eq!(format!("{list:?}"), "[0.5, 2.0, 1.0]");
}

#[test]
fn narrowing_is_a_type_error() {
    let mut list = int_list(&[1]);
    let err = list.append_value(Value::Float(1.5)).unwrap_err();
    assert_eq!(err.kind, ListErrorKind::Type);
    assert_eq!(err.message, "cannot store a float value in a list of int");
    let err = list.set_value(0, Value::Float(2.0)).unwrap_err();
    assert_eq!(err.kind, ListErrorKind::Type);
    assert_eq!(list.to_values(), vec![Value::Int(1)]);
}

#[test]
fn failed_extend_leaves_list_unchanged() {
    let mut list = int_list(&[1]);
    let err = list
        .extend_values(&[Value::Int(2), Value::Float(0.5)])
        .unwrap_err();
    assert_eq!(err.kind, ListErrorKind::Type);
    assert_eq!(list.len(), 1);
}

#[test]
fn extend_from_promotes_other_kinds() {
    let mut floats = AnyList::from_values(None, &[Value::Float(0.5)]).unwrap();
    floats.extend_from(&int_list(&[1, 2])).unwrap();
    assert_eq!(format!("{floats:?}"), "[0.5, 1.0, 2.0]");

    let mut ints = int_list(&[1]);
    assert!(ints.extend_from(&floats).is_err());
    assert_eq!(ints.len(), 1);
}

#[test]
fn extend_self_doubles() {
    let mut list = int_list(&[1, 2]);
    list.extend_self().unwrap();
    assert_eq!(list, int_list(&[1, 2, 1, 2]));
}

// Access and removal

#[test]
fn get_set_delete_by_value() {
    let mut list = int_list(&[1, 2, 3]);
    assert_eq!(list.get_value(-1).unwrap(), Value::Int(3));
    list.set_value(0, Value::Bool(true)).unwrap();
    list.delete(1).unwrap();
    assert_eq!(list.to_values(), vec![Value::Int(1), Value::Int(3)]);
    assert_eq!(list.get_value(5).unwrap_err().kind, ListErrorKind::Index);
}

#[test]
fn pop_value_returns_the_element() {
    let mut list = int_list(&[4, 5]);
    assert_eq!(list.pop_value(None).unwrap(), Value::Int(5));
    assert_eq!(list.pop_value(Some(0)).unwrap(), Value::Int(4));
    assert_eq!(
        list.pop_value(None).unwrap_err().message,
        "pop from empty list"
    );
}

#[test]
fn lookups_use_language_equality() {
    let mut list = AnyList::from_values(None, &[Value::Float(1.0), Value::Float(2.5)]).unwrap();
    assert!(list.contains_value(&Value::Int(1)));
    assert!(list.contains_value(&Value::Bool(true)));
    assert!(!list.contains_value(&Value::Int(2)));
    assert_eq!(list.count_value(&Value::Float(2.5)), 1);
    assert_eq!(list.index_value(&Value::Int(1), None, None).unwrap(), 0);
    assert_eq!(
        list.index_value(&Value::Int(1), Some(1), None)
            .unwrap_err()
            .message,
        "list.index(x): x not in list"
    );
    list.remove_value(&Value::Int(1)).unwrap();
    assert_eq!(list.to_values(), vec![Value::Float(2.5)]);
    assert!(list.remove_value(&Value::Int(1)).is_err());
}

#[test]
fn ref_lookups_are_by_identity() {
    let list = AnyList::from_values(None, &[Value::Ref(handle(1))]).unwrap();
    assert!(list.contains_value(&Value::Ref(handle(1))));
    assert!(!list.contains_value(&Value::Ref(handle(2))));
    assert!(!list.contains_value(&Value::Int(1)));
}

#[test]
fn clear_and_reverse() {
    let mut list = int_list(&[1, 2, 3]);
    list.reverse();
    assert_eq!(list, int_list(&[3, 2, 1]));
    list.clear();
    assert!(list.is_empty());
}

// Slices

#[test]
fn slices_keep_their_kind() {
    let list = int_list(&[0, 1, 2, 3]);
    let slice = list.get_slice(SliceSpec::new(None, None, Some(-2))).unwrap();
    assert_eq!(slice.kind(), ElemKind::Int);
    assert_eq!(slice, int_list(&[3, 1]));
}

#[test]
fn slice_assignment_promotes_replacement() {
    let mut list = AnyList::from_values(None, &[Value::Float(0.5); 3]).unwrap();
    list.set_slice(SliceSpec::range(0, 2), &int_list(&[7])).unwrap();
    assert_eq!(format!("{list:?}"), "[7.0, 0.5]");
}

#[test]
fn slice_assignment_rejects_narrowing_before_mutating() {
    let mut list = int_list(&[1, 2, 3]);
    let floats = AnyList::from_values(None, &[Value::Float(0.5)]).unwrap();
    let err = list.set_slice(SliceSpec::range(0, 3), &floats).unwrap_err();
    assert_eq!(err.kind, ListErrorKind::Type);
    assert_eq!(list, int_list(&[1, 2, 3]));
}

#[test]
fn slice_delete() {
    let mut list = int_list(&[0, 1, 2, 3]);
    list.del_slice(SliceSpec::new(None, None, Some(2))).unwrap();
    assert_eq!(list, int_list(&[1, 3]));
}

// Operators

#[test]
fn mixed_concatenation_unifies_kinds() {
    let floats = AnyList::from_values(None, &[Value::Float(0.5)]).unwrap();
    let joined = int_list(&[1]).concat(&floats).unwrap();
    assert_eq!(joined.kind(), ElemKind::Float);
    assert_eq!(format!("{joined:?}"), "[1.0, 0.5]");

    let refs = AnyList::from_values(None, &[Value::Ref(handle(1))]).unwrap();
    let err = int_list(&[1]).concat(&refs).unwrap_err();
    assert_eq!(err.message, "cannot unify list element kinds int and ref");
}

#[test]
fn same_kind_concatenation_and_repetition() {
    let a = int_list(&[1, 2]);
    assert_eq!(a.concat(&a).unwrap(), a.repeat(2).unwrap());
    assert!(a.repeat(0).unwrap().is_empty());
}

#[test]
fn copies_hold_their_own_references() {
    let list = AnyList::from_values(None, &[Value::Ref(handle(9))]).unwrap();
    let copy = list.copy().unwrap();
    assert_eq!(held(9), 2);
    assert_eq!(copy, list);
    drop(list);
    drop(copy);
    assert!(balanced());
}

#[test]
fn equality_crosses_numeric_kinds() {
    let floats = AnyList::from_values(None, &[Value::Float(1.0), Value::Float(2.0)]).unwrap();
    assert_eq!(int_list(&[1, 2]), floats);
    assert!(int_list(&[1]) != floats);
}

#[test]
fn policy_is_inherited_by_mixed_concatenation() {
    let policy = GrowthPolicy::new(64, tlist_alloc::GrowthFactor::Double);
    let left = AnyList::empty_with_policy(ElemKind::Int, policy);
    let right = AnyList::from_values(None, &[Value::Float(1.0)]).unwrap();
    assert_eq!(left.concat(&right).unwrap().policy(), policy);
}
