//! Unit tests for cycle paths

use std::collections::HashSet;

use weave_domain::{CyclePath, TypeKey};

struct X;
struct Y;
struct Z;

fn keys() -> (TypeKey, TypeKey, TypeKey) {
    (TypeKey::of::<X>(), TypeKey::of::<Y>(), TypeKey::of::<Z>())
}

#[test]
fn test_closing_appends_first_node() {
    let (x, y, z) = keys();
    let path = CyclePath::closing(vec![x, y, z]);
    assert_eq!(path.nodes(), &[x, y, z, x]);
    assert_eq!(path.members(), &[x, y, z]);
    assert_eq!(path.start(), Some(&x));
}

#[test]
fn test_closing_empty_chain() {
    let path = CyclePath::closing(Vec::new());
    assert!(path.is_empty());
    assert!(path.members().is_empty());
}

#[test]
fn test_from_stack_starts_at_first_occurrence() {
    let (x, y, z) = keys();
    let stack = [z, x, y];
    let path = CyclePath::from_stack(&stack, x).expect("x is on the stack");
    assert_eq!(path.nodes(), &[x, y, x]);

    assert!(CyclePath::from_stack(&[y, z], x).is_none());
}

#[test]
fn test_self_reference_path() {
    let (x, _, _) = keys();
    let path = CyclePath::from_stack(&[x], x).expect("self reference");
    assert_eq!(path.nodes(), &[x, x]);
    assert_eq!(path.to_string(), "X -> X");
}

#[test]
fn test_canonicalize_merges_rotations() {
    let (x, y, z) = keys();
    let rank = |key: &TypeKey| {
        if *key == x {
            0
        } else if *key == y {
            1
        } else {
            2
        }
    };

    let from_y = CyclePath::closing(vec![y, z, x]).canonicalize_by(rank);
    let from_z = CyclePath::closing(vec![z, x, y]).canonicalize_by(rank);
    assert_eq!(from_y, from_z);
    assert_eq!(from_y.nodes(), &[x, y, z, x]);

    let mut set = HashSet::new();
    set.insert(from_y);
    set.insert(from_z);
    assert_eq!(set.len(), 1);
}

#[test]
fn test_serializes_as_name_list() {
    let (x, _, _) = keys();
    let json = serde_json::to_value(CyclePath::closing(vec![x])).unwrap();
    let names = json.as_array().expect("array");
    assert_eq!(names.len(), 2);
    assert!(names[0].as_str().unwrap().ends_with("X"));
}
