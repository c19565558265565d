//! Integration tests for persistent collections
//!
//! Tests QVec and QMap structural sharing and ordering.

use quill_foundation::{QMap, QVec};

// =============================================================================
// QVec
// =============================================================================

#[test]
fn vec_push_is_persistent() {
    let v1: QVec<i32> = QVec::new().push_back(1);
    let v2 = v1.push_back(2);
    assert_eq!(v1.len(), 1);
    assert_eq!(v2.len(), 2);
    assert_eq!(v2.last(), Some(&2));
}

#[test]
fn vec_from_iter_and_iterate() {
    let v: QVec<i32> = (1..=4).collect();
    assert_eq!(v.iter().sum::<i32>(), 10);
    assert_eq!(v.first(), Some(&1));
    assert_eq!(v.get(9), None);
    let doubled: Vec<i32> = v.into_iter().map(|n| n * 2).collect();
    assert_eq!(doubled, vec![2, 4, 6, 8]);
}

#[test]
fn vec_empty() {
    let v: QVec<String> = QVec::default();
    assert!(v.is_empty());
    assert_eq!(v.first(), None);
}

// =============================================================================
// QMap
// =============================================================================

#[test]
fn map_insert_is_persistent() {
    let m1: QMap<String, i32> = QMap::new().insert("a".into(), 1);
    let m2 = m1.insert("a".into(), 2);
    assert_eq!(m1.get("a"), Some(&1));
    assert_eq!(m2.get("a"), Some(&2));
}

#[test]
fn map_iterates_in_key_order() {
    let m: QMap<String, i32> = [("c", 3), ("a", 1), ("b", 2)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let keys: Vec<_> = m.keys().cloned().collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
    assert_eq!(m.values().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn map_remove_and_contains() {
    let m: QMap<String, i32> = QMap::new().insert("a".into(), 1).insert("b".into(), 2);
    let removed = m.remove("a");
    assert!(m.contains_key("a"));
    assert!(!removed.contains_key("a"));
    assert_eq!(removed.len(), 1);
}

#[test]
fn map_union_prefers_other() {
    let base: QMap<String, i32> = QMap::new().insert("a".into(), 1).insert("b".into(), 2);
    let over: QMap<String, i32> = QMap::new().insert("b".into(), 20);
    let merged = base.union(&over);
    assert_eq!(merged.get("a"), Some(&1));
    assert_eq!(merged.get("b"), Some(&20));
}
