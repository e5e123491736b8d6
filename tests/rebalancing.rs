//! Rotation scenarios: each classic case, deletes and updates

mod common;

use arbor::tree::balance::balance_factor;
use arbor::{delete_value, insert, update_value, Tree};
use common::*;
use test_case::test_case;

fn root_value(root: &Tree<i64>) -> i64 {
    *root.value().expect("non-empty tree")
}

fn child_values(root: &Tree<i64>) -> (Option<i64>, Option<i64>) {
    let node = root.as_node().expect("non-empty tree");
    (node.left().value().copied(), node.right().value().copied())
}

#[test_case(&[30, 20, 10]; "left-left")]
#[test_case(&[10, 20, 30]; "right-right")]
#[test_case(&[30, 10, 20]; "left-right")]
#[test_case(&[10, 30, 20]; "right-left")]
fn test_three_node_cases_settle_on_middle(values: &[i64]) {
    let root = build_root(values);
    assert_eq!(root_value(&root), 20);
    assert_eq!(child_values(&root), (Some(10), Some(30)));

    let node = root.as_node().unwrap();
    assert_eq!(node.balance_factor(), 0);
    assert_eq!(balance_factor(node.left()), 0);
    assert_eq!(balance_factor(node.right()), 0);
    assert_eq!(node.height(), 2);
}

#[test]
fn test_delete_triggers_right_rotation() {
    let root = build_root(&[10, 5, 15, 3, 7]);
    let root = delete_value(root, &15);

    assert_eq!(assert_avl(&root), 4);
    assert_eq!(in_order(&root), vec![3, 5, 7, 10]);
    // 10 became left-heavy with a balanced left child: single right rotation
    assert_eq!(root_value(&root), 5);
    assert_eq!(child_values(&root), (Some(3), Some(10)));
    let ten = root.as_node().unwrap().right().as_node().unwrap();
    assert_eq!(ten.left().value(), Some(&7));
}

#[test]
fn test_delete_triggers_double_rotation() {
    // Deleting 40 leaves 30 left-heavy with a right-heavy left child
    let root = build_root(&[30, 10, 40, 20]);
    let root = delete_value(root, &40);

    assert_avl(&root);
    assert_eq!(root_value(&root), 20);
    assert_eq!(child_values(&root), (Some(10), Some(30)));
}

#[test]
fn test_delete_root_with_two_children() {
    let root = build_root(&[50, 30, 70, 20, 40, 60, 80]);
    let root = delete_value(root, &50);

    assert_avl(&root);
    assert_eq!(root_value(&root), 60);
    assert_eq!(in_order(&root), vec![20, 30, 40, 60, 70, 80]);
}

#[test]
fn test_delete_every_value_empties_tree() {
    let values = [8, 3, 10, 1, 6, 14, 4, 7, 13];
    let mut root = build_root(&values);
    for value in values {
        root = delete_value(root, &value);
        assert_avl(&root);
    }
    assert!(root.is_leaf());
}

#[test]
fn test_round_trip_without_rotation_restores_shape() {
    let original = build_root(&[20, 10, 30]);
    let grown = insert(original.clone(), 5);
    assert_ne!(grown, original);

    let restored = delete_value(grown, &5);
    assert_eq!(restored, original);
}

#[test]
fn test_insert_is_idempotent() {
    let once = insert(build_root(&[4, 2, 6]), 5);
    let twice = insert(once.clone(), 5);
    assert_eq!(once, twice);
}

#[test]
fn test_update_rebalances_both_passes() {
    // The second update rotates on the delete pass (at the root) and again
    // on the insert pass (at 70).
    let root = build_root(&[40, 20, 60, 10, 30, 50, 70]);
    let root = update_value(root, &10, 80);
    let root = update_value(root, &30, 90);

    assert_avl(&root);
    assert_eq!(in_order(&root), vec![20, 40, 50, 60, 70, 80, 90]);
    assert_eq!(root_value(&root), 60);
}

#[test]
fn test_update_of_absent_value_still_inserts() {
    let root = update_value(build_root(&[1, 2, 3]), &42, 4);
    assert_eq!(in_order(&root), vec![1, 2, 3, 4]);
}

#[test]
fn test_ascending_inserts_stay_logarithmic() {
    let values: Vec<i64> = (1..=1023).collect();
    let root = build_root(&values);
    assert_eq!(assert_avl(&root), 1023);
    assert_eq!(root.as_node().unwrap().height(), 10);
}
