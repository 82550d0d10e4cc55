//! Tests for BinaryTree construction and node-local primitives

use rstest::{fixture, rstest};

use treewalk::domain::{BinaryTree, BinaryTreeBuilder, DomainError, NodeId, Side};

/// ```text
///       1
///      / \
///     2   3
///    / \
///   4   5
/// ```
struct Scenario {
    tree: BinaryTree,
    n1: NodeId,
    n2: NodeId,
    n3: NodeId,
    n4: NodeId,
    n5: NodeId,
}

#[fixture]
fn scenario() -> Scenario {
    build_scenario()
}

fn build_scenario() -> Scenario {
    let mut b = BinaryTreeBuilder::new();
    let n1 = b.root(1).unwrap();
    let n2 = b.left(n1, 2).unwrap();
    let n3 = b.right(n1, 3).unwrap();
    let n4 = b.left(n2, 4).unwrap();
    let n5 = b.right(n2, 5).unwrap();
    Scenario {
        tree: b.build(),
        n1,
        n2,
        n3,
        n4,
        n5,
    }
}

// ============================================================
// Construction
// ============================================================

#[test]
fn given_new_tree_when_inspecting_then_is_empty() {
    let tree = BinaryTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert!(tree.root().is_none());
    assert!(tree.values().is_empty());
}

#[rstest]
fn given_builder_handles_when_built_then_handles_resolve(scenario: Scenario) {
    let tree = &scenario.tree;
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.root(), Some(scenario.n1));
    assert_eq!(tree.node(scenario.n4).unwrap().value(), 4);
    assert_eq!(tree.node(scenario.n4).unwrap().parent().unwrap().id(), scenario.n2);
    assert_eq!(tree.node(scenario.n1).unwrap().right().unwrap().id(), scenario.n3);
}

#[rstest]
fn given_tree_when_iterating_then_yields_preorder(scenario: Scenario) {
    assert_eq!(scenario.tree.values(), vec![1, 2, 4, 5, 3]);
    assert_eq!(scenario.tree.nth(3), Some(scenario.n5));
    assert_eq!(scenario.tree.nth(5), None);
}

#[test]
fn given_occupied_slot_when_attaching_then_errors() {
    let mut b = BinaryTreeBuilder::new();
    let root = b.root(1).unwrap();
    b.left(root, 2).unwrap();

    let result = b.left(root, 3);

    assert_eq!(
        result,
        Err(DomainError::SlotOccupied {
            parent: root,
            side: Side::Left
        })
    );
}

#[test]
fn given_root_set_when_setting_again_then_errors() {
    let mut b = BinaryTreeBuilder::new();
    b.root(1).unwrap();
    assert_eq!(b.root(2), Err(DomainError::RootAlreadySet));
}

#[test]
fn given_handle_from_other_tree_when_attaching_then_node_not_found() {
    let mut other = BinaryTreeBuilder::new();
    let foreign = other.root(1).unwrap();

    let mut b = BinaryTreeBuilder::new();
    b.root(1).unwrap();

    assert_eq!(b.left(foreign, 2), Err(DomainError::NodeNotFound(foreign)));
}

#[rstest]
fn given_identically_built_trees_when_checking_membership_then_handles_do_not_cross(
    scenario: Scenario,
) {
    let twin = build_scenario();
    assert!(!scenario.tree.contains(twin.n1));
    assert!(scenario.tree.node(twin.n4).is_none());
    assert_eq!(scenario.tree, twin.tree);
}

#[rstest]
fn given_node_when_asking_depth_then_root_is_one(scenario: Scenario) {
    assert_eq!(scenario.tree.depth_of(scenario.n1), Ok(1));
    assert_eq!(scenario.tree.depth_of(scenario.n3), Ok(2));
    assert_eq!(scenario.tree.depth_of(scenario.n5), Ok(3));
}

#[test]
fn given_duplicate_values_when_finding_then_returns_all_in_preorder() {
    let mut b = BinaryTreeBuilder::new();
    let root = b.root(5).unwrap();
    let left = b.left(root, 3).unwrap();
    let right = b.right(root, 3).unwrap();
    let tree = b.build();

    assert_eq!(tree.find(3), vec![left, right]);
    assert!(tree.find(7).is_empty());
}

// ============================================================
// is_ancestor_of
// ============================================================

#[rstest]
fn given_descendants_when_checking_ancestry_then_true(scenario: Scenario) {
    let root = scenario.tree.node(scenario.n1).unwrap();
    for id in [scenario.n2, scenario.n3, scenario.n4, scenario.n5] {
        assert!(root.is_ancestor_of(id));
    }
    let n2 = scenario.tree.node(scenario.n2).unwrap();
    assert!(n2.is_ancestor_of(scenario.n5));
    assert!(!n2.is_ancestor_of(scenario.n3));
}

#[rstest]
fn given_any_node_when_checking_self_ancestry_then_false(scenario: Scenario) {
    for node in scenario.tree.iter() {
        assert!(!node.is_ancestor_of(node.id()));
    }
}

#[rstest]
fn given_any_pair_when_checking_ancestry_both_ways_then_never_both_true(scenario: Scenario) {
    let ids: Vec<_> = scenario.tree.iter().map(|n| n.id()).collect();
    for &a in &ids {
        for &b in &ids {
            let a_over_b = scenario.tree.node(a).unwrap().is_ancestor_of(b);
            let b_over_a = scenario.tree.node(b).unwrap().is_ancestor_of(a);
            assert!(!(a_over_b && b_over_a));
        }
    }
}

#[rstest]
fn given_leaf_when_checking_ancestry_then_false(scenario: Scenario) {
    let leaf = scenario.tree.node(scenario.n4).unwrap();
    assert!(leaf.is_leaf());
    assert!(!leaf.is_ancestor_of(scenario.n1));
}

#[test]
fn given_equal_values_when_checking_ancestry_then_compares_identity() {
    let mut b = BinaryTreeBuilder::new();
    let root = b.root(7).unwrap();
    let left = b.left(root, 7).unwrap();
    let tree = b.build();

    let mut other = BinaryTreeBuilder::new();
    let lookalike = other.root(7).unwrap();

    let root_ref = tree.node(root).unwrap();
    assert!(root_ref.is_ancestor_of(left));
    assert!(!root_ref.is_ancestor_of(lookalike));
}

// ============================================================
// Downward and through-path sums
// ============================================================

#[rstest]
fn given_scenario_when_summing_downward_then_picks_better_branch(scenario: Scenario) {
    let root = scenario.tree.node(scenario.n1).unwrap();
    assert_eq!(root.max_downward_sum(Side::Left), 7);
    assert_eq!(root.max_downward_sum(Side::Right), 3);
    assert_eq!(root.through_path_sum(), 11);

    let n3 = scenario.tree.node(scenario.n3).unwrap();
    assert_eq!(n3.max_downward_sum(Side::Left), 0);
    assert_eq!(n3.through_path_sum(), 3);
}

#[test]
fn given_negative_branch_when_summing_through_then_branch_is_dropped() {
    let mut b = BinaryTreeBuilder::new();
    let root = b.root(5).unwrap();
    b.left(root, -3).unwrap();
    b.right(root, 4).unwrap();
    let tree = b.build();

    let root = tree.node(root).unwrap();
    assert_eq!(root.max_downward_sum(Side::Left), -3);
    assert_eq!(root.max_downward_sum(Side::Right), 4);
    assert_eq!(root.through_path_sum(), 9);
}

#[test]
fn given_negative_grandchild_when_summing_downward_then_stops_early() {
    // 10 -> left 2 -> left -8: best downward from 2 is 2 (absent right child counts 0)
    let mut b = BinaryTreeBuilder::new();
    let root = b.root(10).unwrap();
    let two = b.left(root, 2).unwrap();
    b.left(two, -8).unwrap();
    let tree = b.build();

    assert_eq!(tree.node(root).unwrap().max_downward_sum(Side::Left), 2);
}
