//! Tests for the n-ary GeneralTree

use rstest::{fixture, rstest};

use treewalk::domain::{DomainError, GeneralTree, TreeRender};

/// ```text
///        1
///      / | \
///     2  3  4
///    / \     \
///   5   6     8
/// ```
#[fixture]
fn tree() -> GeneralTree {
    let mut tree = GeneralTree::new();
    let root = tree.insert_node(1, None).unwrap();
    let two = tree.insert_node(2, Some(root)).unwrap();
    tree.insert_node(3, Some(root)).unwrap();
    let four = tree.insert_node(4, Some(root)).unwrap();
    tree.insert_node(5, Some(two)).unwrap();
    tree.insert_node(6, Some(two)).unwrap();
    tree.insert_node(8, Some(four)).unwrap();
    tree
}

#[test]
fn given_empty_tree_when_aggregating_then_zero() {
    let tree = GeneralTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.sum_values(), 0);
    assert_eq!(tree.count_evens(), 0);
    assert_eq!(tree.num_greater(i64::MIN), 0);
    assert_eq!(tree.depth(), 0);
    assert!(tree.leaf_values().is_empty());
}

#[rstest]
fn given_tree_when_summing_then_adds_every_value(tree: GeneralTree) {
    assert_eq!(tree.len(), 7);
    assert_eq!(tree.sum_values(), 29);
}

#[rstest]
fn given_tree_when_counting_evens_then_counts_even_values(tree: GeneralTree) {
    assert_eq!(tree.count_evens(), 4);
}

#[rstest]
#[case(0, 7)]
#[case(3, 4)]
#[case(6, 1)]
#[case(8, 0)]
fn given_bound_when_counting_greater_then_strictly_greater(
    tree: GeneralTree,
    #[case] bound: i64,
    #[case] expected: usize,
) {
    assert_eq!(tree.num_greater(bound), expected);
}

#[rstest]
fn given_tree_when_walking_then_preorder_and_postorder_left_to_right(tree: GeneralTree) {
    let pre: Vec<_> = tree.iter().map(|(_, n)| n.value).collect();
    let post: Vec<_> = tree.iter_postorder().map(|(_, n)| n.value).collect();
    assert_eq!(pre, vec![1, 2, 5, 6, 3, 4, 8]);
    assert_eq!(post, vec![5, 6, 2, 3, 8, 4, 1]);
}

#[rstest]
fn given_tree_when_measuring_then_depth_and_leaves(tree: GeneralTree) {
    assert_eq!(tree.depth(), 3);
    assert_eq!(tree.leaf_values(), vec![5, 6, 3, 8]);
}

#[test]
fn given_negative_values_when_counting_evens_then_sign_ignored() {
    let mut tree = GeneralTree::new();
    let root = tree.insert_node(-4, None).unwrap();
    tree.insert_node(-3, Some(root)).unwrap();
    assert_eq!(tree.count_evens(), 1);
    assert_eq!(tree.sum_values(), -7);
}

#[test]
fn given_root_when_inserting_second_root_then_errors() {
    let mut tree = GeneralTree::new();
    tree.insert_node(1, None).unwrap();
    assert_eq!(tree.insert_node(2, None), Err(DomainError::RootAlreadySet));
}

#[test]
fn given_unknown_parent_when_inserting_then_errors() {
    let mut other = GeneralTree::new();
    other.insert_node(1, None).unwrap();
    let foreign = other.insert_node(2, other.root()).unwrap();

    let mut tree = GeneralTree::new();
    tree.insert_node(1, None).unwrap();

    assert_eq!(
        tree.insert_node(3, Some(foreign)),
        Err(DomainError::ParentNotFound(foreign))
    );
}

#[rstest]
fn given_tree_when_rendering_then_children_nested(tree: GeneralTree) {
    let text = tree.render().to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "1");
    assert!(lines[1].ends_with("2"), "{}", text);
    assert!(lines[2].ends_with("5"), "{}", text);
    assert_eq!(lines.len(), 7);
}
