//! Black-box tests for `OSAvlTree`, driven through the public API only.

use osavl_tree::{OSAvlTree, Rank};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ─── Construction and Whole-Tree Operations ─────────────────────────────────

#[test]
fn new_tree_is_empty() {
    let tree: OSAvlTree<i64> = OSAvlTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.first(), None);
    assert_eq!(tree.last(), None);
    assert_eq!(tree.iter().next(), None);
}

#[test]
fn clear_resets_to_empty() {
    let mut tree = OSAvlTree::from([3, 1, 2]);
    tree.clear();
    assert!(tree.is_empty());
    let error = tree.at(Rank(0)).unwrap_err();
    assert_eq!((error.rank(), error.len()), (Rank(0), 0));
}

#[test]
fn clone_is_independent() {
    let mut original = OSAvlTree::from([17, 6, 8, 7, 13, 1, 16]);
    let copy = original.clone();
    assert_eq!(original, copy);

    original.remove(&8);
    assert_ne!(original, copy);
    assert_eq!(copy.len(), 7);
    assert!(copy.contains(&8));
}

#[test]
fn swap_exchanges_whole_trees() {
    let mut a = OSAvlTree::from([1, 2, 3]);
    let mut b = OSAvlTree::from([10]);
    a.swap(&mut b);
    assert_eq!(a.iter().copied().collect::<Vec<_>>(), [10]);
    assert_eq!(b.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
}

// ─── Structural Equality ────────────────────────────────────────────────────

#[test]
fn equal_shapes_compare_equal() {
    // Both insertion orders settle on the shape 2 / (1, 3).
    assert_eq!(OSAvlTree::from([1, 2, 3]), OSAvlTree::from([2, 1, 3]));
}

#[test]
fn same_content_different_shape_compares_unequal() {
    // Ascending gives 2 / (1, 3 \ 4); descending gives 3 / (2 / 1, 4).
    let ascending = OSAvlTree::from([1, 2, 3, 4]);
    let descending = OSAvlTree::from([4, 3, 2, 1]);
    assert_ne!(ascending, descending);
    assert!(ascending.iter().eq(descending.iter()));
}

#[test]
fn empty_trees_compare_equal() {
    assert_eq!(OSAvlTree::<i64>::new(), OSAvlTree::<i64>::new());
}

// ─── The Worked Scenario ────────────────────────────────────────────────────

#[test]
fn insert_seven_then_remove_fourth_smallest() {
    let mut tree = OSAvlTree::new();
    for value in [17, 6, 8, 7, 13, 1, 16] {
        tree.insert(value);
    }
    assert_eq!(tree.len(), 7);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 6, 7, 8, 13, 16, 17]);
    assert_eq!(tree.at(Rank(3)), Ok(&8));

    assert_eq!(tree.remove_by_rank(Rank(3)), Some(8));
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 6, 7, 13, 16, 17]);
    assert_eq!(tree.at(Rank(3)), Ok(&13));
}

// ─── Rank Access ────────────────────────────────────────────────────────────

#[test]
fn at_on_empty_tree_is_an_error() {
    let tree: OSAvlTree<i64> = OSAvlTree::new();
    let error = tree.at(Rank(0)).unwrap_err();
    assert_eq!(error.rank(), Rank(0));
    assert_eq!(error.len(), 0);
    assert_eq!(error.to_string(), "rank 0 out of bounds for tree of length 0");
}

#[test]
fn rank_error_is_a_std_error() {
    let tree: OSAvlTree<i64> = OSAvlTree::new();
    let error: Box<dyn std::error::Error> = Box::new(tree.at(Rank(5)).unwrap_err());
    assert_eq!(error.to_string(), "rank 5 out of bounds for tree of length 0");
}

#[test]
fn rank_access_agrees_with_cursor_stepping() {
    let tree = OSAvlTree::from([9, 4, 13, 2, 7, 11, 15, 1, 3]);
    let mut cursor = tree.cursor_front();
    for rank in 0..tree.len() {
        assert_eq!(tree.at(Rank(rank)).ok(), cursor.value());
        assert_eq!(tree[Rank(rank)], *cursor.value().unwrap());
        cursor.move_next();
    }
    assert_eq!(cursor.value(), None);
}

#[test]
fn rank_of_inverts_indexing() {
    let tree = OSAvlTree::from([50, 20, 80, 10, 30]);
    for rank in 0..tree.len() {
        assert_eq!(tree.rank_of(&tree[Rank(rank)]), Some(rank));
    }
    assert_eq!(tree.rank_of(&99), None);
}

// ─── Duplicates ─────────────────────────────────────────────────────────────

#[test]
fn duplicates_are_all_stored() {
    let mut tree = OSAvlTree::new();
    for _ in 0..5 {
        tree.insert(7);
    }
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.count(&7), 5);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [7, 7, 7, 7, 7]);
}

#[test]
fn remove_clears_duplicates_rotated_to_either_side() {
    // Rebalancing can push equal elements into a left subtree; `remove`
    // must still find and erase every one of them.
    let mut tree = OSAvlTree::new();
    for value in [5, 5, 5, 5, 5, 1, 9, 1, 9, 5, 5] {
        tree.insert(value);
    }
    assert_eq!(tree.remove(&5), 7);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 1, 9, 9]);
}

// ─── Model-Based Property Tests ─────────────────────────────────────────────

#[derive(Clone, Debug)]
enum Operation {
    Insert(i64),
    RemoveAll(i64),
    RemoveByRank(usize),
    PopFirst,
    PopLast,
    Clear,
}

fn strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        8 => (-50i64..50).prop_map(Operation::Insert),
        2 => (-50i64..50).prop_map(Operation::RemoveAll),
        2 => any::<usize>().prop_map(Operation::RemoveByRank),
        1 => Just(Operation::PopFirst),
        1 => Just(Operation::PopLast),
        1 => Just(Operation::Clear),
    ]
}

proptest! {
    /// The tree must behave exactly like a sorted `Vec` under any sequence
    /// of public operations.
    #[test]
    fn behaves_like_sorted_vec(operations in prop::collection::vec(strategy(), 0..256)) {
        let mut model: Vec<i64> = Vec::new();
        let mut tree: OSAvlTree<i64> = OSAvlTree::new();

        for operation in operations {
            match operation {
                Operation::Insert(value) => {
                    tree.insert(value);
                    let at = model.partition_point(|&v| v <= value);
                    model.insert(at, value);
                }
                Operation::RemoveAll(value) => {
                    let expected = model.iter().filter(|&&v| v == value).count();
                    prop_assert_eq!(tree.remove(&value), expected);
                    model.retain(|&v| v != value);
                }
                Operation::RemoveByRank(which) => {
                    if model.is_empty() {
                        prop_assert_eq!(tree.remove_by_rank(Rank(which)), None);
                    } else {
                        let rank = which % model.len();
                        prop_assert_eq!(tree.remove_by_rank(Rank(rank)), Some(model.remove(rank)));
                    }
                }
                Operation::PopFirst => {
                    let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                    prop_assert_eq!(tree.pop_first(), expected);
                }
                Operation::PopLast => {
                    prop_assert_eq!(tree.pop_last(), model.pop());
                }
                Operation::Clear => {
                    tree.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(tree.len(), model.len());
            prop_assert_eq!(tree.is_empty(), model.is_empty());
            prop_assert_eq!(tree.first(), model.first());
            prop_assert_eq!(tree.last(), model.last());
        }

        prop_assert!(tree.iter().eq(model.iter()));
        prop_assert!(tree.into_iter().eq(model));
    }

    /// Length bookkeeping: inserts minus erasures, at every step.
    #[test]
    fn len_tracks_inserts_minus_removals(values in prop::collection::vec(-50i64..50, 1..128)) {
        let mut tree = OSAvlTree::new();
        let mut inserted = 0usize;
        for &value in &values {
            tree.insert(value);
            inserted += 1;
            prop_assert_eq!(tree.len(), inserted);
        }

        let mut removed = 0usize;
        while tree.pop_first().is_some() {
            removed += 1;
            prop_assert_eq!(tree.len(), inserted - removed);
        }
        prop_assert_eq!(removed, inserted);
    }

    /// Rank access must agree with the sorted sequence everywhere.
    #[test]
    fn ranks_cover_the_sorted_sequence(values in prop::collection::vec(-50i64..50, 0..128)) {
        let tree: OSAvlTree<i64> = values.iter().copied().collect();
        let mut sorted = values;
        sorted.sort_unstable();

        for (rank, expected) in sorted.iter().enumerate() {
            prop_assert_eq!(tree.at(Rank(rank)), Ok(expected));
        }
        let out = tree.at(Rank(sorted.len())).unwrap_err();
        prop_assert_eq!(out.rank(), Rank(sorted.len()));
        prop_assert_eq!(out.len(), sorted.len());
    }

    /// A forward cursor walk and a backward cursor walk both match `iter`.
    #[test]
    fn cursor_walks_match_iteration(values in prop::collection::vec(-50i64..50, 0..64)) {
        let tree: OSAvlTree<i64> = values.iter().copied().collect();

        let mut forward = Vec::new();
        let mut cursor = tree.cursor_front();
        while let Some(&value) = cursor.value() {
            forward.push(value);
            cursor.move_next();
        }
        prop_assert!(forward.iter().eq(tree.iter()));

        let mut backward = Vec::new();
        let mut cursor = tree.cursor_back();
        while let Some(&value) = cursor.value() {
            backward.push(value);
            cursor.move_prev();
        }
        prop_assert!(backward.iter().eq(tree.iter().rev()));
    }

    /// Clones always compare equal to their source, shape included.
    #[test]
    fn clones_are_structurally_equal(values in prop::collection::vec(-50i64..50, 0..128)) {
        let tree: OSAvlTree<i64> = values.into_iter().collect();
        prop_assert_eq!(tree.clone(), tree);
    }
}
