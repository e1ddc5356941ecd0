//! Rank-indexed AVL tree for Rust.
//!
//! This crate provides [`OSAvlTree`], an ordered container that keeps its
//! elements sorted, permits duplicates, and adds O(log n) order-statistic
//! operations on top of the usual search/insert/erase:
//!
//! - [`get_by_rank`](OSAvlTree::get_by_rank) / [`at`](OSAvlTree::at) - Get the
//!   element at a given sorted position
//! - [`rank_of`](OSAvlTree::rank_of) - Get the sorted position of a value
//! - Indexing by [`Rank`] - e.g., `tree[Rank(0)]` for the smallest element
//!
//! Duplicate values are allowed; equal elements keep their insertion order.
//!
//! # Example
//!
//! ```
//! use osavl_tree::{OSAvlTree, Rank};
//!
//! let mut scores = OSAvlTree::new();
//! scores.insert(100);
//! scores.insert(85);
//! scores.insert(92);
//! scores.insert(85);
//!
//! // Sorted-order access
//! assert_eq!(scores.first(), Some(&85));
//! assert_eq!(scores.len(), 4);
//!
//! // Order-statistic operations (O(log n))
//! assert_eq!(scores[Rank(2)], 92);
//! assert_eq!(scores.rank_of(&100), Some(3));
//!
//! // Duplicates are removed together
//! assert_eq!(scores.remove(&85), 2);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Duplicates welcome** - A sorted multiset; ties keep insertion order
//! - **O(log n) rank operations** - Order-statistic queries via subtree size augmentation
//! - **Bidirectional cursors** - [`Cursor`]/[`CursorMut`] step through the tree
//!   in both directions via parent links, without a traversal stack
//!
//! # Implementation
//!
//! The tree is a height-balanced (AVL) binary search tree stored in a slot
//! arena. Each node carries its subtree size for rank queries and its subtree
//! height for rebalancing; child links own, the parent link is a non-owning
//! back-reference. Rotations relink nodes in place and never move them, so a
//! node's arena handle is stable for its entire lifetime.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod order_statistic;
mod raw;

pub mod osavl_tree;

pub use order_statistic::{Rank, RankError};
pub use osavl_tree::OSAvlTree;
pub use osavl_tree::cursor::{Cursor, CursorMut};
