//! Bidirectional ordered map on arena-backed search trees.
//!
//! A [`BiMap`] stores unique `(left, right)` pairs and keeps them ordered by
//! both halves at once. Every pair lives in one arena slot that carries two
//! sets of tree links:
//!
//! - **Left tree** (`left.p` / `left.l` / `left.r`): ordered by the left
//!   comparator, serves `find_left`, `lower_bound_left`, left iteration.
//! - **Right tree** (`right.p` / `right.l` / `right.r`): ordered by the right
//!   comparator, serves the mirrored right-side lookups.
//!
//! Both trees are plain unbalanced binary search trees. Instead of raw
//! pointers, all links are `Option<u32>` indices into the map's arena; slot
//! `0` is a shared header holding each tree's root, minimum and maximum.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Side`] tags ([`Left`], [`Right`]), [`SideLink`], comparators |
//! `node` | pair slots and the arena |
//! `util` | in-order `first` / `last` / `next` / `prev` |
//! `tree` | one side's search tree: bounds, insert, erase, node relocation |
//! [`cursor`] | [`Cursor`], with `flip` between sides |
//! [`iter`] | borrowing iterators in either side's order |
//! [`bimap`] | [`BiMap`], which keeps both trees in step |
//!
//! ```
//! use sonic_bimap::BiMap;
//!
//! let mut map = BiMap::new();
//! map.insert(1, "one");
//! map.insert(2, "two");
//! assert_eq!(map.at_left(&2), Ok(&"two"));
//! assert_eq!(map.at_right(&"one"), Ok(&1));
//!
//! let c = map.find_left(&1);
//! assert_eq!(map.value(c), Some(&"one"));
//! assert_eq!(map.key(c.flip()), Some(&"one"));
//! ```

pub mod bimap;
pub mod cursor;
pub mod error;
pub mod iter;
mod node;
mod print;
mod tree;
pub mod types;
mod util;

pub use bimap::BiMap;
pub use cursor::{Cursor, LeftCursor, RightCursor};
pub use error::BiMapError;
pub use iter::{Iter, LeftIter, RightIter};
pub use types::{natural_order, Comparator, Left, NodeId, Project, Right, Side, SideKind, SideLink};
