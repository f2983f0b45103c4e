use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::trace;

use crate::cursor::{Cursor, LeftCursor, RightCursor};
use crate::error::BiMapError;
use crate::iter::{Iter, LeftIter, RightIter};
use crate::node::Arena;
use crate::print::print;
use crate::tree::SideTree;
use crate::types::{natural_order, Comparator, KeyOf, Left, NodeId, OtherOf, Project, Right, Side, SideKind, SENTINEL};
use crate::util::{next, prev, throw_iterator_access_error};

/// Bidirectional ordered map.
///
/// Holds unique `(left, right)` pairs: no two pairs share an equivalent left
/// key, and no two share an equivalent right key. Each side is kept in its own
/// unbalanced binary search tree, ordered by its own comparator, and both trees
/// thread through the same slot per pair.
///
/// Rust divergence: node storage is an index arena owned by the map rather than
/// individually allocated nodes; cursors are slot indices.
pub struct BiMap<L, R, CL = Comparator<L>, CR = Comparator<R>> {
    arena: Arena<L, R>,
    left: SideTree<Left, CL>,
    right: SideTree<Right, CR>,
    len: usize,
}

impl<L, R> BiMap<L, R, Comparator<L>, Comparator<R>>
where
    L: Ord,
    R: Ord,
{
    pub fn new() -> Self {
        Self::with_comparators(natural_order::<L>, natural_order::<R>)
    }
}

impl<L, R> Default for BiMap<L, R, Comparator<L>, Comparator<R>>
where
    L: Ord,
    R: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<L, R, CL, CR> BiMap<L, R, CL, CR> {
    pub fn with_comparators(compare_left: CL, compare_right: CR) -> Self {
        Self {
            arena: Arena::new(),
            left: SideTree::new(compare_left),
            right: SideTree::new(compare_right),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn empty(&self) -> bool {
        self.is_empty()
    }

    pub fn begin_left(&self) -> LeftCursor {
        Cursor::new(self.left.head(&self.arena))
    }

    pub fn end_left(&self) -> LeftCursor {
        Cursor::end()
    }

    pub fn begin_right(&self) -> RightCursor {
        Cursor::new(self.right.head(&self.arena))
    }

    pub fn end_right(&self) -> RightCursor {
        Cursor::end()
    }

    /// Key under `cursor` on the cursor's side; `None` at end or when stale.
    pub fn key<S: Project<L, R>>(&self, cursor: Cursor<S>) -> Option<&KeyOf<S, L, R>> {
        self.arena.try_pair(cursor.node_id()).map(|pair| S::key(pair))
    }

    /// Value paired with the key under `cursor`.
    pub fn value<S: Project<L, R>>(&self, cursor: Cursor<S>) -> Option<&OtherOf<S, L, R>> {
        self.arena.try_pair(cursor.node_id()).map(|pair| S::other(pair))
    }

    /// Both halves of the pair under `cursor`, in `(left, right)` order.
    pub fn pair<S: Side>(&self, cursor: Cursor<S>) -> Option<(&L, &R)> {
        self.arena.try_pair(cursor.node_id()).map(|(l, r)| (l, r))
    }

    /// In-order successor on the cursor's side. Stepping past the last pair
    /// gives end; stepping from end wraps to the first pair.
    ///
    /// Panics if the cursor's pair has been erased.
    pub fn next<S: Side>(&self, cursor: Cursor<S>) -> Cursor<S> {
        Cursor::new(next::<S, L, R>(&self.arena, cursor.node_id()))
    }

    /// In-order predecessor on the cursor's side. Stepping back from end gives
    /// the last pair; stepping back from the first pair gives end.
    ///
    /// Panics if the cursor's pair has been erased.
    pub fn prev<S: Side>(&self, cursor: Cursor<S>) -> Cursor<S> {
        Cursor::new(prev::<S, L, R>(&self.arena, cursor.node_id()))
    }

    pub fn iter_left(&self) -> LeftIter<'_, L, R> {
        Iter::new(
            &self.arena,
            self.left.head(&self.arena),
            self.left.tail(&self.arena),
            self.len,
        )
    }

    pub fn iter_right(&self) -> RightIter<'_, L, R> {
        Iter::new(
            &self.arena,
            self.right.head(&self.arena),
            self.right.tail(&self.arena),
            self.len,
        )
    }

    /// Unlinks `node` from both trees, then releases it. Returns the former
    /// successors on the left and right side.
    fn erase_node(&mut self, node: NodeId) -> (NodeId, NodeId) {
        if node == SENTINEL || !self.arena.is_occupied(node) {
            throw_iterator_access_error();
        }
        let next_left = self.left.erase(&mut self.arena, node);
        let next_right = self.right.erase(&mut self.arena, node);
        drop(self.arena.free(node));
        self.len -= 1;
        (next_left, next_right)
    }

    /// Removes the pair under `cursor` and returns the next cursor in left
    /// order.
    pub fn erase_left(&mut self, cursor: LeftCursor) -> LeftCursor {
        Cursor::new(self.erase_node(cursor.node_id()).0)
    }

    /// Removes the pair under `cursor` and returns the next cursor in right
    /// order.
    pub fn erase_right(&mut self, cursor: RightCursor) -> RightCursor {
        Cursor::new(self.erase_node(cursor.node_id()).1)
    }

    /// Removes every pair in `[first, last)` of left order.
    pub fn erase_left_range(&mut self, mut first: LeftCursor, last: LeftCursor) -> LeftCursor {
        let before = self.len;
        while first != last {
            first = self.erase_left(first);
        }
        trace!(erased = before - self.len, len = self.len, "erased left range");
        last
    }

    /// Removes every pair in `[first, last)` of right order.
    pub fn erase_right_range(&mut self, mut first: RightCursor, last: RightCursor) -> RightCursor {
        let before = self.len;
        while first != last {
            first = self.erase_right(first);
        }
        trace!(erased = before - self.len, len = self.len, "erased right range");
        last
    }

    /// Removes every pair.
    pub fn clear(&mut self) {
        let (first, last) = (self.begin_left(), self.end_left());
        self.erase_left_range(first, last);
        self.arena.clear();
    }

    /// Exchanges contents and comparators with `other` without touching any
    /// pair.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.left.comparator, &mut other.left.comparator);
        mem::swap(&mut self.right.comparator, &mut other.right.comparator);
        self.arena.swap_sentinel(&mut other.arena);
        trace!(len = self.len, other_len = other.len, "swapped bimaps");
    }

    /// Moves every pair out into a new map with the same comparators, leaving
    /// `self` empty and usable.
    pub fn take(&mut self) -> Self
    where
        CL: Clone,
        CR: Clone,
    {
        let mut moved = Self::with_comparators(self.left.comparator.clone(), self.right.comparator.clone());
        moved.swap(self);
        moved
    }

    /// Tree shape of the left side by slot index.
    pub fn print_left(&self) -> String {
        print::<Left, L, R>(&self.arena, self.left.root(&self.arena), "")
    }

    /// Tree shape of the right side by slot index.
    pub fn print_right(&self) -> String {
        print::<Right, L, R>(&self.arena, self.right.root(&self.arena), "")
    }
}

impl<L, R, CL, CR> BiMap<L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    /// Inserts `(left, right)` if neither key is present yet.
    ///
    /// Returns a cursor to the new pair, or [`end_left`](Self::end_left) when
    /// either key already exists; in that case the map is unchanged.
    pub fn insert(&mut self, left: L, right: R) -> LeftCursor {
        self.try_insert(left, right).unwrap_or_else(|_| Cursor::end())
    }

    /// Like [`insert`](Self::insert), reporting which side collided.
    pub fn try_insert(&mut self, left: L, right: R) -> Result<LeftCursor, BiMapError> {
        let left_bound = self.left.lower_bound(&self.arena, &left);
        if self.left.holds(&self.arena, left_bound, &left) {
            return Err(BiMapError::DuplicateKey {
                side: SideKind::Left,
            });
        }
        let right_bound = self.right.lower_bound(&self.arena, &right);
        if self.right.holds(&self.arena, right_bound, &right) {
            return Err(BiMapError::DuplicateKey {
                side: SideKind::Right,
            });
        }

        let node = self.arena.alloc((left, right));
        self.left.insert_before(&mut self.arena, node, left_bound);
        self.right.insert_before(&mut self.arena, node, right_bound);
        self.len += 1;
        Ok(Cursor::new(node))
    }

    /// Appends a pair whose left key is greater than every present left key.
    /// Used when copying, where left order is already known.
    fn push_back_left(&mut self, left: L, right: R) -> bool {
        let tail = self.left.tail(&self.arena);
        if tail != SENTINEL && self.left.compare(&self.arena.pair(tail).0, &left) != Ordering::Less {
            return false;
        }
        let node = self.arena.alloc((left, right));
        self.left.insert_before(&mut self.arena, node, SENTINEL);
        if !self.right.insert_node(&mut self.arena, node, None) {
            self.left.erase(&mut self.arena, node);
            drop(self.arena.free(node));
            return false;
        }
        self.len += 1;
        true
    }

    pub fn erase_left_key(&mut self, left: &L) -> bool {
        let node = self.left.find(&self.arena, left);
        if node == SENTINEL {
            return false;
        }
        self.erase_node(node);
        true
    }

    pub fn erase_right_key(&mut self, right: &R) -> bool {
        let node = self.right.find(&self.arena, right);
        if node == SENTINEL {
            return false;
        }
        self.erase_node(node);
        true
    }

    pub fn find_left(&self, left: &L) -> LeftCursor {
        Cursor::new(self.left.find(&self.arena, left))
    }

    pub fn find_right(&self, right: &R) -> RightCursor {
        Cursor::new(self.right.find(&self.arena, right))
    }

    pub fn contains_left(&self, left: &L) -> bool {
        !self.find_left(left).is_end()
    }

    pub fn contains_right(&self, right: &R) -> bool {
        !self.find_right(right).is_end()
    }

    pub fn lower_bound_left(&self, left: &L) -> LeftCursor {
        Cursor::new(self.left.lower_bound(&self.arena, left))
    }

    pub fn upper_bound_left(&self, left: &L) -> LeftCursor {
        Cursor::new(self.left.upper_bound(&self.arena, left))
    }

    pub fn lower_bound_right(&self, right: &R) -> RightCursor {
        Cursor::new(self.right.lower_bound(&self.arena, right))
    }

    pub fn upper_bound_right(&self, right: &R) -> RightCursor {
        Cursor::new(self.right.upper_bound(&self.arena, right))
    }

    /// Right value paired with `left`.
    pub fn at_left(&self, left: &L) -> Result<&R, BiMapError> {
        match self.left.find(&self.arena, left) {
            SENTINEL => Err(BiMapError::NotFound),
            node => Ok(&self.arena.pair(node).1),
        }
    }

    /// Left value paired with `right`.
    pub fn at_right(&self, right: &R) -> Result<&L, BiMapError> {
        match self.right.find(&self.arena, right) {
            SENTINEL => Err(BiMapError::NotFound),
            node => Ok(&self.arena.pair(node).0),
        }
    }

    pub fn get_left(&self, left: &L) -> Option<&R> {
        self.at_left(left).ok()
    }

    pub fn get_right(&self, right: &R) -> Option<&L> {
        self.at_right(right).ok()
    }

    /// Right value paired with `left`, pairing `left` with `R::default()` when
    /// it is absent.
    ///
    /// The default right value can belong to only one pair. If another left
    /// key holds it, that pair is evicted and `left` takes its place.
    pub fn at_left_or_default(&mut self, left: L) -> &R
    where
        R: Default,
    {
        let node = Self::at_or_default(
            &mut self.arena,
            &mut self.len,
            &self.left,
            &self.right,
            left,
            |l, r| (l, r),
        );
        &self.arena.pair(node).1
    }

    /// Left value paired with `right`, pairing `right` with `L::default()` when
    /// it is absent. Evicts the previous holder of the default left value.
    pub fn at_right_or_default(&mut self, right: R) -> &L
    where
        L: Default,
    {
        let node = Self::at_or_default(
            &mut self.arena,
            &mut self.len,
            &self.right,
            &self.left,
            right,
            |r, l| (l, r),
        );
        &self.arena.pair(node).0
    }

    /// Finds or creates the pair for `key` on side `SK`, whose other half is
    /// the default of side `SD`. Returns its slot.
    fn at_or_default<SK, SD, CK, CD>(
        arena: &mut Arena<L, R>,
        len: &mut usize,
        key_tree: &SideTree<SK, CK>,
        other_tree: &SideTree<SD, CD>,
        key: KeyOf<SK, L, R>,
        make_pair: fn(KeyOf<SK, L, R>, KeyOf<SD, L, R>) -> (L, R),
    ) -> NodeId
    where
        SK: Project<L, R>,
        SD: Project<L, R>,
        KeyOf<SD, L, R>: Default,
        CK: Fn(&KeyOf<SK, L, R>, &KeyOf<SK, L, R>) -> Ordering,
        CD: Fn(&KeyOf<SD, L, R>, &KeyOf<SD, L, R>) -> Ordering,
    {
        let bound = key_tree.lower_bound(arena, &key);
        if key_tree.holds(arena, bound, &key) {
            return bound;
        }

        let default = <KeyOf<SD, L, R> as Default>::default();
        let holder = other_tree.lower_bound(arena, &default);
        if !other_tree.holds(arena, holder, &default) {
            let node = arena.alloc(make_pair(key, default));
            key_tree.insert_before(arena, node, bound);
            other_tree.insert_before(arena, node, holder);
            *len += 1;
            return node;
        }

        // The replacement is fully built before either tree changes.
        let node = arena.alloc(make_pair(key, default));
        key_tree.insert_before(arena, node, bound);
        key_tree.erase(arena, holder);
        other_tree.move_node(arena, holder, node);
        drop(arena.free(holder));
        trace!(
            side = %SK::KIND,
            evicted = holder,
            node,
            "moved default value to a new key"
        );
        node
    }

    /// Checks both trees' structure, order and population.
    pub fn assert_valid(&self) -> Result<(), String> {
        self.left.check(&self.arena, self.len)?;
        self.right.check(&self.arena, self.len)?;
        let live = self.arena.occupied();
        if live != self.len {
            return Err(format!("arena holds {live} pairs, length is {}", self.len));
        }
        Ok(())
    }
}

impl<L, R, CL, CR> Clone for BiMap<L, R, CL, CR>
where
    L: Clone,
    R: Clone,
    CL: Clone + Fn(&L, &L) -> Ordering,
    CR: Clone + Fn(&R, &R) -> Ordering,
{
    fn clone(&self) -> Self {
        let mut copy = Self::with_comparators(self.left.comparator.clone(), self.right.comparator.clone());
        for (l, r) in self.iter_left() {
            copy.push_back_left(l.clone(), r.clone());
        }
        copy
    }
}

/// Pairwise equivalence in left order, judged by `self`'s comparators.
impl<L, R, CL, CR> PartialEq for BiMap<L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .iter_left()
                .zip(other.iter_left())
                .all(|((l1, r1), (l2, r2))| self.left.equivalent(l1, l2) && self.right.equivalent(r1, r2))
    }
}

impl<L, R, CL, CR> Eq for BiMap<L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
}

impl<L, R, CL, CR> fmt::Debug for BiMap<L, R, CL, CR>
where
    L: fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_left()).finish()
    }
}

impl<L, R, CL, CR> Extend<(L, R)> for BiMap<L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (L, R)>>(&mut self, iter: I) {
        for (l, r) in iter {
            self.insert(l, r);
        }
    }
}

impl<L: Ord, R: Ord> FromIterator<(L, R)> for BiMap<L, R> {
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, L, R, CL, CR> IntoIterator for &'a BiMap<L, R, CL, CR> {
    type Item = (&'a L, &'a R);
    type IntoIter = LeftIter<'a, L, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_left()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BiMap<i32, String> {
        [(3, "c"), (1, "a"), (2, "b")]
            .into_iter()
            .map(|(l, r)| (l, r.to_string()))
            .collect()
    }

    #[test]
    fn new_is_empty() {
        let map = BiMap::<i32, i32>::new();
        assert!(map.is_empty());
        assert_eq!(map.begin_left(), map.end_left());
        assert_eq!(map.begin_right(), map.end_right());
        map.assert_valid().unwrap();
    }

    #[test]
    fn cursor_navigation_wraps_through_end() {
        let map = sample();
        let end = map.end_left();
        let first = map.next(end);
        assert_eq!(map.key(first), Some(&1));
        assert_eq!(map.key(map.prev(end)), Some(&3));
        assert_eq!(map.prev(first), end);
        assert_eq!(map.key(end), None);
        assert_eq!(map.value(end), None);
    }

    #[test]
    fn pair_reads_both_halves() {
        let map = sample();
        let c = map.find_right(&"b".to_string());
        assert_eq!(map.pair(c), Some((&2, &"b".to_string())));
        assert_eq!(map.value(c), Some(&2));
    }

    #[test]
    fn erase_returns_successor_per_side() {
        let mut map = BiMap::<i32, i32>::new();
        map.insert(1, 30);
        map.insert(2, 20);
        map.insert(3, 10);
        let next = map.erase_right(map.find_right(&20));
        assert_eq!(map.key(next), Some(&30));
        let next = map.erase_left(map.find_left(&1));
        assert_eq!(map.key(next), Some(&3));
        map.assert_valid().unwrap();
    }

    #[test]
    #[should_panic(expected = "Iterator access denied!")]
    fn erasing_end_panics() {
        let mut map = sample();
        let end = map.end_left();
        map.erase_left(end);
    }

    #[test]
    #[should_panic(expected = "Iterator access denied!")]
    fn stepping_a_stale_cursor_panics() {
        let mut map = sample();
        let c = map.find_left(&2);
        map.erase_left(c);
        map.next(c);
    }

    #[test]
    fn clear_resets_everything() {
        let mut map = sample();
        map.clear();
        assert!(map.is_empty());
        map.assert_valid().unwrap();
        assert!(!map.insert(5, "e".to_string()).is_end());
        map.assert_valid().unwrap();
    }

    #[test]
    fn push_back_left_rejects_out_of_order() {
        let mut map = BiMap::<i32, i32>::new();
        assert!(map.push_back_left(1, 10));
        assert!(!map.push_back_left(1, 11));
        assert!(!map.push_back_left(2, 10));
        assert!(map.push_back_left(2, 5));
        assert_eq!(map.len(), 2);
        map.assert_valid().unwrap();
    }

    #[test]
    fn debug_lists_left_order() {
        let map = sample();
        assert_eq!(format!("{map:?}"), r#"{1: "a", 2: "b", 3: "c"}"#);
    }

    #[test]
    fn print_sides() {
        let mut map = BiMap::<i32, i32>::new();
        map.insert(1, 2);
        assert_eq!(map.print_left(), "Node(1)\nL=∅\nR=∅");
        assert_eq!(map.print_right(), "Node(1)\nL=∅\nR=∅");
    }
}
