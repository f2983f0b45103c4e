//! Pair storage.
//!
//! The map owns one [`Arena`]: a vector of slots where slot [`SENTINEL`] is the
//! header and every other live slot is a [`PairNode`]. Freed slots are chained
//! into a free list and recycled by later allocations, so a slot index stays
//! valid exactly as long as its pair is in the map.

use std::mem;

use crate::types::{Links, NodeId, Side, SideLink, SENTINEL};
use crate::util::throw_iterator_access_error;

/// One `(left, right)` entry together with its links into both trees.
#[derive(Clone, Debug)]
pub(crate) struct PairNode<L, R> {
    pub(crate) links: Links,
    pub(crate) pair: (L, R),
}

impl<L, R> PairNode<L, R> {
    fn new(pair: (L, R)) -> Self {
        Self {
            links: Links::default(),
            pair,
        }
    }
}

#[derive(Clone, Debug)]
enum Slot<L, R> {
    Header(Links),
    Occupied(PairNode<L, R>),
    Vacant { next_free: Option<NodeId> },
}

#[derive(Debug)]
pub(crate) struct Arena<L, R> {
    slots: Vec<Slot<L, R>>,
    free_head: Option<NodeId>,
}

impl<L, R> Arena<L, R> {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Slot::Header(Links::header())],
            free_head: None,
        }
    }

    pub(crate) fn links(&self, id: NodeId) -> &Links {
        match self.slots.get(id as usize) {
            Some(Slot::Header(links)) => links,
            Some(Slot::Occupied(node)) => &node.links,
            _ => throw_iterator_access_error(),
        }
    }

    pub(crate) fn links_mut(&mut self, id: NodeId) -> &mut Links {
        match self.slots.get_mut(id as usize) {
            Some(Slot::Header(links)) => links,
            Some(Slot::Occupied(node)) => &mut node.links,
            _ => throw_iterator_access_error(),
        }
    }

    #[inline]
    pub(crate) fn link<S: Side>(&self, id: NodeId) -> &SideLink {
        S::link(self.links(id))
    }

    #[inline]
    pub(crate) fn link_mut<S: Side>(&mut self, id: NodeId) -> &mut SideLink {
        S::link_mut(self.links_mut(id))
    }

    pub(crate) fn try_pair(&self, id: NodeId) -> Option<&(L, R)> {
        match self.slots.get(id as usize) {
            Some(Slot::Occupied(node)) => Some(&node.pair),
            _ => None,
        }
    }

    /// Pair stored at `id`; panics on the header or a freed slot.
    pub(crate) fn pair(&self, id: NodeId) -> &(L, R) {
        match self.try_pair(id) {
            Some(pair) => pair,
            None => throw_iterator_access_error(),
        }
    }

    pub(crate) fn is_occupied(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id as usize), Some(Slot::Occupied(_)))
    }

    /// Number of live pairs.
    pub(crate) fn occupied(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count()
    }

    /// Stores `pair` in a fresh slot with blank links on both sides.
    pub(crate) fn alloc(&mut self, pair: (L, R)) -> NodeId {
        let node = Slot::Occupied(PairNode::new(pair));
        match self.free_head {
            Some(id) => {
                let slot = mem::replace(&mut self.slots[id as usize], node);
                match slot {
                    Slot::Vacant { next_free } => self.free_head = next_free,
                    _ => unreachable!("free list points at a live slot"),
                }
                id
            }
            None => {
                self.slots.push(node);
                (self.slots.len() - 1) as NodeId
            }
        }
    }

    /// Releases the slot at `id` and hands its pair back. The caller must have
    /// unlinked the slot from both trees.
    pub(crate) fn free(&mut self, id: NodeId) -> (L, R) {
        if !self.is_occupied(id) {
            throw_iterator_access_error();
        }
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match mem::replace(&mut self.slots[id as usize], vacant) {
            Slot::Occupied(node) => {
                self.free_head = Some(id);
                node.pair
            }
            _ => unreachable!("slot checked as occupied"),
        }
    }

    /// Exchanges the whole node graph, header included, with `other`.
    ///
    /// The header lives at the same index in every arena, so links that point
    /// back at it stay correct after the exchange.
    pub(crate) fn swap_sentinel(&mut self, other: &mut Self) {
        mem::swap(&mut self.slots, &mut other.slots);
        mem::swap(&mut self.free_head, &mut other.free_head);
    }

    /// Drops every pair and resets the header.
    pub(crate) fn clear(&mut self) {
        self.slots.truncate(1);
        self.slots[SENTINEL as usize] = Slot::Header(Links::header());
        self.free_head = None;
    }
}

impl<L, R> Default for Arena<L, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Left, Right};

    #[test]
    fn alloc_recycles_freed_slots() {
        let mut arena = Arena::<i32, char>::new();
        let a = arena.alloc((1, 'a'));
        let b = arena.alloc((2, 'b'));
        assert_eq!((a, b), (1, 2));
        assert_eq!(arena.occupied(), 2);

        assert_eq!(arena.free(a), (1, 'a'));
        assert!(!arena.is_occupied(a));
        assert_eq!(arena.try_pair(a), None);

        let c = arena.alloc((3, 'c'));
        assert_eq!(c, a);
        assert_eq!(arena.pair(c), &(3, 'c'));
        assert_eq!(arena.occupied(), 2);
    }

    #[test]
    fn free_list_is_lifo() {
        let mut arena = Arena::<i32, i32>::new();
        let ids: Vec<_> = (0..4).map(|i| arena.alloc((i, i))).collect();
        arena.free(ids[1]);
        arena.free(ids[3]);
        assert_eq!(arena.alloc((9, 9)), ids[3]);
        assert_eq!(arena.alloc((8, 8)), ids[1]);
        assert_eq!(arena.alloc((7, 7)), 5);
    }

    #[test]
    fn header_is_not_a_pair() {
        let arena = Arena::<i32, i32>::new();
        assert_eq!(arena.try_pair(SENTINEL), None);
        assert_eq!(*arena.link::<Left>(SENTINEL), SideLink::empty_header());
        assert_eq!(*arena.link::<Right>(SENTINEL), SideLink::empty_header());
    }

    #[test]
    fn sides_are_independent() {
        let mut arena = Arena::<i32, i32>::new();
        let id = arena.alloc((1, 1));
        arena.link_mut::<Left>(id).l = Some(4);
        assert_eq!(arena.link::<Left>(id).l, Some(4));
        assert_eq!(arena.link::<Right>(id).l, None);
    }

    #[test]
    #[should_panic(expected = "Iterator access denied!")]
    fn links_of_freed_slot_panic() {
        let mut arena = Arena::<i32, i32>::new();
        let id = arena.alloc((1, 1));
        arena.free(id);
        arena.links(id);
    }

    #[test]
    #[should_panic(expected = "Iterator access denied!")]
    fn double_free_panics() {
        let mut arena = Arena::<i32, i32>::new();
        let id = arena.alloc((1, 1));
        arena.free(id);
        arena.free(id);
    }

    #[test]
    fn swap_and_clear() {
        let mut a = Arena::<i32, i32>::new();
        let mut b = Arena::<i32, i32>::new();
        a.alloc((1, 1));
        a.alloc((2, 2));
        a.swap_sentinel(&mut b);
        assert_eq!(a.occupied(), 0);
        assert_eq!(b.occupied(), 2);
        b.clear();
        assert_eq!(b.occupied(), 0);
        assert_eq!(b.alloc((5, 5)), 1);
    }
}
