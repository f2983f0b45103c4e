//! Borrowing iterators over one side's order.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::node::Arena;
use crate::types::{KeyOf, Left, NodeId, OtherOf, Project, Right, Side};
use crate::util::{next, prev};

/// Yields `(key, paired value)` in side `S`'s order, from either end.
pub struct Iter<'a, S, L, R> {
    arena: &'a Arena<L, R>,
    front: NodeId,
    back: NodeId,
    remaining: usize,
    side: PhantomData<S>,
}

/// `(&L, &R)` in left order.
pub type LeftIter<'a, L, R> = Iter<'a, Left, L, R>;

/// `(&R, &L)` in right order.
pub type RightIter<'a, L, R> = Iter<'a, Right, L, R>;

impl<'a, S: Side, L, R> Iter<'a, S, L, R> {
    pub(crate) fn new(arena: &'a Arena<L, R>, head: NodeId, tail: NodeId, len: usize) -> Self {
        Self {
            arena,
            front: head,
            back: tail,
            remaining: len,
            side: PhantomData,
        }
    }
}

impl<'a, S, L, R> Iterator for Iter<'a, S, L, R>
where
    S: Project<L, R>,
{
    type Item = (&'a KeyOf<S, L, R>, &'a OtherOf<S, L, R>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let arena = self.arena;
        let pair = arena.pair(self.front);
        self.front = next::<S, L, R>(arena, self.front);
        self.remaining -= 1;
        Some((S::key(pair), S::other(pair)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, S, L, R> DoubleEndedIterator for Iter<'a, S, L, R>
where
    S: Project<L, R>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let arena = self.arena;
        let pair = arena.pair(self.back);
        self.back = prev::<S, L, R>(arena, self.back);
        self.remaining -= 1;
        Some((S::key(pair), S::other(pair)))
    }
}

impl<'a, S, L, R> ExactSizeIterator for Iter<'a, S, L, R> where S: Project<L, R> {}

impl<'a, S, L, R> FusedIterator for Iter<'a, S, L, R> where S: Project<L, R> {}

impl<'a, S, L, R> Clone for Iter<'a, S, L, R> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            side: PhantomData,
        }
    }
}

impl<'a, S, L, R> fmt::Debug for Iter<'a, S, L, R>
where
    S: Project<L, R>,
    KeyOf<S, L, R>: fmt::Debug,
    OtherOf<S, L, R>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
