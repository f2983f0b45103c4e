//! In-order navigation over one side's links.
//!
//! The header closes each side into a ring: the successor of the maximum and
//! the predecessor of the minimum are [`SENTINEL`], and stepping from
//! [`SENTINEL`] lands on the minimum (forward) or the maximum (backward).

use crate::node::Arena;
use crate::types::{NodeId, Side, SENTINEL};

pub(crate) fn throw_iterator_access_error() -> ! {
    panic!("Iterator access denied!")
}

/// Leftmost node of the subtree rooted at `node`.
pub(crate) fn first<S: Side, L, R>(arena: &Arena<L, R>, mut node: NodeId) -> NodeId {
    while let Some(l) = arena.link::<S>(node).l {
        node = l;
    }
    node
}

/// Rightmost node of the subtree rooted at `node`.
pub(crate) fn last<S: Side, L, R>(arena: &Arena<L, R>, mut node: NodeId) -> NodeId {
    while let Some(r) = arena.link::<S>(node).r {
        node = r;
    }
    node
}

/// In-order successor.
pub(crate) fn next<S: Side, L, R>(arena: &Arena<L, R>, mut curr: NodeId) -> NodeId {
    if curr == SENTINEL {
        return arena.link::<S>(SENTINEL).r.unwrap_or(SENTINEL);
    }
    if let Some(r) = arena.link::<S>(curr).r {
        return first::<S, L, R>(arena, r);
    }
    loop {
        let p = arena.link::<S>(curr).p.unwrap_or(SENTINEL);
        if p == SENTINEL || arena.link::<S>(p).l == Some(curr) {
            return p;
        }
        curr = p;
    }
}

/// In-order predecessor.
pub(crate) fn prev<S: Side, L, R>(arena: &Arena<L, R>, mut curr: NodeId) -> NodeId {
    if curr == SENTINEL {
        return arena.link::<S>(SENTINEL).l.unwrap_or(SENTINEL);
    }
    if let Some(l) = arena.link::<S>(curr).l {
        return last::<S, L, R>(arena, l);
    }
    loop {
        let p = arena.link::<S>(curr).p.unwrap_or(SENTINEL);
        if p == SENTINEL || arena.link::<S>(p).r == Some(curr) {
            return p;
        }
        curr = p;
    }
}
