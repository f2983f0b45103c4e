//! Unbalanced binary search tree over one side's links.
//!
//! A [`SideTree`] owns no nodes. It is a comparator plus the knowledge of which
//! [`Side`] it walks; every operation takes the shared [`Arena`] explicitly.
//! Structural operations never allocate or free slots.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::node::Arena;
use crate::types::{KeyOf, NodeId, Project, Side, SENTINEL};
use crate::util::{first, last, next, prev};

pub(crate) struct SideTree<S, C> {
    pub(crate) comparator: C,
    side: PhantomData<S>,
}

impl<S: Side, C> SideTree<S, C> {
    pub(crate) fn new(comparator: C) -> Self {
        Self {
            comparator,
            side: PhantomData,
        }
    }

    pub(crate) fn root<L, R>(&self, arena: &Arena<L, R>) -> Option<NodeId> {
        arena.link::<S>(SENTINEL).p
    }

    /// Minimum node, or [`SENTINEL`] when empty.
    pub(crate) fn head<L, R>(&self, arena: &Arena<L, R>) -> NodeId {
        arena.link::<S>(SENTINEL).r.unwrap_or(SENTINEL)
    }

    /// Maximum node, or [`SENTINEL`] when empty.
    pub(crate) fn tail<L, R>(&self, arena: &Arena<L, R>) -> NodeId {
        arena.link::<S>(SENTINEL).l.unwrap_or(SENTINEL)
    }

    #[inline]
    pub(crate) fn compare<K>(&self, a: &K, b: &K) -> Ordering
    where
        C: Fn(&K, &K) -> Ordering,
    {
        (self.comparator)(a, b)
    }

    #[inline]
    pub(crate) fn equivalent<K>(&self, a: &K, b: &K) -> bool
    where
        C: Fn(&K, &K) -> Ordering,
    {
        self.compare(a, b) == Ordering::Equal
    }

    /// Whether `node` is a real node whose key is equivalent to `key`.
    pub(crate) fn holds<L, R>(&self, arena: &Arena<L, R>, node: NodeId, key: &KeyOf<S, L, R>) -> bool
    where
        S: Project<L, R>,
        C: Fn(&KeyOf<S, L, R>, &KeyOf<S, L, R>) -> Ordering,
    {
        node != SENTINEL && self.equivalent(key, S::key(arena.pair(node)))
    }

    /// Leftmost node not less than `key`, or [`SENTINEL`].
    pub(crate) fn lower_bound<L, R>(&self, arena: &Arena<L, R>, key: &KeyOf<S, L, R>) -> NodeId
    where
        S: Project<L, R>,
        C: Fn(&KeyOf<S, L, R>, &KeyOf<S, L, R>) -> Ordering,
    {
        let mut bound = SENTINEL;
        let mut curr = self.root(arena);
        while let Some(i) = curr {
            match self.compare(key, S::key(arena.pair(i))) {
                Ordering::Less => {
                    bound = i;
                    curr = arena.link::<S>(i).l;
                }
                Ordering::Greater => curr = arena.link::<S>(i).r,
                Ordering::Equal => return i,
            }
        }
        bound
    }

    /// Leftmost node greater than `key`, or [`SENTINEL`].
    pub(crate) fn upper_bound<L, R>(&self, arena: &Arena<L, R>, key: &KeyOf<S, L, R>) -> NodeId
    where
        S: Project<L, R>,
        C: Fn(&KeyOf<S, L, R>, &KeyOf<S, L, R>) -> Ordering,
    {
        let bound = self.lower_bound(arena, key);
        if self.holds(arena, bound, key) {
            next::<S, L, R>(arena, bound)
        } else {
            bound
        }
    }

    pub(crate) fn find<L, R>(&self, arena: &Arena<L, R>, key: &KeyOf<S, L, R>) -> NodeId
    where
        S: Project<L, R>,
        C: Fn(&KeyOf<S, L, R>, &KeyOf<S, L, R>) -> Ordering,
    {
        let bound = self.lower_bound(arena, key);
        if self.holds(arena, bound, key) {
            bound
        } else {
            SENTINEL
        }
    }

    /// Attaches `node` as a new leaf, ordered by `value` or, when `None`, by
    /// the node's own key. Returns `false` without touching the tree if an
    /// equivalent key is already present.
    pub(crate) fn insert_node<L, R>(
        &self,
        arena: &mut Arena<L, R>,
        node: NodeId,
        value: Option<&KeyOf<S, L, R>>,
    ) -> bool
    where
        S: Project<L, R>,
        C: Fn(&KeyOf<S, L, R>, &KeyOf<S, L, R>) -> Ordering,
    {
        let mut parent = SENTINEL;
        let mut lesser = false;
        let mut lowest = true;
        let mut greatest = true;
        {
            let arena: &Arena<L, R> = arena;
            let value = match value {
                Some(value) => value,
                None => S::key(arena.pair(node)),
            };
            let mut curr = self.root(arena);
            while let Some(i) = curr {
                match self.compare(value, S::key(arena.pair(i))) {
                    Ordering::Less => {
                        lesser = true;
                        greatest = false;
                        curr = arena.link::<S>(i).l;
                    }
                    Ordering::Greater => {
                        lesser = false;
                        lowest = false;
                        curr = arena.link::<S>(i).r;
                    }
                    Ordering::Equal => return false,
                }
                parent = i;
            }
        }

        if parent == SENTINEL {
            arena.link_mut::<S>(SENTINEL).p = Some(node);
        } else if lesser {
            arena.link_mut::<S>(parent).l = Some(node);
        } else {
            arena.link_mut::<S>(parent).r = Some(node);
        }
        let link = arena.link_mut::<S>(node);
        link.p = Some(parent);
        link.l = None;
        link.r = None;

        let header = arena.link_mut::<S>(SENTINEL);
        if greatest {
            header.l = Some(node);
        }
        if lowest {
            header.r = Some(node);
        }
        true
    }

    /// Attaches `node` as the in-order predecessor of `neighbour`, which must
    /// be the lower bound of the node's key. [`SENTINEL`] appends at the tail.
    pub(crate) fn insert_before<L, R>(&self, arena: &mut Arena<L, R>, node: NodeId, neighbour: NodeId) {
        {
            let link = arena.link_mut::<S>(node);
            link.l = None;
            link.r = None;
        }
        if neighbour == SENTINEL {
            let tail = self.tail(arena);
            if tail == SENTINEL {
                let header = arena.link_mut::<S>(SENTINEL);
                header.p = Some(node);
                header.l = Some(node);
                header.r = Some(node);
            } else {
                arena.link_mut::<S>(tail).r = Some(node);
                arena.link_mut::<S>(SENTINEL).l = Some(node);
            }
            arena.link_mut::<S>(node).p = Some(tail);
        } else if let Some(lesser) = arena.link::<S>(neighbour).l {
            let pred = last::<S, L, R>(arena, lesser);
            arena.link_mut::<S>(pred).r = Some(node);
            arena.link_mut::<S>(node).p = Some(pred);
        } else {
            arena.link_mut::<S>(neighbour).l = Some(node);
            arena.link_mut::<S>(node).p = Some(neighbour);
            if self.head(arena) == neighbour {
                arena.link_mut::<S>(SENTINEL).r = Some(node);
            }
        }
    }

    /// Unlinks `node` and returns its former in-order successor.
    ///
    /// A node with two children is replaced in place by its successor; no
    /// rotations are performed.
    pub(crate) fn erase<L, R>(&self, arena: &mut Arena<L, R>, node: NodeId) -> NodeId {
        let succ = next::<S, L, R>(arena, node);
        let link = *arena.link::<S>(node);
        if link.l.is_none() || link.r.is_none() {
            self.unlink(arena, node);
            return succ;
        }

        // `succ` has no lesser child; splice it out, then move it into `node`'s place.
        self.unlink(arena, succ);
        let link = *arena.link::<S>(node);
        self.replace_child(arena, node, Some(succ));
        *arena.link_mut::<S>(succ) = link;
        self.adopt_children(arena, succ);
        self.retarget_header(arena, node, succ);
        succ
    }

    /// Removes a node with at most one child.
    fn unlink<L, R>(&self, arena: &mut Arena<L, R>, node: NodeId) {
        if self.tail(arena) == node {
            let pred = prev::<S, L, R>(arena, node);
            arena.link_mut::<S>(SENTINEL).l = Some(pred);
        }
        if self.head(arena) == node {
            let succ = next::<S, L, R>(arena, node);
            arena.link_mut::<S>(SENTINEL).r = Some(succ);
        }
        let link = *arena.link::<S>(node);
        let child = link.l.or(link.r);
        self.replace_child(arena, node, child);
        if let Some(child) = child {
            arena.link_mut::<S>(child).p = link.p;
        }
    }

    /// Points the slot that references `node` from above (its parent's child
    /// slot, or the header's root slot) at `with`.
    fn replace_child<L, R>(&self, arena: &mut Arena<L, R>, node: NodeId, with: Option<NodeId>) {
        if self.root(arena) == Some(node) {
            arena.link_mut::<S>(SENTINEL).p = with;
            return;
        }
        let parent = arena.link::<S>(node).p.unwrap_or(SENTINEL);
        let link = arena.link_mut::<S>(parent);
        if link.l == Some(node) {
            link.l = with;
        } else {
            link.r = with;
        }
    }

    /// Repoints the children of `node` at `node`.
    fn adopt_children<L, R>(&self, arena: &mut Arena<L, R>, node: NodeId) {
        let link = *arena.link::<S>(node);
        for child in [link.l, link.r].into_iter().flatten() {
            arena.link_mut::<S>(child).p = Some(node);
        }
    }

    /// Header maintenance: every root/head/tail slot holding `from` now holds
    /// `to`.
    fn retarget_header<L, R>(&self, arena: &mut Arena<L, R>, from: NodeId, to: NodeId) {
        let header = arena.link_mut::<S>(SENTINEL);
        if header.p == Some(from) {
            header.p = Some(to);
        }
        if header.l == Some(from) {
            header.l = Some(to);
        }
        if header.r == Some(from) {
            header.r = Some(to);
        }
    }

    /// Gives `to` the exact tree position of `from`. `from` is left detached
    /// from this side; `to` must not already be linked into it.
    pub(crate) fn move_node<L, R>(&self, arena: &mut Arena<L, R>, from: NodeId, to: NodeId) {
        let link = *arena.link::<S>(from);
        *arena.link_mut::<S>(to) = link;
        self.adopt_children(arena, to);
        let parent = link.p.unwrap_or(SENTINEL);
        if parent != SENTINEL {
            let up = arena.link_mut::<S>(parent);
            if up.l == Some(from) {
                up.l = Some(to);
            }
            if up.r == Some(from) {
                up.r = Some(to);
            }
        }
        self.retarget_header(arena, from, to);
        *arena.link_mut::<S>(from) = Default::default();
    }

    /// Structural self-check of this side against `len` live pairs.
    pub(crate) fn check<L, R>(&self, arena: &Arena<L, R>, len: usize) -> Result<(), String>
    where
        S: Project<L, R>,
        C: Fn(&KeyOf<S, L, R>, &KeyOf<S, L, R>) -> Ordering,
    {
        let side = S::KIND;
        let header = *arena.link::<S>(SENTINEL);
        let Some(root) = header.p else {
            if len != 0 {
                return Err(format!("{side} tree is empty but the map holds {len} pairs"));
            }
            if header.l != Some(SENTINEL) || header.r != Some(SENTINEL) {
                return Err(format!("{side} header of an empty tree must point at itself"));
            }
            return Ok(());
        };

        if arena.link::<S>(root).p != Some(SENTINEL) {
            return Err(format!("{side} root {root} is not parented by the header"));
        }
        let head = first::<S, L, R>(arena, root);
        if header.r != Some(head) {
            return Err(format!("{side} head is {:?}, expected {head}", header.r));
        }
        let tail = last::<S, L, R>(arena, root);
        if header.l != Some(tail) {
            return Err(format!("{side} tail is {:?}, expected {tail}", header.l));
        }

        let mut stack = vec![root];
        let mut count = 0;
        while let Some(node) = stack.pop() {
            count += 1;
            if count > len {
                return Err(format!("{side} tree holds more than {len} nodes"));
            }
            let link = *arena.link::<S>(node);
            for child in [link.l, link.r].into_iter().flatten() {
                if arena.link::<S>(child).p != Some(node) {
                    return Err(format!("{side} node {child} does not point back at parent {node}"));
                }
                stack.push(child);
            }
        }
        if count != len {
            return Err(format!("{side} tree holds {count} nodes, expected {len}"));
        }

        let mut curr = next::<S, L, R>(arena, head);
        let mut before = head;
        while curr != SENTINEL {
            let a = S::key(arena.pair(before));
            let b = S::key(arena.pair(curr));
            if self.compare(a, b) != Ordering::Less {
                return Err(format!("{side} order violated between nodes {before} and {curr}"));
            }
            before = curr;
            curr = next::<S, L, R>(arena, curr);
        }
        Ok(())
    }
}
