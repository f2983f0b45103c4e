//! Positions inside one side's order.
//!
//! A [`Cursor`] names a pair by its slot, tagged with the side whose order it
//! walks. It does not borrow the map: reading and stepping go through
//! [`BiMap`](crate::BiMap) (`key`, `value`, `next`, `prev`), so a cursor can be
//! held across mutations of other pairs. It goes stale only when its own pair is
//! erased.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::types::{Left, NodeId, Right, Side, SENTINEL};

pub struct Cursor<S> {
    node: NodeId,
    side: PhantomData<S>,
}

pub type LeftCursor = Cursor<Left>;
pub type RightCursor = Cursor<Right>;

impl<S: Side> Cursor<S> {
    pub(crate) const fn new(node: NodeId) -> Self {
        Self {
            node,
            side: PhantomData,
        }
    }

    /// One-past-the-end cursor.
    pub const fn end() -> Self {
        Self::new(SENTINEL)
    }

    pub fn is_end(self) -> bool {
        self.node == SENTINEL
    }

    /// Same pair, positioned in the other side's order. Costs nothing: both
    /// sides' links live in the same slot.
    pub fn flip(self) -> Cursor<S::Flip> {
        Cursor::new(self.node)
    }

    /// Arena slot of the pair.
    pub fn node_id(self) -> NodeId {
        self.node
    }
}

impl<S> Clone for Cursor<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Cursor<S> {}

impl<S> PartialEq for Cursor<S> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<S> Eq for Cursor<S> {}

impl<S> Hash for Cursor<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl<S: Side> fmt::Debug for Cursor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            write!(f, "Cursor<{}>(end)", S::KIND)
        } else {
            write!(f, "Cursor<{}>({})", S::KIND, self.node)
        }
    }
}

impl<S: Side> Default for Cursor<S> {
    fn default() -> Self {
        Self::end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_round_trip() {
        let c = LeftCursor::new(4);
        let r: RightCursor = c.flip();
        assert_eq!(r.node_id(), 4);
        assert_eq!(r.flip(), c);
    }

    #[test]
    fn end_flips_to_end() {
        assert!(LeftCursor::end().flip().is_end());
        assert_eq!(RightCursor::default(), RightCursor::end());
    }

    #[test]
    fn equality_is_identity() {
        assert_eq!(LeftCursor::new(2), LeftCursor::new(2));
        assert_ne!(LeftCursor::new(2), LeftCursor::new(3));
    }

    #[test]
    fn debug_names_the_side() {
        assert_eq!(format!("{:?}", LeftCursor::new(7)), "Cursor<left>(7)");
        assert_eq!(format!("{:?}", RightCursor::end()), "Cursor<right>(end)");
    }
}
