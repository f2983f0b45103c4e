//! Side tags and link records.
//!
//! Every pair is stored once, in a slot that carries two independent
//! [`SideLink`]s: one threads the slot into the left tree, the other into the
//! right tree. The zero-sized [`Left`] and [`Right`] tags select which of the
//! two a tree operation walks, so one slot is viewed as a node of either tree
//! without any layout tricks.
//!
//! Links are `Option<u32>` indices into the map's arena, the same encoding the
//! `sonic-forest` trees use for their `p` / `l` / `r` fields.

use std::cmp::Ordering;
use std::fmt;

/// Arena slot index.
pub type NodeId = u32;

/// Slot of the per-map header record shared by both trees.
///
/// Its link fields are repurposed: `p` holds the root, `l` holds the maximum
/// (tail) and `r` holds the minimum (head). An empty side has `l == r ==
/// SENTINEL` and `p == None`. The one-past-the-end cursor of either side is a
/// cursor on this slot.
pub const SENTINEL: NodeId = 0;

/// Binary-search-tree links of one side: lesser child, greater child, parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SideLink {
    pub l: Option<NodeId>,
    pub r: Option<NodeId>,
    pub p: Option<NodeId>,
}

impl SideLink {
    /// Header links of an empty side.
    pub(crate) const fn empty_header() -> Self {
        Self {
            l: Some(SENTINEL),
            r: Some(SENTINEL),
            p: None,
        }
    }
}

/// Both sides' links of one slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Links {
    pub left: SideLink,
    pub right: SideLink,
}

impl Links {
    pub(crate) const fn header() -> Self {
        Self {
            left: SideLink::empty_header(),
            right: SideLink::empty_header(),
        }
    }
}

/// Runtime name of a side, used in errors and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SideKind {
    Left,
    Right,
}

impl fmt::Display for SideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideKind::Left => f.write_str("left"),
            SideKind::Right => f.write_str("right"),
        }
    }
}

/// Compile-time side selector.
pub trait Side: Copy + Eq + Default + fmt::Debug + 'static {
    /// The opposite side.
    type Flip: Side<Flip = Self>;

    const KIND: SideKind;

    fn link(links: &Links) -> &SideLink;

    fn link_mut(links: &mut Links) -> &mut SideLink;
}

/// Selects the key a side is ordered by, and the value paired with it.
pub trait Project<L, R>: Side {
    type Key;
    type Other;

    fn key(pair: &(L, R)) -> &Self::Key;

    fn other(pair: &(L, R)) -> &Self::Other;
}

/// Key type of side `S` for pairs `(L, R)`.
pub type KeyOf<S, L, R> = <S as Project<L, R>>::Key;

/// Value type paired with side `S`'s key.
pub type OtherOf<S, L, R> = <S as Project<L, R>>::Other;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Left;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Right;

impl Side for Left {
    type Flip = Right;

    const KIND: SideKind = SideKind::Left;

    #[inline]
    fn link(links: &Links) -> &SideLink {
        &links.left
    }

    #[inline]
    fn link_mut(links: &mut Links) -> &mut SideLink {
        &mut links.left
    }
}

impl Side for Right {
    type Flip = Left;

    const KIND: SideKind = SideKind::Right;

    #[inline]
    fn link(links: &Links) -> &SideLink {
        &links.right
    }

    #[inline]
    fn link_mut(links: &mut Links) -> &mut SideLink {
        &mut links.right
    }
}

impl<L, R> Project<L, R> for Left {
    type Key = L;
    type Other = R;

    #[inline]
    fn key(pair: &(L, R)) -> &L {
        &pair.0
    }

    #[inline]
    fn other(pair: &(L, R)) -> &R {
        &pair.1
    }
}

impl<L, R> Project<L, R> for Right {
    type Key = R;
    type Other = L;

    #[inline]
    fn key(pair: &(L, R)) -> &R {
        &pair.1
    }

    #[inline]
    fn other(pair: &(L, R)) -> &L {
        &pair.0
    }
}

/// Default comparator: the key type's natural `Ord`.
pub fn natural_order<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// Comparator function-pointer type used when none is supplied.
pub type Comparator<K> = fn(&K, &K) -> Ordering;
