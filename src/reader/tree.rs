//! # Search Tree
//!
//! The tree region encodes a binary search tree over the database's keys.
//! Its payload starts with a u32 root offset, followed by node records at
//! arbitrary offsets; every offset (root or child) is relative to the start
//! of the tree payload. The BST invariant holds under lexicographic byte
//! ordering with the shorter-is-less tiebreak: `&[u8]`'s `Ord` exactly.
//!
//! ## Node Layout
//!
//! ```text
//! +---------------+------------------+---------------+----------------+
//! | key (u16-framed) | value off (u32) | [left (u32)] | [right (u32)] |
//! +---------------+------------------+---------------+----------------+
//! ```
//!
//! Children are present by omission: a leaf's payload ends after the value
//! offset, a node with only a left child ends after one offset, and a node
//! with only a right child stores a 0 placeholder in the left slot. Offset
//! 0 always lands on the root-offset field, so it doubles as the "absent"
//! sentinel for both child slots and the root itself.
//!
//! ## Descent
//!
//! [`Tree::lookup`] walks from the root, asking each node to match the
//! search key. A match is one of three outcomes — found the value, drop
//! down to a child, or provably absent — and the walk is bounded by a hop
//! limit derived from the payload size, so a corrupt file whose child
//! offsets form a cycle fails with an error instead of spinning.

use std::cmp::Ordering;

use eyre::Result;

use crate::format::{
    Frame, KeyFrame, NodeFrame, TreeFrame, EMPTY_ROOT, EMPTY_ROOT_COMPAT, MIN_NODE_SIZE, NO_CHILD,
};

/// Outcome of matching a search key against one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// The node holds the key; the value lives at this offset in the heap.
    Value(u32),
    /// The key, if present, lives under the child node at this offset.
    DropDown(u32),
}

/// A borrowed view of one node record.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    frame: Frame<'a, NodeFrame>,
}

impl<'a> Node<'a> {
    pub fn from_frame(frame: Frame<'a, NodeFrame>) -> Self {
        Self { frame }
    }

    /// The node's key bytes.
    pub fn key(&self) -> Result<&'a [u8]> {
        let mut reader = self.frame.reader();
        Ok(reader.read_frame::<KeyFrame>()?.payload())
    }

    /// Matches `search` against this node.
    ///
    /// Returns `Some(Match::Value(_))` when the keys are equal,
    /// `Some(Match::DropDown(_))` when the search must continue under a
    /// child, and `None` when the relevant child is absent — which proves
    /// the key is not in the tree.
    pub fn match_key(&self, search: &[u8]) -> Result<Option<Match>> {
        let mut reader = self.frame.reader();
        let key = reader.read_frame::<KeyFrame>()?.payload();
        let value_offset = reader.read_int::<u32>()?;

        match search.cmp(key) {
            Ordering::Equal => Ok(Some(Match::Value(value_offset))),
            Ordering::Less => {
                if !reader.has_more() {
                    return Ok(None);
                }
                let left = reader.read_int::<u32>()?;
                if left == NO_CHILD {
                    return Ok(None);
                }
                Ok(Some(Match::DropDown(left)))
            }
            Ordering::Greater => {
                if !reader.has_more() {
                    return Ok(None);
                }
                // the first child slot is always the left one
                reader.skip(std::mem::size_of::<u32>())?;
                if !reader.has_more() {
                    return Ok(None);
                }
                let right = reader.read_int::<u32>()?;
                if right == NO_CHILD {
                    return Ok(None);
                }
                Ok(Some(Match::DropDown(right)))
            }
        }
    }
}

/// A borrowed view of the whole search tree.
#[derive(Debug, Clone, Copy)]
pub struct Tree<'a> {
    frame: Frame<'a, TreeFrame>,
}

impl<'a> Tree<'a> {
    pub fn from_frame(frame: Frame<'a, TreeFrame>) -> Self {
        Self { frame }
    }

    /// Searches the tree, returning the matched key's value offset.
    pub fn lookup(&self, key: &[u8]) -> Result<Option<u32>> {
        let mut reader = self.frame.reader();
        let root = reader.read_int::<u32>()?;
        if root == EMPTY_ROOT || root == EMPTY_ROOT_COMPAT {
            return Ok(None);
        }

        // A well-formed tree cannot be deeper than it has nodes. Child
        // offsets that loop exhaust this budget and fail instead of
        // spinning forever.
        let max_hops = self.frame.payload_len() / MIN_NODE_SIZE + 1;
        let mut offset = root as usize;

        for _ in 0..max_hops {
            let node = self.node_at(offset)?;
            match node.match_key(key)? {
                None => return Ok(None),
                Some(Match::Value(value_offset)) => return Ok(Some(value_offset)),
                Some(Match::DropDown(child)) => offset = child as usize,
            }
        }

        corrupted!(
            "tree descent exceeded {} hops, node links form a cycle",
            max_hops
        );
    }

    fn node_at(&self, offset: usize) -> Result<Node<'a>> {
        let mut reader = self.frame.reader();
        let frame = reader.read_frame_at::<NodeFrame>(offset)?;
        Ok(Node::from_frame(frame))
    }
}
