//! # Read Engine
//!
//! The top-level reader over a database's bytes. [`DbReader::new`] parses
//! the fixed header, frames the two sections (value heap, then tree), and
//! exposes [`get`](DbReader::get). Submodules hold the section views:
//!
//! - [`tree`]: the binary search tree of keyed nodes
//! - [`values`]: the offset-addressed value heap
//!
//! ## Lifetime Contract
//!
//! A `DbReader<'a>` borrows the database bytes for `'a` and every value it
//! returns borrows the same bytes. The caller owns the backing memory —
//! typically a read-only mapping — and must keep it alive and unchanged for
//! as long as the reader or any returned view exists. The borrow checker
//! enforces exactly this when the bytes come from safe Rust; with a raw
//! mapping the [`storage`](crate::storage) layer ties the lifetimes
//! together.
//!
//! ## Construction Cost
//!
//! Construction reads six header bytes and two length prefixes — no scan,
//! no allocation, no payload access. Lookups touch only the node records on
//! the descent path and the one value record they resolve to, which is what
//! keeps cold-start lookups proportional to tree depth in page faults.

pub mod tree;
pub mod values;

use eyre::Result;

use crate::format::{FileHeader, PayloadReader, TreeFrame, ValueHeapFrame, FILE_HEADER_SIZE};
use tree::Tree;
use values::ValueCollection;

/// The read-side engine over one database's bytes.
///
/// Immutable after construction; shared references may be used from any
/// number of threads concurrently.
#[derive(Debug, Clone, Copy)]
pub struct DbReader<'a> {
    values: ValueCollection<'a>,
    tree: Tree<'a>,
}

impl<'a> DbReader<'a> {
    /// Parses the header and section frames of `data`.
    ///
    /// Fails with `BadMagic` if the magic bytes or version are not
    /// recognized, or with `Corrupted` if a section frame overruns the
    /// file. Trailing bytes after the tree are ignored.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let mut reader = PayloadReader::new(data);

        let header = reader.skip(FILE_HEADER_SIZE).map_err(|_| {
            crate::error::DbError::BadMagic(format!(
                "file of {} bytes is smaller than the {}-byte header",
                data.len(),
                FILE_HEADER_SIZE
            ))
        })?;
        FileHeader::from_bytes(header)?;

        let values = reader.read_frame::<ValueHeapFrame>()?;
        let tree = reader.read_frame::<TreeFrame>()?;

        Ok(Self {
            values: ValueCollection::from_frame(values),
            tree: Tree::from_frame(tree),
        })
    }

    /// Point lookup. Returns a zero-copy view of the value, or `None` when
    /// the key is absent.
    ///
    /// Accepts anything byte-like — `&[u8]`, `&str`, `String`, `Vec<u8>` —
    /// and treats text as its byte encoding, no normalization.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Result<Option<&'a [u8]>> {
        let Some(offset) = self.tree.lookup(key.as_ref())? else {
            return Ok(None);
        };
        Ok(Some(self.values.value_at(offset)?))
    }
}
