//! # Database Writer
//!
//! Builds a database file from key→value pairs. The writer is the one-shot
//! counterpart of the read engine: collect entries, call
//! [`finish`](DbWriter::finish) (or [`write_to_file`](DbWriter::write_to_file))
//! once, and the resulting bytes are a complete, immutable database.
//!
//! ## Emission Order
//!
//! ```text
//! [header][value heap][tree]
//! ```
//!
//! Values are laid out first, in key order, recording each record's offset.
//! The tree is then built over the sorted keys as a balanced binary search
//! tree: the lower-median key becomes the root of each range and the halves
//! recurse. Nodes are emitted children-first, so every child offset is
//! known by the time its parent is written; only the root-offset slot at
//! the front of the tree payload is patched afterwards.
//!
//! ## Child Encoding
//!
//! A leaf's payload ends after the value offset. A node with only a left
//! child appends one offset. A node with a right child always carries both
//! slots, storing 0 in the left slot when the left child is absent — the
//! lower-median split produces exactly such nodes for two-element ranges,
//! so readers can rely on the placeholder convention being exercised.
//!
//! ## Limits
//!
//! Keys are u16-framed (at most 65535 bytes), values u32-framed. Value
//! offsets and node offsets are u32, capping the heap and tree payloads at
//! 4 GiB each; exceeding either fails `finish` rather than wrapping.

use std::collections::BTreeMap;
use std::fs::{rename, File};
use std::io::Write;
use std::path::Path;

use eyre::{bail, ensure, Result, WrapErr};
use zerocopy::IntoBytes;

use crate::format::{FileHeader, NO_CHILD};

/// Accumulates entries and emits a complete database file.
///
/// Entries are kept in a sorted map, so duplicate keys resolve to the last
/// value inserted and the emission pass sees keys in lexicographic order.
#[derive(Debug, Default)]
pub struct DbWriter {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl DbWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one entry. Inserting an existing key replaces its value.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Result<()>
    where
        K: Into<Vec<u8>>,
        V: Into<Vec<u8>>,
    {
        let key = key.into();
        let value = value.into();

        ensure!(
            key.len() <= u16::MAX as usize,
            "key of {} bytes exceeds the {}-byte format limit",
            key.len(),
            u16::MAX
        );
        ensure!(
            value.len() <= u32::MAX as usize,
            "value of {} bytes exceeds the {}-byte format limit",
            value.len(),
            u32::MAX
        );

        self.entries.insert(key, value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Emits the complete database as bytes.
    pub fn finish(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.extend_from_slice(FileHeader::new().as_bytes());

        // value heap: records in key order, offsets remembered for the tree
        let mut heap = Vec::new();
        let mut items = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            ensure!(
                heap.len() <= u32::MAX as usize,
                "value heap exceeds the u32 offset range"
            );
            items.push((key.as_slice(), heap.len() as u32));
            heap.extend_from_slice(&(value.len() as u32).to_be_bytes());
            heap.extend_from_slice(value);
        }
        out.extend_from_slice(&(heap.len() as u64).to_be_bytes());
        out.extend_from_slice(&heap);

        // tree: root-offset slot first, nodes emitted children-first
        let mut tree = NO_CHILD.to_be_bytes().to_vec();
        if !items.is_empty() {
            let root = Self::pack_subtree(&mut tree, &items)?;
            tree[..4].copy_from_slice(&root.to_be_bytes());
        }
        ensure!(
            tree.len() <= u32::MAX as usize,
            "tree payload exceeds the u32 offset range"
        );
        out.extend_from_slice(&(tree.len() as u32).to_be_bytes());
        out.extend_from_slice(&tree);

        Ok(out)
    }

    /// Emits the database to `path`, writing a temporary sibling first and
    /// renaming it into place so a crash never leaves a half-written file
    /// under the final name.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.finish()?;

        let tmp_path = path.with_extension("tmp");
        let mut file = File::create(&tmp_path)
            .wrap_err_with(|| format!("failed to create '{}'", tmp_path.display()))?;
        file.write_all(&bytes)
            .wrap_err_with(|| format!("failed to write '{}'", tmp_path.display()))?;
        file.sync_all()
            .wrap_err_with(|| format!("failed to sync '{}'", tmp_path.display()))?;
        drop(file);

        rename(&tmp_path, path)
            .wrap_err_with(|| format!("failed to move database into '{}'", path.display()))?;
        Ok(())
    }

    /// Emits the subtree over `items` (sorted, nonempty) into `tree`,
    /// returning the root node's offset within the tree payload.
    fn pack_subtree(tree: &mut Vec<u8>, items: &[(&[u8], u32)]) -> Result<u32> {
        let mid = (items.len() - 1) / 2;
        let (key, value_offset) = items[mid];

        let left = if mid > 0 {
            Self::pack_subtree(tree, &items[..mid])?
        } else {
            NO_CHILD
        };
        let right = if mid + 1 < items.len() {
            Self::pack_subtree(tree, &items[mid + 1..])?
        } else {
            NO_CHILD
        };

        if tree.len() > u32::MAX as usize {
            bail!("tree payload exceeds the u32 offset range");
        }
        let offset = tree.len() as u32;

        let mut payload = Vec::with_capacity(2 + key.len() + 12);
        payload.extend_from_slice(&(key.len() as u16).to_be_bytes());
        payload.extend_from_slice(key);
        payload.extend_from_slice(&value_offset.to_be_bytes());
        match (left, right) {
            (NO_CHILD, NO_CHILD) => {}
            (left, NO_CHILD) => payload.extend_from_slice(&left.to_be_bytes()),
            (left, right) => {
                // a lone right child keeps the placeholder in the left slot
                payload.extend_from_slice(&left.to_be_bytes());
                payload.extend_from_slice(&right.to_be_bytes());
            }
        }
        ensure!(
            payload.len() <= u16::MAX as usize,
            "node payload of {} bytes exceeds the u16 frame limit",
            payload.len()
        );

        tree.extend_from_slice(&(payload.len() as u16).to_be_bytes());
        tree.extend_from_slice(&payload);
        Ok(offset)
    }
}
