//! # RoflDb - Read-Only File Lookup Database
//!
//! RoflDb is a read-only, zero-copy key→value store over a single on-disk
//! binary file. A writer produces the file once; readers map it into the
//! address space and answer point lookups without deserializing or copying
//! any payload bytes. This implementation prioritizes:
//!
//! - **Zero-copy data access**: every returned value is a `&[u8]` slice
//!   pointing directly into the mapping, no intermediate buffers
//! - **Zero allocation on the hot path**: a lookup is a handful of integer
//!   reads and byte comparisons over already-resident memory
//! - **Defensive decoding**: every read is bounds-checked against the
//!   declared region it belongs to, so a corrupt or truncated file fails
//!   with an error instead of reading out of bounds
//!
//! ## Quick Start
//!
//! ```
//! use rofldb::{DbReader, DbWriter};
//!
//! # fn main() -> eyre::Result<()> {
//! let mut writer = DbWriter::new();
//! writer.insert("answer", "42")?;
//! let bytes = writer.finish()?;
//!
//! let reader = DbReader::new(&bytes)?;
//! assert_eq!(reader.get("answer")?, Some(&b"42"[..]));
//! assert_eq!(reader.get("question")?, None);
//! # Ok(())
//! # }
//! ```
//!
//! Or against a file on disk, through the built-in read-only mapper:
//!
//! ```ignore
//! let db = rofldb::Database::open("data.rofldb")?;
//! if let Some(value) = db.get("answer")? {
//!     println!("{}", String::from_utf8_lossy(value));
//! }
//! ```
//!
//! ## Architecture
//!
//! The engine is four thin layers, leaves first:
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Public API (DbReader / Database)   │
//! ├─────────────────────────────────────┤
//! │   Lookup Engine (Tree / ValueHeap)   │
//! ├─────────────────────────────────────┤
//! │   Framed Regions (length-prefixed)   │
//! ├─────────────────────────────────────┤
//! │   Payload Reader (bounded cursor)    │
//! └─────────────────────────────────────┘
//! ```
//!
//! - [`format::cursor`]: fixed-width big-endian integer decoding and the
//!   bounded [`PayloadReader`](format::PayloadReader) cursor
//! - [`format::frame`]: self-describing length-prefixed regions; the prefix
//!   width is a compile-time parameter of the region kind
//! - [`reader`]: the binary search tree of keyed nodes, the value heap, and
//!   the top-level [`DbReader`]
//! - [`storage`]: read-only memory-mapped file access ([`Database`])
//! - [`writer`]: the balanced-tree file builder ([`DbWriter`])
//!
//! ## File Layout
//!
//! ```text
//! offset  size  field
//! 0       4     magic "ROFL"
//! 4       2     format version (u16 BE, currently 0)
//! 6       8     value heap length (u64 BE)
//! 14      N1    value heap: concatenated [len u32 BE][bytes] records
//! 14+N1   4     tree length (u32 BE)
//! 18+N1   N2    tree: [root offset u32 BE][node records]
//! ```
//!
//! All multi-byte integers on disk are big-endian. Offsets are relative to
//! the start of the containing region's payload, never absolute.
//!
//! ## Concurrency
//!
//! A reader and all of its views are immutable after construction. Any
//! number of threads may call [`DbReader::get`] on a shared reader without
//! synchronization; there is no shared mutable state anywhere in the crate.
//!
//! ## The `unchecked-reads` feature
//!
//! With the `unchecked-reads` cargo feature the payload reader's bounds
//! tests compile out. Lookups on well-formed files are unaffected; feeding a
//! malformed file to an unchecked reader is undefined behavior. The default
//! build keeps every check on.

#[macro_use]
mod macros;

pub mod error;
pub mod format;
pub mod reader;
pub mod storage;
pub mod writer;

pub use error::DbError;
pub use reader::DbReader;
pub use storage::Database;
pub use writer::DbWriter;
