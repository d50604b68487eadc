//! # Read-Only Memory-Mapped Database
//!
//! This module implements [`Database`], the owning handle over a read-only
//! memory-mapped database file. It is the convenience layer above
//! [`DbReader`]: open a path, get lookups, let the OS page the file in on
//! demand.
//!
//! ## Design
//!
//! The mapping is established once at open, validated once, and never
//! remapped. `Database::get` derives a fresh [`DbReader`] per call — the
//! derivation is six header bytes and two length prefixes, all of which sit
//! in the first cache line of an already-resident page, so there is nothing
//! worth caching beyond the mapping itself.
//!
//! ## Lifetime
//!
//! Returned values borrow `&self`. Dropping the `Database` unmaps the file,
//! and the borrow checker guarantees no view survives that.
//!
//! ## Platform Behavior
//!
//! On Unix the mapper issues an `madvise(MADV_WILLNEED)` hint so the kernel
//! starts faulting the file in before the first lookup. The hint is
//! advisory; failure is ignored.

use std::fs::File;
use std::path::Path;

use eyre::{Result, WrapErr};
use memmap2::Mmap;

use crate::reader::DbReader;

/// An open database file: the read-only mapping plus nothing else.
#[derive(Debug)]
pub struct Database {
    mmap: Mmap,
}

impl Database {
    /// Opens and maps `path` read-only, validating the header eagerly so a
    /// bad file fails at open rather than at first lookup.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path)
            .wrap_err_with(|| format!("failed to open database file '{}'", path.display()))?;

        let metadata = file
            .metadata()
            .wrap_err_with(|| format!("failed to get metadata for '{}'", path.display()))?;

        if metadata.len() == 0 {
            corrupted!("database file '{}' is empty", path.display());
        }

        // SAFETY: Mmap::map is unsafe because another process could modify
        // the file underneath the mapping. This is safe for our purposes
        // because:
        // 1. The mapping is read-only; this process never writes through it
        // 2. Database files are immutable once written (the writer emits a
        //    complete file and never touches it again)
        // 3. The mmap lifetime is tied to Database, and every view borrows
        //    the Database, preventing use-after-unmap
        let mmap = unsafe {
            Mmap::map(&file)
                .wrap_err_with(|| format!("failed to memory-map '{}'", path.display()))?
        };

        // advisory only: start faulting pages in before the first lookup
        #[cfg(unix)]
        let _ = mmap.advise(memmap2::Advice::WillNeed);

        DbReader::new(&mmap)
            .wrap_err_with(|| format!("failed to validate database file '{}'", path.display()))?;

        Ok(Self { mmap })
    }

    /// Point lookup; see [`DbReader::get`].
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Result<Option<&[u8]>> {
        self.reader()?.get(key)
    }

    /// Derives the borrowed read engine over the mapping.
    pub fn reader(&self) -> Result<DbReader<'_>> {
        DbReader::new(&self.mmap)
    }

    /// The raw mapped bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap
    }

    pub fn file_size(&self) -> u64 {
        self.mmap.len() as u64
    }
}
