//! # Error Types
//!
//! The engine distinguishes exactly two failure categories:
//!
//! - [`DbError::BadMagic`]: the file is not recognized at all — wrong magic
//!   bytes or an unsupported format version. Raised only during reader
//!   construction and never recoverable.
//! - [`DbError::Corrupted`]: any bounds or structural violation detected
//!   while decoding — a read past a declared region bound, an offset that
//!   escapes its collection, or a tree descent that exceeds the hop limit.
//!
//! Both carry a reason string identifying the failure site. Errors propagate
//! through [`eyre::Result`], so internal call sites keep the usual `?`
//! plumbing and callers that need to branch on the category can downcast:
//!
//! ```
//! use rofldb::{DbError, DbReader};
//!
//! let err = DbReader::new(b"not a database").unwrap_err();
//! assert!(matches!(
//!     err.downcast_ref::<DbError>(),
//!     Some(DbError::BadMagic(_))
//! ));
//! ```
//!
//! No partial state can leak on failure: the engine owns no mutable state,
//! so an error simply abandons the stack-local cursors of the failed call.

use thiserror::Error;

/// The two failure categories of the read engine.
#[derive(Debug, Error)]
pub enum DbError {
    /// The file is not a recognized database: bad magic bytes or an
    /// unsupported format version. Raised only during construction.
    #[error("not a rofldb file: {0}")]
    BadMagic(String),

    /// A bounds or structural violation was detected while decoding.
    #[error("data corrupted: {0}")]
    Corrupted(String),
}
