//! # Internal Macros
//!
//! Early-return macros for the two error categories, mirroring the shape of
//! `eyre::bail!` but producing a typed [`DbError`](crate::error::DbError)
//! inside the report so callers can downcast to the category.

/// Fails the enclosing function with [`DbError::Corrupted`](crate::error::DbError).
macro_rules! corrupted {
    ($($arg:tt)*) => {
        return Err($crate::error::DbError::Corrupted(format!($($arg)*)).into())
    };
}

/// Fails the enclosing function with [`DbError::BadMagic`](crate::error::DbError).
macro_rules! bad_magic {
    ($($arg:tt)*) => {
        return Err($crate::error::DbError::BadMagic(format!($($arg)*)).into())
    };
}
