//! # Storage Module
//!
//! Read-only memory-mapped access to a database file. Instead of copying
//! bytes between kernel and user space, the file is mapped directly into
//! the process address space:
//!
//! - **Zero-copy reads**: lookups return `&[u8]` slices pointing into the
//!   mapping
//! - **Minimal syscall overhead**: page faults are handled transparently by
//!   the OS
//! - **Efficient caching**: the OS page cache is the only cache
//!
//! ## Safety Model
//!
//! The mapping is opened read-only and never remapped, so the usual mmap
//! hazard — references outliving a remap — cannot arise. What remains is
//! the external-modification hazard shared by every mmap consumer: the
//! engine assumes no other process truncates or rewrites the file while it
//! is mapped. [`Database`] owns the mapping and hands out views that borrow
//! `&self`, so the borrow checker keeps every view inside the mapping's
//! lifetime.
//!
//! ## Module Organization
//!
//! - [`mmap`]: the read-only mapper and the owning [`Database`] handle

pub mod mmap;

pub use mmap::Database;
