//! # gridcol-store
//!
//! Column collections and key-value persistence for gridcol.
//!
//! This crate provides:
//! - [`ColumnStore`] - owner of the three ordered column collections
//!   (primary, secondary, custom) and every operation that mutates them
//! - [`SnapshotStore`] - the key-value persistence abstraction, with
//!   [`MemoryStore`] and [`JsonFileStore`] implementations
//!
//! Every mutating store operation re-serializes and writes all three
//! collections as a unit, so the persisted snapshot is always globally
//! consistent.

pub mod error;
pub mod persist;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use persist::{JsonFileStore, MemoryStore, SnapshotStore};
pub use store::{ColumnStore, Favorite};
