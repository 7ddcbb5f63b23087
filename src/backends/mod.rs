//! Reference storage backends.
//!
//! Each backend translates the capability traits in [`crate::store`]
//! into backend-specific calls. Use them directly, or as templates for
//! your own driver: if your database can mimic [`MemStore`], it can
//! serve as a dictionary backend.

pub mod bloom;
pub mod memory;
pub mod sqlite;

pub use bloom::BloomStore;
pub use memory::{MemStore, MemStoreBulk};
pub use sqlite::SqliteStore;
