//! Storage layer
//!
//! SQLite (embedded) for durable deployments, plus an in-process store for
//! demos and tests. Both implement the core store traits.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStore;
