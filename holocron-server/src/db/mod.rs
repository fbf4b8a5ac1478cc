//! Database layer - repository interface, connection pool and stores
//!
//! # Design Principles
//!
//! - Handlers depend on `dyn Store`, never on a concrete backend
//! - Favorite listing uses JOINs - no N+1 queries
//! - Duplicates rejected by constraints - no check-then-insert
//! - Writes run in an explicit transaction with rollback on failure

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pg;
pub mod pool;
pub mod repos;
pub mod store;

pub use error::DbError;
pub use memory::MemoryStore;
pub use pg::PgStore;
pub use pool::{create_pool, create_pool_with_options};
pub use store::Store;
