//! PostgreSQL repositories, one per table
//!
//! Each repository borrows the pool and follows these patterns:
//! - ON CONFLICT for idempotent seeding
//! - Constraint violations mapped to `DbError` variants
//! - Transactions for writes

pub mod favorites;
pub mod people;
pub mod planets;
pub mod users;

pub use super::DbError;
pub use favorites::FavoriteRepo;
pub use people::PersonRepo;
pub use planets::PlanetRepo;
pub use users::UserRepo;
