//! holocron-server: Star Wars catalog and favorites API
//!
//! Read-only listings of people, planets and users, plus per-user
//! favorites, served over HTTP from Postgres or an in-memory store.
//!
//! # Layers
//!
//! - `http`: Axum router, extractors, JSON errors
//! - `service`: catalog lookups and favorite rules
//! - `db`: `Store` trait with Postgres and in-memory backends
//! - `models`: records and their JSON shape

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod seed;
pub mod service;

pub use config::{ConfigError, HolocronConfig};
pub use db::{DbError, MemoryStore, PgStore, Store};
pub use http::{run_server, ServerConfig};
pub use seed::{SeedData, SeedError, SeedReport};
