//! Route handlers organized by resource

use serde::Serialize;

pub mod catalog;
pub mod favorites;
pub mod health;
pub mod index;

/// A served endpoint, listed by `GET /` and `holocron routes`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

const fn endpoint(method: &'static str, path: &'static str, description: &'static str) -> Endpoint {
    Endpoint {
        method,
        path,
        description,
    }
}

pub const ENDPOINTS: &[Endpoint] = &[
    endpoint("GET", "/", "List available endpoints"),
    endpoint("GET", "/health", "Service and storage status"),
    endpoint("GET", "/people", "List all people"),
    endpoint("GET", "/people/{id}", "Get one person"),
    endpoint("GET", "/planets", "List all planets"),
    endpoint("GET", "/planets/{id}", "Get one planet"),
    endpoint("GET", "/users", "List all users"),
    endpoint("GET", "/users/favorites", "List the current user's favorites"),
    endpoint("POST", "/favorite/planet/{id}", "Add a planet to favorites"),
    endpoint("DELETE", "/favorite/planet/{id}", "Remove a planet from favorites"),
    endpoint("POST", "/favorite/people/{id}", "Add a person to favorites"),
    endpoint("DELETE", "/favorite/people/{id}", "Remove a person from favorites"),
];
