//! Catalog seed fixtures
//!
//! Loads users, planets and people into any `Store`. Rows are upserted by
//! their unique key, so seeding twice is harmless.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::db::{DbError, Store};
use crate::models::{NewPerson, NewPlanet, NewUser};

const BUNDLED_CATALOG: &str = include_str!("../fixtures/catalog.json");

/// Error loading a fixture file
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Fixture contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<NewUser>,
    #[serde(default)]
    pub planets: Vec<NewPlanet>,
    #[serde(default)]
    pub people: Vec<NewPerson>,
}

/// Row counts after a seed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub planets: usize,
    pub people: usize,
}

impl SeedData {
    /// The catalog shipped with the crate.
    pub fn bundled() -> Result<Self, SeedError> {
        Ok(serde_json::from_str(BUNDLED_CATALOG)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.to_owned(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Upsert every row into `store`.
    pub async fn apply(self, store: &dyn Store) -> Result<SeedReport, SeedError> {
        let report = SeedReport {
            users: self.users.len(),
            planets: self.planets.len(),
            people: self.people.len(),
        };

        for user in self.users {
            tracing::debug!(email = %user.email, "seeding user");
            store.upsert_user(user).await?;
        }
        for planet in self.planets {
            tracing::debug!(name = %planet.name, "seeding planet");
            store.upsert_planet(planet).await?;
        }
        for person in self.people {
            tracing::debug!(name = %person.name, "seeding person");
            store.upsert_person(person).await?;
        }

        tracing::info!(
            users = report.users,
            planets = report.planets,
            people = report.people,
            "seed applied"
        );
        Ok(report)
    }
}
