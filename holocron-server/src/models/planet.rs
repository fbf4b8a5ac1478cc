//! Planet records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::PlanetId;

/// Planet record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pub population: Option<i64>,
    pub terrain: Option<String>,
    pub climate: Option<String>,
}

/// Planet fields for insertion (seed fixtures)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPlanet {
    pub name: String,
    #[serde(default)]
    pub population: Option<i64>,
    #[serde(default)]
    pub terrain: Option<String>,
    #[serde(default)]
    pub climate: Option<String>,
}

impl NewPlanet {
    /// Attach an id, producing the stored record.
    pub fn with_id(self, id: PlanetId) -> Planet {
        Planet {
            id,
            name: self.name,
            population: self.population,
            terrain: self.terrain,
            climate: self.climate,
        }
    }
}
