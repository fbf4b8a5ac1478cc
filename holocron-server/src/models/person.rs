//! Person records (the `people` table)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::PersonId;

/// Person record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub height: Option<i32>,
    pub mass: Option<i32>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub eye_color: Option<String>,
    pub birth_year: Option<String>,
    pub gender: Option<String>,
}

/// Person fields for insertion (seed fixtures)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPerson {
    pub name: String,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub mass: Option<i32>,
    #[serde(default)]
    pub hair_color: Option<String>,
    #[serde(default)]
    pub skin_color: Option<String>,
    #[serde(default)]
    pub eye_color: Option<String>,
    #[serde(default)]
    pub birth_year: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl NewPerson {
    pub fn with_id(self, id: PersonId) -> Person {
        Person {
            id,
            name: self.name,
            height: self.height,
            mass: self.mass,
            hair_color: self.hair_color,
            skin_color: self.skin_color,
            eye_color: self.eye_color,
            birth_year: self.birth_year,
            gender: self.gender,
        }
    }
}
