//! Person repository (`people` table)

use sqlx::PgPool;

use crate::models::{NewPerson, Person, PersonId};
use super::DbError;

/// Person repository
pub struct PersonRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PersonRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Person>, DbError> {
        let people = sqlx::query_as::<_, Person>(
            r#"
            SELECT id, name, height, mass, hair_color, skin_color, eye_color, birth_year, gender
            FROM people
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(people)
    }

    pub async fn get(&self, id: PersonId) -> Result<Option<Person>, DbError> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            SELECT id, name, height, mass, hair_color, skin_color, eye_color, birth_year, gender
            FROM people
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(person)
    }

    /// Insert a person, returning the existing row on name conflict.
    pub async fn upsert(&self, person: NewPerson) -> Result<Person, DbError> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO people
                (name, height, mass, hair_color, skin_color, eye_color, birth_year, gender)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name, height, mass, hair_color, skin_color, eye_color, birth_year, gender
            "#,
        )
        .bind(&person.name)
        .bind(person.height)
        .bind(person.mass)
        .bind(&person.hair_color)
        .bind(&person.skin_color)
        .bind(&person.eye_color)
        .bind(&person.birth_year)
        .bind(&person.gender)
        .fetch_one(self.pool)
        .await?;

        Ok(person)
    }
}
