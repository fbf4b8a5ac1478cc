//! Schema bootstrap
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so this runs on each
//! startup.

use sqlx::PgPool;

use super::DbError;

const SCHEMA: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            email VARCHAR(120) NOT NULL UNIQUE,
            password VARCHAR(80) NOT NULL,
            is_active BOOLEAN NOT NULL
        )
        "#,
    ),
    (
        "planets",
        r#"
        CREATE TABLE IF NOT EXISTS planets (
            id SERIAL PRIMARY KEY,
            name VARCHAR(120) NOT NULL UNIQUE,
            population BIGINT,
            terrain VARCHAR(120),
            climate VARCHAR(120)
        )
        "#,
    ),
    (
        "people",
        r#"
        CREATE TABLE IF NOT EXISTS people (
            id SERIAL PRIMARY KEY,
            name VARCHAR(120) NOT NULL UNIQUE,
            height INTEGER,
            mass INTEGER,
            hair_color VARCHAR(50),
            skin_color VARCHAR(50),
            eye_color VARCHAR(50),
            birth_year VARCHAR(50),
            gender VARCHAR(50)
        )
        "#,
    ),
    (
        "favorites",
        r#"
        CREATE TABLE IF NOT EXISTS favorites (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            planet_id INTEGER REFERENCES planets(id) ON DELETE CASCADE,
            people_id INTEGER REFERENCES people(id) ON DELETE CASCADE,
            CONSTRAINT favorites_single_target CHECK (num_nonnulls(planet_id, people_id) = 1)
        )
        "#,
    ),
    (
        "favorites_user_planet_key",
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS favorites_user_planet_key
            ON favorites (user_id, planet_id) WHERE planet_id IS NOT NULL
        "#,
    ),
    (
        "favorites_user_people_key",
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS favorites_user_people_key
            ON favorites (user_id, people_id) WHERE people_id IS NOT NULL
        "#,
    ),
];

/// Create all tables and indexes.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running schema migrations...");

    let mut tx = pool.begin().await?;
    for (name, statement) in SCHEMA {
        tracing::debug!(object = name, "ensuring schema object");
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!(objects = SCHEMA.len(), "Schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_statement_is_idempotent() {
        for (name, statement) in SCHEMA {
            assert!(
                statement.contains("IF NOT EXISTS"),
                "{name} would fail on second run"
            );
        }
    }

    #[test]
    fn tables_precede_dependents() {
        let position = |name: &str| SCHEMA.iter().position(|(n, _)| *n == name).unwrap();
        assert!(position("users") < position("favorites"));
        assert!(position("planets") < position("favorites"));
        assert!(position("people") < position("favorites"));
        assert!(position("favorites") < position("favorites_user_planet_key"));
    }
}
