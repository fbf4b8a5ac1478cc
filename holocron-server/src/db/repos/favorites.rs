//! Favorite repository
//!
//! - list: LEFT JOIN planets and people in one query (no N+1)
//! - insert/delete: explicit transaction, rolled back on every error path
//! - duplicates: rejected by the partial unique indexes, surfaced as
//!   `DbError::Conflict` (no check-then-insert)

use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Postgres, Row, Transaction};

use crate::models::{
    FavoriteDetail, FavoriteId, FavoriteSubject, FavoriteTarget, Person, PersonId, Planet,
    PlanetId, UserId,
};
use super::DbError;

const SELECT_DETAIL: &str = r#"
    SELECT
        f.id, f.user_id, f.planet_id, f.people_id,
        pl.name AS planet_name, pl.population, pl.terrain, pl.climate,
        pe.name AS person_name, pe.height, pe.mass, pe.hair_color,
        pe.skin_color, pe.eye_color, pe.birth_year, pe.gender
    FROM favorites f
    LEFT JOIN planets pl ON pl.id = f.planet_id
    LEFT JOIN people pe ON pe.id = f.people_id
"#;

/// Favorite repository
pub struct FavoriteRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> FavoriteRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's favorites with targets attached.
    pub async fn list_for_user(&self, user: UserId) -> Result<Vec<FavoriteDetail>, DbError> {
        let sql = format!("{SELECT_DETAIL} WHERE f.user_id = $1 ORDER BY f.id");
        let rows = sqlx::query(&sql).bind(user).fetch_all(self.pool).await?;

        rows.iter().map(detail_from_row).collect()
    }

    /// Insert a favorite and read it back with its target (atomic).
    pub async fn insert(
        &self,
        user: UserId,
        target: FavoriteTarget,
    ) -> Result<FavoriteDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        match insert_in(&mut *tx, user, target).await {
            Ok(detail) => {
                tx.commit().await?;
                Ok(detail)
            }
            Err(err) => {
                rollback(tx).await;
                Err(err)
            }
        }
    }

    /// Delete a favorite, returning whether a row was removed.
    pub async fn delete(&self, user: UserId, target: FavoriteTarget) -> Result<bool, DbError> {
        let sql = match target {
            FavoriteTarget::Planet(_) => {
                "DELETE FROM favorites WHERE user_id = $1 AND planet_id = $2"
            }
            FavoriteTarget::Person(_) => {
                "DELETE FROM favorites WHERE user_id = $1 AND people_id = $2"
            }
        };

        let mut tx = self.pool.begin().await?;

        match sqlx::query(sql)
            .bind(user)
            .bind(target.raw_id())
            .execute(&mut *tx)
            .await
        {
            Ok(result) => {
                tx.commit().await?;
                Ok(result.rows_affected() > 0)
            }
            Err(err) => {
                rollback(tx).await;
                Err(err.into())
            }
        }
    }
}

async fn insert_in(
    conn: &mut PgConnection,
    user: UserId,
    target: FavoriteTarget,
) -> Result<FavoriteDetail, DbError> {
    let (planet_id, people_id) = target.columns();

    let id: FavoriteId = sqlx::query_scalar(
        r#"
        INSERT INTO favorites (user_id, planet_id, people_id)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(user)
    .bind(planet_id)
    .bind(people_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(|err| classify_write_error(err, user, target))?;

    let sql = format!("{SELECT_DETAIL} WHERE f.id = $1");
    let row = sqlx::query(&sql).bind(id).fetch_one(&mut *conn).await?;

    detail_from_row(&row)
}

async fn rollback(tx: Transaction<'_, Postgres>) {
    if let Err(err) = tx.rollback().await {
        tracing::warn!(error = %err, "transaction rollback failed");
    }
}

/// Map constraint violations onto domain errors.
fn classify_write_error(err: sqlx::Error, user: UserId, target: FavoriteTarget) -> DbError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return DbError::conflict(target.resource(), target.raw_id());
        }
        if db_err.is_foreign_key_violation() {
            return match db_err.constraint() {
                Some("favorites_user_id_fkey") => DbError::not_found("user", user),
                _ => DbError::not_found(target.resource(), target.raw_id()),
            };
        }
    }
    DbError::Sqlx(err)
}

fn detail_from_row(row: &PgRow) -> Result<FavoriteDetail, DbError> {
    let id: FavoriteId = row.try_get("id")?;
    let user_id: UserId = row.try_get("user_id")?;
    let planet_id: Option<PlanetId> = row.try_get("planet_id")?;
    let people_id: Option<PersonId> = row.try_get("people_id")?;

    let subject = match (planet_id, people_id) {
        (Some(planet_id), None) => FavoriteSubject::Planet(Planet {
            id: planet_id,
            name: row.try_get("planet_name")?,
            population: row.try_get("population")?,
            terrain: row.try_get("terrain")?,
            climate: row.try_get("climate")?,
        }),
        (None, Some(person_id)) => FavoriteSubject::Person(Person {
            id: person_id,
            name: row.try_get("person_name")?,
            height: row.try_get("height")?,
            mass: row.try_get("mass")?,
            hair_color: row.try_get("hair_color")?,
            skin_color: row.try_get("skin_color")?,
            eye_color: row.try_get("eye_color")?,
            birth_year: row.try_get("birth_year")?,
            gender: row.try_get("gender")?,
        }),
        _ => {
            return Err(DbError::Integrity(format!(
                "favorite {id} must reference exactly one planet or person"
            )))
        }
    };

    Ok(FavoriteDetail {
        id,
        user_id,
        subject,
    })
}
