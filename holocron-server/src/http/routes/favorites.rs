//! Favorites routes for the current user
//!
//! GET /users/favorites
//! POST|DELETE /favorite/planet/{id}
//! POST|DELETE /favorite/people/{id}

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{CurrentUser, ValidId};
use crate::http::server::AppState;
use crate::models::{FavoriteDetail, FavoriteTarget, PersonId, PlanetId};
use crate::service::FavoriteService;

#[derive(Debug, Serialize)]
pub struct FavoriteCreated {
    pub message: String,
    pub favorite: FavoriteDetail,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn created(favorite: FavoriteDetail) -> (StatusCode, Json<FavoriteCreated>) {
    let message = format!(
        "{} added to favorites successfully",
        favorite.target().label()
    );
    (StatusCode::CREATED, Json(FavoriteCreated { message, favorite }))
}

fn removed(target: FavoriteTarget) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("Favorite {} deleted successfully", target.resource()),
    })
}

/// GET /users/favorites
async fn list_favorites(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<FavoriteDetail>>, ApiError> {
    let favorites = FavoriteService::new(state.store.as_ref()).list(user).await?;
    Ok(Json(favorites))
}

/// POST /favorite/planet/{id}
async fn add_planet(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidId(planet): ValidId<PlanetId>,
) -> Result<(StatusCode, Json<FavoriteCreated>), ApiError> {
    let favorite = FavoriteService::new(state.store.as_ref())
        .add_planet(user, planet)
        .await?;
    Ok(created(favorite))
}

/// DELETE /favorite/planet/{id}
async fn remove_planet(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidId(planet): ValidId<PlanetId>,
) -> Result<Json<MessageResponse>, ApiError> {
    FavoriteService::new(state.store.as_ref())
        .remove_planet(user, planet)
        .await?;
    Ok(removed(FavoriteTarget::Planet(planet)))
}

/// POST /favorite/people/{id}
async fn add_person(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidId(person): ValidId<PersonId>,
) -> Result<(StatusCode, Json<FavoriteCreated>), ApiError> {
    let favorite = FavoriteService::new(state.store.as_ref())
        .add_person(user, person)
        .await?;
    Ok(created(favorite))
}

/// DELETE /favorite/people/{id}
async fn remove_person(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidId(person): ValidId<PersonId>,
) -> Result<Json<MessageResponse>, ApiError> {
    FavoriteService::new(state.store.as_ref())
        .remove_person(user, person)
        .await?;
    Ok(removed(FavoriteTarget::Person(person)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/favorites", get(list_favorites))
        .route("/favorite/planet/{id}", post(add_planet).delete(remove_planet))
        .route("/favorite/people/{id}", post(add_person).delete(remove_person))
}
