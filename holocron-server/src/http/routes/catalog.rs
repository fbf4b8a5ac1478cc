//! Catalog routes: people, planets, users
//!
//! GET /people, /people/{id}, /planets, /planets/{id}, /users

use std::sync::Arc;

use axum::extract::State;
use axum::{routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;
use crate::models::{Person, Planet, User};
use crate::service::catalog::{self as service, CatalogEntity};

/// GET /{collection}
async fn list_records<E: CatalogEntity>(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<E>>, ApiError> {
    let records = service::list_all::<E>(state.store.as_ref()).await?;
    Ok(Json(records))
}

/// GET /{collection}/{id}
async fn get_record<E: CatalogEntity>(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId<E::Id>,
) -> Result<Json<E>, ApiError> {
    let record = service::get_by_id::<E>(state.store.as_ref(), id).await?;
    Ok(Json(record))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/people", get(list_records::<Person>))
        .route("/people/{id}", get(get_record::<Person>))
        .route("/planets", get(list_records::<Planet>))
        .route("/planets/{id}", get(get_record::<Planet>))
        .route("/users", get(list_records::<User>))
}
