//! Custom Axum extractors

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::models::{parse_row_id, UserId, ValidationError};
use super::error::ApiError;
use super::server::AppState;

/// Extract and validate a row id from the path
pub struct ValidId<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidId<T>
where
    S: Send + Sync,
    T: From<i32> + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let id = parse_row_id(&raw)?;
        Ok(Self(T::from(id)))
    }
}

/// The user a favorites request acts for.
///
/// Resolved from server configuration; there is no authentication layer.
pub struct CurrentUser(pub UserId);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.acting_user))
    }
}
