//! Endpoint index

use axum::{routing::get, Json, Router};
use serde::Serialize;

use super::{Endpoint, ENDPOINTS};

#[derive(Serialize)]
pub struct IndexResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [Endpoint],
}

/// GET /
async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS,
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_every_endpoint() {
        let Json(body) = index().await;
        assert_eq!(body.endpoints.len(), ENDPOINTS.len());
        assert!(body
            .endpoints
            .iter()
            .any(|e| e.method == "DELETE" && e.path == "/favorite/people/{id}"));
    }
}
