//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing and request timeout middleware
//! - Trailing slashes trimmed before routing
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::http::{HeaderValue, Method, StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use crate::db::Store;
use crate::models::UserId;

const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3000)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,

    /// User on whose behalf favorites requests run
    pub acting_user: UserId,

    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_permissive: false,
            acting_user: UserId(1),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub acting_user: UserId,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: &ServerConfig) -> Self {
        Self {
            store,
            acting_user: config.acting_user,
        }
    }
}

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(LOCAL_ORIGINS.map(HeaderValue::from_static))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Unmatched paths get the same JSON error shape as everything else.
async fn fallback(uri: Uri) -> ApiError {
    ApiError::NotFound {
        message: format!("no route for {}", uri.path()),
    }
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed {
        message: format!("{} not allowed on {}", method, uri.path()),
    }
}

/// Slow requests are cut off with 408 and an empty body.
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Router with every route and middleware layer, without path normalization.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .merge(routes::index::router())
        .merge(routes::health::router())
        .merge(routes::catalog::router())
        .merge(routes::favorites::router())
        .fallback(fallback)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(timeout_layer(config.request_timeout))
        .layer(cors_layer(config.cors_permissive))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// The complete service: `/planets/` is routed as `/planets`.
///
/// Normalization has to wrap the router; as a router layer it would run
/// after route matching.
pub fn app(state: AppState, config: &ServerConfig) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, config))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(PgStore::new(create_pool(&database_url).await?));
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(store: Arc<dyn Store>, config: ServerConfig) -> Result<(), ServerError> {
    let state = AppState::new(store, &config);
    tracing::info!(acting_user = %state.acting_user, "favorites act for configured user");

    let app = app(state, &config);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    serve(listener, app, shutdown_signal()).await
}

/// Serve `app` on `listener` until `shutdown` resolves.
async fn serve<F>(
    listener: TcpListener,
    app: NormalizePath<Router>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, axum::ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tower::ServiceExt;

    use crate::db::MemoryStore;
    use crate::seed::SeedData;

    struct TestApp {
        store: Arc<MemoryStore>,
        service: NormalizePath<Router>,
    }

    async fn seeded_app() -> TestApp {
        let store = Arc::new(MemoryStore::new());
        SeedData::bundled()
            .unwrap()
            .apply(store.as_ref())
            .await
            .unwrap();
        app_with(store)
    }

    fn app_with(store: Arc<MemoryStore>) -> TestApp {
        let config = ServerConfig::default();
        let state = AppState::new(store.clone(), &config);
        TestApp {
            store,
            service: app(state, &config),
        }
    }

    impl TestApp {
        async fn send(&self, method: Method, uri: &str) -> (StatusCode, Value) {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let response = self.service.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, body)
        }

        async fn get(&self, uri: &str) -> (StatusCode, Value) {
            self.send(Method::GET, uri).await
        }
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(!config.cors_permissive);
        assert_eq!(config.acting_user, UserId(1));
    }

    #[tokio::test]
    async fn health_reports_storage() {
        let app = seeded_app().await;
        let (status, body) = app.get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "ok");
    }

    #[tokio::test]
    async fn index_lists_endpoints() {
        let app = seeded_app().await;
        let (status, body) = app.get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["endpoints"].as_array().unwrap().len(),
            routes::ENDPOINTS.len()
        );
    }

    #[tokio::test]
    async fn lists_catalog() {
        let app = seeded_app().await;

        let (status, body) = app.get("/planets").await;
        assert_eq!(status, StatusCode::OK);
        let planets = body.as_array().unwrap();
        assert_eq!(planets.len(), 6);
        assert_eq!(planets[0]["name"], "Tatooine");

        let (status, body) = app.get("/people").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p["name"] == "Luke Skywalker"));
    }

    #[tokio::test]
    async fn users_never_expose_password() {
        let app = seeded_app().await;
        let (status, body) = app.get("/users").await;
        assert_eq!(status, StatusCode::OK);
        let user = &body.as_array().unwrap()[0];
        assert_eq!(user["email"], "luke@rebellion.org");
        assert!(user.get("password").is_none());
    }

    #[tokio::test]
    async fn empty_catalog_is_not_found() {
        let app = app_with(Arc::new(MemoryStore::new()));
        for uri in ["/people", "/planets", "/users"] {
            let (status, body) = app.get(uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"], "not_found");
        }
    }

    #[tokio::test]
    async fn gets_single_records() {
        let app = seeded_app().await;

        let (status, body) = app.get("/planets/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "id": 1,
                "name": "Tatooine",
                "population": 200000,
                "terrain": "desert",
                "climate": "arid"
            })
        );

        let (status, body) = app.get("/people/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "id": 1,
                "name": "Luke Skywalker",
                "height": 172,
                "mass": 77,
                "hair_color": "blond",
                "skin_color": "fair",
                "eye_color": "blue",
                "birth_year": "19BBY",
                "gender": "male"
            })
        );
    }

    #[tokio::test]
    async fn every_planet_matches_its_fixture() {
        let app = seeded_app().await;
        let planets = SeedData::bundled().unwrap().planets;

        for (index, planet) in planets.into_iter().enumerate() {
            let id = index + 1;
            let (status, body) = app.get(&format!("/planets/{id}")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                body,
                json!({
                    "id": id,
                    "name": planet.name,
                    "population": planet.population,
                    "terrain": planet.terrain,
                    "climate": planet.climate
                }),
                "planet {id}"
            );
        }
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = seeded_app().await;
        let (status, body) = app.get("/planets/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "planet 999 not found");
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        let app = seeded_app().await;
        for uri in [
            "/planets/abc",
            "/planets/+1",
            "/planets/01",
            "/people/-4",
            "/people/99999999999",
            "/favorite/planet/1.5",
        ] {
            let method = if uri.starts_with("/favorite") {
                Method::POST
            } else {
                Method::GET
            };
            let (status, body) = app.send(method, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "validation_error");
        }
    }

    #[tokio::test]
    async fn trailing_slash_is_ignored() {
        let app = seeded_app().await;
        let (status, _) = app.get("/planets/").await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = app.get("/people/1/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Luke Skywalker");
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let app = seeded_app().await;
        let (status, body) = app.get("/starships").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn favorites_start_empty() {
        let app = seeded_app().await;
        let (status, body) = app.get("/users/favorites").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn favorite_planet_lifecycle() {
        let app = seeded_app().await;

        let (status, body) = app.send(Method::POST, "/favorite/planet/1").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Planet added to favorites successfully");
        assert_eq!(body["favorite"]["planet_id"], 1);
        assert_eq!(body["favorite"]["planet"]["name"], "Tatooine");
        assert!(body["favorite"].get("people_id").is_none());

        let (status, body) = app.send(Method::POST, "/favorite/planet/1").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");

        let (_, body) = app.get("/users/favorites").await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = app.send(Method::DELETE, "/favorite/planet/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Favorite planet deleted successfully");

        let (status, _) = app.send(Method::DELETE, "/favorite/planet/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = app.get("/users/favorites").await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn favorite_person_lifecycle() {
        let app = seeded_app().await;

        let (status, body) = app.send(Method::POST, "/favorite/people/1").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Person added to favorites successfully");
        assert_eq!(body["favorite"]["people_id"], 1);
        assert_eq!(body["favorite"]["person"]["name"], "Luke Skywalker");

        // Planet 1 is a different favorite than person 1
        let (status, _) = app.send(Method::POST, "/favorite/planet/1").await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = app.send(Method::DELETE, "/favorite/people/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Favorite person deleted successfully");

        let (_, body) = app.get("/users/favorites").await;
        let remaining = body.as_array().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["planet_id"], 1);
    }

    #[tokio::test]
    async fn favorite_of_missing_target_is_not_found() {
        let app = seeded_app().await;
        let (status, body) = app.send(Method::POST, "/favorite/people/404").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "person 404 not found");

        let (_, body) = app.get("/users/favorites").await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn favorites_without_acting_user_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let data = SeedData {
            users: Vec::new(),
            ..SeedData::bundled().unwrap()
        };
        data.apply(store.as_ref()).await.unwrap();
        let app = app_with(store);

        let (status, body) = app.get("/users/favorites").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "user 1 not found");

        let (status, _) = app.send(Method::POST, "/favorite/planet/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn storage_failure_is_opaque_500() {
        let app = seeded_app().await;
        app.store.fail_writes(true);

        let (status, body) = app.send(Method::POST, "/favorite/planet/2").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "an internal error occurred");

        app.store.fail_writes(false);
        let (_, body) = app.get("/users/favorites").await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn wrong_method_is_rejected() {
        let app = seeded_app().await;
        let (status, body) = app.send(Method::DELETE, "/planets/1").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "method_not_allowed");
        assert_eq!(body["message"], "DELETE not allowed on /planets/1");
    }

    #[tokio::test]
    async fn slow_request_times_out() {
        let router = Router::new()
            .route(
                "/slow",
                axum::routing::get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .layer(timeout_layer(Duration::from_millis(20)));

        let response = router
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn serves_over_tcp_until_shutdown() {
        let app = seeded_app().await;
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, app.service.clone(), async move {
            stopped.await.ok();
        }));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /planets/ HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.contains("Tatooine"));

        stop.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
