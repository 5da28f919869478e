//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Panics turned into JSON 500s
//! - Graceful shutdown on SIGTERM/Ctrl+C, then the pool is closed

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5000)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_permissive: false,
        }
    }
}

/// Context handed to every handler.
///
/// Owns the pool for the lifetime of the server; each request borrows a
/// connection from it for one query or one transaction.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the application router with all routes.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        let port = config.bind_addr.port();
        let origins: Vec<HeaderValue> = ["localhost", "127.0.0.1"]
            .iter()
            .filter_map(|host| HeaderValue::from_str(&format!("http://{}:{}", host, port)).ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(CorsAny)
            .allow_headers(CorsAny)
    };

    Router::new()
        .merge(routes::health::router())
        .merge(routes::home::router())
        .merge(routes::venues::router())
        .merge(routes::artists::router())
        .merge(routes::shows::router())
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let pool = connect(&database_url, &ShowbookConfig::load()?.database).await?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let state = AppState::new(pool.clone());
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        resource: "page",
        id: uri.path().to_owned(),
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "handler panicked".to_owned()
    };

    ApiError::Internal { message }.into_response()
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
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
    use axum::http::{Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    /// Pool that never connects; only for routes that don't touch the database.
    fn lazy_app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/showbook_unused")
            .expect("lazy pool");
        build_router(AppState::new(pool), &ServerConfig::default())
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 5000);
        assert!(!config.cors_permissive);
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let response = lazy_app()
            .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["status"], 404);
    }

    #[tokio::test]
    async fn non_numeric_id_is_404() {
        for uri in ["/venues/abc", "/artists/1.5", "/venues/x/edit"] {
            let response = lazy_app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[tokio::test]
    async fn landing_page() {
        let response = lazy_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["name"], "showbook");
        assert!(body["sections"].as_array().unwrap().len() >= 3);
    }

    #[tokio::test]
    async fn create_forms_render_without_database() {
        let response = lazy_app()
            .oneshot(
                Request::builder()
                    .uri("/venues/create")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["form"]["seeking_talent"], false);
        assert!(body["genre_choices"]
            .as_array()
            .unwrap()
            .iter()
            .any(|g| g == "Jazz"));

        let response = lazy_app()
            .oneshot(
                Request::builder()
                    .uri("/artists/create")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["form"]["seeking_venue"], false);
        assert_eq!(body["state_choices"].as_array().unwrap().len(), 51);

        let response = lazy_app()
            .oneshot(
                Request::builder()
                    .uri("/shows/create")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["form"]["start_time"].is_string());
    }

    #[tokio::test]
    async fn invalid_venue_submission_fails_before_storage() {
        let response = lazy_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/venues/create")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("name=Hall&city=Austin"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["outcome"], "failure");
        assert_eq!(
            body["message"],
            "An error occurred. Venue Hall could not be listed."
        );
        assert_eq!(body["redirect_to"], "/");
    }

    #[tokio::test]
    async fn nameless_venue_message_has_no_gap() {
        let response = lazy_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/venues/create")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("city=Austin"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(
            body["message"],
            "An error occurred. Venue could not be listed."
        );
    }

    #[tokio::test]
    async fn invalid_show_submission_fails_before_storage() {
        let response = lazy_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/shows/create")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("venue_id=1&artist_id=2&start_time=someday"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["message"], "An error occurred. Show could not be listed.");
        assert!(body["detail"].as_str().unwrap().contains("start_time"));
    }

    #[tokio::test]
    async fn form_without_content_type_is_400() {
        let response = lazy_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/artists/search")
                    .body(Body::from("search_term=x"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "validation_error");
    }
}
