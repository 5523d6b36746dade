pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod journal;
pub mod models;
pub mod routes;
pub mod store;

use std::time::Duration;

use axum::http::{header, HeaderValue};
use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::{Config, IdentityConfig};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub identity: IdentityConfig,
    /// Cancelled on shutdown; commands run under a child token.
    pub shutdown: CancellationToken,
}

async fn health() -> &'static str {
    "ok"
}

/// Build the full Axum application router.
///
/// Caller is responsible for running database migrations on `pool` beforehand.
/// Paths outside the API fall through to the built frontend in
/// `config.static_dir`.
pub fn build_app(pool: SqlitePool, config: &Config, shutdown: CancellationToken) -> Router {
    let state = AppState {
        db: pool,
        identity: config.identity.clone(),
        shutdown,
    };

    Router::new()
        .route("/health", get(health))
        .merge(routes::entries::router())
        .fallback_service(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=86400"),
                ))
                .service(ServeDir::new(&config.static_dir)),
        )
        .layer(cors_layer(&config.allowed_origins))
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(_) if origin == "*" => {
                tracing::warn!("Ignoring wildcard CORS origin, credentials are allowed");
                None
            }
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{origin}': {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_layer_skips_wildcard_origin() {
        let origins = vec!["*".to_string(), "http://localhost:3000".to_string()];
        let _ = cors_layer(&origins);
    }

    #[test]
    fn cors_layer_skips_invalid_origin() {
        let origins = vec!["http://bad\norigin".to_string()];
        let _ = cors_layer(&origins);
    }
}
