#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use merit_journal::config::Config;
use merit_journal::journal::EntryView;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tokio_util::sync::CancellationToken;

pub const OWNER_HEADER: &str = "x-user-sub";

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
    pub shutdown: CancellationToken,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_vars(&[]).await
    }

    /// Build the app with extra config variables, e.g. `DEFAULT_OWNER_ID`.
    pub async fn with_vars(vars: &[(&str, &str)]) -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("Failed to create in-memory SQLite pool");

        merit_journal::db::migrate(&pool)
            .await
            .expect("Failed to run migrations");

        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = Config::from_vars(|key| {
            vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
        .unwrap();

        let shutdown = CancellationToken::new();
        let router = merit_journal::build_app(pool.clone(), &config, shutdown.clone());

        Self {
            router,
            db: pool,
            shutdown,
        }
    }

    /// Send a request through the app and return the response.
    pub async fn request(&self, req: Request<Body>) -> Response {
        tower::ServiceExt::oneshot(self.router.clone(), req)
            .await
            .unwrap()
    }

    /// Send a GET request as `owner`.
    pub async fn get(&self, uri: &str, owner: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(owner) = owner {
            builder = builder.header(OWNER_HEADER, owner);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// Send a JSON body with the given method as `owner`.
    pub async fn send_json(&self, method: &str, uri: &str, body: &Value, owner: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .uri(uri)
            .method(method)
            .header("content-type", "application/json");
        if let Some(owner) = owner {
            builder = builder.header(OWNER_HEADER, owner);
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();
        self.request(req).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value, owner: Option<&str>) -> Response {
        self.send_json("POST", uri, body, owner).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value, owner: Option<&str>) -> Response {
        self.send_json("PUT", uri, body, owner).await
    }

    /// Send a DELETE request as `owner`.
    pub async fn delete(&self, uri: &str, owner: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri).method("DELETE");
        if let Some(owner) = owner {
            builder = builder.header(OWNER_HEADER, owner);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// Create an entry through the API and return its view.
    pub async fn create_entry(&self, body: &Value, owner: &str) -> EntryView {
        let resp = self.post_json("/api/journal-entries", body, Some(owner)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        body_json(resp).await
    }

    pub async fn count(&self, sql: &str) -> i64 {
        let count: (i64,) = sqlx::query_as(sql).fetch_one(&self.db).await.unwrap();
        count.0
    }

    pub async fn tag_count(&self, owner: &str, name: &str) -> i64 {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tags WHERE user_id = ? AND name = ?")
            .bind(owner)
            .bind(name)
            .fetch_one(&self.db)
            .await
            .unwrap();
        count.0
    }
}

/// Read the full response body as a String.
pub async fn body_string(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read the full response body as JSON.
pub async fn body_json<T: serde::de::DeserializeOwned>(resp: Response) -> T {
    let body = body_string(resp).await;
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("Invalid JSON body {body:?}: {e}"))
}

/// Minimal valid create/update body.
pub fn entry_body(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "content": "<p>Helped a neighbour.</p>",
        "entryDate": "2025-06-15T00:00:00.000Z",
    })
}

/// Sorted copy of a tag list, for set comparisons.
pub fn sorted(tags: &[String]) -> Vec<String> {
    let mut tags = tags.to_vec();
    tags.sort();
    tags
}
