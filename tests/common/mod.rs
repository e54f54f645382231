#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use clickearn_service::auth::provider::IdentityProvider;
use clickearn_service::config::Config;
use clickearn_service::routes::create_router;
use clickearn_service::AppState;
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use tower::ServiceExt;

// ─── TestResponse ────────────────────────────────────────────────────────────

pub struct TestResponse {
    pub status: StatusCode,
    body_bytes: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body_bytes).to_string()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body_bytes).unwrap_or_else(|e| {
            panic!(
                "Failed to deserialize response as {}: {e}\nBody: {}",
                std::any::type_name::<T>(),
                self.text()
            )
        })
    }

    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status, expected,
            "Expected status {expected}, got {}. Body: {}",
            self.status,
            self.text()
        );
    }

    pub fn session_token(&self) -> String {
        let json: serde_json::Value = self.json();
        json["session_token"]
            .as_str()
            .expect("response has no session_token")
            .to_string()
    }
}

// ─── TestApp ─────────────────────────────────────────────────────────────────

pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        // Endpoint is never reached unless a test overrides it.
        Self::build("http://127.0.0.1:1/session-data".to_string(), None).await
    }

    pub async fn with_oauth_endpoint(oauth_userinfo_url: String) -> Self {
        Self::build(oauth_userinfo_url, None).await
    }

    pub async fn with_payout_url(payout_url: String) -> Self {
        Self::build(
            "http://127.0.0.1:1/session-data".to_string(),
            Some(payout_url),
        )
        .await
    }

    async fn build(oauth_userinfo_url: String, payout_url: Option<String>) -> Self {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            session_ttl_days: 7,
            verification_code_ttl_secs: 300,
            oauth_userinfo_url,
            payout_url,
        };

        // A pooled in-memory SQLite would open one private database per
        // connection; pin the pool to a single shared connection.
        let mut options = ConnectOptions::new(config.database_url.clone());
        options.max_connections(1).min_connections(1);

        let db = Database::connect(options)
            .await
            .expect("Failed to connect to in-memory SQLite");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let provider = IdentityProvider::new(&config);
        let state = AppState {
            db,
            config,
            provider,
        };

        let router = create_router(state.clone());

        Self { router, state }
    }

    pub async fn request(&self, req: Request<Body>) -> TestResponse {
        let resp = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("oneshot failed");

        let status = resp.status();
        let body_bytes = resp
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes()
            .to_vec();

        TestResponse { status, body_bytes }
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(token) = token {
            builder = builder.header("X-Session-Token", token);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(
        &self,
        path: &str,
        token: Option<&str>,
        body: &serde_json::Value,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("X-Session-Token", token);
        }
        self.request(
            builder
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
    }

    // ── Auth helpers ─────────────────────────────────────────────────────

    pub async fn register(
        &self,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        password: &str,
    ) -> TestResponse {
        let body = serde_json::json!({
            "name": name,
            "email": email,
            "phone": phone,
            "password": password,
        });
        self.post_json("/api/auth/register", None, &body).await
    }

    pub async fn login(&self, identifier: &str, password: &str) -> TestResponse {
        let body = serde_json::json!({
            "identifier": identifier,
            "password": password,
        });
        self.post_json("/api/auth/login", None, &body).await
    }

    /// Registers an email account and returns its session token.
    pub async fn register_member(&self, email: &str) -> String {
        let resp = self
            .register("Member", Some(email), None, "Password1!")
            .await;
        resp.assert_status(StatusCode::OK);
        resp.session_token()
    }

    // ── Earning helpers ──────────────────────────────────────────────────

    pub async fn click(&self, token: &str, content_id: &str) -> TestResponse {
        let body = serde_json::json!({ "content_id": content_id });
        self.post_json("/api/click", Some(token), &body).await
    }

    pub async fn complete_video(
        &self,
        token: &str,
        video_id: &str,
        watch_duration_seconds: u32,
    ) -> TestResponse {
        let body = serde_json::json!({
            "video_id": video_id,
            "watch_duration_seconds": watch_duration_seconds,
        });
        self.post_json("/api/video/complete", Some(token), &body)
            .await
    }

    pub async fn withdraw(
        &self,
        token: &str,
        amount_cents: i64,
        destination: &str,
    ) -> TestResponse {
        let body = serde_json::json!({
            "amount_cents": amount_cents,
            "destination": destination,
        });
        self.post_json("/api/withdraw", Some(token), &body).await
    }
}
