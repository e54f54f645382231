use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::rate_limit::{rate_limit_middleware, RateLimiter};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Credential endpoints: 20 requests per 60 seconds per client IP
    // (login/register/code brute-force protection)
    let auth_limiter = RateLimiter::new(20, Duration::from_secs(60));

    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/oauth/callback", post(handlers::auth::oauth_callback))
        .route("/logout", post(handlers::auth::logout))
        .route("/send-code", post(handlers::auth::send_verification_code))
        .route("/verify-code", post(handlers::auth::verify_code))
        .route_layer(middleware::from_fn_with_state(
            auth_limiter,
            rate_limit_middleware,
        ));

    // Earning and payout endpoints (require X-Session-Token)
    let earn_routes = Router::new()
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/content", get(handlers::rewards::list_content))
        .route("/videos", get(handlers::rewards::list_videos))
        .route("/click", post(handlers::rewards::register_click))
        .route(
            "/video/complete",
            post(handlers::rewards::register_video_completion),
        )
        .route("/withdraw", post(handlers::withdraw::request_withdrawal))
        .route("/withdraw-history", get(handlers::withdraw::withdraw_history));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api", earn_routes)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}
