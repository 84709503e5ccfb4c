use dotenvy::dotenv;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use std::sync::Arc;

mod config;
mod db;
mod error;
mod schema;
mod handlers {
    pub mod contact_handlers;
}
mod models {
    pub mod membership_models;
}
mod repositories {
    pub mod membership_requests;
}
mod utils {
    pub mod rate_limit;
}

use config::Config;
use handlers::contact_handlers;
use repositories::membership_requests::MembershipRequests;
use utils::rate_limit::{self, ContactRateLimiter};

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    membership_requests: Arc<MembershipRequests>,
    rate_limiter: Arc<ContactRateLimiter>,
}

pub fn build_router(state: Arc<AppState>, frontend_url: Option<&str>) -> Router {
    let origin = match frontend_url.map(HeaderValue::from_str) {
        Some(Ok(origin)) => AllowOrigin::exact(origin),
        Some(Err(_)) => {
            tracing::warn!("FRONTEND_URL is not a valid origin, allowing any origin");
            AllowOrigin::from(Any)
        }
        None => AllowOrigin::from(Any),
    };

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/contact", post(contact_handlers::submit_contact))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(origin)
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .expose_headers([axum::http::header::CONTENT_TYPE])
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let pool = db::establish_pool(&config.database_url, 8)?;
    db::run_migrations(&pool)?;

    let rate_limiter = Arc::new(ContactRateLimiter::per_hour(config.requests_per_hour));
    rate_limit::spawn_eviction(rate_limiter.clone(), rate_limit::EVICTION_INTERVAL);

    let state = Arc::new(AppState {
        membership_requests: Arc::new(MembershipRequests::new(pool)),
        rate_limiter,
    });

    let app = build_router(state, config.frontend_url.as_deref());

    use tokio::net::TcpListener;

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Contact service listening on {}", config.bind_addr);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
