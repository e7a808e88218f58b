//! Status Lambda - Service banner and environment checks.
//!
//! Endpoints:
//! - GET / - Running banner with environment status and next steps
//! - GET /env-check - Which credentials are configured
//! - GET /health - Database reachability

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::{db, json_response, ApiResponse, Config};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state
struct AppState {
    config: Config,
    db_pool: SqlitePool,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env();
        let db_pool = db::create_pool(&config).await?;
        db::init_schema(&db_pool).await?;

        Ok(Self { config, db_pool })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let path = event.uri().path();
    let method = event.method().as_str();

    info!("Received request: method={}, path={}", method, path);

    match (method, path) {
        ("GET", "/") => Ok(json_response(
            200,
            &ApiResponse::success(serde_json::json!({
                "message": "\u{1F680} Perfect Booking Agent is running!",
                "status": "active",
                "environment_status": state.config.env_status(),
                "next_steps": [
                    "1. Add API keys to the environment",
                    "2. Connect the WhatsApp webhook",
                    "3. Test messaging",
                ],
            })),
        )?),

        ("GET", "/env-check") => Ok(json_response(
            200,
            &ApiResponse::success(state.config.env_status()),
        )?),

        ("GET", "/health") => {
            match sqlx::query_scalar::<_, i64>("SELECT 1")
                .fetch_one(&state.db_pool)
                .await
            {
                Ok(_) => Ok(json_response(
                    200,
                    &ApiResponse::success(serde_json::json!({
                        "status": "healthy",
                        "database": "reachable",
                    })),
                )?),
                Err(e) => Ok(json_response(
                    503,
                    &ApiResponse::<()>::error(format!("Database unreachable: {e}")),
                )?),
            }
        }

        _ => Ok(json_response(404, &ApiResponse::<()>::error("Not found"))?),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
