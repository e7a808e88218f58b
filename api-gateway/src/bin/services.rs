//! Service Catalog Lambda - Exposes the salon menu.
//!
//! Endpoints:
//! - GET /services - List bookable services
//! - GET /services/{name} - Service detail with a fee preview

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Serialize;
use shared::{json_response, ApiResponse, FeeBreakdown, FeeSchedule, SalonService, ServiceCatalog};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Service detail response
#[derive(Debug, Serialize)]
struct ServiceDetailResponse {
    service: SalonService,
    fee_preview: FeeBreakdown,
}

/// Application state
struct AppState {
    catalog: ServiceCatalog,
    schedule: FeeSchedule,
}

impl AppState {
    fn new() -> Self {
        Self {
            catalog: ServiceCatalog::default(),
            schedule: FeeSchedule::default(),
        }
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let path = event.uri().path();
    let method = event.method().as_str();

    info!("Received request: method={}, path={}", method, path);

    match (method, path) {
        ("GET", "/services") => Ok(json_response(
            200,
            &ApiResponse::success(serde_json::json!({
                "count": state.catalog.services.len(),
                "services": state.catalog.services,
            })),
        )?),

        ("GET", _) if path.starts_with("/services/") => {
            let raw_name = path.trim_start_matches("/services/");
            let name = urlencoding::decode(raw_name)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw_name.to_string());

            match state.catalog.find(&name) {
                Some(service) => Ok(json_response(
                    200,
                    &ApiResponse::success(ServiceDetailResponse {
                        service: service.clone(),
                        fee_preview: state.schedule.calculate(service.price),
                    }),
                )?),
                None => Ok(json_response(
                    404,
                    &ApiResponse::<()>::error(format!("Unknown service: {name}")),
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

    let state = Arc::new(AppState::new());

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
