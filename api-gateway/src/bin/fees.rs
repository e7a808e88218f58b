//! Fee Calculation Lambda - Quotes and confirmation previews.
//!
//! Endpoints:
//! - GET /fees/quote?price=120 - Fee breakdown for an explicit price
//! - GET /fees/quote?service=Haircut - Fee breakdown for a catalog service
//! - POST /fees/confirmation-preview - Render a confirmation from a booking record

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use rust_decimal::Decimal;
use serde_json::Value;
use shared::{
    confirmation::render_confirmation, failure_response, json_response, parse_query, ApiResponse,
    BookingDetails, FeeSchedule, ServiceCatalog,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

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

    /// Resolve a price from an explicit value or a catalog service name.
    fn resolve_price(&self, price: Option<&str>, service: Option<&str>) -> Result<Decimal, shared::Error> {
        if let Some(raw) = price {
            return raw
                .parse()
                .map_err(|_| shared::Error::Validation(format!("Invalid price: {raw}")));
        }

        let name = service.ok_or_else(|| {
            shared::Error::Validation("price or service parameter required".to_string())
        })?;

        self.catalog
            .find(name)
            .map(|service| service.price)
            .ok_or_else(|| shared::Error::NotFound(format!("Unknown service: {name}")))
    }
}

/// Price for a loose booking record: explicit `service_price` wins,
/// otherwise the catalog price for its `service`.
fn record_price(state: &AppState, record: &Value) -> Result<Decimal, shared::Error> {
    match record.get("service_price") {
        Some(Value::String(raw)) => raw
            .parse()
            .map_err(|_| shared::Error::Validation(format!("Invalid service_price: {raw}"))),
        Some(Value::Number(n)) => n
            .to_string()
            .parse()
            .map_err(|_| shared::Error::Validation(format!("Invalid service_price: {n}"))),
        Some(other) => Err(shared::Error::Validation(format!(
            "Invalid service_price: {other}"
        ))),
        None => {
            let service = record
                .get("service")
                .and_then(Value::as_str)
                .ok_or_else(|| shared::Error::MissingField("service".to_string()))?;
            state
                .catalog
                .find(service)
                .map(|s| s.price)
                .ok_or_else(|| shared::Error::NotFound(format!("Unknown service: {service}")))
        }
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let path = event.uri().path();
    let method = event.method().as_str();

    info!("Received request: method={}, path={}", method, path);

    match (method, path) {
        ("GET", "/fees/quote") => {
            let params = parse_query(event.uri().query().unwrap_or_default());
            let price = params.get("price").map(String::as_str);
            let service = params.get("service").map(String::as_str);

            match state.resolve_price(price, service) {
                Ok(price) => Ok(json_response(
                    200,
                    &ApiResponse::success(state.schedule.calculate(price)),
                )?),
                Err(e) => Ok(failure_response(&e)?),
            }
        }

        ("POST", "/fees/confirmation-preview") => {
            let record: Value = match shared::parse_json_body(event.body())? {
                Ok(parsed) => parsed,
                Err(response) => return Ok(response),
            };

            let details = match BookingDetails::from_json(&record) {
                Ok(details) => details,
                Err(e) => return Ok(failure_response(&e)?),
            };

            let price = match record_price(&state, &record) {
                Ok(price) => price,
                Err(e) => return Ok(failure_response(&e)?),
            };

            let fees = state.schedule.calculate(price);
            let confirmation = render_confirmation(&details, &fees);

            Ok(json_response(
                200,
                &ApiResponse::success(serde_json::json!({
                    "confirmation": confirmation,
                    "fees": fees,
                })),
            )?)
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
