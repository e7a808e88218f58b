//! Booking Lambda - Handles the booking lifecycle.
//!
//! Endpoints:
//! - POST /bookings - Create a booking (fees computed, confirmation rendered)
//! - GET /bookings - List recent bookings
//! - GET /bookings/{id} - Get a booking with its confirmation text
//! - DELETE /bookings/{id} - Cancel a booking

use chrono::Utc;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use rust_decimal::Decimal;
use shared::confirmation::render_confirmation;
use shared::models::{BookingResponse, BookingRow, DEFAULT_SALON};
use shared::{
    db, failure_response, json_response, parse_query, ApiResponse, BookingRecord, Config,
    CreateBookingRequest, FeeSchedule, ServiceCatalog,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use validator::Validate;

const BOOKING_COLUMNS: &str = "id, reference, customer_phone, service, salon, date, time, \
                               duration_minutes, stylist, service_price, booking_fee_amount, \
                               tax_amount, total_booking_fee, amount_payable_at_salon, status, \
                               created_at";

/// Application state
struct AppState {
    db_pool: SqlitePool,
    catalog: ServiceCatalog,
    schedule: FeeSchedule,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env();
        let db_pool = db::create_pool(&config).await?;
        db::init_schema(&db_pool).await?;

        Ok(Self {
            db_pool,
            catalog: ServiceCatalog::default(),
            schedule: FeeSchedule::default(),
        })
    }

    fn booking_fee_percentage(&self) -> Decimal {
        self.schedule.booking_fee_rate * Decimal::ONE_HUNDRED
    }
}

async fn insert_booking(pool: &SqlitePool, record: &BookingRecord) -> Result<(), shared::Error> {
    sqlx::query(
        r#"
        INSERT INTO bookings (
            id, reference, customer_phone, service, salon, date, time,
            duration_minutes, stylist, service_price, booking_fee_amount,
            tax_amount, total_booking_fee, amount_payable_at_salon,
            status, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(record.id.to_string())
    .bind(&record.reference)
    .bind(&record.customer_phone)
    .bind(&record.service)
    .bind(&record.salon)
    .bind(&record.date)
    .bind(&record.time)
    .bind(record.duration_minutes)
    .bind(&record.stylist)
    .bind(record.fees.service_price.to_string())
    .bind(record.fees.booking_fee_amount.to_string())
    .bind(record.fees.tax_amount.to_string())
    .bind(record.fees.total_booking_fee.to_string())
    .bind(record.fees.amount_payable_at_salon.to_string())
    .bind(&record.status)
    .bind(record.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

async fn fetch_booking(
    state: &AppState,
    id: &Uuid,
) -> Result<Option<BookingRecord>, shared::Error> {
    let row: Option<BookingRow> =
        sqlx::query_as(&format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&state.db_pool)
            .await?;

    row.map(|row| row.into_record(state.booking_fee_percentage(), state.schedule.tax_rate))
        .transpose()
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let path = event.uri().path();
    let method = event.method().as_str();

    info!("Received request: method={}, path={}", method, path);

    match (method, path) {
        ("POST", "/bookings") => {
            let request: CreateBookingRequest = shared::parse_body!(event.body());

            if let Err(e) = request.validate() {
                return Ok(json_response(
                    400,
                    &ApiResponse::<()>::error(format!("Invalid booking request: {e}")),
                )?);
            }

            let service = match state.catalog.find(&request.service) {
                Some(service) => service.clone(),
                None => {
                    return Ok(json_response(
                        404,
                        &ApiResponse::<()>::error(format!("Unknown service: {}", request.service)),
                    )?);
                }
            };

            let id = Uuid::new_v4();
            let record = BookingRecord {
                id,
                reference: BookingRecord::reference_from(&id),
                customer_phone: request.customer_phone,
                service: service.name,
                salon: request.salon.unwrap_or_else(|| DEFAULT_SALON.to_string()),
                date: request.date,
                time: request.time,
                duration_minutes: service.duration_minutes,
                stylist: request.stylist,
                fees: state.schedule.calculate(service.price),
                status: "confirmed".to_string(),
                created_at: Utc::now(),
            };

            if let Err(e) = insert_booking(&state.db_pool, &record).await {
                return Ok(failure_response(&e)?);
            }

            info!("Created booking {} for {}", record.reference, record.service);

            let confirmation = render_confirmation(&record.details(), &record.fees);
            Ok(json_response(
                201,
                &ApiResponse::success(BookingResponse {
                    booking: record,
                    confirmation,
                }),
            )?)
        }

        ("GET", "/bookings") => {
            let params = parse_query(event.uri().query().unwrap_or_default());
            let limit: i64 = params
                .get("limit")
                .and_then(|l| l.parse().ok())
                .unwrap_or(20);

            let rows: Vec<BookingRow> = match sqlx::query_as(&format!(
                "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC LIMIT ?"
            ))
            .bind(limit)
            .fetch_all(&state.db_pool)
            .await
            {
                Ok(rows) => rows,
                Err(e) => return Ok(failure_response(&shared::Error::Database(e))?),
            };

            let bookings: Result<Vec<BookingRecord>, shared::Error> = rows
                .into_iter()
                .map(|row| row.into_record(state.booking_fee_percentage(), state.schedule.tax_rate))
                .collect();

            match bookings {
                Ok(bookings) => Ok(json_response(
                    200,
                    &ApiResponse::success(serde_json::json!({
                        "count": bookings.len(),
                        "bookings": bookings,
                    })),
                )?),
                Err(e) => Ok(failure_response(&e)?),
            }
        }

        _ if path.starts_with("/bookings/") => {
            let id = match Uuid::parse_str(path.trim_start_matches("/bookings/")) {
                Ok(id) => id,
                Err(_) => {
                    return Ok(json_response(
                        400,
                        &ApiResponse::<()>::error("Invalid booking id"),
                    )?);
                }
            };

            match method {
                "GET" => match fetch_booking(&state, &id).await {
                    Ok(Some(record)) => {
                        let confirmation = render_confirmation(&record.details(), &record.fees);
                        Ok(json_response(
                            200,
                            &ApiResponse::success(BookingResponse {
                                booking: record,
                                confirmation,
                            }),
                        )?)
                    }
                    Ok(None) => Ok(json_response(
                        404,
                        &ApiResponse::<()>::error("Booking not found"),
                    )?),
                    Err(e) => Ok(failure_response(&e)?),
                },

                // Cancelling twice is a no-op that reports the stored record.
                "DELETE" => {
                    let updated = sqlx::query("UPDATE bookings SET status = 'cancelled' WHERE id = ?")
                        .bind(id.to_string())
                        .execute(&state.db_pool)
                        .await;

                    if let Err(e) = updated {
                        return Ok(failure_response(&shared::Error::Database(e))?);
                    }

                    match fetch_booking(&state, &id).await {
                        Ok(Some(record)) => {
                            info!("Cancelled booking {}", record.reference);
                            Ok(json_response(200, &ApiResponse::success(record))?)
                        }
                        Ok(None) => Ok(json_response(
                            404,
                            &ApiResponse::<()>::error("Booking not found"),
                        )?),
                        Err(e) => Ok(failure_response(&e)?),
                    }
                }

                _ => Ok(json_response(
                    405,
                    &ApiResponse::<()>::error("Method not allowed"),
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_state() -> Arc<AppState> {
        // One connection: sqlite::memory: is per-connection.
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        db::init_schema(&db_pool).await.expect("schema");

        Arc::new(AppState {
            db_pool,
            catalog: ServiceCatalog::default(),
            schedule: FeeSchedule::default(),
        })
    }

    fn request(method: &str, uri: &str, body: Body) -> Request {
        lambda_http::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .unwrap()
    }

    async fn create_booking(state: &Arc<AppState>) -> Value {
        let payload = json!({
            "service": "Haircut",
            "date": "2026-09-01",
            "time": "10:00",
            "customer_phone": "whatsapp:+14155550100",
        });
        let response = handler(
            Arc::clone(state),
            request("POST", "/bookings", Body::Text(payload.to_string())),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 201);
        serde_json::from_slice(response.body().as_ref()).unwrap()
    }

    #[tokio::test]
    async fn create_computes_fees_and_confirmation() {
        let state = test_state().await;
        let body = create_booking(&state).await;

        let booking = &body["data"]["booking"];
        assert_eq!(booking["fees"]["booking_fee_amount"], "4.50");
        assert_eq!(booking["fees"]["total_booking_fee"], "4.86");
        assert_eq!(booking["fees"]["amount_payable_at_salon"], "40.50");
        assert_eq!(booking["status"], "confirmed");
        assert!(booking["reference"].as_str().unwrap().starts_with("BK-"));

        let confirmation = body["data"]["confirmation"].as_str().unwrap();
        assert!(confirmation.contains("$4.86"));
        assert!(confirmation.contains("$40.50"));
        assert!(confirmation.contains(booking["reference"].as_str().unwrap()));
    }

    #[tokio::test]
    async fn create_rejects_unknown_service() {
        let state = test_state().await;
        let payload = json!({"service": "Beard Trim", "date": "2026-09-01", "time": "10:00"});
        let response = handler(
            state,
            request("POST", "/bookings", Body::Text(payload.to_string())),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload() {
        let state = test_state().await;
        let payload = json!({"service": "", "date": "2026-09-01", "time": "10:00"});
        let response = handler(
            Arc::clone(&state),
            request("POST", "/bookings", Body::Text(payload.to_string())),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 400);

        let response = handler(
            state,
            request("POST", "/bookings", Body::Text("not json".to_string())),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn fetch_and_list_round_trip() {
        let state = test_state().await;
        let created = create_booking(&state).await;
        let id = created["data"]["booking"]["id"].as_str().unwrap().to_string();

        let response = handler(
            Arc::clone(&state),
            request("GET", &format!("/bookings/{id}"), Body::Empty),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = serde_json::from_slice(response.body().as_ref()).unwrap();
        assert_eq!(body["data"]["booking"]["id"], id.as_str());

        let response = handler(Arc::clone(&state), request("GET", "/bookings", Body::Empty))
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(response.body().as_ref()).unwrap();
        assert_eq!(body["data"]["count"], 1);
    }

    #[tokio::test]
    async fn cancel_marks_the_booking_cancelled() {
        let state = test_state().await;
        let created = create_booking(&state).await;
        let id = created["data"]["booking"]["id"].as_str().unwrap().to_string();

        let response = handler(
            Arc::clone(&state),
            request("DELETE", &format!("/bookings/{id}"), Body::Empty),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = serde_json::from_slice(response.body().as_ref()).unwrap();
        assert_eq!(body["data"]["status"], "cancelled");

        // Cancelling again reports the same stored record.
        let response = handler(
            state,
            request("DELETE", &format!("/bookings/{id}"), Body::Empty),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn unknown_booking_is_a_404() {
        let state = test_state().await;
        let response = handler(
            Arc::clone(&state),
            request(
                "GET",
                "/bookings/00000000-0000-0000-0000-00000000dead",
                Body::Empty,
            ),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 404);

        let response = handler(state, request("GET", "/bookings/not-a-uuid", Body::Empty))
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }
}
