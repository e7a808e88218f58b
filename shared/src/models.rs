//! Shared data models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::confirmation::BookingDetails;
use crate::error::{Error, Result};
use crate::fees::FeeBreakdown;

/// Salon used when a booking request does not name one.
pub const DEFAULT_SALON: &str = "Perfect Cuts Studio";

/// Standard API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Which credentials are configured, as reported by the status endpoints.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnvStatus {
    pub deepseek_key_loaded: bool,
    pub twilio_sid_loaded: bool,
    pub twilio_token_loaded: bool,
    pub twilio_number_loaded: bool,
}

/// Create booking request payload.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, message = "service is required"))]
    pub service: String,
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "time is required"))]
    pub time: String,
    pub salon: Option<String>,
    pub stylist: Option<String>,
    #[validate(length(min = 5, message = "customer_phone is too short"))]
    pub customer_phone: Option<String>,
}

/// A persisted booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookingRecord {
    pub id: Uuid,
    pub reference: String,
    pub customer_phone: Option<String>,
    pub service: String,
    pub salon: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: i64,
    pub stylist: Option<String>,
    pub fees: FeeBreakdown,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl BookingRecord {
    /// Human-readable reference derived from the row id.
    pub fn reference_from(id: &Uuid) -> String {
        format!("BK-{}", id.simple().to_string()[..8].to_uppercase())
    }

    /// Appointment fields for the confirmation renderer.
    pub fn details(&self) -> BookingDetails {
        BookingDetails {
            reference: self.reference.clone(),
            service: self.service.clone(),
            salon: self.salon.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            duration_minutes: self.duration_minutes,
            stylist: self.stylist.clone(),
        }
    }
}

/// Booking row as stored in SQLite, before the money columns are parsed.
#[derive(Debug, sqlx::FromRow)]
pub struct BookingRow {
    pub id: String,
    pub reference: String,
    pub customer_phone: Option<String>,
    pub service: String,
    pub salon: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: i64,
    pub stylist: Option<String>,
    pub service_price: String,
    pub booking_fee_amount: String,
    pub tax_amount: String,
    pub total_booking_fee: String,
    pub amount_payable_at_salon: String,
    pub status: String,
    pub created_at: String,
}

impl BookingRow {
    /// Parse the TEXT-typed columns back into their domain types.
    pub fn into_record(self, booking_fee_percentage: Decimal, tax_rate: Decimal) -> Result<BookingRecord> {
        Ok(BookingRecord {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| Error::Internal(format!("Corrupt booking id: {e}")))?,
            reference: self.reference,
            customer_phone: self.customer_phone,
            service: self.service,
            salon: self.salon,
            date: self.date,
            time: self.time,
            duration_minutes: self.duration_minutes,
            stylist: self.stylist,
            fees: FeeBreakdown {
                service_price: parse_amount(&self.service_price)?,
                booking_fee_percentage,
                booking_fee_amount: parse_amount(&self.booking_fee_amount)?,
                tax_rate,
                tax_amount: parse_amount(&self.tax_amount)?,
                total_booking_fee: parse_amount(&self.total_booking_fee)?,
                amount_payable_at_salon: parse_amount(&self.amount_payable_at_salon)?,
            },
            status: self.status,
            created_at: self
                .created_at
                .parse::<DateTime<Utc>>()
                .map_err(|e| Error::Internal(format!("Corrupt created_at: {e}")))?,
        })
    }
}

fn parse_amount(text: &str) -> Result<Decimal> {
    text.parse()
        .map_err(|e| Error::Internal(format!("Corrupt amount '{text}': {e}")))
}

/// Booking response payload: the record plus the rendered confirmation.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking: BookingRecord,
    pub confirmation: String,
}
