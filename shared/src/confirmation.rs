//! Booking confirmation rendering.
//!
//! A confirmation is rendered once from the appointment details and the
//! fee breakdown, and never mutated afterwards. Policy and contact lines
//! are fixed copy, not derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::fees::FeeBreakdown;

/// Shown when the customer did not pick a stylist.
pub const DEFAULT_STYLIST: &str = "Any available stylist";

const CANCELLATION_POLICY: &str = "\
Free cancellation up to 24 hours before your appointment.
You can reschedule once at no charge by messaging us on WhatsApp.
The booking fee is non-refundable within 24 hours of the appointment.";

const SALON_CONTACT: &str =
    "Questions? Call +1 (555) 010-7788 or message us right here on WhatsApp.";

/// Appointment fields carried into a confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetails {
    pub reference: String,
    pub service: String,
    pub salon: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: i64,
    pub stylist: Option<String>,
}

impl BookingDetails {
    /// Build details from a loosely-typed booking record.
    ///
    /// Chat and demo payloads arrive as free-form JSON; every required key
    /// is checked here so an absent field surfaces as `MissingField`
    /// instead of a panic downstream.
    pub fn from_json(record: &Value) -> Result<Self> {
        Ok(Self {
            reference: required_str(record, "booking_id")?,
            service: required_str(record, "service")?,
            salon: required_str(record, "salon")?,
            date: required_str(record, "date")?,
            time: required_str(record, "time")?,
            duration_minutes: record
                .get("duration_minutes")
                .and_then(Value::as_i64)
                .ok_or_else(|| Error::MissingField("duration_minutes".to_string()))?,
            stylist: record
                .get("stylist")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    /// Stylist name, falling back to the placeholder.
    pub fn stylist_name(&self) -> &str {
        self.stylist.as_deref().unwrap_or(DEFAULT_STYLIST)
    }
}

fn required_str(record: &Value, key: &str) -> Result<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingField(key.to_string()))
}

/// Render the customer-facing confirmation message.
pub fn render_confirmation(details: &BookingDetails, fees: &FeeBreakdown) -> String {
    format!(
        "\u{2705} Booking Confirmed!\n\
         \n\
         \u{1F4CB} Appointment Details\n\
         Booking ID: {reference}\n\
         Service: {service}\n\
         Salon: {salon}\n\
         Date: {date}\n\
         Time: {time}\n\
         Duration: {duration} minutes\n\
         Stylist: {stylist}\n\
         \n\
         \u{1F4B0} Payment Breakdown\n\
         Service price: ${price:.2}\n\
         Booking fee ({pct}%): ${fee:.2}\n\
         Tax on booking fee: ${tax:.2}\n\
         Paid now: ${total:.2}\n\
         Payable at the salon: ${remainder:.2}\n\
         \n\
         \u{1F4CC} Cancellation & Rescheduling\n\
         {policy}\n\
         \n\
         \u{1F4DE} {contact}",
        reference = details.reference,
        service = details.service,
        salon = details.salon,
        date = details.date,
        time = details.time,
        duration = details.duration_minutes,
        stylist = details.stylist_name(),
        price = fees.service_price,
        pct = percentage_label(fees.booking_fee_percentage),
        fee = fees.booking_fee_amount,
        tax = fees.tax_amount,
        total = fees.total_booking_fee,
        remainder = fees.amount_payable_at_salon,
        policy = CANCELLATION_POLICY,
        contact = SALON_CONTACT,
    )
}

/// "10.00" reads poorly in a percentage label; drop trailing zeros.
fn percentage_label(percentage: Decimal) -> Decimal {
    percentage.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fees::FeeSchedule;
    use serde_json::json;

    fn details() -> BookingDetails {
        BookingDetails {
            reference: "BK-1A2B3C4D".to_string(),
            service: "Hair Coloring".to_string(),
            salon: "Perfect Cuts Studio".to_string(),
            date: "2026-08-12".to_string(),
            time: "14:30".to_string(),
            duration_minutes: 90,
            stylist: None,
        }
    }

    #[test]
    fn confirmation_carries_identity_and_amounts() {
        let fees = FeeSchedule::default().calculate("120".parse().unwrap());
        let text = render_confirmation(&details(), &fees);

        assert!(text.contains("BK-1A2B3C4D"));
        assert!(text.contains("Hair Coloring"));
        assert!(text.contains("$12.96"));
        assert!(text.contains("$108.00"));
        assert!(text.contains("Booking fee (10%)"));
    }

    #[test]
    fn confirmation_includes_fixed_policy_copy() {
        let fees = FeeSchedule::default().calculate("45".parse().unwrap());
        let text = render_confirmation(&details(), &fees);

        assert!(text.contains("Free cancellation up to 24 hours"));
        assert!(text.contains("Call +1 (555) 010-7788"));
    }

    #[test]
    fn missing_stylist_renders_placeholder() {
        let fees = FeeSchedule::default().calculate("45".parse().unwrap());
        let text = render_confirmation(&details(), &fees);
        assert!(text.contains("Stylist: Any available stylist"));

        let mut named = details();
        named.stylist = Some("Dana".to_string());
        let text = render_confirmation(&named, &fees);
        assert!(text.contains("Stylist: Dana"));
    }

    #[test]
    fn from_json_reads_a_complete_record() {
        let record = json!({
            "booking_id": "BK-55AA66BB",
            "service": "Haircut",
            "salon": "Perfect Cuts Studio",
            "date": "2026-09-01",
            "time": "10:00",
            "duration_minutes": 45,
            "stylist": "Maya",
        });

        let details = BookingDetails::from_json(&record).unwrap();
        assert_eq!(details.reference, "BK-55AA66BB");
        assert_eq!(details.stylist_name(), "Maya");
    }

    #[test]
    fn from_json_reports_the_missing_key() {
        let record = json!({
            "booking_id": "BK-55AA66BB",
            "service": "Haircut",
            "date": "2026-09-01",
            "time": "10:00",
            "duration_minutes": 45,
        });

        match BookingDetails::from_json(&record) {
            Err(Error::MissingField(field)) => assert_eq!(field, "salon"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }
}
