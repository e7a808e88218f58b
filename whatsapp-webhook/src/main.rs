//! WhatsApp Webhook Lambda - Handles inbound Twilio WhatsApp messages.
//!
//! Twilio POSTs each inbound message as a form-encoded body; the handler
//! builds an assistant reply (menu, fee quote, or greeting) and sends it
//! back through the Twilio Messages API.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::{
    error_response, failure_response, json_response, parse_form, ApiResponse, Config, FeeSchedule,
    ServiceCatalog, TwilioClient,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application state
struct AppState {
    twilio: Option<TwilioClient>,
    catalog: ServiceCatalog,
    schedule: FeeSchedule,
}

impl AppState {
    fn new() -> Self {
        let config = Config::from_env();
        let twilio = config.twilio().map(TwilioClient::new);
        if twilio.is_none() {
            warn!("Twilio credentials not configured; webhook will reject messages");
        }

        Self {
            twilio,
            catalog: ServiceCatalog::default(),
            schedule: FeeSchedule::default(),
        }
    }
}

/// Build the assistant reply for an inbound message.
///
/// Keyword dispatch, no session state: the menu and quote answers cover
/// the demo flows, everything else gets the greeting.
fn build_reply(catalog: &ServiceCatalog, schedule: &FeeSchedule, message: &str) -> String {
    let lower = message.to_lowercase();

    if lower.contains("menu") || lower.contains("service") || lower.contains("list") {
        return format!(
            "\u{1F487} Here's what you can book:\n{}\n\nReply with a service name for a quote.",
            catalog.menu_lines()
        );
    }

    if let Some(service) = catalog
        .services
        .iter()
        .find(|service| lower.contains(&service.name.to_lowercase()))
    {
        let fees = schedule.calculate(service.price);
        return format!(
            "\u{1F4B0} {} is ${:.2} ({} min).\n\
             To confirm you'd pay a ${:.2} booking fee now ({:.2} fee + {:.2} tax) \
             and ${:.2} at the salon.\n\
             Reply BOOK {} to reserve a slot.",
            service.name,
            service.price,
            service.duration_minutes,
            fees.total_booking_fee,
            fees.booking_fee_amount,
            fees.tax_amount,
            fees.amount_payable_at_salon,
            service.name,
        );
    }

    if lower.contains("cancel") || lower.contains("reschedul") {
        return "\u{1F4CC} Free cancellation up to 24 hours before your appointment. \
                Reply with your booking ID and we'll take care of it."
            .to_string();
    }

    format!(
        "\u{1F916} Thanks for your message: '{message}'. I'm your booking assistant! \
         Reply 'menu' to see our services."
    )
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let path = event.uri().path();
    let method = event.method().as_str();

    match (method, path) {
        ("POST", "/webhook/whatsapp") => {
            let twilio = match &state.twilio {
                Some(twilio) => twilio,
                None => return Ok(error_response(503, "Twilio credentials not configured")?),
            };

            // Absent fields degrade to empty strings, per the webhook contract.
            let form = parse_form(event.body());
            let from = form.get("From").cloned().unwrap_or_default();
            let message_body = form.get("Body").cloned().unwrap_or_default();

            info!("\u{1F4F1} WhatsApp message from {}: {}", from, message_body);

            if from.is_empty() {
                return Ok(error_response(400, "Missing From field")?);
            }

            let reply = build_reply(&state.catalog, &state.schedule, &message_body);

            match twilio.send_whatsapp(&from, &reply).await {
                Ok(message_sid) => Ok(json_response(
                    200,
                    &ApiResponse::success(serde_json::json!({
                        "status": "processed",
                        "message_sid": message_sid,
                    })),
                )?),
                Err(e) => Ok(failure_response(&e)?),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState {
            twilio: None,
            catalog: ServiceCatalog::default(),
            schedule: FeeSchedule::default(),
        }
    }

    #[test]
    fn menu_request_lists_services() {
        let state = state();
        let reply = build_reply(&state.catalog, &state.schedule, "Show me the menu please");
        assert!(reply.contains("Haircut"));
        assert!(reply.contains("Keratin Treatment"));
    }

    #[test]
    fn naming_a_service_quotes_its_fees() {
        let state = state();
        let reply = build_reply(&state.catalog, &state.schedule, "how much is hair coloring?");
        assert!(reply.contains("Hair Coloring"));
        assert!(reply.contains("$12.96"));
        assert!(reply.contains("$108.00"));
    }

    #[test]
    fn unknown_message_gets_the_greeting() {
        let state = state();
        let reply = build_reply(&state.catalog, &state.schedule, "hello there");
        assert!(reply.contains("I'm your booking assistant"));
        assert!(reply.contains("hello there"));
    }

    #[tokio::test]
    async fn webhook_without_credentials_is_a_503() {
        let event = lambda_http::http::Request::builder()
            .method("POST")
            .uri("/webhook/whatsapp")
            .body(Body::Text("From=whatsapp%3A%2B1&Body=hi".to_string()))
            .unwrap();

        let response = handler(Arc::new(state()), event).await.unwrap();
        assert_eq!(response.status(), 503);
    }
}
