//! HTTP helpers for Lambda functions.

use lambda_http::{Body, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::Error;
use crate::models::ApiResponse;

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(data)?))
        .expect("Failed to build response"))
}

/// Create an error response with the given status code and message.
pub fn error_response(status: u16, message: impl Into<String>) -> Result<Response<Body>, lambda_http::Error> {
    json_response(status, &ApiResponse::<()>::error(message))
}

/// Map a domain error onto its status code and envelope.
pub fn failure_response(error: &Error) -> Result<Response<Body>, lambda_http::Error> {
    error_response(error.status_code(), error.to_string())
}

/// Parse request body as JSON, returning a 400 response on failure.
///
/// Returns `Ok(Ok(T))` on successful parse, `Ok(Err(Response))` on parse error (400),
/// or `Err(lambda_http::Error)` on serialization failure.
pub fn parse_json_body<T: DeserializeOwned>(body: &Body) -> Result<Result<T, Response<Body>>, lambda_http::Error> {
    match serde_json::from_slice(body.as_ref()) {
        Ok(parsed) => Ok(Ok(parsed)),
        Err(e) => {
            let response = error_response(400, format!("Invalid request body: {}", e))?;
            Ok(Err(response))
        }
    }
}

/// Decode a URL-encoded key/value string (query strings, form bodies).
///
/// Malformed pairs are skipped rather than rejected; absent fields are
/// treated as empty downstream, matching the webhook contract.
pub fn parse_query(raw: &str) -> HashMap<String, String> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Some((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

/// Decode a `application/x-www-form-urlencoded` body (Twilio webhooks).
pub fn parse_form(body: &Body) -> HashMap<String, String> {
    let raw = match body {
        Body::Text(text) => text.clone(),
        Body::Binary(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Body::Empty => String::new(),
    };

    parse_query(&raw)
}

fn decode_component(component: &str) -> Option<String> {
    urlencoding::decode(&component.replace('+', " "))
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Macro to parse request body, returning early with 400 on parse error.
///
/// Usage:
/// ```ignore
/// let request: MyRequest = parse_body!(event.body());
/// ```
#[macro_export]
macro_rules! parse_body {
    ($body:expr) => {
        match shared::http::parse_json_body($body)? {
            Ok(parsed) => parsed,
            Err(response) => return Ok(response),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_decoding_handles_twilio_encoding() {
        let body = Body::Text(
            "From=whatsapp%3A%2B14155550100&Body=Book+a+haircut&SmsSid=SM123".to_string(),
        );
        let form = parse_form(&body);

        assert_eq!(form.get("From").map(String::as_str), Some("whatsapp:+14155550100"));
        assert_eq!(form.get("Body").map(String::as_str), Some("Book a haircut"));
        assert_eq!(form.get("SmsSid").map(String::as_str), Some("SM123"));
    }

    #[test]
    fn empty_and_valueless_fields_are_tolerated() {
        let form = parse_form(&Body::Text("Body=&From".to_string()));
        assert_eq!(form.get("Body").map(String::as_str), Some(""));
        assert_eq!(form.get("From").map(String::as_str), Some(""));

        assert!(parse_form(&Body::Empty).is_empty());
    }
}
