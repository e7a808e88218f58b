//! Twilio client for outbound WhatsApp messages.

use serde::Deserialize;
use tracing::{error, info};

use crate::config::TwilioConfig;
use crate::error::{Error, Result};

/// Subset of the Twilio message resource we care about.
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

/// Client for the Twilio Messages API.
pub struct TwilioClient {
    http_client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioClient {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    /// Send a WhatsApp message, returning the Twilio message SID.
    pub async fn send_whatsapp(&self, to: &str, body: &str) -> Result<String> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.account_sid
        );

        let from = whatsapp_address(&self.config.whatsapp_number);
        let to = whatsapp_address(to);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[("From", from.as_str()), ("To", to.as_str()), ("Body", body)])
            .send()
            .await
            .map_err(|e| Error::Messaging(format!("Failed to reach Twilio: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            error!("Twilio send failed: {} - {}", status, detail);
            return Err(Error::Messaging(format!("Twilio send failed: {status}")));
        }

        let message: MessageResource = response
            .json()
            .await
            .map_err(|e| Error::Messaging(format!("Failed to parse Twilio response: {e}")))?;

        info!("WhatsApp message sent: {}", message.sid);
        Ok(message.sid)
    }
}

/// Twilio expects WhatsApp parties as `whatsapp:+<E.164>`.
fn whatsapp_address(number: &str) -> String {
    if number.starts_with("whatsapp:") {
        number.to_string()
    } else {
        format!("whatsapp:{number}")
    }
}
