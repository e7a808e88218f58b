//! Configuration management for Lambda functions.

use std::env;

use crate::models::EnvStatus;

/// Default SQLite database when `DATABASE_URL` is not set.
const DEFAULT_DATABASE_URL: &str = "sqlite:salon_bookings.db";

/// Application configuration loaded from environment variables.
///
/// Every credential is optional on purpose: the status endpoints report
/// which ones are configured instead of failing at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// DeepSeek API key for the conversational assistant
    pub deepseek_api_key: Option<String>,
    /// Twilio account SID
    pub twilio_account_sid: Option<String>,
    /// Twilio auth token
    pub twilio_auth_token: Option<String>,
    /// Twilio WhatsApp sender number
    pub twilio_whatsapp_number: Option<String>,
    /// SQLite database URL
    pub database_url: String,
}

/// Twilio credentials, available only when the full set is configured.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub whatsapp_number: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            deepseek_api_key: env::var("DEEPSEEK_API_KEY").ok(),
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID").ok(),
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN").ok(),
            twilio_whatsapp_number: env::var("TWILIO_WHATSAPP_NUMBER").ok(),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
        }
    }

    /// Twilio credentials, or `None` unless all three are set.
    pub fn twilio(&self) -> Option<TwilioConfig> {
        Some(TwilioConfig {
            account_sid: self.twilio_account_sid.clone()?,
            auth_token: self.twilio_auth_token.clone()?,
            whatsapp_number: self.twilio_whatsapp_number.clone()?,
        })
    }

    /// Which credentials are currently configured.
    pub fn env_status(&self) -> EnvStatus {
        EnvStatus {
            deepseek_key_loaded: self.deepseek_api_key.is_some(),
            twilio_sid_loaded: self.twilio_account_sid.is_some(),
            twilio_token_loaded: self.twilio_auth_token.is_some(),
            twilio_number_loaded: self.twilio_whatsapp_number.is_some(),
        }
    }
}
