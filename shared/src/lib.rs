//! Shared library for Perfect Booking Lambda functions.
//!
//! This crate provides the fee-calculation core, confirmation rendering,
//! and the common configuration, persistence and messaging plumbing used
//! across all Lambda functions.

pub mod catalog;
pub mod config;
pub mod confirmation;
pub mod db;
pub mod error;
pub mod fees;
pub mod http;
pub mod models;
pub mod twilio;

pub use catalog::{SalonService, ServiceCatalog};
pub use config::{Config, TwilioConfig};
pub use confirmation::{render_confirmation, BookingDetails};
pub use error::{Error, Result};
pub use fees::{FeeBreakdown, FeeSchedule};
pub use http::{error_response, failure_response, json_response, parse_form, parse_json_body, parse_query};
pub use models::{ApiResponse, BookingRecord, CreateBookingRequest, EnvStatus};
pub use twilio::TwilioClient;
