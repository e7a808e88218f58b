//! Booking fee calculation.
//!
//! The salon collects a percentage of the service price upfront as a
//! booking fee; tax is levied on the booking fee, not the service price.
//! The remainder is settled at the salon after the appointment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary amounts are kept at two decimal places.
const DECIMAL_PLACES: u32 = 2;

/// Fee rates applied when quoting a booking.
///
/// Expressed as decimals (e.g. 0.10 for 10%). Passed in explicitly so the
/// calculator can be exercised without any environment setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Share of the service price collected upfront.
    pub booking_fee_rate: Decimal,
    /// Tax levied on the booking fee.
    pub tax_rate: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            booking_fee_rate: Decimal::new(10, 2), // 0.10
            tax_rate: Decimal::new(8, 2),          // 0.08
        }
    }
}

/// Deterministic fee breakdown for a single booking.
///
/// `amount_payable_at_salon` is the one field left unrounded; with
/// two-decimal inputs the subtraction is exact anyway.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub service_price: Decimal,
    pub booking_fee_percentage: Decimal,
    pub booking_fee_amount: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total_booking_fee: Decimal,
    pub amount_payable_at_salon: Decimal,
}

impl FeeSchedule {
    pub fn new(booking_fee_rate: Decimal, tax_rate: Decimal) -> Self {
        Self {
            booking_fee_rate,
            tax_rate,
        }
    }

    /// Compute the fee breakdown for a service price.
    ///
    /// Rounding is midpoint-to-even at two decimal places. Negative or
    /// zero prices are not rejected; they produce negative or zero fees.
    pub fn calculate(&self, service_price: Decimal) -> FeeBreakdown {
        let booking_fee_amount = (service_price * self.booking_fee_rate).round_dp(DECIMAL_PLACES);
        let tax_amount = (booking_fee_amount * self.tax_rate).round_dp(DECIMAL_PLACES);
        let total_booking_fee = (booking_fee_amount + tax_amount).round_dp(DECIMAL_PLACES);
        let amount_payable_at_salon = service_price - booking_fee_amount;

        FeeBreakdown {
            service_price,
            booking_fee_percentage: self.booking_fee_rate * Decimal::ONE_HUNDRED,
            booking_fee_amount,
            tax_rate: self.tax_rate,
            tax_amount,
            total_booking_fee,
            amount_payable_at_salon,
        }
    }
}
