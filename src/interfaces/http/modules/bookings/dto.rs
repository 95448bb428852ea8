//! Booking DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::payments::PaymentToken;
use crate::application::reservations::CreateBookingCommand;
use crate::domain::{pricing, Booking, FieldErrors, PaymentMethod};

/// Payment method on the wire
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethodDto {
    #[default]
    ManualTransfer,
    PaymentGateway,
}

impl From<PaymentMethodDto> for PaymentMethod {
    fn from(dto: PaymentMethodDto) -> Self {
        match dto {
            PaymentMethodDto::ManualTransfer => PaymentMethod::ManualTransfer,
            PaymentMethodDto::PaymentGateway => PaymentMethod::PaymentGateway,
        }
    }
}

/// Request to create a booking
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, message = "guest_id is required"))]
    pub guest_id: String,
    #[validate(length(min = 1, message = "property_id is required"))]
    pub property_id: String,
    #[validate(length(min = 1, message = "room_id is required"))]
    pub room_id: String,

    /// Check-in date (YYYY-MM-DD)
    pub check_in: NaiveDate,
    /// Check-out date (YYYY-MM-DD), excluded from the stay
    pub check_out: NaiveDate,

    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub pets: u32,

    /// Quoted nightly rate
    pub price_per_night: Decimal,
    /// Quoted total; verified against price_per_night × nights
    pub total_amount: Decimal,

    #[serde(default)]
    pub payment_method: PaymentMethodDto,
}

fn default_adults() -> u32 {
    1
}

impl CreateBookingRequest {
    /// Convert the wire request into engine types. Decimal amounts with
    /// sub-cent precision come back as field errors.
    pub fn into_command(self) -> Result<CreateBookingCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let price_per_night_cents = match pricing::to_cents(self.price_per_night) {
            Ok(cents) => cents,
            Err(msg) => {
                errors.push("price_per_night", msg);
                0
            }
        };
        let total_amount_cents = match pricing::to_cents(self.total_amount) {
            Ok(cents) => cents,
            Err(msg) => {
                errors.push("total_amount", msg);
                0
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CreateBookingCommand {
            guest_id: self.guest_id,
            property_id: self.property_id,
            room_id: self.room_id,
            check_in: self.check_in,
            check_out: self.check_out,
            adults: self.adults,
            children: self.children,
            pets: self.pets,
            price_per_night_cents,
            total_amount_cents,
            payment_method: self.payment_method.into(),
        })
    }
}

/// Booking details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: String,
    pub order_code: String,
    pub guest_id: String,
    pub property_id: String,
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub price_per_night: Decimal,
    pub total_amount: Decimal,
    pub status: String,
    pub payment_method: String,
    pub created_at: String,
    pub expires_at: String,
}

impl From<&Booking> for BookingDto {
    fn from(b: &Booking) -> Self {
        Self {
            id: b.id.clone(),
            order_code: b.order_code.clone(),
            guest_id: b.guest_id.clone(),
            property_id: b.property_id.clone(),
            room_id: b.room_id.clone(),
            check_in: b.check_in,
            check_out: b.check_out,
            nights: b.nights,
            price_per_night: pricing::to_decimal(b.price_per_night_cents),
            total_amount: pricing::to_decimal(b.total_amount_cents),
            status: b.status.to_string(),
            payment_method: b.payment_method.to_string(),
            created_at: b.created_at.to_rfc3339(),
            expires_at: b.expires_at.to_rfc3339(),
        }
    }
}

/// Payment token issued by the gateway
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentTokenDto {
    pub token: String,
    pub redirect_url: Option<String>,
}

impl From<PaymentToken> for PaymentTokenDto {
    fn from(t: PaymentToken) -> Self {
        Self {
            token: t.token,
            redirect_url: t.redirect_url,
        }
    }
}

/// Response from creating a booking
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateBookingResponse {
    pub booking: BookingDto,
    /// Present when the gateway issued a token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_token: Option<PaymentTokenDto>,
    /// Present when the booking was held but the gateway was unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
