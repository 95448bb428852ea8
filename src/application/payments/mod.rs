//! Outbound payment-gateway port
//!
//! The gateway is an external collaborator: the engine only asks it to
//! create a payable token for a booking. Any failure is reported as
//! `PaymentGatewayUnavailable`, which the reservation service recovers
//! from by downgrading the booking to manual transfer.

use async_trait::async_trait;

use crate::domain::{Booking, DomainError, DomainResult};

/// A payable token issued by the gateway for one booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentToken {
    pub token: String,
    /// Hosted-payment-page URL, when the gateway provides one.
    pub redirect_url: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payable token for the booking.
    ///
    /// Implementations map every transport/remote failure to
    /// `DomainError::PaymentGatewayUnavailable`; no other error kind may
    /// escape this call.
    async fn create_token(&self, booking: &Booking) -> DomainResult<PaymentToken>;
}

/// Adapter used when no gateway is configured. Every request fails as
/// unavailable, so gateway bookings fall back to manual transfer instead
/// of being rejected.
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredPaymentGateway;

#[async_trait]
impl PaymentGateway for UnconfiguredPaymentGateway {
    async fn create_token(&self, _booking: &Booking) -> DomainResult<PaymentToken> {
        Err(DomainError::PaymentGatewayUnavailable(
            "no payment gateway configured".to_string(),
        ))
    }
}
