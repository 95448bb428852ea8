//! HTTP payment gateway adapter
//!
//! Talks to the external payment provider's token endpoint. Transient
//! network failures are retried with backoff; whatever still fails is
//! reported as `PaymentGatewayUnavailable`, which the reservation
//! workflow recovers from by downgrading the booking to manual transfer.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::payments::{PaymentGateway, PaymentToken};
use crate::domain::{pricing, Booking, DomainError, DomainResult};
use crate::shared::retry::{retry_with_backoff, RetryConfig};

/// Gateway connection settings.
#[derive(Debug, Clone)]
pub struct PaymentGatewayConfig {
    /// Provider base URL, e.g. "https://pay.example.com"
    pub base_url: String,
    /// Server-side API key
    pub server_key: String,
    /// Per-request timeout
    pub timeout: Duration,
    pub retry: RetryConfig,
}

pub struct HttpPaymentGateway {
    client: reqwest::Client,
    config: PaymentGatewayConfig,
}

impl HttpPaymentGateway {
    pub fn new(config: PaymentGatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("reqwest client construction cannot fail with these options");
        Self { client, config }
    }

    async fn request_token(&self, booking: &Booking) -> Result<PaymentToken, reqwest::Error> {
        let request = TokenRequest {
            order_id: &booking.order_code,
            amount_cents: booking.total_amount_cents,
            description: format!(
                "Room reservation {} ({} night(s), {})",
                booking.order_code,
                booking.nights,
                pricing::format_cents(booking.total_amount_cents)
            ),
        };

        let url = format!("{}/v1/payment-tokens", self.config.base_url);
        debug!(order_code = %booking.order_code, "Requesting payment token");

        let response: TokenResponse = self
            .client
            .post(&url)
            .bearer_auth(&self.config.server_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(PaymentToken {
            token: response.token,
            redirect_url: response.redirect_url,
        })
    }
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    order_id: &'a str,
    amount_cents: i64,
    description: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
    redirect_url: Option<String>,
}

fn is_transient(err: &reqwest::Error) -> bool {
    if err.is_timeout() || err.is_connect() {
        return true;
    }
    err.status().is_some_and(|s| s.is_server_error())
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_token(&self, booking: &Booking) -> DomainResult<PaymentToken> {
        retry_with_backoff(
            self.config.retry.clone(),
            || self.request_token(booking),
            is_transient,
            "gateway_create_token",
        )
        .await
        .map_err(|err| DomainError::PaymentGatewayUnavailable(err.to_string()))
    }
}
