//! Payment gateway adapters

mod http;

pub use http::{HttpPaymentGateway, PaymentGatewayConfig};
