//! External concerns: database, payment gateway

pub mod database;
pub mod gateway;

pub use database::{init_database, DatabaseConfig};
pub use gateway::HttpPaymentGateway;
