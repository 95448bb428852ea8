//! # StayHub Reservation Engine
//!
//! Room-reservation service: availability and conflict detection over
//! date ranges, quote verification, a transactional booking-creation
//! workflow with payment-gateway fallback, and an expiry sweep for
//! unpaid bookings.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, rules and repository traits
//! - **application**: Reservation workflow, availability checks, the
//!   outbound payments port and the expiry sweeper
//! - **infrastructure**: External concerns (SeaORM persistence, HTTP
//!   payment gateway)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Clock, shutdown and retry helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
