//! Background task that periodically expires overdue bookings.
//!
//! Runs in a tokio::spawn loop, checking every `check_interval_secs` for
//! unpaid bookings past their `expires_at` and marking them `expired`
//! through the service's idempotent `expire` primitive, so overlapping
//! runs are harmless.

use std::sync::Arc;

use tokio::time::Duration;
use tracing::{info, warn};

use crate::application::reservations::ReservationService;
use crate::shared::shutdown::ShutdownSignal;

/// Start the booking expiry background task.
pub fn start_expiry_sweeper(
    service: Arc<ReservationService>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(
            check_interval = check_interval_secs,
            "Booking expiry sweeper started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = service.expire_due().await {
                        warn!(error = %e, "Booking expiry sweep error");
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("Booking expiry sweeper shutting down");
                    break;
                }
            }
        }

        info!("Booking expiry sweeper stopped");
    });
}
