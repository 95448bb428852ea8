//! Cross-cutting runtime pieces: clock, shutdown, retry

pub mod clock;
pub mod retry;
pub mod shutdown;

pub use clock::{Clock, FixedClock, SystemClock};
pub use retry::{retry_with_backoff, RetryConfig};
pub use shutdown::{listen_for_shutdown_signals, ShutdownSignal};
