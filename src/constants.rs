//! Client Constants
//!
//! Centralized limits and timings shared across the sync and form layers.

/// Maximum attachment size accepted at selection time (bytes)
pub const MAX_UPLOAD_BYTES: u64 = 5_000_000;

/// Capacity of the per-feed buffer for events that arrive before the
/// initial fetch resolves
pub const EARLY_EVENT_BUFFER_CAPACITY: usize = 256;

/// Broadcast capacity per subscribed event name
pub const CHANNEL_FANOUT_CAPACITY: usize = 512;

/// Push-channel namespace prefix (channel name is `portal:<resource>`)
pub const CHANNEL_NAMESPACE: &str = "portal";

/// Debounce interval for by-id autofill lookups
pub const LOOKUP_DEBOUNCE_MS: u64 = 400;

/// Retry configuration for push-channel reconnection
pub const RETRY_INITIAL_DELAY_MS: u64 = 1000;
pub const RETRY_MAX_DELAY_MS: u64 = 60000;
pub const RETRY_MULTIPLIER: f64 = 2.0;
pub const RETRY_JITTER: f64 = 0.1;

/// HTTP request timeout
pub const HTTP_TIMEOUT_SECS: u64 = 30;
