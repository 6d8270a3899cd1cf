//! Tracker configuration
//!
//! Defaults suit an embedded tracker. Each field can be overridden from the
//! environment with `TrackerConfig::from_env()`:
//!
//! - `OP_HOOK_TRACKER_SERVICE_NAME`
//! - `OP_HOOK_TRACKER_WARN_UNREGISTERED` (`true`/`false`/`1`/`0`)
//! - `OP_HOOK_TRACKER_EVENT_BUFFER` (positive integer)
//! - `OP_HOOK_TRACKER_METRICS` (`true`/`false`/`1`/`0`)

use tracing::{debug, warn};

pub const ENV_SERVICE_NAME: &str = "OP_HOOK_TRACKER_SERVICE_NAME";
pub const ENV_WARN_UNREGISTERED: &str = "OP_HOOK_TRACKER_WARN_UNREGISTERED";
pub const ENV_EVENT_BUFFER: &str = "OP_HOOK_TRACKER_EVENT_BUFFER";
pub const ENV_METRICS: &str = "OP_HOOK_TRACKER_METRICS";

const DEFAULT_SERVICE_NAME: &str = "op-hook-tracker";
const DEFAULT_EVENT_BUFFER: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Service name attached to telemetry
    pub service_name: String,

    /// Log outcomes for unregistered hooks at warn level (default: true)
    pub warn_on_unregistered: bool,

    /// Capacity of the tracker event channel (default: 256)
    pub event_buffer: usize,

    /// Collect prometheus metrics (default: true)
    pub metrics_enabled: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            warn_on_unregistered: true,
            event_buffer: DEFAULT_EVENT_BUFFER,
            metrics_enabled: true,
        }
    }
}

impl TrackerConfig {
    /// Defaults overridden by any `OP_HOOK_TRACKER_*` variables that are set.
    /// Invalid values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(name) = lookup(ENV_SERVICE_NAME) {
            let name = name.trim();
            if !name.is_empty() {
                config.service_name = name.to_string();
            }
        }

        if let Some(raw) = lookup(ENV_WARN_UNREGISTERED) {
            match parse_bool(&raw) {
                Some(v) => config.warn_on_unregistered = v,
                None => warn!("Ignoring invalid {}={}", ENV_WARN_UNREGISTERED, raw),
            }
        }

        if let Some(raw) = lookup(ENV_EVENT_BUFFER) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.event_buffer = n,
                _ => warn!("Ignoring invalid {}={}", ENV_EVENT_BUFFER, raw),
            }
        }

        if let Some(raw) = lookup(ENV_METRICS) {
            match parse_bool(&raw) {
                Some(v) => config.metrics_enabled = v,
                None => warn!("Ignoring invalid {}={}", ENV_METRICS, raw),
            }
        }

        debug!(?config, "Loaded hook tracker config");
        config
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
