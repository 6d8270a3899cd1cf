//! OP Hook Tracker - Backup/Restore Hook Bookkeeping
//!
//! Records the outcome of every hook run during one backup or restore so the
//! orchestrator can report how many hooks were attempted and how many failed:
//! - Register a hook before it runs, record its outcome after
//! - Duplicate registrations and outcomes for unannounced hooks are no-ops
//! - Summaries are computed from a consistent snapshot of the registry
//! - Tracing, prometheus counters and a broadcast event feed for diagnostics

pub mod config;
pub mod error;
pub mod hook_identity;
pub mod hook_outcome;
pub mod hook_tracker;
pub mod metrics;
pub mod telemetry;

pub use config::TrackerConfig;
pub use error::{HookTrackerError, Result};
pub use hook_identity::{
    normalize_hook_source, HookIdentity, HookPhase, HookSource, ANNOTATION_HOOK_NAME,
    HOOK_SOURCE_ANNOTATION, HOOK_SOURCE_SPEC,
};
pub use hook_outcome::{HookOutcome, HookSummary};
pub use hook_tracker::{HookTracker, HookTracking, TrackerEvent};
pub use metrics::HookMetrics;
pub use telemetry::HookTelemetry;
