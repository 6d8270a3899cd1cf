use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Latest known outcome of a hook execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookOutcome {
    /// Whether the hook failed. `false` until a failure is recorded.
    pub failed: bool,

    /// When the outcome was last recorded
    pub recorded_at: Option<DateTime<Utc>>,
}

impl HookOutcome {
    /// Outcome reported by the executor
    pub fn recorded(failed: bool) -> Self {
        Self {
            failed,
            recorded_at: Some(Utc::now()),
        }
    }

    pub fn is_recorded(&self) -> bool {
        self.recorded_at.is_some()
    }
}

/// Aggregate hook counts for a backup or restore report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookSummary {
    /// Distinct hook executions registered
    pub attempted: usize,

    /// Registered executions whose latest outcome is failure
    pub failed: usize,
}

impl HookSummary {
    pub fn succeeded(&self) -> usize {
        self.attempted.saturating_sub(self.failed)
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for HookSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} attempted, {} failed", self.attempted, self.failed)
    }
}
