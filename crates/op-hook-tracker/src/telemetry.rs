use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::hook_identity::HookIdentity;
use crate::hook_outcome::HookSummary;

/// Hook tracker telemetry.
/// Emits tracing events tagged with the service name and tracker id so the
/// log lines of one backup/restore can be correlated.
pub struct HookTelemetry {
    /// Service name for tracing
    service_name: String,

    /// Identifies one tracker (one backup/restore operation)
    tracker_id: Uuid,

    /// Log dropped outcomes at warn instead of debug
    warn_on_unregistered: bool,
}

impl HookTelemetry {
    /// Create new telemetry service
    pub fn new(service_name: &str, warn_on_unregistered: bool) -> Self {
        Self {
            service_name: service_name.to_string(),
            tracker_id: Uuid::new_v4(),
            warn_on_unregistered,
        }
    }

    pub fn tracker_id(&self) -> Uuid {
        self.tracker_id
    }

    #[instrument(skip(self, identity), fields(
        tracker_id = %self.tracker_id,
        hook = %identity,
        service = %self.service_name
    ))]
    pub fn hook_registered(&self, identity: &HookIdentity) {
        debug!("Registered hook execution");
    }

    #[instrument(skip(self, identity), fields(
        tracker_id = %self.tracker_id,
        hook = %identity,
        service = %self.service_name
    ))]
    pub fn duplicate_registration(&self, identity: &HookIdentity) {
        debug!("Hook already registered, keeping existing outcome");
    }

    #[instrument(skip(self, identity), fields(
        tracker_id = %self.tracker_id,
        hook = %identity,
        service = %self.service_name
    ))]
    pub fn outcome_recorded(&self, identity: &HookIdentity, failed: bool) {
        if failed {
            info!(failed, "Hook execution failed");
        } else {
            debug!(failed, "Hook execution succeeded");
        }
    }

    #[instrument(skip(self, identity), fields(
        tracker_id = %self.tracker_id,
        hook = %identity,
        service = %self.service_name
    ))]
    pub fn unregistered_record(&self, identity: &HookIdentity, failed: bool) {
        if self.warn_on_unregistered {
            warn!(failed, "Dropping outcome for unregistered hook");
        } else {
            debug!(failed, "Dropping outcome for unregistered hook");
        }
    }

    #[instrument(skip(self, summary), fields(
        tracker_id = %self.tracker_id,
        service = %self.service_name
    ))]
    pub fn summarized(&self, summary: &HookSummary) {
        info!(
            attempted = summary.attempted,
            failed = summary.failed,
            "Hook execution summary"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_ids_are_unique() {
        let a = HookTelemetry::new("svc", true);
        let b = HookTelemetry::new("svc", true);
        assert_ne!(a.tracker_id(), b.tracker_id());
    }
}
