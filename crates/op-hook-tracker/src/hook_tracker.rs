use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tracing::warn;
use uuid::Uuid;

use crate::config::TrackerConfig;
use crate::hook_identity::{HookIdentity, HookPhase, HookSource};
use crate::hook_outcome::{HookOutcome, HookSummary};
use crate::metrics::HookMetrics;
use crate::telemetry::HookTelemetry;

/// Event emitted when the registry changes or drops an update
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackerEvent {
    /// A new identity was added
    Registered(HookIdentity),

    /// An outcome was stored for a registered identity
    Recorded { identity: HookIdentity, failed: bool },

    /// An outcome arrived for an identity that was never registered and was dropped
    UnregisteredRecord { identity: HookIdentity, failed: bool },
}

/// Registry of hook executions for one backup or restore operation.
///
/// Clones share the same registry, so parallel workers can each hold one.
#[derive(Clone)]
pub struct HookTracker {
    /// Latest outcome per hook execution
    hooks: Arc<RwLock<HashMap<HookIdentity, HookOutcome>>>,

    /// Metrics collector, absent when disabled
    metrics: Option<Arc<HookMetrics>>,

    /// Telemetry service
    telemetry: Arc<HookTelemetry>,

    /// Event broadcaster
    event_sender: broadcast::Sender<TrackerEvent>,
}

impl HookTracker {
    /// Create an empty tracker with default config
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    /// Create an empty tracker with custom config
    pub fn with_config(config: TrackerConfig) -> Self {
        let metrics = if config.metrics_enabled {
            match HookMetrics::new() {
                Ok(m) => Some(Arc::new(m)),
                Err(e) => {
                    warn!(
                        error = %e,
                        "Failed to create hook metrics, continuing without them"
                    );
                    None
                }
            }
        } else {
            None
        };

        let (tx, _) = broadcast::channel(config.event_buffer.max(1));
        Self {
            hooks: Arc::new(RwLock::new(HashMap::new())),
            metrics,
            telemetry: Arc::new(HookTelemetry::new(
                &config.service_name,
                config.warn_on_unregistered,
            )),
            event_sender: tx,
        }
    }

    /// Subscribe to tracker events
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.event_sender.subscribe()
    }

    /// Announce a hook that is about to run.
    ///
    /// A hook that is already registered keeps its recorded outcome.
    pub fn register(
        &self,
        namespace: &str,
        pod_name: &str,
        container: &str,
        source: HookSource,
        hook_name: &str,
        phase: Option<HookPhase>,
    ) {
        self.register_identity(HookIdentity::new(
            namespace, pod_name, container, source, hook_name, phase,
        ));
    }

    /// Store the outcome of a finished hook. Ignored if the hook was never registered.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &self,
        namespace: &str,
        pod_name: &str,
        container: &str,
        source: HookSource,
        hook_name: &str,
        phase: Option<HookPhase>,
        failed: bool,
    ) {
        let identity = HookIdentity::new(
            namespace, pod_name, container, source, hook_name, phase,
        );
        self.record_identity(&identity, failed);
    }

    pub fn register_identity(&self, identity: HookIdentity) {
        // Events go out under the write guard so subscribers see them in map order.
        let inserted = {
            let mut hooks = self.write_hooks();
            if hooks.contains_key(&identity) {
                false
            } else {
                hooks.insert(identity.clone(), HookOutcome::default());
                let _ = self
                    .event_sender
                    .send(TrackerEvent::Registered(identity.clone()));
                true
            }
        };

        if inserted {
            if let Some(metrics) = &self.metrics {
                metrics.hook_registered();
            }
            self.telemetry.hook_registered(&identity);
        } else {
            if let Some(metrics) = &self.metrics {
                metrics.duplicate_registration();
            }
            self.telemetry.duplicate_registration(&identity);
        }
    }

    pub fn record_identity(&self, identity: &HookIdentity, failed: bool) {
        let updated = {
            let mut hooks = self.write_hooks();
            let event = match hooks.get_mut(identity) {
                Some(outcome) => {
                    *outcome = HookOutcome::recorded(failed);
                    TrackerEvent::Recorded {
                        identity: identity.clone(),
                        failed,
                    }
                }
                None => TrackerEvent::UnregisteredRecord {
                    identity: identity.clone(),
                    failed,
                },
            };
            let updated = matches!(event, TrackerEvent::Recorded { .. });
            let _ = self.event_sender.send(event);
            updated
        };

        if updated {
            if let Some(metrics) = &self.metrics {
                metrics.outcome_recorded(failed);
            }
            self.telemetry.outcome_recorded(identity, failed);
        } else {
            if let Some(metrics) = &self.metrics {
                metrics.unregistered_record();
            }
            self.telemetry.unregistered_record(identity, failed);
        }
    }

    /// Count attempted and failed hooks from the current registry contents
    pub fn summarize(&self) -> HookSummary {
        let summary = {
            let hooks = self.read_hooks();
            HookSummary {
                attempted: hooks.len(),
                failed: hooks.values().filter(|o| o.failed).count(),
            }
        };
        self.telemetry.summarized(&summary);
        summary
    }

    /// Latest outcome for one hook execution
    pub fn outcome(&self, identity: &HookIdentity) -> Option<HookOutcome> {
        self.read_hooks().get(identity).cloned()
    }

    pub fn len(&self) -> usize {
        self.read_hooks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_hooks().is_empty()
    }

    /// Get metrics, if enabled
    pub fn metrics(&self) -> Option<Arc<HookMetrics>> {
        self.metrics.clone()
    }

    /// Id attached to this tracker's log lines
    pub fn tracker_id(&self) -> Uuid {
        self.telemetry.tracker_id()
    }

    // Every operation is total, so a poisoned lock still holds a usable map.
    fn read_hooks(&self) -> RwLockReadGuard<'_, HashMap<HookIdentity, HookOutcome>> {
        self.hooks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_hooks(&self) -> RwLockWriteGuard<'_, HashMap<HookIdentity, HookOutcome>> {
        self.hooks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HookTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Hook tracker trait for integration
pub trait HookTracking: Send + Sync {
    /// Announce a hook execution
    fn register_identity(&self, identity: HookIdentity);

    /// Store a hook execution's outcome
    fn record_identity(&self, identity: &HookIdentity, failed: bool);

    /// Aggregate attempted/failed counts
    fn summarize(&self) -> HookSummary;
}

impl HookTracking for HookTracker {
    fn register_identity(&self, identity: HookIdentity) {
        HookTracker::register_identity(self, identity)
    }

    fn record_identity(&self, identity: &HookIdentity, failed: bool) {
        HookTracker::record_identity(self, identity, failed)
    }

    fn summarize(&self) -> HookSummary {
        HookTracker::summarize(self)
    }
}
