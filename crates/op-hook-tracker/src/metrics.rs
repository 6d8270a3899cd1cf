use prometheus::{IntCounter, Registry};

use crate::error::Result;

/// Hook tracker metrics collector
#[derive(Clone)]
pub struct HookMetrics {
    /// New identities added to the registry
    hooks_registered: IntCounter,

    /// Register calls for identities already present
    duplicate_registrations: IntCounter,

    /// Outcomes recorded against registered identities
    outcomes_recorded: IntCounter,

    /// Recorded outcomes that were failures
    failures_recorded: IntCounter,

    /// Outcomes dropped because the identity was never registered
    unregistered_records: IntCounter,

    /// Registry for scraping
    registry: Registry,
}

impl HookMetrics {
    /// Create new metrics collector
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let hooks_registered = IntCounter::new(
            "op_hooks_registered_total",
            "Total number of distinct hook executions registered",
        )?;
        registry.register(Box::new(hooks_registered.clone()))?;

        let duplicate_registrations = IntCounter::new(
            "op_hooks_duplicate_registrations_total",
            "Total number of register calls for already registered hooks",
        )?;
        registry.register(Box::new(duplicate_registrations.clone()))?;

        let outcomes_recorded = IntCounter::new(
            "op_hooks_outcomes_recorded_total",
            "Total number of hook outcomes recorded",
        )?;
        registry.register(Box::new(outcomes_recorded.clone()))?;

        let failures_recorded = IntCounter::new(
            "op_hooks_failures_recorded_total",
            "Total number of failed hook outcomes recorded",
        )?;
        registry.register(Box::new(failures_recorded.clone()))?;

        let unregistered_records = IntCounter::new(
            "op_hooks_unregistered_records_total",
            "Total number of outcomes dropped for unregistered hooks",
        )?;
        registry.register(Box::new(unregistered_records.clone()))?;

        Ok(Self {
            hooks_registered,
            duplicate_registrations,
            outcomes_recorded,
            failures_recorded,
            unregistered_records,
            registry,
        })
    }

    pub fn hook_registered(&self) {
        self.hooks_registered.inc();
    }

    pub fn duplicate_registration(&self) {
        self.duplicate_registrations.inc();
    }

    pub fn outcome_recorded(&self, failed: bool) {
        self.outcomes_recorded.inc();
        if failed {
            self.failures_recorded.inc();
        }
    }

    pub fn unregistered_record(&self) {
        self.unregistered_records.inc();
    }

    pub fn registered_count(&self) -> u64 {
        self.hooks_registered.get()
    }

    pub fn duplicate_count(&self) -> u64 {
        self.duplicate_registrations.get()
    }

    pub fn recorded_count(&self) -> u64 {
        self.outcomes_recorded.get()
    }

    pub fn failure_count(&self) -> u64 {
        self.failures_recorded.get()
    }

    pub fn unregistered_count(&self) -> u64 {
        self.unregistered_records.get()
    }

    /// Get metrics registry for scraping
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Get metrics as JSON (name, help and current value per counter)
    pub fn to_json(&self) -> serde_json::Value {
        let metrics: Vec<_> = self
            .registry
            .gather()
            .into_iter()
            .map(|family| {
                let value: f64 = family
                    .get_metric()
                    .iter()
                    .map(|m| m.get_counter().get_value())
                    .sum();
                serde_json::json!({
                    "name": family.get_name(),
                    "help": family.get_help(),
                    "value": value,
                })
            })
            .collect();

        serde_json::json!({ "metrics": metrics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_move() {
        let metrics = HookMetrics::new().unwrap();
        metrics.hook_registered();
        metrics.hook_registered();
        metrics.duplicate_registration();
        metrics.outcome_recorded(false);
        metrics.outcome_recorded(true);
        metrics.unregistered_record();

        assert_eq!(metrics.registered_count(), 2);
        assert_eq!(metrics.duplicate_count(), 1);
        assert_eq!(metrics.recorded_count(), 2);
        assert_eq!(metrics.failure_count(), 1);
        assert_eq!(metrics.unregistered_count(), 1);
    }

    #[test]
    fn test_separate_instances_do_not_collide() {
        let a = HookMetrics::new().unwrap();
        let b = HookMetrics::new().unwrap();
        a.hook_registered();
        assert_eq!(a.registered_count(), 1);
        assert_eq!(b.registered_count(), 0);
    }

    #[test]
    fn test_json_lists_all_counters() {
        let metrics = HookMetrics::new().unwrap();
        metrics.outcome_recorded(true);

        let json = metrics.to_json();
        let list = json["metrics"].as_array().unwrap();
        assert_eq!(list.len(), 5);

        let failures = list
            .iter()
            .find(|m| m["name"] == "op_hooks_failures_recorded_total")
            .unwrap();
        assert_eq!(failures["value"], 1.0);
    }
}
