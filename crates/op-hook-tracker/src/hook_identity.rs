use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HookTrackerError, Result};

/// Canonical value for hooks declared in the backup/restore spec
pub const HOOK_SOURCE_SPEC: &str = "spec";

/// Canonical value for hooks declared through pod annotations
pub const HOOK_SOURCE_ANNOTATION: &str = "annotation";

/// Token used by the backup hook handler for spec-declared hooks
pub const HANDLER_SOURCE_BACKUP_SPEC: &str = "backupSpec";

/// Name recorded for annotation hooks, which have no declared name
pub const ANNOTATION_HOOK_NAME: &str = "<from-annotation>";

/// Where a hook was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookSource {
    /// Declared in the backup/restore specification
    Spec,

    /// Declared via pod annotation
    Annotation,
}

impl HookSource {
    /// Normalize a handler's origin token into a canonical source.
    ///
    /// Only the backup spec token maps to `Spec`; anything else, including
    /// the empty string, is treated as annotation-origin.
    pub fn from_handler(token: &str) -> Self {
        if token == HANDLER_SOURCE_BACKUP_SPEC {
            HookSource::Spec
        } else {
            HookSource::Annotation
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HookSource::Spec => HOOK_SOURCE_SPEC,
            HookSource::Annotation => HOOK_SOURCE_ANNOTATION,
        }
    }
}

impl fmt::Display for HookSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookSource {
    type Err = HookTrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            HOOK_SOURCE_SPEC => Ok(HookSource::Spec),
            HOOK_SOURCE_ANNOTATION => Ok(HookSource::Annotation),
            other => Err(HookTrackerError::invalid_source(other)),
        }
    }
}

/// Normalize a handler's origin token. See [`HookSource::from_handler`].
pub fn normalize_hook_source(token: &str) -> HookSource {
    HookSource::from_handler(token)
}

/// Backup hook phase. Restore hooks carry no phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookPhase {
    Pre,
    Post,
}

impl HookPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookPhase::Pre => "pre",
            HookPhase::Post => "post",
        }
    }

    /// Parse a phase where the empty string means "no phase" (restore hooks)
    pub fn parse_optional(s: &str) -> Result<Option<Self>> {
        if s.is_empty() {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookPhase {
    type Err = HookTrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pre" => Ok(HookPhase::Pre),
            "post" => Ok(HookPhase::Post),
            other => Err(HookTrackerError::invalid_phase(other)),
        }
    }
}

/// Identity of one trackable hook execution.
///
/// Two executions that differ in any field are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HookIdentity {
    /// Namespace of the pod the hook runs against.
    /// For annotation hooks this is the annotated pod's namespace.
    pub pod_namespace: String,

    /// Pod the hook runs against
    pub pod_name: String,

    /// Container the hook executes in. Spec hooks with different names may
    /// share a container.
    pub container: String,

    /// Backup phase; `None` for restore hooks
    pub phase: Option<HookPhase>,

    /// Declared hook name, or empty / [`ANNOTATION_HOOK_NAME`] for annotation hooks
    pub name: String,

    /// Where the hook was declared
    pub source: HookSource,
}

impl HookIdentity {
    pub fn new(
        pod_namespace: impl Into<String>,
        pod_name: impl Into<String>,
        container: impl Into<String>,
        source: HookSource,
        name: impl Into<String>,
        phase: Option<HookPhase>,
    ) -> Self {
        Self {
            pod_namespace: pod_namespace.into(),
            pod_name: pod_name.into(),
            container: container.into(),
            phase,
            name: name.into(),
            source,
        }
    }
}

impl fmt::Display for HookIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}[{}] {}:{}",
            self.pod_namespace, self.pod_name, self.container, self.source, self.name
        )?;
        if let Some(phase) = self.phase {
            write!(f, " ({})", phase)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_backup_spec_token_is_spec() {
        assert_eq!(HookSource::from_handler("backupSpec"), HookSource::Spec);
        assert_eq!(normalize_hook_source("backupSpec").as_str(), HOOK_SOURCE_SPEC);
    }

    #[test]
    fn test_unknown_tokens_are_annotation() {
        let tokens = ["", "annotation", "spec", "BackupSpec", "restoreSpec", "  backupSpec"];
        for token in tokens {
            assert_eq!(
                HookSource::from_handler(token),
                HookSource::Annotation,
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_source_from_str_is_strict() {
        assert_eq!("spec".parse::<HookSource>().unwrap(), HookSource::Spec);
        assert_eq!(
            "annotation".parse::<HookSource>().unwrap(),
            HookSource::Annotation
        );
        assert!(matches!(
            "backupSpec".parse::<HookSource>(),
            Err(HookTrackerError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_phase_parsing() {
        assert_eq!(HookPhase::parse_optional("").unwrap(), None);
        assert_eq!(HookPhase::parse_optional("pre").unwrap(), Some(HookPhase::Pre));
        assert_eq!(HookPhase::parse_optional("post").unwrap(), Some(HookPhase::Post));
        assert!(matches!(
            HookPhase::parse_optional("during"),
            Err(HookTrackerError::InvalidPhase(_))
        ));
    }

    #[test]
    fn test_identity_uses_every_field() {
        let base = HookIdentity::new(
            "ns1",
            "pod1",
            "c1",
            HookSource::Spec,
            "h1",
            Some(HookPhase::Pre),
        );

        let variants = vec![
            HookIdentity {
                pod_namespace: "ns2".into(),
                ..base.clone()
            },
            HookIdentity {
                pod_name: "pod2".into(),
                ..base.clone()
            },
            HookIdentity {
                container: "c2".into(),
                ..base.clone()
            },
            HookIdentity {
                phase: Some(HookPhase::Post),
                ..base.clone()
            },
            HookIdentity {
                phase: None,
                ..base.clone()
            },
            HookIdentity {
                name: "h2".into(),
                ..base.clone()
            },
            HookIdentity {
                source: HookSource::Annotation,
                ..base.clone()
            },
        ];

        let mut set = HashSet::new();
        set.insert(base.clone());
        for v in &variants {
            assert_ne!(v, &base);
            set.insert(v.clone());
        }
        assert_eq!(set.len(), variants.len() + 1);
    }

    #[test]
    fn test_serde_lowercase() {
        let id = HookIdentity::new(
            "ns",
            "pod",
            "c",
            HookSource::Annotation,
            ANNOTATION_HOOK_NAME,
            None,
        );
        let value = serde_json::to_value(&id).unwrap();
        assert_eq!(value["source"], "annotation");
        assert!(value["phase"].is_null());
    }

    #[test]
    fn test_display() {
        let id = HookIdentity::new(
            "ns",
            "pod",
            "c",
            HookSource::Spec,
            "flush",
            Some(HookPhase::Pre),
        );
        assert_eq!(id.to_string(), "ns/pod[c] spec:flush (pre)");
    }
}
