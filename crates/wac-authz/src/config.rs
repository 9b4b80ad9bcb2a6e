//! Configuration for the decision engine.

/// Configuration for [`AccessControlEngine`](crate::AccessControlEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Whether `acl:agentGroup` grants are evaluated.
    ///
    /// Group checks dereference remote documents; disabling them makes
    /// every decision local to the resolved ACL document.
    pub check_groups: bool,
    /// Maximum number of distinct group documents fetched per decision.
    pub max_group_documents: usize,
    /// Whether decisions are recorded in metrics.
    pub record_metrics: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            check_groups: true,
            max_group_documents: 16,
            record_metrics: true,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable group checks.
    pub fn with_check_groups(mut self, enabled: bool) -> Self {
        self.check_groups = enabled;
        self
    }

    /// Set the group document limit.
    pub fn with_max_group_documents(mut self, max: usize) -> Self {
        self.max_group_documents = max;
        self
    }

    /// Enable or disable decision metrics.
    pub fn with_record_metrics(mut self, enabled: bool) -> Self {
        self.record_metrics = enabled;
        self
    }

    /// Create a production configuration.
    pub fn production() -> Self {
        Self {
            check_groups: true,
            max_group_documents: 8,
            record_metrics: true,
        }
    }

    /// Create a development configuration.
    pub fn development() -> Self {
        Self {
            check_groups: true,
            max_group_documents: 64,
            record_metrics: false,
        }
    }
}
