//! Approval rule descriptors.
//!
//! Rules are stored and listed for display only; nothing evaluates them
//! against expenses.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::store::{Collection, Repository, StoreError};

/// A named approval rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Display name.
    pub name: String,
    /// Free-form rule kind, e.g. "percentage" or "specific".
    #[serde(rename = "type")]
    pub rule_type: String,
    /// Free-form threshold, may be empty.
    #[serde(default)]
    pub threshold: String,
}

/// Stored approval rules.
pub struct RuleDirectory {
    rules: Collection<Rule>,
}

impl RuleDirectory {
    /// Creates a directory over `repository`.
    pub fn new(repository: Arc<dyn Repository<Rule>>) -> Self {
        Self {
            rules: Collection::new(repository),
        }
    }

    /// Appends a rule. No validation.
    pub async fn create_rule(
        &self,
        name: &str,
        rule_type: &str,
        threshold: &str,
    ) -> Result<Rule, StoreError> {
        let rule = Rule {
            name: name.to_string(),
            rule_type: rule_type.to_string(),
            threshold: threshold.to_string(),
        };

        let stored = rule.clone();
        self.rules
            .mutate(move |rules| {
                rules.push(stored);
                Ok::<_, StoreError>(())
            })
            .await?;

        info!(name = %rule.name, rule_type = %rule.rule_type, "Rule created");
        Ok(rule)
    }

    /// Lists rules in creation order.
    pub async fn list_rules(&self) -> Result<Vec<Rule>, StoreError> {
        self.rules.load().await
    }
}
