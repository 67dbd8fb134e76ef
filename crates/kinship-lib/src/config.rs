// ABOUTME: Configuration for tree capacity limits and anomaly rule parameters
// ABOUTME: Loaded from camelCase JSON, every field optional with documented defaults

use crate::{KinshipError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Capacity bounds for a family tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeLimits {
    /// Maximum number of people in one tree
    pub max_people: usize,
    /// Maximum number of children linked to one person
    pub max_children: usize,
    /// Maximum name length in bytes
    pub max_name_len: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_people: 1000,
            max_children: 100,
            max_name_len: 49,
        }
    }
}

/// Parameters for the anomaly rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleConfig {
    /// How many months after a parent's death a birth is still plausible
    pub posthumous_months: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            posthumous_months: 10,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KinshipConfig {
    pub limits: TreeLimits,
    pub rules: RuleConfig,
}

impl KinshipConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string and check its ranges
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_people == 0 {
            return Err(KinshipError::Config("maxPeople must be at least 1".into()));
        }
        if self.limits.max_name_len == 0 {
            return Err(KinshipError::Config("maxNameLen must be at least 1".into()));
        }
        // the month shift carries into the next year only once
        if self.rules.posthumous_months > 12 {
            return Err(KinshipError::Config(format!(
                "posthumousMonths must be between 0 and 12, got {}",
                self.rules.posthumous_months
            )));
        }
        Ok(())
    }
}
