//! Per-run configuration.

use crate::error::FlattenError;
use serde::{Deserialize, Serialize};

/// Block name meaning "control has left the state machine".
pub const DEFAULT_EXIT_LABEL: &str = "$exit";

/// Prefix of compiler-minted block names. Input labels never start with it.
pub const DEFAULT_ANONYMOUS_PREFIX: &str = "$sm";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlattenOptions {
    /// Fall-through target of the whole body.
    pub exit_label: String,
    /// Prefix for anonymous block names; a counter is appended.
    pub anonymous_prefix: String,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            exit_label: DEFAULT_EXIT_LABEL.to_string(),
            anonymous_prefix: DEFAULT_ANONYMOUS_PREFIX.to_string(),
        }
    }
}

impl FlattenOptions {
    pub fn with_exit_label(mut self, exit_label: impl Into<String>) -> Self {
        self.exit_label = exit_label.into();
        self
    }

    pub fn with_anonymous_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.anonymous_prefix = prefix.into();
        self
    }

    pub fn validate(&self) -> Result<(), FlattenError> {
        if self.exit_label.is_empty() {
            return Err(FlattenError::InvalidOptions(
                "exit label must not be empty".to_string(),
            ));
        }
        if self.anonymous_prefix.is_empty() {
            return Err(FlattenError::InvalidOptions(
                "anonymous label prefix must not be empty".to_string(),
            ));
        }
        if self.exit_label.starts_with(&self.anonymous_prefix) {
            return Err(FlattenError::InvalidOptions(format!(
                "exit label `{}` starts with the anonymous prefix `{}`",
                self.exit_label, self.anonymous_prefix
            )));
        }
        Ok(())
    }

    /// Whether an input label would clash with a name this run can produce.
    pub fn is_reserved(&self, label: &str) -> bool {
        label == self.exit_label || label.starts_with(&self.anonymous_prefix)
    }
}
