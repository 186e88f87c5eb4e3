//! Outcome of a business-rule check.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Tri-state outcome of a rule check.
///
/// Rule engines return this instead of failing so callers can decide how to present
/// a rejection. Warnings collected before a fatal check are kept on the `Invalid`
/// variant too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationResult {
    Valid,
    ValidWithWarnings { warnings: Vec<String> },
    Invalid { reason: String, warnings: Vec<String> },
}

impl ValidationResult {
    pub fn success() -> Self {
        Self::Valid
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
            warnings: Vec::new(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::ValidWithWarnings {
            warnings: vec![message.into()],
        }
    }

    /// Build a successful result from whatever warnings were collected.
    pub fn from_warnings(warnings: Vec<String>) -> Self {
        if warnings.is_empty() {
            Self::Valid
        } else {
            Self::ValidWithWarnings { warnings }
        }
    }

    /// Attach earlier warnings to this result, keeping them ahead of its own.
    pub fn with_prior_warnings(self, mut prior: Vec<String>) -> Self {
        if prior.is_empty() {
            return self;
        }
        match self {
            Self::Valid => Self::ValidWithWarnings { warnings: prior },
            Self::ValidWithWarnings { warnings } => {
                prior.extend(warnings);
                Self::ValidWithWarnings { warnings: prior }
            }
            Self::Invalid { reason, warnings } => {
                prior.extend(warnings);
                Self::Invalid {
                    reason,
                    warnings: prior,
                }
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid { .. })
    }

    /// Failure reason, if the check failed.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Invalid { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Valid => &[],
            Self::ValidWithWarnings { warnings } | Self::Invalid { warnings, .. } => warnings,
        }
    }

    /// Convert into a `Result`, turning a failure into `DomainError::RuleViolation`.
    pub fn into_result(self) -> DomainResult<Vec<String>> {
        match self {
            Self::Valid => Ok(Vec::new()),
            Self::ValidWithWarnings { warnings } => Ok(warnings),
            Self::Invalid { reason, .. } => Err(DomainError::rule_violation(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_survive_a_later_failure() {
        let result = ValidationResult::failure("too many drinks")
            .with_prior_warnings(vec!["double serving".to_string()]);
        assert!(!result.is_valid());
        assert_eq!(result.reason(), Some("too many drinks"));
        assert_eq!(result.warnings(), ["double serving".to_string()]);
    }

    #[test]
    fn empty_warning_list_is_plain_success() {
        assert_eq!(ValidationResult::from_warnings(vec![]), ValidationResult::Valid);
        assert!(ValidationResult::warning("check quantity").is_valid());
    }

    #[test]
    fn failure_maps_to_rule_violation() {
        let err = ValidationResult::failure("no citrus").into_result().unwrap_err();
        assert_eq!(err, DomainError::RuleViolation("no citrus".to_string()));
    }
}
