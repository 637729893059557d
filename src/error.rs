//! Error types for the Salon Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving tiers and
//! calculating payroll.

use thiserror::Error;

/// The main error type for the Salon Payroll Engine.
///
/// All fallible operations in the engine return this error type. Configuration
/// and input errors are never recovered locally: a wrong tier table or a
/// negative revenue figure must stop the calculation rather than pay an
/// employee incorrectly.
///
/// # Example
///
/// ```
/// use salon_payroll::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tiers.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tiers.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A tier table is missing, malformed or non-monotonic.
    #[error("Configuration error in tier table '{group}': {message}")]
    Configuration {
        /// The employee group whose table is defective.
        group: String,
        /// A description of the defect.
        message: String,
    },

    /// An input value was rejected at the calculator boundary.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A tier name did not match any tier in the table.
    #[error("Tier not found: {name}")]
    TierNotFound {
        /// The tier name that was not found.
        name: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Configuration`] error.
    pub(crate) fn configuration(group: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            group: group.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::InvalidInput`] error.
    pub(crate) fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/tiers.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/tiers.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_configuration_error_displays_group_and_message() {
        let error = EngineError::configuration("nail_technician", "tier list is empty");
        assert_eq!(
            error.to_string(),
            "Configuration error in tier table 'nail_technician': tier list is empty"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("monthly_revenue", "must not be negative");
        assert_eq!(
            error.to_string(),
            "Invalid input field 'monthly_revenue': must not be negative"
        );
    }

    #[test]
    fn test_tier_not_found_displays_name() {
        let error = EngineError::TierNotFound {
            name: "Stylist Legend".to_string(),
        };
        assert_eq!(error.to_string(), "Tier not found: Stylist Legend");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_tier_not_found() -> EngineResult<()> {
            Err(EngineError::TierNotFound {
                name: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_tier_not_found()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::TierNotFound { .. })
        ));
    }
}
