//! Structured errors for the presentation boundary
//!
//! Errors never crash the system. They are values that propagate up to the
//! shell and render as a single user-facing string.

use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INCOMPATIBLE_DIMENSIONS: &str = "INCOMPATIBLE_DIMENSIONS";
    pub const UNKNOWN_CURRENCY: &str = "UNKNOWN_CURRENCY";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";
    pub const INVALID_ARG: &str = "INVALID_ARG";
    pub const MISSING_CONFIG: &str = "MISSING_CONFIG";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Request failed but the server keeps serving
    Error,
    /// Server cannot serve this class of request until reconfigured
    Fatal,
}

/// Structured error surfaced to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaliperError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Severity level
    pub severity: Severity,
}

impl CaliperError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn unknown_unit(code: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit: '{}'", code))
            .with_suggestion("Example units: 'kg', 'm', 's', 'degC'. Use list_units for the full set")
    }

    pub fn incompatible_dimensions(details: impl Into<String>) -> Self {
        Self::new(codes::INCOMPATIBLE_DIMENSIONS, details.into())
            .with_suggestion("Pick two units that measure the same physical quantity")
    }

    pub fn unknown_currency(code: &str) -> Self {
        Self::new(codes::UNKNOWN_CURRENCY, format!("Unknown currency: '{}'", code))
            .with_suggestion("Use list_currencies for supported codes")
    }

    pub fn transport(details: impl Into<String>) -> Self {
        Self::new(codes::TRANSPORT_ERROR, format!("API error: {}", details.into()))
            .with_suggestion("Check network connectivity and retry")
    }

    pub fn invalid_response() -> Self {
        Self::new(codes::INVALID_RESPONSE, "Invalid API response")
            .with_suggestion("Retry later; the rate provider may be unavailable")
    }

    pub fn invalid_arg(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_ARG, details.into())
    }

    pub fn missing_config(details: impl Into<String>) -> Self {
        Self::new(codes::MISSING_CONFIG, details.into())
            .with_severity(Severity::Fatal)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for CaliperError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for CaliperError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_suggestion() {
        let err = CaliperError::unknown_unit("xyz");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[UNKNOWN_UNIT] Unknown unit: 'xyz'"));
        assert!(rendered.contains("suggestion:"));
    }

    #[test]
    fn test_display_without_suggestion() {
        let err = CaliperError::new("INVALID_ARG", "value must be non-negative");
        assert_eq!(err.to_string(), "[INVALID_ARG] value must be non-negative");
    }

    #[test]
    fn test_default_severity() {
        assert_eq!(CaliperError::transport("refused").severity, Severity::Error);
        assert_eq!(CaliperError::missing_config("no key").severity, Severity::Fatal);
    }

    #[test]
    fn test_serialization_shape() {
        let err = CaliperError::invalid_response();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "INVALID_RESPONSE");
        assert_eq!(json["severity"], "error");
        assert!(json.get("suggestion").is_some());
    }
}
