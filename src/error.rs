//! Error types for the attendance client.
//!
//! The evaluation core is total and never fails. Everything that touches the
//! outside world (configuration files, the remote sheet endpoint, the
//! position source, user input) reports through [`AttendanceError`].

use thiserror::Error;

/// Failure to obtain a position fix.
///
/// Mirrors the failure modes a geolocation provider reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user refused access to their location.
    #[error("location permission denied")]
    PermissionDenied,
    /// The provider could not determine a position.
    #[error("location information is unavailable")]
    PositionUnavailable,
    /// The provider did not answer in time.
    #[error("timed out while determining location")]
    Timeout,
    /// No location provider is available on this device.
    #[error("geolocation is not supported")]
    Unsupported,
}

/// The main error type for the attendance client.
///
/// # Example
///
/// ```
/// use attendance_engine::error::AttendanceError;
///
/// let error = AttendanceError::Rejected {
///     action: "login".to_string(),
///     reason: "employee not found".to_string(),
/// };
/// assert_eq!(error.to_string(), "Remote endpoint rejected 'login': employee not found");
/// ```
#[derive(Debug, Error)]
pub enum AttendanceError {
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

    /// Configuration parsed but violates an invariant.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// The HTTP request could not be completed.
    #[error("Request '{action}' failed: {message}")]
    Transport {
        /// The remote action being invoked.
        action: String,
        /// The underlying transport error.
        message: String,
    },

    /// The endpoint answered with a body that could not be decoded.
    #[error("Unexpected response to '{action}': {message}")]
    ResponseParse {
        /// The remote action being invoked.
        action: String,
        /// A description of the decode error.
        message: String,
    },

    /// The endpoint answered but reported failure.
    #[error("Remote endpoint rejected '{action}': {reason}")]
    Rejected {
        /// The remote action being invoked.
        action: String,
        /// The reason reported by the endpoint, or a generic one.
        reason: String,
    },

    /// An operation that needs a logged-in employee was called without one.
    #[error("No employee is logged in")]
    NotLoggedIn,

    /// User supplied input failed client-side validation.
    #[error("Invalid {field}: {message}")]
    InvalidRequest {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A position fix could not be obtained.
    #[error("Location error: {0}")]
    Location(#[from] LocationError),
}

impl AttendanceError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        AttendanceError::InvalidRequest {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return AttendanceError.
pub type AttendanceResult<T> = Result<T, AttendanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = AttendanceError::ConfigNotFound {
            path: "/missing/attendance.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/attendance.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = AttendanceError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_transport_displays_action() {
        let error = AttendanceError::Transport {
            action: "checkStatus".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Request 'checkStatus' failed: connection refused"
        );
    }

    #[test]
    fn test_invalid_request_displays_field_and_message() {
        let error = AttendanceError::invalid("end_date", "must not be before start_date");
        assert_eq!(
            error.to_string(),
            "Invalid end_date: must not be before start_date"
        );
    }

    #[test]
    fn test_location_error_converts() {
        fn locate() -> AttendanceResult<()> {
            Err(LocationError::PermissionDenied)?;
            Ok(())
        }

        match locate() {
            Err(AttendanceError::Location(LocationError::PermissionDenied)) => {}
            other => panic!("Expected Location error, got {:?}", other),
        }
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<AttendanceError>();
        assert_error::<LocationError>();
    }
}
