// ── Core error types ──
//
// User-facing errors from roster-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<roster_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Failure surfaced by the external create/delete/list operations.
///
/// Always caught at the call site inside the panel controllers; never
/// propagated further up. Reported to the user through the notification
/// sink and, for mutations, logged to the diagnostic channel.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Cannot reach the directory service: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Authentication failed: invalid API key")]
    AuthenticationFailed,

    /// The service accepted the request shape but rejected it, with a
    /// human-readable message (e.g. a duplicate email).
    #[error("{message}")]
    Rejected { message: String, status: Option<u16> },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// The remote rejection message, when the service supplied one.
    ///
    /// Opaque transport failures carry no service-authored detail and
    /// return `None` — callers fall back to a generic message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<roster_api::Error> for ServiceError {
    fn from(err: roster_api::Error) -> Self {
        match err {
            roster_api::Error::InvalidApiKey => ServiceError::AuthenticationFailed,
            roster_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    ServiceError::Timeout
                } else {
                    ServiceError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                }
            }
            roster_api::Error::Api { status, message } => ServiceError::Rejected {
                message,
                status: Some(status),
            },
            roster_api::Error::InvalidUrl(e) => {
                ServiceError::Internal(format!("invalid service URL: {e}"))
            }
            roster_api::Error::Deserialization { message, .. } => {
                ServiceError::Internal(format!("undecodable response: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_exposes_service_detail() {
        let err = ServiceError::from(roster_api::Error::Api {
            status: 409,
            message: "Duplicate email".into(),
        });
        assert_eq!(err.detail(), Some("Duplicate email"));
    }

    #[test]
    fn auth_and_internal_errors_have_no_detail() {
        assert_eq!(ServiceError::AuthenticationFailed.detail(), None);
        assert_eq!(ServiceError::Internal("x".into()).detail(), None);
        assert_eq!(ServiceError::Timeout.detail(), None);
    }
}
