// ── Form validation gate ──
//
// Ordered, short-circuiting checks run before any service call.
// Failures are reported through the notification sink only -- never
// logged, never propagated, never fatal.

use thiserror::Error;

use crate::model::DraftUser;
use crate::notify::NotificationLevel;

/// A draft rejected before reaching the service.
///
/// The `Display` text is the exact user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name and Email are required!")]
    NameAndEmailMissing,

    #[error("Name is required!")]
    NameMissing,

    #[error("Email is required!")]
    EmailMissing,

    #[error("Valid Email is required!")]
    EmailMalformed,
}

impl ValidationError {
    /// Notification severity: a malformed email is a warning, the
    /// missing-field rejections are errors.
    pub fn level(self) -> NotificationLevel {
        match self {
            Self::EmailMalformed => NotificationLevel::Warning,
            _ => NotificationLevel::Error,
        }
    }
}

/// Run the validation gate, in strict order, stopping at the first failure.
pub fn validate_draft(draft: &DraftUser) -> Result<(), ValidationError> {
    if draft.name.is_empty() && draft.email.is_empty() {
        return Err(ValidationError::NameAndEmailMissing);
    }
    if draft.name.is_empty() {
        return Err(ValidationError::NameMissing);
    }
    if draft.email.is_empty() {
        return Err(ValidationError::EmailMissing);
    }
    if !is_well_formed_email(&draft.email) {
        return Err(ValidationError::EmailMalformed);
    }
    Ok(())
}

/// `local@domain.tld` shape check: no whitespace, exactly one `@` with a
/// non-empty part on each side, and a `.` inside the domain that is
/// neither its first nor its last character.
fn is_well_formed_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::DraftUser;

    fn draft(name: &str, email: &str) -> DraftUser {
        DraftUser::default().with_name(name).with_email(email)
    }

    #[test]
    fn both_missing_wins_over_single_missing() {
        assert_eq!(
            validate_draft(&draft("", "")),
            Err(ValidationError::NameAndEmailMissing)
        );
    }

    #[test]
    fn name_checked_before_email() {
        assert_eq!(
            validate_draft(&draft("", "a@b.co")),
            Err(ValidationError::NameMissing)
        );
        assert_eq!(
            validate_draft(&draft("Ann", "")),
            Err(ValidationError::EmailMissing)
        );
    }

    #[test]
    fn malformed_email_is_last_and_warning_level() {
        let err = validate_draft(&draft("Ann", "not-an-email")).unwrap_err();
        assert_eq!(err, ValidationError::EmailMalformed);
        assert_eq!(err.level(), NotificationLevel::Warning);
        assert_eq!(err.to_string(), "Valid Email is required!");
    }

    #[test]
    fn missing_fields_are_error_level() {
        assert_eq!(
            ValidationError::NameAndEmailMissing.level(),
            NotificationLevel::Error
        );
        assert_eq!(ValidationError::NameMissing.level(), NotificationLevel::Error);
        assert_eq!(ValidationError::EmailMissing.level(), NotificationLevel::Error);
    }

    #[test]
    fn well_formed_emails_pass() {
        for email in ["a@b.co", "x.y@z.io", "first.last@sub.domain.tld"] {
            assert!(validate_draft(&draft("Ann", email)).is_ok(), "{email}");
        }
    }

    #[test]
    fn malformed_emails_fail() {
        for email in [
            "plain",
            "a@b",
            "a@.b",
            "a@b.",
            "@b.co",
            "a@",
            "a b@c.io",
            "a@b c.io",
            "a@@b.co",
        ] {
            assert_eq!(
                validate_draft(&draft("Ann", email)),
                Err(ValidationError::EmailMalformed),
                "{email}"
            );
        }
    }

    #[test]
    fn dotted_domain_edge_cases_match_the_shape_rule() {
        // dots inside the domain qualify even when doubled
        assert!(validate_draft(&draft("Ann", "a@b..c")).is_ok());
        // a lone dot at either edge does not
        assert_eq!(
            validate_draft(&draft("Ann", "a@.")),
            Err(ValidationError::EmailMalformed)
        );
    }
}
