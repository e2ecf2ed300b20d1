// ── Wire-to-domain conversion ──
//
// `roster-api` speaks plain strings for role and gender; unknown values
// collapse to the defaults rather than failing a whole listing.

use roster_api::models::{AnalyticsReport, CreateUserBody, UserRecord};

use crate::model::{AnalyticsSummary, DraftUser, User, UserId};

pub fn user_from_record(record: UserRecord) -> User {
    User {
        id: UserId::new(record.id),
        name: record.name,
        email: record.email,
        role: record.role.parse().unwrap_or_default(),
        gender: record.gender.parse().unwrap_or_default(),
        created_at: record.created_at,
    }
}

pub fn draft_to_body(draft: &DraftUser) -> CreateUserBody {
    CreateUserBody {
        name: draft.name.clone(),
        email: draft.email.clone(),
        role: draft.role.to_string(),
        gender: draft.gender.to_string(),
    }
}

pub fn analytics_from_report(report: &AnalyticsReport) -> AnalyticsSummary {
    AnalyticsSummary {
        total_users: report.total_users,
        admins: report.admins,
        members: report.members,
        male: report.male,
        female: report.female,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Role};

    fn record(role: &str, gender: &str) -> UserRecord {
        UserRecord {
            id: "u-1".into(),
            name: "Ann".into(),
            email: "a@b.com".into(),
            role: role.into(),
            gender: gender.into(),
            created_at: None,
        }
    }

    #[test]
    fn known_role_and_gender_round_trip() {
        let user = user_from_record(record("admin", "female"));
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.gender, Gender::Female);
    }

    #[test]
    fn unknown_wire_values_collapse_to_defaults() {
        let user = user_from_record(record("superuser", ""));
        assert_eq!(user.role, Role::User);
        assert_eq!(user.gender, Gender::Male);
    }

    #[test]
    fn draft_serializes_lowercase_enums() {
        let body = draft_to_body(
            &DraftUser::default()
                .with_name("Ann")
                .with_email("a@b.com")
                .with_role(Role::Admin)
                .with_gender(Gender::Female),
        );
        assert_eq!(body.role, "admin");
        assert_eq!(body.gender, "female");
    }
}
