// ── Draft user ──
//
// The in-progress, unsaved record held by the creation form. Always
// fully populated; field edits replace the whole value (builder style)
// so a partially-applied update can never be observed.

use serde::Serialize;

use super::{Gender, Role};

/// The creation form's working value.
///
/// Defaults: empty name, empty email, [`Role::User`], [`Gender::Male`].
/// Reset to defaults after a successful submission; left untouched by
/// a failed one so the operator can retry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub gender: Gender,
}

impl DraftUser {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Merge a single field edit, preserving every other field.
    pub fn apply(self, patch: FieldPatch) -> Self {
        match patch {
            FieldPatch::Name(name) => self.with_name(name),
            FieldPatch::Email(email) => self.with_email(email),
            FieldPatch::Role(role) => self.with_role(role),
            FieldPatch::Gender(gender) => self.with_gender(gender),
        }
    }
}

/// A single-field edit of the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPatch {
    Name(String),
    Email(String),
    Role(Role),
    Gender(Gender),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_fully_populated() {
        let draft = DraftUser::default();
        assert_eq!(draft.name, "");
        assert_eq!(draft.email, "");
        assert_eq!(draft.role, Role::User);
        assert_eq!(draft.gender, Gender::Male);
    }

    #[test]
    fn apply_merges_one_field_and_keeps_the_rest() {
        let draft = DraftUser::default()
            .with_name("Ann")
            .with_role(Role::Admin);

        let patched = draft.clone().apply(FieldPatch::Email("a@b.com".into()));

        assert_eq!(patched.email, "a@b.com");
        assert_eq!(patched.name, "Ann");
        assert_eq!(patched.role, Role::Admin);
        assert_eq!(patched.gender, draft.gender);
    }

    #[test]
    fn apply_replaces_previous_value_of_same_field() {
        let draft = DraftUser::default().with_gender(Gender::Female);
        let patched = draft.apply(FieldPatch::Gender(Gender::Male));
        assert_eq!(patched.gender, Gender::Male);
    }
}
