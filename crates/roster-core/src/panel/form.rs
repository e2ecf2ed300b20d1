// ── Creation-form controller ──

use std::sync::{Arc, Mutex};

use tracing::error;

use crate::directory::UserDirectory;
use crate::model::{DraftUser, FieldPatch, User};
use crate::notify::{Notification, Notifier};
use crate::refresh::RefreshHandle;
use crate::validate::{ValidationError, validate_draft};

/// What a [`UserForm::submit`] call amounted to.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The validation gate rejected the draft; no service call was made.
    Rejected(ValidationError),
    /// The service stored the user; the draft was reset and both views
    /// were asked to refetch.
    Created(User),
    /// The service refused or was unreachable; the draft is preserved
    /// for retry.
    Failed,
}

/// Controller for the add-user form.
///
/// Owns the [`DraftUser`] exclusively. Cheaply cloneable — the UI keeps
/// one clone for rendering and field edits and hands another to the
/// spawned submit task. Holds no external resources requiring cleanup;
/// a submit resolving after every clone but the task's is gone only
/// talks to channels that tolerate closed receivers.
#[derive(Clone)]
pub struct UserForm<D> {
    inner: Arc<FormInner<D>>,
}

struct FormInner<D> {
    directory: D,
    refresh: RefreshHandle,
    notifier: Notifier,
    draft: Mutex<DraftUser>,
}

impl<D: UserDirectory> UserForm<D> {
    pub fn new(directory: D, refresh: RefreshHandle, notifier: Notifier) -> Self {
        Self {
            inner: Arc::new(FormInner {
                directory,
                refresh,
                notifier,
                draft: Mutex::new(DraftUser::default()),
            }),
        }
    }

    /// Snapshot of the current draft.
    pub fn draft(&self) -> DraftUser {
        self.inner.draft.lock().expect("draft lock").clone()
    }

    /// Merge one field edit into the draft. No validation happens here;
    /// the gate runs at submit time.
    pub fn update_field(&self, patch: FieldPatch) {
        let mut draft = self.inner.draft.lock().expect("draft lock");
        *draft = draft.clone().apply(patch);
    }

    /// Validate and submit the current draft.
    ///
    /// Never returns an error: every failure mode ends in a notification
    /// (and, for service failures, a diagnostic log line) and an
    /// [`SubmitOutcome`] the caller may inspect.
    pub async fn submit(&self) -> SubmitOutcome {
        let draft = self.draft();

        if let Err(rule) = validate_draft(&draft) {
            self.inner.notifier.send(Notification {
                message: rule.to_string(),
                level: rule.level(),
            });
            return SubmitOutcome::Rejected(rule);
        }

        match self.inner.directory.create_user(&draft).await {
            Ok(user) => {
                *self.inner.draft.lock().expect("draft lock") = DraftUser::default();
                self.inner.refresh.request_users();
                self.inner.refresh.request_analytics();
                self.inner.notifier.success("User added successfully!");
                SubmitOutcome::Created(user)
            }
            Err(e) => {
                error!(error = %e, "adding user failed");
                let message = match e.detail() {
                    Some(detail) => format!("Error: {detail}"),
                    None => "Error adding user".to_owned(),
                };
                self.inner.notifier.error(message);
                SubmitOutcome::Failed
            }
        }
    }
}
