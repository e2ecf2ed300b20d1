#![allow(clippy::unwrap_used)]
// Behavioral tests for the panel controllers, driven through recording
// doubles for the directory, the confirmation gate, and both channels.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use tokio::sync::mpsc::UnboundedReceiver;

use roster_core::{
    AnalyticsSummary, ConfirmGate, DeleteOutcome, DraftUser, FieldPatch, Gender, Notification,
    NotificationLevel, Notifier, RefreshHandle, RefreshRequest, Role, ServiceError, SubmitOutcome,
    User, UserDirectory, UserForm, UserId, UserList, ValidationError,
};

// ── Test doubles ────────────────────────────────────────────────────

/// Recording directory double. Success by default; failures are
/// programmed per test.
#[derive(Default, Clone)]
struct MockDirectory {
    created: Arc<Mutex<Vec<DraftUser>>>,
    deleted: Arc<Mutex<Vec<UserId>>>,
    reject_create_with: Arc<Mutex<Option<String>>>,
    fail_delete: Arc<AtomicBool>,
}

impl MockDirectory {
    fn new() -> Self {
        Self::default()
    }

    fn create_calls(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    fn delete_calls(&self) -> usize {
        self.deleted.lock().unwrap().len()
    }
}

impl UserDirectory for MockDirectory {
    fn create_user(
        &self,
        draft: &DraftUser,
    ) -> impl Future<Output = Result<User, ServiceError>> + Send {
        self.created.lock().unwrap().push(draft.clone());
        let rejection = self.reject_create_with.lock().unwrap().clone();
        let stored = User {
            id: UserId::from("u-created"),
            name: draft.name.clone(),
            email: draft.email.clone(),
            role: draft.role,
            gender: draft.gender,
            created_at: None,
        };
        async move {
            match rejection {
                Some(message) => Err(ServiceError::Rejected {
                    message,
                    status: Some(409),
                }),
                None => Ok(stored),
            }
        }
    }

    fn delete_user(&self, id: &UserId) -> impl Future<Output = Result<(), ServiceError>> + Send {
        self.deleted.lock().unwrap().push(id.clone());
        let fail = self.fail_delete.load(Ordering::SeqCst);
        async move {
            if fail {
                Err(ServiceError::Rejected {
                    message: "user is referenced by an open task".into(),
                    status: Some(409),
                })
            } else {
                Ok(())
            }
        }
    }

    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, ServiceError>> + Send {
        async move { Ok(Vec::new()) }
    }

    fn fetch_analytics(
        &self,
    ) -> impl Future<Output = Result<AnalyticsSummary, ServiceError>> + Send {
        async move { Ok(AnalyticsSummary::default()) }
    }
}

/// Gate answering with a constant, recording every prompt shown.
#[derive(Clone)]
struct FixedGate {
    accept: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FixedGate {
    fn accepting() -> Self {
        Self {
            accept: true,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn declining() -> Self {
        Self {
            accept: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl ConfirmGate for FixedGate {
    fn confirm(&self, prompt: &str) -> impl Future<Output = bool> + Send {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        let decision = self.accept;
        async move { decision }
    }
}

// ── Harness ─────────────────────────────────────────────────────────

struct Harness {
    directory: MockDirectory,
    form: UserForm<MockDirectory>,
    refresh_rx: UnboundedReceiver<RefreshRequest>,
    toast_rx: UnboundedReceiver<Notification>,
}

fn harness() -> Harness {
    let directory = MockDirectory::new();
    let (refresh, refresh_rx) = RefreshHandle::channel();
    let (notifier, toast_rx) = Notifier::channel();
    let form = UserForm::new(directory.clone(), refresh, notifier);
    Harness {
        directory,
        form,
        refresh_rx,
        toast_rx,
    }
}

fn list_harness(
    gate: FixedGate,
) -> (
    MockDirectory,
    UserList<MockDirectory, FixedGate>,
    UnboundedReceiver<RefreshRequest>,
    UnboundedReceiver<Notification>,
) {
    let directory = MockDirectory::new();
    let (refresh, refresh_rx) = RefreshHandle::channel();
    let (notifier, toast_rx) = Notifier::channel();
    let list = UserList::new(directory.clone(), gate, refresh, notifier);
    (directory, list, refresh_rx, toast_rx)
}

fn drain<T>(rx: &mut UnboundedReceiver<T>) -> Vec<T> {
    let mut out = Vec::new();
    while let Ok(item) = rx.try_recv() {
        out.push(item);
    }
    out
}

fn count(requests: &[RefreshRequest], wanted: RefreshRequest) -> usize {
    requests.iter().filter(|r| **r == wanted).count()
}

// ── Validation gate ─────────────────────────────────────────────────

#[tokio::test]
async fn empty_name_and_email_reports_combined_message_and_skips_service() {
    let mut h = harness();

    let outcome = h.form.submit().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Rejected(ValidationError::NameAndEmailMissing)
    ));
    assert_eq!(h.directory.create_calls(), 0);
    assert!(drain(&mut h.refresh_rx).is_empty());

    let toasts = drain(&mut h.toast_rx);
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].message, "Name and Email are required!");
    assert_eq!(toasts[0].level, NotificationLevel::Error);
}

#[tokio::test]
async fn missing_name_and_missing_email_are_symmetric() {
    let mut h = harness();
    h.form.update_field(FieldPatch::Email("a@b.co".into()));
    let outcome = h.form.submit().await;
    assert!(matches!(
        outcome,
        SubmitOutcome::Rejected(ValidationError::NameMissing)
    ));
    assert_eq!(drain(&mut h.toast_rx)[0].message, "Name is required!");

    let mut h = harness();
    h.form.update_field(FieldPatch::Name("Ann".into()));
    let outcome = h.form.submit().await;
    assert!(matches!(
        outcome,
        SubmitOutcome::Rejected(ValidationError::EmailMissing)
    ));
    assert_eq!(drain(&mut h.toast_rx)[0].message, "Email is required!");
}

#[tokio::test]
async fn malformed_email_warns_and_skips_service() {
    let mut h = harness();
    h.form.update_field(FieldPatch::Name("Ann".into()));
    h.form.update_field(FieldPatch::Email("ann.example.io".into()));

    let outcome = h.form.submit().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Rejected(ValidationError::EmailMalformed)
    ));
    assert_eq!(h.directory.create_calls(), 0);

    let toasts = drain(&mut h.toast_rx);
    assert_eq!(toasts[0].message, "Valid Email is required!");
    assert_eq!(toasts[0].level, NotificationLevel::Warning);
}

#[tokio::test]
async fn minimal_valid_emails_pass_the_gate() {
    for email in ["a@b.co", "x.y@z.io"] {
        let h = harness();
        h.form.update_field(FieldPatch::Name("Ann".into()));
        h.form.update_field(FieldPatch::Email(email.into()));

        let outcome = h.form.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Created(_)), "{email}");
        assert_eq!(h.directory.create_calls(), 1);
    }
}

// ── Create flow ─────────────────────────────────────────────────────

#[tokio::test]
async fn successful_create_resets_draft_refreshes_both_views_and_toasts() {
    let mut h = harness();
    h.form.update_field(FieldPatch::Name("Ann".into()));
    h.form.update_field(FieldPatch::Email("a@b.com".into()));
    h.form.update_field(FieldPatch::Role(Role::Admin));
    h.form.update_field(FieldPatch::Gender(Gender::Female));

    let outcome = h.form.submit().await;

    let SubmitOutcome::Created(user) = outcome else {
        panic!("expected Created, got {outcome:?}");
    };
    assert_eq!(user.name, "Ann");

    // the submitted draft reached the service intact
    let created = h.directory.created.lock().unwrap();
    assert_eq!(created[0].role, Role::Admin);
    assert_eq!(created[0].gender, Gender::Female);
    drop(created);

    // draft back to defaults
    assert_eq!(h.form.draft(), DraftUser::default());

    // both dependent views refetched exactly once, order-insensitive
    let requests = drain(&mut h.refresh_rx);
    assert_eq!(count(&requests, RefreshRequest::Users), 1);
    assert_eq!(count(&requests, RefreshRequest::Analytics), 1);
    assert_eq!(requests.len(), 2);

    let toasts = drain(&mut h.toast_rx);
    assert_eq!(toasts[0].message, "User added successfully!");
    assert_eq!(toasts[0].level, NotificationLevel::Success);
}

#[tokio::test]
async fn failed_create_preserves_draft_and_surfaces_service_detail() {
    let mut h = harness();
    *h.directory.reject_create_with.lock().unwrap() = Some("Duplicate email".into());
    h.form.update_field(FieldPatch::Name("Ann".into()));
    h.form.update_field(FieldPatch::Email("a@b.com".into()));
    let before = h.form.draft();

    let outcome = h.form.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed));
    // draft untouched so the operator can retry
    assert_eq!(h.form.draft(), before);
    // neither view refetched
    assert!(drain(&mut h.refresh_rx).is_empty());

    let toasts = drain(&mut h.toast_rx);
    assert_eq!(toasts.len(), 1);
    assert!(toasts[0].message.contains("Duplicate email"));
    assert_eq!(toasts[0].level, NotificationLevel::Error);
}

#[tokio::test]
async fn opaque_create_failure_falls_back_to_generic_message() {
    // A rejection without service detail is modeled by making the mock
    // return a detail-free error through a small local override: the
    // simplest opaque failure here is a timeout surfaced by the client.
    struct TimeoutDirectory;

    impl UserDirectory for TimeoutDirectory {
        fn create_user(
            &self,
            _draft: &DraftUser,
        ) -> impl Future<Output = Result<User, ServiceError>> + Send {
            async move { Err(ServiceError::Timeout) }
        }

        fn delete_user(
            &self,
            _id: &UserId,
        ) -> impl Future<Output = Result<(), ServiceError>> + Send {
            async move { Ok(()) }
        }

        fn list_users(&self) -> impl Future<Output = Result<Vec<User>, ServiceError>> + Send {
            async move { Ok(Vec::new()) }
        }

        fn fetch_analytics(
            &self,
        ) -> impl Future<Output = Result<AnalyticsSummary, ServiceError>> + Send {
            async move { Ok(AnalyticsSummary::default()) }
        }
    }

    let (refresh, _refresh_rx) = RefreshHandle::channel();
    let (notifier, mut toast_rx) = Notifier::channel();
    let form = UserForm::new(TimeoutDirectory, refresh, notifier);
    form.update_field(FieldPatch::Name("Ann".into()));
    form.update_field(FieldPatch::Email("a@b.com".into()));

    let outcome = form.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed));
    let toasts = drain(&mut toast_rx);
    assert_eq!(toasts[0].message, "Error adding user");
}

// ── Delete flow ─────────────────────────────────────────────────────

#[tokio::test]
async fn declined_confirmation_has_zero_side_effects() {
    let gate = FixedGate::declining();
    let (directory, list, mut refresh_rx, mut toast_rx) = list_harness(gate.clone());

    let outcome = list.delete_user(&UserId::from("u-1")).await;

    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(directory.delete_calls(), 0);
    assert!(drain(&mut refresh_rx).is_empty());
    assert!(drain(&mut toast_rx).is_empty());

    // the prompt still reached the gate
    assert_eq!(
        gate.prompts.lock().unwrap().as_slice(),
        ["Are you sure you want to delete this user?"]
    );
}

#[tokio::test]
async fn accepted_delete_refreshes_both_views_and_toasts() {
    let gate = FixedGate::accepting();
    let (directory, list, mut refresh_rx, mut toast_rx) = list_harness(gate);

    let outcome = list.delete_user(&UserId::from("u-1")).await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(directory.delete_calls(), 1);
    assert_eq!(
        directory.deleted.lock().unwrap().as_slice(),
        [UserId::from("u-1")]
    );

    let requests = drain(&mut refresh_rx);
    assert_eq!(count(&requests, RefreshRequest::Users), 1);
    assert_eq!(count(&requests, RefreshRequest::Analytics), 1);

    let toasts = drain(&mut toast_rx);
    assert_eq!(toasts[0].message, "User deleted successfully!");
    assert_eq!(toasts[0].level, NotificationLevel::Success);
}

#[tokio::test]
async fn failed_delete_shows_generic_message_and_no_refresh() {
    let gate = FixedGate::accepting();
    let (directory, list, mut refresh_rx, mut toast_rx) = list_harness(gate);
    directory.fail_delete.store(true, Ordering::SeqCst);

    let outcome = list.delete_user(&UserId::from("u-1")).await;

    assert_eq!(outcome, DeleteOutcome::Failed);
    // the underlying detail is deliberately discarded from the toast
    let toasts = drain(&mut toast_rx);
    assert_eq!(toasts[0].message, "Error deleting user");
    assert_eq!(toasts[0].level, NotificationLevel::Error);
    // listing left stale until the next refresh
    assert!(drain(&mut refresh_rx).is_empty());
}

#[tokio::test]
async fn refresh_is_a_passthrough_issued_once_per_call() {
    let gate = FixedGate::accepting();
    let (_directory, list, mut refresh_rx, _toast_rx) = list_harness(gate);

    list.refresh();
    list.refresh();
    list.refresh();

    let requests = drain(&mut refresh_rx);
    assert_eq!(count(&requests, RefreshRequest::Users), 3);
    assert_eq!(count(&requests, RefreshRequest::Analytics), 0);
}
