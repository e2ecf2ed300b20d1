//! The abstract directory capability the panel mutates through.
//!
//! `roster-api`'s [`DirectoryClient`] is the production implementation;
//! tests substitute recording mocks. Futures are `Send` so callers can
//! run submissions on a spawned task while the UI keeps rendering.

use std::future::Future;

use roster_api::DirectoryClient;

use crate::convert;
use crate::error::ServiceError;
use crate::model::{AnalyticsSummary, DraftUser, User, UserId};

/// Remote user-directory operations, as seen by the panel.
pub trait UserDirectory: Send + Sync + 'static {
    /// Persist a new user built from the draft; returns the stored record.
    fn create_user(
        &self,
        draft: &DraftUser,
    ) -> impl Future<Output = Result<User, ServiceError>> + Send;

    /// Remove a user by identifier.
    fn delete_user(&self, id: &UserId)
    -> impl Future<Output = Result<(), ServiceError>> + Send;

    /// Fetch the whole users collection.
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, ServiceError>> + Send;

    /// Fetch the sibling aggregate view.
    fn fetch_analytics(
        &self,
    ) -> impl Future<Output = Result<AnalyticsSummary, ServiceError>> + Send;
}

impl UserDirectory for DirectoryClient {
    fn create_user(
        &self,
        draft: &DraftUser,
    ) -> impl Future<Output = Result<User, ServiceError>> + Send {
        let body = convert::draft_to_body(draft);
        async move {
            let record = DirectoryClient::create_user(self, &body).await?;
            Ok(convert::user_from_record(record))
        }
    }

    fn delete_user(
        &self,
        id: &UserId,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send {
        let id = id.as_str().to_owned();
        async move { Ok(DirectoryClient::delete_user(self, &id).await?) }
    }

    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, ServiceError>> + Send {
        async move {
            let records = DirectoryClient::list_users(self).await?;
            Ok(records.into_iter().map(convert::user_from_record).collect())
        }
    }

    fn fetch_analytics(
        &self,
    ) -> impl Future<Output = Result<AnalyticsSummary, ServiceError>> + Send {
        async move {
            let report = DirectoryClient::fetch_analytics(self).await?;
            Ok(convert::analytics_from_report(&report))
        }
    }
}
