use std::time::Duration;

use chrono::Utc;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::constants::{
    ACTIVITY_LOGS, APPROVAL_REQUESTS, APPROVALS_BADGE, APPROVE_LICENSE, BADGE_DISPLAY_MAX,
    BADGE_OVERFLOW_TEXT, CHANGE_PASSWORD, CREATE_LICENSE, CREATE_TEAM_MEMBER, CREATE_USER,
    DELETE_TEAM_MEMBER, DELETE_USER, EXPIRY_WINDOW_DAYS, EXPORT_DATA, EXTEND_LICENSE,
    FALLBACK_USER_EMAIL, FALLBACK_USER_NAME, HEADER_NOTIFICATION_BADGE, LICENSE_REQUESTS,
    LICENSES, LOGIN, LOGOUT, PRIVILEGED_ROLES, REJECT_LICENSE, REQUESTS_BADGE, REVOKE_LICENSE,
    SEARCH, SESSION_USER_EMAIL, SESSION_USER_ID, SESSION_USER_NAME, SESSION_USER_ROLE,
    UNKNOWN_IP, UPDATE_TEAM_MEMBER, UPDATE_USER, VIEW_PAGE,
};
use crate::core::errors::BackofficeError;
use crate::core::models::{ActivityLogRecord, NotificationSnapshot, TargetId};
use crate::infrastructure::backend::{Backend, Filter};
use crate::infrastructure::badges::BadgeSink;
use crate::infrastructure::ip::IpResolver;
use crate::infrastructure::session::SessionStore;

pub struct ActivityRecorder<B: Backend, S: SessionStore, R: IpResolver> {
    backend: B,
    session: S,
    resolver: R,
    user_agent: String,
}

impl<B: Backend, S: SessionStore, R: IpResolver> ActivityRecorder<B, S, R> {
    pub fn new(backend: B, session: S, resolver: R, user_agent: impl Into<String>) -> Self {
        ActivityRecorder {
            backend,
            session,
            resolver,
            user_agent: user_agent.into(),
        }
    }

    // Empty session values count as absent, like the missing key itself.
    fn identity_value(&self, key: &str) -> Option<String> {
        self.session.get(key).filter(|value| !value.is_empty())
    }

    /// Append one activity record to the audit trail.
    ///
    /// Missing identity and a failed IP lookup can never fail the call. An
    /// insert failure is reported to the diagnostic channel and returned;
    /// callers are free to ignore the result.
    pub async fn log(
        &self,
        action: &str,
        target_type: Option<&str>,
        target_id: Option<TargetId>,
        details: Option<Value>,
    ) -> Result<(), BackofficeError> {
        let user_id = self.identity_value(SESSION_USER_ID);
        let user_email = self
            .identity_value(SESSION_USER_EMAIL)
            .unwrap_or_else(|| FALLBACK_USER_EMAIL.to_string());
        let user_name = self
            .identity_value(SESSION_USER_NAME)
            .unwrap_or_else(|| FALLBACK_USER_NAME.to_string());

        let ip_address = match self.resolver.resolve().await {
            Ok(ip) => ip,
            Err(e) => {
                debug!(error = %e, "ip lookup failed, recording as unknown");
                UNKNOWN_IP.to_string()
            }
        };

        let record = ActivityLogRecord {
            id: Uuid::new_v4(),
            user_id,
            user_email,
            user_name,
            action: action.to_string(),
            target_type: target_type.map(String::from),
            target_id: target_id.map(|id| id.to_string()),
            details,
            ip_address,
            user_agent: self.user_agent.clone(),
            created_at: Utc::now(),
        };

        let document = match serde_json::to_value(&record) {
            Ok(document) => document,
            Err(e) => {
                let e = BackofficeError::SerializationError(e.to_string());
                error!(action, error = %e, "failed to encode activity record");
                return Err(e);
            }
        };

        match self.backend.insert(ACTIVITY_LOGS, document).await {
            Ok(()) => {
                debug!(action, "activity recorded");
                Ok(())
            }
            Err(e) => {
                error!(action, error = %e, "failed to record activity");
                Err(e)
            }
        }
    }

    pub async fn log_login(&self) -> Result<(), BackofficeError> {
        self.log(LOGIN, None, None, Some(json!({ "timestamp": Utc::now() })))
            .await
    }

    pub async fn log_logout(&self) -> Result<(), BackofficeError> {
        self.log(LOGOUT, None, None, Some(json!({ "timestamp": Utc::now() })))
            .await
    }

    pub async fn log_approve_license(
        &self,
        license_id: impl Into<TargetId>,
        account_id: i64,
    ) -> Result<(), BackofficeError> {
        self.log(
            APPROVE_LICENSE,
            Some("license"),
            Some(license_id.into()),
            Some(json!({ "account_id": account_id })),
        )
        .await
    }

    pub async fn log_reject_license(
        &self,
        license_id: impl Into<TargetId>,
        account_id: i64,
        reason: &str,
    ) -> Result<(), BackofficeError> {
        self.log(
            REJECT_LICENSE,
            Some("license"),
            Some(license_id.into()),
            Some(json!({ "account_id": account_id, "reason": reason })),
        )
        .await
    }

    pub async fn log_create_license(
        &self,
        license_id: impl Into<TargetId>,
        account_id: i64,
        days: i64,
    ) -> Result<(), BackofficeError> {
        self.log(
            CREATE_LICENSE,
            Some("license"),
            Some(license_id.into()),
            Some(json!({ "account_id": account_id, "duration_days": days })),
        )
        .await
    }

    pub async fn log_revoke_license(
        &self,
        license_id: impl Into<TargetId>,
        reason: &str,
    ) -> Result<(), BackofficeError> {
        self.log(
            REVOKE_LICENSE,
            Some("license"),
            Some(license_id.into()),
            Some(json!({ "reason": reason })),
        )
        .await
    }

    pub async fn log_extend_license(
        &self,
        license_id: impl Into<TargetId>,
        days: i64,
    ) -> Result<(), BackofficeError> {
        self.log(
            EXTEND_LICENSE,
            Some("license"),
            Some(license_id.into()),
            Some(json!({ "extension_days": days })),
        )
        .await
    }

    pub async fn log_create_user(
        &self,
        user_id: impl Into<TargetId>,
        account_id: i64,
    ) -> Result<(), BackofficeError> {
        self.log(
            CREATE_USER,
            Some("user"),
            Some(user_id.into()),
            Some(json!({ "account_id": account_id })),
        )
        .await
    }

    pub async fn log_update_user(
        &self,
        user_id: impl Into<TargetId>,
    ) -> Result<(), BackofficeError> {
        self.log(UPDATE_USER, Some("user"), Some(user_id.into()), None)
            .await
    }

    pub async fn log_delete_user(
        &self,
        user_id: impl Into<TargetId>,
    ) -> Result<(), BackofficeError> {
        self.log(DELETE_USER, Some("user"), Some(user_id.into()), None)
            .await
    }

    pub async fn log_create_team_member(
        &self,
        admin_user_id: impl Into<TargetId>,
        role: &str,
    ) -> Result<(), BackofficeError> {
        self.log(
            CREATE_TEAM_MEMBER,
            Some("admin_user"),
            Some(admin_user_id.into()),
            Some(json!({ "role": role })),
        )
        .await
    }

    /// `changes` is stored verbatim as the details payload.
    pub async fn log_update_team_member(
        &self,
        admin_user_id: impl Into<TargetId>,
        changes: Value,
    ) -> Result<(), BackofficeError> {
        self.log(
            UPDATE_TEAM_MEMBER,
            Some("admin_user"),
            Some(admin_user_id.into()),
            Some(changes),
        )
        .await
    }

    pub async fn log_delete_team_member(
        &self,
        admin_user_id: impl Into<TargetId>,
    ) -> Result<(), BackofficeError> {
        self.log(
            DELETE_TEAM_MEMBER,
            Some("admin_user"),
            Some(admin_user_id.into()),
            None,
        )
        .await
    }

    /// The acting user is the target of their own password change.
    pub async fn log_change_password(&self) -> Result<(), BackofficeError> {
        let target_id = self.identity_value(SESSION_USER_ID).map(TargetId::from);
        self.log(CHANGE_PASSWORD, Some("admin_user"), target_id, None)
            .await
    }

    pub async fn log_view_page(&self, page: &str) -> Result<(), BackofficeError> {
        self.log(VIEW_PAGE, Some("page"), None, Some(json!({ "page": page })))
            .await
    }

    pub async fn log_export(&self, kind: &str, count: u64) -> Result<(), BackofficeError> {
        self.log(
            EXPORT_DATA,
            Some("export"),
            None,
            Some(json!({ "type": kind, "record_count": count })),
        )
        .await
    }

    pub async fn log_search(&self, query: &str, results: u64) -> Result<(), BackofficeError> {
        self.log(
            SEARCH,
            Some("search"),
            None,
            Some(json!({ "query": query, "results": results })),
        )
        .await
    }
}

#[derive(Clone)]
pub struct NotificationCenter<B: Backend, S: SessionStore, K: BadgeSink> {
    backend: B,
    session: S,
    badges: K,
}

impl<B: Backend, S: SessionStore, K: BadgeSink> NotificationCenter<B, S, K> {
    pub fn new(backend: B, session: S, badges: K) -> Self {
        NotificationCenter {
            backend,
            session,
            badges,
        }
    }

    /// Aggregate the three pending/expiring counts.
    ///
    /// Never fails: any query error anywhere in the sequence yields an
    /// all-zero snapshot, with no partial results.
    pub async fn load_all(&self) -> NotificationSnapshot {
        match self.collect_counts().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, "failed to load notification counts");
                NotificationSnapshot::default()
            }
        }
    }

    async fn collect_counts(&self) -> Result<NotificationSnapshot, BackofficeError> {
        let pending_requests = self
            .backend
            .count(LICENSE_REQUESTS, &[Filter::eq("status", "pending")])
            .await?;

        // The approval queue is only visible to privileged roles; for
        // everyone else the count stays zero and the query is never issued.
        let role = self.session.get(SESSION_USER_ROLE);
        let pending_approvals = if role
            .as_deref()
            .is_some_and(|role| PRIVILEGED_ROLES.contains(&role))
        {
            self.backend
                .count(APPROVAL_REQUESTS, &[Filter::eq("status", "pending")])
                .await?
        } else {
            0
        };

        // Active licenses expiring inside the window, bounds inclusive on
        // both ends.
        let now = Utc::now();
        let horizon = now + chrono::Duration::days(EXPIRY_WINDOW_DAYS);
        let expiring_soon = self
            .backend
            .count(
                LICENSES,
                &[
                    Filter::eq("is_active", true),
                    Filter::gte("expires_at", now.to_rfc3339()),
                    Filter::lte("expires_at", horizon.to_rfc3339()),
                ],
            )
            .await?;

        Ok(NotificationSnapshot {
            pending_requests,
            pending_approvals,
            expiring_soon,
        })
    }

    /// Reflect a count onto one badge: hidden at zero, shown otherwise with
    /// the text capped at "99+".
    pub fn update_badge(&self, badge_id: &str, count: u64) {
        if count > 0 {
            let text = if count > BADGE_DISPLAY_MAX {
                BADGE_OVERFLOW_TEXT.to_string()
            } else {
                count.to_string()
            };
            self.badges.set_text(badge_id, &text);
            self.badges.set_visible(badge_id, true);
        } else {
            self.badges.set_visible(badge_id, false);
        }
    }

    /// Refresh every badge from a fresh snapshot. The header badge carries
    /// requests plus approvals only.
    pub async fn update_all_badges(&self) -> NotificationSnapshot {
        let snapshot = self.load_all().await;

        self.update_badge(REQUESTS_BADGE, snapshot.pending_requests);
        self.update_badge(APPROVALS_BADGE, snapshot.pending_approvals);
        self.update_badge(HEADER_NOTIFICATION_BADGE, snapshot.header_total());

        snapshot
    }

    /// Refresh all badges on a fixed period, the first run one full period
    /// from now.
    ///
    /// Every tick spawns its refresh independently, so a hung backend call
    /// delays only its own cycle and never the next scheduled tick. Stale
    /// out-of-order badge writes from overlapping cycles are accepted.
    pub fn start_auto_refresh(&self, period: Duration) -> RefreshHandle
    where
        B: Clone + 'static,
        S: Clone + 'static,
        K: Clone + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let center = self.clone();
        let start = tokio::time::Instant::now() + period;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        info!("badge auto-refresh stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        let center = center.clone();
                        tokio::spawn(async move {
                            center.update_all_badges().await;
                        });
                    }
                }
            }
        });

        RefreshHandle { cancel, task }
    }
}

/// Handle to a running badge auto-refresh loop.
///
/// Dropping the handle without calling [`RefreshHandle::stop`] leaves the
/// loop running for the lifetime of the runtime.
#[derive(Debug)]
pub struct RefreshHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Signal the refresh loop to stop. Returns without waiting.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop the loop and wait for the task to wind down.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}
