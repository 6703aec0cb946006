//! Session-level orchestration of insights requests.
//!
//! Each target (the dashboard, the selected category) carries a
//! monotonically increasing request token. A completion is applied only
//! when its token is still the latest for that target, so an in-flight
//! request that finishes after a newer selection cannot overwrite the newer
//! state — issuing a new token supersedes the old request instead of
//! racing it.

use std::sync::atomic::{AtomicU64, Ordering};

use shopsight_core::CategoryHealth;

use crate::client::InsightsClient;
use crate::retry::retry_with_backoff;
use crate::types::{CategoryInsights, DashboardInsights, DashboardSnapshot};

/// Message shown in the dashboard placeholder when analysis fails.
pub const DASHBOARD_FAILURE_MESSAGE: &str =
    "Sorry, there was an error generating the analysis. Please check the logs and try again.";

/// Message shown in the category placeholder when insights fail.
pub const CATEGORY_FAILURE_MESSAGE: &str =
    "Could not generate insights. Please check API key and try again.";

/// Identifies one issued request; compared against the latest issued token
/// for its target when the response lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

pub struct InsightsSession {
    client: InsightsClient,
    max_retries: u32,
    backoff_base_ms: u64,
    dashboard_token: AtomicU64,
    category_token: AtomicU64,
}

impl InsightsSession {
    #[must_use]
    pub fn new(client: InsightsClient, max_retries: u32, backoff_base_ms: u64) -> Self {
        Self {
            client,
            max_retries,
            backoff_base_ms,
            dashboard_token: AtomicU64::new(0),
            category_token: AtomicU64::new(0),
        }
    }

    /// Issues a new dashboard request token, superseding any in-flight
    /// dashboard request.
    pub fn begin_dashboard_request(&self) -> RequestToken {
        RequestToken(self.dashboard_token.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Issues a new category request token, superseding any in-flight
    /// category request (including one for a different category).
    pub fn begin_category_request(&self) -> RequestToken {
        RequestToken(self.category_token.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[must_use]
    pub fn dashboard_is_current(&self, token: RequestToken) -> bool {
        self.dashboard_token.load(Ordering::SeqCst) == token.0
    }

    #[must_use]
    pub fn category_is_current(&self, token: RequestToken) -> bool {
        self.category_token.load(Ordering::SeqCst) == token.0
    }

    /// Fetches dashboard analysis for `snapshot`.
    ///
    /// Failures are folded into a placeholder (the message lands in the
    /// `anomalies` section); a stale token yields `None` and the response
    /// is discarded.
    pub async fn fetch_dashboard(
        &self,
        token: RequestToken,
        snapshot: &DashboardSnapshot,
    ) -> Option<DashboardInsights> {
        let result = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.client.dashboard_insights(snapshot)
        })
        .await;

        let insights = match result {
            Ok(insights) => insights,
            Err(e) => {
                tracing::error!(error = %e, "dashboard insights failed");
                DashboardInsights::failure(DASHBOARD_FAILURE_MESSAGE)
            }
        };

        if self.dashboard_is_current(token) {
            Some(insights)
        } else {
            tracing::debug!("discarding stale dashboard insights response");
            None
        }
    }

    /// Fetches per-category insights for `category`.
    ///
    /// Failures are folded into a placeholder (the message lands in the
    /// `error` slot); a stale token yields `None` and the response is
    /// discarded.
    pub async fn fetch_category(
        &self,
        token: RequestToken,
        category: &CategoryHealth,
    ) -> Option<CategoryInsights> {
        let result = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.client.category_insights(category)
        })
        .await;

        let insights = match result {
            Ok(insights) => insights,
            Err(e) => {
                tracing::error!(category = %category.name, error = %e, "category insights failed");
                CategoryInsights::failure(CATEGORY_FAILURE_MESSAGE)
            }
        };

        if self.category_is_current(token) {
            Some(insights)
        } else {
            tracing::debug!(
                category = %category.name,
                "discarding stale category insights response"
            );
            None
        }
    }
}
