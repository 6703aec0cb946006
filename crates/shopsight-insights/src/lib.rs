//! Generative-AI summaries for shopsight.
//!
//! Wraps the Gemini `generateContent` REST endpoint behind a typed client,
//! retries transient failures, and guards against stale responses with
//! monotonically increasing request tokens. Every failure is folded into a
//! placeholder section at the session boundary — an AI outage degrades the
//! dashboard, it never crashes a session.

pub mod client;
pub mod error;
pub mod session;
pub mod types;

mod prompt;
mod retry;

pub use client::InsightsClient;
pub use error::InsightsError;
pub use session::{
    InsightsSession, RequestToken, CATEGORY_FAILURE_MESSAGE, DASHBOARD_FAILURE_MESSAGE,
};
pub use types::{CategoryInsights, DashboardInsights, DashboardSnapshot};
