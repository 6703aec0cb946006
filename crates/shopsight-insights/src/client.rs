//! HTTP client for the Gemini `generateContent` REST API.
//!
//! Wraps `reqwest` with typed request/response handling. The model's answer
//! arrives as JSON text inside the first candidate part; this module
//! extracts it, unwraps a stray top-level array (observed Gemini behavior),
//! and deserializes it into the caller's section struct.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shopsight_core::{AppConfig, CategoryHealth};

use crate::error::InsightsError;
use crate::prompt;
use crate::types::{CategoryInsights, DashboardInsights, DashboardSnapshot};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Client for the Gemini REST API.
///
/// Use [`InsightsClient::from_app_config`] in production or
/// [`InsightsClient::with_base_url`] to point at a mock server in tests.
pub struct InsightsClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

impl InsightsClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError::MissingApiKey`] when no key is configured,
    /// or [`InsightsError::Http`] if the HTTP client cannot be built.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, InsightsError> {
        let api_key = config
            .gemini_api_key
            .as_deref()
            .ok_or(InsightsError::MissingApiKey)?;
        Self::new(api_key, &config.insights_model, config.insights_timeout_secs)
    }

    /// Creates a new client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, InsightsError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InsightsError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, InsightsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("shopsight/0.1 (catalog-analytics)")
            .build()?;

        // Normalise: exactly one trailing slash so Url::join appends the
        // endpoint path instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| InsightsError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url,
        })
    }

    /// Generates the dashboard-wide analysis sections for a KPI snapshot.
    ///
    /// # Errors
    ///
    /// Any [`InsightsError`]; callers at the session boundary fold these
    /// into placeholder sections.
    pub async fn dashboard_insights(
        &self,
        snapshot: &DashboardSnapshot,
    ) -> Result<DashboardInsights, InsightsError> {
        let payload = to_pretty_json(snapshot, "dashboard snapshot")?;
        self.generate(prompt::dashboard_prompt(&payload), "dashboard insights")
            .await
    }

    /// Generates the per-category analysis sections for one scored category.
    ///
    /// # Errors
    ///
    /// Any [`InsightsError`]; callers at the session boundary fold these
    /// into placeholder sections.
    pub async fn category_insights(
        &self,
        category: &CategoryHealth,
    ) -> Result<CategoryInsights, InsightsError> {
        let payload = to_pretty_json(category, "category snapshot")?;
        self.generate(prompt::category_prompt(&payload), "category insights")
            .await
    }

    /// Sends one `generateContent` request and deserializes the model's JSON
    /// answer into `T`.
    async fn generate<T: DeserializeOwned>(
        &self,
        prompt_text: String,
        context: &str,
    ) -> Result<T, InsightsError> {
        let url = self.build_url()?;
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt_text }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(InsightsError::Status {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        let envelope: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| InsightsError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;

        let answer = envelope
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| InsightsError::Shape(format!("{context}: no candidate parts")))?;

        parse_sections(answer, context)
    }

    fn build_url(&self) -> Result<Url, InsightsError> {
        let path = format!("v1beta/models/{}:generateContent", self.model);
        let mut url = self
            .base_url
            .join(&path)
            .map_err(|e| InsightsError::Api(format!("invalid endpoint path: {e}")))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

/// Parses the model's JSON answer, unwrapping a top-level array to its
/// first element before deserializing into `T`.
fn parse_sections<T: DeserializeOwned>(answer: &str, context: &str) -> Result<T, InsightsError> {
    let value: serde_json::Value =
        serde_json::from_str(answer).map_err(|e| InsightsError::Deserialize {
            context: format!("{context}: model answer"),
            source: e,
        })?;

    let value = match value {
        serde_json::Value::Array(mut items) if !items.is_empty() => items.remove(0),
        serde_json::Value::Array(_) => {
            return Err(InsightsError::Shape(format!("{context}: empty answer array")));
        }
        other => other,
    };

    serde_json::from_value(value).map_err(|e| InsightsError::Deserialize {
        context: format!("{context}: sections"),
        source: e,
    })
}

/// Pulls `error.message` from a Gemini error body, falling back to a body
/// prefix when the shape is unexpected.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}

fn to_pretty_json<T: Serialize>(value: &T, context: &str) -> Result<String, InsightsError> {
    serde_json::to_string_pretty(value).map_err(|e| InsightsError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> InsightsClient {
        InsightsClient::with_base_url("test-key", "gemini-2.0-flash", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_model_path_and_key() {
        let client = test_client("https://generativelanguage.googleapis.com");
        let url = client.build_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key=test-key"
        );
    }

    #[test]
    fn build_url_tolerates_trailing_slash() {
        let client = test_client("http://127.0.0.1:9999/");
        let url = client.build_url().unwrap();
        assert!(url
            .as_str()
            .starts_with("http://127.0.0.1:9999/v1beta/models/"));
    }

    #[test]
    fn parse_sections_plain_object() {
        let insights: DashboardInsights =
            parse_sections(r#"{"trends": "up"}"#, "test").unwrap();
        assert_eq!(insights.trends, "up");
    }

    #[test]
    fn parse_sections_unwraps_array() {
        let insights: DashboardInsights =
            parse_sections(r#"[{"trends": "up"}]"#, "test").unwrap();
        assert_eq!(insights.trends, "up");
    }

    #[test]
    fn parse_sections_rejects_empty_array() {
        let result: Result<DashboardInsights, _> = parse_sections("[]", "test");
        assert!(matches!(result, Err(InsightsError::Shape(_))));
    }

    #[test]
    fn parse_sections_rejects_non_json() {
        let result: Result<DashboardInsights, _> = parse_sections("not json", "test");
        assert!(matches!(result, Err(InsightsError::Deserialize { .. })));
    }

    #[test]
    fn extract_error_message_reads_envelope() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid"}}"#;
        assert_eq!(extract_error_message(body), "API key not valid");
    }

    #[test]
    fn extract_error_message_falls_back_to_body() {
        assert_eq!(extract_error_message("boom"), "boom");
    }

    #[test]
    fn from_app_config_requires_key() {
        let config = AppConfig {
            env: shopsight_core::Environment::Test,
            log_level: "info".to_string(),
            data_dir: "./data".into(),
            source_prefix: "us-shein-".to_string(),
            gemini_api_key: None,
            insights_model: "gemini-2.0-flash".to_string(),
            insights_timeout_secs: 30,
            insights_max_retries: 2,
            insights_retry_backoff_base_ms: 1000,
        };
        assert!(matches!(
            InsightsClient::from_app_config(&config),
            Err(InsightsError::MissingApiKey)
        ));
    }
}
