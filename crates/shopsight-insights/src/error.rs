use thiserror::Error;

/// Errors returned by the Gemini insights client.
#[derive(Debug, Error)]
pub enum InsightsError {
    /// No API key is configured; the client cannot be constructed.
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("HTTP {status} from Gemini API: {message}")]
    Status { status: u16, message: String },

    /// The API returned an error envelope inside a successful response.
    #[error("Gemini API error: {0}")]
    Api(String),

    /// A body (or the model's inner text payload) was not valid JSON of the
    /// expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but did not have the expected shape
    /// (e.g. no candidates).
    #[error("unexpected response shape: {0}")]
    Shape(String),
}
