use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Connection, timeout or TLS failure reported by the HTTP client
    #[error("http request error: {0}")]
    Request(#[from] reqwest::Error),
    /// Provider answered with a non-2xx status
    #[error("http status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    /// Provider accepted the call but reported a business failure
    #[error("provider error: {}", provider_message(.0))]
    Provider(serde_json::Value),
    /// Response body does not have the expected shape
    #[error("unexpected response shape: {0}")]
    Mapping(String),
    #[error("response deserialization: {0}")]
    Deserialization(#[from] serde_json::Error),
    /// Required field is empty
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// Raw provider payload for [`Error::Provider`]
    pub fn provider_payload(&self) -> Option<&serde_json::Value> {
        match self {
            Error::Provider(payload) => Some(payload),
            _ => None,
        }
    }
}

fn provider_message(payload: &serde_json::Value) -> String {
    let field = |key: &str| payload.get(key).and_then(|v| v.as_str());
    match (field("error_code"), field("error_desc")) {
        (Some(code), Some(desc)) => format!("{code} {desc}"),
        (Some(code), None) => code.to_string(),
        _ => payload.to_string(),
    }
}
