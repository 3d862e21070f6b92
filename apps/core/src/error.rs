use thiserror::Error;

/// Failures at the fetch boundary.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode {document} response: {source}")]
    Decode {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl DashboardError {
    pub fn transport(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }
}
