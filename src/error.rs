use thiserror::Error;

/// Errors produced while searching the wiki or converting a page
#[derive(Debug, Error)]
pub enum WikiError {
    /// The search collaborator rejected the query
    #[error("search failed: {0}")]
    Query(String),

    /// Transport failure talking to the wiki
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The wiki has no page with this title
    #[error("page not found: {0}")]
    PageNotFound(String),

    /// The wiki answered with JSON we do not understand
    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    /// HTML to text conversion failed
    #[error("conversion failed: {0}")]
    Conversion(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WikiError>;
