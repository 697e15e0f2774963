use crate::models::Direction;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything an expander can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown language code: {code:?}")]
    InvalidLanguage { code: String },

    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    #[error(transparent)]
    Expansion(#[from] ExpansionError),
}

/// Failure of one `expand` call, tagged with where it happened.
#[derive(Debug, Error)]
#[error("{direction} expansion of {node:?} failed on page {page}")]
pub struct ExpansionError {
    pub node: String,
    pub direction: Direction,
    /// 1-based index of the page being fetched or parsed.
    pub page: u32,
    #[source]
    pub cause: ExpansionCause,
}

#[derive(Debug, Error)]
pub enum ExpansionCause {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("malformed API response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("API error {code}: {info}")]
    Remote { code: String, info: String },

    #[error("API repeated continuation cursor {cursor:?}")]
    RepeatedCursor { cursor: String },

    #[error("expansion cancelled")]
    Cancelled,
}

/// Fetch failures reported by a [`PageFetcher`](crate::fetch::PageFetcher).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    /// The node an expansion failed for, if this is an expansion failure.
    pub fn node(&self) -> Option<&str> {
        match self {
            Error::Expansion(e) => Some(&e.node),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Error::Expansion(ExpansionError {
                cause: ExpansionCause::Cancelled,
                ..
            })
        )
    }
}
