use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode job page: {source}. Preview:\n{preview}")]
    Decode {
        #[source]
        source: serde_json::Error,
        preview: String,
    },

    #[error("job source unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;
