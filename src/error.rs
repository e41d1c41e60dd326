use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedtuiError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Editor error: {0}")]
    Editor(String),
}

impl From<io::Error> for FeedtuiError {
    fn from(err: io::Error) -> Self {
        FeedtuiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FeedtuiError {
    fn from(err: serde_json::Error) -> Self {
        FeedtuiError::Json(err.to_string())
    }
}
