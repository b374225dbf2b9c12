use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// A post with neither text nor media, or media of an unsupported kind.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("no {target} at index {index} (len {len})")]
    Index {
        target: &'static str,
        index: usize,
        len: usize,
    },

    /// Stored data that could not be read back. `PostStore::load` recovers
    /// from this with an empty feed.
    #[error("persistence read error: {0}")]
    PersistenceRead(String),

    #[error("persistence write error: {0}")]
    Persistence(String),

    #[error("clipboard error: {0}")]
    Clipboard(String),
}

impl FeedError {
    pub fn post_index(index: usize, len: usize) -> Self {
        FeedError::Index {
            target: "post",
            index,
            len,
        }
    }

    pub fn comment_index(index: usize, len: usize) -> Self {
        FeedError::Index {
            target: "comment",
            index,
            len,
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::PersistenceRead(err.to_string())
    }
}
