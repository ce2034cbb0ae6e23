use thiserror::Error;

use crate::domain::model::Item;

#[derive(Error, Debug)]
pub enum ExtPipesError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("API error {code}: {message}")]
    Api {
        code: u16,
        message: String,
        duplicated: Vec<Item>,
        missing: Vec<Item>,
    },

    #[error("Item at index {index} has neither an id nor an externalId")]
    MissingIdentity { index: usize },
}

impl ExtPipesError {
    pub fn config(message: impl Into<String>) -> Self {
        ExtPipesError::Config {
            message: message.into(),
        }
    }

    /// True when the create endpoint rejected the batch because some items
    /// already exist. The upsert helper reroutes those items to the update
    /// endpoint.
    pub fn is_duplicated(&self) -> bool {
        matches!(self, ExtPipesError::Api { duplicated, .. } if !duplicated.is_empty())
    }
}

pub type Result<T> = std::result::Result<T, ExtPipesError>;
