//! Error types for content model validation

use thiserror::Error;

/// Reasons a backend response was rejected as a content model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The body could not be decoded as JSON at all
    #[error("Response is not valid JSON: {0}")]
    Malformed(String),

    /// The response is JSON but not an object
    #[error("Response must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type name of the value received
        found: &'static str,
    },

    /// `title` is missing or null
    #[error("Response has no 'title' field")]
    MissingTitle,

    /// `title` is present but empty or not a string
    #[error("Response 'title' must be a non-empty string")]
    EmptyTitle,

    /// `topics` is missing or null
    #[error("Response has no 'topics' field")]
    MissingTopics,

    /// `topics` is present but not an array
    #[error("Response 'topics' must be an array, found {found}")]
    TopicsNotArray {
        /// JSON type name of the value received
        found: &'static str,
    },

    /// One of the sections has the wrong shape
    #[error("Topic {index} is invalid: {reason}")]
    InvalidSection {
        /// Zero-based position of the section in `topics`
        index: usize,
        /// What was wrong with it
        reason: String,
    },
}
