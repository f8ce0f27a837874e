//! Error types for the playlist picker.

use thiserror::Error;

/// Errors raised by the ListenBrainz API client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Errors raised by a session storage backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("could not write `{key}`: {reason}")]
    Write { key: String, reason: String },

    #[error("could not encode value: {0}")]
    Encode(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("page props element `{0}` not found")]
    MissingElement(String),

    #[error("could not read props file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid page props: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reasons adding a track to a playlist can fail.
#[derive(Error, Debug)]
pub enum AddToPlaylistError {
    #[error("You are not logged in")]
    Unauthenticated,

    #[error("No identifier for playlist {playlist_title}")]
    MissingIdentifier { playlist_title: String },

    #[error("Could not add track to playlist")]
    UnexpectedStatus(u16),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Error, Debug)]
pub enum CreatePlaylistError {
    #[error("You are not logged in")]
    Unauthenticated,

    #[error("Playlist title cannot be empty")]
    EmptyTitle,

    #[error(transparent)]
    Api(#[from] ApiError),
}
