//! Error types for profile lookups, preference storage and the translation
//! dictionary.
//!
//! None of these reach the user verbatim. The controller collapses every
//! [`SearchError`] into one of two localized messages.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Failure of the outbound `GET /users/{username}` request.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The API answered 404 for the username.
    #[error("GitHub user not found")]
    NotFound,

    /// Any other non-success status.
    #[error("GitHub API error ({0})")]
    Status(reqwest::StatusCode),

    /// The request never produced a response.
    #[error("Failed to send request to GitHub API: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response whose body is not a user profile.
    #[error("Failed to deserialize GitHub user response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The background task running the request panicked or was cancelled.
    #[error("Profile lookup task did not finish: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

/// Why a search ended without a profile.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Blank or whitespace-only username, rejected before any request.
    #[error("username is required")]
    EmptyInput,

    /// Not found, transport and parse failures alike.
    #[error("profile lookup failed: {0}")]
    LookupFailure(#[from] LookupError),
}

/// Failure reading or writing the preferences file.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to access preferences file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preferences file is not a JSON object of strings: {0}")]
    Format(#[from] serde_json::Error),
}

/// Failure loading the translation dictionary.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Failed to parse translations: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Translations have no entry for the default language '{0}'")]
    MissingDefault(&'static str),
}
