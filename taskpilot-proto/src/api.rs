//! HTTP surface of the scoring backend.

use serde::{Deserialize, Serialize};

/// The two scoring operations exposed by the backend.
///
/// Both accept a JSON array of tasks and answer with a JSON array of
/// scored tasks, or an [`ErrorBody`] on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Score every submitted task.
    Analyze,
    /// Ask the backend to propose a (re)prioritized subset.
    Suggest,
}

impl Endpoint {
    /// Request path relative to the server root.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Analyze => "/api/tasks/analyze/",
            Self::Suggest => "/api/tasks/suggest/",
        }
    }

    /// Short lowercase name, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::Suggest => "suggest",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure payload returned with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Message intended for the user.
    pub error: String,
}

impl ErrorBody {
    /// Creates an error body with the given message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
