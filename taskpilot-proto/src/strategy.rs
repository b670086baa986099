//! Sort strategy tokens.

use serde::{Deserialize, Serialize};

/// Selects the comparator used to order tasks for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    /// Lowest estimated hours first.
    Fastest,
    /// Highest importance first.
    Impact,
    /// Earliest due date first; undated tasks last.
    Deadline,
    /// Highest backend score first.
    #[default]
    Smart,
}

impl SortStrategy {
    /// All strategies in selector order.
    pub const ALL: [Self; 4] = [Self::Smart, Self::Deadline, Self::Impact, Self::Fastest];

    /// Parses a strategy token. Unknown or empty tokens select [`Self::Smart`].
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "fastest" => Self::Fastest,
            "impact" => Self::Impact,
            "deadline" => Self::Deadline,
            _ => Self::Smart,
        }
    }

    /// The wire/CLI token for this strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fastest => "fastest",
            Self::Impact => "impact",
            Self::Deadline => "deadline",
            Self::Smart => "smart",
        }
    }

    /// Human-readable label for the strategy selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fastest => "Fastest wins",
            Self::Impact => "High impact",
            Self::Deadline => "Deadline driven",
            Self::Smart => "Smart balance",
        }
    }

    /// The next strategy in selector order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Smart => Self::Deadline,
            Self::Deadline => Self::Impact,
            Self::Impact => Self::Fastest,
            Self::Fastest => Self::Smart,
        }
    }
}

impl std::fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
