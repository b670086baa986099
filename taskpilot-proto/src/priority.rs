//! Priority buckets derived from a task's score.

/// Scores at or above this value are [`Priority::High`].
pub const HIGH_PRIORITY_SCORE: f64 = 7.0;

/// Scores at or above this value (and below [`HIGH_PRIORITY_SCORE`]) are
/// [`Priority::Medium`].
pub const MEDIUM_PRIORITY_SCORE: f64 = 4.0;

/// Visual priority class of a task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    /// `score >= 7`.
    High,
    /// `4 <= score < 7`.
    Medium,
    /// `score < 4`, or unscored.
    Low,
}

impl Priority {
    /// Classifies a score. An absent score is [`Priority::Low`].
    #[must_use]
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s >= HIGH_PRIORITY_SCORE => Self::High,
            Some(s) if s >= MEDIUM_PRIORITY_SCORE => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Lowercase name of the class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
