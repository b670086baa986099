//! Task record shared between the client and the scoring backend.
//!
//! A [`Task`] is either authored locally (no `score` / `explanation`) or
//! returned by the backend with both populated. Optional attributes are
//! modelled as `Option` so that an absent value is never confused with a
//! legitimate zero; the sort and display layers apply their own defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Date format used for `due_date` on the wire (`YYYY-MM-DD`).
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// One unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Human-readable title. Never empty for locally authored tasks.
    pub title: String,
    /// Optional deadline.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "due_date_serde"
    )]
    pub due_date: Option<NaiveDate>,
    /// Optional importance; higher means more important.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<i64>,
    /// Optional effort estimate in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    /// Titles (or other identifiers) of tasks this one depends on.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Score assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Reasons the backend gave for the score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Vec<String>>,
    /// Any other members of the JSON object, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// Creates a task with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: None,
            importance: None,
            estimated_hours: None,
            dependencies: Vec::new(),
            score: None,
            explanation: None,
            extra: Map::new(),
        }
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the importance.
    #[must_use]
    pub const fn with_importance(mut self, importance: i64) -> Self {
        self.importance = Some(importance);
        self
    }

    /// Sets the estimated hours.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the dependency list.
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the score.
    #[must_use]
    pub const fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Sets the explanation fragments.
    #[must_use]
    pub fn with_explanation<I, S>(mut self, explanation: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explanation = Some(explanation.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the backend has scored this task.
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}

/// `due_date` is written as `YYYY-MM-DD`. On input both `null` and the empty
/// string mean "no deadline".
mod due_date_serde {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::DUE_DATE_FORMAT;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.collect_str(&d.format(DUE_DATE_FORMAT)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, DUE_DATE_FORMAT)
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid due_date {s:?}: {e}"))),
        }
    }
}
