//! Task cards: the display model drawn by the cards panel.

use taskpilot_proto::priority::Priority;
use taskpilot_proto::strategy::SortStrategy;
use taskpilot_proto::task::{DUE_DATE_FORMAT, Task};

use crate::sort::sort_tasks;

/// Shown for any absent attribute.
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown in place of the explanation for tasks the backend has not scored.
pub const UNSCORED_EXPLANATION: &str = "Not scored yet";

/// One rendered task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    /// Task title.
    pub title: String,
    /// Formatted score, or [`NOT_AVAILABLE`].
    pub score: String,
    /// Formatted due date, or [`NOT_AVAILABLE`].
    pub due_date: String,
    /// Formatted estimated hours, or [`NOT_AVAILABLE`].
    pub estimated_hours: String,
    /// Formatted importance, or [`NOT_AVAILABLE`].
    pub importance: String,
    /// Explanation fragments joined with `", "`, or [`UNSCORED_EXPLANATION`].
    pub explanation: String,
    /// Priority class derived from the score.
    pub priority: Priority,
}

impl TaskCard {
    /// Builds the card for a single task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            score: or_not_available(task.score),
            due_date: task.due_date.map_or_else(
                || NOT_AVAILABLE.to_string(),
                |d| d.format(DUE_DATE_FORMAT).to_string(),
            ),
            estimated_hours: or_not_available(task.estimated_hours),
            importance: or_not_available(task.importance),
            explanation: task
                .explanation
                .as_ref()
                .map_or_else(|| UNSCORED_EXPLANATION.to_string(), |parts| parts.join(", ")),
            priority: Priority::from_score(task.score),
        }
    }

    /// `"<title> (Score: <score>)"`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{} (Score: {})", self.title, self.score)
    }

    /// `"Due: <date>, Hours: <hours>, Importance: <importance>"`.
    #[must_use]
    pub fn details(&self) -> String {
        format!(
            "Due: {}, Hours: {}, Importance: {}",
            self.due_date, self.estimated_hours, self.importance
        )
    }

    /// `"Reason: <explanation>"`.
    #[must_use]
    pub fn reason(&self) -> String {
        format!("Reason: {}", self.explanation)
    }
}

fn or_not_available<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// Builds one card per task, in the given order.
pub fn render_cards<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<TaskCard> {
    tasks.into_iter().map(TaskCard::from_task).collect()
}

/// Orders a copy of `tasks` by `strategy` and renders it.
#[must_use]
pub fn render_sorted(tasks: &[Task], strategy: SortStrategy) -> Vec<TaskCard> {
    render_cards(sort_tasks(tasks, strategy))
}
