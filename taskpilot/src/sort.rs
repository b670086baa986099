//! Strategy-ordered views of the task store.
//!
//! Every strategy uses a stable sort, so tasks that compare equal keep their
//! insertion order. Absent numeric attributes compare as `0`; an absent due
//! date sorts after every present one.

use std::cmp::Ordering;

use chrono::NaiveDate;
use taskpilot_proto::strategy::SortStrategy;
use taskpilot_proto::task::Task;

/// Returns the tasks ordered by `strategy`. The input is never reordered.
#[must_use]
pub fn sort_tasks(tasks: &[Task], strategy: SortStrategy) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    match strategy {
        SortStrategy::Fastest => {
            sorted.sort_by(|a, b| {
                numeric_key(a.estimated_hours).total_cmp(&numeric_key(b.estimated_hours))
            });
        }
        SortStrategy::Impact => {
            sorted.sort_by_key(|t| std::cmp::Reverse(t.importance.unwrap_or(0)));
        }
        SortStrategy::Deadline => {
            sorted.sort_by(|a, b| compare_due_dates(a.due_date, b.due_date));
        }
        SortStrategy::Smart => {
            sorted.sort_by(|a, b| numeric_key(b.score).total_cmp(&numeric_key(a.score)));
        }
    }
    sorted
}

/// Absent is `0`. Adding `0.0` folds `-0.0` into `0.0` so both tie.
fn numeric_key(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0) + 0.0
}

fn compare_due_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
