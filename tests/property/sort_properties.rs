//! Property-based tests for strategy ordering.
//!
//! Uses proptest to verify, for every strategy:
//! 1. The input slice is never modified.
//! 2. The output is a permutation of the input.
//! 3. Equal sort keys keep their insertion order.
//! 4. Undated tasks come after every dated task under `deadline`.
//! 5. An absent numeric attribute orders exactly like `0`.

#![allow(clippy::unwrap_used, clippy::cast_possible_truncation)]

use chrono::NaiveDate;
use proptest::prelude::*;
use taskpilot::sort::sort_tasks;
use taskpilot_proto::strategy::SortStrategy;
use taskpilot_proto::task::Task;

fn arb_strategy() -> impl Strategy<Value = SortStrategy> {
    prop::sample::select(SortStrategy::ALL.to_vec())
}

/// Tasks with small value ranges so ties are common. Titles encode the
/// insertion index.
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(
        (
            prop::option::of(0u32..4),
            prop::option::of(0i64..3),
            prop::option::of(0u32..3),
            prop::option::of(0u32..3),
        ),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (day, importance, hours, score))| {
                let mut task = Task::new(i.to_string());
                task.due_date = day.map(|d| NaiveDate::from_ymd_opt(2030, 1, d + 1).unwrap());
                task.importance = importance;
                task.estimated_hours = hours.map(f64::from);
                task.score = score.map(f64::from);
                task
            })
            .collect()
    })
}

fn index_of(task: &Task) -> usize {
    task.title.parse().unwrap()
}

/// Comparable key for a task under a strategy, with absent values as `0`.
fn key(task: &Task, strategy: SortStrategy) -> (i64, i64) {
    match strategy {
        SortStrategy::Fastest => (0, task.estimated_hours.unwrap_or(0.0) as i64),
        SortStrategy::Impact => (0, -task.importance.unwrap_or(0)),
        SortStrategy::Deadline => task.due_date.map_or((1, 0), |d| {
            (0, d.signed_duration_since(NaiveDate::MIN).num_days())
        }),
        SortStrategy::Smart => (0, -(task.score.unwrap_or(0.0) as i64)),
    }
}

proptest! {
    #[test]
    fn input_is_never_modified(tasks in arb_tasks(), strategy in arb_strategy()) {
        let before = tasks.clone();
        let _ = sort_tasks(&tasks, strategy);
        prop_assert_eq!(tasks, before);
    }

    #[test]
    fn output_is_permutation(tasks in arb_tasks(), strategy in arb_strategy()) {
        let mut indices: Vec<usize> =
            sort_tasks(&tasks, strategy).into_iter().map(index_of).collect();
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..tasks.len()).collect::<Vec<_>>());
    }

    #[test]
    fn ordered_and_stable(tasks in arb_tasks(), strategy in arb_strategy()) {
        let sorted = sort_tasks(&tasks, strategy);
        for pair in sorted.windows(2) {
            let (a, b) = (key(pair[0], strategy), key(pair[1], strategy));
            prop_assert!(a <= b, "{:?} before {:?}", pair[0], pair[1]);
            if a == b {
                prop_assert!(index_of(pair[0]) < index_of(pair[1]));
            }
        }
    }

    #[test]
    fn deadline_puts_undated_last(tasks in arb_tasks()) {
        let sorted = sort_tasks(&tasks, SortStrategy::Deadline);
        if let Some(first_undated) = sorted.iter().position(|t| t.due_date.is_none()) {
            prop_assert!(sorted[first_undated..].iter().all(|t| t.due_date.is_none()));
        }
    }

    #[test]
    fn absent_orders_like_zero(tasks in arb_tasks(), strategy in arb_strategy()) {
        let zeroed: Vec<Task> = tasks
            .iter()
            .cloned()
            .map(|mut t| {
                t.importance = Some(t.importance.unwrap_or(0));
                t.estimated_hours = Some(t.estimated_hours.unwrap_or(0.0));
                t.score = Some(t.score.unwrap_or(0.0));
                t
            })
            .collect();
        let original: Vec<usize> =
            sort_tasks(&tasks, strategy).into_iter().map(index_of).collect();
        let filled: Vec<usize> =
            sort_tasks(&zeroed, strategy).into_iter().map(index_of).collect();
        prop_assert_eq!(original, filled);
    }
}
