//! Property-based serialization tests for task collections.
//!
//! Uses proptest to verify:
//! 1. Any task list survives `encode_pretty` → `decode_task_array`.
//! 2. Compact `encode` → `decode_task_array_bytes` agrees with the pretty path.
//! 3. Arbitrary text never causes a panic in `decode_task_array`.
//! 4. Finite scores come back bit-for-bit after a round trip.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::{Map, Value};
use taskpilot_proto::codec;
use taskpilot_proto::task::Task;

/// Strategy for calendar dates between 1970 and 2199.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1970i32..2200, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Strategy for any finite float, including long shortest-form decimals.
fn arb_number() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |f| f.is_finite())
}

/// Strategy for extra members whose keys never collide with task fields.
fn arb_extra() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("x_[a-z]{1,6}", "[a-z ]{0,8}", 0..3).prop_map(|m| {
        m.into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect()
    })
}

/// Strategy for generating arbitrary `Task` values.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        "[^\u{0}]{1,40}",
        prop::option::of(arb_date()),
        prop::option::of(-20i64..20),
        prop::option::of(arb_number()),
        prop::collection::vec("[A-Za-z ]{1,12}", 0..4),
        prop::option::of(arb_number()),
        prop::option::of(prop::collection::vec("[^\u{0}]{0,20}", 0..4)),
        arb_extra(),
    )
        .prop_map(
            |(title, due_date, importance, estimated_hours, dependencies, score, explanation, extra)| {
                Task {
                    title,
                    due_date,
                    importance,
                    estimated_hours,
                    dependencies,
                    score,
                    explanation,
                    extra,
                }
            },
        )
}

proptest! {
    #[test]
    fn pretty_round_trip(tasks in prop::collection::vec(arb_task(), 0..8)) {
        let text = codec::encode_pretty(&tasks).unwrap();
        let decoded = codec::decode_task_array(&text).unwrap();
        prop_assert_eq!(decoded, tasks);
    }

    #[test]
    fn compact_and_pretty_agree(tasks in prop::collection::vec(arb_task(), 0..8)) {
        let bytes = codec::encode(&tasks).unwrap();
        let from_bytes = codec::decode_task_array_bytes(&bytes).unwrap();
        let from_text = codec::decode_task_array(&codec::encode_pretty(&tasks).unwrap()).unwrap();
        prop_assert_eq!(from_bytes, from_text);
    }

    #[test]
    fn decode_never_panics(text in "\\PC{0,200}") {
        let _ = codec::decode_task_array(&text);
    }

    #[test]
    fn scores_keep_every_bit(score in arb_number()) {
        let tasks = vec![Task::new("A").with_score(score)];
        let decoded = codec::decode_task_array(&codec::encode_pretty(&tasks).unwrap()).unwrap();
        prop_assert_eq!(decoded[0].score.map(f64::to_bits), Some(score.to_bits()));
    }
}
