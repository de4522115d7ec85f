use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::step::{StepOrder, StepStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepDates {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Stamps lifecycle dates for a step about to be persisted with `status`.
///
/// `doing` fills an unset start date, `done` fills an unset end date. Dates
/// already present are kept, and nothing is cleared when a step moves back
/// to an earlier status.
pub fn derive_timestamps(status: StepStatus, current: StepDates, now: DateTime<Utc>) -> StepDates {
    let mut dates = current;

    match status {
        StepStatus::Doing if dates.start_date.is_none() => dates.start_date = Some(now),
        StepStatus::Done if dates.end_date.is_none() => dates.end_date = Some(now),
        _ => {}
    }

    dates
}

/// Order for a step appended after the current highest one.
pub fn next_step_order(max_existing: Option<i32>) -> i32 {
    max_existing.map_or(1, |max| max.saturating_add(1))
}

/// Pairs each step id with its 1-based position in `ids`.
pub fn assign_positions(ids: &[Uuid]) -> Vec<StepOrder> {
    ids.iter()
        .zip(1..)
        .map(|(step_id, order)| StepOrder { step_id: *step_id, order })
        .collect()
}
