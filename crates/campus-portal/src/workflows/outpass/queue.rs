use super::domain::{OutpassRecord, ReviewerRole};
use super::timeline::VisualState;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Secondary ordering applied after emergencies are pulled to the front.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueOrder {
    /// Keep the order the backend listed the requests in.
    #[default]
    Submission,
    /// Latest `fromDate` first; undated requests last.
    NewestFirst,
}

/// Emergencies first. The sort is stable, so ties keep their input order
/// (or newest-first under [`QueueOrder::NewestFirst`]).
pub fn prioritize<'a, I>(records: I, order: QueueOrder) -> Vec<&'a OutpassRecord>
where
    I: IntoIterator<Item = &'a OutpassRecord>,
{
    let mut queue: Vec<&OutpassRecord> = records.into_iter().collect();
    match order {
        QueueOrder::Submission => queue.sort_by_key(|record| !record.is_emergency()),
        QueueOrder::NewestFirst => {
            queue.sort_by_key(|record| (!record.is_emergency(), Reverse(record.from_date)))
        }
    }
    queue
}

/// Requests currently waiting on `role`, i.e. whose timeline shows that
/// role's stage as active.
pub fn pending_for(
    role: ReviewerRole,
    records: &[OutpassRecord],
    order: QueueOrder,
) -> Vec<&OutpassRecord> {
    prioritize(
        records
            .iter()
            .filter(|record| record.stage_state(role) == Some(VisualState::Active)),
        order,
    )
}
