//! Outpass approval aggregation.
//!
//! Stage statuses are set by the reviewing roles through the portal backend;
//! everything here only reads them and derives timelines, overall status,
//! dashboard tallies and review queues.

pub mod domain;
mod gate;
mod lenient;
mod queue;
pub mod report;
mod timeline;

#[cfg(test)]
mod tests;

pub use domain::{
    is_day_scholar, ApprovalStatus, OutpassRecord, OutpassType, ReviewerRole, StageApproval,
};
pub use gate::{gate_check, GateCheck};
pub use queue::{pending_for, prioritize, QueueOrder};
pub use report::views::{OutpassView, RoleLoadEntry};
pub use report::{summarize, OutpassReport, OutpassSummary, StatusFilter};
pub use timeline::{timeline_of, ApprovalStage, TimelineEntry, VisualState};
