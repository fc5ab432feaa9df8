use super::domain::{ApprovalStatus, OutpassRecord};
use chrono::NaiveDate;
use serde::Serialize;

/// Watchman's verdict when a student presents an outpass at the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GateCheck {
    Cleared,
    NotApproved { status: ApprovalStatus },
    OutsideWindow,
}

impl GateCheck {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cleared => "Cleared",
            Self::NotApproved { .. } => "Not Approved",
            Self::OutsideWindow => "Outside Validity Window",
        }
    }

    pub fn is_cleared(self) -> bool {
        matches!(self, Self::Cleared)
    }
}

/// Missing `fromDate`/`toDate` leave that side of the window open.
pub fn gate_check(record: &OutpassRecord, today: NaiveDate) -> GateCheck {
    let status = record.overall_status();
    if status != ApprovalStatus::Approved {
        return GateCheck::NotApproved { status };
    }

    let started = record.from_date.map_or(true, |from| from <= today);
    let not_expired = record.to_date.map_or(true, |to| today <= to);
    if started && not_expired {
        GateCheck::Cleared
    } else {
        GateCheck::OutsideWindow
    }
}
