use super::domain::{ApprovalStatus, OutpassRecord, ReviewerRole, StageApproval};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStage {
    StudentApplied,
    Staff,
    YearIncharge,
    Warden,
}

impl ApprovalStage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::StudentApplied => "Student Applied",
            Self::Staff => "Staff",
            Self::YearIncharge => "Year Incharge",
            Self::Warden => "Warden",
        }
    }
}

impl From<ReviewerRole> for ApprovalStage {
    fn from(role: ReviewerRole) -> Self {
        match role {
            ReviewerRole::Staff => Self::Staff,
            ReviewerRole::YearIncharge => Self::YearIncharge,
            ReviewerRole::Warden => Self::Warden,
        }
    }
}

/// How a stage is drawn on the approval timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    Completed,
    Active,
    Rejected,
    Inactive,
}

impl VisualState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Active => "Awaiting Approval",
            Self::Rejected => "Rejected",
            Self::Inactive => "Not Started",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub stage: ApprovalStage,
    pub stage_label: &'static str,
    pub state: VisualState,
    pub state_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

impl TimelineEntry {
    fn new(stage: ApprovalStage, state: VisualState) -> Self {
        Self {
            stage,
            stage_label: stage.label(),
            state,
            state_label: state.label(),
            remarks: None,
            decided_at: None,
        }
    }
}

/// Timeline from bare statuses. `year_incharge` is `None` for flows without that stage.
pub fn timeline_of(
    staff: ApprovalStatus,
    warden: ApprovalStatus,
    year_incharge: Option<ApprovalStatus>,
    is_day_scholar: bool,
) -> Vec<TimelineEntry> {
    let staff = StageApproval::with_status(staff);
    let year_incharge = year_incharge.map(StageApproval::with_status);
    let warden = StageApproval::with_status(warden);

    let mut stages = vec![(ApprovalStage::Staff, &staff)];
    if let Some(approval) = &year_incharge {
        stages.push((ApprovalStage::YearIncharge, approval));
    }
    if !is_day_scholar {
        stages.push((ApprovalStage::Warden, &warden));
    }

    sequence(stages)
}

impl OutpassRecord {
    /// Timeline including remarks and decision timestamps of decided stages.
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        let stages = self
            .applicable_stages()
            .into_iter()
            .map(|(role, approval)| (ApprovalStage::from(role), approval))
            .collect();
        sequence(stages)
    }

    /// Visual state of the role's stage, `None` when the stage does not apply.
    pub fn stage_state(&self, role: ReviewerRole) -> Option<VisualState> {
        let stage = ApprovalStage::from(role);
        self.timeline()
            .into_iter()
            .find(|entry| entry.stage == stage)
            .map(|entry| entry.state)
    }
}

/// A stage only opens once the stage before it is completed.
fn sequence(stages: Vec<(ApprovalStage, &StageApproval)>) -> Vec<TimelineEntry> {
    let mut entries = Vec::with_capacity(stages.len() + 1);
    entries.push(TimelineEntry::new(
        ApprovalStage::StudentApplied,
        VisualState::Completed,
    ));

    let mut previous_completed = true;
    for (stage, approval) in stages {
        let state = if previous_completed {
            match approval.status {
                ApprovalStatus::Approved => VisualState::Completed,
                ApprovalStatus::Rejected => VisualState::Rejected,
                ApprovalStatus::Pending => VisualState::Active,
            }
        } else {
            VisualState::Inactive
        };

        let mut entry = TimelineEntry::new(stage, state);
        if matches!(state, VisualState::Completed | VisualState::Rejected) {
            entry.remarks = approval.remarks.clone();
            entry.decided_at = approval.decided_at();
        }
        entries.push(entry);

        previous_completed = state == VisualState::Completed;
    }

    entries
}
