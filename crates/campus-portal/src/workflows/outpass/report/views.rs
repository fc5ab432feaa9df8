use super::super::domain::{ApprovalStatus, OutpassRecord, ReviewerRole};
use super::super::timeline::TimelineEntry;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleLoadEntry {
    pub role: ReviewerRole,
    pub role_label: &'static str,
    pub pending: usize,
    pub emergencies: usize,
}

/// Render-ready outpass with its derived status and timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutpassView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    pub outpass_type: String,
    pub emergency: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
    pub overall_status: ApprovalStatus,
    pub overall_status_label: &'static str,
    pub timeline: Vec<TimelineEntry>,
}

impl OutpassRecord {
    pub fn to_view(&self) -> OutpassView {
        let overall_status = self.overall_status();
        OutpassView {
            id: self.id.clone(),
            student_name: self.student_name.clone(),
            outpass_type: self.outpass_type.label().to_string(),
            emergency: self.is_emergency(),
            from_date: self.from_date,
            to_date: self.to_date,
            overall_status,
            overall_status_label: overall_status.label(),
            timeline: self.timeline(),
        }
    }
}
