use chrono::NaiveDate;

use crate::workflows::outpass::domain::{
    ApprovalStatus, OutpassRecord, OutpassType, StageApproval,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn stage(status: ApprovalStatus) -> StageApproval {
    StageApproval::with_status(status)
}

/// Hostel student on a three-stage flow.
pub(super) fn record(
    id: &str,
    staff: ApprovalStatus,
    year_incharge: ApprovalStatus,
    warden: ApprovalStatus,
) -> OutpassRecord {
    OutpassRecord {
        id: Some(id.to_string()),
        student_name: Some(format!("Student {id}")),
        register_number: Some(format!("7212211040{id}")),
        outpass_type: OutpassType::Outing,
        reason: Some("Weekend visit".to_string()),
        from_date: Some(date(2025, 11, 8)),
        to_date: Some(date(2025, 11, 9)),
        student_residence_type: Some("hostel".to_string()),
        staff: stage(staff),
        year_incharge: Some(stage(year_incharge)),
        warden: stage(warden),
    }
}

pub(super) fn day_scholar(
    id: &str,
    staff: ApprovalStatus,
    year_incharge: ApprovalStatus,
) -> OutpassRecord {
    let mut record = record(id, staff, year_incharge, ApprovalStatus::Pending);
    record.student_residence_type = Some("Day Scholar".to_string());
    record
}

pub(super) fn typed(id: &str, outpass_type: &str, from: NaiveDate) -> OutpassRecord {
    let mut record = record(
        id,
        ApprovalStatus::Pending,
        ApprovalStatus::Pending,
        ApprovalStatus::Pending,
    );
    record.outpass_type = OutpassType::parse(outpass_type);
    record.from_date = Some(from);
    record
}

pub(super) fn ids(records: &[&OutpassRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.id.clone().unwrap_or_default())
        .collect()
}
