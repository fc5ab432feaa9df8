use super::common::date;
use crate::workflows::outpass::{summarize, ApprovalStatus, OutpassRecord, OutpassType};
use serde_json::json;

#[test]
fn backend_payload_decodes_with_derived_status() {
    let payload = json!({
        "_id": "665f1c2ab9",
        "studentName": "Arun K",
        "registerNumber": 721221104007u64,
        "outpassType": "Emergency",
        "reason": "Family function",
        "fromDate": "2025-11-08",
        "toDate": "2025-11-10T18:00:00Z",
        "studentResidenceType": "hostel",
        "overallStatus": "approved",
        "staff": { "status": "Approved", "remarks": "ok", "approvedAt": "2025-11-06T10:00:00Z" },
        "yearIncharge": { "status": "pending" },
        "warden": { "status": "pending" }
    });

    let record: OutpassRecord = serde_json::from_value(payload).expect("record decodes");

    assert_eq!(record.id.as_deref(), Some("665f1c2ab9"));
    assert_eq!(record.register_number.as_deref(), Some("721221104007"));
    assert_eq!(record.outpass_type, OutpassType::Emergency);
    assert_eq!(record.from_date, Some(date(2025, 11, 8)));
    assert_eq!(record.to_date, Some(date(2025, 11, 10)));
    assert_eq!(record.staff.status, ApprovalStatus::Approved);
    assert!(record.staff.approved_at.is_some());
    assert_eq!(record.overall_status(), ApprovalStatus::Pending);
}

#[test]
fn malformed_fields_fall_back_instead_of_failing() {
    let payload = json!({
        "outpassType": 42,
        "fromDate": "next friday",
        "staff": { "status": "escalated", "remarks": ["not", "text"], "approvedAt": "soon" },
        "warden": { "status": null }
    });

    let record: OutpassRecord = serde_json::from_value(payload).expect("record decodes");

    assert_eq!(record.outpass_type, OutpassType::Unspecified);
    assert!(record.from_date.is_none());
    assert_eq!(record.staff.status, ApprovalStatus::Pending);
    assert!(record.staff.remarks.is_none());
    assert!(record.staff.approved_at.is_none());
    assert!(record.year_incharge.is_none());
    assert_eq!(record.warden.status, ApprovalStatus::Pending);
}

#[test]
fn non_object_approval_entries_read_as_not_yet_acted_on() {
    let listing = json!([
        {
            "_id": "op-1",
            "studentResidenceType": "Day Scholar",
            "staff": { "status": "approved" },
            "yearIncharge": "approved",
            "warden": null
        },
        {
            "_id": "op-2",
            "studentResidenceType": "hostel",
            "staff": { "status": "approved" },
            "yearIncharge": { "status": "approved" },
            "warden": "pending"
        }
    ]);

    let records: Vec<OutpassRecord> = serde_json::from_value(listing).expect("listing decodes");

    assert_eq!(records.len(), 2);
    assert!(records[0].year_incharge.is_none());
    assert_eq!(records[0].warden.status, ApprovalStatus::Pending);
    assert_eq!(records[0].overall_status(), ApprovalStatus::Approved);
    assert_eq!(records[1].warden.status, ApprovalStatus::Pending);
    assert_eq!(records[1].overall_status(), ApprovalStatus::Pending);

    let summary = summarize(&records);
    assert_eq!((summary.approved, summary.pending), (1, 1));
}

#[test]
fn unknown_outpass_types_keep_their_label() {
    let parsed = OutpassType::parse("  Medical Leave ");

    assert_eq!(parsed, OutpassType::Other("Medical Leave".to_string()));
    assert_eq!(parsed.label(), "Medical Leave");
    assert!(OutpassType::parse("on duty") == OutpassType::OnDuty);
}

#[test]
fn serialized_record_uses_backend_keys() {
    let record = OutpassRecord {
        outpass_type: OutpassType::OnDuty,
        staff: crate::workflows::outpass::StageApproval::with_status(ApprovalStatus::Rejected),
        ..OutpassRecord::default()
    };

    let value = serde_json::to_value(&record).expect("record serializes");

    assert_eq!(value["outpassType"], "OD");
    assert_eq!(value["staff"]["status"], "rejected");
    assert!(value.get("yearIncharge").is_none());
}
