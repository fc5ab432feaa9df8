use super::lenient;
use crate::workflows::profile::ResidenceType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Decision recorded by one reviewing role. Also used for the derived overall status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Value")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Unrecognized values fall back to [`ApprovalStatus::Pending`] so the
    /// record keeps showing up as needing attention.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "pending" | "" => Self::Pending,
            other => {
                tracing::debug!(
                    status = other,
                    "unrecognized approval status, treating as pending"
                );
                Self::Pending
            }
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl From<Value> for ApprovalStatus {
    fn from(value: Value) -> Self {
        match value {
            Value::String(raw) => Self::parse(&raw),
            _ => Self::Pending,
        }
    }
}

/// One role's approval sub-record on an outpass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StageApproval {
    pub status: ApprovalStatus,
    #[serde(
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub remarks: Option<String>,
    #[serde(
        deserialize_with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(
        deserialize_with = "lenient::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub rejected_at: Option<DateTime<Utc>>,
}

impl StageApproval {
    pub fn with_status(status: ApprovalStatus) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Timestamp matching the recorded decision, if any.
    pub fn decided_at(&self) -> Option<DateTime<Utc>> {
        match self.status {
            ApprovalStatus::Approved => self.approved_at,
            ApprovalStatus::Rejected => self.rejected_at,
            ApprovalStatus::Pending => None,
        }
    }
}

/// Kind of leave requested. Labels outside the known set are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Value")]
pub enum OutpassType {
    Emergency,
    Outing,
    OnDuty,
    Home,
    Other(String),
    #[default]
    Unspecified,
}

impl OutpassType {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match crate::workflows::profile::domain::normalize_token(trimmed).as_str() {
            "" => Self::Unspecified,
            "emergency" => Self::Emergency,
            "outing" => Self::Outing,
            "od" | "onduty" => Self::OnDuty,
            "home" | "homevisit" => Self::Home,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Emergency => "Emergency",
            Self::Outing => "Outing",
            Self::OnDuty => "OD",
            Self::Home => "Home",
            Self::Other(label) => label.as_str(),
            Self::Unspecified => "",
        }
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, Self::Emergency)
    }
}

impl From<Value> for OutpassType {
    fn from(value: Value) -> Self {
        match value {
            Value::String(raw) => Self::parse(&raw),
            _ => Self::Unspecified,
        }
    }
}

impl Serialize for OutpassType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Unspecified => serializer.serialize_none(),
            other => serializer.serialize_str(other.label()),
        }
    }
}

/// Roles that sign off on an outpass, in approval order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerRole {
    Staff,
    #[serde(alias = "yearIncharge", alias = "year-incharge")]
    YearIncharge,
    Warden,
}

impl ReviewerRole {
    pub const fn ordered() -> [Self; 3] {
        [Self::Staff, Self::YearIncharge, Self::Warden]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match crate::workflows::profile::domain::normalize_token(raw)
            .replace(|ch: char| ch == '-' || ch == '_', "")
            .as_str()
        {
            "staff" => Some(Self::Staff),
            "yearincharge" => Some(Self::YearIncharge),
            "warden" => Some(Self::Warden),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Staff => "Staff",
            Self::YearIncharge => "Year Incharge",
            Self::Warden => "Warden",
        }
    }
}

/// An outpass request as listed by the portal backend.
///
/// Any `overallStatus` the backend sends is ignored; see [`OutpassRecord::overall_status`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutpassRecord {
    #[serde(
        alias = "_id",
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub student_name: Option<String>,
    #[serde(
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub register_number: Option<String>,
    pub outpass_type: OutpassType,
    #[serde(
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason: Option<String>,
    #[serde(
        deserialize_with = "lenient::date",
        skip_serializing_if = "Option::is_none"
    )]
    pub from_date: Option<NaiveDate>,
    #[serde(
        deserialize_with = "lenient::date",
        skip_serializing_if = "Option::is_none"
    )]
    pub to_date: Option<NaiveDate>,
    #[serde(
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub student_residence_type: Option<String>,
    #[serde(deserialize_with = "lenient::stage")]
    pub staff: StageApproval,
    #[serde(
        deserialize_with = "lenient::optional_stage",
        skip_serializing_if = "Option::is_none"
    )]
    pub year_incharge: Option<StageApproval>,
    #[serde(deserialize_with = "lenient::stage")]
    pub warden: StageApproval,
}

impl OutpassRecord {
    pub fn is_day_scholar(&self) -> bool {
        is_day_scholar(self.student_residence_type.as_deref())
    }

    pub fn is_emergency(&self) -> bool {
        self.outpass_type.is_emergency()
    }

    /// The role's sub-record, or `None` when that stage does not apply to this record.
    pub fn stage(&self, role: ReviewerRole) -> Option<&StageApproval> {
        match role {
            ReviewerRole::Staff => Some(&self.staff),
            ReviewerRole::YearIncharge => self.year_incharge.as_ref(),
            ReviewerRole::Warden if self.is_day_scholar() => None,
            ReviewerRole::Warden => Some(&self.warden),
        }
    }

    /// Applicable stages in approval order.
    pub fn applicable_stages(&self) -> Vec<(ReviewerRole, &StageApproval)> {
        ReviewerRole::ordered()
            .into_iter()
            .filter_map(|role| self.stage(role).map(|approval| (role, approval)))
            .collect()
    }

    /// Rejected if any applicable stage rejected, approved once every
    /// applicable stage approved, pending otherwise.
    pub fn overall_status(&self) -> ApprovalStatus {
        let stages = self.applicable_stages();
        if stages
            .iter()
            .any(|(_, approval)| approval.status == ApprovalStatus::Rejected)
        {
            ApprovalStatus::Rejected
        } else if stages
            .iter()
            .all(|(_, approval)| approval.status == ApprovalStatus::Approved)
        {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Pending
        }
    }
}

/// Residence strings are compared after lower-casing and removing whitespace.
pub fn is_day_scholar(residence_type: Option<&str>) -> bool {
    residence_type.and_then(ResidenceType::parse) == Some(ResidenceType::DayScholar)
}
