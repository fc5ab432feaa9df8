use super::super::domain::{ApprovalStatus, OutpassRecord, ReviewerRole};
use super::super::queue::{pending_for, QueueOrder};
use super::views::RoleLoadEntry;
use serde::{Deserialize, Serialize};

/// Tally of derived overall statuses. `approved + rejected + pending == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutpassSummary {
    pub total: usize,
    pub approved: usize,
    pub rejected: usize,
    pub pending: usize,
}

impl OutpassSummary {
    pub fn count(&self, status: ApprovalStatus) -> usize {
        match status {
            ApprovalStatus::Approved => self.approved,
            ApprovalStatus::Rejected => self.rejected,
            ApprovalStatus::Pending => self.pending,
        }
    }
}

pub fn summarize(records: &[OutpassRecord]) -> OutpassSummary {
    let mut summary = OutpassSummary {
        total: records.len(),
        ..OutpassSummary::default()
    };

    for record in records {
        match record.overall_status() {
            ApprovalStatus::Approved => summary.approved += 1,
            ApprovalStatus::Rejected => summary.rejected += 1,
            ApprovalStatus::Pending => summary.pending += 1,
        }
    }

    summary
}

/// Category selector on the outpass history pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Approved,
    Rejected,
    Pending,
}

impl StatusFilter {
    /// Unknown names select everything.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "pending" => Self::Pending,
            _ => Self::All,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Pending => "Pending",
        }
    }

    pub fn matches(self, record: &OutpassRecord) -> bool {
        match self {
            Self::All => true,
            Self::Approved => record.overall_status() == ApprovalStatus::Approved,
            Self::Rejected => record.overall_status() == ApprovalStatus::Rejected,
            Self::Pending => record.overall_status() == ApprovalStatus::Pending,
        }
    }

    pub fn apply(self, records: &[OutpassRecord]) -> Vec<&OutpassRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// Dashboard aggregate: status tally plus what each reviewer still has to act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutpassReport {
    pub summary: OutpassSummary,
    pub role_load: Vec<RoleLoadEntry>,
}

impl OutpassReport {
    pub fn build(records: &[OutpassRecord]) -> Self {
        let summary = summarize(records);

        let role_load = ReviewerRole::ordered()
            .into_iter()
            .map(|role| {
                let queue = pending_for(role, records, QueueOrder::Submission);
                RoleLoadEntry {
                    role,
                    role_label: role.label(),
                    pending: queue.len(),
                    emergencies: queue.iter().filter(|record| record.is_emergency()).count(),
                }
            })
            .collect();

        tracing::debug!(
            total = summary.total,
            approved = summary.approved,
            rejected = summary.rejected,
            pending = summary.pending,
            "outpass report built"
        );

        Self { summary, role_load }
    }
}
