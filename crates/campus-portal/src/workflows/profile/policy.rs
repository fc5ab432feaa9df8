use super::domain::{ProfileField, ResidenceType};
use serde::{Deserialize, Serialize};

/// Named required-field configurations used across the portal.
///
/// Decoding accepts the same spellings as [`PolicyKind::parse`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum PolicyKind {
    /// Progress indicator on the profile page.
    #[default]
    Full,
    /// Navigation gate for restricted pages (outpass requests and similar).
    AccessGate,
}

impl PolicyKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "full" | "profile" => Some(Self::Full),
            "access_gate" | "gate" => Some(Self::AccessGate),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "Profile",
            Self::AccessGate => "Access Gate",
        }
    }
}

impl TryFrom<String> for PolicyKind {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or_else(|| format!("unknown completeness policy '{raw}'"))
    }
}

const FULL_COMMON_FIELDS: [ProfileField; 13] = [
    ProfileField::Name,
    ProfileField::Email,
    ProfileField::Phone,
    ProfileField::ParentNumber,
    ProfileField::RegisterNumber,
    ProfileField::Department,
    ProfileField::Year,
    ProfileField::Semester,
    ProfileField::Batch,
    ProfileField::Cgpa,
    ProfileField::Gender,
    ProfileField::Photo,
    ProfileField::ResidenceType,
];

const ACCESS_GATE_COMMON_FIELDS: [ProfileField; 9] = [
    ProfileField::Name,
    ProfileField::RegisterNumber,
    ProfileField::Department,
    ProfileField::Year,
    ProfileField::Phone,
    ProfileField::Email,
    ProfileField::ParentNumber,
    ProfileField::ResidenceType,
    ProfileField::Photo,
];

/// Required-field set for one completeness check.
///
/// Residence-conditional fields are appended at evaluation time from the
/// profile's current residence type, never stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletenessPolicy {
    name: &'static str,
    common: Vec<ProfileField>,
}

impl CompletenessPolicy {
    pub fn for_kind(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::Full => Self::full(),
            PolicyKind::AccessGate => Self::access_gate(),
        }
    }

    pub fn full() -> Self {
        Self::custom("profile", FULL_COMMON_FIELDS.to_vec())
    }

    pub fn access_gate() -> Self {
        Self::custom("access_gate", ACCESS_GATE_COMMON_FIELDS.to_vec())
    }

    /// Builds a policy from an explicit field list. Duplicates are dropped,
    /// first occurrence wins.
    pub fn custom(name: &'static str, fields: Vec<ProfileField>) -> Self {
        let mut common: Vec<ProfileField> = Vec::with_capacity(fields.len());
        for field in fields {
            if !common.contains(&field) {
                common.push(field);
            }
        }
        Self { name, common }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn common_fields(&self) -> &[ProfileField] {
        &self.common
    }

    /// Common fields followed by whatever the residence type adds.
    pub fn required_fields(&self, residence: Option<ResidenceType>) -> Vec<ProfileField> {
        let mut required = self.common.clone();
        if let Some(residence) = residence {
            for field in residence.conditional_fields() {
                if !required.contains(&field) {
                    required.push(field);
                }
            }
        }
        required
    }
}

impl Default for CompletenessPolicy {
    fn default() -> Self {
        Self::full()
    }
}
