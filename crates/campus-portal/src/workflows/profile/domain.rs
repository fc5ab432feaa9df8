use serde::{Deserialize, Serialize};

/// Raw value of a single profile field as delivered by the portal backend.
///
/// The backend is loose about types (year may be `"3"` or `3`), so anything
/// that is not a string, number or null is kept as [`FieldValue::Malformed`]
/// instead of failing the whole profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Missing,
    Text(String),
    Number(f64),
    Malformed(serde_json::Value),
}

impl FieldValue {
    /// Non-empty strings and non-zero numbers count as filled. Zero is unfilled.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Number(number) => *number != 0.0,
            FieldValue::Missing | FieldValue::Malformed(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

/// Where a student lives during term; selects the conditional profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidenceType {
    Hostel,
    DayScholar,
}

impl ResidenceType {
    /// Lower-cases and drops all whitespace, so `"Day Scholar"` and
    /// `"dayscholar"` both resolve to [`ResidenceType::DayScholar`].
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "hostel" => Some(Self::Hostel),
            "dayscholar" => Some(Self::DayScholar),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Hostel => "Hostel",
            Self::DayScholar => "Day Scholar",
        }
    }

    /// Fields that only apply to this residence type.
    pub const fn conditional_fields(self) -> [ProfileField; 2] {
        match self {
            Self::Hostel => [ProfileField::HostelName, ProfileField::HostelRoomNo],
            Self::DayScholar => [ProfileField::BusNo, ProfileField::BoardingPoint],
        }
    }
}

pub(crate) fn normalize_token(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Student profile as returned by the portal's profile endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentProfile {
    pub name: FieldValue,
    #[serde(rename = "registerNumber")]
    pub register_number: FieldValue,
    pub department: FieldValue,
    pub year: FieldValue,
    pub semester: FieldValue,
    pub batch: FieldValue,
    pub cgpa: FieldValue,
    pub arrears: FieldValue,
    pub gender: FieldValue,
    pub phone: FieldValue,
    pub email: FieldValue,
    #[serde(rename = "parentnumber")]
    pub parent_number: FieldValue,
    pub photo: FieldValue,
    #[serde(rename = "residencetype")]
    pub residence_type: FieldValue,
    #[serde(rename = "hostelname")]
    pub hostel_name: FieldValue,
    #[serde(rename = "hostelroomno")]
    pub hostel_room_no: FieldValue,
    #[serde(rename = "busno")]
    pub bus_no: FieldValue,
    #[serde(rename = "boardingpoint")]
    pub boarding_point: FieldValue,
}

impl StudentProfile {
    pub fn field(&self, field: ProfileField) -> &FieldValue {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::RegisterNumber => &self.register_number,
            ProfileField::Department => &self.department,
            ProfileField::Year => &self.year,
            ProfileField::Semester => &self.semester,
            ProfileField::Batch => &self.batch,
            ProfileField::Cgpa => &self.cgpa,
            ProfileField::Arrears => &self.arrears,
            ProfileField::Gender => &self.gender,
            ProfileField::Phone => &self.phone,
            ProfileField::Email => &self.email,
            ProfileField::ParentNumber => &self.parent_number,
            ProfileField::Photo => &self.photo,
            ProfileField::ResidenceType => &self.residence_type,
            ProfileField::HostelName => &self.hostel_name,
            ProfileField::HostelRoomNo => &self.hostel_room_no,
            ProfileField::BusNo => &self.bus_no,
            ProfileField::BoardingPoint => &self.boarding_point,
        }
    }

    /// Current residence type, or `None` when the field is blank or unrecognized.
    pub fn residence(&self) -> Option<ResidenceType> {
        self.residence_type.as_text().and_then(ResidenceType::parse)
    }
}

/// Every profile field the evaluator knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProfileField {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "registerNumber")]
    RegisterNumber,
    #[serde(rename = "department")]
    Department,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "semester")]
    Semester,
    #[serde(rename = "batch")]
    Batch,
    #[serde(rename = "cgpa")]
    Cgpa,
    #[serde(rename = "arrears")]
    Arrears,
    #[serde(rename = "gender")]
    Gender,
    #[serde(rename = "phone")]
    Phone,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "parentnumber")]
    ParentNumber,
    #[serde(rename = "photo")]
    Photo,
    #[serde(rename = "residencetype")]
    ResidenceType,
    #[serde(rename = "hostelname")]
    HostelName,
    #[serde(rename = "hostelroomno")]
    HostelRoomNo,
    #[serde(rename = "busno")]
    BusNo,
    #[serde(rename = "boardingpoint")]
    BoardingPoint,
}

impl ProfileField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::RegisterNumber => "Register Number",
            Self::Department => "Department",
            Self::Year => "Year",
            Self::Semester => "Semester",
            Self::Batch => "Batch",
            Self::Cgpa => "CGPA",
            Self::Arrears => "Arrears",
            Self::Gender => "Gender",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::ParentNumber => "Parent Number",
            Self::Photo => "Photo",
            Self::ResidenceType => "Residence Type",
            Self::HostelName => "Hostel Name",
            Self::HostelRoomNo => "Hostel Room No",
            Self::BusNo => "Bus No",
            Self::BoardingPoint => "Boarding Point",
        }
    }
}
