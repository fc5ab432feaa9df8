use super::domain::{ProfileField, StudentProfile};
use super::policy::{CompletenessPolicy, PolicyKind};
use serde::Serialize;

/// Result of checking a profile against a [`CompletenessPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCompleteness {
    pub is_complete: bool,
    pub percentage: u8,
    pub filled: usize,
    pub required: usize,
    pub missing: Vec<ProfileField>,
}

impl ProfileCompleteness {
    fn absent() -> Self {
        Self {
            is_complete: false,
            percentage: 0,
            filled: 0,
            required: 0,
            missing: Vec::new(),
        }
    }

    pub fn missing_labels(&self) -> Vec<&'static str> {
        self.missing.iter().map(|field| field.label()).collect()
    }
}

/// Stateless evaluator that applies a completeness policy to a profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileCompletenessEvaluator {
    policy: CompletenessPolicy,
}

impl ProfileCompletenessEvaluator {
    pub fn new(policy: CompletenessPolicy) -> Self {
        Self { policy }
    }

    pub fn for_kind(kind: PolicyKind) -> Self {
        Self::new(CompletenessPolicy::for_kind(kind))
    }

    pub fn policy(&self) -> &CompletenessPolicy {
        &self.policy
    }

    /// A profile that has not loaded yet is simply incomplete.
    pub fn evaluate(&self, profile: Option<&StudentProfile>) -> ProfileCompleteness {
        let Some(profile) = profile else {
            return ProfileCompleteness::absent();
        };

        let required = self.policy.required_fields(profile.residence());
        let missing: Vec<ProfileField> = required
            .iter()
            .copied()
            .filter(|field| !profile.field(*field).is_filled())
            .collect();

        let required_count = required.len();
        let filled = required_count - missing.len();

        ProfileCompleteness {
            is_complete: filled == required_count,
            percentage: rounded_percentage(filled, required_count),
            filled,
            required: required_count,
            missing,
        }
    }

    pub fn is_complete(&self, profile: Option<&StudentProfile>) -> bool {
        self.evaluate(profile).is_complete
    }
}

/// Round-half-up integer percentage. An empty requirement set is fully met.
fn rounded_percentage(filled: usize, required: usize) -> u8 {
    if required == 0 {
        return 100;
    }
    let scaled = (200 * filled + required) / (2 * required);
    u8::try_from(scaled.min(100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::profile::domain::FieldValue;

    fn hostel_profile() -> StudentProfile {
        StudentProfile {
            name: "Kavya R".into(),
            register_number: "721221104018".into(),
            department: "CSE".into(),
            year: "III".into(),
            semester: 5u32.into(),
            batch: "2022-2026".into(),
            cgpa: FieldValue::Number(8.4),
            arrears: FieldValue::Missing,
            gender: "Female".into(),
            phone: "9876543210".into(),
            email: "kavya@college.edu".into(),
            parent_number: "9123456780".into(),
            photo: "uploads/kavya.jpg".into(),
            residence_type: "hostel".into(),
            hostel_name: "Ganga".into(),
            hostel_room_no: "B-214".into(),
            bus_no: FieldValue::Missing,
            boarding_point: FieldValue::Missing,
        }
    }

    #[test]
    fn complete_hostel_profile_reaches_full_percentage() {
        let evaluator = ProfileCompletenessEvaluator::default();
        let outcome = evaluator.evaluate(Some(&hostel_profile()));

        assert!(outcome.is_complete);
        assert_eq!(outcome.percentage, 100);
        assert_eq!(outcome.required, 15);
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn absent_profile_is_incomplete_without_error() {
        let evaluator = ProfileCompletenessEvaluator::default();
        let outcome = evaluator.evaluate(None);

        assert!(!outcome.is_complete);
        assert_eq!(outcome.percentage, 0);
        assert!(!evaluator.is_complete(None));
    }

    #[test]
    fn each_single_missing_field_breaks_completeness() {
        let evaluator = ProfileCompletenessEvaluator::default();
        let base = hostel_profile();
        let required = evaluator.policy().required_fields(base.residence());

        for field in required {
            let mut profile = base.clone();
            blank(&mut profile, field);
            let outcome = evaluator.evaluate(Some(&profile));
            assert!(!outcome.is_complete, "{field:?} should be required");
            assert!(outcome.percentage < 100, "{field:?} left percentage at 100");
            assert_eq!(outcome.missing, vec![field]);
        }
    }

    #[test]
    fn rounding_never_reports_false_completeness() {
        assert_eq!(rounded_percentage(14, 15), 93);
        assert_eq!(rounded_percentage(1, 8), 13);
        assert_eq!(rounded_percentage(199, 200), 100);

        let policy = CompletenessPolicy::custom(
            "contact",
            vec![
                ProfileField::Name,
                ProfileField::Email,
                ProfileField::Phone,
                ProfileField::ParentNumber,
            ],
        );
        let mut profile = hostel_profile();
        profile.phone = FieldValue::Text(String::new());
        let outcome = ProfileCompletenessEvaluator::new(policy).evaluate(Some(&profile));
        assert_eq!(outcome.filled, 5);
        assert_eq!(outcome.required, 6);
        assert!(!outcome.is_complete);
    }

    #[test]
    fn zero_values_count_as_unfilled() {
        let mut profile = hostel_profile();
        profile.cgpa = FieldValue::Number(0.0);

        let outcome = ProfileCompletenessEvaluator::default().evaluate(Some(&profile));

        assert_eq!(outcome.missing, vec![ProfileField::Cgpa]);
    }

    #[test]
    fn switching_residence_changes_required_fields_only() {
        let evaluator = ProfileCompletenessEvaluator::default();
        let mut profile = hostel_profile();
        profile.residence_type = "Day Scholar".into();

        let outcome = evaluator.evaluate(Some(&profile));

        assert_eq!(
            outcome.missing,
            vec![ProfileField::BusNo, ProfileField::BoardingPoint]
        );
        assert_eq!(outcome.percentage, 87);
        assert_eq!(profile.hostel_name, FieldValue::from("Ganga"));
    }

    #[test]
    fn unrecognized_residence_adds_no_conditional_fields() {
        let mut profile = hostel_profile();
        profile.residence_type = "off campus".into();

        let outcome = ProfileCompletenessEvaluator::default().evaluate(Some(&profile));

        assert!(outcome.is_complete);
        assert_eq!(outcome.required, 13);
    }

    #[test]
    fn access_gate_ignores_academic_fields() {
        let mut profile = hostel_profile();
        profile.semester = FieldValue::Missing;
        profile.batch = FieldValue::Missing;
        profile.cgpa = FieldValue::Missing;
        profile.gender = FieldValue::Missing;

        let gate = ProfileCompletenessEvaluator::for_kind(PolicyKind::AccessGate);
        let full = ProfileCompletenessEvaluator::for_kind(PolicyKind::Full);

        assert!(gate.is_complete(Some(&profile)));
        assert!(!full.is_complete(Some(&profile)));
    }

    #[test]
    fn empty_policy_is_trivially_complete() {
        let evaluator = ProfileCompletenessEvaluator::new(CompletenessPolicy::custom(
            "empty",
            Vec::new(),
        ));
        let outcome = evaluator.evaluate(Some(&StudentProfile::default()));

        assert!(outcome.is_complete);
        assert_eq!(outcome.percentage, 100);
    }

    fn blank(profile: &mut StudentProfile, field: ProfileField) {
        let value = match field {
            ProfileField::Name => &mut profile.name,
            ProfileField::RegisterNumber => &mut profile.register_number,
            ProfileField::Department => &mut profile.department,
            ProfileField::Year => &mut profile.year,
            ProfileField::Semester => &mut profile.semester,
            ProfileField::Batch => &mut profile.batch,
            ProfileField::Cgpa => &mut profile.cgpa,
            ProfileField::Arrears => &mut profile.arrears,
            ProfileField::Gender => &mut profile.gender,
            ProfileField::Phone => &mut profile.phone,
            ProfileField::Email => &mut profile.email,
            ProfileField::ParentNumber => &mut profile.parent_number,
            ProfileField::Photo => &mut profile.photo,
            ProfileField::ResidenceType => &mut profile.residence_type,
            ProfileField::HostelName => &mut profile.hostel_name,
            ProfileField::HostelRoomNo => &mut profile.hostel_room_no,
            ProfileField::BusNo => &mut profile.bus_no,
            ProfileField::BoardingPoint => &mut profile.boarding_point,
        };
        *value = FieldValue::Text(String::new());
    }
}
