//! Student profile completeness.
//!
//! Pages used to carry their own required-field lists; every check now goes
//! through [`ProfileCompletenessEvaluator`] with a named [`CompletenessPolicy`].

pub mod domain;
mod evaluator;
mod policy;

pub use domain::{FieldValue, ProfileField, ResidenceType, StudentProfile};
pub use evaluator::{ProfileCompleteness, ProfileCompletenessEvaluator};
pub use policy::{CompletenessPolicy, PolicyKind};
