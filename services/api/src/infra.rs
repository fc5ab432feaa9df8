use campus_portal::config::PortalConfig;
use campus_portal::error::AppError;
use campus_portal::workflows::profile::{PolicyKind, ProfileCompletenessEvaluator};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One evaluator per named policy, built once and shared by every handler.
#[derive(Debug, Clone)]
pub(crate) struct EvaluatorSet {
    default_policy: PolicyKind,
    full: ProfileCompletenessEvaluator,
    access_gate: ProfileCompletenessEvaluator,
}

impl EvaluatorSet {
    pub(crate) fn new(default_policy: PolicyKind) -> Self {
        Self {
            default_policy,
            full: ProfileCompletenessEvaluator::for_kind(PolicyKind::Full),
            access_gate: ProfileCompletenessEvaluator::for_kind(PolicyKind::AccessGate),
        }
    }

    pub(crate) fn from_config(config: &PortalConfig) -> Self {
        Self::new(config.default_policy)
    }

    pub(crate) fn resolve(&self, requested: Option<PolicyKind>) -> PolicyKind {
        requested.unwrap_or(self.default_policy)
    }

    pub(crate) fn profile(&self, kind: PolicyKind) -> &ProfileCompletenessEvaluator {
        match kind {
            PolicyKind::Full => &self.full,
            PolicyKind::AccessGate => &self.access_gate,
        }
    }
}

impl Default for EvaluatorSet {
    fn default() -> Self {
        Self::new(PolicyKind::default())
    }
}

pub(crate) fn read_json_file<T, P>(path: P) -> Result<T, AppError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
