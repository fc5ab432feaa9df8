use crate::infra::{deserialize_optional_date, AppState, EvaluatorSet};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use campus_portal::workflows::outpass::{
    gate_check, pending_for, GateCheck, OutpassRecord, OutpassReport, OutpassSummary,
    OutpassView, QueueOrder, ReviewerRole, RoleLoadEntry, StatusFilter,
};
use campus_portal::workflows::profile::{PolicyKind, ProfileCompleteness, StudentProfile};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct CompletenessRequest {
    #[serde(default)]
    pub(crate) profile: Option<StudentProfile>,
    #[serde(default)]
    pub(crate) policy: Option<PolicyKind>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CompletenessResponse {
    pub(crate) policy: PolicyKind,
    pub(crate) policy_label: &'static str,
    #[serde(flatten)]
    pub(crate) completeness: ProfileCompleteness,
    pub(crate) missing_labels: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryRequest {
    #[serde(default)]
    pub(crate) records: Vec<OutpassRecord>,
    #[serde(default)]
    pub(crate) filter: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SummaryResponse {
    pub(crate) summary: OutpassSummary,
    pub(crate) role_load: Vec<RoleLoadEntry>,
    pub(crate) filter: StatusFilter,
    pub(crate) records: Vec<OutpassView>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueueRequest {
    pub(crate) role: ReviewerRole,
    #[serde(default)]
    pub(crate) records: Vec<OutpassRecord>,
    #[serde(default)]
    pub(crate) order: QueueOrder,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueueResponse {
    pub(crate) role: ReviewerRole,
    pub(crate) role_label: &'static str,
    pub(crate) order: QueueOrder,
    pub(crate) records: Vec<OutpassView>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GateRequest {
    pub(crate) record: OutpassRecord,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GateResponse {
    pub(crate) today: NaiveDate,
    pub(crate) check: GateCheck,
    pub(crate) label: &'static str,
}

/// Evaluator endpoints plus health, readiness and metrics.
pub(crate) fn portal_router(evaluators: Arc<EvaluatorSet>) -> Router {
    Router::new()
        .route(
            "/api/v1/profile/completeness",
            post(profile_completeness_endpoint),
        )
        .route("/api/v1/outpass/timeline", post(outpass_timeline_endpoint))
        .route("/api/v1/outpass/summary", post(outpass_summary_endpoint))
        .route("/api/v1/outpass/queue", post(outpass_queue_endpoint))
        .route("/api/v1/outpass/gate", post(outpass_gate_endpoint))
        .with_state(evaluators)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn profile_completeness_endpoint(
    State(evaluators): State<Arc<EvaluatorSet>>,
    Json(payload): Json<CompletenessRequest>,
) -> Json<CompletenessResponse> {
    let CompletenessRequest { profile, policy } = payload;
    let policy = evaluators.resolve(policy);
    let completeness = evaluators.profile(policy).evaluate(profile.as_ref());

    debug!(
        policy = policy.label(),
        percentage = completeness.percentage,
        complete = completeness.is_complete,
        "profile completeness evaluated"
    );

    Json(CompletenessResponse {
        policy,
        policy_label: policy.label(),
        missing_labels: completeness.missing_labels(),
        completeness,
    })
}

pub(crate) async fn outpass_timeline_endpoint(
    Json(record): Json<OutpassRecord>,
) -> Json<OutpassView> {
    Json(record.to_view())
}

pub(crate) async fn outpass_summary_endpoint(
    Json(payload): Json<SummaryRequest>,
) -> Json<SummaryResponse> {
    let SummaryRequest { records, filter } = payload;
    let filter = filter
        .as_deref()
        .map(StatusFilter::parse)
        .unwrap_or_default();

    let report = OutpassReport::build(&records);
    let views = filter
        .apply(&records)
        .into_iter()
        .map(OutpassRecord::to_view)
        .collect();

    Json(SummaryResponse {
        summary: report.summary,
        role_load: report.role_load,
        filter,
        records: views,
    })
}

pub(crate) async fn outpass_queue_endpoint(
    Json(payload): Json<QueueRequest>,
) -> Json<QueueResponse> {
    let QueueRequest {
        role,
        records,
        order,
    } = payload;

    let queue: Vec<OutpassView> = pending_for(role, &records, order)
        .into_iter()
        .map(OutpassRecord::to_view)
        .collect();

    debug!(role = role.label(), pending = queue.len(), "review queue built");

    Json(QueueResponse {
        role,
        role_label: role.label(),
        order,
        records: queue,
    })
}

pub(crate) async fn outpass_gate_endpoint(Json(payload): Json<GateRequest>) -> Json<GateResponse> {
    let GateRequest { record, today } = payload;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let check = gate_check(&record, today);

    Json(GateResponse {
        today,
        check,
        label: check.label(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn listing() -> Value {
        json!([
            {
                "_id": "op-1",
                "outpassType": "Outing",
                "studentResidenceType": "hostel",
                "staff": { "status": "approved" },
                "yearIncharge": { "status": "pending" },
                "warden": { "status": "pending" }
            },
            {
                "_id": "op-2",
                "outpassType": "Emergency",
                "studentResidenceType": "hostel",
                "staff": { "status": "approved" },
                "yearIncharge": { "status": "pending" },
                "warden": { "status": "pending" }
            },
            {
                "_id": "op-3",
                "outpassType": "OD",
                "studentResidenceType": "dayscholar",
                "staff": { "status": "approved" },
                "yearIncharge": { "status": "approved" }
            }
        ])
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&bytes).expect("json payload"))
    }

    fn router() -> Router {
        portal_router(Arc::new(EvaluatorSet::default()))
    }

    #[tokio::test]
    async fn completeness_endpoint_handles_missing_profile() {
        let Json(body) = profile_completeness_endpoint(
            State(Arc::new(EvaluatorSet::new(PolicyKind::AccessGate))),
            Json(CompletenessRequest {
                profile: None,
                policy: None,
            }),
        )
        .await;

        assert_eq!(body.policy, PolicyKind::AccessGate);
        assert!(!body.completeness.is_complete);
        assert_eq!(body.completeness.percentage, 0);
    }

    #[tokio::test]
    async fn completeness_route_reports_missing_fields() {
        let (status, body) = post_json(
            router(),
            "/api/v1/profile/completeness",
            json!({
                "policy": "Access-Gate",
                "profile": {
                    "name": "Arun K",
                    "registerNumber": "721221104007",
                    "department": "MECH",
                    "year": "IV",
                    "phone": "9000000001",
                    "email": "arun@college.edu",
                    "parentnumber": "9000000002",
                    "residencetype": "hostel",
                    "photo": "",
                    "hostelname": "Kaveri",
                    "hostelroomno": "A-12"
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["policy"], "access_gate");
        assert_eq!(body["isComplete"], false);
        assert_eq!(body["percentage"], 91);
        assert_eq!(body["missing"], json!(["photo"]));
        assert_eq!(body["missingLabels"], json!(["Photo"]));
    }

    #[tokio::test]
    async fn summary_route_filters_on_derived_status() {
        let (status, body) = post_json(
            router(),
            "/api/v1/outpass/summary",
            json!({ "records": listing(), "filter": "approved" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["total"], 3);
        assert_eq!(body["summary"]["approved"], 1);
        assert_eq!(body["summary"]["pending"], 2);
        assert_eq!(body["filter"], "approved");
        assert_eq!(body["records"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["records"][0]["id"], "op-3");
    }

    #[tokio::test]
    async fn queue_route_puts_emergencies_first() {
        let (status, body) = post_json(
            router(),
            "/api/v1/outpass/queue",
            json!({ "role": "year_incharge", "records": listing() }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["roleLabel"], "Year Incharge");
        assert_eq!(body["records"][0]["id"], "op-2");
        assert_eq!(body["records"][1]["id"], "op-1");
    }

    #[tokio::test]
    async fn timeline_route_returns_stage_states() {
        let record = listing()[0].clone();
        let (status, body) = post_json(router(), "/api/v1/outpass/timeline", record).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["overallStatus"], "pending");
        let states: Vec<&str> = body["timeline"]
            .as_array()
            .expect("timeline array")
            .iter()
            .filter_map(|entry| entry["state"].as_str())
            .collect();
        assert_eq!(states, vec!["completed", "completed", "active", "inactive"]);
    }

    #[tokio::test]
    async fn gate_route_uses_supplied_date() {
        let (status, body) = post_json(
            router(),
            "/api/v1/outpass/gate",
            json!({
                "today": "2025-11-12",
                "record": {
                    "fromDate": "2025-11-08",
                    "toDate": "2025-11-10",
                    "studentResidenceType": "Day Scholar",
                    "staff": { "status": "approved" }
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["today"], "2025-11-12");
        assert_eq!(body["check"]["result"], "outside_window");
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }
}
