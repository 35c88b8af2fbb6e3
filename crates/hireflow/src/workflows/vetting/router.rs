use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::Stage;
use super::domain::{CandidateId, RouteDecision, RouteTarget, StageConsistencyWarning};
use super::service::{AssessmentScorer, ServiceError, VettingFlowService};
use super::store::{ProfileBackend, StoreError};

/// Router builder exposing the stage machine's inbound contracts over HTTP.
pub fn vetting_router<B, S>(service: Arc<VettingFlowService<B, S>>) -> Router
where
    B: ProfileBackend + 'static,
    S: AssessmentScorer + 'static,
{
    Router::new()
        .route(
            "/api/v1/vetting/candidates/:candidate_id/next-route",
            get(next_route_handler::<B, S>),
        )
        .route(
            "/api/v1/vetting/candidates/:candidate_id/outcomes",
            post(record_outcome_handler::<B, S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct NextRouteQuery {
    #[serde(default)]
    pub(crate) role: Option<String>,
}

/// JSON shape handed to the UI for navigation.
#[derive(Debug, Serialize)]
pub(crate) struct RouteDecisionView {
    pub(crate) target: RouteTarget,
    pub(crate) route: &'static str,
    pub(crate) is_retry: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) consistency: Option<StageConsistencyWarning>,
}

impl From<RouteDecision> for RouteDecisionView {
    fn from(decision: RouteDecision) -> Self {
        Self {
            target: decision.target,
            route: decision.target.route_token().0,
            is_retry: decision.is_retry,
            consistency: decision.consistency,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OutcomeRequest {
    pub(crate) stage: Stage,
    pub(crate) passed: bool,
    #[serde(default)]
    pub(crate) scheduled: bool,
}

pub(crate) async fn next_route_handler<B, S>(
    State(service): State<Arc<VettingFlowService<B, S>>>,
    Path(candidate_id): Path<String>,
    Query(query): Query<NextRouteQuery>,
) -> Response
where
    B: ProfileBackend + 'static,
    S: AssessmentScorer + 'static,
{
    let candidate = CandidateId(candidate_id);
    match service.decide_next_route(&candidate, query.role.as_deref()) {
        Ok(decision) => {
            let view = RouteDecisionView::from(decision);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn record_outcome_handler<B, S>(
    State(service): State<Arc<VettingFlowService<B, S>>>,
    Path(candidate_id): Path<String>,
    axum::Json(request): axum::Json<OutcomeRequest>,
) -> Response
where
    B: ProfileBackend + 'static,
    S: AssessmentScorer + 'static,
{
    let candidate = CandidateId(candidate_id);
    match service.record_outcome(&candidate, request.stage, request.passed, request.scheduled) {
        Ok(record) => {
            let payload = json!({
                "candidate_id": candidate.0,
                "last_stage": record.last_stage,
                "last_status": record.last_status,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Store(StoreError::InvalidStatusForStage { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ServiceError::Store(StoreError::PersistenceWrite(_))
        | ServiceError::StageWriteFailed { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::Scorer(_) => StatusCode::BAD_GATEWAY,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
