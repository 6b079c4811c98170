use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::models::enrolment::{
    CreateEnrolmentRequest, EnrolmentByUserQuery, EnrolmentListResponse, EnrolmentResponse,
    SetPaidRequest,
};
use crate::AppState;

/// All enrolment routes, nested under `/api/enrolments`.
pub fn api_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", post(create_enrolment))
        .route("/paid", patch(set_paid))
        .route("/expired", patch(expired_courses))
        .route("/active", get(get_active))
        .route("/health", get(health))
        .route("/{enrolment_id}", get(get_by_id).delete(delete_by_id))
        .route("/{enrolment_id}/details", get(get_by_id_and_user))
        .with_state(state);

    Router::new().nest("/api/enrolments", routes)
}

pub async fn create_enrolment(
    State(state): State<AppState>,
    Json(payload): Json<CreateEnrolmentRequest>,
) -> ApiResult<(StatusCode, Json<EnrolmentResponse>)> {
    if payload.user_id.is_empty() {
        return Err(ApiError::Validation("user_id must not be empty".to_string()));
    }

    let enrolment = state
        .enrolments
        .create_enrolment_for_user(&payload.user_id, payload.course_id)
        .await?;

    Ok((StatusCode::CREATED, Json(enrolment.into())))
}

pub async fn set_paid(
    State(state): State<AppState>,
    Json(payload): Json<SetPaidRequest>,
) -> ApiResult<Json<EnrolmentResponse>> {
    let enrolment = state.enrolments.set_paid(payload.enrolment_id).await?;
    Ok(Json(enrolment.into()))
}

pub async fn expired_courses(
    State(state): State<AppState>,
) -> ApiResult<Json<EnrolmentListResponse>> {
    let enrolments = state.enrolments.expired_courses().await?;
    Ok(Json(enrolments.into()))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(enrolment_id): Path<i32>,
) -> ApiResult<Json<EnrolmentResponse>> {
    let enrolment = state.enrolments.get_by_id(enrolment_id).await?;
    Ok(Json(enrolment.into()))
}

pub async fn get_by_id_and_user(
    State(state): State<AppState>,
    Path(enrolment_id): Path<i32>,
    Query(query): Query<EnrolmentByUserQuery>,
) -> ApiResult<Json<EnrolmentResponse>> {
    let user_id = query.user_id.filter(|id| !id.is_empty()).ok_or_else(|| {
        ApiError::Validation("Missing required query parameter 'user_id'".to_string())
    })?;

    let enrolment = state
        .enrolments
        .get_by_id_and_user(enrolment_id, &user_id)
        .await?;

    Ok(Json(enrolment.into()))
}

pub async fn get_active(
    State(state): State<AppState>,
) -> ApiResult<Json<EnrolmentListResponse>> {
    let enrolments = state.enrolments.get_active().await?;
    Ok(Json(enrolments.into()))
}

pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(enrolment_id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.enrolments.delete_by_id(enrolment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database_ok = state.db.ping().await.is_ok();

    let status_code = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = json!({
        "status": if database_ok { "ok" } else { "error" },
        "database": if database_ok { "ok" } else { "down" },
        "enrolment_service": "ok",
    });

    (status_code, Json(body))
}
