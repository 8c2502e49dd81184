use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use server_api::{authorize, initiate_repayment, list_beneficiaries, login, logout, SessionClaims};
use shared::{
    domain::{BeneficiaryId, BeneficiaryRecord},
    error::{ApiError, ErrorCode},
    protocol::{
        LoginRequest, LoginResponse, BENEFICIARIES_ROUTE, HEALTHZ_ROUTE, LOGIN_ROUTE, LOGOUT_ROUTE,
    },
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::app_state::AppState;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub(crate) fn build_router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.max_body_bytes;
    Router::new()
        .route(HEALTHZ_ROUTE, get(healthz))
        .route(LOGIN_ROUTE, post(http_login))
        .route(LOGOUT_ROUTE, post(http_logout))
        .route(BENEFICIARIES_ROUTE, get(http_list_beneficiaries))
        .route(
            "/beneficiaries/:id/initiate-repayment",
            post(http_initiate_repayment),
        )
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        reject(ApiError::validation(format!(
            "malformed login request: {}",
            rejection.body_text()
        )))
    })?;
    let response = login(&state.api, &req.username, &req.password)
        .await
        .map_err(reject)?;
    Ok(Json(response))
}

async fn http_logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let claims = require_session(&state, &headers).await?;
    logout(&state.api, &claims).await;
    Ok(StatusCode::OK)
}

async fn http_list_beneficiaries(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<BeneficiaryRecord>>> {
    require_session(&state, &headers).await?;
    Ok(Json(list_beneficiaries(&state.api).await))
}

async fn http_initiate_repayment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<BeneficiaryRecord>> {
    let claims = require_session(&state, &headers).await?;
    let record = initiate_repayment(&state.api, &BeneficiaryId::new(id))
        .await
        .map_err(reject)?;
    tracing::debug!(username = %claims.sub, id = %record.id, "repayment requested over http");
    Ok(Json(record))
}

async fn require_session(state: &AppState, headers: &HeaderMap) -> ApiResult<SessionClaims> {
    authorize(&state.api, bearer_token(headers)).await.map_err(reject)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn reject(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
