use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use server_api::{ApiContext, SessionConfig};
use shared::{error::ErrorCode, protocol::LoginRequest};
use storage::Storage;
use tokio::net::TcpListener;

use super::*;

type Rejection = (StatusCode, Json<ApiError>);

fn reject(err: ApiError) -> Rejection {
    let status = match err.code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

async fn session(
    ctx: &ApiContext,
    headers: &HeaderMap,
) -> Result<server_api::SessionClaims, Rejection> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    server_api::authorize(ctx, bearer).await.map_err(reject)
}

async fn login(
    State(ctx): State<Arc<ApiContext>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Rejection> {
    server_api::login(&ctx, &req.username, &req.password)
        .await
        .map(Json)
        .map_err(reject)
}

async fn logout(
    State(ctx): State<Arc<ApiContext>>,
    headers: HeaderMap,
) -> Result<StatusCode, Rejection> {
    let claims = session(&ctx, &headers).await?;
    server_api::logout(&ctx, &claims).await;
    Ok(StatusCode::OK)
}

async fn list(
    State(ctx): State<Arc<ApiContext>>,
    headers: HeaderMap,
) -> Result<Json<Vec<BeneficiaryRecord>>, Rejection> {
    session(&ctx, &headers).await?;
    Ok(Json(server_api::list_beneficiaries(&ctx).await))
}

async fn initiate(
    State(ctx): State<Arc<ApiContext>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<BeneficiaryRecord>, Rejection> {
    session(&ctx, &headers).await?;
    server_api::initiate_repayment(&ctx, &BeneficiaryId::new(id))
        .await
        .map(Json)
        .map_err(reject)
}

fn router(storage: Storage) -> Router {
    let ctx = Arc::new(ApiContext::new(
        storage,
        SessionConfig {
            secret: "transport-test-secret".into(),
            ttl_seconds: 600,
        },
    ));
    Router::new()
        .route(LOGIN_ROUTE, post(login))
        .route(LOGOUT_ROUTE, post(logout))
        .route(BENEFICIARIES_ROUTE, get(list))
        .route("/beneficiaries/:id/initiate-repayment", post(initiate))
        .with_state(ctx)
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}/")
}

async fn spawn_server(storage: Storage) -> String {
    serve(router(storage)).await
}

async fn signed_in(storage: Storage) -> HttpBackend {
    let backend = HttpBackend::new(&spawn_server(storage).await).expect("backend");
    backend.login("admin", "secret").await.expect("login");
    backend
}

#[tokio::test]
async fn login_then_load_returns_full_directory() {
    let storage = Storage::seeded();
    let backend = signed_in(storage.clone()).await;

    assert!(backend.has_token().await);
    let records = backend.load_all().await.expect("load");
    assert_eq!(records, storage.load_all().await);
}

#[tokio::test]
async fn blank_password_is_invalid_credentials() {
    let backend = HttpBackend::new(&spawn_server(Storage::seeded()).await).expect("backend");

    let err = backend.login("admin", " ").await.expect_err("blank password");

    assert_eq!(err, ClientError::InvalidCredentials);
    assert!(!backend.has_token().await);
}

#[tokio::test]
async fn requests_without_a_token_are_unauthorized() {
    let backend = HttpBackend::new(&spawn_server(Storage::seeded()).await).expect("backend");

    assert_eq!(backend.load_all().await, Err(ClientError::Unauthorized));
    assert_eq!(
        backend
            .set_status(&BeneficiaryId::new("2"), Category::Eligible)
            .await,
        Err(ClientError::Unauthorized)
    );
}

#[tokio::test]
async fn make_eligible_updates_server_directory() {
    let storage = Storage::seeded();
    let backend = signed_in(storage.clone()).await;
    let id = BeneficiaryId::new("2");

    let updated = backend
        .set_status(&id, Category::Eligible)
        .await
        .expect("set status");

    assert_eq!(updated.category(), Category::Eligible);
    let stored = storage.get(&id).await.expect("stored record");
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn unknown_beneficiary_is_not_found() {
    let backend = signed_in(Storage::seeded()).await;
    let id = BeneficiaryId::new("does-not-exist");

    let err = backend
        .set_status(&id, Category::Eligible)
        .await
        .expect_err("unknown id");

    assert_eq!(err, ClientError::NotFound(id));
}

#[tokio::test]
async fn moving_back_to_granted_is_unsupported_over_http() {
    let backend = signed_in(Storage::seeded()).await;

    let err = backend
        .set_status(&BeneficiaryId::new("1"), Category::Granted)
        .await
        .expect_err("unsupported");

    assert!(matches!(err, ClientError::Unsupported(_)));
}

#[tokio::test]
async fn logout_drops_the_token() {
    let backend = signed_in(Storage::seeded()).await;

    backend.logout().await.expect("logout");

    assert!(!backend.has_token().await);
    assert_eq!(backend.load_all().await, Err(ClientError::Unauthorized));
    backend.logout().await.expect("second logout is a no-op");
}

#[test]
fn malformed_server_url_is_rejected() {
    let err = HttpBackend::new("not a url").err().expect("invalid url");
    assert!(matches!(err, ClientError::Transport(_)));
}

#[test]
fn endpoints_resolve_under_server_path_prefix() {
    for server_url in ["http://example.org/api", "http://example.org/api/"] {
        let backend = HttpBackend::new(server_url).expect("backend");
        assert_eq!(
            backend.endpoint(LOGIN_ROUTE).expect("login").as_str(),
            "http://example.org/api/auth/login"
        );
        assert_eq!(
            backend
                .endpoint(&initiate_repayment_route(&BeneficiaryId::new("7")))
                .expect("repayment")
                .as_str(),
            "http://example.org/api/beneficiaries/7/initiate-repayment"
        );
    }

    let bare = HttpBackend::new("http://example.org").expect("backend");
    assert_eq!(
        bare.endpoint(BENEFICIARIES_ROUTE).expect("list").as_str(),
        "http://example.org/beneficiaries"
    );
}

#[tokio::test]
async fn server_mounted_under_a_prefix_is_reachable() {
    let storage = Storage::seeded();
    let base = serve(Router::new().nest("/api", router(storage.clone()))).await;
    let backend = HttpBackend::new(&format!("{base}api")).expect("backend");

    backend.login("admin", "secret").await.expect("login");
    let records = backend.load_all().await.expect("load");

    assert_eq!(records, storage.load_all().await);
}
