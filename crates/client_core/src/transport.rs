//! HTTP backend speaking the server's JSON surface.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use shared::{
    domain::{BeneficiaryId, BeneficiaryRecord, Category},
    error::ApiError,
    protocol::{
        initiate_repayment_route, LoginRequest, LoginResponse, BENEFICIARIES_ROUTE, LOGIN_ROUTE,
        LOGOUT_ROUTE,
    },
};
use tokio::sync::RwLock;
use tracing::{info, warn};
use url::Url;

use crate::{
    error::ClientError,
    ports::{AuthPort, DirectoryPort},
};

pub struct HttpBackend {
    http: Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl HttpBackend {
    /// `server_url` may carry a path prefix (`https://host/api`); routes resolve under it.
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(server_url).map_err(|e| {
            ClientError::Transport(format!("invalid server url '{server_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Transport(format!(
                "server url '{server_url}' cannot hold request paths"
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http: Client::new(),
            base_url,
            token: RwLock::new(None),
        })
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Transport(format!("invalid endpoint '{path}': {e}")))
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.token.read().await;
        let token = token.as_deref().ok_or(ClientError::Unauthorized)?;
        Ok(request.bearer_auth(token))
    }
}

async fn api_error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ApiError>().await {
        Ok(err) => err.message,
        Err(_) => format!("server responded with {status}"),
    }
}

fn transport(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}

#[async_trait]
impl AuthPort for HttpBackend {
    async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.endpoint(LOGIN_ROUTE)?)
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(ClientError::InvalidCredentials),
            status if status.is_success() => {
                let body: LoginResponse = response.json().await.map_err(transport)?;
                info!(expires_at = %body.expires_at, "session token received");
                *self.token.write().await = Some(body.token);
                Ok(())
            }
            _ => Err(ClientError::Transport(api_error_message(response).await)),
        }
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let Some(token) = self.token.write().await.take() else {
            return Ok(());
        };
        let response = self
            .http
            .post(self.endpoint(LOGOUT_ROUTE)?)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => {
                warn!("server had already closed the session");
                Ok(())
            }
            _ => Err(ClientError::Transport(api_error_message(response).await)),
        }
    }
}

#[async_trait]
impl DirectoryPort for HttpBackend {
    async fn load_all(&self) -> Result<Vec<BeneficiaryRecord>, ClientError> {
        let request = self
            .authorized(self.http.get(self.endpoint(BENEFICIARIES_ROUTE)?))
            .await?;
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Load(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            status if status.is_success() => response
                .json()
                .await
                .map_err(|e| ClientError::Load(e.to_string())),
            _ => Err(ClientError::Load(api_error_message(response).await)),
        }
    }

    async fn set_status(
        &self,
        id: &BeneficiaryId,
        status: Category,
    ) -> Result<BeneficiaryRecord, ClientError> {
        if status != Category::Eligible {
            return Err(ClientError::Unsupported(format!(
                "moving a beneficiary back to {status}"
            )));
        }
        let request = self
            .authorized(self.http.post(self.endpoint(&initiate_repayment_route(id))?))
            .await?;
        let response = request.send().await.map_err(transport)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(id.clone())),
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            status if status.is_success() => response.json().await.map_err(transport),
            _ => Err(ClientError::Transport(api_error_message(response).await)),
        }
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
