//! Authentication endpoints: login and register.
//!
//! Stateless wrappers with no side effects beyond the network request;
//! session bookkeeping belongs to [`crate::session::SessionStore`].

use reqwest::Method;

use super::ApiClient;
use crate::error::AppResult;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a bearer token. Any non-success response
    /// propagates; a success body without usable roles yields an empty
    /// role set.
    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let builder = self
            .api
            .request(Method::POST, "/auth/login", None)
            .json(request);
        self.api.send_json(builder).await
    }

    /// Create an account. Does not log the caller in.
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<RegisterResponse> {
        let builder = self
            .api
            .request(Method::POST, "/auth/register", None)
            .json(request);
        self.api.send_json(builder).await
    }
}
