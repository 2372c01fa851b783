//! REST client plumbing for the book-catalog API.
//!
//! `ApiClient` owns the connection pool, the base URL and the translation
//! of non-success responses into [`AppError`]; the per-resource wrappers
//! (`auth`, `books`, `users`) stay stateless on top of it.

pub mod auth;
pub mod books;
pub mod users;

pub use auth::AuthClient;
pub use books::BookClient;
pub use users::UserClient;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request against an API path, attaching the bearer token
    /// when one is supplied.
    pub fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, authenticated = token.is_some(), "api request");
        let mut builder = self.http.request(method, url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request and map any non-success status into the error
    /// taxonomy, surfacing the backend's own message when the body
    /// carries one.
    pub async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = extract_error_message(response).await.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        Err(AppError::from_status(status.as_u16(), message))
    }

    /// Send a request and decode its success body as JSON.
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Transport(format!("invalid response body: {}", e)))
    }
}

/// Backend errors arrive as `{"error": "..."}`; some endpoints use
/// `{"message": "..."}`.
async fn extract_error_message(response: Response) -> Option<String> {
    let body: serde_json::Value = response.json().await.ok()?;
    body.get("error")
        .or_else(|| body.get("message"))
        .and_then(|v| v.as_str())
        .map(str::to_owned)
}
