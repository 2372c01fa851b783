//! User directory endpoints: count and listing.

use std::sync::Arc;

use reqwest::Method;

use super::ApiClient;
use crate::error::AppResult;
use crate::models::UserSummary;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct UserClient {
    api: ApiClient,
    session: Arc<SessionStore>,
}

impl UserClient {
    pub fn new(api: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// GET /users/count - bare integer body.
    pub async fn count(&self) -> AppResult<i64> {
        let builder = self.api.request(
            Method::GET,
            "/users/count",
            self.session.token().as_deref(),
        );
        self.api.send_json(builder).await
    }

    /// GET /users
    pub async fn list(&self) -> AppResult<Vec<UserSummary>> {
        let builder = self
            .api
            .request(Method::GET, "/users", self.session.token().as_deref());
        self.api.send_json(builder).await
    }
}
