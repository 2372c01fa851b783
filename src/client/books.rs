//! Book CRUD, search and count endpoints.

use std::sync::Arc;

use reqwest::Method;

use super::ApiClient;
use crate::error::AppResult;
use crate::models::{Book, BookFilter, Page, PageRequest};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct BookClient {
    api: ApiClient,
    session: Arc<SessionStore>,
}

impl BookClient {
    pub fn new(api: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// GET /books - one page of the full collection.
    pub async fn list(&self, page: &PageRequest) -> AppResult<Page<Book>> {
        let builder = self
            .api
            .request(Method::GET, "/books", self.token().as_deref())
            .query(&page.query_params());
        self.api.send_json(builder).await
    }

    /// GET /books/search - one page of the filtered collection. Unset
    /// filter fields are not part of the query string.
    pub async fn search(&self, page: &PageRequest, filter: &BookFilter) -> AppResult<Page<Book>> {
        let builder = self
            .api
            .request(Method::GET, "/books/search", self.token().as_deref())
            .query(&page.query_params())
            .query(&filter.query_params());
        self.api.send_json(builder).await
    }

    /// GET /books/{id}
    pub async fn get(&self, id: i64) -> AppResult<Book> {
        let builder = self.api.request(
            Method::GET,
            &format!("/books/{}", id),
            self.token().as_deref(),
        );
        self.api.send_json(builder).await
    }

    /// POST /books
    pub async fn create(&self, book: &Book) -> AppResult<Book> {
        let builder = self
            .api
            .request(Method::POST, "/books", self.token().as_deref())
            .json(book);
        self.api.send_json(builder).await
    }

    /// PUT /books/{id}
    pub async fn update(&self, id: i64, book: &Book) -> AppResult<Book> {
        let builder = self
            .api
            .request(
                Method::PUT,
                &format!("/books/{}", id),
                self.token().as_deref(),
            )
            .json(book);
        self.api.send_json(builder).await
    }

    /// DELETE /books/{id} - empty success body.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let builder = self.api.request(
            Method::DELETE,
            &format!("/books/{}", id),
            self.token().as_deref(),
        );
        self.api.send(builder).await?;
        Ok(())
    }

    /// GET /books/count - bare integer body.
    pub async fn count(&self) -> AppResult<i64> {
        let builder = self
            .api
            .request(Method::GET, "/books/count", self.token().as_deref());
        self.api.send_json(builder).await
    }
}
