//! Folio - Book Catalog Administration Client
//!
//! A terminal front end for a book-catalog REST service: authenticates
//! users, lists and searches the paginated catalog, and lets
//! administrators manage books and view registered users. All state lives
//! client-side; the backend is an external collaborator reached over REST.

use std::sync::Arc;

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod session;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use client::{ApiClient, AuthClient, BookClient, UserClient};
use query::BookQueryService;
use session::{RouteGuard, SessionStorage, SessionStore};

/// Application context shared across all commands.
///
/// Owns the single session store instance for the life of the process.
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub session: Arc<SessionStore>,
    pub guard: RouteGuard,
    pub books: BookQueryService,
}

impl AppContext {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let config = Arc::new(config);
        let api = ApiClient::new(&config.api.base_url)?;
        let storage = SessionStorage::new(&config.storage.dir);
        let session = Arc::new(SessionStore::new(AuthClient::new(api.clone()), storage));
        let guard = RouteGuard::new(session.clone());
        let books = BookQueryService::new(
            BookClient::new(api.clone(), session.clone()),
            UserClient::new(api, session.clone()),
        );
        Ok(Self {
            config,
            session,
            guard,
            books,
        })
    }
}
