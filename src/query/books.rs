//! Book query service: filtered, paginated reads with a result cache,
//! validated writes with invalidate-on-mutation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::client::{BookClient, UserClient};
use crate::error::AppResult;
use crate::models::{Book, BookFilter, Page, PageRequest, UserSummary};

/// Identity of one collection read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QueryKey {
    page: i64,
    size: i64,
    sort: String,
    filter: BookFilter,
}

impl QueryKey {
    fn new(request: &PageRequest, filter: &BookFilter) -> Self {
        Self {
            page: request.page,
            size: request.size,
            sort: request.sort.to_string(),
            filter: filter.clone(),
        }
    }
}

pub struct BookQueryService {
    books: BookClient,
    users: UserClient,
    cache: Mutex<HashMap<QueryKey, Page<Book>>>,
    /// Bumped on every mutation. A fetch only stores its result when the
    /// generation it started under is still current, so a stale in-flight
    /// read can never repopulate the cache after an invalidation.
    generation: AtomicU64,
}

impl BookQueryService {
    pub fn new(books: BookClient, users: UserClient) -> Self {
        Self {
            books,
            users,
            cache: Mutex::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// One page of the full collection.
    pub async fn list(&self, request: &PageRequest) -> AppResult<Page<Book>> {
        self.fetch(request, BookFilter::default()).await
    }

    /// One page of the filtered collection. An entirely empty filter
    /// issues the same request as [`list`](Self::list).
    pub async fn search(&self, request: &PageRequest, filter: &BookFilter) -> AppResult<Page<Book>> {
        self.fetch(request, filter.normalized()).await
    }

    async fn fetch(&self, request: &PageRequest, filter: BookFilter) -> AppResult<Page<Book>> {
        let key = QueryKey::new(request, &filter);
        if let Some(page) = self.lock_cache().get(&key).cloned() {
            tracing::debug!(page = key.page, size = key.size, "collection cache hit");
            return Ok(page);
        }

        let started_at = self.generation.load(Ordering::SeqCst);
        let page = if filter.is_empty() {
            self.books.list(request).await?
        } else {
            self.books.search(request, &filter).await?
        };

        let mut cache = self.lock_cache();
        if self.generation.load(Ordering::SeqCst) == started_at {
            cache.insert(key, page.clone());
        } else {
            tracing::debug!("dropping fetch result superseded by a mutation");
        }
        Ok(page)
    }

    /// Single record; NotFound propagates so callers can redirect away.
    pub async fn get(&self, id: i64) -> AppResult<Book> {
        self.books.get(id).await
    }

    /// Validate, submit, and invalidate on server confirmation. No
    /// optimistic update.
    pub async fn create(&self, book: &Book) -> AppResult<Book> {
        book.validate_for_submit()?;
        let created = self.books.create(book).await?;
        self.invalidate();
        Ok(created)
    }

    pub async fn update(&self, id: i64, book: &Book) -> AppResult<Book> {
        book.validate_for_submit()?;
        let updated = self.books.update(id, book).await?;
        self.invalidate();
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.books.delete(id).await?;
        self.invalidate();
        Ok(())
    }

    /// Uncached scalar fetch.
    pub async fn count_books(&self) -> AppResult<i64> {
        self.books.count().await
    }

    /// Uncached scalar fetch.
    pub async fn count_users(&self) -> AppResult<i64> {
        self.users.count().await
    }

    /// Uncached passthrough to the user directory.
    pub async fn list_users(&self) -> AppResult<Vec<UserSummary>> {
        self.users.list().await
    }

    /// Discard every cached collection result.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.lock_cache().clear();
        tracing::debug!("collection cache invalidated");
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<QueryKey, Page<Book>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
