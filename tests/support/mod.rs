//! In-process stub of the book-catalog REST API.
//!
//! Implements the same routes, shapes and status codes the real backend
//! exposes, over an in-memory book list, so the integration tests can
//! drive the real clients end to end. Request counters and captured
//! query strings let tests assert on the wire behavior.

// Each test binary compiles its own copy; not all of them use every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use folio::config::{ApiConfig, AppConfig, LoggingConfig, StorageConfig};
use folio::AppContext;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StubBook {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publication_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

struct StubUser {
    username: String,
    password: String,
    roles: Vec<String>,
}

struct Inner {
    books: Vec<StubBook>,
    next_id: i64,
    users: Vec<StubUser>,
}

#[derive(Clone)]
pub struct StubState {
    inner: Arc<Mutex<Inner>>,
    pub list_hits: Arc<AtomicU64>,
    pub search_hits: Arc<AtomicU64>,
    pub write_hits: Arc<AtomicU64>,
    pub list_queries: Arc<Mutex<Vec<String>>>,
    pub search_queries: Arc<Mutex<Vec<String>>>,
}

pub struct StubServer {
    pub addr: SocketAddr,
    pub state: StubState,
}

impl StubServer {
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn seed_book(&self, title: &str, author: &str, isbn: &str, year: i32) -> i64 {
        let mut inner = self.state.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.books.push(StubBook {
            id,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            publication_year: year,
            book_link: None,
            created_by: Some("seed".to_string()),
        });
        id
    }
}

/// Bind an ephemeral port and serve the stub.
pub async fn spawn() -> StubServer {
    let state = StubState {
        inner: Arc::new(Mutex::new(Inner {
            books: Vec::new(),
            next_id: 1,
            users: vec![
                StubUser {
                    username: "alice".to_string(),
                    password: "secret1".to_string(),
                    roles: vec!["ADMIN".to_string()],
                },
                StubUser {
                    username: "bob".to_string(),
                    password: "secret2".to_string(),
                    roles: vec!["USER".to_string()],
                },
            ],
        })),
        list_hits: Arc::new(AtomicU64::new(0)),
        search_hits: Arc::new(AtomicU64::new(0)),
        write_hits: Arc::new(AtomicU64::new(0)),
        list_queries: Arc::new(Mutex::new(Vec::new())),
        search_queries: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/auth/register", axum::routing::post(register))
        .route("/api/books", get(list_books).post(create_book))
        .route("/api/books/search", get(search_books))
        .route("/api/books/count", get(count_books))
        .route(
            "/api/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/users", get(list_users))
        .route("/api/users/count", get(count_users))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer { addr, state }
}

/// Application context wired to the stub, with session state in `dir`.
pub fn test_context(base_url: &str, dir: &std::path::Path) -> AppContext {
    let config = AppConfig {
        api: ApiConfig {
            base_url: base_url.to_string(),
        },
        storage: StorageConfig {
            dir: dir.display().to_string(),
        },
        logging: LoggingConfig::default(),
    };
    AppContext::new(config).unwrap()
}

fn token_for(username: &str) -> String {
    format!("tok-{}", username)
}

fn error_body(message: &str) -> Json<Value> {
    Json(json!({ "error": message }))
}

fn authenticated(state: &StubState, headers: &HeaderMap) -> Option<(String, Vec<String>)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    let inner = state.inner.lock().unwrap();
    inner
        .users
        .iter()
        .find(|u| token_for(&u.username) == token)
        .map(|u| (u.username.clone(), u.roles.clone()))
}

fn is_admin(roles: &[String]) -> bool {
    roles.iter().any(|r| r == "ADMIN")
}

async fn login(
    State(state): State<StubState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let inner = state.inner.lock().unwrap();
    match inner
        .users
        .iter()
        .find(|u| u.username == username && u.password == password)
    {
        Some(user) => (
            StatusCode::OK,
            Json(json!({
                "token": token_for(&user.username),
                "username": user.username,
                "roles": user.roles,
            })),
        ),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid username or password" })),
        ),
    }
}

async fn register(
    State(state): State<StubState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let username = body["username"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    let admin = body["isAdmin"].as_bool().unwrap_or(false);
    let mut inner = state.inner.lock().unwrap();
    if inner.users.iter().any(|u| u.username == username) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Username already exists" })),
        );
    }
    let mut roles = vec!["USER".to_string()];
    if admin {
        roles.insert(0, "ADMIN".to_string());
    }
    inner.users.push(StubUser {
        username: username.clone(),
        password,
        roles: roles.clone(),
    });
    (
        StatusCode::OK,
        Json(json!({
            "message": "User registered successfully",
            "username": username,
            "roles": roles,
        })),
    )
}

fn page_of(books: Vec<StubBook>, params: &HashMap<String, String>) -> Value {
    let page: i64 = params.get("page").and_then(|v| v.parse().ok()).unwrap_or(0);
    let size: i64 = params.get("size").and_then(|v| v.parse().ok()).unwrap_or(10);
    let sort = params.get("sort").cloned().unwrap_or_default();
    let mut books = books;
    books.sort_by_key(|b| b.id);
    if sort.ends_with(",desc") {
        books.reverse();
    }

    let total = books.len() as i64;
    let total_pages = if size > 0 { (total + size - 1) / size } else { 0 };
    let start = (page * size).max(0) as usize;
    let content: Vec<StubBook> = books.into_iter().skip(start).take(size as usize).collect();

    json!({
        "content": content,
        "totalElements": total,
        "totalPages": total_pages,
        "size": size,
        "number": page,
    })
}

async fn list_books(
    State(state): State<StubState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if authenticated(&state, &headers).is_none() {
        return (StatusCode::UNAUTHORIZED, error_body("Missing or invalid token"));
    }
    state.list_hits.fetch_add(1, Ordering::SeqCst);
    state
        .list_queries
        .lock()
        .unwrap()
        .push(raw.unwrap_or_default());
    let books = state.inner.lock().unwrap().books.clone();
    (StatusCode::OK, Json(page_of(books, &params)))
}

async fn search_books(
    State(state): State<StubState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if authenticated(&state, &headers).is_none() {
        return (StatusCode::UNAUTHORIZED, error_body("Missing or invalid token"));
    }
    state.search_hits.fetch_add(1, Ordering::SeqCst);
    state
        .search_queries
        .lock()
        .unwrap()
        .push(raw.unwrap_or_default());

    let contains = |haystack: &str, needle: &str| {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    };
    let books: Vec<StubBook> = state
        .inner
        .lock()
        .unwrap()
        .books
        .iter()
        .filter(|b| {
            params.get("title").map_or(true, |t| contains(&b.title, t))
                && params.get("author").map_or(true, |a| contains(&b.author, a))
                && params.get("isbn").map_or(true, |i| contains(&b.isbn, i))
                && params
                    .get("year")
                    .and_then(|y| y.parse::<i32>().ok())
                    .map_or(true, |y| b.publication_year == y)
        })
        .cloned()
        .collect();
    (StatusCode::OK, Json(page_of(books, &params)))
}

async fn count_books(State(state): State<StubState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if authenticated(&state, &headers).is_none() {
        return (StatusCode::UNAUTHORIZED, error_body("Missing or invalid token"));
    }
    let count = state.inner.lock().unwrap().books.len();
    (StatusCode::OK, Json(json!(count)))
}

async fn get_book(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    if authenticated(&state, &headers).is_none() {
        return (StatusCode::UNAUTHORIZED, error_body("Missing or invalid token"));
    }
    let inner = state.inner.lock().unwrap();
    match inner.books.iter().find(|b| b.id == id) {
        Some(book) => (StatusCode::OK, Json(serde_json::to_value(book).unwrap())),
        None => (StatusCode::NOT_FOUND, error_body("Book not found")),
    }
}

async fn create_book(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some((username, roles)) = authenticated(&state, &headers) else {
        return (StatusCode::UNAUTHORIZED, error_body("Missing or invalid token"));
    };
    if !is_admin(&roles) {
        return (StatusCode::FORBIDDEN, error_body("Admin role required"));
    }
    state.write_hits.fetch_add(1, Ordering::SeqCst);
    let mut inner = state.inner.lock().unwrap();
    let id = inner.next_id;
    inner.next_id += 1;
    let book = StubBook {
        id,
        title: body["title"].as_str().unwrap_or_default().to_string(),
        author: body["author"].as_str().unwrap_or_default().to_string(),
        isbn: body["isbn"].as_str().unwrap_or_default().to_string(),
        publication_year: body["publicationYear"].as_i64().unwrap_or_default() as i32,
        book_link: body["bookLink"].as_str().map(str::to_owned),
        created_by: Some(username),
    };
    inner.books.push(book.clone());
    (StatusCode::OK, Json(serde_json::to_value(book).unwrap()))
}

async fn update_book(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some((_, roles)) = authenticated(&state, &headers) else {
        return (StatusCode::UNAUTHORIZED, error_body("Missing or invalid token"));
    };
    if !is_admin(&roles) {
        return (StatusCode::FORBIDDEN, error_body("Admin role required"));
    }
    state.write_hits.fetch_add(1, Ordering::SeqCst);
    let mut inner = state.inner.lock().unwrap();
    match inner.books.iter_mut().find(|b| b.id == id) {
        Some(book) => {
            book.title = body["title"].as_str().unwrap_or_default().to_string();
            book.author = body["author"].as_str().unwrap_or_default().to_string();
            book.isbn = body["isbn"].as_str().unwrap_or_default().to_string();
            book.publication_year = body["publicationYear"].as_i64().unwrap_or_default() as i32;
            book.book_link = body["bookLink"].as_str().map(str::to_owned);
            (StatusCode::OK, Json(serde_json::to_value(&*book).unwrap()))
        }
        None => (StatusCode::NOT_FOUND, error_body("Book not found")),
    }
}

async fn delete_book(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    let Some((_, roles)) = authenticated(&state, &headers) else {
        return (StatusCode::UNAUTHORIZED, error_body("Missing or invalid token"));
    };
    if !is_admin(&roles) {
        return (StatusCode::FORBIDDEN, error_body("Admin role required"));
    }
    state.write_hits.fetch_add(1, Ordering::SeqCst);
    let mut inner = state.inner.lock().unwrap();
    let before = inner.books.len();
    inner.books.retain(|b| b.id != id);
    if inner.books.len() == before {
        return (StatusCode::NOT_FOUND, error_body("Book not found"));
    }
    (StatusCode::OK, Json(Value::Null))
}

async fn list_users(State(state): State<StubState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let Some((_, roles)) = authenticated(&state, &headers) else {
        return (StatusCode::UNAUTHORIZED, error_body("Missing or invalid token"));
    };
    if !is_admin(&roles) {
        return (StatusCode::FORBIDDEN, error_body("Admin role required"));
    }
    let inner = state.inner.lock().unwrap();
    let users: Vec<Value> = inner
        .users
        .iter()
        .map(|u| json!({ "username": u.username }))
        .collect();
    (StatusCode::OK, Json(json!(users)))
}

async fn count_users(State(state): State<StubState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let Some((_, roles)) = authenticated(&state, &headers) else {
        return (StatusCode::UNAUTHORIZED, error_body("Missing or invalid token"));
    };
    if !is_admin(&roles) {
        return (StatusCode::FORBIDDEN, error_body("Admin role required"));
    }
    let count = state.inner.lock().unwrap().users.len();
    (StatusCode::OK, Json(json!(count)))
}
