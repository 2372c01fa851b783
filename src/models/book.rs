//! Book model and search filter.
//!
//! Wire shapes follow the backend's camelCase JSON. Timestamps arrive as
//! zoneless ISO-8601 strings, hence `NaiveDateTime`.

use chrono::{Datelike, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Oldest accepted publication year; the upper bound is the current year.
pub const MIN_PUBLICATION_YEAR: i32 = 1800;

/// A catalog record. `id` is absent until assigned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    pub publication_year: i32,
    #[validate(url(message = "Book link must be a valid URL"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Book {
    /// Client-side validation gate: a book failing this never reaches the
    /// network.
    pub fn validate_for_submit(&self) -> AppResult<()> {
        self.validate()?;
        let current_year = Utc::now().year();
        if self.publication_year < MIN_PUBLICATION_YEAR || self.publication_year > current_year {
            return Err(AppError::Validation(format!(
                "Publication Year must be between {} and {}",
                MIN_PUBLICATION_YEAR, current_year
            )));
        }
        Ok(())
    }
}

/// Conjunctive search filter over the catalog. Unset fields are omitted
/// from the request entirely; an empty string counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub year: Option<i32>,
}

impl BookFilter {
    /// Drop blank text fields so they cannot be sent as empty-string matches.
    pub fn normalized(&self) -> Self {
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };
        Self {
            title: clean(&self.title),
            author: clean(&self.author),
            isbn: clean(&self.isbn),
            year: self.year,
        }
    }

    /// True when no field would contribute to the request.
    pub fn is_empty(&self) -> bool {
        let n = self.normalized();
        n.title.is_none() && n.author.is_none() && n.isbn.is_none() && n.year.is_none()
    }

    /// Query-string pairs for the set fields only.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let n = self.normalized();
        let mut params = Vec::new();
        if let Some(title) = n.title {
            params.push(("title", title));
        }
        if let Some(author) = n.author {
            params.push(("author", author));
        }
        if let Some(isbn) = n.isbn {
            params.push(("isbn", isbn));
        }
        if let Some(year) = n.year {
            params.push(("year", year.to_string()));
        }
        params
    }
}
