//! Catalog views: list, search, detail, and the admin-only book form
//! operations.

use anyhow::Result;

use super::confirm;
use crate::models::{Book, BookFilter, Page, PageRequest, SortSpec};
use crate::session::AccessPolicy;
use crate::AppContext;

pub struct PageArgs {
    pub page: i64,
    pub size: i64,
    pub sort: Option<String>,
}

impl PageArgs {
    fn into_request(self) -> Result<PageRequest> {
        let sort = match self.sort {
            Some(s) => s.parse::<SortSpec>()?,
            None => SortSpec::default(),
        };
        Ok(PageRequest {
            page: self.page,
            size: self.size,
            sort,
        })
    }
}

pub async fn list(ctx: &AppContext, args: PageArgs, json: bool) -> Result<()> {
    if !super::gate(ctx, AccessPolicy::Authenticated).await? {
        return Ok(());
    }
    let request = args.into_request()?;
    let page = ctx.books.list(&request).await?;
    print_page(&page, json)?;
    Ok(())
}

pub async fn search(
    ctx: &AppContext,
    filter: BookFilter,
    args: PageArgs,
    json: bool,
) -> Result<()> {
    if !super::gate(ctx, AccessPolicy::Authenticated).await? {
        return Ok(());
    }
    let request = args.into_request()?;
    let page = ctx.books.search(&request, &filter).await?;
    print_page(&page, json)?;
    Ok(())
}

pub async fn show(ctx: &AppContext, id: i64, json: bool) -> Result<()> {
    if !super::gate(ctx, AccessPolicy::Authenticated).await? {
        return Ok(());
    }
    match ctx.books.get(id).await {
        Ok(book) => print_book(&book, json),
        Err(e) if e.is_not_found() => {
            // Detail views of absent records navigate back to the list.
            eprintln!("Book {} not found. Returning to the book list.", id);
            let page = ctx.books.list(&PageRequest::default()).await?;
            print_page(&page, json)?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn add(
    ctx: &AppContext,
    title: String,
    author: String,
    isbn: String,
    year: i32,
    link: Option<String>,
    json: bool,
) -> Result<()> {
    if !super::gate(ctx, AccessPolicy::AdminOnly).await? {
        return Ok(());
    }
    let book = Book {
        id: None,
        title,
        author,
        isbn,
        publication_year: year,
        book_link: link,
        created_by: None,
        created_at: None,
        updated_at: None,
    };
    let created = ctx.books.create(&book).await?;
    println!("Book created.");
    print_book(&created, json)
}

#[allow(clippy::too_many_arguments)]
pub async fn edit(
    ctx: &AppContext,
    id: i64,
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
    year: Option<i32>,
    link: Option<String>,
    json: bool,
) -> Result<()> {
    if !super::gate(ctx, AccessPolicy::AdminOnly).await? {
        return Ok(());
    }
    let mut book = match ctx.books.get(id).await {
        Ok(book) => book,
        Err(e) if e.is_not_found() => {
            eprintln!("Book {} not found. Returning to the book list.", id);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(title) = title {
        book.title = title;
    }
    if let Some(author) = author {
        book.author = author;
    }
    if let Some(isbn) = isbn {
        book.isbn = isbn;
    }
    if let Some(year) = year {
        book.publication_year = year;
    }
    if let Some(link) = link {
        book.book_link = Some(link);
    }

    let updated = ctx.books.update(id, &book).await?;
    println!("Book updated.");
    print_book(&updated, json)
}

pub async fn remove(ctx: &AppContext, id: i64, yes: bool) -> Result<()> {
    if !super::gate(ctx, AccessPolicy::AdminOnly).await? {
        return Ok(());
    }
    if !yes {
        let name = match ctx.books.get(id).await {
            Ok(book) => format!("\"{}\"", book.title),
            Err(e) if e.is_not_found() => {
                eprintln!("Book {} not found.", id);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        if !confirm(&format!("Delete book {} {}?", id, name))? {
            println!("Aborted.");
            return Ok(());
        }
    }
    ctx.books.delete(id).await?;
    println!("Book {} deleted.", id);
    Ok(())
}

fn print_book(book: &Book, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(book)?);
        return Ok(());
    }
    println!("ID:      {}", book.id.map_or("-".to_string(), |id| id.to_string()));
    println!("Title:   {}", book.title);
    println!("Author:  {}", book.author);
    println!("ISBN:    {}", book.isbn);
    println!("Year:    {}", book.publication_year);
    if let Some(link) = &book.book_link {
        println!("Link:    {}", link);
    }
    if let Some(created_by) = &book.created_by {
        println!("Added by: {}", created_by);
    }
    Ok(())
}

fn print_page(page: &Page<Book>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }
    if page.is_empty() {
        println!("No books found.");
        return Ok(());
    }
    println!(
        "{:<6} {:<32} {:<24} {:<16} {:<6}",
        "ID", "TITLE", "AUTHOR", "ISBN", "YEAR"
    );
    for book in &page.content {
        println!(
            "{:<6} {:<32} {:<24} {:<16} {:<6}",
            book.id.map_or("-".to_string(), |id| id.to_string()),
            truncate(&book.title, 32),
            truncate(&book.author, 24),
            truncate(&book.isbn, 16),
            book.publication_year,
        );
    }
    println!(
        "Page {}/{} - {} book(s) total",
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements
    );
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
