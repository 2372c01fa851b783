//! The landing view: session summary and catalog counts.

use anyhow::Result;

use crate::session::AccessPolicy;
use crate::AppContext;

pub async fn dashboard(ctx: &AppContext) -> Result<()> {
    if !super::gate(ctx, AccessPolicy::Authenticated).await? {
        return Ok(());
    }
    show(ctx).await
}

/// Render the dashboard without re-running the guard; used as the
/// redirect target of forbidden navigations.
pub(super) async fn show(ctx: &AppContext) -> Result<()> {
    let Some(session) = ctx.session.current() else {
        return Ok(());
    };

    let title = if session.is_admin() {
        "Administrator Dashboard"
    } else {
        "User Dashboard"
    };
    println!("{} - logged in as {}", title, session.username);

    match ctx.books.count_books().await {
        Ok(count) => println!("Books: {}", count),
        Err(e) => {
            eprintln!("Failed to load book count: {}", e);
            println!("Books: -");
        }
    }

    // The backend gates the user count behind the admin role.
    if session.is_admin() {
        match ctx.books.count_users().await {
            Ok(count) => println!("Users: {}", count),
            Err(e) => {
                eprintln!("Failed to load user count: {}", e);
                println!("Users: -");
            }
        }
    }

    Ok(())
}
