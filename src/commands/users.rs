//! Admin-only view of registered users.

use anyhow::Result;

use crate::session::AccessPolicy;
use crate::AppContext;

pub async fn list(ctx: &AppContext, json: bool) -> Result<()> {
    if !super::gate(ctx, AccessPolicy::AdminOnly).await? {
        return Ok(());
    }
    let users = ctx.books.list_users().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }
    if users.is_empty() {
        println!("No registered users.");
        return Ok(());
    }
    println!("USERNAME");
    for user in &users {
        println!("{}", user.username);
    }
    println!("{} user(s)", users.len());
    Ok(())
}
