//! CLI commands — the views of the client.
//!
//! Each protected command runs the navigation guard before rendering,
//! on every invocation.

pub mod auth;
pub mod books;
pub mod dashboard;
pub mod users;

use std::io::Write;

use anyhow::Result;

use crate::session::{AccessPolicy, GuardDecision};
use crate::AppContext;

/// Run the guard for a protected view. Returns `true` when the view may
/// render. An unauthorized attempt becomes an error pointing at `folio
/// login`; a forbidden one renders the dashboard (the landing view)
/// instead of an error.
pub async fn gate(ctx: &AppContext, policy: AccessPolicy) -> Result<bool> {
    match ctx.guard.check(policy) {
        GuardDecision::Authorized => Ok(true),
        GuardDecision::Loading => {
            println!("Session is still loading; try again.");
            Ok(false)
        }
        GuardDecision::RedirectToLogin => {
            anyhow::bail!("You are not logged in. Run `folio login` first.")
        }
        GuardDecision::RedirectToDashboard => {
            eprintln!("This view requires the ADMIN role; showing the dashboard instead.");
            dashboard::show(ctx).await?;
            Ok(false)
        }
    }
}

/// Read one trimmed line from stdin, with a prompt.
pub(crate) fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Ask for explicit confirmation of a destructive action.
pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    let answer = prompt_line(&format!("{} [y/N] ", prompt))?;
    Ok(matches!(answer.as_str(), "y" | "Y" | "yes"))
}
