//! Login, logout, register and whoami.

use anyhow::Result;

use super::{dashboard, prompt_line};
use crate::session::AccessPolicy;
use crate::AppContext;

pub async fn login(
    ctx: &AppContext,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    // An authenticated visitor to the login view goes straight to the
    // landing view.
    if ctx.session.is_authenticated() {
        if let Some(session) = ctx.session.current() {
            println!("Already logged in as {}.", session.username);
        }
        return dashboard::show(ctx).await;
    }

    let username = match username {
        Some(u) => u,
        None => prompt_line("Username: ")?,
    };
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ")?,
    };

    match ctx.session.login(&username, &password).await {
        Ok(_) => {
            println!("Login successful!");
            dashboard::show(ctx).await
        }
        Err(e) => {
            eprintln!("Login failed. Please check your credentials.");
            Err(e.into())
        }
    }
}

pub fn logout(ctx: &AppContext) {
    ctx.session.logout();
    println!("Logged out successfully!");
}

pub async fn register(
    ctx: &AppContext,
    username: Option<String>,
    password: Option<String>,
    wants_admin: bool,
) -> Result<()> {
    if ctx.session.is_authenticated() {
        println!("Already logged in; log out before registering a new account.");
        return dashboard::show(ctx).await;
    }

    let username = match username {
        Some(u) => u,
        None => prompt_line("Username: ")?,
    };
    let password = match password {
        Some(p) => p,
        None => {
            let password = rpassword::prompt_password("Password: ")?;
            let confirm = rpassword::prompt_password("Confirm password: ")?;
            if password != confirm {
                anyhow::bail!("Passwords do not match!");
            }
            password
        }
    };

    match ctx.session.register(&username, &password, wants_admin).await {
        Ok(response) => {
            println!("{}", response.message);
            if !response.roles.is_empty() {
                println!("Roles: {}", response.roles.join(", "));
            }
            println!("Run `folio login` to start a session.");
            Ok(())
        }
        Err(e) => {
            eprintln!("Registration failed.");
            Err(e.into())
        }
    }
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    if !super::gate(ctx, AccessPolicy::Authenticated).await? {
        return Ok(());
    }
    if let Some(session) = ctx.session.current() {
        println!("Username: {}", session.username);
        println!("Roles:    {}", session.roles.join(", "));
        println!("Admin:    {}", session.is_admin());
    }
    Ok(())
}
