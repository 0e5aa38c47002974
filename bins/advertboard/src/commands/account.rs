//! Account commands: login, register, logout, whoami

use super::Context;
use crate::output::{self, Status};
use anyhow::Result;
use owo_colors::OwoColorize;

/// Sign in and persist the tokens
pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<()> {
    let user = ctx.session.login(email, password).await?;

    if ctx.json() {
        return output::json(&ctx.session.current());
    }

    Status::success(&format!("Signed in as {}", user.name.bold()));
    Ok(())
}

/// Create an account and sign in with it
pub async fn register(ctx: &Context, name: &str, email: &str, password: &str) -> Result<()> {
    let user = ctx.session.register(name, email, password).await?;

    if ctx.json() {
        return output::json(&ctx.session.current());
    }

    Status::success(&format!("Account created for {}", user.email.bold()));
    Ok(())
}

/// Sign out; local tokens are removed even when the backend is unreachable
pub async fn logout(ctx: &Context) -> Result<()> {
    ctx.session.logout().await?;

    if ctx.json() {
        return output::json(&ctx.session.current());
    }

    Status::success("Signed out");
    Ok(())
}

/// Show the signed-in user
pub async fn whoami(ctx: &Context) -> Result<()> {
    let session = ctx.session.restore().await;

    if ctx.json() {
        return output::json(&session);
    }

    match session.user {
        Some(user) => {
            Status::header("Signed in");
            output::print_user(&user);
        }
        None => Status::info("Not signed in"),
    }
    Ok(())
}
