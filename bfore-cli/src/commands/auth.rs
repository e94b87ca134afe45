//! Session commands: login, logout, show.

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::info;

use super::prompt_line;
use crate::app::AppContext;

/// Arguments for the login command.
#[derive(Args, Debug, Default)]
pub struct LoginArgs {
    /// Username; prompted for if omitted.
    #[arg(long, short)]
    pub username: Option<String>,

    /// Password; prompted for if omitted.
    #[arg(long, short)]
    pub password: Option<String>,
}

/// Arguments for the show command.
#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Print the full token instead of a masked one.
    #[arg(long)]
    pub reveal: bool,
}

/// Runs the login command.
pub async fn login(args: &LoginArgs, app: &AppContext) -> Result<()> {
    let username = match &args.username {
        Some(u) => u.clone(),
        None => prompt_line("Enter username: ")?,
    };
    let password = match &args.password {
        Some(p) => p.clone(),
        None => prompt_line("Enter password: ")?,
    };
    if username.trim().is_empty() {
        bail!("Username must not be empty");
    }

    let ctx = app.fetch_context(app.fetch_settings(None, None))?;
    let session = ctx.api.login(&username, &password).await.context("Login failed")?;

    info!(username = %session.username, "Logged in");
    if app.save_session(&session) {
        println!(
            "{}",
            app.formatter
                .format_success("Successfully authenticated! Token has been stored in the keychain.")
        );
    } else {
        println!(
            "{}",
            app.formatter
                .format_success("Successfully authenticated! Token has been stored for this session.")
        );
    }
    Ok(())
}

/// Runs the logout command.
pub fn logout(app: &AppContext) -> Result<()> {
    if !app.session().is_authenticated() {
        println!("You are not logged in.");
        return Ok(());
    }
    app.clear_session()?;
    println!("You have been logged out.");
    Ok(())
}

/// Runs the show command.
#[allow(clippy::unnecessary_wraps)]
pub fn show(args: &ShowArgs, app: &AppContext) -> Result<()> {
    println!("{}", app.formatter.format_session(&app.session(), args.reveal));
    Ok(())
}
