//! Auth command handlers.

use std::io::{self, BufRead};
use std::sync::Arc;

use anyhow::{Context, Result};
use formauth_core::auth::AuthClient;
use formauth_core::components::LoginComponent;
use formauth_core::components::login::{EMAIL, PASSWORD};
use formauth_core::config::Config;
use formauth_core::form::FormError;
use formauth_core::logging::mask_token;
use formauth_core::session::SessionStore;
use formauth_core::store::FileStore;

fn session_store(config: &Config) -> SessionStore {
    SessionStore::new(Arc::new(FileStore::new(config.storage_path())))
}

fn read_password_line() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login(
    config: &Config,
    email: Option<String>,
    password: Option<String>,
    password_stdin: bool,
) -> Result<()> {
    let mut component =
        LoginComponent::restore(session_store(config)).context("restore session")?;

    if let Some(profile) = component.profile() {
        println!(
            "Already logged in as {}. Run `formauth logout` first.",
            profile.display_name()
        );
        return Ok(());
    }

    let password = if password_stdin {
        Some(read_password_line()?)
    } else {
        password
    };

    component.form_mut().set_text(EMAIL, email)?;
    component.form_mut().set_text(PASSWORD, password)?;

    let client = AuthClient::new(config.auth.clone())?;
    match component.submit(&client).await {
        Ok(()) => {}
        Err(FormError::SubmitDisabled(fields)) => {
            for name in &fields {
                if let Some(message) = component.field_message(name) {
                    eprintln!("{message}");
                }
            }
            anyhow::bail!("Login form is incomplete");
        }
        Err(err) => return Err(err.into()),
    }

    if let Some(err) = component.last_error() {
        if let Some(details) = &err.details {
            tracing::debug!(kind = %err.kind, "{details}");
        }
        anyhow::bail!("{}", err.user_message());
    }

    if let Some(welcome) = component.welcome_line() {
        println!("{welcome}");
    }
    if let Some(picture) = component.profile().and_then(|p| p.picture()) {
        println!("  Picture: {picture}");
    }
    println!("  Session saved to: {}", config.storage_path().display());
    Ok(())
}

pub fn logout(config: &Config) -> Result<()> {
    let sessions = session_store(config);
    let had_session = sessions.has_token().context("read session")?;
    sessions.clear().context("clear session")?;

    if had_session {
        println!("Logged out.");
        println!("  Session removed from: {}", config.storage_path().display());
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn status(config: &Config) -> Result<()> {
    let component = LoginComponent::restore(session_store(config)).context("restore session")?;

    match component.session() {
        Some(session) => {
            let profile = &session.profile;
            println!("Logged in as {}", profile.display_name());
            println!("  Token: {}", mask_token(&session.token));
            if let Some(picture) = profile.picture() {
                println!("  Picture: {picture}");
            }
        }
        None => println!("Not logged in."),
    }
    Ok(())
}
