//! Login/logout/whoami command handlers.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use herdlink_core::api::{ApiClient, auth};
use herdlink_core::session::{SessionStore, session_cache};

pub async fn login(client: &ApiClient, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    let session = super::surface(auth::login(client, username, &password).await)?;
    session_cache::save(&session).context("save session cache")?;

    println!("Logged in as {} ({})", session.full_name, session.role_name);
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    store.logout();
    let had_session = session_cache::clear().context("clear session cache")?;
    if had_session {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn whoami(store: &SessionStore) -> Result<()> {
    let session = store.snapshot();
    if session.is_authenticated {
        println!(
            "{} ({}) [user {}]",
            session.full_name, session.role_name, session.user_id
        );
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("Empty password");
    }
    Ok(password)
}
