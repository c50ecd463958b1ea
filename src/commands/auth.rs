use crate::config::{config_path, load_config, normalize_token, save_config};
use crate::display;
use crate::error::Result;
use crate::github::GithubClient;
use crate::GlobalOpts;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
struct SavedToken {
    login: String,
    name: Option<String>,
    config_path: String,
}

/// Validates a token against `/user` and stores it for later `create` runs.
///
/// A blank token is rejected before any request is made.
pub async fn run(token: &Option<String>, global: &GlobalOpts) -> Result<()> {
    let raw = match token {
        Some(t) => t.clone(),
        None => {
            eprintln!("Enter your GitHub personal access token:");
            rpassword::read_password()?
        }
    };
    let token = normalize_token(&raw)?;

    let client = GithubClient::new(&token, global.api_url.as_deref(), global.verbose)?;
    let user = client.validate_token().await?;
    debug!(login = %user.login, "token accepted");

    // Keep any saved defaults; only the token changes.
    let mut config = load_config()?;
    config.auth.token = Some(token);
    save_config(&config)?;

    let saved = SavedToken {
        login: user.login,
        name: user.name,
        config_path: config_path()?.display().to_string(),
    };
    display::output(global.json, &saved, |s| {
        display::success(&format!(
            "Authenticated as {} ({}); token saved to {}",
            s.login,
            s.name.as_deref().unwrap_or("no name set"),
            s.config_path
        ));
    });

    client.check_rate_limit_if_verbose().await;

    Ok(())
}
