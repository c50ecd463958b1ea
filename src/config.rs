use crate::error::{GitissueError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Variable consulted for a token when `--token` is absent.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    pub org: Option<String>,
    pub labels: Option<Vec<String>>,
}

impl Config {
    /// Resolves the API token: flag first, then `GITHUB_TOKEN`, then the saved token.
    pub fn resolve_token(&self, flag: Option<&str>, env: Option<&str>) -> Result<String> {
        [flag, env, self.auth.token.as_deref()]
            .into_iter()
            .flatten()
            .find_map(|t| normalize_token(t).ok())
            .ok_or(GitissueError::TokenRequired)
    }
}

/// Trims a token; a blank one counts as no token at all.
pub fn normalize_token(raw: &str) -> Result<String> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(GitissueError::TokenRequired);
    }
    Ok(token.to_string())
}

pub fn config_path() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("gitissuehelper").join("config.toml");
        return Ok(path);
    }

    let home = dirs::home_dir()
        .ok_or_else(|| GitissueError::Config("Cannot find home directory".into()))?;
    Ok(home
        .join(".config")
        .join("gitissuehelper")
        .join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config)?;
    fs::write(&path, &contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}
