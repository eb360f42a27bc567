use std::{collections::HashMap, fs, path::Path};

use anyhow::{anyhow, Context};
use shared::domain::UserType;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "billed.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub email: Option<String>,
    pub user_type: UserType,
    pub jwt: Option<String>,
    pub modal_width: u32,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5678".into(),
            email: None,
            user_type: UserType::Employee,
            jwt: None,
            modal_width: 800,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn api_base_url(&self) -> anyhow::Result<Url> {
        let url = Url::parse(&self.api_url)
            .with_context(|| format!("invalid api_url '{}'", self.api_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "api_url must use http or https, got '{}'",
                url.scheme()
            ));
        }
        Ok(url)
    }
}

/// Defaults, then `path` if it exists, then environment variables.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
    }

    apply_env(&mut settings, lookup);
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(raw)?;
    let text = |key: &str| {
        file_cfg.get(key).map(|value| match value {
            toml::Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    };

    if let Some(v) = text("api_url") {
        settings.api_url = v;
    }
    if let Some(v) = text("email") {
        settings.email = Some(v);
    }
    if let Some(v) = text("user_type") {
        settings.user_type = parse_user_type(&v)?;
    }
    if let Some(v) = text("jwt") {
        settings.jwt = Some(v);
    }
    if let Some(v) = text("modal_width") {
        settings.modal_width = v
            .parse()
            .with_context(|| format!("modal_width must be a positive integer, got '{v}'"))?;
    }
    if let Some(v) = text("log_filter") {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("BILLED_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = lookup("BILLED_EMAIL") {
        settings.email = Some(v);
    }
    if let Some(v) = lookup("BILLED_JWT") {
        settings.jwt = Some(v);
    }

    if let Some(v) = lookup("BILLED_USER_TYPE") {
        if let Ok(user_type) = parse_user_type(&v) {
            settings.user_type = user_type;
        }
    }

    if let Some(v) = lookup("BILLED_MODAL_WIDTH") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.modal_width = parsed;
        }
    }
}

fn parse_user_type(raw: &str) -> anyhow::Result<UserType> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "employee" => Ok(UserType::Employee),
        "manager" | "admin" => Ok(UserType::Manager),
        other => Err(anyhow!("unknown user_type '{other}'")),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
