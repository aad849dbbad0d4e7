use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::rchain::provider::{ChatOptions, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::session::SYSTEM_PROMPT;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ProfileConfig {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub timeout: Option<u64>,
    pub base_url: Option<String>,
    pub system: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    profiles: Option<HashMap<String, ProfileConfig>>,
}

/// Values given on the command line; each one wins over env and profile.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub timeout: Option<u64>,
    pub profile: Option<String>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: Option<u64>,
    pub base_url: String,
    pub system_prompt: String,
}

impl Settings {
    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Resolves settings from CLI overrides, the process environment and the
/// optional profile.
pub fn resolve_settings(overrides: &Overrides) -> Result<Settings, String> {
    let profile = match overrides.profile.as_deref() {
        Some(name) => Some(load_profile(name)?),
        None => None,
    };
    resolve_with_env(overrides, profile, |key| env::var(key).ok())
}

/// Precedence per field: CLI, then environment, then profile, then default.
pub fn resolve_with_env(
    overrides: &Overrides,
    profile: Option<ProfileConfig>,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, String> {
    let profile = profile.unwrap_or_default();
    let env_value = |key: &str| {
        env_lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let env_temperature = match env_value("TONEY_TEMPERATURE") {
        Some(raw) => Some(
            raw.parse::<f32>()
                .map_err(|_| format!("Invalid TONEY_TEMPERATURE '{raw}'. Expected a number."))?,
        ),
        None => None,
    };
    let env_timeout = match env_value("TONEY_TIMEOUT") {
        Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
            format!("Invalid TONEY_TIMEOUT '{raw}'. Expected a whole number of seconds.")
        })?),
        None => None,
    };

    let temperature = overrides
        .temperature
        .or(env_temperature)
        .or(profile.temperature)
        .unwrap_or(DEFAULT_TEMPERATURE);
    validate_temperature(temperature)?;

    Ok(Settings {
        model: overrides
            .model
            .clone()
            .or_else(|| env_value("OPENAI_MODEL"))
            .or(profile.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        temperature,
        timeout_secs: overrides.timeout.or(env_timeout).or(profile.timeout),
        base_url: env_value("OPENAI_BASE_URL")
            .or(profile.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        system_prompt: profile
            .system
            .unwrap_or_else(|| SYSTEM_PROMPT.to_string()),
    })
}

fn validate_temperature(temperature: f32) -> Result<(), String> {
    if (0.0..=2.0).contains(&temperature) {
        Ok(())
    } else {
        Err(format!(
            "Invalid temperature {temperature}. Expected a value between 0.0 and 2.0."
        ))
    }
}

pub fn load_profile(name: &str) -> Result<ProfileConfig, String> {
    let path = config_path()?;
    let config = read_config(&path)?;
    select_profile(config, name, &path)
}

/// Checks that the config file parses and, when given, that the profile is usable.
pub fn validate_config(profile: Option<&str>) -> Result<PathBuf, String> {
    let path = config_path()?;
    let config = read_config(&path)?;
    if let Some(name) = profile {
        let profile = select_profile(config, name, &path)?;
        if let Some(temperature) = profile.temperature {
            validate_temperature(temperature)
                .map_err(|err| format!("Profile '{name}': {err}"))?;
        }
    }
    Ok(path)
}

fn read_config(path: &Path) -> Result<ConfigFile, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read config file '{}': {err}", path.display()))?;
    parse_config(&raw, path)
}

fn parse_config(raw: &str, path: &Path) -> Result<ConfigFile, String> {
    toml::from_str(raw)
        .map_err(|err| format!("Failed to parse config file '{}': {err}", path.display()))
}

fn select_profile(config: ConfigFile, name: &str, path: &Path) -> Result<ProfileConfig, String> {
    let profiles = config.profiles.ok_or_else(|| {
        format!(
            "Config file '{}' does not contain a [profiles] section.",
            path.display()
        )
    })?;

    profiles.get(name).cloned().ok_or_else(|| {
        format!(
            "Profile '{}' not found in config file '{}'.",
            name,
            path.display()
        )
    })
}

fn config_path() -> Result<PathBuf, String> {
    if let Ok(path) = env::var("TONEY_CONFIG") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let trimmed = xdg.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed).join("toneybot").join("config.toml"));
        }
    }

    let home = env::var("HOME").map_err(|_| {
        "Cannot resolve config path: set TONEY_CONFIG or HOME/XDG_CONFIG_HOME.".to_string()
    })?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("toneybot")
        .join("config.toml"))
}
