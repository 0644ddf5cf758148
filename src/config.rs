use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use toml;
use tracing::warn;

/// Seconds a query may stay in flight before it is abandoned, unless
/// the configuration or the caller overrides it.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read config at {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(
        #[from]
        #[source]
        toml::de::Error,
    ),
}

/// Whether a provider should be offered by the registry.
#[derive(Deserialize, Serialize, Default, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ProviderActivationPolicy {
    /// Activate the provider when an API key is available
    #[default]
    Auto,
    /// The provider must activate; a missing API key is an error
    Enabled,
    /// Never activate the provider
    Disabled,
}

#[derive(Deserialize, Serialize, Default, Debug)]
pub struct ProviderConfig {
    #[serde(default)]
    pub activate: ProviderActivationPolicy,
    /// Overrides the provider's environment API key when set
    pub api_key: Option<String>,
}

#[derive(Deserialize, Serialize, Default, Debug)]
pub struct Providers {
    #[serde(default)]
    pub openrouter: ProviderConfig,
    #[serde(default)]
    pub deepseek: ProviderConfig,
    #[serde(default)]
    pub zhipu: ProviderConfig,
    #[serde(default)]
    pub moonshot: ProviderConfig,
}

#[derive(Deserialize, Serialize, Default, Debug)]
pub struct Config {
    /// The provider serving identifiers no namespace claims. Names one
    /// of the provider identifier tokens (e.g. "openrouter").
    pub default_provider: Option<String>,
    /// Default per-query timeout, in seconds
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub providers: Providers,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

fn get_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME");

    if let Some(home) = home {
        let home = PathBuf::from(home);

        const USER_PATHS: [&str; 2] = [".config/quorum/config.toml", ".quorum.toml"];

        for &path in USER_PATHS.iter() {
            let fullpath = home.join(path);

            if fullpath.exists() {
                return Some(fullpath);
            }
        }
    }

    let system_config = PathBuf::from("/etc/quorum.toml");

    if system_config.exists() {
        Some(system_config)
    } else {
        None
    }
}

fn warn_on_extra_fields_helper<'a>(
    path: &mut Vec<&'a String>,
    user_config: &'a toml::Table,
    config: &'a toml::Table,
) {
    for (user_key, user_value) in user_config {
        path.push(user_key);

        if let Some(config_value) = config.get(user_key) {
            match (user_value, config_value) {
                (toml::Value::Table(user_value), toml::Value::Table(config_value)) => {
                    warn_on_extra_fields_helper(path, user_value, config_value)
                }
                _ => {}
            }
        } else {
            let path: Vec<&str> = path.iter().map(|&s| s.as_str()).collect();

            warn!("config contains extraneous key \"{}\", ignoring", path.join("."));
        }

        path.pop();
    }
}

fn warn_on_extra_fields(config: &Config, raw_config: &str) -> Result<(), Error> {
    let user_config: toml::Table = toml::de::from_str(raw_config)?;

    let config: toml::Table = {
        let serialized_config =
            toml::ser::to_string(&config).expect("failed to reserialize config");

        toml::de::from_str(&serialized_config)?
    };

    let mut path = Vec::new();

    warn_on_extra_fields_helper(&mut path, &user_config, &config);

    Ok(())
}

/// Read the configuration from `config`, or from the first discovered
/// config file when no path is given. A missing config file is not an
/// error; it yields the defaults.
pub fn read_config(config: Option<PathBuf>) -> Result<Config, Error> {
    let config_path = config.or_else(get_config_path);

    let path = match config_path {
        Some(path) => path,
        None => return Ok(Config::default()),
    };

    let raw_config =
        std::fs::read_to_string(&path).map_err(|source| Error::Unreadable { path, source })?;

    let config: Config = toml::de::from_str(&raw_config)?;

    warn_on_extra_fields(&config, &raw_config)?;

    Ok(config)
}
