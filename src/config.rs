//! Runtime settings read from the environment.
//!
//! `main` loads `.env` first (dotenv), so any of these can live there:
//! - `IP2AS_FORMAT` - `text` | `csv` | `json`
//! - `IP2AS_NO_MATCH` - `sentinel` | `skip`
//! - `IP2AS_DEFAULT_ROUTE` - `match` | `ignore`
//! - `IP2AS_LOG_CONFIG` - path to the log4rs yaml file

use crate::output::{NoMatchPolicy, OutputFormat};
use crate::processing::DefaultRoute;
use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_FORMAT: &str = "IP2AS_FORMAT";
pub const ENV_NO_MATCH: &str = "IP2AS_NO_MATCH";
pub const ENV_DEFAULT_ROUTE: &str = "IP2AS_DEFAULT_ROUTE";
pub const ENV_LOG_CONFIG: &str = "IP2AS_LOG_CONFIG";

pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// Values given on the command line; `Some` wins over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub format: Option<OutputFormat>,
    pub no_match: Option<NoMatchPolicy>,
    pub default_route: Option<DefaultRoute>,
    pub log_config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub no_match: NoMatchPolicy,
    pub default_route: DefaultRoute,
    pub log_config: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            format: OutputFormat::default(),
            no_match: NoMatchPolicy::default(),
            default_route: DefaultRoute::default(),
            log_config: PathBuf::from(DEFAULT_LOG_CONFIG),
        }
    }
}

impl Settings {
    /// Settings from process environment variables.
    pub fn from_env() -> Result<Settings, Box<dyn Error>> {
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings from `overrides`, falling back to process environment variables.
    pub fn from_env_with(overrides: Overrides) -> Result<Settings, Box<dyn Error>> {
        Settings::from_lookup_with(overrides, |key| std::env::var(key).ok())
    }

    /// Settings from an arbitrary key lookup, unset keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Settings, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        Settings::from_lookup_with(Overrides::default(), lookup)
    }

    /// Like [`Settings::from_lookup`], but a key is not even read when
    /// `overrides` already sets its value.
    pub fn from_lookup_with<F>(overrides: Overrides, lookup: F) -> Result<Settings, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        settings.format = match overrides.format {
            Some(format) => format,
            None => lookup_var(&lookup, ENV_FORMAT)?.unwrap_or(settings.format),
        };
        settings.no_match = match overrides.no_match {
            Some(no_match) => no_match,
            None => lookup_var(&lookup, ENV_NO_MATCH)?.unwrap_or(settings.no_match),
        };
        settings.default_route = match overrides.default_route {
            Some(default_route) => default_route,
            None => lookup_var(&lookup, ENV_DEFAULT_ROUTE)?.unwrap_or(settings.default_route),
        };
        settings.log_config = match overrides.log_config {
            Some(path) => path,
            None => lookup(ENV_LOG_CONFIG)
                .map(PathBuf::from)
                .unwrap_or(settings.log_config),
        };
        Ok(settings)
    }
}

fn lookup_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, Box<dyn Error>>
where
    T: FromStr<Err = String>,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|v| parse_var(key, &v)).transpose()
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, Box<dyn Error>>
where
    T: FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e| format!("Invalid {key}={value:?}: {e}").into())
}
