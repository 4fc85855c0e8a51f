use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TEST_DURATION_SECONDS: u64 = 1800;
pub const DEFAULT_TICK_MILLIS: u64 = 1000;
pub const DEFAULT_SESSION_FILE: &str = ".online-test-session.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub test_duration: Duration,
    pub tick_interval: Duration,
    pub http_timeout: Option<Duration>,
    pub session_file: PathBuf,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            api_base_url: parse_base_url(&get_env("API_BASE_URL")?)?,
            test_duration: Duration::from_secs(
                get_env_parse_or("TEST_DURATION_SECONDS", DEFAULT_TEST_DURATION_SECONDS)?,
            ),
            tick_interval: Duration::from_millis(
                get_env_parse_or("COUNTDOWN_TICK_MILLIS", DEFAULT_TICK_MILLIS)?.max(1),
            ),
            http_timeout: get_env_parse_opt::<u64>("HTTP_TIMEOUT_SECS")?.map(Duration::from_secs),
            session_file: env::var("SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE)),
        })
    }

    /// Configuration with defaults for everything but the backend origin.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            api_base_url: parse_base_url(base_url)?,
            test_duration: Duration::from_secs(DEFAULT_TEST_DURATION_SECONDS),
            tick_interval: Duration::from_millis(DEFAULT_TICK_MILLIS),
            http_timeout: None,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        })
    }
}

// Relative joins drop the last path segment unless the base ends with '/'.
fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{}/", raw))?)
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_opt<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(None),
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Ok(get_env_parse_opt(name)?.unwrap_or(default))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
