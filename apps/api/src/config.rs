use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, Result};

use crate::extract::keywords::HeaderMatch;
use crate::layout::{FontFamily, TemplateKind};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; unparsable values fail startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Template used when a request does not name one.
    pub template: TemplateKind,
    pub font: FontFamily,
    pub header_match: HeaderMatch,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            template: TemplateKind::Classic,
            font: FontFamily::Helvetica,
            header_match: HeaderMatch::Contains,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        Ok(Config {
            port: parse_var(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            template: parse_var(&lookup, "RESUME_TEMPLATE", defaults.template)?,
            font: parse_var(&lookup, "RESUME_FONT", defaults.font)?,
            header_match: parse_var(&lookup, "RESUME_HEADER_MATCH", defaults.header_match)?,
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow!("Environment variable '{key}' is invalid ({raw:?}): {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]).unwrap(), Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("RESUME_TEMPLATE", "sidebar"),
            ("RESUME_FONT", "times"),
            ("RESUME_HEADER_MATCH", "starts_with"),
            ("MAX_UPLOAD_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.template, TemplateKind::Sidebar);
        assert_eq!(config.font, FontFamily::Times);
        assert_eq!(config.header_match, HeaderMatch::StartsWith);
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn test_invalid_value_names_variable() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        let err = config_from(&[("RESUME_TEMPLATE", "fancy")]).unwrap_err();
        assert!(err.to_string().contains("RESUME_TEMPLATE"));
    }
}
