use std::{collections::HashMap, time::Duration};

use crate::{
    platform::permission::PermissionStatus,
    services::places_client::places_service::DEFAULT_PLACES_HOST,
};

const DEFAULT_QUERY: &str = "Psicologo";
const DEFAULT_RADIUS_METERS: u32 = 2000;
const DEFAULT_FIX_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "Missing environment variable {}", name),
            ConfigError::Invalid(name, value) => {
                write!(f, "Invalid value for {}: {:?}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub places_api_key: String,
    pub places_host: String,
    pub places_query: String,
    pub places_radius_meters: u32,
    pub enable_search: bool,
    pub location_permission: PermissionStatus,
    pub fix_timeout: Duration,
    pub bind_address: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| vars.get(name).filter(|v| !v.trim().is_empty()).cloned();

        let enable_search = match get("ENABLE_SEARCH") {
            None => true,
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::Invalid("ENABLE_SEARCH", v)),
            },
        };

        let places_api_key = match get("PLACES_API_KEY") {
            Some(key) => key,
            None if enable_search => return Err(ConfigError::Missing("PLACES_API_KEY")),
            None => String::new(),
        };

        let places_radius_meters = match get("PLACES_RADIUS_METERS") {
            None => DEFAULT_RADIUS_METERS,
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|r| *r > 0)
                .ok_or(ConfigError::Invalid("PLACES_RADIUS_METERS", v))?,
        };

        let location_permission = match get("LOCATION_PERMISSION") {
            None => PermissionStatus::Granted,
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "granted" => PermissionStatus::Granted,
                "denied" => PermissionStatus::Denied,
                _ => return Err(ConfigError::Invalid("LOCATION_PERMISSION", v)),
            },
        };

        let fix_timeout = match get("FIX_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_FIX_TIMEOUT_SECS),
            Some(v) => v
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid("FIX_TIMEOUT_SECS", v))?,
        };

        Ok(AppConfig {
            places_api_key,
            places_host: get("PLACES_HOST")
                .map(|h| h.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_PLACES_HOST.to_string()),
            places_query: get("PLACES_QUERY").unwrap_or_else(|| DEFAULT_QUERY.to_string()),
            places_radius_meters,
            enable_search,
            location_permission,
            fix_timeout,
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::from_vars(vars(&[("PLACES_API_KEY", "secret")])).unwrap();

        assert_eq!(config.places_api_key, "secret");
        assert_eq!(config.places_host, DEFAULT_PLACES_HOST);
        assert_eq!(config.places_query, "Psicologo");
        assert_eq!(config.places_radius_meters, 2000);
        assert!(config.enable_search);
        assert_eq!(config.location_permission, PermissionStatus::Granted);
        assert_eq!(config.fix_timeout, Duration::from_secs(30));
        assert_eq!(config.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn api_key_required_only_with_search() {
        assert_eq!(
            AppConfig::from_vars(vars(&[])).unwrap_err(),
            ConfigError::Missing("PLACES_API_KEY")
        );

        let config = AppConfig::from_vars(vars(&[("ENABLE_SEARCH", "false")])).unwrap();
        assert!(!config.enable_search);
    }

    #[test]
    fn overrides() {
        let config = AppConfig::from_vars(vars(&[
            ("PLACES_API_KEY", "secret"),
            ("PLACES_HOST", "http://localhost:1234/"),
            ("PLACES_QUERY", "Cafe"),
            ("PLACES_RADIUS_METERS", "500"),
            ("LOCATION_PERMISSION", "Denied"),
            ("FIX_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.places_host, "http://localhost:1234");
        assert_eq!(config.places_query, "Cafe");
        assert_eq!(config.places_radius_meters, 500);
        assert_eq!(config.location_permission, PermissionStatus::Denied);
        assert_eq!(config.fix_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_invalid_values() {
        let err = AppConfig::from_vars(vars(&[
            ("PLACES_API_KEY", "secret"),
            ("PLACES_RADIUS_METERS", "far"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid("PLACES_RADIUS_METERS", "far".to_string())
        );

        let err = AppConfig::from_vars(vars(&[
            ("PLACES_API_KEY", "secret"),
            ("LOCATION_PERMISSION", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("LOCATION_PERMISSION", _)));
    }
}
