use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("LABELSCAN_ENV", "development"));
    let bind_addr = parse_addr("LABELSCAN_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("LABELSCAN_LOG_LEVEL", "info");

    let model_api_key = lookup("LABELSCAN_MODEL_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    // Local iteration may run keyless (the pipeline rejects scans with a
    // ConfigurationError); production must fail at startup instead.
    if model_api_key.is_none() && env == Environment::Production {
        return Err(ConfigError::MissingEnvVar(
            "LABELSCAN_MODEL_API_KEY".to_string(),
        ));
    }
    let model = or_default("LABELSCAN_MODEL", "gpt-4o-mini");
    let model_base_url = or_default("LABELSCAN_MODEL_BASE_URL", "https://api.openai.com/v1");
    let request_timeout_secs = parse_u64("LABELSCAN_REQUEST_TIMEOUT_SECS", "60")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        model_api_key,
        model,
        model_base_url,
        request_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.model_api_key.is_none());
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert_eq!(cfg.model_base_url, "https://api.openai.com/v1");
        assert_eq!(cfg.request_timeout_secs, 60);
    }

    #[test]
    fn build_app_config_reads_model_credential() {
        let mut map = HashMap::new();
        map.insert("LABELSCAN_MODEL_API_KEY", "sk-test");
        map.insert("LABELSCAN_MODEL", "gpt-4o");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.model_api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.model, "gpt-4o");
    }

    #[test]
    fn build_app_config_treats_blank_credential_as_absent() {
        let mut map = HashMap::new();
        map.insert("LABELSCAN_MODEL_API_KEY", "   ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.model_api_key.is_none());
    }

    #[test]
    fn build_app_config_production_requires_credential() {
        let mut map = HashMap::new();
        map.insert("LABELSCAN_ENV", "production");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "LABELSCAN_MODEL_API_KEY"),
            "expected MissingEnvVar(LABELSCAN_MODEL_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("LABELSCAN_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LABELSCAN_BIND_ADDR"),
            "expected InvalidEnvVar(LABELSCAN_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("LABELSCAN_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LABELSCAN_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(LABELSCAN_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_timeout_override() {
        let mut map = HashMap::new();
        map.insert("LABELSCAN_REQUEST_TIMEOUT_SECS", "120");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 120);
    }
}
