//! Environment variable handling for the DPD client configuration.
//!
//! Config values go through `DPD__SECTION__KEY`, secrets through
//! `DPD_SECRET_SECTION_KEY` with a legacy `SECTION_KEY` fallback.

use std::env;
use tracing::warn;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "DPD";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "DPD_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value in config files meaning "take this value from the environment".
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `"server.host"` becomes `"DPD__SERVER__HOST"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `"dpd.password"` becomes `"DPD_SECRET_DPD_PASSWORD"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to its short legacy name
///
/// `"dpd.delis_id"` becomes `"DPD_DELIS_ID"`.
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Get an environment variable for a configuration path
pub fn get_config_env_var(path: &str) -> Option<String> {
    env::var(config_path_to_env_var(path)).ok()
}

/// Get an environment variable for a secret path, trying the new naming
/// pattern first and the legacy one second.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    if let Ok(value) = env::var(secret_path_to_env_var(path)) {
        return Some(value);
    }
    env::var(legacy_secret_path_to_env_var(path)).ok()
}

/// Paths holding credentials or identifiers that must not live in config files.
pub fn is_secret_path(path: &str) -> bool {
    let path_lower = path.to_lowercase();
    path_lower.contains("secret")
        || path_lower.contains("password")
        || path_lower.contains("token")
        || path_lower.contains("delis_id")
        || path_lower.contains("customer_number")
}

/// Get an environment variable for a path
pub fn get_env_var(path: &str) -> Option<String> {
    if is_secret_path(path) {
        get_secret_env_var(path).or_else(|| get_config_env_var(path))
    } else {
        get_config_env_var(path)
    }
}

/// Inject environment variables into a JSON value
///
/// Recursively replaces every `"secret_from_env"` string with the matching
/// environment variable. Returns `true` if any value was replaced.
pub fn inject_env_vars(value: &mut serde_json::Value) -> bool {
    use serde_json::Value;

    fn walk(path: Vec<String>, obj: &mut Value) -> bool {
        let mut replaced = false;

        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::Array(arr) => {
                for (i, v) in arr.iter_mut().enumerate() {
                    let mut new_path = path.clone();
                    new_path.push(i.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                if let Some(env_val) = get_env_var(&path_str) {
                    *s = env_val;
                    replaced = true;
                } else {
                    warn!("env var for {} not found", path_str);
                }
            }
            _ => {}
        }

        replaced
    }

    walk(vec![], value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_to_env_var() {
        assert_eq!(config_path_to_env_var("server.host"), "DPD__SERVER__HOST");
        assert_eq!(config_path_to_env_var("dpd.staging"), "DPD__DPD__STAGING");
    }

    #[test]
    fn test_secret_path_to_env_var() {
        assert_eq!(
            secret_path_to_env_var("dpd.password"),
            "DPD_SECRET_DPD_PASSWORD"
        );
        assert_eq!(
            secret_path_to_env_var("dpd.delis_id"),
            "DPD_SECRET_DPD_DELIS_ID"
        );
    }

    #[test]
    fn test_legacy_secret_path_to_env_var() {
        assert_eq!(legacy_secret_path_to_env_var("dpd.password"), "DPD_PASSWORD");
        assert_eq!(legacy_secret_path_to_env_var("password"), "PASSWORD");
    }

    #[test]
    fn test_is_secret_path() {
        assert!(is_secret_path("dpd.password"));
        assert!(is_secret_path("dpd.delis_id"));
        assert!(is_secret_path("dpd.customer_number"));
        assert!(!is_secret_path("server.host"));
        assert!(!is_secret_path("dpd.message_language"));
    }

    #[test]
    fn test_inject_env_vars_replaces_marker() {
        env::set_var("DPD_SECRET_TESTSVC_PASSWORD", "hunter2");
        let mut value = serde_json::json!({
            "testsvc": { "password": "secret_from_env", "host": "localhost" }
        });

        assert!(inject_env_vars(&mut value));
        assert_eq!(value["testsvc"]["password"], "hunter2");
        assert_eq!(value["testsvc"]["host"], "localhost");
        env::remove_var("DPD_SECRET_TESTSVC_PASSWORD");
    }

    #[test]
    fn test_inject_env_vars_leaves_unresolved_marker() {
        let mut value = serde_json::json!({ "nosuchsvc": { "token": "secret_from_env" } });
        assert!(!inject_env_vars(&mut value));
        assert_eq!(value["nosuchsvc"]["token"], SECRET_MARKER);
    }
}
