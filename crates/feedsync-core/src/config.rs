use crate::app_config::{AppConfig, DEFAULT_API_VERSION, DEFAULT_OUTPUT_PATH};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    // Blank values count as missing: an exported-but-empty token must not
    // reach the network layer.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_flag = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Ok(raw) => parse_bool(var, &raw),
            Err(_) => Ok(default),
        }
    };

    let shopify_access_token = require("SHOPIFY_ACCESS_TOKEN")?;
    let store_name = require("FEEDSYNC_STORE_NAME")?;
    let storefront_url = parse_http_url(
        "FEEDSYNC_STOREFRONT_URL",
        &require("FEEDSYNC_STOREFRONT_URL")?,
    )?;

    let api_version = or_default("FEEDSYNC_API_VERSION", DEFAULT_API_VERSION);
    let api_base_url = match lookup("FEEDSYNC_API_BASE_URL") {
        Ok(raw) => format!(
            "{}/",
            parse_http_url("FEEDSYNC_API_BASE_URL", &raw)?.trim_end_matches('/')
        ),
        Err(_) => format!("https://{store_name}.myshopify.com/admin/api/{api_version}/"),
    };

    let output_path = PathBuf::from(or_default("FEEDSYNC_OUTPUT_PATH", DEFAULT_OUTPUT_PATH));
    let include_generated_at = parse_flag("FEEDSYNC_INCLUDE_GENERATED_AT", true)?;
    let publish_partial = parse_flag("FEEDSYNC_PUBLISH_PARTIAL", false)?;
    let git_pull_rebase = parse_flag("FEEDSYNC_GIT_PULL_REBASE", true)?;
    let git_skip_unchanged = parse_flag("FEEDSYNC_GIT_SKIP_UNCHANGED", true)?;

    let request_timeout_secs = parse_u64("FEEDSYNC_REQUEST_TIMEOUT_SECS", "30")?;
    let git_timeout_secs = parse_u64("FEEDSYNC_GIT_TIMEOUT_SECS", "120")?;
    let user_agent = or_default("FEEDSYNC_USER_AGENT", "feedsync/0.1 (catalog-feed)");
    let log_level = or_default("FEEDSYNC_LOG_LEVEL", "info");

    Ok(AppConfig {
        shopify_access_token,
        store_name,
        api_version,
        api_base_url,
        storefront_url,
        output_path,
        include_generated_at,
        publish_partial,
        git_pull_rebase,
        git_skip_unchanged,
        request_timeout_secs,
        git_timeout_secs,
        user_agent,
        log_level,
    })
}

/// Parse a boolean flag. Accepts `true/false`, `1/0`, `yes/no` (any case).
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

/// Validate that `raw` looks like an absolute http(s) URL and strip any
/// trailing slash.
fn parse_http_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('/'));
    if !has_host {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("\"{trimmed}\" is not an absolute http(s) URL"),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
