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

/// Returns a map with all required env vars populated with valid values.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("SHOPIFY_ACCESS_TOKEN", "shpat_test");
    m.insert("FEEDSYNC_STORE_NAME", "example-shop");
    m.insert("FEEDSYNC_STOREFRONT_URL", "https://example.com");
    m
}

#[test]
fn build_app_config_fails_without_access_token() {
    let mut map = full_env();
    map.remove("SHOPIFY_ACCESS_TOKEN");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOPIFY_ACCESS_TOKEN"),
        "expected MissingEnvVar(SHOPIFY_ACCESS_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_access_token_as_missing() {
    let mut map = full_env();
    map.insert("SHOPIFY_ACCESS_TOKEN", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SHOPIFY_ACCESS_TOKEN"),
        "expected MissingEnvVar(SHOPIFY_ACCESS_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_store_name() {
    let mut map = full_env();
    map.remove("FEEDSYNC_STORE_NAME");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "FEEDSYNC_STORE_NAME"),
        "expected MissingEnvVar(FEEDSYNC_STORE_NAME), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_storefront_url() {
    let mut map = full_env();
    map.remove("FEEDSYNC_STOREFRONT_URL");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "FEEDSYNC_STOREFRONT_URL"),
        "expected MissingEnvVar(FEEDSYNC_STOREFRONT_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.shopify_access_token, "shpat_test");
    assert_eq!(cfg.store_name, "example-shop");
    assert_eq!(cfg.api_version, "2025-04");
    assert_eq!(
        cfg.api_base_url,
        "https://example-shop.myshopify.com/admin/api/2025-04/"
    );
    assert_eq!(cfg.storefront_url, "https://example.com");
    assert_eq!(cfg.output_path.to_str(), Some("feed.xml"));
    assert!(cfg.include_generated_at);
    assert!(!cfg.publish_partial);
    assert!(cfg.git_pull_rebase);
    assert!(cfg.git_skip_unchanged);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.git_timeout_secs, 120);
    assert_eq!(cfg.user_agent, "feedsync/0.1 (catalog-feed)");
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn api_version_override_flows_into_base_url() {
    let mut map = full_env();
    map.insert("FEEDSYNC_API_VERSION", "2024-10");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.api_base_url,
        "https://example-shop.myshopify.com/admin/api/2024-10/"
    );
}

#[test]
fn api_base_url_override_is_normalized_to_one_trailing_slash() {
    let mut map = full_env();
    map.insert("FEEDSYNC_API_BASE_URL", "http://127.0.0.1:9000/admin//");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:9000/admin/");
}

#[test]
fn api_base_url_override_rejects_relative_url() {
    let mut map = full_env();
    map.insert("FEEDSYNC_API_BASE_URL", "/admin/api");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FEEDSYNC_API_BASE_URL"),
        "expected InvalidEnvVar(FEEDSYNC_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn storefront_url_trailing_slash_is_stripped() {
    let mut map = full_env();
    map.insert("FEEDSYNC_STOREFRONT_URL", "https://example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.storefront_url, "https://example.com");
}

#[test]
fn storefront_url_without_scheme_is_invalid() {
    let mut map = full_env();
    map.insert("FEEDSYNC_STOREFRONT_URL", "example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FEEDSYNC_STOREFRONT_URL"),
        "expected InvalidEnvVar(FEEDSYNC_STOREFRONT_URL), got: {result:?}"
    );
}

#[test]
fn boolean_flags_accept_common_spellings() {
    let mut map = full_env();
    map.insert("FEEDSYNC_INCLUDE_GENERATED_AT", "no");
    map.insert("FEEDSYNC_PUBLISH_PARTIAL", "YES");
    map.insert("FEEDSYNC_GIT_PULL_REBASE", "0");
    map.insert("FEEDSYNC_GIT_SKIP_UNCHANGED", "False");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(!cfg.include_generated_at);
    assert!(cfg.publish_partial);
    assert!(!cfg.git_pull_rebase);
    assert!(!cfg.git_skip_unchanged);
}

#[test]
fn boolean_flag_rejects_garbage() {
    let mut map = full_env();
    map.insert("FEEDSYNC_PUBLISH_PARTIAL", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FEEDSYNC_PUBLISH_PARTIAL"),
        "expected InvalidEnvVar(FEEDSYNC_PUBLISH_PARTIAL), got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = full_env();
    map.insert("FEEDSYNC_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_invalid() {
    let mut map = full_env();
    map.insert("FEEDSYNC_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FEEDSYNC_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(FEEDSYNC_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn git_timeout_invalid() {
    let mut map = full_env();
    map.insert("FEEDSYNC_GIT_TIMEOUT_SECS", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FEEDSYNC_GIT_TIMEOUT_SECS"),
        "expected InvalidEnvVar(FEEDSYNC_GIT_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn output_path_override() {
    let mut map = full_env();
    map.insert("FEEDSYNC_OUTPUT_PATH", "public/products.xml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.output_path.to_str(), Some("public/products.xml"));
}

#[test]
fn debug_output_redacts_access_token() {
    let cfg = build_app_config(lookup_from_map(&full_env())).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("shpat_test"), "token leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}
