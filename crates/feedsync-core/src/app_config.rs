use std::path::PathBuf;

pub const DEFAULT_API_VERSION: &str = "2025-04";
pub const DEFAULT_OUTPUT_PATH: &str = "feed.xml";

#[derive(Clone)]
pub struct AppConfig {
    pub shopify_access_token: String,
    pub store_name: String,
    pub api_version: String,
    /// Admin API root, always ending in `/` (e.g.
    /// `https://shop.myshopify.com/admin/api/2025-04/`).
    pub api_base_url: String,
    /// Public storefront origin used to build per-variant product links.
    pub storefront_url: String,
    pub output_path: PathBuf,
    pub include_generated_at: bool,
    pub publish_partial: bool,
    pub git_pull_rebase: bool,
    pub git_skip_unchanged: bool,
    pub request_timeout_secs: u64,
    pub git_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("shopify_access_token", &"[redacted]")
            .field("store_name", &self.store_name)
            .field("api_version", &self.api_version)
            .field("api_base_url", &self.api_base_url)
            .field("storefront_url", &self.storefront_url)
            .field("output_path", &self.output_path)
            .field("include_generated_at", &self.include_generated_at)
            .field("publish_partial", &self.publish_partial)
            .field("git_pull_rebase", &self.git_pull_rebase)
            .field("git_skip_unchanged", &self.git_skip_unchanged)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("git_timeout_secs", &self.git_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
