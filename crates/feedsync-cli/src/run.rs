//! The feed pipeline: fetch, transform, serialize, write, publish.
//!
//! A partial catalog never reaches the feed file unless
//! `FEEDSYNC_PUBLISH_PARTIAL` allows it.

use chrono::Utc;

use feedsync_feed::FeedOptions;
use feedsync_shopify::{CatalogFetch, ShopifyProduct};

use crate::RunArgs;

/// Runs one full feed update.
///
/// # Errors
///
/// Returns an error if the Shopify client cannot be built, the catalog is
/// partial and partial publishing is disabled, or writing or publishing the
/// feed fails.
pub(crate) async fn run_pipeline(
    config: &feedsync_core::AppConfig,
    args: &RunArgs,
) -> anyhow::Result<()> {
    let client = feedsync_shopify::ShopifyClient::new(config)
        .map_err(|e| anyhow::anyhow!("failed to build Shopify client: {e}"))?;

    let fetch = client.fetch_all_products().await;
    let products = accept_catalog(fetch, config.publish_partial || args.dry_run)?;

    let generated_at = Utc::now();
    let options = FeedOptions {
        storefront_url: config.storefront_url.clone(),
    };
    let entries = feedsync_feed::build_feed(&products, &options);

    if args.dry_run {
        println!(
            "dry-run: {} products fetched, {} feed entries; nothing written",
            products.len(),
            entries.len()
        );
        return Ok(());
    }

    let xml = feedsync_feed::render_feed(
        &entries,
        config.include_generated_at.then_some(generated_at),
    )?;
    let output = args.output.as_ref().unwrap_or(&config.output_path);
    feedsync_publish::write_feed(output, &xml).await?;

    if args.no_publish {
        tracing::info!(
            products = products.len(),
            entries = entries.len(),
            path = %output.display(),
            "feed written; publishing skipped"
        );
        return Ok(());
    }

    let outcome = feedsync_publish::GitPublisher::from_config(config)
        .publish(output, generated_at)
        .await?;

    tracing::info!(
        products = products.len(),
        entries = entries.len(),
        outcome = ?outcome,
        "feed update complete"
    );
    Ok(())
}

/// Unwraps a catalog fetch, rejecting a partial one unless `allow_partial`.
pub(crate) fn accept_catalog(
    fetch: CatalogFetch,
    allow_partial: bool,
) -> anyhow::Result<Vec<ShopifyProduct>> {
    match fetch {
        CatalogFetch::Complete(products) => Ok(products),
        CatalogFetch::Partial { products, cause } if allow_partial => {
            tracing::warn!(
                products = products.len(),
                error = %cause,
                "catalog fetch incomplete; continuing with partial catalog"
            );
            Ok(products)
        }
        CatalogFetch::Partial { products, cause } => Err(anyhow::anyhow!(
            "catalog fetch stopped after {} products: {cause}; \
             feed left untouched (set FEEDSYNC_PUBLISH_PARTIAL=true to publish anyway)",
            products.len()
        )),
    }
}
