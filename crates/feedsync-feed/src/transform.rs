//! Conversion from raw Admin API products to flat [`FeedEntry`] records.
//!
//! Every variant is judged on its own: price and stock decide eligibility,
//! and the product's declared options are paired with the variant's
//! positional `option1..3` values to build the display name suffix and the
//! attribute tags.

use std::str::FromStr;

use feedsync_shopify::{ShopifyProduct, ShopifyVariant};
use rust_decimal::Decimal;

use crate::entry::{FeedEntry, FeedTag};
use crate::tag_name::{image_tag_name, sanitize_tag_name};

/// Option value Shopify uses for "no real variation".
pub const PLACEHOLDER_OPTION_VALUE: &str = "Default Title";

/// Variants priced below this are left out of the feed.
pub const MIN_PRICE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Inputs to [`build_feed`] that do not come from the catalog.
#[derive(Debug, Clone)]
pub struct FeedOptions {
    /// Public storefront origin, without trailing slash.
    pub storefront_url: String,
}

/// Builds one [`FeedEntry`] per eligible variant.
///
/// Entries follow input product order, then variant order within each
/// product. Nothing is sorted or deduplicated, and the result depends only on
/// the inputs.
#[must_use]
pub fn build_feed(products: &[ShopifyProduct], options: &FeedOptions) -> Vec<FeedEntry> {
    let mut entries = Vec::new();
    let mut variant_count = 0usize;

    for product in products {
        for variant in &product.variants {
            variant_count += 1;
            if let Some(entry) = build_entry(product, variant, options) {
                entries.push(entry);
            }
        }
    }

    tracing::info!(
        products = products.len(),
        variants = variant_count,
        entries = entries.len(),
        skipped = variant_count - entries.len(),
        "built feed entries"
    );
    entries
}

/// A variant is listed only when it costs at least [`MIN_PRICE`] and at
/// least one unit is in stock.
#[must_use]
pub fn is_eligible(price: Decimal, quantity: i64) -> bool {
    price >= MIN_PRICE && quantity > 0
}

fn build_entry(
    product: &ShopifyProduct,
    variant: &ShopifyVariant,
    options: &FeedOptions,
) -> Option<FeedEntry> {
    let price = parse_price(variant);
    let quantity = variant.inventory_quantity.unwrap_or(0);
    if !is_eligible(price, quantity) {
        tracing::trace!(
            product_id = product.id,
            variant_id = variant.id,
            %price,
            quantity,
            "variant not eligible"
        );
        return None;
    }

    let pairs = option_pairs(product, variant);

    let labels: Vec<&str> = pairs.iter().map(|(_, value)| *value).collect();
    let name = if labels.is_empty() {
        product.title.clone()
    } else {
        format!("{} - {}", product.title, labels.join(" / "))
    };

    let mut attribute_tags: Vec<FeedTag> = Vec::with_capacity(pairs.len());
    for (option_name, value) in &pairs {
        let Some(name) = sanitize_tag_name(option_name) else {
            continue;
        };
        if attribute_tags.iter().any(|tag| tag.name == name) {
            tracing::debug!(
                product_id = product.id,
                variant_id = variant.id,
                option = *option_name,
                tag = %name,
                "option names collide after sanitizing; emitting repeated element"
            );
        }
        attribute_tags.push(FeedTag {
            name,
            value: (*value).to_owned(),
        });
    }

    let image_urls = product
        .images
        .iter()
        .enumerate()
        .filter_map(|(position, image)| {
            image
                .src
                .as_deref()
                .filter(|src| !src.is_empty())
                .map(|src| FeedTag {
                    name: image_tag_name(position),
                    value: src.to_owned(),
                })
        })
        .collect();

    Some(FeedEntry {
        name,
        sku: variant.sku.clone().unwrap_or_default(),
        url: variant_url(&options.storefront_url, &product.handle, variant.id),
        brand: product
            .vendor
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_owned(),
        attribute_tags,
        image_urls,
        category: product.product_type.clone().unwrap_or_default(),
        description: product.body_html.clone().unwrap_or_default(),
        price: price.to_string(),
        quantity: quantity.to_string(),
    })
}

/// Pairs each declared option name with the variant's value at the same
/// position, keeping only pairs whose trimmed name and value are non-empty
/// and whose value is not [`PLACEHOLDER_OPTION_VALUE`].
fn option_pairs<'a>(
    product: &'a ShopifyProduct,
    variant: &'a ShopifyVariant,
) -> Vec<(&'a str, &'a str)> {
    product
        .options
        .iter()
        .enumerate()
        .filter_map(|(position, option)| {
            let name = option.name.as_deref()?.trim();
            let value = variant.option_value(position)?.trim();
            if name.is_empty() || value.is_empty() || value == PLACEHOLDER_OPTION_VALUE {
                None
            } else {
                Some((name, value))
            }
        })
        .collect()
}

/// Missing, blank, or unparseable prices count as zero.
fn parse_price(variant: &ShopifyVariant) -> Decimal {
    let Some(raw) = variant.price.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Decimal::ZERO;
    };
    Decimal::from_str(raw).unwrap_or_else(|e| {
        tracing::debug!(
            variant_id = variant.id,
            price = raw,
            error = %e,
            "unparseable variant price; treating as 0"
        );
        Decimal::ZERO
    })
}

fn variant_url(storefront_url: &str, handle: &str, variant_id: i64) -> String {
    format!(
        "{}/products/{handle}?variant={variant_id}",
        storefront_url.trim_end_matches('/')
    )
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
