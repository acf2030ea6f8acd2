//! Shopify Admin API response types for `GET /admin/api/{version}/products.json`.
//!
//! Only the projected fields (`id,handle,product_type,title,body_html,
//! options,images,variants,vendor`) are modelled. Anything the Admin API may
//! send as `null` is an `Option`; missing arrays default to empty.
//!
//! ### `price`
//! A decimal string (`"29.90"`). Kept as text here and parsed by the feed
//! transformer, so one malformed price does not fail a whole page. A bare
//! JSON number is accepted and converted to its textual form.
//!
//! ### `option1` / `option2` / `option3`
//! Positional values for `product.options[0..3]`. Products without a real
//! variation axis carry a single option `"Title"` whose value is
//! `"Default Title"`.

use serde::{Deserialize, Deserializer};

/// Top-level response from `GET products.json`.
#[derive(Debug, Deserialize)]
pub struct ShopifyProductsResponse {
    #[serde(default)]
    pub products: Vec<ShopifyProduct>,
}

/// A single product from the Admin API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopifyProduct {
    /// Numeric product ID. Pages are ordered ascending by this value.
    pub id: i64,

    /// URL slug for the product page (e.g. `"linen-shirt"`).
    #[serde(default)]
    pub handle: String,

    #[serde(default)]
    pub title: String,

    /// Raw HTML description.
    #[serde(default)]
    pub body_html: Option<String>,

    #[serde(default)]
    pub product_type: Option<String>,

    /// Brand as configured in the admin. Frequently carries stray whitespace.
    #[serde(default)]
    pub vendor: Option<String>,

    /// Declared variation axes, positionally matched to `option1..3`.
    #[serde(default)]
    pub options: Vec<ShopifyOption>,

    #[serde(default)]
    pub images: Vec<ShopifyImage>,

    #[serde(default)]
    pub variants: Vec<ShopifyVariant>,
}

/// A declared variation axis (e.g. `Color`, `Size`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopifyOption {
    #[serde(default)]
    pub name: Option<String>,
}

/// A product image. Only the CDN URL is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopifyImage {
    #[serde(default)]
    pub src: Option<String>,
}

/// A single purchasable variant of a [`ShopifyProduct`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopifyVariant {
    pub id: i64,

    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default, deserialize_with = "deserialize_decimal_text")]
    pub price: Option<String>,

    #[serde(default)]
    pub inventory_quantity: Option<i64>,

    #[serde(default)]
    pub option1: Option<String>,

    #[serde(default)]
    pub option2: Option<String>,

    #[serde(default)]
    pub option3: Option<String>,
}

impl ShopifyVariant {
    /// Returns the option value at zero-based `position` (`0` → `option1`).
    ///
    /// The Admin API only has three option slots; anything beyond is `None`.
    #[must_use]
    pub fn option_value(&self, position: usize) -> Option<&str> {
        match position {
            0 => self.option1.as_deref(),
            1 => self.option2.as_deref(),
            2 => self.option3.as_deref(),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalText {
    Text(String),
    Number(serde_json::Number),
}

fn deserialize_decimal_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<DecimalText>::deserialize(deserializer)?.map(|value| match value {
            DecimalText::Text(text) => text,
            DecimalText::Number(number) => number.to_string(),
        }),
    )
}
