//! Flat feed records, one per eligible variant.

/// A dynamically named child element of a `<product>` (option attributes
/// and image links).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTag {
    /// Element name, already a valid XML name.
    pub name: String,
    pub value: String,
}

/// One `<product>` element of the shopping feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// Product title plus an optional `" - Red / M"` variant suffix.
    pub name: String,
    pub sku: String,
    /// Storefront link that preselects the variant.
    pub url: String,
    /// Trimmed vendor.
    pub brand: String,
    /// One tag per real option value, in declared option order.
    pub attribute_tags: Vec<FeedTag>,
    /// `imgUrl`, `imgUrl1`, `imgUrl2`, ... in source image order.
    pub image_urls: Vec<FeedTag>,
    pub category: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
}

/// Constant trailing fields required by the feed format, in output order.
/// `distributor` is always empty.
pub const FIXED_FIELDS: [(&str, &str); 5] = [
    ("shipPrice", "0"),
    ("distributor", ""),
    ("shipmentVolume", "[price1kdvli]"),
    ("dayOfDelivery", "0"),
    ("expressDeliveryTime", "13"),
];

/// Element names the feed itself uses. Option-derived tags must not reuse
/// them.
pub(crate) const FIXED_ELEMENT_NAMES: [&str; 15] = [
    "products",
    "product",
    "name",
    "sku",
    "url",
    "brand",
    "productCategory",
    "description",
    "price",
    "quantity",
    "shipPrice",
    "distributor",
    "shipmentVolume",
    "dayOfDelivery",
    "expressDeliveryTime",
];
