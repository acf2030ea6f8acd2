pub mod catalog;
pub mod client;
pub mod error;
pub mod pagination;
pub mod types;

pub use catalog::CatalogFetch;
pub use client::ShopifyClient;
pub use error::ShopifyError;
pub use types::{
    ShopifyImage, ShopifyOption, ShopifyProduct, ShopifyProductsResponse, ShopifyVariant,
};
