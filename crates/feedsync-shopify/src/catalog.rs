//! Result of a full catalog walk.

use crate::error::ShopifyError;
use crate::types::ShopifyProduct;

/// Outcome of [`crate::ShopifyClient::fetch_all_products`].
///
/// A walk that stops early keeps the products gathered so far together with
/// the error that stopped it, so the caller decides whether a partial catalog
/// is still worth publishing.
#[derive(Debug)]
pub enum CatalogFetch {
    /// Every page was read until the API returned an empty page.
    Complete(Vec<ShopifyProduct>),
    /// The walk was cut short by `cause`; `products` holds the earlier pages.
    Partial {
        products: Vec<ShopifyProduct>,
        cause: ShopifyError,
    },
}

impl CatalogFetch {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    #[must_use]
    pub fn products(&self) -> &[ShopifyProduct] {
        match self {
            Self::Complete(products) | Self::Partial { products, .. } => products,
        }
    }

    /// The error that ended a partial walk, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&ShopifyError> {
        match self {
            Self::Complete(_) => None,
            Self::Partial { cause, .. } => Some(cause),
        }
    }

    #[must_use]
    pub fn into_products(self) -> Vec<ShopifyProduct> {
        match self {
            Self::Complete(products) | Self::Partial { products, .. } => products,
        }
    }
}
