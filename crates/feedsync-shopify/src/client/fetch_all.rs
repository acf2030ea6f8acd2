//! Multi-page catalog walk for `ShopifyClient`.

use crate::catalog::CatalogFetch;
use crate::error::ShopifyError;
use crate::pagination::next_since_id;
use crate::types::ShopifyProduct;

use super::ShopifyClient;
use super::MAX_PAGES;

impl ShopifyClient {
    /// Fetches the whole catalog by walking `since_id` pages until the API
    /// returns an empty page.
    ///
    /// Products are returned in retrieval order. Each page is attempted once;
    /// the first failure ends the walk and is reported as
    /// [`CatalogFetch::Partial`] together with the products read so far.
    /// A walk longer than [`MAX_PAGES`] or a cursor that stops advancing is
    /// treated the same way.
    pub async fn fetch_all_products(&self) -> CatalogFetch {
        let mut products: Vec<ShopifyProduct> = Vec::new();
        let mut since_id = 0i64;
        let mut page_count = 0usize;

        loop {
            if page_count >= MAX_PAGES {
                return partial(
                    products,
                    ShopifyError::PaginationLimit {
                        max_pages: MAX_PAGES,
                    },
                );
            }
            page_count += 1;

            let page = match self.fetch_products_page(since_id).await {
                Ok(page) => page,
                Err(err) => return partial(products, err),
            };

            let Some(last) = page.last() else {
                break;
            };

            since_id = match next_since_id(since_id, last.id) {
                Ok(next) => next,
                Err(err) => return partial(products, err),
            };

            tracing::debug!(
                page = page_count,
                page_products = page.len(),
                since_id,
                "fetched products page"
            );
            products.extend(page);
        }

        tracing::info!(
            products = products.len(),
            pages = page_count,
            "catalog fetch complete"
        );
        CatalogFetch::Complete(products)
    }
}

fn partial(products: Vec<ShopifyProduct>, cause: ShopifyError) -> CatalogFetch {
    match &cause {
        ShopifyError::Unauthorized { .. } => tracing::error!(
            error = %cause,
            products = products.len(),
            "catalog fetch rejected (401); check SHOPIFY_ACCESS_TOKEN and its scopes"
        ),
        _ => tracing::error!(
            error = %cause,
            products = products.len(),
            "catalog fetch stopped early; returning partial catalog"
        ),
    }
    CatalogFetch::Partial { products, cause }
}
