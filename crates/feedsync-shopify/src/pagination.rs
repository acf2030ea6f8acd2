//! `since_id` cursor pagination for the Admin API `products.json` endpoint.
//!
//! The Admin API returns products ordered ascending by `id` when a `since_id`
//! filter is present, so the id of the last product on a page is the
//! exclusive lower bound for the next page. An empty page ends the walk.

use crate::error::ShopifyError;

/// Maximum page size accepted by the Admin API.
pub const PAGE_LIMIT: u32 = 250;

/// Field projection requested on every page to keep payloads small.
pub const PRODUCT_FIELDS: &str =
    "id,handle,product_type,title,body_html,options,images,variants,vendor";

/// Computes the cursor for the page after one whose last product id is
/// `last_id`.
///
/// # Errors
///
/// Returns [`ShopifyError::CursorStalled`] when `last_id` does not move past
/// `since_id`. Following such a cursor would request the same page forever.
pub fn next_since_id(since_id: i64, last_id: i64) -> Result<i64, ShopifyError> {
    if last_id > since_id {
        Ok(last_id)
    } else {
        Err(ShopifyError::CursorStalled { since_id, last_id })
    }
}
