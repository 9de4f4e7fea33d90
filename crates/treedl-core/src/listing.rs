//! Tree Lister: one GET of the recursive tree listing.

use crate::error::{FetchError, Result};
use crate::transport::Transport;
use crate::tree::{TreeEntry, TreeListing};

/// Fetches `listing_url` and returns the `tree` array in server order.
///
/// A transport failure, non-2xx status, or body that does not match
/// `{"tree": [{"path", "type", "url"}, ...]}` is returned as is; there is no
/// retry and no partial result.
pub fn list_tree<T: Transport + ?Sized>(transport: &T, listing_url: &str) -> Result<Vec<TreeEntry>> {
    let body = transport.get(listing_url)?;
    let listing: TreeListing =
        serde_json::from_slice(&body).map_err(|source| FetchError::Parse {
            url: listing_url.to_string(),
            source,
        })?;
    if listing.truncated {
        tracing::warn!(
            url = listing_url,
            entries = listing.tree.len(),
            "tree listing is truncated; only the returned entries will be downloaded"
        );
    }
    tracing::info!(url = listing_url, entries = listing.tree.len(), "listed tree");
    Ok(listing.tree)
}
