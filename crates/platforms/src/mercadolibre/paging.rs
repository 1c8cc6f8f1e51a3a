//! Offset pagination for Mercado Libre.
//!
//! The neutral contract is an opaque token; on this platform the token is a
//! stringified numeric offset. `None` in means the first page, `None` out
//! means the result set is exhausted.

use orderhub_core::OrderQuery;

use crate::error::IntegrationError;

/// The platform rejects pages larger than this.
pub(crate) const MAX_PAGE_SIZE: u32 = 51;
/// Limit used when the caller does not specify a page size.
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 50;

/// Translate the neutral page request into a `(limit, offset)` pair.
pub(crate) fn resolve_page(query: &OrderQuery) -> Result<(u32, u32), IntegrationError> {
    let limit = if query.page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        query.page_size
    };
    if limit > MAX_PAGE_SIZE {
        return Err(IntegrationError::InvalidPageParams(format!(
            "page size {limit} exceeds the Mercado Libre maximum of {MAX_PAGE_SIZE}"
        )));
    }

    let offset = match query.page_token.as_deref().filter(|t| !t.is_empty()) {
        None => 0,
        Some(token) => token.parse().map_err(|_| {
            IntegrationError::InvalidPageParams(format!(
                "page token {token:?} is not a numeric offset"
            ))
        })?,
    };

    Ok((limit, offset))
}

/// Compute the next opaque token from the paging block the platform echoes
/// back. `None` when the window has reached the total.
pub(crate) fn next_page_token(offset: u32, limit: u32, total: u32) -> Option<String> {
    (offset + limit < total).then(|| (offset + limit).to_string())
}
