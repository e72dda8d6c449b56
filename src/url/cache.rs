//! Per-request cache of the decoded navigation state.
//!
//! The state lives in the request's `Extensions` under a private key type,
//! so it is dropped together with the request and nothing else can collide
//! with or overwrite it.

use axum::http::Extensions;
use std::sync::Arc;

use crate::observability::metrics;
use crate::url::error::UrlError;
use crate::url::state::NavigationState;

#[derive(Debug, Clone)]
struct CachedNavigationState(Arc<NavigationState>);

/// Previously decoded state for this request, if any.
pub fn cached(extensions: &Extensions) -> Option<Arc<NavigationState>> {
    extensions
        .get::<CachedNavigationState>()
        .map(|cached| Arc::clone(&cached.0))
}

/// Store a decoded state, replacing any earlier one.
pub fn store(extensions: &mut Extensions, state: NavigationState) -> Arc<NavigationState> {
    let state = Arc::new(state);
    extensions.insert(CachedNavigationState(Arc::clone(&state)));
    state
}

/// Return the cached state, or run `decode` once and cache its result.
/// Failures are not cached.
pub fn get_or_decode<F>(
    extensions: &mut Extensions,
    decode: F,
) -> Result<Arc<NavigationState>, UrlError>
where
    F: FnOnce() -> Result<NavigationState, UrlError>,
{
    if let Some(state) = cached(extensions) {
        metrics::record_cache_hit();
        return Ok(state);
    }
    let state = decode()?;
    Ok(store(extensions, state))
}
