//! Shared application state for all routes.

use crate::guard::AccessGuard;
use crate::store::MallStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MallStore>,
    /// Checked by every mutating route.
    pub guard: AccessGuard,
}

impl AppState {
    pub fn new(store: Arc<dyn MallStore>, guard: AccessGuard) -> Self {
        AppState { store, guard }
    }
}
