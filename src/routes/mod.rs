//! Router assembly: operational routes and the mall resource.

pub mod common;
pub mod mall;

pub use common::common_routes;
pub use mall::mall_routes;

use crate::state::AppState;
use axum::Router;

/// Full application router: common routes at the root, mall routes under `base_path`.
pub fn app(state: AppState, base_path: &str) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(mall_routes(state, base_path))
}
