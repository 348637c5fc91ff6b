//! Mall routes under the configured base path.
//! Static segments take priority over `/:id`, so `/cantidad` and `/listaNombres` never reach the id routes.

use crate::handlers::mall::{
    count, create, delete as delete_handler, get_by_id, get_by_location, get_by_name, list_all,
    list_by_min_score, list_by_restaurants, list_by_score, list_names, update,
};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

/// `base_path` must start with `/` and have no trailing slash (see `normalize_base_path`).
/// The listing answers both with and without the trailing slash.
pub fn mall_routes(state: AppState, base_path: &str) -> Router {
    let at = |p: &str| format!("{}{}", base_path, p);
    Router::new()
        .route(&at(""), get(list_all))
        .route(&at("/"), get(list_all))
        .route(&at("/id/:id"), get(get_by_id))
        .route(&at("/nombre/:nombre"), get(get_by_name))
        .route(&at("/puntuacion/:puntuacion"), get(list_by_score))
        .route(&at("/ubicacion/:ubicacion"), get(get_by_location))
        .route(&at("/restaurantes/:restaurantes"), get(list_by_restaurants))
        .route(&at("/listaNombres"), get(list_names))
        .route(&at("/cantidad"), get(count))
        .route(&at("/puntuacionMinima/:puntuacionMinima"), get(list_by_min_score))
        .route(&at("/post"), post(create))
        .route(&at("/:id"), put(update).delete(delete_handler))
        .with_state(state)
}
