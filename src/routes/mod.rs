use axum::Router;

use crate::state::AppState;

pub mod addresses;
pub mod auth;
pub mod catalog;
pub mod doc;
pub mod favorite_pizzas;
pub mod health;
pub mod orders;
pub mod params;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .nest("/auth", auth::router())
        .nest("/favorite-pizzas", favorite_pizzas::router())
        .nest("/addresses", addresses::router())
        .nest("/orders", orders::router())
}
