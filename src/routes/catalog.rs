//! Public catalog lists the pizza builder is populated from.

use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult,
    models::{Dough, Ingredient, Misc, Sauce, Size},
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dough", get(list_dough))
        .route("/sizes", get(list_sizes))
        .route("/sauces", get(list_sauces))
        .route("/ingredients", get(list_ingredients))
        .route("/misc", get(list_misc))
}

#[utoipa::path(
    get,
    path = "/api/dough",
    responses((status = 200, description = "Dough types", body = ApiResponse<Vec<Dough>>)),
    tag = "Catalog"
)]
pub async fn list_dough(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Dough>>>> {
    Ok(Json(catalog_service::list_dough(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/sizes",
    responses((status = 200, description = "Pizza sizes", body = ApiResponse<Vec<Size>>)),
    tag = "Catalog"
)]
pub async fn list_sizes(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Size>>>> {
    Ok(Json(catalog_service::list_sizes(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/sauces",
    responses((status = 200, description = "Sauces", body = ApiResponse<Vec<Sauce>>)),
    tag = "Catalog"
)]
pub async fn list_sauces(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Sauce>>>> {
    Ok(Json(catalog_service::list_sauces(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    responses((status = 200, description = "Ingredients", body = ApiResponse<Vec<Ingredient>>)),
    tag = "Catalog"
)]
pub async fn list_ingredients(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Ingredient>>>> {
    Ok(Json(catalog_service::list_ingredients(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/misc",
    responses((status = 200, description = "Drinks, sides and desserts", body = ApiResponse<Vec<Misc>>)),
    tag = "Catalog"
)]
pub async fn list_misc(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Misc>>>> {
    Ok(Json(catalog_service::list_misc(&state).await?))
}
