use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::favorite_pizzas::{FavoritePizzaList, FavoritePizzaRequest, UpdateFavoritePizzaRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{FavoritePizza, FavoritePizzaDetails},
    response::{ApiResponse, CountData},
    routes::params::FavoritePizzaQuery,
    services::favorite_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorite_pizzas).post(create_favorite_pizza))
        .route("/count", get(count_favorite_pizzas))
        .route(
            "/{id}",
            get(get_favorite_pizza)
                .patch(update_favorite_pizza)
                .put(replace_favorite_pizza)
                .delete(delete_favorite_pizza),
        )
}

#[utoipa::path(
    get,
    path = "/api/favorite-pizzas",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20, max 100"),
        ("name" = Option<String>, Query, description = "Case-insensitive name search"),
        ("sauce_id" = Option<i32>, Query, description = "Filter by sauce"),
        ("dough_id" = Option<i32>, Query, description = "Filter by dough"),
        ("size_id" = Option<i32>, Query, description = "Filter by size"),
        ("sort_order" = Option<String>, Query, description = "asc or desc by creation time, default desc"),
    ),
    responses(
        (status = 200, description = "Caller's favorite pizzas", body = ApiResponse<FavoritePizzaList>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorite pizzas"
)]
pub async fn list_favorite_pizzas(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<FavoritePizzaQuery>,
) -> AppResult<Json<ApiResponse<FavoritePizzaList>>> {
    let resp = favorite_service::list_favorites(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/favorite-pizzas/count",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive name search"),
        ("sauce_id" = Option<i32>, Query, description = "Filter by sauce"),
        ("dough_id" = Option<i32>, Query, description = "Filter by dough"),
        ("size_id" = Option<i32>, Query, description = "Filter by size"),
    ),
    responses(
        (status = 200, description = "Number of caller's favorite pizzas", body = ApiResponse<CountData>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorite pizzas"
)]
pub async fn count_favorite_pizzas(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<FavoritePizzaQuery>,
) -> AppResult<Json<ApiResponse<CountData>>> {
    let resp = favorite_service::count_favorites(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/favorite-pizzas",
    request_body = FavoritePizzaRequest,
    responses(
        (status = 200, description = "Favorite pizza created", body = ApiResponse<FavoritePizza>),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorite pizzas"
)]
pub async fn create_favorite_pizza(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<FavoritePizzaRequest>,
) -> AppResult<Json<ApiResponse<FavoritePizza>>> {
    let resp = favorite_service::create_favorite(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/favorite-pizzas/{id}",
    params(
        ("id" = Uuid, Path, description = "Favorite pizza ID")
    ),
    responses(
        (status = 200, description = "Favorite pizza with sauce, dough and size", body = ApiResponse<FavoritePizzaDetails>),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "Favorite pizza not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorite pizzas"
)]
pub async fn get_favorite_pizza(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FavoritePizzaDetails>>> {
    let resp = favorite_service::get_favorite(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/favorite-pizzas/{id}",
    params(
        ("id" = Uuid, Path, description = "Favorite pizza ID")
    ),
    request_body = UpdateFavoritePizzaRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "Favorite pizza not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorite pizzas"
)]
pub async fn update_favorite_pizza(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFavoritePizzaRequest>,
) -> AppResult<StatusCode> {
    favorite_service::update_favorite(&state, &user, id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/favorite-pizzas/{id}",
    params(
        ("id" = Uuid, Path, description = "Favorite pizza ID")
    ),
    request_body = FavoritePizzaRequest,
    responses(
        (status = 204, description = "Replaced"),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "Favorite pizza not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorite pizzas"
)]
pub async fn replace_favorite_pizza(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<FavoritePizzaRequest>,
) -> AppResult<StatusCode> {
    favorite_service::replace_favorite(&state, &user, id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/favorite-pizzas/{id}",
    params(
        ("id" = Uuid, Path, description = "Favorite pizza ID")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Owned by another user"),
        (status = 404, description = "Favorite pizza not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorite pizzas"
)]
pub async fn delete_favorite_pizza(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    favorite_service::delete_favorite(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
