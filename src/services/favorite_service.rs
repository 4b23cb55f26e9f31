use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition,
    ConnectionTrait, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use uuid::Uuid;

use crate::{
    audit,
    dto::favorite_pizzas::{FavoritePizzaList, FavoritePizzaRequest, UpdateFavoritePizzaRequest},
    entity::{
        IngredientList,
        dough, sauces, sizes,
        favorite_pizzas::{ActiveModel, Column, Entity as FavoritePizzas, Model as FavoriteModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner},
    models::{FavoritePizza, FavoritePizzaDetails},
    response::{ApiResponse, CountData, Meta},
    routes::params::{FavoritePizzaQuery, SortOrder, contains_pattern},
    services::catalog_service::{self, CatalogRefs},
    state::AppState,
};

pub async fn list_favorites(
    state: &AppState,
    user: &AuthUser,
    query: FavoritePizzaQuery,
) -> AppResult<ApiResponse<FavoritePizzaList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut finder = FavoritePizzas::find().filter(owner_condition(user, &query));
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(Column::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(Column::CreatedAt),
    };

    let total = finder.clone().count(state.db()).await? as i64;
    let models = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(state.db())
        .await?;
    let items = with_relations(state.db(), models).await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("OK", FavoritePizzaList { items }, Some(meta)))
}

pub async fn count_favorites(
    state: &AppState,
    user: &AuthUser,
    query: FavoritePizzaQuery,
) -> AppResult<ApiResponse<CountData>> {
    let count = FavoritePizzas::find()
        .filter(owner_condition(user, &query))
        .count(state.db())
        .await?;
    Ok(ApiResponse::success("OK", CountData { count }, None))
}

pub async fn get_favorite(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<FavoritePizzaDetails>> {
    let model = load_owned(state.db(), user, id).await?;
    let details = with_relations(state.db(), vec![model])
        .await?
        .into_iter()
        .next()
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", details, Some(Meta::empty())))
}

pub async fn create_favorite(
    state: &AppState,
    user: &AuthUser,
    payload: FavoritePizzaRequest,
) -> AppResult<ApiResponse<FavoritePizza>> {
    validate_request(state.db(), &payload).await?;

    let model = ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: NotSet,
        ..replacement_model(user, payload)
    }
    .insert(state.db())
    .await?;

    audit::record(
        state.db(),
        user.user_id,
        "favorite_pizza_create",
        "favorite_pizzas",
        serde_json::json!({ "favorite_pizza_id": model.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Favorite pizza created",
        favorite_from_entity(model),
        Some(Meta::empty()),
    ))
}

pub async fn update_favorite(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateFavoritePizzaRequest,
) -> AppResult<()> {
    load_owned(state.db(), user, id).await?;

    if let Some(name) = &payload.name {
        validate_name(name)?;
    }
    if let Some(items) = &payload.ingredients {
        catalog_service::validate_ingredients(items)?;
    }
    catalog_service::ensure_references(
        state.db(),
        CatalogRefs {
            sauce_id: payload.sauce_id,
            dough_id: payload.dough_id,
            size_id: payload.size_id,
            ingredients: payload.ingredients.as_deref(),
        },
    )
    .await?;

    let mut active = ActiveModel::new();
    let mut changed = false;
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
        changed = true;
    }
    if let Some(sauce_id) = payload.sauce_id {
        active.sauce_id = Set(sauce_id);
        changed = true;
    }
    if let Some(dough_id) = payload.dough_id {
        active.dough_id = Set(dough_id);
        changed = true;
    }
    if let Some(size_id) = payload.size_id {
        active.size_id = Set(size_id);
        changed = true;
    }
    if let Some(items) = payload.ingredients {
        active.ingredients = Set(IngredientList(items));
        changed = true;
    }
    if !changed {
        return Ok(());
    }

    apply_owned_update(state.db(), user, id, active).await?;

    audit::record(
        state.db(),
        user.user_id,
        "favorite_pizza_update",
        "favorite_pizzas",
        serde_json::json!({ "favorite_pizza_id": id }),
    )
    .await;
    Ok(())
}

pub async fn replace_favorite(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: FavoritePizzaRequest,
) -> AppResult<()> {
    load_owned(state.db(), user, id).await?;
    validate_request(state.db(), &payload).await?;

    apply_owned_update(state.db(), user, id, replacement_model(user, payload)).await?;

    audit::record(
        state.db(),
        user.user_id,
        "favorite_pizza_replace",
        "favorite_pizzas",
        serde_json::json!({ "favorite_pizza_id": id }),
    )
    .await;
    Ok(())
}

pub async fn delete_favorite(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    load_owned(state.db(), user, id).await?;

    let result = FavoritePizzas::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::UserId.eq(user.user_id))
        .exec(state.db())
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state.db(),
        user.user_id,
        "favorite_pizza_delete",
        "favorite_pizzas",
        serde_json::json!({ "favorite_pizza_id": id }),
    )
    .await;
    Ok(())
}

/// Every writable column taken from `payload`, with the owner forced to the
/// caller. `id` and `created_at` stay untouched.
pub fn replacement_model(user: &AuthUser, payload: FavoritePizzaRequest) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        user_id: Set(user.user_id),
        name: Set(payload.name.trim().to_string()),
        sauce_id: Set(payload.sauce_id),
        dough_id: Set(payload.dough_id),
        size_id: Set(payload.size_id),
        ingredients: Set(IngredientList(payload.ingredients)),
        created_at: NotSet,
    }
}

/// Loads a favorite pizza for `user`: `NotFound` if it does not exist,
/// `Forbidden` if somebody else owns it.
pub async fn load_owned<C: ConnectionTrait>(
    db: &C,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<FavoriteModel> {
    let existing = FavoritePizzas::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner(existing.user_id, user)?;
    Ok(existing)
}

// The write carries the owner in its WHERE clause, so a row that changed
// hands or vanished after `load_owned` is not touched.
async fn apply_owned_update<C: ConnectionTrait>(
    db: &C,
    user: &AuthUser,
    id: Uuid,
    active: ActiveModel,
) -> AppResult<()> {
    let result = FavoritePizzas::update_many()
        .set(active)
        .filter(Column::Id.eq(id))
        .filter(Column::UserId.eq(user.user_id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

fn owner_condition(user: &AuthUser, query: &FavoritePizzaQuery) -> Condition {
    let mut condition = Condition::all();
    if let Some(name) = query.name.as_ref().filter(|s| !s.trim().is_empty()) {
        condition = condition.add(Expr::col(Column::Name).ilike(contains_pattern(name)));
    }
    if let Some(sauce_id) = query.sauce_id {
        condition = condition.add(Column::SauceId.eq(sauce_id));
    }
    if let Some(dough_id) = query.dough_id {
        condition = condition.add(Column::DoughId.eq(dough_id));
    }
    if let Some(size_id) = query.size_id {
        condition = condition.add(Column::SizeId.eq(size_id));
    }
    condition.add(Column::UserId.eq(user.user_id))
}

async fn validate_request<C: ConnectionTrait>(db: &C, payload: &FavoritePizzaRequest) -> AppResult<()> {
    validate_name(&payload.name)?;
    catalog_service::validate_ingredients(&payload.ingredients)?;
    catalog_service::ensure_references(
        db,
        CatalogRefs {
            sauce_id: Some(payload.sauce_id),
            dough_id: Some(payload.dough_id),
            size_id: Some(payload.size_id),
            ingredients: Some(&payload.ingredients),
        },
    )
    .await
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be blank".into()));
    }
    Ok(())
}

async fn with_relations<C: ConnectionTrait>(
    db: &C,
    models: Vec<FavoriteModel>,
) -> AppResult<Vec<FavoritePizzaDetails>> {
    let sauces = models.load_one(sauces::Entity, db).await?;
    let dough = models.load_one(dough::Entity, db).await?;
    let sizes = models.load_one(sizes::Entity, db).await?;

    let items = models
        .into_iter()
        .zip(sauces)
        .zip(dough)
        .zip(sizes)
        .map(|(((model, sauce), dough), size)| FavoritePizzaDetails {
            pizza: favorite_from_entity(model),
            sauce: sauce.map(catalog_service::sauce_from_entity),
            dough: dough.map(catalog_service::dough_from_entity),
            size: size.map(catalog_service::size_from_entity),
        })
        .collect();
    Ok(items)
}

fn favorite_from_entity(model: FavoriteModel) -> FavoritePizza {
    FavoritePizza {
        id: model.id,
        user_id: model.user_id,
        name: model.name,
        sauce_id: model.sauce_id,
        dough_id: model.dough_id,
        size_id: model.size_id,
        ingredients: model.ingredients.0,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
