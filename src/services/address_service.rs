use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition,
    ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use uuid::Uuid;

use crate::{
    audit,
    dto::addresses::{AddressList, AddressRequest, UpdateAddressRequest},
    entity::addresses::{ActiveModel, Column, Entity as Addresses, Model as AddressModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner},
    models::Address,
    response::{ApiResponse, CountData, Meta},
    routes::params::{AddressQuery, contains_pattern},
    state::AppState,
};

pub async fn list_addresses(
    state: &AppState,
    user: &AuthUser,
    query: AddressQuery,
) -> AppResult<ApiResponse<AddressList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let finder = Addresses::find()
        .filter(owner_condition(user, &query))
        .order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(state.db()).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(state.db())
        .await?
        .into_iter()
        .map(address_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "OK",
        AddressList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn count_addresses(
    state: &AppState,
    user: &AuthUser,
    query: AddressQuery,
) -> AppResult<ApiResponse<CountData>> {
    let count = Addresses::find()
        .filter(owner_condition(user, &query))
        .count(state.db())
        .await?;
    Ok(ApiResponse::success("OK", CountData { count }, None))
}

pub async fn get_address(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Address>> {
    let model = load_owned(state.db(), user, id).await?;
    Ok(ApiResponse::success(
        "OK",
        address_from_entity(model),
        Some(Meta::empty()),
    ))
}

pub async fn create_address(
    state: &AppState,
    user: &AuthUser,
    payload: AddressRequest,
) -> AppResult<ApiResponse<Address>> {
    let model = insert_address(state.db(), user, payload).await?;

    audit::record(
        state.db(),
        user.user_id,
        "address_create",
        "addresses",
        serde_json::json!({ "address_id": model.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Address created",
        address_from_entity(model),
        Some(Meta::empty()),
    ))
}

/// Validates and inserts an address owned by `user`. Shared with order
/// creation, which may save a new address inside its transaction.
pub async fn insert_address<C: ConnectionTrait>(
    db: &C,
    user: &AuthUser,
    payload: AddressRequest,
) -> AppResult<AddressModel> {
    validate_request(&payload)?;
    let model = ActiveModel {
        id: Set(Uuid::new_v4()),
        ..replacement_model(user, payload)
    }
    .insert(db)
    .await?;
    Ok(model)
}

pub async fn update_address(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateAddressRequest,
) -> AppResult<()> {
    load_owned(state.db(), user, id).await?;

    let mut active = ActiveModel::new();
    let mut changed = false;
    if let Some(name) = payload.name {
        active.name = Set(required("name", &name)?);
        changed = true;
    }
    if let Some(street) = payload.street {
        active.street = Set(required("street", &street)?);
        changed = true;
    }
    if let Some(building) = payload.building {
        active.building = Set(required("building", &building)?);
        changed = true;
    }
    if let Some(flat) = payload.flat {
        active.flat = Set(optional(flat));
        changed = true;
    }
    if let Some(comment) = payload.comment {
        active.comment = Set(optional(comment));
        changed = true;
    }
    if !changed {
        return Ok(());
    }

    apply_owned_update(state.db(), user, id, active).await?;

    audit::record(
        state.db(),
        user.user_id,
        "address_update",
        "addresses",
        serde_json::json!({ "address_id": id }),
    )
    .await;
    Ok(())
}

pub async fn replace_address(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: AddressRequest,
) -> AppResult<()> {
    load_owned(state.db(), user, id).await?;
    validate_request(&payload)?;

    apply_owned_update(state.db(), user, id, replacement_model(user, payload)).await?;

    audit::record(
        state.db(),
        user.user_id,
        "address_replace",
        "addresses",
        serde_json::json!({ "address_id": id }),
    )
    .await;
    Ok(())
}

pub async fn delete_address(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    load_owned(state.db(), user, id).await?;

    let result = Addresses::delete_many()
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
        "address_delete",
        "addresses",
        serde_json::json!({ "address_id": id }),
    )
    .await;
    Ok(())
}

/// Full set of writable columns, owner taken from the caller.
pub fn replacement_model(user: &AuthUser, payload: AddressRequest) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        user_id: Set(user.user_id),
        name: Set(payload.name.trim().to_string()),
        street: Set(payload.street.trim().to_string()),
        building: Set(payload.building.trim().to_string()),
        flat: Set(payload.flat.and_then(optional)),
        comment: Set(payload.comment.and_then(optional)),
        created_at: NotSet,
    }
}

pub async fn load_owned<C: ConnectionTrait>(
    db: &C,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<AddressModel> {
    let existing = Addresses::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner(existing.user_id, user)?;
    Ok(existing)
}

async fn apply_owned_update<C: ConnectionTrait>(
    db: &C,
    user: &AuthUser,
    id: Uuid,
    active: ActiveModel,
) -> AppResult<()> {
    let result = Addresses::update_many()
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

fn owner_condition(user: &AuthUser, query: &AddressQuery) -> Condition {
    let mut condition = Condition::all();
    if let Some(name) = query.name.as_ref().filter(|s| !s.trim().is_empty()) {
        condition = condition.add(Expr::col(Column::Name).ilike(contains_pattern(name)));
    }
    condition.add(Column::UserId.eq(user.user_id))
}

fn validate_request(payload: &AddressRequest) -> AppResult<()> {
    required("name", &payload.name)?;
    required("street", &payload.street)?;
    required("building", &payload.building)?;
    Ok(())
}

fn required(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_string())
}

// Blank optional fields are stored as NULL.
fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn address_from_entity(model: AddressModel) -> Address {
    Address {
        id: model.id,
        user_id: model.user_id,
        name: model.name,
        street: model.street,
        building: model.building,
        flat: model.flat,
        comment: model.comment,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
