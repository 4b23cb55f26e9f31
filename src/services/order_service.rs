use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    builder::{Catalog, PizzaBuilder},
    cart::CartState,
    dto::{
        addresses::AddressRequest,
        orders::{CreateOrderRequest, OrderAddressRequest, OrderList, OrderPizzaRequest, OrderWithItems},
    },
    entity::{
        IngredientList,
        order_misc::{ActiveModel as MiscLineActive, Column as MiscLineCol, Entity as OrderMiscLines, Model as MiscLineModel},
        order_pizzas::{ActiveModel as PizzaLineActive, Column as PizzaLineCol, Entity as OrderPizzas, Model as PizzaLineModel},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner},
    models::{IngredientQuantity, Order, OrderMisc, OrderPizza},
    phone::normalize_phone,
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::{address_service, catalog_service},
    state::AppState,
};

/// Upper bound of a single order line's quantity.
pub const MAX_LINE_QUANTITY: u32 = 100;

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut finder = Orders::find().filter(OrderCol::UserId.eq(user.user_id));
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(state.db()).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(state.db())
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let phone = payload
        .phone
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(normalize_phone)
        .transpose()?;

    let txn = state.db().begin().await?;

    let catalog = catalog_service::load_catalog(&txn).await?;
    let cart = price_order(&catalog, &payload)?;
    let address_id = resolve_address(&txn, user, payload.address).await?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        address_id: Set(address_id),
        phone: Set(phone),
        total_amount: Set(cart.total_price()),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut pizzas = Vec::with_capacity(cart.pizzas.len());
    for line in &cart.pizzas {
        let ingredients = line
            .ingredients
            .iter()
            .map(|(id, entry)| {
                Ok(IngredientQuantity {
                    ingredient_id: *id,
                    quantity: db_quantity(entry.count)?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        let row = PizzaLineActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            name: Set(line.name.clone()),
            sauce_id: Set(line.sauce.id),
            dough_id: Set(line.dough.id),
            size_id: Set(line.size.id),
            quantity: Set(db_quantity(line.quantity)?),
            price: Set(line.price),
            ingredients: Set(IngredientList(ingredients)),
        }
        .insert(&txn)
        .await?;
        pizzas.push(order_pizza_from_entity(row));
    }

    let mut misc = Vec::with_capacity(cart.misc.len());
    for line in &cart.misc {
        let row = MiscLineActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            misc_id: Set(line.misc.id),
            quantity: Set(db_quantity(line.quantity)?),
            price: Set(line.misc.price),
        }
        .insert(&txn)
        .await?;
        misc.push(order_misc_from_entity(row));
    }

    txn.commit().await?;

    tracing::info!(order_id = %order.id, total = order.total_amount, "order created");
    audit::record(
        state.db(),
        user.user_id,
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id, "total_amount": order.total_amount }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order created",
        OrderWithItems {
            order: order_from_entity(order),
            pizzas,
            misc,
        },
        Some(Meta::empty()),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = load_owned(state.db(), user, id).await?;

    let pizzas = OrderPizzas::find()
        .filter(PizzaLineCol::OrderId.eq(order.id))
        .all(state.db())
        .await?
        .into_iter()
        .map(order_pizza_from_entity)
        .collect();
    let misc = OrderMiscLines::find()
        .filter(MiscLineCol::OrderId.eq(order.id))
        .order_by_asc(MiscLineCol::MiscId)
        .all(state.db())
        .await?
        .into_iter()
        .map(order_misc_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: order_from_entity(order),
            pizzas,
            misc,
        },
        Some(Meta::empty()),
    ))
}

pub async fn delete_order(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    load_owned(state.db(), user, id).await?;

    // order lines go with the order (ON DELETE CASCADE)
    let result = Orders::delete_many()
        .filter(OrderCol::Id.eq(id))
        .filter(OrderCol::UserId.eq(user.user_id))
        .exec(state.db())
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state.db(),
        user.user_id,
        "order_delete",
        "orders",
        serde_json::json!({ "order_id": id }),
    )
    .await;
    Ok(())
}

/// Prices an order request against `catalog`.
///
/// Every pizza is rebuilt in a [`PizzaBuilder`] and added to a fresh
/// [`CartState`], so the stored amounts are exactly what the cart shows.
/// Client-side prices are never trusted.
pub fn price_order(catalog: &Catalog, payload: &CreateOrderRequest) -> AppResult<CartState> {
    if payload.pizzas.is_empty() && payload.misc.is_empty() {
        return Err(AppError::BadRequest("Order is empty".into()));
    }

    let mut cart = CartState::new();
    for request in &payload.pizzas {
        let builder = build_pizza(catalog, request)?;
        let snapshot = builder
            .snapshot()
            .ok_or_else(|| AppError::BadRequest("Pizza is incomplete".into()))?;
        let id = cart.add_pizza(snapshot);
        cart.set_pizza_quantity(id, request.quantity);
    }

    for request in &payload.misc {
        let quantity = line_quantity(request.quantity, "misc")?;
        let item = catalog
            .misc_by_id(request.misc_id)
            .ok_or_else(|| AppError::BadRequest(format!("misc {} not found", request.misc_id)))?;
        cart.add_misc(item.clone(), quantity);
    }

    // Repeated misc ids merge into one line.
    if let Some(line) = cart.misc.iter().find(|line| line.quantity > MAX_LINE_QUANTITY) {
        return Err(AppError::BadRequest(format!(
            "misc {} quantity exceeds {MAX_LINE_QUANTITY}",
            line.misc.id
        )));
    }

    Ok(cart)
}

fn line_quantity(quantity: i32, kind: &str) -> AppResult<u32> {
    match u32::try_from(quantity) {
        Ok(quantity) if (1..=MAX_LINE_QUANTITY).contains(&quantity) => Ok(quantity),
        _ => Err(AppError::BadRequest(format!(
            "{kind} quantity must be between 1 and {MAX_LINE_QUANTITY}"
        ))),
    }
}

fn db_quantity(quantity: u32) -> AppResult<i32> {
    i32::try_from(quantity).map_err(|_| AppError::BadRequest("quantity out of range".into()))
}

fn build_pizza(catalog: &Catalog, request: &OrderPizzaRequest) -> AppResult<PizzaBuilder> {
    line_quantity(request.quantity, "pizza")?;
    catalog_service::validate_ingredients(&request.ingredients)?;

    let mut builder = PizzaBuilder::new();
    builder.set_name(request.name.as_str());
    builder.set_dough(
        catalog
            .dough_by_id(request.dough_id)
            .cloned()
            .ok_or_else(|| AppError::BadRequest(format!("dough {} not found", request.dough_id)))?,
    );
    builder.set_size(
        catalog
            .size_by_id(request.size_id)
            .cloned()
            .ok_or_else(|| AppError::BadRequest(format!("size {} not found", request.size_id)))?,
    );
    builder.set_sauce(
        catalog
            .sauce_by_id(request.sauce_id)
            .cloned()
            .ok_or_else(|| AppError::BadRequest(format!("sauce {} not found", request.sauce_id)))?,
    );
    for item in &request.ingredients {
        let ingredient = catalog.ingredient_by_id(item.ingredient_id).ok_or_else(|| {
            AppError::BadRequest(format!("ingredient {} not found", item.ingredient_id))
        })?;
        builder.set_ingredient_count(ingredient.id, item.quantity, ingredient.price);
    }

    if !builder.is_ready() {
        return Err(AppError::BadRequest("pizza name must not be blank".into()));
    }
    Ok(builder)
}

async fn resolve_address<C: ConnectionTrait>(
    db: &C,
    user: &AuthUser,
    address: Option<OrderAddressRequest>,
) -> AppResult<Option<Uuid>> {
    let Some(address) = address else {
        return Ok(None);
    };
    if let Some(id) = address.id {
        let existing = address_service::load_owned(db, user, id).await?;
        return Ok(Some(existing.id));
    }

    let street = address.street.unwrap_or_default();
    let request = AddressRequest {
        name: address
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| street.clone()),
        street,
        building: address.building.unwrap_or_default(),
        flat: address.flat,
        comment: address.comment,
    };
    let saved = address_service::insert_address(db, user, request).await?;
    Ok(Some(saved.id))
}

async fn load_owned<C: ConnectionTrait>(db: &C, user: &AuthUser, id: Uuid) -> AppResult<OrderModel> {
    let order = Orders::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner(order.user_id, user)?;
    Ok(order)
}

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        user_id: model.user_id,
        address_id: model.address_id,
        phone: model.phone,
        total_amount: model.total_amount,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn order_pizza_from_entity(model: PizzaLineModel) -> OrderPizza {
    OrderPizza {
        id: model.id,
        order_id: model.order_id,
        name: model.name,
        sauce_id: model.sauce_id,
        dough_id: model.dough_id,
        size_id: model.size_id,
        quantity: model.quantity,
        price: model.price,
        ingredients: model.ingredients.0,
    }
}

fn order_misc_from_entity(model: MiscLineModel) -> OrderMisc {
    OrderMisc {
        id: model.id,
        order_id: model.order_id,
        misc_id: model.misc_id,
        quantity: model.quantity,
        price: model.price,
    }
}
