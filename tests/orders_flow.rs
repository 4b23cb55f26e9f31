use pizzeria_api::{
    db::{create_orm_conn, run_migrations},
    dto::{
        auth::RegisterRequest,
        favorite_pizzas::{FavoritePizzaRequest, UpdateFavoritePizzaRequest},
        orders::{CreateOrderRequest, OrderAddressRequest, OrderMiscRequest, OrderPizzaRequest},
    },
    entity::{dough, ingredients, misc, sauces, sizes},
    error::AppError,
    middleware::auth::AuthUser,
    models::IngredientQuantity,
    routes::params::{FavoritePizzaQuery, OrderListQuery},
    services::{auth_service, favorite_service, order_service},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};

// Integration flow: two users, a favorite pizza owned by one of them, then an order priced on the server.
#[tokio::test]
async fn favorite_ownership_and_order_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    seed_catalog(&state).await?;

    let alice = register(&state, "alice@example.com").await?;
    let bob = register(&state, "bob@example.com").await?;

    // Alice saves a favorite; the forged owner in the body is ignored
    let body = serde_json::json!({
        "name": "Alice's pizza",
        "sauceId": 1,
        "doughId": 1,
        "sizeId": 1,
        "ingredients": [{ "ingredientId": 1, "quantity": 2 }],
        "userId": bob.user_id,
    });
    let request: FavoritePizzaRequest = serde_json::from_value(body)?;
    let created = favorite_service::create_favorite(&state, &alice, request.clone())
        .await?
        .data
        .expect("created favorite");
    assert_eq!(created.user_id, alice.user_id);

    // Bob can neither see nor touch it
    assert!(matches!(
        favorite_service::get_favorite(&state, &bob, created.id).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        favorite_service::replace_favorite(&state, &bob, created.id, request.clone()).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        favorite_service::delete_favorite(&state, &bob, created.id).await,
        Err(AppError::Forbidden)
    ));
    let bobs = favorite_service::count_favorites(&state, &bob, FavoritePizzaQuery::default()).await?;
    assert_eq!(bobs.data.map(|c| c.count), Some(0));

    // Alice renames it and reads it back with relations
    favorite_service::update_favorite(
        &state,
        &alice,
        created.id,
        UpdateFavoritePizzaRequest {
            name: Some("Renamed".into()),
            ..Default::default()
        },
    )
    .await?;
    let details = favorite_service::get_favorite(&state, &alice, created.id)
        .await?
        .data
        .expect("details");
    assert_eq!(details.pizza.name, "Renamed");
    assert_eq!(details.sauce.map(|s| s.id), Some(1));

    let listed = favorite_service::list_favorites(
        &state,
        &alice,
        FavoritePizzaQuery {
            name: Some("ren".into()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(listed.data.map(|l| l.items.len()), Some(1));

    // Order: priced on the server, new address saved for Alice
    let order = order_service::create_order(
        &state,
        &alice,
        CreateOrderRequest {
            phone: Some("8 (900) 000 00 00".into()),
            address: Some(OrderAddressRequest {
                id: None,
                name: None,
                street: Some("Main street".into()),
                building: Some("1".into()),
                flat: None,
                comment: None,
            }),
            pizzas: vec![OrderPizzaRequest {
                name: "Big one".into(),
                dough_id: 1,
                size_id: 2,
                sauce_id: 1,
                quantity: 2,
                ingredients: vec![IngredientQuantity {
                    ingredient_id: 1,
                    quantity: 1,
                }],
            }],
            misc: vec![OrderMiscRequest {
                misc_id: 1,
                quantity: 1,
            }],
        },
    )
    .await?
    .data
    .expect("order");
    // (300 + 50 + 33) * 2 = 766 per pizza
    assert_eq!(order.order.total_amount, 2 * 766 + 56);
    assert!(order.order.address_id.is_some());
    assert_eq!(order.order.phone.as_deref(), Some("+7 900 000-00-00"));
    assert_eq!(order.pizzas.len(), 1);

    assert!(matches!(
        order_service::get_order(&state, &bob, order.order.id).await,
        Err(AppError::Forbidden)
    ));
    let bob_orders = order_service::list_orders(&state, &bob, OrderListQuery::default()).await?;
    assert_eq!(bob_orders.data.map(|l| l.items.len()), Some(0));

    order_service::delete_order(&state, &alice, order.order.id).await?;
    assert!(matches!(
        order_service::get_order(&state, &alice, order.order.id).await,
        Err(AppError::NotFound)
    ));

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_misc, order_pizzas, orders, addresses, favorite_pizzas, audit_logs, \
         users, ingredients, misc, sauces, sizes, dough RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState::new(orm))
}

async fn seed_catalog(state: &AppState) -> anyhow::Result<()> {
    dough::ActiveModel {
        id: Set(1),
        name: Set("Thin".into()),
        image: Set(String::new()),
        description: Set(String::new()),
        price: Set(300),
    }
    .insert(state.db())
    .await?;
    for (id, multiplier) in [(1, 1.0), (2, 2.0)] {
        sizes::ActiveModel {
            id: Set(id),
            name: Set(format!("size {id}")),
            image: Set(String::new()),
            multiplier: Set(multiplier),
        }
        .insert(state.db())
        .await?;
    }
    sauces::ActiveModel {
        id: Set(1),
        name: Set("Tomato".into()),
        price: Set(50),
    }
    .insert(state.db())
    .await?;
    ingredients::ActiveModel {
        id: Set(1),
        name: Set("Mushrooms".into()),
        image: Set(String::new()),
        price: Set(33),
    }
    .insert(state.db())
    .await?;
    misc::ActiveModel {
        id: Set(1),
        name: Set("Cola".into()),
        image: Set(String::new()),
        price: Set(56),
    }
    .insert(state.db())
    .await?;
    Ok(())
}

async fn register(state: &AppState, email: &str) -> anyhow::Result<AuthUser> {
    let user = auth_service::register_user(
        state,
        RegisterRequest {
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            phone: "+7 900 000-00-00".into(),
            password: "secret123".into(),
            avatar: None,
        },
    )
    .await?
    .data
    .expect("registered user");
    Ok(AuthUser { user_id: user.id })
}
