use pizzeria_api::{
    builder::Catalog,
    dto::orders::{CreateOrderRequest, OrderMiscRequest, OrderPizzaRequest},
    error::AppError,
    models::{Dough, Ingredient, IngredientQuantity, Misc, Sauce, Size},
    services::order_service::{MAX_LINE_QUANTITY, price_order},
};

fn catalog() -> Catalog {
    Catalog {
        dough: vec![Dough {
            id: 1,
            name: "thin".into(),
            image: String::new(),
            description: String::new(),
            price: 300,
        }],
        sizes: vec![
            Size {
                id: 1,
                name: "23 cm".into(),
                image: String::new(),
                multiplier: 1.0,
            },
            Size {
                id: 2,
                name: "32 cm".into(),
                image: String::new(),
                multiplier: 2.0,
            },
        ],
        sauces: vec![Sauce {
            id: 1,
            name: "tomato".into(),
            price: 50,
        }],
        ingredients: vec![Ingredient {
            id: 1,
            name: "mushrooms".into(),
            image: String::new(),
            price: 33,
        }],
        misc: vec![Misc {
            id: 1,
            name: "cola".into(),
            image: String::new(),
            price: 56,
        }],
    }
}

fn pizza(size_id: i32, quantity: i32, ingredients: Vec<IngredientQuantity>) -> OrderPizzaRequest {
    OrderPizzaRequest {
        name: "Order pizza".into(),
        dough_id: 1,
        size_id,
        sauce_id: 1,
        quantity,
        ingredients,
    }
}

fn request(pizzas: Vec<OrderPizzaRequest>, misc: Vec<OrderMiscRequest>) -> CreateOrderRequest {
    CreateOrderRequest {
        phone: None,
        address: None,
        pizzas,
        misc,
    }
}

#[test]
fn prices_pizzas_and_misc_like_the_cart() {
    let payload = request(
        vec![
            pizza(
                1,
                2,
                vec![IngredientQuantity {
                    ingredient_id: 1,
                    quantity: 2,
                }],
            ),
            pizza(2, 1, Vec::new()),
        ],
        vec![OrderMiscRequest {
            misc_id: 1,
            quantity: 3,
        }],
    );

    let cart = price_order(&catalog(), &payload).expect("valid order");

    assert_eq!(cart.pizzas.len(), 2);
    assert_eq!(cart.pizzas[0].price, 416);
    assert_eq!(cart.pizzas[0].quantity, 2);
    assert_eq!(cart.pizzas[1].price, 700);
    assert_eq!(cart.total_misc_price(), 168);
    assert_eq!(cart.total_price(), 2 * 416 + 700 + 168);
}

#[test]
fn repeated_misc_lines_are_merged() {
    let payload = request(
        Vec::new(),
        vec![
            OrderMiscRequest {
                misc_id: 1,
                quantity: 2,
            },
            OrderMiscRequest {
                misc_id: 1,
                quantity: 1,
            },
        ],
    );
    let cart = price_order(&catalog(), &payload).expect("valid order");
    assert_eq!(cart.misc.len(), 1);
    assert_eq!(cart.misc[0].quantity, 3);
}

#[test]
fn empty_order_is_rejected() {
    let err = price_order(&catalog(), &request(Vec::new(), Vec::new())).unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[test]
fn unknown_catalog_references_are_rejected() {
    let mut bad_size = pizza(1, 1, Vec::new());
    bad_size.size_id = 99;
    assert!(matches!(
        price_order(&catalog(), &request(vec![bad_size], Vec::new())),
        Err(AppError::BadRequest(_))
    ));

    let bad_ingredient = pizza(
        1,
        1,
        vec![IngredientQuantity {
            ingredient_id: 42,
            quantity: 1,
        }],
    );
    assert!(matches!(
        price_order(&catalog(), &request(vec![bad_ingredient], Vec::new())),
        Err(AppError::BadRequest(_))
    ));

    let bad_misc = OrderMiscRequest {
        misc_id: 9,
        quantity: 1,
    };
    assert!(matches!(
        price_order(&catalog(), &request(Vec::new(), vec![bad_misc])),
        Err(AppError::BadRequest(_))
    ));
}

#[test]
fn invalid_quantities_are_rejected() {
    let zero_pizzas = pizza(1, 0, Vec::new());
    assert!(price_order(&catalog(), &request(vec![zero_pizzas], Vec::new())).is_err());

    let too_many_portions = pizza(
        1,
        1,
        vec![IngredientQuantity {
            ingredient_id: 1,
            quantity: 4,
        }],
    );
    assert!(price_order(&catalog(), &request(vec![too_many_portions], Vec::new())).is_err());

    let negative_misc = OrderMiscRequest {
        misc_id: 1,
        quantity: -1,
    };
    assert!(price_order(&catalog(), &request(Vec::new(), vec![negative_misc])).is_err());
}

#[test]
fn blank_pizza_name_is_rejected() {
    let mut unnamed = pizza(1, 1, Vec::new());
    unnamed.name = "  ".into();
    assert!(matches!(
        price_order(&catalog(), &request(vec![unnamed], Vec::new())),
        Err(AppError::BadRequest(_))
    ));
}

#[test]
fn oversized_quantities_are_rejected() {
    let huge_misc = request(
        vec![],
        vec![
            OrderMiscRequest {
                misc_id: 1,
                quantity: i32::MAX,
            };
            3
        ],
    );
    assert!(matches!(price_order(&catalog(), &huge_misc), Err(AppError::BadRequest(_))));

    let huge_pizza = request(vec![pizza(1, MAX_LINE_QUANTITY as i32 + 1, vec![])], vec![]);
    assert!(matches!(price_order(&catalog(), &huge_pizza), Err(AppError::BadRequest(_))));
}

#[test]
fn repeated_misc_lines_are_bounded_after_merging() {
    let half = MAX_LINE_QUANTITY as i32 / 2 + 1;
    let payload = request(
        vec![],
        vec![
            OrderMiscRequest {
                misc_id: 1,
                quantity: half,
            },
            OrderMiscRequest {
                misc_id: 1,
                quantity: half,
            },
        ],
    );
    assert!(matches!(price_order(&catalog(), &payload), Err(AppError::BadRequest(_))));

    let at_limit = request(
        vec![],
        vec![OrderMiscRequest {
            misc_id: 1,
            quantity: MAX_LINE_QUANTITY as i32,
        }],
    );
    let cart = price_order(&catalog(), &at_limit).expect("priced");
    assert_eq!(cart.total_misc_count(), MAX_LINE_QUANTITY);
    assert_eq!(cart.total_price(), 56 * i64::from(MAX_LINE_QUANTITY));
}
