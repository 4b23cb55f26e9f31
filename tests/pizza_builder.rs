use pizzeria_api::{
    builder::{Catalog, IngredientCount, MAX_INGREDIENT_COUNT, PizzaBuilder},
    models::{Dough, Ingredient, Sauce, Size},
};

fn dough(id: i32, price: i64) -> Dough {
    Dough {
        id,
        name: format!("dough-{id}"),
        image: String::new(),
        description: String::new(),
        price,
    }
}

fn size(id: i32, multiplier: f64) -> Size {
    Size {
        id,
        name: format!("size-{id}"),
        image: String::new(),
        multiplier,
    }
}

fn sauce(id: i32, price: i64) -> Sauce {
    Sauce {
        id,
        name: format!("sauce-{id}"),
        price,
    }
}

fn catalog() -> Catalog {
    Catalog {
        dough: vec![dough(1, 300), dough(2, 300)],
        sizes: vec![size(1, 1.0), size(2, 2.0)],
        sauces: vec![sauce(1, 50), sauce(2, 50)],
        ingredients: vec![Ingredient {
            id: 1,
            name: "mushrooms".into(),
            image: String::new(),
            price: 33,
        }],
        misc: Vec::new(),
    }
}

#[test]
fn increment_is_capped_at_three() {
    let mut builder = PizzaBuilder::new();
    for _ in 0..5 {
        builder.increment_ingredient(1, 33);
    }
    assert_eq!(
        builder.ingredients().get(&1),
        Some(&IngredientCount {
            count: MAX_INGREDIENT_COUNT,
            price: 33
        })
    );
}

#[test]
fn decrement_of_single_portion_removes_the_key() {
    let mut builder = PizzaBuilder::new();
    builder.increment_ingredient(1, 33);
    builder.decrement_ingredient(1);
    assert!(!builder.ingredients().contains_key(&1));
    assert!(!builder.has_ingredients());

    // decrementing something that is not there is a no-op
    builder.decrement_ingredient(7);
    assert!(builder.ingredients().is_empty());
}

#[test]
fn set_ingredient_count_clamps_and_removes() {
    let mut builder = PizzaBuilder::new();
    builder.set_ingredient_count(1, 10, 33);
    assert_eq!(builder.ingredients()[&1].count, MAX_INGREDIENT_COUNT);

    builder.set_ingredient_count(1, 2, 33);
    assert_eq!(builder.ingredients()[&1].count, 2);

    builder.set_ingredient_count(1, 0, 33);
    assert!(!builder.ingredients().contains_key(&1));

    builder.set_ingredient_count(2, -4, 10);
    assert!(builder.ingredients().is_empty());
}

#[test]
fn price_is_zero_until_required_fields_are_set() {
    let mut builder = PizzaBuilder::new();
    builder.increment_ingredient(1, 33);
    assert_eq!(builder.price(), 0);

    builder.set_dough(dough(1, 300));
    assert_eq!(builder.price(), 0);
    builder.set_sauce(sauce(1, 50));
    assert_eq!(builder.price(), 0);
    builder.set_size(size(1, 1.0));
    assert!(builder.price() > 0);
}

#[test]
fn price_multiplies_base_by_size() {
    let mut builder = PizzaBuilder::new();
    builder.set_dough(dough(1, 300));
    builder.set_sauce(sauce(1, 50));
    builder.set_size(size(2, 2.0));
    assert_eq!(builder.price(), 700);
}

#[test]
fn price_includes_ingredients() {
    let mut builder = PizzaBuilder::new();
    builder.set_dough(dough(1, 300));
    builder.set_sauce(sauce(1, 50));
    builder.set_size(size(1, 1.0));
    builder.increment_ingredient(1, 33);
    builder.increment_ingredient(1, 33);
    assert_eq!(builder.ingredients_price(), 66);
    assert_eq!(builder.total_ingredients_count(), 2);
    assert_eq!(builder.price(), 416);
}

#[test]
fn price_is_rounded() {
    let mut builder = PizzaBuilder::new();
    builder.set_dough(dough(1, 101));
    builder.set_sauce(sauce(1, 0));
    builder.set_size(size(1, 1.5));
    // 151.5 rounds away from zero
    assert_eq!(builder.price(), 152);
}

#[test]
fn ready_needs_a_non_blank_name() {
    let mut builder = PizzaBuilder::with_defaults(&catalog());
    assert!(builder.has_required_fields());
    assert!(!builder.is_ready());

    builder.set_name("   ");
    assert!(!builder.is_ready());

    builder.set_name("My pizza");
    assert!(builder.is_ready());
}

#[test]
fn defaults_pick_first_catalog_entries() {
    let builder = PizzaBuilder::with_defaults(&catalog());
    assert_eq!(builder.dough().map(|d| d.id), Some(1));
    assert_eq!(builder.size().map(|s| s.id), Some(1));
    assert_eq!(builder.sauce().map(|s| s.id), Some(1));
}

#[test]
fn apply_defaults_keeps_existing_selection() {
    let mut builder = PizzaBuilder::new();
    builder.set_size(size(2, 2.0));
    builder.apply_defaults(&catalog());
    assert_eq!(builder.size().map(|s| s.id), Some(2));
    assert_eq!(builder.dough().map(|d| d.id), Some(1));
}

#[test]
fn reset_clears_configuration_and_restores_defaults() {
    let catalog = catalog();
    let mut builder = PizzaBuilder::new();
    builder.set_dough(dough(2, 300));
    builder.set_size(size(2, 2.0));
    builder.set_sauce(sauce(2, 50));
    builder.set_name("Custom");
    builder.increment_ingredient(1, 33);

    builder.reset(&catalog);

    assert_eq!(builder.name(), "");
    assert!(builder.ingredients().is_empty());
    assert_eq!(builder.dough().map(|d| d.id), Some(1));
    assert_eq!(builder.size().map(|s| s.id), Some(1));
    assert_eq!(builder.sauce().map(|s| s.id), Some(1));
}

#[test]
fn reset_on_empty_catalog_leaves_fields_unset() {
    let mut builder = PizzaBuilder::new();
    builder.set_dough(dough(1, 300));
    builder.reset(&Catalog::default());
    assert!(builder.dough().is_none());
    assert_eq!(builder.price(), 0);
}

#[test]
fn snapshot_freezes_trimmed_name_and_price() {
    let mut builder = PizzaBuilder::with_defaults(&catalog());
    assert!(PizzaBuilder::new().snapshot().is_none());

    builder.set_name("  Margherita ");
    builder.increment_ingredient(1, 33);
    let snapshot = builder.snapshot().expect("required fields are set");

    assert_eq!(snapshot.name, "Margherita");
    assert_eq!(snapshot.price, 383);
    assert_eq!(snapshot.ingredients[&1].count, 1);
}
