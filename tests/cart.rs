use pizzeria_api::{
    builder::{Catalog, PizzaBuilder, PizzaSnapshot},
    cart::CartState,
    models::{Dough, Misc, Sauce, Size},
};

fn misc(id: i32, price: i64) -> Misc {
    Misc {
        id,
        name: format!("misc-{id}"),
        image: String::new(),
        price,
    }
}

fn pizza(name: &str, multiplier: f64) -> PizzaSnapshot {
    let mut builder = PizzaBuilder::new();
    builder.set_dough(Dough {
        id: 1,
        name: "thin".into(),
        image: String::new(),
        description: String::new(),
        price: 300,
    });
    builder.set_size(Size {
        id: 1,
        name: "medium".into(),
        image: String::new(),
        multiplier,
    });
    builder.set_sauce(Sauce {
        id: 1,
        name: "tomato".into(),
        price: 50,
    });
    builder.set_name(name);
    builder.snapshot().expect("complete pizza")
}

#[test]
fn adding_a_pizza_starts_at_quantity_one() {
    let mut cart = CartState::new();
    let id = cart.add_pizza(pizza("A", 1.0));

    let line = cart.pizza_by_id(id).expect("line exists");
    assert_eq!(line.quantity, 1);
    assert_eq!(line.price, 350);
    assert_eq!(cart.total_pizzas_price(), 350);
    assert!(cart.has_pizzas());
}

#[test]
fn same_pizza_twice_gives_two_lines() {
    let mut cart = CartState::new();
    let first = cart.add_pizza(pizza("A", 1.0));
    let second = cart.add_pizza(pizza("A", 1.0));
    assert_ne!(first, second);
    assert_eq!(cart.pizzas.len(), 2);
}

#[test]
fn decreasing_a_quantity_one_pizza_removes_it() {
    let mut cart = CartState::new();
    let id = cart.add_pizza(pizza("A", 1.0));
    cart.increase_pizza_quantity(id);
    cart.decrease_pizza_quantity(id);
    assert_eq!(cart.pizza_by_id(id).map(|p| p.quantity), Some(1));

    cart.decrease_pizza_quantity(id);
    assert!(cart.pizza_by_id(id).is_none());
    assert!(cart.is_empty());
}

#[test]
fn set_pizza_quantity_never_goes_below_one() {
    let mut cart = CartState::new();
    let id = cart.add_pizza(pizza("A", 1.0));

    cart.set_pizza_quantity(id, 4);
    assert_eq!(cart.pizza_by_id(id).map(|p| p.quantity), Some(4));

    cart.set_pizza_quantity(id, 0);
    assert_eq!(cart.pizza_by_id(id).map(|p| p.quantity), Some(1));

    cart.set_pizza_quantity(id, -3);
    assert_eq!(cart.pizza_by_id(id).map(|p| p.quantity), Some(1));
}

#[test]
fn misc_with_same_id_merges_into_one_line() {
    let mut cart = CartState::new();
    cart.add_misc(misc(1, 56), 2);
    cart.add_misc(misc(1, 56), 1);

    assert_eq!(cart.misc.len(), 1);
    assert_eq!(cart.misc[0].quantity, 3);
    assert_eq!(cart.total_misc_price(), 168);
}

#[test]
fn misc_quantity_changes() {
    let mut cart = CartState::new();
    cart.add_misc_one(misc(1, 56));
    cart.increase_misc_quantity(1);
    assert_eq!(cart.total_misc_count(), 2);

    cart.set_misc_quantity(1, 5);
    assert_eq!(cart.total_misc_count(), 5);

    cart.decrease_misc_quantity(1);
    assert_eq!(cart.total_misc_count(), 4);

    cart.set_misc_quantity(1, 0);
    assert!(!cart.has_misc());

    cart.add_misc_one(misc(2, 29));
    cart.decrease_misc_quantity(2);
    assert!(cart.misc.is_empty());
}

#[test]
fn pizza_price_is_frozen_but_misc_price_is_live() {
    let mut cart = CartState::new();
    cart.add_pizza(pizza("A", 2.0));
    cart.add_misc(misc(1, 56), 2);
    assert_eq!(cart.total_price(), 700 + 112);

    let catalog = Catalog {
        misc: vec![misc(1, 60)],
        ..Catalog::default()
    };
    cart.refresh_misc_prices(&catalog);

    assert_eq!(cart.total_pizzas_price(), 700);
    assert_eq!(cart.total_misc_price(), 120);
}

#[test]
fn totals_count_every_unit() {
    let mut cart = CartState::new();
    let id = cart.add_pizza(pizza("A", 1.0));
    cart.set_pizza_quantity(id, 3);
    cart.add_pizza(pizza("B", 2.0));
    cart.add_misc(misc(1, 56), 2);

    assert_eq!(cart.total_pizzas_count(), 4);
    assert_eq!(cart.total_items(), 6);
    assert_eq!(cart.total_price(), 3 * 350 + 700 + 2 * 56);
}

#[test]
fn clear_empties_both_lists() {
    let mut cart = CartState::new();
    cart.add_pizza(pizza("A", 1.0));
    cart.add_misc(misc(1, 56), 1);
    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.total_price(), 0);
    assert_eq!(cart.total_items(), 0);
}

#[test]
fn misc_quantity_saturates_instead_of_wrapping() {
    let mut cart = CartState::new();
    cart.add_misc(misc(1, 1), u32::MAX);
    cart.add_misc(misc(1, 1), 5);
    cart.increase_misc_quantity(1);

    assert_eq!(cart.misc[0].quantity, u32::MAX);
    cart.add_misc(misc(2, 1), 3);
    assert_eq!(cart.total_items(), u32::MAX);
}
