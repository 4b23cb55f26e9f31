use pizzeria_api::{
    builder::{PizzaBuilder, PizzaSnapshot},
    cart::{
        CART_STORAGE_KEY, Cart, CartState, CartStorage, FileStorage, MemoryStorage, StorageError,
        storage::{load_cart, save_cart},
    },
    models::{Dough, Misc, Sauce, Size},
};

fn snapshot() -> PizzaSnapshot {
    let mut builder = PizzaBuilder::new();
    builder.set_dough(Dough {
        id: 1,
        name: "thin".into(),
        image: "dough/light.svg".into(),
        description: "crispy".into(),
        price: 300,
    });
    builder.set_size(Size {
        id: 2,
        name: "32 cm".into(),
        image: "diameter.svg".into(),
        multiplier: 2.0,
    });
    builder.set_sauce(Sauce {
        id: 1,
        name: "tomato".into(),
        price: 50,
    });
    builder.set_name("Saved pizza");
    builder.increment_ingredient(4, 42);
    builder.snapshot().expect("complete pizza")
}

fn cola() -> Misc {
    Misc {
        id: 1,
        name: "cola".into(),
        image: "cola.svg".into(),
        price: 56,
    }
}

#[test]
fn cart_round_trips_through_memory_storage() {
    let mut cart = Cart::open(MemoryStorage::new());
    let id = cart.add_pizza(snapshot());
    cart.set_pizza_quantity(id, 2);
    cart.add_misc(cola(), 3);
    let expected = cart.state().clone();

    let reopened = Cart::open(cart.into_storage());
    assert_eq!(reopened.state(), &expected);
    assert_eq!(reopened.state().total_price(), expected.total_price());
}

#[test]
fn persisted_layout_has_pizzas_and_misc() {
    let mut storage = MemoryStorage::new();
    let mut state = CartState::new();
    state.add_misc(cola(), 1);
    save_cart(&mut storage, &state);

    let raw = storage
        .get(CART_STORAGE_KEY)
        .expect("memory storage never fails")
        .expect("cart saved");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert!(json["pizzas"].is_array());
    assert_eq!(json["misc"][0]["quantity"], 1);
}

#[test]
fn corrupted_data_loads_as_empty_cart() {
    let mut storage = MemoryStorage::new();
    storage
        .set(CART_STORAGE_KEY, "{not json")
        .expect("memory storage never fails");

    let state = load_cart(&storage);
    assert!(state.is_empty());
}

#[test]
fn null_and_missing_lists_load_as_empty() {
    let mut storage = MemoryStorage::new();
    storage
        .set(CART_STORAGE_KEY, r#"{"pizzas": null}"#)
        .expect("memory storage never fails");

    let state = load_cart(&storage);
    assert!(state.pizzas.is_empty());
    assert!(state.misc.is_empty());
}

#[test]
fn missing_key_loads_as_empty_cart() {
    let cart = Cart::open(MemoryStorage::new());
    assert!(cart.state().is_empty());
}

#[test]
fn file_storage_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested");

    let mut cart = Cart::open(FileStorage::new(&path));
    cart.add_pizza(snapshot());
    cart.add_misc(cola(), 2);
    let expected = cart.state().clone();

    assert!(path.join(format!("{CART_STORAGE_KEY}.json")).exists());

    let reopened = Cart::open(FileStorage::new(&path));
    assert_eq!(reopened.state(), &expected);
}

#[test]
fn file_storage_missing_file_is_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = FileStorage::new(dir.path());
    assert!(storage.get("cart").expect("read").is_none());
}

#[test]
fn file_storage_rejects_path_like_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut storage = FileStorage::new(dir.path());

    let err = storage.set("../escape", "{}").unwrap_err();
    assert!(matches!(err, StorageError::InvalidKey(_)));
    assert!(matches!(storage.get(""), Err(StorageError::InvalidKey(_))));
}

#[test]
fn corrupted_file_loads_as_empty_cart() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("cart.json"), "[1, 2").expect("write");

    let cart = Cart::open(FileStorage::new(dir.path()));
    assert!(cart.state().is_empty());
}
