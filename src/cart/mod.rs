//! Shopping cart: configured pizzas and misc products with derived totals.

pub mod storage;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{
    builder::{Catalog, IngredientsCounter, PizzaSnapshot},
    models::{Dough, Misc, Sauce, Size},
};

pub use storage::{CART_STORAGE_KEY, CartStorage, FileStorage, MemoryStorage, StorageError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartPizza {
    pub id: Uuid,
    pub name: String,
    pub dough: Dough,
    pub size: Size,
    pub sauce: Sauce,
    pub ingredients: IngredientsCounter,
    pub quantity: u32,
    /// Unit price frozen when the pizza was added; catalog changes do not touch it.
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartMisc {
    /// Catalog entry; its `price` is read live when totals are computed.
    pub misc: Misc,
    pub quantity: u32,
}

/// The persisted part of the cart. Totals are always derived, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pizzas: Vec<CartPizza>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub misc: Vec<CartMisc>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new line with quantity 1 and returns its generated id.
    pub fn add_pizza(&mut self, pizza: PizzaSnapshot) -> Uuid {
        let id = Uuid::new_v4();
        self.pizzas.push(CartPizza {
            id,
            name: pizza.name,
            dough: pizza.dough,
            size: pizza.size,
            sauce: pizza.sauce,
            ingredients: pizza.ingredients,
            quantity: 1,
            price: pizza.price,
        });
        id
    }

    pub fn pizza_by_id(&self, id: Uuid) -> Option<&CartPizza> {
        self.pizzas.iter().find(|p| p.id == id)
    }

    fn pizza_mut(&mut self, id: Uuid) -> Option<&mut CartPizza> {
        self.pizzas.iter_mut().find(|p| p.id == id)
    }

    pub fn remove_pizza(&mut self, id: Uuid) {
        self.pizzas.retain(|p| p.id != id);
    }

    /// Sets the quantity, clamped to at least 1. Never removes the line.
    pub fn set_pizza_quantity(&mut self, id: Uuid, quantity: i32) {
        if let Some(pizza) = self.pizza_mut(id) {
            pizza.quantity = u32::try_from(quantity).unwrap_or(0).max(1);
        }
    }

    pub fn increase_pizza_quantity(&mut self, id: Uuid) {
        if let Some(pizza) = self.pizza_mut(id) {
            pizza.quantity = pizza.quantity.saturating_add(1);
        }
    }

    /// Decrements the quantity; a line at quantity 1 is removed instead.
    pub fn decrease_pizza_quantity(&mut self, id: Uuid) {
        let Some(pizza) = self.pizza_mut(id) else {
            return;
        };
        if pizza.quantity > 1 {
            pizza.quantity -= 1;
        } else {
            self.remove_pizza(id);
        }
    }

    fn misc_mut(&mut self, misc_id: i32) -> Option<&mut CartMisc> {
        self.misc.iter_mut().find(|item| item.misc.id == misc_id)
    }

    /// Adds `quantity` of a misc product, merging with an existing line for the same id.
    pub fn add_misc(&mut self, misc: Misc, quantity: u32) {
        match self.misc_mut(misc.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.misc.push(CartMisc { misc, quantity }),
        }
    }

    pub fn add_misc_one(&mut self, misc: Misc) {
        self.add_misc(misc, 1);
    }

    pub fn remove_misc(&mut self, misc_id: i32) {
        self.misc.retain(|item| item.misc.id != misc_id);
    }

    /// Sets the quantity; `quantity <= 0` removes the line.
    pub fn set_misc_quantity(&mut self, misc_id: i32, quantity: i32) {
        match u32::try_from(quantity) {
            Ok(quantity) if quantity > 0 => {
                if let Some(item) = self.misc_mut(misc_id) {
                    item.quantity = quantity;
                }
            }
            _ => self.remove_misc(misc_id),
        }
    }

    pub fn increase_misc_quantity(&mut self, misc_id: i32) {
        if let Some(item) = self.misc_mut(misc_id) {
            item.quantity = item.quantity.saturating_add(1);
        }
    }

    pub fn decrease_misc_quantity(&mut self, misc_id: i32) {
        let Some(item) = self.misc_mut(misc_id) else {
            return;
        };
        if item.quantity > 1 {
            item.quantity -= 1;
        } else {
            self.remove_misc(misc_id);
        }
    }

    /// Replaces every misc entry with the current catalog version so totals
    /// use today's prices. Entries missing from the catalog are left alone.
    pub fn refresh_misc_prices(&mut self, catalog: &Catalog) {
        for item in &mut self.misc {
            if let Some(current) = catalog.misc_by_id(item.misc.id) {
                item.misc = current.clone();
            }
        }
    }

    pub fn clear(&mut self) {
        self.pizzas.clear();
        self.misc.clear();
    }

    pub fn total_pizzas_price(&self) -> i64 {
        self.pizzas
            .iter()
            .map(|p| p.price * i64::from(p.quantity))
            .sum()
    }

    pub fn total_misc_price(&self) -> i64 {
        self.misc
            .iter()
            .map(|item| item.misc.price * i64::from(item.quantity))
            .sum()
    }

    pub fn total_price(&self) -> i64 {
        self.total_pizzas_price() + self.total_misc_price()
    }

    pub fn total_pizzas_count(&self) -> u32 {
        self.pizzas
            .iter()
            .fold(0u32, |total, p| total.saturating_add(p.quantity))
    }

    pub fn total_misc_count(&self) -> u32 {
        self.misc
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity))
    }

    pub fn total_items(&self) -> u32 {
        self.total_pizzas_count()
            .saturating_add(self.total_misc_count())
    }

    pub fn is_empty(&self) -> bool {
        self.pizzas.is_empty() && self.misc.is_empty()
    }

    pub fn has_pizzas(&self) -> bool {
        !self.pizzas.is_empty()
    }

    pub fn has_misc(&self) -> bool {
        !self.misc.is_empty()
    }
}

/// A [`CartState`] bound to a store: rehydrated on open and written back
/// after every mutation.
#[derive(Debug)]
pub struct Cart<S: CartStorage> {
    state: CartState,
    storage: S,
}

impl<S: CartStorage> Cart<S> {
    pub fn open(storage: S) -> Self {
        let state = storage::load_cart(&storage);
        Self { state, storage }
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn mutate<R>(&mut self, change: impl FnOnce(&mut CartState) -> R) -> R {
        let out = change(&mut self.state);
        storage::save_cart(&mut self.storage, &self.state);
        out
    }

    pub fn add_pizza(&mut self, pizza: PizzaSnapshot) -> Uuid {
        self.mutate(|cart| cart.add_pizza(pizza))
    }

    pub fn remove_pizza(&mut self, id: Uuid) {
        self.mutate(|cart| cart.remove_pizza(id));
    }

    pub fn set_pizza_quantity(&mut self, id: Uuid, quantity: i32) {
        self.mutate(|cart| cart.set_pizza_quantity(id, quantity));
    }

    pub fn increase_pizza_quantity(&mut self, id: Uuid) {
        self.mutate(|cart| cart.increase_pizza_quantity(id));
    }

    pub fn decrease_pizza_quantity(&mut self, id: Uuid) {
        self.mutate(|cart| cart.decrease_pizza_quantity(id));
    }

    pub fn add_misc(&mut self, misc: Misc, quantity: u32) {
        self.mutate(|cart| cart.add_misc(misc, quantity));
    }

    pub fn remove_misc(&mut self, misc_id: i32) {
        self.mutate(|cart| cart.remove_misc(misc_id));
    }

    pub fn set_misc_quantity(&mut self, misc_id: i32, quantity: i32) {
        self.mutate(|cart| cart.set_misc_quantity(misc_id, quantity));
    }

    pub fn increase_misc_quantity(&mut self, misc_id: i32) {
        self.mutate(|cart| cart.increase_misc_quantity(misc_id));
    }

    pub fn decrease_misc_quantity(&mut self, misc_id: i32) {
        self.mutate(|cart| cart.decrease_misc_quantity(misc_id));
    }

    pub fn refresh_misc_prices(&mut self, catalog: &Catalog) {
        self.mutate(|cart| cart.refresh_misc_prices(catalog));
    }

    pub fn clear(&mut self) {
        self.mutate(CartState::clear);
    }
}
