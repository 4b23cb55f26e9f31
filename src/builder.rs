//! Pizza builder: the in-progress pizza configuration and its price.
//!
//! Everything here is synchronous and free of I/O. The same code prices a
//! pizza on the client while it is being composed and on the server when an
//! order is placed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Dough, Ingredient, Misc, Sauce, Size};

/// Upper bound for the number of portions of one ingredient.
pub const MAX_INGREDIENT_COUNT: u32 = 3;

/// Portions of one ingredient and the unit price they were picked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientCount {
    pub count: u32,
    pub price: i64,
}

/// Ingredient id -> selected portions. Entries never hold a zero count.
pub type IngredientsCounter = BTreeMap<i32, IngredientCount>;

/// The catalog lists the builder draws its selections and defaults from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub dough: Vec<Dough>,
    pub sizes: Vec<Size>,
    pub sauces: Vec<Sauce>,
    pub ingredients: Vec<Ingredient>,
    pub misc: Vec<Misc>,
}

impl Catalog {
    pub fn dough_by_id(&self, id: i32) -> Option<&Dough> {
        self.dough.iter().find(|d| d.id == id)
    }

    pub fn size_by_id(&self, id: i32) -> Option<&Size> {
        self.sizes.iter().find(|s| s.id == id)
    }

    pub fn sauce_by_id(&self, id: i32) -> Option<&Sauce> {
        self.sauces.iter().find(|s| s.id == id)
    }

    pub fn ingredient_by_id(&self, id: i32) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }

    pub fn misc_by_id(&self, id: i32) -> Option<&Misc> {
        self.misc.iter().find(|m| m.id == id)
    }
}

/// A finished configuration, ready to become a cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct PizzaSnapshot {
    pub name: String,
    pub dough: Dough,
    pub size: Size,
    pub sauce: Sauce,
    pub ingredients: IngredientsCounter,
    pub price: i64,
}

/// The pizza currently being composed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PizzaBuilder {
    dough: Option<Dough>,
    size: Option<Size>,
    sauce: Option<Sauce>,
    ingredients: IngredientsCounter,
    name: String,
}

impl PizzaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder with the first dough, size and sauce of `catalog` preselected.
    pub fn with_defaults(catalog: &Catalog) -> Self {
        let mut builder = Self::default();
        builder.apply_defaults(catalog);
        builder
    }

    pub fn dough(&self) -> Option<&Dough> {
        self.dough.as_ref()
    }

    pub fn size(&self) -> Option<&Size> {
        self.size.as_ref()
    }

    pub fn sauce(&self) -> Option<&Sauce> {
        self.sauce.as_ref()
    }

    pub fn ingredients(&self) -> &IngredientsCounter {
        &self.ingredients
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_dough(&mut self, dough: Dough) {
        self.dough = Some(dough);
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = Some(size);
    }

    pub fn set_sauce(&mut self, sauce: Sauce) {
        self.sauce = Some(sauce);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Adds one portion of an ingredient. Calls at [`MAX_INGREDIENT_COUNT`] do nothing.
    pub fn increment_ingredient(&mut self, ingredient_id: i32, price: i64) {
        self.ingredients
            .entry(ingredient_id)
            .and_modify(|entry| {
                if entry.count < MAX_INGREDIENT_COUNT {
                    entry.count += 1;
                }
            })
            .or_insert(IngredientCount { count: 1, price });
    }

    /// Removes one portion; the entry disappears once it reaches zero.
    pub fn decrement_ingredient(&mut self, ingredient_id: i32) {
        let Some(entry) = self.ingredients.get_mut(&ingredient_id) else {
            return;
        };
        entry.count = entry.count.saturating_sub(1);
        if entry.count == 0 {
            self.ingredients.remove(&ingredient_id);
        }
    }

    /// Sets the portion count directly. `count <= 0` removes the ingredient and
    /// larger values are clamped to [`MAX_INGREDIENT_COUNT`].
    pub fn set_ingredient_count(&mut self, ingredient_id: i32, count: i32, price: i64) {
        match u32::try_from(count) {
            Ok(count) if count > 0 => {
                self.ingredients.insert(
                    ingredient_id,
                    IngredientCount {
                        count: count.min(MAX_INGREDIENT_COUNT),
                        price,
                    },
                );
            }
            _ => {
                self.ingredients.remove(&ingredient_id);
            }
        }
    }

    pub fn ingredients_price(&self) -> i64 {
        self.ingredients
            .values()
            .map(|entry| i64::from(entry.count) * entry.price)
            .sum()
    }

    pub fn total_ingredients_count(&self) -> u32 {
        self.ingredients.values().map(|entry| entry.count).sum()
    }

    pub fn has_ingredients(&self) -> bool {
        !self.ingredients.is_empty()
    }

    pub fn has_required_fields(&self) -> bool {
        self.dough.is_some() && self.size.is_some() && self.sauce.is_some()
    }

    /// `round(size.multiplier * (sauce + dough + ingredients))`.
    ///
    /// Returns 0 while dough, size or sauce is missing; 0 means "not ready",
    /// it is not an error.
    pub fn price(&self) -> i64 {
        let (Some(dough), Some(size), Some(sauce)) = (&self.dough, &self.size, &self.sauce) else {
            return 0;
        };
        let base = sauce.price + dough.price + self.ingredients_price();
        (size.multiplier * base as f64).round() as i64
    }

    pub fn is_ready(&self) -> bool {
        self.has_required_fields() && !self.name.trim().is_empty()
    }

    /// Fills every unset selection with the first entry of its catalog list.
    pub fn apply_defaults(&mut self, catalog: &Catalog) {
        if self.dough.is_none() {
            self.dough = catalog.dough.first().cloned();
        }
        if self.size.is_none() {
            self.size = catalog.sizes.first().cloned();
        }
        if self.sauce.is_none() {
            self.sauce = catalog.sauces.first().cloned();
        }
    }

    /// Clears the whole configuration, then re-applies catalog defaults.
    pub fn reset(&mut self, catalog: &Catalog) {
        *self = Self::default();
        self.apply_defaults(catalog);
    }

    /// Freezes the configuration and its current price. `None` until dough,
    /// size and sauce are chosen.
    pub fn snapshot(&self) -> Option<PizzaSnapshot> {
        let (Some(dough), Some(size), Some(sauce)) = (&self.dough, &self.size, &self.sauce) else {
            return None;
        };
        Some(PizzaSnapshot {
            name: self.name.trim().to_string(),
            dough: dough.clone(),
            size: size.clone(),
            sauce: sauce.clone(),
            ingredients: self.ingredients.clone(),
            price: self.price(),
        })
    }
}
