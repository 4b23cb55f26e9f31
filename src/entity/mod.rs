pub mod addresses;
pub mod audit_logs;
pub mod dough;
pub mod favorite_pizzas;
pub mod ingredients;
pub mod misc;
pub mod order_misc;
pub mod order_pizzas;
pub mod orders;
pub mod sauces;
pub mod sizes;
pub mod users;

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use crate::models::IngredientQuantity;

pub use addresses::Entity as Addresses;
pub use audit_logs::Entity as AuditLogs;
pub use dough::Entity as Dough;
pub use favorite_pizzas::Entity as FavoritePizzas;
pub use ingredients::Entity as Ingredients;
pub use misc::Entity as Misc;
pub use order_misc::Entity as OrderMisc;
pub use order_pizzas::Entity as OrderPizzas;
pub use orders::Entity as Orders;
pub use sauces::Entity as Sauces;
pub use sizes::Entity as Sizes;
pub use users::Entity as Users;

/// JSONB column holding the `{ingredientId, quantity}` pairs of a pizza.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct IngredientList(pub Vec<IngredientQuantity>);
