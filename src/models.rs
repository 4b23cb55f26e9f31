use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dough {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub description: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Size {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sauce {
    pub id: i32,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Misc {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub price: i64,
}

/// One `{ingredientId, quantity}` pair embedded in a favorite pizza or an order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientQuantity {
    pub ingredient_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoritePizza {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub sauce_id: i32,
    pub dough_id: i32,
    pub size_id: i32,
    pub ingredients: Vec<IngredientQuantity>,
    pub created_at: DateTime<Utc>,
}

/// A favorite pizza with its sauce, dough and size attached.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FavoritePizzaDetails {
    #[serde(flatten)]
    pub pizza: FavoritePizza,
    pub sauce: Option<Sauce>,
    pub dough: Option<Dough>,
    pub size: Option<Size>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub street: String,
    pub building: String,
    pub flat: Option<String>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_id: Option<Uuid>,
    pub phone: Option<String>,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPizza {
    pub id: Uuid,
    pub order_id: Uuid,
    pub name: String,
    pub sauce_id: i32,
    pub dough_id: i32,
    pub size_id: i32,
    pub quantity: i32,
    /// Unit price fixed when the order was placed.
    pub price: i64,
    pub ingredients: Vec<IngredientQuantity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderMisc {
    pub id: Uuid,
    pub order_id: Uuid,
    pub misc_id: i32,
    pub quantity: i32,
    pub price: i64,
}
