use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{IngredientQuantity, Order, OrderMisc, OrderPizza};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub phone: Option<String>,
    /// Omitted for pickup orders.
    pub address: Option<OrderAddressRequest>,
    #[serde(default)]
    pub pizzas: Vec<OrderPizzaRequest>,
    #[serde(default)]
    pub misc: Vec<OrderMiscRequest>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPizzaRequest {
    pub name: String,
    pub dough_id: i32,
    pub size_id: i32,
    pub sauce_id: i32,
    pub quantity: i32,
    #[serde(default)]
    pub ingredients: Vec<IngredientQuantity>,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderMiscRequest {
    pub misc_id: i32,
    pub quantity: i32,
}

/// Either a saved address of the caller (`id`) or a new one to save.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddressRequest {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub street: Option<String>,
    pub building: Option<String>,
    pub flat: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub pizzas: Vec<OrderPizza>,
    pub misc: Vec<OrderMisc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}
