use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{FavoritePizzaDetails, IngredientQuantity};

/// Body of `POST` and `PUT`. There is no `userId` field: the owner always
/// comes from the token and any such field in the JSON is dropped.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoritePizzaRequest {
    pub name: String,
    pub sauce_id: i32,
    pub dough_id: i32,
    pub size_id: i32,
    #[serde(default)]
    pub ingredients: Vec<IngredientQuantity>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFavoritePizzaRequest {
    pub name: Option<String>,
    pub sauce_id: Option<i32>,
    pub dough_id: Option<i32>,
    pub size_id: Option<i32>,
    pub ingredients: Option<Vec<IngredientQuantity>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FavoritePizzaList {
    #[schema(value_type = Vec<FavoritePizzaDetails>)]
    pub items: Vec<FavoritePizzaDetails>,
}
