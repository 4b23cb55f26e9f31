use std::collections::BTreeSet;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use crate::{
    builder::{Catalog, MAX_INGREDIENT_COUNT},
    entity::{dough, ingredients, misc, sauces, sizes},
    error::{AppError, AppResult},
    models::{Dough, Ingredient, IngredientQuantity, Misc, Sauce, Size},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_dough(state: &AppState) -> AppResult<ApiResponse<Vec<Dough>>> {
    let items: Vec<Dough> = dough::Entity::find()
        .order_by_asc(dough::Column::Id)
        .all(state.db())
        .await?
        .into_iter()
        .map(dough_from_entity)
        .collect();
    Ok(ApiResponse::success("Dough", items, Some(Meta::empty())))
}

pub async fn list_sizes(state: &AppState) -> AppResult<ApiResponse<Vec<Size>>> {
    let items: Vec<Size> = sizes::Entity::find()
        .order_by_asc(sizes::Column::Id)
        .all(state.db())
        .await?
        .into_iter()
        .map(size_from_entity)
        .collect();
    Ok(ApiResponse::success("Sizes", items, Some(Meta::empty())))
}

pub async fn list_sauces(state: &AppState) -> AppResult<ApiResponse<Vec<Sauce>>> {
    let items: Vec<Sauce> = sauces::Entity::find()
        .order_by_asc(sauces::Column::Id)
        .all(state.db())
        .await?
        .into_iter()
        .map(sauce_from_entity)
        .collect();
    Ok(ApiResponse::success("Sauces", items, Some(Meta::empty())))
}

pub async fn list_ingredients(state: &AppState) -> AppResult<ApiResponse<Vec<Ingredient>>> {
    let items: Vec<Ingredient> = ingredients::Entity::find()
        .order_by_asc(ingredients::Column::Id)
        .all(state.db())
        .await?
        .into_iter()
        .map(ingredient_from_entity)
        .collect();
    Ok(ApiResponse::success("Ingredients", items, Some(Meta::empty())))
}

pub async fn list_misc(state: &AppState) -> AppResult<ApiResponse<Vec<Misc>>> {
    let items: Vec<Misc> = misc::Entity::find()
        .order_by_asc(misc::Column::Id)
        .all(state.db())
        .await?
        .into_iter()
        .map(misc_from_entity)
        .collect();
    Ok(ApiResponse::success("Misc", items, Some(Meta::empty())))
}

/// Loads every catalog list, ordered by id, for server-side pricing.
pub async fn load_catalog<C: ConnectionTrait>(db: &C) -> AppResult<Catalog> {
    let dough = dough::Entity::find()
        .order_by_asc(dough::Column::Id)
        .all(db)
        .await?;
    let sizes = sizes::Entity::find()
        .order_by_asc(sizes::Column::Id)
        .all(db)
        .await?;
    let sauces = sauces::Entity::find()
        .order_by_asc(sauces::Column::Id)
        .all(db)
        .await?;
    let ingredients = ingredients::Entity::find()
        .order_by_asc(ingredients::Column::Id)
        .all(db)
        .await?;
    let misc = misc::Entity::find()
        .order_by_asc(misc::Column::Id)
        .all(db)
        .await?;

    Ok(Catalog {
        dough: dough.into_iter().map(dough_from_entity).collect(),
        sizes: sizes.into_iter().map(size_from_entity).collect(),
        sauces: sauces.into_iter().map(sauce_from_entity).collect(),
        ingredients: ingredients.into_iter().map(ingredient_from_entity).collect(),
        misc: misc.into_iter().map(misc_from_entity).collect(),
    })
}

/// Catalog ids a pizza payload points at; `None` means "not part of this payload".
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogRefs<'a> {
    pub sauce_id: Option<i32>,
    pub dough_id: Option<i32>,
    pub size_id: Option<i32>,
    pub ingredients: Option<&'a [IngredientQuantity]>,
}

/// Rejects references to catalog rows that do not exist.
pub async fn ensure_references<C: ConnectionTrait>(db: &C, refs: CatalogRefs<'_>) -> AppResult<()> {
    if let Some(id) = refs.sauce_id {
        if sauces::Entity::find_by_id(id).one(db).await?.is_none() {
            return Err(AppError::BadRequest(format!("sauce {id} not found")));
        }
    }
    if let Some(id) = refs.dough_id {
        if dough::Entity::find_by_id(id).one(db).await?.is_none() {
            return Err(AppError::BadRequest(format!("dough {id} not found")));
        }
    }
    if let Some(id) = refs.size_id {
        if sizes::Entity::find_by_id(id).one(db).await?.is_none() {
            return Err(AppError::BadRequest(format!("size {id} not found")));
        }
    }
    if let Some(items) = refs.ingredients.filter(|items| !items.is_empty()) {
        let ids: BTreeSet<i32> = items.iter().map(|item| item.ingredient_id).collect();
        let found = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .count(db)
            .await?;
        if found != ids.len() as u64 {
            return Err(AppError::BadRequest("unknown ingredient".into()));
        }
    }
    Ok(())
}

/// Each ingredient at most once, with 1..=3 portions.
pub fn validate_ingredients(items: &[IngredientQuantity]) -> AppResult<()> {
    let mut seen = BTreeSet::new();
    for item in items {
        if !(1..=MAX_INGREDIENT_COUNT as i32).contains(&item.quantity) {
            return Err(AppError::BadRequest(format!(
                "ingredient {} quantity must be between 1 and {MAX_INGREDIENT_COUNT}",
                item.ingredient_id
            )));
        }
        if !seen.insert(item.ingredient_id) {
            return Err(AppError::BadRequest(format!(
                "ingredient {} listed twice",
                item.ingredient_id
            )));
        }
    }
    Ok(())
}

pub fn dough_from_entity(model: dough::Model) -> Dough {
    Dough {
        id: model.id,
        name: model.name,
        image: model.image,
        description: model.description,
        price: model.price,
    }
}

pub fn size_from_entity(model: sizes::Model) -> Size {
    Size {
        id: model.id,
        name: model.name,
        image: model.image,
        multiplier: model.multiplier,
    }
}

pub fn sauce_from_entity(model: sauces::Model) -> Sauce {
    Sauce {
        id: model.id,
        name: model.name,
        price: model.price,
    }
}

pub fn ingredient_from_entity(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        image: model.image,
        price: model.price,
    }
}

pub fn misc_from_entity(model: misc::Model) -> Misc {
    Misc {
        id: model.id,
        name: model.name,
        image: model.image,
        price: model.price,
    }
}
