use sea_orm::entity::prelude::*;

use super::IngredientList;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "favorite_pizzas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owner; always taken from the authenticated caller, never from a payload.
    pub user_id: Uuid,
    pub name: String,
    pub sauce_id: i32,
    pub dough_id: i32,
    pub size_id: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub ingredients: IngredientList,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::sauces::Entity",
        from = "Column::SauceId",
        to = "super::sauces::Column::Id"
    )]
    Sauces,
    #[sea_orm(
        belongs_to = "super::dough::Entity",
        from = "Column::DoughId",
        to = "super::dough::Column::Id"
    )]
    Dough,
    #[sea_orm(
        belongs_to = "super::sizes::Entity",
        from = "Column::SizeId",
        to = "super::sizes::Column::Id"
    )]
    Sizes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::sauces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sauces.def()
    }
}

impl Related<super::dough::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dough.def()
    }
}

impl Related<super::sizes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sizes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
