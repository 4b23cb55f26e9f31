use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub image: String,
    /// Applied to the summed dough, sauce and ingredient price.
    pub multiplier: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favorite_pizzas::Entity")]
    FavoritePizzas,
}

impl Related<super::favorite_pizzas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavoritePizzas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
