use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "misc")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub image: String,
    pub price: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_misc::Entity")]
    OrderMisc,
}

impl Related<super::order_misc::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderMisc.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
