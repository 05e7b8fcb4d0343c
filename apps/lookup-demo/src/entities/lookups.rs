use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lookups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Logical lookup group, stored in the `table_name` column.
    #[sea_orm(column_name = "table_name")]
    pub lookup_table: String,
    pub display_order: i32,
    pub display_text: String,
    pub is_active: bool,
    pub internal_key: String,
    pub concurrency_key: String,
    pub create_date: OffsetDateTime,
    pub create_user_id: i64,
    pub value_text: String,
    pub update_date: Option<OffsetDateTime>,
    pub update_user_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
