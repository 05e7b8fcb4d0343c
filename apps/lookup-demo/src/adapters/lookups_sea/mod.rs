//! SeaORM adapter for the lookups table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::entities::lookups;

pub mod dto;

pub use dto::{LookupActiveUpdate, LookupCreate};

// Adapter functions return DbErr; repos layer maps to AppError via From<DbErr>.

pub async fn create_lookup<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: LookupCreate,
) -> Result<lookups::Model, sea_orm::DbErr> {
    let lookup_active = lookups::ActiveModel {
        id: NotSet,
        lookup_table: Set(dto.table_name),
        display_order: Set(dto.display_order),
        display_text: Set(dto.display_text),
        is_active: Set(dto.is_active),
        internal_key: Set(dto.internal_key),
        concurrency_key: Set(dto.concurrency_key),
        create_date: Set(dto.create_date),
        create_user_id: Set(dto.create_user_id),
        value_text: Set(dto.value_text),
        update_date: Set(None),
        update_user_id: Set(None),
    };

    lookup_active.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<lookups::Model>, sea_orm::DbErr> {
    lookups::Entity::find_by_id(id).one(conn).await
}

/// Fails with `DbErr::RecordNotUpdated` when no row has `dto.id`.
pub async fn update_active_flag<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: LookupActiveUpdate,
) -> Result<lookups::Model, sea_orm::DbErr> {
    let lookup_model = lookups::ActiveModel {
        id: Set(dto.id),
        lookup_table: NotSet,
        display_order: NotSet,
        display_text: NotSet,
        is_active: Set(dto.is_active),
        internal_key: NotSet,
        concurrency_key: NotSet,
        create_date: NotSet,
        create_user_id: NotSet,
        value_text: NotSet,
        update_date: Set(Some(OffsetDateTime::now_utc())),
        update_user_id: Set(Some(dto.update_user_id)),
    };
    lookup_model.update(conn).await
}

pub async fn list_by_display_text<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    display_text: &str,
) -> Result<Vec<lookups::Model>, sea_orm::DbErr> {
    lookups::Entity::find()
        .filter(lookups::Column::DisplayText.eq(display_text))
        .order_by_asc(lookups::Column::DisplayOrder)
        .order_by_asc(lookups::Column::Id)
        .all(conn)
        .await
}
