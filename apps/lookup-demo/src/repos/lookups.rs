//! Repository layer for lookup rows.

use sea_orm::{ConnectionTrait, DbErr};
use time::OffsetDateTime;

use crate::adapters::lookups_sea as adapter;
use crate::entities::lookups;
use crate::error::AppError;

pub use adapter::{LookupActiveUpdate, LookupCreate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub id: i64,
    pub table_name: String,
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

impl From<lookups::Model> for Lookup {
    fn from(model: lookups::Model) -> Self {
        Self {
            id: model.id,
            table_name: model.lookup_table,
            display_order: model.display_order,
            display_text: model.display_text,
            is_active: model.is_active,
            internal_key: model.internal_key,
            concurrency_key: model.concurrency_key,
            create_date: model.create_date,
            create_user_id: model.create_user_id,
            value_text: model.value_text,
            update_date: model.update_date,
            update_user_id: model.update_user_id,
        }
    }
}

pub async fn create_lookup<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: LookupCreate,
) -> Result<Lookup, AppError> {
    let model = adapter::create_lookup(conn, dto).await?;
    Ok(Lookup::from(model))
}

pub async fn find_lookup<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Lookup>, AppError> {
    let model = adapter::find_by_id(conn, id).await?;
    Ok(model.map(Lookup::from))
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: LookupActiveUpdate,
) -> Result<Lookup, AppError> {
    match adapter::update_active_flag(conn, dto).await {
        Ok(model) => Ok(Lookup::from(model)),
        Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => Err(AppError::not_found(
            "LOOKUP_NOT_FOUND",
            format!("lookup {} does not exist", dto.id),
        )),
        Err(e) => Err(e.into()),
    }
}

pub async fn list_by_display_text<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    display_text: &str,
) -> Result<Vec<Lookup>, AppError> {
    let models = adapter::list_by_display_text(conn, display_text).await?;
    Ok(models.into_iter().map(Lookup::from).collect())
}
