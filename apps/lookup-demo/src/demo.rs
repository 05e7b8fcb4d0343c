//! The query demonstration: insert one lookup, optionally deactivate it,
//! then read it back by display text.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::config::DemoOptions;
use crate::error::AppError;
use crate::repos::lookups::{self, Lookup, LookupActiveUpdate, LookupCreate};

/// User recorded as creator and updater of the demo row.
pub const DEMO_USER_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    pub created: Lookup,
    pub updated: Option<Lookup>,
    pub selected: Vec<Lookup>,
}

/// The fixed demonstration row.
pub fn demo_lookup(display_text: &str) -> LookupCreate {
    LookupCreate::new("Department", display_text, "Golang", DEMO_USER_ID)
        .with_display_order(0)
        .with_active(true)
        .with_internal_key("test")
        .with_concurrency_key("test")
}

pub async fn run_demo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    options: &DemoOptions,
) -> Result<DemoReport, AppError> {
    info!("executing insert query");
    let created = lookups::create_lookup(conn, demo_lookup(&options.display_text)).await?;
    info!(id = created.id, lookup = ?created, "lookup created");

    let updated = if options.update_lookup {
        info!(id = created.id, "executing update query");
        let updated = lookups::set_active(
            conn,
            LookupActiveUpdate::new(created.id, false, DEMO_USER_ID),
        )
        .await?;
        info!(id = updated.id, is_active = updated.is_active, "lookup updated");
        Some(updated)
    } else {
        None
    };

    info!(display_text = %options.display_text, "executing retrieve query");
    let selected = lookups::list_by_display_text(conn, &options.display_text).await?;
    info!(count = selected.len(), lookups = ?selected, "data retrieved successfully");

    Ok(DemoReport {
        created,
        updated,
        selected,
    })
}
