//! DTOs for the lookups adapter.

use time::OffsetDateTime;

/// DTO for inserting a lookup row.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupCreate {
    pub table_name: String,
    pub display_order: i32,
    pub display_text: String,
    pub is_active: bool,
    pub internal_key: String,
    pub concurrency_key: String,
    pub create_date: OffsetDateTime,
    pub create_user_id: i64,
    pub value_text: String,
}

impl LookupCreate {
    /// Active row with order 0, empty keys, created now by `create_user_id`.
    pub fn new(
        table_name: impl Into<String>,
        display_text: impl Into<String>,
        value_text: impl Into<String>,
        create_user_id: i64,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            display_order: 0,
            display_text: display_text.into(),
            is_active: true,
            internal_key: String::new(),
            concurrency_key: String::new(),
            create_date: OffsetDateTime::now_utc(),
            create_user_id,
            value_text: value_text.into(),
        }
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_internal_key(mut self, internal_key: impl Into<String>) -> Self {
        self.internal_key = internal_key.into();
        self
    }

    pub fn with_concurrency_key(mut self, concurrency_key: impl Into<String>) -> Self {
        self.concurrency_key = concurrency_key.into();
        self
    }

    pub fn with_create_date(mut self, create_date: OffsetDateTime) -> Self {
        self.create_date = create_date;
        self
    }
}

/// DTO for flipping the active flag of an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupActiveUpdate {
    pub id: i64,
    pub is_active: bool,
    pub update_user_id: i64,
}

impl LookupActiveUpdate {
    pub fn new(id: i64, is_active: bool, update_user_id: i64) -> Self {
        Self {
            id,
            is_active,
            update_user_id,
        }
    }
}
