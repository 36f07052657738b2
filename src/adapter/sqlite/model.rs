//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::posts;

/// Database row for a registered post (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PostRow {
    pub id: Option<i32>,
    pub source: String,
    pub post_id: String,
    pub created_at: String,
}

/// Database row for a registered post (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = posts)]
pub struct NewPostRow {
    pub source: String,
    pub post_id: String,
    pub created_at: String,
}
