//! SQLite post store implementation.
//!
//! Persistent lookup of registered posts using SQLite and Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::adapter::sqlite::connection::DbPool;
use crate::adapter::sqlite::model::{NewPostRow, PostRow};
use crate::adapter::sqlite::schema::posts;
use crate::domain::{PostRecord, Source};
use crate::error::{Error, Result};
use crate::port::PostStore;

/// SQLite-backed post store.
///
/// Implements the [`PostStore`] trait over the `posts` table. The
/// `(source, post_id)` uniqueness invariant is enforced by the schema;
/// [`register`](PostStore::register) leans on it with an
/// insert-or-ignore-then-fetch, which keeps registration idempotent without
/// a transaction.
pub struct SqlitePostStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqlitePostStore {
    /// Create a new SQLite post store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn from_row(row: PostRow) -> Result<PostRecord> {
        let source = Source::parse(&row.source)
            .ok_or_else(|| Error::Database(format!("unknown source in posts table: {}", row.source)))?;
        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| Error::Database(e.to_string()))?
            .with_timezone(&Utc);
        let id = row
            .id
            .ok_or_else(|| Error::Database("post row missing id".into()))?;

        Ok(PostRecord {
            id,
            source,
            post_id: row.post_id,
            created_at,
        })
    }
}

#[async_trait]
impl PostStore for SqlitePostStore {
    async fn exists(&self, source: Source, post_id: &str) -> Result<bool> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let count: i64 = posts::table
            .filter(posts::source.eq(source.as_str()))
            .filter(posts::post_id.eq(post_id))
            .count()
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn register(&self, source: Source, post_id: &str) -> Result<PostRecord> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let row = NewPostRow {
            source: source.as_str().to_string(),
            post_id: post_id.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        // No-op when the pair already exists; the stored row wins.
        diesel::insert_or_ignore_into(posts::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        let stored: PostRow = posts::table
            .filter(posts::source.eq(source.as_str()))
            .filter(posts::post_id.eq(post_id))
            .first(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Self::from_row(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::sqlite::connection::{create_pool, run_migrations};

    fn setup_store() -> SqlitePostStore {
        let pool = create_pool(":memory:").expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        SqlitePostStore::new(pool)
    }

    #[tokio::test]
    async fn exists_is_false_for_unregistered_pair() {
        let store = setup_store();
        assert!(!store.exists(Source::Twitter, "404").await.unwrap());
    }

    #[tokio::test]
    async fn register_then_exists_round_trip() {
        let store = setup_store();
        store.register(Source::Twitter, "123").await.unwrap();

        assert!(store.exists(Source::Twitter, "123").await.unwrap());
        // Same id on the other platform is a different pair.
        assert!(!store.exists(Source::Farcaster, "123").await.unwrap());
    }

    #[tokio::test]
    async fn register_is_idempotent() {
        let store = setup_store();

        let first = store.register(Source::Twitter, "123").await.unwrap();
        let second = store.register(Source::Twitter, "123").await.unwrap();

        assert_eq!(first, second);

        let mut conn = store.pool.get().unwrap();
        let count: i64 = posts::table.count().get_result(&mut conn).unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn register_assigns_distinct_ids_per_pair() {
        let store = setup_store();

        let a = store.register(Source::Twitter, "1").await.unwrap();
        let b = store.register(Source::Farcaster, "1").await.unwrap();
        let c = store.register(Source::Twitter, "2").await.unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_eq!(a.source, Source::Twitter);
        assert_eq!(b.source, Source::Farcaster);
    }

    #[tokio::test]
    async fn register_records_creation_time() {
        let store = setup_store();
        let before = Utc::now();
        let record = store.register(Source::Farcaster, "xyz").await.unwrap();

        assert!(record.created_at >= before - chrono::Duration::seconds(1));
        assert!(record.created_at <= Utc::now() + chrono::Duration::seconds(1));
    }
}
