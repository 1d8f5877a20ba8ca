//! SQLite recipient store.

use color_eyre::eyre::WrapErr as _;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;

use crate::models::*;
use crate::schema::recipients;
use crate::traits::{MAX_LOOKUP_BATCH, RecipientStore};
use beacon_core::{RecipientRecord, StoreError};

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// SQLite-backed recipient store.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new SQLite storage from a database URL.
    pub fn new(database_url: &str) -> color_eyre::eyre::Result<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .wrap_err("failed to create connection pool")?;

        Ok(Self { pool })
    }

    /// Run migrations.
    pub fn run_migrations(&self) -> color_eyre::eyre::Result<()> {
        use diesel_migrations::MigrationHarness as _;

        let mut conn = self
            .pool
            .get()
            .wrap_err("failed to get connection for migrations")?;

        conn.run_pending_migrations(crate::MIGRATIONS)
            .map_err(|e| color_eyre::eyre::eyre!("migration failed: {}", e))?;

        Ok(())
    }

    /// Insert or update a recipient with the given role and token list.
    pub fn upsert_recipient(
        &self,
        owner_id: &str,
        role: Option<&str>,
        device_tokens: &[String],
    ) -> color_eyre::eyre::Result<()> {
        let mut conn = self.pool.get().wrap_err("failed to get connection")?;
        let now = chrono::Utc::now().naive_utc();
        let tokens_json =
            serde_json::to_string(device_tokens).wrap_err("failed to encode token list")?;

        let new_recipient = NewRecipient {
            owner_id,
            role,
            device_tokens: &tokens_json,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(recipients::table)
            .values(&new_recipient)
            .on_conflict(recipients::owner_id)
            .do_update()
            .set((
                recipients::role.eq(role),
                recipients::device_tokens.eq(&tokens_json),
                recipients::updated_at.eq(now),
            ))
            .execute(&mut conn)
            .wrap_err("failed to upsert recipient")?;

        Ok(())
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<ConnectionManager<SqliteConnection>>, StoreError>
    {
        self.pool
            .get()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl RecipientStore for SqliteStorage {
    fn lookup_by_owner_ids(&self, owner_ids: &[&str]) -> Result<Vec<RecipientRecord>, StoreError> {
        if owner_ids.len() > MAX_LOOKUP_BATCH {
            return Err(StoreError::BatchTooLarge(owner_ids.len()));
        }

        let mut conn = self.conn()?;

        let rows: Vec<RecipientRow> = recipients::table
            .filter(recipients::owner_id.eq_any(owner_ids))
            .load(&mut conn)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(rows.into_iter().map(RecipientRecord::from).collect())
    }

    fn query_by_role(&self, role: &str) -> Result<Vec<RecipientRecord>, StoreError> {
        let mut conn = self.conn()?;

        let rows: Vec<RecipientRow> = recipients::table
            .filter(recipients::role.eq(role))
            .load(&mut conn)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(rows.into_iter().map(RecipientRecord::from).collect())
    }

    fn page_after(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Vec<RecipientRecord>, StoreError> {
        let mut conn = self.conn()?;

        let mut query = recipients::table
            .order(recipients::owner_id.asc())
            .limit(limit as i64)
            .into_boxed();

        if let Some(cursor) = cursor {
            query = query.filter(recipients::owner_id.gt(cursor.to_owned()));
        }

        let rows: Vec<RecipientRow> = query
            .load(&mut conn)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(rows.into_iter().map(RecipientRecord::from).collect())
    }
}
