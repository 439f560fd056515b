#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{
        announcement::{
            Announcement, AnnouncementFields, AnnouncementFilter, NewAnnouncement, UpdateOutcome,
        },
        teacher::Teacher,
    },
};

pub use postgres::{PgAnnouncementStore, PgTeacherStore};

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the migrations embedded from ./migrations/
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Persistence for announcements. Listings are always ordered by `created_at` descending.
#[async_trait]
pub trait AnnouncementStore: Send + Sync + 'static {
    async fn ping(&self) -> Result<()>;
    async fn insert(&self, new: &NewAnnouncement) -> Result<Announcement>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>>;
    async fn find_all(&self, filter: AnnouncementFilter) -> Result<Vec<Announcement>>;
    /// Overwrite message and expiration; `start_date` only when the fields carry one.
    async fn update_fields(&self, id: Uuid, fields: &AnnouncementFields) -> Result<UpdateOutcome>;
    async fn unset_start_date(&self, id: Uuid) -> Result<()>;
    /// Returns the number of deleted records.
    async fn delete_by_id(&self, id: Uuid) -> Result<u64>;
}

/// Read-only view of the teacher directory.
#[async_trait]
pub trait TeacherStore: Send + Sync + 'static {
    async fn find_by_username(&self, username: &str) -> Result<Option<Teacher>>;
}
