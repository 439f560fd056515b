use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{AnnouncementStore, TeacherStore};
use crate::{
    error::Result,
    models::{
        announcement::{
            Announcement, AnnouncementFields, AnnouncementFilter, NewAnnouncement, UpdateOutcome,
        },
        teacher::Teacher,
    },
};

const ANNOUNCEMENT_COLUMNS: &str =
    "id, message, expiration_date, start_date, created_by, created_at";

#[derive(Clone)]
pub struct PgAnnouncementStore {
    pool: PgPool,
}

impl PgAnnouncementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementStore for PgAnnouncementStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, new: &NewAnnouncement) -> Result<Announcement> {
        let fields = &new.fields;
        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "INSERT INTO announcements
                 (id, message, expiration_date, expires_at, start_date, starts_at, created_by, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {ANNOUNCEMENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&fields.message)
        .bind(fields.expiration.as_str())
        .bind(fields.expiration.instant())
        .bind(fields.start.as_ref().map(|s| s.as_str()))
        .bind(fields.start.as_ref().map(|s| s.instant()))
        .bind(&new.created_by)
        .bind(new.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(announcement)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>> {
        let announcement = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(announcement)
    }

    async fn find_all(&self, filter: AnnouncementFilter) -> Result<Vec<Announcement>> {
        let announcements = match filter {
            AnnouncementFilter::All => {
                sqlx::query_as::<_, Announcement>(&format!(
                    "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
            AnnouncementFilter::ActiveAt(now) => {
                sqlx::query_as::<_, Announcement>(&format!(
                    "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements
                     WHERE (starts_at IS NULL OR starts_at <= $1)
                       AND expires_at >= $1
                     ORDER BY created_at DESC"
                ))
                .bind(now)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(announcements)
    }

    async fn update_fields(&self, id: Uuid, fields: &AnnouncementFields) -> Result<UpdateOutcome> {
        let result = sqlx::query(
            "UPDATE announcements
             SET message = $1,
                 expiration_date = $2,
                 expires_at = $3,
                 start_date = COALESCE($4, start_date),
                 starts_at = COALESCE($5, starts_at)
             WHERE id = $6",
        )
        .bind(&fields.message)
        .bind(fields.expiration.as_str())
        .bind(fields.expiration.instant())
        .bind(fields.start.as_ref().map(|s| s.as_str()))
        .bind(fields.start.as_ref().map(|s| s.instant()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        // Postgres reports matched rows; every matched row is rewritten.
        let rows = result.rows_affected();
        Ok(UpdateOutcome {
            matched: rows,
            modified: rows,
        })
    }

    async fn unset_start_date(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE announcements SET start_date = NULL, starts_at = NULL WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[derive(Clone)]
pub struct PgTeacherStore {
    pool: PgPool,
}

impl PgTeacherStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a teacher, or refresh the display name and role of an existing one.
    pub async fn upsert(&self, username: &str, display_name: &str, role: &str) -> Result<Teacher> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "INSERT INTO teachers (username, display_name, role)
             VALUES ($1, $2, $3)
             ON CONFLICT (username) DO UPDATE SET
                 display_name = EXCLUDED.display_name,
                 role = EXCLUDED.role
             RETURNING username, display_name, role, created_at",
        )
        .bind(username)
        .bind(display_name)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;
        Ok(teacher)
    }

    pub async fn remove(&self, username: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM teachers WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list(&self) -> Result<Vec<Teacher>> {
        let teachers = sqlx::query_as::<_, Teacher>(
            "SELECT username, display_name, role, created_at FROM teachers ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(teachers)
    }
}

#[async_trait]
impl TeacherStore for PgTeacherStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT username, display_name, role, created_at FROM teachers WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(teacher)
    }
}
