use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    db::{AnnouncementStore, TeacherStore},
    error::{AppError, Result},
    models::{
        announcement::{Announcement, AnnouncementFilter, AnnouncementParams, NewAnnouncement},
        teacher::Teacher,
    },
    services::metrics,
};

/// Announcement operations over injected stores.
///
/// Teacher-only operations take the [`Teacher`] returned by
/// [`AnnouncementService::authenticate`], so they cannot be reached without it.
#[derive(Clone)]
pub struct AnnouncementService {
    announcements: Arc<dyn AnnouncementStore>,
    teachers: Arc<dyn TeacherStore>,
}

impl AnnouncementService {
    pub fn new(announcements: Arc<dyn AnnouncementStore>, teachers: Arc<dyn TeacherStore>) -> Self {
        Self {
            announcements,
            teachers,
        }
    }

    pub async fn ping(&self) -> Result<()> {
        self.announcements.ping().await
    }

    /// Resolve a `teacher_username` credential. Existence of the teacher is the whole check.
    pub async fn authenticate(&self, username: Option<&str>) -> Result<Teacher> {
        let result = match username.filter(|u| !u.is_empty()) {
            None => Err(AppError::AuthenticationRequired),
            Some(username) => self
                .teachers
                .find_by_username(username)
                .await
                .and_then(|teacher| teacher.ok_or(AppError::InvalidCredential)),
        };
        if let Err(e) = &result {
            debug!(username = ?username, error = %e, "Teacher authentication failed");
            metrics::record_auth_failure(e);
        }
        result
    }

    /// Announcements whose window contains the current instant, newest first.
    pub async fn list_active(&self) -> Result<Vec<Announcement>> {
        self.list_active_at(Utc::now()).await
    }

    pub async fn list_active_at(&self, now: DateTime<Utc>) -> Result<Vec<Announcement>> {
        let result = self
            .announcements
            .find_all(AnnouncementFilter::ActiveAt(now))
            .await;
        metrics::record("list_active", &result);
        result
    }

    /// Every announcement regardless of its window, newest first.
    pub async fn list_all(&self, _teacher: &Teacher) -> Result<Vec<Announcement>> {
        let result = self.announcements.find_all(AnnouncementFilter::All).await;
        metrics::record("list_all", &result);
        result
    }

    pub async fn create(&self, teacher: &Teacher, params: AnnouncementParams) -> Result<Announcement> {
        let result = self.create_inner(teacher, params).await;
        metrics::record("create", &result);
        result
    }

    async fn create_inner(&self, teacher: &Teacher, params: AnnouncementParams) -> Result<Announcement> {
        let fields = params.validate()?;
        let new = NewAnnouncement {
            fields,
            created_by: teacher.username.clone(),
            created_at: Utc::now(),
        };
        let announcement = self.announcements.insert(&new).await?;
        info!(
            teacher = %teacher.username,
            announcement_id = %announcement.id,
            "Announcement created"
        );
        Ok(announcement)
    }

    /// Replace message and expiration, and set or clear `start_date`.
    ///
    /// Clearing `start_date` is a separate store call issued before the field
    /// update; the two are not atomic.
    pub async fn update(
        &self,
        teacher: &Teacher,
        id: &str,
        params: AnnouncementParams,
    ) -> Result<Announcement> {
        let result = self.update_inner(teacher, id, params).await;
        metrics::record("update", &result);
        result
    }

    async fn update_inner(
        &self,
        teacher: &Teacher,
        id: &str,
        params: AnnouncementParams,
    ) -> Result<Announcement> {
        let id = parse_id(id)?;
        let existing = self
            .announcements
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;
        let fields = params.validate()?;

        if fields.start.is_none() && existing.start_date.is_some() {
            self.announcements.unset_start_date(id).await?;
        }

        let outcome = self.announcements.update_fields(id, &fields).await?;
        if outcome.matched == 0 && outcome.modified == 0 {
            return Err(AppError::UpdateFailed);
        }

        let updated = self
            .announcements
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;
        info!(
            teacher = %teacher.username,
            announcement_id = %id,
            "Announcement updated"
        );
        Ok(updated)
    }

    pub async fn delete(&self, teacher: &Teacher, id: &str) -> Result<()> {
        let result = self.delete_inner(teacher, id).await;
        metrics::record("delete", &result);
        result
    }

    async fn delete_inner(&self, teacher: &Teacher, id: &str) -> Result<()> {
        let id = parse_id(id)?;
        if self.announcements.delete_by_id(id).await? == 0 {
            return Err(AppError::NotFound);
        }
        info!(
            teacher = %teacher.username,
            announcement_id = %id,
            "Announcement deleted"
        );
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidId)
}
