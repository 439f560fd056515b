//! In-memory stores used by the service and route tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{AnnouncementStore, TeacherStore};
use crate::{
    error::Result,
    models::{
        announcement::{
            Announcement, AnnouncementFields, AnnouncementFilter, NewAnnouncement, UpdateOutcome,
        },
        teacher::{Teacher, TeacherRole},
    },
};

#[derive(Debug, Clone)]
struct Row {
    announcement: Announcement,
    expires_at: DateTime<Utc>,
    starts_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct MemoryAnnouncementStore {
    rows: Mutex<Vec<Row>>,
}

impl MemoryAnnouncementStore {
    /// Snapshot of every stored record, in insertion order.
    pub fn snapshot(&self) -> Vec<Announcement> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|row| row.announcement.clone())
            .collect()
    }
}

#[async_trait]
impl AnnouncementStore for MemoryAnnouncementStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn insert(&self, new: &NewAnnouncement) -> Result<Announcement> {
        let fields = &new.fields;
        let announcement = Announcement {
            id: Uuid::new_v4(),
            message: fields.message.clone(),
            expiration_date: fields.expiration.as_str().to_string(),
            start_date: fields.start.as_ref().map(|s| s.as_str().to_string()),
            created_by: new.created_by.clone(),
            created_at: new.created_at,
        };
        self.rows.lock().unwrap().push(Row {
            announcement: announcement.clone(),
            expires_at: fields.expiration.instant(),
            starts_at: fields.start.as_ref().map(|s| s.instant()),
        });
        Ok(announcement)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|row| row.announcement.id == id)
            .map(|row| row.announcement.clone()))
    }

    async fn find_all(&self, filter: AnnouncementFilter) -> Result<Vec<Announcement>> {
        let rows = self.rows.lock().unwrap();
        let mut found: Vec<Announcement> = rows
            .iter()
            .filter(|row| filter.matches(row.starts_at, row.expires_at))
            .map(|row| row.announcement.clone())
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn update_fields(&self, id: Uuid, fields: &AnnouncementFields) -> Result<UpdateOutcome> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|row| row.announcement.id == id) else {
            return Ok(UpdateOutcome::default());
        };
        row.announcement.message = fields.message.clone();
        row.announcement.expiration_date = fields.expiration.as_str().to_string();
        row.expires_at = fields.expiration.instant();
        if let Some(start) = &fields.start {
            row.announcement.start_date = Some(start.as_str().to_string());
            row.starts_at = Some(start.instant());
        }
        Ok(UpdateOutcome {
            matched: 1,
            modified: 1,
        })
    }

    async fn unset_start_date(&self, id: Uuid) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|row| row.announcement.id == id) {
            row.announcement.start_date = None;
            row.starts_at = None;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.announcement.id != id);
        Ok((before - rows.len()) as u64)
    }
}

#[derive(Debug, Default)]
pub struct MemoryTeacherStore {
    teachers: HashMap<String, Teacher>,
}

impl MemoryTeacherStore {
    pub fn with_teachers(usernames: &[&str]) -> Self {
        let teachers = usernames
            .iter()
            .map(|username| {
                let teacher = Teacher {
                    username: username.to_string(),
                    display_name: username.to_string(),
                    role: TeacherRole::Teacher.to_string(),
                    created_at: Utc::now(),
                };
                (username.to_string(), teacher)
            })
            .collect();
        Self { teachers }
    }
}

#[async_trait]
impl TeacherStore for MemoryTeacherStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Teacher>> {
        Ok(self.teachers.get(username).cloned())
    }
}

/// Wraps [`MemoryAnnouncementStore`], logging the write calls it receives.
/// With `drop_updates` set, `update_fields` touches nothing and reports no match.
#[derive(Debug, Default)]
pub struct RecordingAnnouncementStore {
    pub inner: MemoryAnnouncementStore,
    pub drop_updates: bool,
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingAnnouncementStore {
    pub fn dropping_updates() -> Self {
        Self {
            drop_updates: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn log(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AnnouncementStore for RecordingAnnouncementStore {
    async fn ping(&self) -> Result<()> {
        self.inner.ping().await
    }

    async fn insert(&self, new: &NewAnnouncement) -> Result<Announcement> {
        self.log("insert");
        self.inner.insert(new).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self, filter: AnnouncementFilter) -> Result<Vec<Announcement>> {
        self.inner.find_all(filter).await
    }

    async fn update_fields(&self, id: Uuid, fields: &AnnouncementFields) -> Result<UpdateOutcome> {
        self.log("update_fields");
        if self.drop_updates {
            return Ok(UpdateOutcome::default());
        }
        self.inner.update_fields(id, fields).await
    }

    async fn unset_start_date(&self, id: Uuid) -> Result<()> {
        self.log("unset_start_date");
        self.inner.unset_start_date(id).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64> {
        self.log("delete_by_id");
        self.inner.delete_by_id(id).await
    }
}
