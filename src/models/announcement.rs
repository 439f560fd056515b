use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{error::AppError, models::timestamp::IsoTimestamp};

/// An announcement as returned to API consumers.
///
/// `start_date` is left out of the JSON entirely when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    pub id: Uuid,
    pub message: String,
    pub expiration_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Query params for POST /announcements and PUT /announcements/{id}.
#[derive(Debug, Default, Deserialize)]
pub struct AnnouncementParams {
    pub message: Option<String>,
    pub expiration_date: Option<String>,
    pub start_date: Option<String>,
}

/// The mutable fields of an announcement, validated.
#[derive(Debug, Clone)]
pub struct AnnouncementFields {
    pub message: String,
    pub expiration: IsoTimestamp,
    pub start: Option<IsoTimestamp>,
}

impl AnnouncementParams {
    /// Check required params and parse both dates.
    /// An empty `start_date` is treated as not supplied.
    pub fn validate(self) -> Result<AnnouncementFields, AppError> {
        let message = self.message.ok_or(AppError::MissingParameter("message"))?;
        let expiration_raw = self
            .expiration_date
            .ok_or(AppError::MissingParameter("expiration_date"))?;

        let expiration = IsoTimestamp::parse(&expiration_raw).ok_or(AppError::InvalidDate)?;
        let start = match self.start_date.filter(|s| !s.is_empty()) {
            Some(raw) => Some(IsoTimestamp::parse(&raw).ok_or(AppError::InvalidDate)?),
            None => None,
        };

        Ok(AnnouncementFields {
            message,
            expiration,
            start,
        })
    }
}

/// A record ready to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub fields: AnnouncementFields,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Which announcements a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementFilter {
    All,
    /// Started (or no start) and not yet expired at the given instant.
    ActiveAt(DateTime<Utc>),
}

impl AnnouncementFilter {
    pub fn matches(&self, starts_at: Option<DateTime<Utc>>, expires_at: DateTime<Utc>) -> bool {
        match *self {
            AnnouncementFilter::All => true,
            AnnouncementFilter::ActiveAt(now) => {
                starts_at.map_or(true, |start| start <= now) && expires_at >= now
            }
        }
    }
}

/// Row counts reported by a field update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn params(message: Option<&str>, expiration: Option<&str>, start: Option<&str>) -> AnnouncementParams {
        AnnouncementParams {
            message: message.map(str::to_string),
            expiration_date: expiration.map(str::to_string),
            start_date: start.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_keeps_raw_dates() {
        let fields = params(Some("Picture day"), Some("2030-01-01T00:00:00Z"), Some("2029-12-01"))
            .validate()
            .unwrap();
        assert_eq!(fields.message, "Picture day");
        assert_eq!(fields.expiration.as_str(), "2030-01-01T00:00:00Z");
        assert_eq!(fields.start.unwrap().as_str(), "2029-12-01");
    }

    #[test]
    fn test_validate_empty_start_is_absent() {
        let fields = params(Some("m"), Some("2030-01-01T00:00:00Z"), Some(""))
            .validate()
            .unwrap();
        assert!(fields.start.is_none());
    }

    #[test]
    fn test_validate_errors() {
        assert!(matches!(
            params(None, Some("2030-01-01"), None).validate(),
            Err(AppError::MissingParameter("message"))
        ));
        assert!(matches!(
            params(Some("m"), None, None).validate(),
            Err(AppError::MissingParameter("expiration_date"))
        ));
        assert!(matches!(
            params(Some("m"), Some("next week"), None).validate(),
            Err(AppError::InvalidDate)
        ));
        assert!(matches!(
            params(Some("m"), Some("2030-01-01"), Some("soon")).validate(),
            Err(AppError::InvalidDate)
        ));
    }

    #[test]
    fn test_start_after_expiration_is_accepted() {
        let fields = params(Some("m"), Some("2030-01-01"), Some("2031-01-01"))
            .validate()
            .unwrap();
        assert!(fields.start.unwrap().instant() > fields.expiration.instant());
    }

    #[test]
    fn test_active_filter_window() {
        let now = Utc::now();
        let filter = AnnouncementFilter::ActiveAt(now);
        let day = Duration::days(1);

        assert!(filter.matches(None, now + day));
        assert!(filter.matches(Some(now - day), now + day));
        // Both bounds are inclusive
        assert!(filter.matches(Some(now), now));
        assert!(!filter.matches(None, now - day));
        assert!(!filter.matches(Some(now + day), now + day * 2));
        assert!(AnnouncementFilter::All.matches(Some(now + day), now - day));
    }

    #[test]
    fn test_absent_start_date_is_not_serialized() {
        let announcement = Announcement {
            id: Uuid::new_v4(),
            message: "m".into(),
            expiration_date: "2030-01-01T00:00:00Z".into(),
            start_date: None,
            created_by: "mrodriguez".into(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&announcement).unwrap();
        assert!(value.get("start_date").is_none());
        assert_eq!(value["id"], announcement.id.to_string());
    }
}
