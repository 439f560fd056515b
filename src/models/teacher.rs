use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TeacherRole {
    Teacher,
    Admin,
}

impl std::fmt::Display for TeacherRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TeacherRole::Teacher => "teacher",
            TeacherRole::Admin => "admin",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for TeacherRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(TeacherRole::Teacher),
            "admin" => Ok(TeacherRole::Admin),
            _ => Err(anyhow::anyhow!("Unknown role: {s}")),
        }
    }
}

/// A row of the teacher directory. Only its existence matters to the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub username: String,
    pub display_name: String,
    /// Stored as TEXT, see [`TeacherRole`] for accepted values.
    pub role: String,
    pub created_at: DateTime<Utc>,
}
