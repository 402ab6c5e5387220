use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::lifecycle::{Lifecycle, Tombstoned};

/// Input structure for creating or updating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// Free-text description, between 1 and 1000 characters.
    #[validate(length(min = 1, max = 1000))]
    pub description: String,

    /// Optional echo of the task id. When present on an update it must match the path.
    #[serde(default)]
    pub task_id: Option<Uuid>,
}

/// Represents a task entity as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "taskId")]
    pub id: Uuid,
    pub description: String,
    /// Identifier of the user who owns the task.
    #[serde(rename = "userId")]
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "validTill")]
    pub lifecycle: Lifecycle,
}

impl Task {
    /// Creates a new active task owned by `owner_id`, stamped with the current time.
    pub fn new(description: String, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            description,
            owner_id,
            created_at: now,
            updated_at: now,
            lifecycle: Lifecycle::Active,
        }
    }
}

impl Tombstoned for Task {
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}

/// Row shape of the `tasks` table.
#[derive(Debug, FromRow)]
pub struct TaskRow {
    pub id: Uuid,
    pub description: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub valid_till: Option<DateTime<Utc>>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            description: row.description,
            owner_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            lifecycle: row.valid_till.into(),
        }
    }
}
