//! Storage capabilities.
//!
//! Handlers never reach for a connection directly; they receive these traits through
//! [`crate::state::AppState`]. Sessions and tasks are tombstoned: deletion sets
//! `valid_till` and every read that serves a caller filters on it.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, Session, SessionToken, Task, User, UserRecord};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. A taken email surfaces as `AppError::Conflict`.
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert_session(&self, token: SessionToken, user_id: Uuid) -> Result<Session, AppError>;
    /// Looks a token up among live sessions only.
    async fn find_live_session(&self, token: SessionToken) -> Result<Option<Session>, AppError>;
    /// Tombstones a live session. Returns the number of rows affected, 0 when the token is
    /// unknown or already revoked.
    async fn revoke_session(&self, token: SessionToken, at: DateTime<Utc>) -> Result<u64, AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persists a new task and returns it as stored.
    async fn insert_task(&self, task: Task) -> Result<Task, AppError>;
    /// Live tasks owned by `owner_id`, in storage order.
    async fn list_active_tasks(&self, owner_id: Uuid) -> Result<Vec<Task>, AppError>;
    /// A live task by id, whoever owns it. Callers enforce ownership.
    async fn get_task(&self, id: Uuid) -> Result<Option<Task>, AppError>;
    /// Rewrites the description of a live task owned by `owner_id`. `None` when no such
    /// task exists, including when it belongs to someone else.
    async fn update_task(
        &self,
        id: Uuid,
        owner_id: Uuid,
        description: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Task>, AppError>;
    /// Tombstones a live task owned by `owner_id`. Returns the number of rows affected.
    async fn soft_delete_task(&self, id: Uuid, owner_id: Uuid, at: DateTime<Utc>) -> Result<u64, AppError>;
}
