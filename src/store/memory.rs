//! In-process store with the same semantics as the PostgreSQL one.
//!
//! Selected with `DATABASE_URL=memory` and used by the test suite. Rows are kept in
//! insertion order, which is the "storage order" list operations return.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{SessionStore, TaskStore, UserStore};
use crate::error::AppError;
use crate::models::{NewUser, Session, SessionToken, Task, Tombstoned, User, UserRecord};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<UserRecord>>,
    sessions: RwLock<Vec<Session>>,
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn user_exists(&self, id: Uuid) -> bool {
        self.users.read().await.iter().any(|user| user.id == id)
    }
}

fn find_live<T, F>(rows: &[T], predicate: F) -> Option<&T>
where
    T: Tombstoned,
    F: Fn(&T) -> bool,
{
    rows.iter().find(|row| row.is_live() && predicate(*row))
}

fn find_live_mut<T, F>(rows: &mut [T], predicate: F) -> Option<&mut T>
where
    T: Tombstoned,
    F: Fn(&T) -> bool,
{
    rows.iter_mut().find(|row| row.is_live() && predicate(&**row))
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(AppError::Conflict("Record already exists".into()));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(record.clone());
        Ok(record.into())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().cloned().map(User::from).collect())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert_session(&self, token: SessionToken, user_id: Uuid) -> Result<Session, AppError> {
        if !self.user_exists(user_id).await {
            return Err(AppError::BadRequest("Referenced record does not exist".into()));
        }

        let mut sessions = self.sessions.write().await;
        if sessions.iter().any(|session| session.token == token) {
            return Err(AppError::Conflict("Record already exists".into()));
        }

        let session = Session {
            token,
            user_id,
            created_at: Utc::now(),
            lifecycle: Default::default(),
        };
        sessions.push(session.clone());
        Ok(session)
    }

    async fn find_live_session(&self, token: SessionToken) -> Result<Option<Session>, AppError> {
        let sessions = self.sessions.read().await;
        Ok(find_live(sessions.as_slice(), |session| session.token == token).cloned())
    }

    async fn revoke_session(&self, token: SessionToken, at: DateTime<Utc>) -> Result<u64, AppError> {
        let mut sessions = self.sessions.write().await;
        match find_live_mut(sessions.as_mut_slice(), |session| session.token == token) {
            Some(session) => {
                session.lifecycle = session.lifecycle.revoke(at);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert_task(&self, task: Task) -> Result<Task, AppError> {
        if !self.user_exists(task.owner_id).await {
            return Err(AppError::BadRequest("Referenced record does not exist".into()));
        }

        let mut tasks = self.tasks.write().await;
        if tasks.iter().any(|existing| existing.id == task.id) {
            return Err(AppError::Conflict("Record already exists".into()));
        }
        tasks.push(task.clone());
        Ok(task)
    }

    async fn list_active_tasks(&self, owner_id: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .filter(|task| task.is_live() && task.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.read().await;
        Ok(find_live(tasks.as_slice(), |task| task.id == id).cloned())
    }

    async fn update_task(
        &self,
        id: Uuid,
        owner_id: Uuid,
        description: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        Ok(
            find_live_mut(tasks.as_mut_slice(), |task| task.id == id && task.owner_id == owner_id).map(|task| {
                task.description = description.to_string();
                task.updated_at = at;
                task.clone()
            }),
        )
    }

    async fn soft_delete_task(&self, id: Uuid, owner_id: Uuid, at: DateTime<Utc>) -> Result<u64, AppError> {
        let mut tasks = self.tasks.write().await;
        match find_live_mut(tasks.as_mut_slice(), |task| task.id == id && task.owner_id == owner_id) {
            Some(task) => {
                task.lifecycle = task.lifecycle.revoke(at);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
