use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::{SessionStore, TaskStore, UserStore};
use crate::error::AppError;
use crate::models::session::SessionRow;
use crate::models::task::TaskRow;
use crate::models::{NewUser, Session, SessionToken, Task, User, UserRecord};

const TASK_COLUMNS: &str = "id, description, user_id, created_at, updated_at, valid_till";
const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url` and brings the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let records = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(User::from).collect())
    }
}

#[async_trait]
impl SessionStore for PostgresStore {
    async fn insert_session(&self, token: SessionToken, user_id: Uuid) -> Result<Session, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            "INSERT INTO sessions (token, user_id, created_at, valid_till)
             VALUES ($1, $2, $3, NULL)
             RETURNING token, user_id, created_at, valid_till",
        )
        .bind(token.as_uuid())
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_live_session(&self, token: SessionToken) -> Result<Option<Session>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT token, user_id, created_at, valid_till
             FROM sessions WHERE token = $1 AND valid_till IS NULL",
        )
        .bind(token.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Session::from))
    }

    async fn revoke_session(&self, token: SessionToken, at: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE sessions SET valid_till = $1 WHERE token = $2 AND valid_till IS NULL",
        )
        .bind(at)
        .bind(token.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TaskStore for PostgresStore {
    async fn insert_task(&self, task: Task) -> Result<Task, AppError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "INSERT INTO tasks (id, description, user_id, created_at, updated_at, valid_till)
             VALUES ($1, $2, $3, $4, $5, NULL)
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(task.id)
        .bind(&task.description)
        .bind(task.owner_id)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_active_tasks(&self, owner_id: Uuid) -> Result<Vec<Task>, AppError> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE user_id = $1 AND valid_till IS NULL
             ORDER BY created_at, id"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn get_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND valid_till IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Task::from))
    }

    async fn update_task(
        &self,
        id: Uuid,
        owner_id: Uuid,
        description: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Task>, AppError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "UPDATE tasks SET description = $1, updated_at = $2
             WHERE id = $3 AND user_id = $4 AND valid_till IS NULL
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(description)
        .bind(at)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Task::from))
    }

    async fn soft_delete_task(&self, id: Uuid, owner_id: Uuid, at: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE tasks SET valid_till = $1
             WHERE id = $2 AND user_id = $3 AND valid_till IS NULL",
        )
        .bind(at)
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
