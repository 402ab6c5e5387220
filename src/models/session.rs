use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::lifecycle::{Lifecycle, Tombstoned};

/// Opaque bearer token identifying one login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// A fresh random token. v4 UUIDs carry 122 bits from the OS RNG.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for SessionToken {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for SessionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
}

impl Tombstoned for Session {
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}

/// Row shape of the `sessions` table.
#[derive(Debug, FromRow)]
pub struct SessionRow {
    pub token: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub valid_till: Option<DateTime<Utc>>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            token: row.token.into(),
            user_id: row.user_id,
            created_at: row.created_at,
            lifecycle: row.valid_till.into(),
        }
    }
}
