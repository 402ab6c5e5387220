use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Liveness of a tombstoned record.
///
/// Storage keeps this as a nullable `valid_till` column: `NULL` is `Active`, a timestamp
/// is the moment the record was revoked. On the wire it serializes the same way, as
/// `null` or an RFC 3339 timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Active,
    Revoked { at: DateTime<Utc> },
}

impl Lifecycle {
    pub fn is_live(&self) -> bool {
        matches!(self, Lifecycle::Active)
    }

    /// The `valid_till` column value for this state.
    pub fn valid_till(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Revoked { at } => Some(*at),
        }
    }

    /// Revokes an active record. A record that is already revoked keeps its original
    /// revocation time.
    pub fn revoke(self, at: DateTime<Utc>) -> Self {
        match self {
            Lifecycle::Active => Lifecycle::Revoked { at },
            revoked => revoked,
        }
    }
}

impl From<Option<DateTime<Utc>>> for Lifecycle {
    fn from(valid_till: Option<DateTime<Utc>>) -> Self {
        match valid_till {
            None => Lifecycle::Active,
            Some(at) => Lifecycle::Revoked { at },
        }
    }
}

impl Serialize for Lifecycle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.valid_till().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Lifecycle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<DateTime<Utc>>::deserialize(deserializer).map(Lifecycle::from)
    }
}

/// A record whose deletion is a tombstone rather than a physical removal.
pub trait Tombstoned {
    fn lifecycle(&self) -> Lifecycle;

    fn is_live(&self) -> bool {
        self.lifecycle().is_live()
    }
}
