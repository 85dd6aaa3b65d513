use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

use crate::api::error;

/// Persisted as SMALLINT; the ordinals are part of the storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[repr(i16)]
#[serde(rename_all = "lowercase")]
pub enum FriendStatus {
    Pending = 0,
    Accepted = 1,
    Blocked = 2,
}

impl FriendStatus {
    pub fn name(&self) -> &'static str {
        match self {
            FriendStatus::Pending => "Pending",
            FriendStatus::Accepted => "Accept",
            FriendStatus::Blocked => "Block",
        }
    }
}

impl From<FriendStatus> for i16 {
    fn from(status: FriendStatus) -> Self {
        status as i16
    }
}

impl TryFrom<i16> for FriendStatus {
    type Error = error::SystemError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FriendStatus::Pending),
            1 => Ok(FriendStatus::Accepted),
            2 => Ok(FriendStatus::Blocked),
            other => Err(error::SystemError::bad_request(format!("Unknown friend status {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FriendEntity {
    pub id: Uuid,
    pub sender_type: String,
    pub sender_id: Uuid,
    pub receiver_type: String,
    pub receiver_id: Uuid,
    pub status: FriendStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordinals_are_stable() {
        assert_eq!(i16::from(FriendStatus::Pending), 0);
        assert_eq!(i16::from(FriendStatus::Accepted), 1);
        assert_eq!(i16::from(FriendStatus::Blocked), 2);
    }

    #[test]
    fn test_status_from_ordinal() {
        assert_eq!(FriendStatus::try_from(1).unwrap(), FriendStatus::Accepted);
        assert!(FriendStatus::try_from(3).is_err());
        assert!(FriendStatus::try_from(-1).is_err());
    }

    #[test]
    fn test_status_names() {
        assert_eq!(FriendStatus::Pending.name(), "Pending");
        assert_eq!(FriendStatus::Accepted.name(), "Accept");
        assert_eq!(FriendStatus::Blocked.name(), "Block");
    }

    #[test]
    fn test_status_serialize() {
        let json = serde_json::to_string(&FriendStatus::Blocked).unwrap();
        assert_eq!(json, r#""blocked""#);
    }
}
