use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::friend::schema::{FriendEntity, FriendStatus};

/// Polymorphic reference to any record that can take part in a friendship.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub entity_type: String,
    pub entity_id: Uuid,
}

impl EntityRef {
    pub fn new(entity_type: impl Into<String>, entity_id: Uuid) -> Self {
        EntityRef { entity_type: entity_type.into(), entity_id }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.entity_id)
    }
}

/// Implemented by host types that can send and receive friend requests.
pub trait Friendable {
    fn entity_ref(&self) -> EntityRef;

    fn is(&self, other: &(impl Friendable + ?Sized)) -> bool {
        self.entity_ref() == other.entity_ref()
    }
}

impl Friendable for EntityRef {
    fn entity_ref(&self) -> EntityRef {
        self.clone()
    }
}

impl<T: Friendable + ?Sized> Friendable for &T {
    fn entity_ref(&self) -> EntityRef {
        (**self).entity_ref()
    }
}

pub struct InsertFriend {
    pub sender: EntityRef,
    pub receiver: EntityRef,
    pub status: FriendStatus,
}

impl InsertFriend {
    pub fn new(sender: EntityRef, receiver: EntityRef, status: FriendStatus) -> Self {
        InsertFriend { sender, receiver, status }
    }
}

impl FriendEntity {
    pub fn sender(&self) -> EntityRef {
        EntityRef::new(self.sender_type.clone(), self.sender_id)
    }

    pub fn receiver(&self) -> EntityRef {
        EntityRef::new(self.receiver_type.clone(), self.receiver_id)
    }

    pub fn is_sender(&self, entity: &EntityRef) -> bool {
        self.sender_type == entity.entity_type && self.sender_id == entity.entity_id
    }

    pub fn is_receiver(&self, entity: &EntityRef) -> bool {
        self.receiver_type == entity.entity_type && self.receiver_id == entity.entity_id
    }

    /// The other side of the record as seen from `entity`, if `entity` is a party at all.
    pub fn counterpart(&self, entity: &EntityRef) -> Option<EntityRef> {
        if self.is_sender(entity) {
            Some(self.receiver())
        } else if self.is_receiver(entity) {
            Some(self.sender())
        } else {
            None
        }
    }
}
