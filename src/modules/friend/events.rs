/// Friendship events
///
/// One event is emitted for every transition that actually changed a
/// friendship record. `actor` is the entity that called the operation and
/// `counterpart` is the entity it was called with.
use serde::{Deserialize, Serialize};

use crate::modules::friend::model::EntityRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FriendEvent {
    /// A pending request was created
    #[serde(rename_all = "camelCase")]
    FriendRequest { actor: EntityRef, counterpart: EntityRef },

    /// The receiver accepted a pending request
    #[serde(rename_all = "camelCase")]
    AcceptFriend { actor: EntityRef, counterpart: EntityRef },

    /// The receiver denied a pending request
    #[serde(rename_all = "camelCase")]
    DenyFriend { actor: EntityRef, counterpart: EntityRef },

    /// The sender withdrew a pending request
    #[serde(rename_all = "camelCase")]
    CancelRequest { actor: EntityRef, counterpart: EntityRef },

    /// The actor blocked the counterpart
    #[serde(rename_all = "camelCase")]
    BlockFriend { actor: EntityRef, counterpart: EntityRef },

    /// The blocker lifted its block
    #[serde(rename_all = "camelCase")]
    UnblockFriend { actor: EntityRef, counterpart: EntityRef },

    /// An accepted friendship was removed
    #[serde(rename_all = "camelCase")]
    Unfriend { actor: EntityRef, counterpart: EntityRef },
}

impl FriendEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FriendEvent::FriendRequest { .. } => "friendRequest",
            FriendEvent::AcceptFriend { .. } => "acceptFriend",
            FriendEvent::DenyFriend { .. } => "denyFriend",
            FriendEvent::CancelRequest { .. } => "cancelRequest",
            FriendEvent::BlockFriend { .. } => "blockFriend",
            FriendEvent::UnblockFriend { .. } => "unblockFriend",
            FriendEvent::Unfriend { .. } => "unfriend",
        }
    }

    pub fn actor(&self) -> &EntityRef {
        self.parties().0
    }

    pub fn counterpart(&self) -> &EntityRef {
        self.parties().1
    }

    fn parties(&self) -> (&EntityRef, &EntityRef) {
        match self {
            FriendEvent::FriendRequest { actor, counterpart }
            | FriendEvent::AcceptFriend { actor, counterpart }
            | FriendEvent::DenyFriend { actor, counterpart }
            | FriendEvent::CancelRequest { actor, counterpart }
            | FriendEvent::BlockFriend { actor, counterpart }
            | FriendEvent::UnblockFriend { actor, counterpart }
            | FriendEvent::Unfriend { actor, counterpart } => (actor, counterpart),
        }
    }
}
