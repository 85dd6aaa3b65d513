use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::model::InsertFriend;
use crate::modules::friend::query::FriendQuery;
use crate::modules::friend::schema::{FriendEntity, FriendStatus};

#[async_trait::async_trait]
pub trait FriendRepository: Send + Sync {
    /// First matching record, ordered by creation time.
    async fn find_first(&self, query: &FriendQuery)
    -> Result<Option<FriendEntity>, error::SystemError>;

    async fn find_all(&self, query: &FriendQuery) -> Result<Vec<FriendEntity>, error::SystemError>;

    async fn create_friendship(
        &self,
        friend: &InsertFriend,
    ) -> Result<FriendEntity, error::SystemError>;

    async fn update_status(
        &self,
        id: &Uuid,
        status: FriendStatus,
    ) -> Result<FriendEntity, error::SystemError>;

    async fn delete_friendship(&self, id: &Uuid) -> Result<bool, error::SystemError>;

    /// Deletes `previous` (when given) and creates `friend` as one unit.
    async fn replace_friendship_atomic(
        &self,
        previous: Option<&Uuid>,
        friend: &InsertFriend,
    ) -> Result<FriendEntity, error::SystemError>;
}
