use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    api::error,
    modules::friend::{
        model::InsertFriend,
        query::FriendQuery,
        repository::FriendRepository,
        schema::{FriendEntity, FriendStatus},
    },
};

/// In-process store. Rows are kept in insertion order, which is also
/// creation order, so `find_first` agrees with the Postgres ordering.
#[derive(Clone, Default)]
pub struct FriendRepositoryMemory {
    rows: Arc<RwLock<Vec<FriendEntity>>>,
}

impl FriendRepositoryMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    fn build(friend: &InsertFriend) -> FriendEntity {
        let now = chrono::Utc::now();
        FriendEntity {
            id: Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)),
            sender_type: friend.sender.entity_type.clone(),
            sender_id: friend.sender.entity_id,
            receiver_type: friend.receiver.entity_type.clone(),
            receiver_id: friend.receiver.entity_id,
            status: friend.status,
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait::async_trait]
impl FriendRepository for FriendRepositoryMemory {
    async fn find_first(
        &self,
        query: &FriendQuery,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|f| query.matches(f)).cloned())
    }

    async fn find_all(&self, query: &FriendQuery) -> Result<Vec<FriendEntity>, error::SystemError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|f| query.matches(f)).cloned().collect())
    }

    async fn create_friendship(
        &self,
        friend: &InsertFriend,
    ) -> Result<FriendEntity, error::SystemError> {
        let entity = Self::build(friend);
        self.rows.write().await.push(entity.clone());
        Ok(entity)
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: FriendStatus,
    ) -> Result<FriendEntity, error::SystemError> {
        let mut rows = self.rows.write().await;
        let friend = rows
            .iter_mut()
            .find(|f| f.id == *id)
            .ok_or_else(|| error::SystemError::not_found("Friendship not found"))?;

        friend.status = status;
        friend.updated_at = chrono::Utc::now();

        Ok(friend.clone())
    }

    async fn delete_friendship(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|f| f.id != *id);
        Ok(rows.len() < before)
    }

    async fn replace_friendship_atomic(
        &self,
        previous: Option<&Uuid>,
        friend: &InsertFriend,
    ) -> Result<FriendEntity, error::SystemError> {
        let mut rows = self.rows.write().await;
        if let Some(id) = previous {
            rows.retain(|f| f.id != *id);
        }

        let entity = Self::build(friend);
        rows.push(entity.clone());
        Ok(entity)
    }
}
