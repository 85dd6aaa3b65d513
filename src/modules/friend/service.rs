use std::sync::Arc;

use log::{debug, info, warn};

use crate::{
    api::error,
    modules::friend::{
        events::FriendEvent,
        model::{EntityRef, Friendable, InsertFriend},
        notifier::FriendNotifier,
        query::FriendQuery,
        repository::FriendRepository,
        schema::{FriendEntity, FriendStatus},
    },
};

/// Friendship transitions and queries for any `Friendable` entity.
///
/// Operations that do not apply to the current state (targeting oneself,
/// missing record, wrong status, wrong side of the record) return `None` or
/// `false` and leave the store untouched. Store errors are returned as is.
pub struct FriendService<R, N>
where
    R: FriendRepository,
    N: FriendNotifier,
{
    friend_repo: Arc<R>,
    notifier: Arc<N>,
}

impl<R, N> Clone for FriendService<R, N>
where
    R: FriendRepository,
    N: FriendNotifier,
{
    fn clone(&self) -> Self {
        FriendService { friend_repo: self.friend_repo.clone(), notifier: self.notifier.clone() }
    }
}

impl<R, N> FriendService<R, N>
where
    R: FriendRepository,
    N: FriendNotifier,
{
    pub fn with_dependencies(friend_repo: Arc<R>, notifier: Arc<N>) -> Self {
        info!("FriendService initialized with dependencies");
        FriendService { friend_repo, notifier }
    }

    pub async fn send_friend_request(
        &self,
        actor: &impl Friendable,
        target: &impl Friendable,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        let Some((actor, target)) = Self::parties(actor, target) else {
            return Ok(None);
        };

        if let Some(existing) = self.find_between(&actor, &target, false).await? {
            debug!("Friend request {} -> {} skipped: {:?} exists", actor, target, existing.status);
            return Ok(None);
        }

        let friend = self
            .friend_repo
            .create_friendship(&InsertFriend::new(
                actor.clone(),
                target.clone(),
                FriendStatus::Pending,
            ))
            .await?;

        info!("Friend request sent {} -> {}", actor, target);
        self.emit(FriendEvent::FriendRequest { actor, counterpart: target }).await;

        Ok(Some(friend))
    }

    pub async fn block_friend(
        &self,
        actor: &impl Friendable,
        target: &impl Friendable,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        let Some((actor, target)) = Self::parties(actor, target) else {
            return Ok(None);
        };

        let existing = self.find_between(&actor, &target, false).await?;

        if existing.as_ref().is_some_and(|f| f.status == FriendStatus::Blocked) {
            return Ok(None);
        }

        let friend = self
            .friend_repo
            .replace_friendship_atomic(
                existing.as_ref().map(|f| &f.id),
                &InsertFriend::new(actor.clone(), target.clone(), FriendStatus::Blocked),
            )
            .await?;

        info!("{} blocked {}", actor, target);
        self.emit(FriendEvent::BlockFriend { actor, counterpart: target }).await;

        Ok(Some(friend))
    }

    pub async fn unblock_friend(
        &self,
        actor: &impl Friendable,
        target: &impl Friendable,
    ) -> Result<bool, error::SystemError> {
        let Some((actor, target)) = Self::parties(actor, target) else {
            return Ok(false);
        };

        let deleted = self.delete_if(&actor, &target, FriendStatus::Blocked).await?;

        if deleted {
            info!("{} unblocked {}", actor, target);
            self.emit(FriendEvent::UnblockFriend { actor, counterpart: target }).await;
        }

        Ok(deleted)
    }

    pub async fn cancel_friend_request(
        &self,
        actor: &impl Friendable,
        target: &impl Friendable,
    ) -> Result<bool, error::SystemError> {
        let Some((actor, target)) = Self::parties(actor, target) else {
            return Ok(false);
        };

        let deleted = self.delete_if(&actor, &target, FriendStatus::Pending).await?;

        if deleted {
            info!("Friend request {} -> {} cancelled", actor, target);
            self.emit(FriendEvent::CancelRequest { actor, counterpart: target }).await;
        }

        Ok(deleted)
    }

    pub async fn accept_friend_request(
        &self,
        actor: &impl Friendable,
        target: &impl Friendable,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        let Some((actor, target)) = Self::parties(actor, target) else {
            return Ok(None);
        };

        let request = match self.find_between(&target, &actor, true).await? {
            Some(request) if request.status == FriendStatus::Pending => request,
            _ => return Ok(None),
        };

        let friend = self.friend_repo.update_status(&request.id, FriendStatus::Accepted).await?;

        info!("Friend request {} -> {} accepted", target, actor);
        self.emit(FriendEvent::AcceptFriend { actor, counterpart: target }).await;

        Ok(Some(friend))
    }

    pub async fn deny_friend_request(
        &self,
        actor: &impl Friendable,
        target: &impl Friendable,
    ) -> Result<bool, error::SystemError> {
        let Some((actor, target)) = Self::parties(actor, target) else {
            return Ok(false);
        };

        let deleted = self.delete_if(&target, &actor, FriendStatus::Pending).await?;

        if deleted {
            info!("Friend request {} -> {} denied", target, actor);
            self.emit(FriendEvent::DenyFriend { actor, counterpart: target }).await;
        }

        Ok(deleted)
    }

    pub async fn unfriend(
        &self,
        actor: &impl Friendable,
        target: &impl Friendable,
    ) -> Result<bool, error::SystemError> {
        let Some((actor, target)) = Self::parties(actor, target) else {
            return Ok(false);
        };

        let friendship = match self.find_between(&actor, &target, false).await? {
            Some(friendship) if friendship.status == FriendStatus::Accepted => friendship,
            _ => return Ok(false),
        };

        let deleted = self.friend_repo.delete_friendship(&friendship.id).await?;

        if deleted {
            info!("{} unfriended {}", actor, target);
            self.emit(FriendEvent::Unfriend { actor, counterpart: target }).await;
        }

        Ok(deleted)
    }

    /// Incoming requests waiting on `actor`.
    pub async fn get_pending(
        &self,
        actor: &impl Friendable,
    ) -> Result<Vec<FriendEntity>, error::SystemError> {
        let query =
            FriendQuery::received_by(&actor.entity_ref()).with_status(FriendStatus::Pending);
        self.friend_repo.find_all(&query).await
    }

    /// Outgoing requests `actor` is still waiting on.
    pub async fn get_sent_requests(
        &self,
        actor: &impl Friendable,
    ) -> Result<Vec<FriendEntity>, error::SystemError> {
        let query = FriendQuery::sent_by(&actor.entity_ref()).with_status(FriendStatus::Pending);
        self.friend_repo.find_all(&query).await
    }

    pub async fn get_friends(
        &self,
        actor: &impl Friendable,
    ) -> Result<Vec<FriendEntity>, error::SystemError> {
        let query =
            FriendQuery::involving(&actor.entity_ref()).with_status(FriendStatus::Accepted);
        self.friend_repo.find_all(&query).await
    }

    pub async fn get_blocked(
        &self,
        actor: &impl Friendable,
    ) -> Result<Vec<FriendEntity>, error::SystemError> {
        let query = FriendQuery::sent_by(&actor.entity_ref()).with_status(FriendStatus::Blocked);
        self.friend_repo.find_all(&query).await
    }

    /// Every record `actor` takes part in, whatever its status.
    pub async fn friendships(
        &self,
        actor: &impl Friendable,
    ) -> Result<Vec<FriendEntity>, error::SystemError> {
        self.friend_repo.find_all(&FriendQuery::involving(&actor.entity_ref())).await
    }

    pub async fn friendship(
        &self,
        sender: &impl Friendable,
        receiver: &impl Friendable,
        self_only: bool,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        self.find_between(&sender.entity_ref(), &receiver.entity_ref(), self_only).await
    }

    pub async fn is_friend_with(
        &self,
        actor: &impl Friendable,
        target: &impl Friendable,
    ) -> Result<bool, error::SystemError> {
        let friendship = self.friendship(actor, target, false).await?;
        Ok(friendship.is_some_and(|f| f.status == FriendStatus::Accepted))
    }

    pub async fn has_blocked(
        &self,
        actor: &impl Friendable,
        target: &impl Friendable,
    ) -> Result<bool, error::SystemError> {
        let friendship = self.friendship(actor, target, true).await?;
        Ok(friendship.is_some_and(|f| f.status == FriendStatus::Blocked))
    }

    fn parties(
        actor: &impl Friendable,
        target: &impl Friendable,
    ) -> Option<(EntityRef, EntityRef)> {
        let (actor, target) = (actor.entity_ref(), target.entity_ref());
        if actor == target {
            debug!("Ignoring friendship operation of {} on itself", actor);
            return None;
        }
        Some((actor, target))
    }

    async fn find_between(
        &self,
        sender: &EntityRef,
        receiver: &EntityRef,
        self_only: bool,
    ) -> Result<Option<FriendEntity>, error::SystemError> {
        self.friend_repo.find_first(&FriendQuery::between(sender, receiver, self_only)).await
    }

    /// Deletes the record sent by `sender` to `receiver` when it has `status`.
    async fn delete_if(
        &self,
        sender: &EntityRef,
        receiver: &EntityRef,
        status: FriendStatus,
    ) -> Result<bool, error::SystemError> {
        match self.find_between(sender, receiver, true).await? {
            Some(friend) if friend.status == status => {
                self.friend_repo.delete_friendship(&friend.id).await
            }
            _ => Ok(false),
        }
    }

    async fn emit(&self, event: FriendEvent) {
        if let Err(e) = self.notifier.notify(&event).await {
            warn!("Failed to deliver {} event: {}", event.name(), e);
        }
    }
}
