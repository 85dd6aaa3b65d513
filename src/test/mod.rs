use std::sync::Arc;

use uuid::Uuid;

use crate::modules::friend::{
    events::FriendEvent,
    model::EntityRef,
    notifier::{ChannelNotifier, NoopNotifier},
    repository::FriendRepository,
    repository_memory::FriendRepositoryMemory,
    schema::FriendStatus,
    service::FriendService,
};

fn user() -> EntityRef {
    EntityRef::new("user", Uuid::now_v7())
}

type MemoryService = FriendService<FriendRepositoryMemory, NoopNotifier>;

fn memory_service() -> (MemoryService, FriendRepositoryMemory) {
    let repo = FriendRepositoryMemory::new();
    let service = FriendService::with_dependencies(Arc::new(repo.clone()), Arc::new(NoopNotifier));
    (service, repo)
}

async fn request_accept_unfriend<R: FriendRepository>(service: &FriendService<R, NoopNotifier>) {
    let (u1, u2) = (user(), user());

    let request = service.send_friend_request(&u1, &u2).await.unwrap().unwrap();
    assert_eq!((request.sender(), request.receiver()), (u1.clone(), u2.clone()));
    assert_eq!(request.status, FriendStatus::Pending);

    let accepted = service.accept_friend_request(&u2, &u1).await.unwrap().unwrap();
    assert_eq!(accepted.id, request.id);
    assert_eq!(accepted.status, FriendStatus::Accepted);

    let friends_of_u1 = service.get_friends(&u1).await.unwrap();
    let friends_of_u2 = service.get_friends(&u2).await.unwrap();
    assert_eq!(friends_of_u1.len(), 1);
    assert_eq!(friends_of_u2.len(), 1);
    assert_eq!(friends_of_u1[0].counterpart(&u1), Some(u2.clone()));
    assert_eq!(friends_of_u2[0].counterpart(&u2), Some(u1.clone()));

    assert!(service.unfriend(&u1, &u2).await.unwrap());
    assert!(service.get_friends(&u1).await.unwrap().is_empty());
    assert!(service.get_friends(&u2).await.unwrap().is_empty());
    assert!(service.friendship(&u1, &u2, false).await.unwrap().is_none());
}

async fn block_over_pending<R: FriendRepository>(service: &FriendService<R, NoopNotifier>) {
    let (u1, u2) = (user(), user());

    let request = service.send_friend_request(&u2, &u1).await.unwrap().unwrap();
    assert_eq!(service.get_pending(&u1).await.unwrap().len(), 1);

    let block = service.block_friend(&u1, &u2).await.unwrap().unwrap();
    assert_ne!(block.id, request.id);
    assert_eq!((block.sender(), block.receiver()), (u1.clone(), u2.clone()));
    assert_eq!(block.status, FriendStatus::Blocked);

    assert!(service.get_pending(&u2).await.unwrap().is_empty());
    assert!(service.get_pending(&u1).await.unwrap().is_empty());
    assert_eq!(service.friendships(&u1).await.unwrap(), vec![block]);

    assert!(!service.unblock_friend(&u2, &u1).await.unwrap());
    assert!(service.unblock_friend(&u1, &u2).await.unwrap());
    assert!(service.friendships(&u1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_request_accept_unfriend_scenario() {
    let (service, repo) = memory_service();
    request_accept_unfriend(&service).await;
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_block_over_pending_scenario() {
    let (service, repo) = memory_service();
    block_over_pending(&service).await;
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_self_request_creates_nothing() {
    let (service, repo) = memory_service();
    let a = user();

    assert!(service.send_friend_request(&a, &a).await.unwrap().is_none());
    assert!(!service.cancel_friend_request(&a, &a).await.unwrap());
    assert!(service.accept_friend_request(&a, &a).await.unwrap().is_none());
    assert!(!service.deny_friend_request(&a, &a).await.unwrap());
    assert!(!service.unblock_friend(&a, &a).await.unwrap());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_pairs_are_independent() {
    let (service, repo) = memory_service();
    let (a, b, c) = (user(), user(), user());

    service.send_friend_request(&a, &b).await.unwrap().unwrap();
    service.send_friend_request(&a, &c).await.unwrap().unwrap();
    service.block_friend(&b, &c).await.unwrap().unwrap();

    assert_eq!(repo.len().await, 3);
    assert_eq!(service.get_sent_requests(&a).await.unwrap().len(), 2);
    assert_eq!(service.get_pending(&c).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_one_event_per_transition() {
    let repo = FriendRepositoryMemory::new();
    let (notifier, mut events) = ChannelNotifier::channel(16);
    let service = FriendService::with_dependencies(Arc::new(repo), Arc::new(notifier));
    let (a, b) = (user(), user());

    service.send_friend_request(&a, &b).await.unwrap();
    service.send_friend_request(&b, &a).await.unwrap();
    service.accept_friend_request(&a, &b).await.unwrap();
    service.accept_friend_request(&b, &a).await.unwrap();
    service.unfriend(&a, &b).await.unwrap();
    service.unfriend(&a, &b).await.unwrap();
    service.block_friend(&b, &a).await.unwrap();
    service.deny_friend_request(&a, &b).await.unwrap();
    drop(service);

    let mut names = Vec::new();
    while let Some(event) = events.recv().await {
        names.push(event.name());
        if let FriendEvent::AcceptFriend { actor, counterpart } = &event {
            assert_eq!((actor, counterpart), (&b, &a));
        }
    }

    assert_eq!(names, vec!["friendRequest", "acceptFriend", "unfriend", "blockFriend"]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a disposable Postgres database"]
async fn test_postgres_scenarios() {
    use crate::{configs, constants::Env, modules::friend::repository_pg::FriendRepositoryPg};

    let env = Env::load().unwrap();
    let pool = configs::connect_database(&env).await.unwrap();
    configs::run_migrations(&pool).await.unwrap();

    let service = FriendService::with_dependencies(
        Arc::new(FriendRepositoryPg::new(pool)),
        Arc::new(NoopNotifier),
    );

    request_accept_unfriend(&service).await;
    block_over_pending(&service).await;
}
