use std::sync::Arc;

use friendship::{
    configs,
    constants::Env,
    ChannelNotifier, EntityRef, FriendRepository, FriendRepositoryMemory, FriendRepositoryPg,
    FriendService, Friendable, SystemError,
};
use uuid::Uuid;

struct User {
    id: Uuid,
    name: &'static str,
}

impl User {
    fn new(name: &'static str) -> Self {
        User { id: Uuid::now_v7(), name }
    }
}

impl Friendable for User {
    fn entity_ref(&self) -> EntityRef {
        EntityRef::new("user", self.id)
    }
}

async fn run<R: FriendRepository + 'static>(repo: R, env: &Env) -> Result<(), SystemError> {
    let (notifier, mut events) = ChannelNotifier::channel(env.friend_event_buffer);
    let listener = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            tracing::info!(event = event.name(), "{} -> {}", event.actor(), event.counterpart());
        }
    });

    let service = FriendService::with_dependencies(Arc::new(repo), Arc::new(notifier));
    let (alice, bob) = (User::new("alice"), User::new("bob"));

    service.send_friend_request(&alice, &bob).await?;
    log::info!("{} has {} pending request(s)", bob.name, service.get_pending(&bob).await?.len());

    service.accept_friend_request(&bob, &alice).await?;
    log::info!("{} has {} friend(s)", alice.name, service.get_friends(&alice).await?.len());

    service.unfriend(&alice, &bob).await?;
    service.block_friend(&bob, &alice).await?;
    log::info!("{} blocked {} entity(ies)", bob.name, service.get_blocked(&bob).await?.len());

    service.unblock_friend(&bob, &alice).await?;
    let records = service.friendships(&alice).await?;
    log::info!("{} has {} friendship record(s)", alice.name, records.len());

    drop(service);
    listener.await.map_err(|e| SystemError::InternalError(Box::new(e)))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    let env = Env::load()?;
    env_logger::init();
    let subscriber = tracing_subscriber::fmt().finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| SystemError::InternalError(Box::new(e)))?;

    if env.database_url.is_some() {
        let pool = configs::connect_database(&env).await?;
        configs::run_migrations(&pool).await?;
        run(FriendRepositoryPg::new(pool), &env).await
    } else {
        log::info!("DATABASE_URL not set, using in-memory store");
        run(FriendRepositoryMemory::new(), &env).await
    }
}
