pub mod api;
pub mod configs;
pub mod constants;
pub mod modules;
#[cfg(test)]
mod test;

pub use api::error::SystemError;
pub use modules::friend::{
    events::FriendEvent,
    model::{EntityRef, Friendable, InsertFriend},
    notifier::{ChannelNotifier, FriendNotifier, LogNotifier, NoopNotifier},
    query::{FriendFilter, FriendQuery},
    repository::FriendRepository,
    repository_memory::FriendRepositoryMemory,
    repository_pg::FriendRepositoryPg,
    schema::{FriendEntity, FriendStatus},
    service::FriendService,
};
