/// Notification sinks
///
/// A sink receives every successful friendship transition. Delivery is best
/// effort: the service logs a failed `notify` and keeps the result of the
/// transition.
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::api::error;
use crate::modules::friend::events::FriendEvent;

#[async_trait::async_trait]
pub trait FriendNotifier: Send + Sync {
    async fn notify(&self, event: &FriendEvent) -> Result<(), error::SystemError>;
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait::async_trait]
impl FriendNotifier for NoopNotifier {
    async fn notify(&self, _event: &FriendEvent) -> Result<(), error::SystemError> {
        Ok(())
    }
}

/// Writes every event as a structured tracing record.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl FriendNotifier for LogNotifier {
    async fn notify(&self, event: &FriendEvent) -> Result<(), error::SystemError> {
        let payload = serde_json::to_string(event)?;
        tracing::info!(
            event = event.name(),
            actor = %event.actor(),
            counterpart = %event.counterpart(),
            payload = %payload,
            "friendship event"
        );
        Ok(())
    }
}

/// Forwards events into a bounded channel without waiting for capacity.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::Sender<FriendEvent>,
}

impl ChannelNotifier {
    pub fn new(sender: mpsc::Sender<FriendEvent>) -> Self {
        Self { sender }
    }

    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<FriendEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self::new(sender), receiver)
    }
}

#[async_trait::async_trait]
impl FriendNotifier for ChannelNotifier {
    async fn notify(&self, event: &FriendEvent) -> Result<(), error::SystemError> {
        match self.sender.try_send(event.clone()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(event)) => {
                tracing::debug!("Friend event buffer full, dropping {}", event.name());
                Err(error::SystemError::notify("event buffer full"))
            }
            Err(TrySendError::Closed(_)) => Err(error::SystemError::notify("event channel closed")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::friend::model::EntityRef;
    use uuid::Uuid;

    fn event() -> FriendEvent {
        FriendEvent::FriendRequest {
            actor: EntityRef::new("user", Uuid::now_v7()),
            counterpart: EntityRef::new("user", Uuid::now_v7()),
        }
    }

    #[tokio::test]
    async fn test_channel_notifier_delivers() {
        let (notifier, mut receiver) = ChannelNotifier::channel(4);
        let sent = event();

        notifier.notify(&sent).await.unwrap();

        assert_eq!(receiver.recv().await, Some(sent));
    }

    #[tokio::test]
    async fn test_channel_notifier_full() {
        let (notifier, _receiver) = ChannelNotifier::channel(1);

        notifier.notify(&event()).await.unwrap();
        let result = notifier.notify(&event()).await;

        assert!(matches!(result, Err(error::SystemError::Notify(_))));
    }

    #[tokio::test]
    async fn test_channel_notifier_closed() {
        let (notifier, receiver) = ChannelNotifier::channel(1);
        drop(receiver);

        assert!(notifier.notify(&event()).await.is_err());
    }

    #[tokio::test]
    async fn test_log_notifier() {
        assert!(LogNotifier.notify(&event()).await.is_ok());
    }
}
