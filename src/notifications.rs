//! Notification channel
//!
//! The logger posts two notifications per stored log: [`LogNotification::NewLog`]
//! carrying the level, then [`LogNotification::RefreshLogs`]. Observers such as a
//! debug window subscribe through a [`NotificationChannel`] implementation.

use crate::config::NotificationConfig;
use crate::core::log::LogLevel;
use std::fmt::Debug;
use tokio::sync::broadcast;

/// A notification posted by the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogNotification {
    /// A log with this level was stored.
    NewLog(LogLevel),
    /// Observers should reload their view of the store.
    RefreshLogs,
}

impl LogNotification {
    /// Topic name of the notification.
    pub fn topic(&self) -> &'static str {
        match self {
            LogNotification::NewLog(_) => "new_log",
            LogNotification::RefreshLogs => "refresh_logs",
        }
    }
}

/// Outcome of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// At least one observer received the notification.
    Delivered,
    /// Nobody was listening. Not an error.
    NoListeners,
}

/// Pub/sub seam the logger posts into.
///
/// Posting happens inside the logger's serialized section, so implementations
/// must not call back into the same logger.
pub trait NotificationChannel: Send + Sync + Debug {
    fn post(&self, notification: LogNotification) -> Delivery;
}

/// [`NotificationChannel`] backed by a `tokio::sync::broadcast` channel.
///
/// Sending never blocks; receivers that fall more than `capacity` notifications
/// behind see `RecvError::Lagged`.
#[derive(Debug, Clone)]
pub struct BroadcastChannel {
    sender: broadcast::Sender<LogNotification>,
}

impl BroadcastChannel {
    /// `capacity` must be greater than zero.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::new(config.capacity)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LogNotification> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastChannel {
    fn default() -> Self {
        Self::from_config(&NotificationConfig::default())
    }
}

impl NotificationChannel for BroadcastChannel {
    fn post(&self, notification: LogNotification) -> Delivery {
        match self.sender.send(notification) {
            Ok(_) => Delivery::Delivered,
            Err(_) => Delivery::NoListeners,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn test_topics() {
        assert_eq!(LogNotification::NewLog(LogLevel::Info).topic(), "new_log");
        assert_eq!(LogNotification::RefreshLogs.topic(), "refresh_logs");
    }

    #[test]
    fn test_post_without_listeners() {
        let channel = BroadcastChannel::new(4);
        assert_eq!(channel.receiver_count(), 0);
        assert_eq!(
            channel.post(LogNotification::RefreshLogs),
            Delivery::NoListeners
        );
    }

    #[test]
    fn test_post_in_order() {
        let channel = BroadcastChannel::new(4);
        let mut receiver = channel.subscribe();

        assert_eq!(
            channel.post(LogNotification::NewLog(LogLevel::Error)),
            Delivery::Delivered
        );
        channel.post(LogNotification::RefreshLogs);

        let first = tokio_test::block_on(receiver.recv()).unwrap();
        let second = tokio_test::block_on(receiver.recv()).unwrap();
        assert_eq!(first, LogNotification::NewLog(LogLevel::Error));
        assert_eq!(second, LogNotification::RefreshLogs);
        assert_eq!(receiver.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let channel = BroadcastChannel::default();
        let mut a = channel.subscribe();
        let mut b = channel.subscribe();

        channel.post(LogNotification::NewLog(LogLevel::Warning));

        assert_eq!(
            a.recv().await.unwrap(),
            LogNotification::NewLog(LogLevel::Warning)
        );
        assert_eq!(
            b.recv().await.unwrap(),
            LogNotification::NewLog(LogLevel::Warning)
        );
    }
}
