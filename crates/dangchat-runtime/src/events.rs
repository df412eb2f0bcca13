//! Session event fan-out for the presentation layer.
//!
//! The orchestrator commits state first, then publishes; a subscriber that
//! re-reads the snapshot on every event always sees a consistent screen.

use tokio::sync::broadcast;

use dangchat_core::{Mode, Screen};

/// Notifications a presentation layer re-renders from.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    ScreenChanged { screen: Screen },
    ResultReady { mode: Mode },
    FetchFailed { mode: Mode, message: String },
}

/// In-process fan-out based on tokio broadcast channels.
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish to all active subscribers; "no receiver" is not an error.
    pub fn publish(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers_is_ok() {
        let events = SessionEvents::new(8);
        events.publish(SessionEvent::ScreenChanged {
            screen: Screen::Hub,
        });
    }

    #[test]
    fn test_subscriber_receives_in_order() {
        tokio_test::block_on(async {
            let events = SessionEvents::new(8);
            let mut rx = events.subscribe();

            events.publish(SessionEvent::ScreenChanged {
                screen: Screen::Loading,
            });
            events.publish(SessionEvent::ResultReady { mode: Mode::Lotto });

            assert!(matches!(
                rx.recv().await.unwrap(),
                SessionEvent::ScreenChanged {
                    screen: Screen::Loading
                }
            ));
            assert!(matches!(
                rx.recv().await.unwrap(),
                SessionEvent::ResultReady { mode: Mode::Lotto }
            ));
        });
    }
}
