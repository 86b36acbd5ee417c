//! Subscriber registry and event fan-out.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::TimerEvent;

/// Identifier of a registered subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Subscriber {
    id: SubscriberId,
    sender: mpsc::UnboundedSender<String>,
}

/// Fans timer events out to every open listener connection.
///
/// Subscribers are kept in registration order and events are delivered in
/// that order. The list is shared between the HTTP endpoint and the tool
/// handler, so every access goes through the mutex.
pub struct Broadcaster {
    subscribers: Mutex<Vec<Subscriber>>,
    next_id: AtomicU64,
    enabled: AtomicBool,
}

/// A registered listener.
///
/// Yields serialized event payloads and unregisters itself when dropped.
pub struct Subscription {
    id: SubscriberId,
    receiver: mpsc::UnboundedReceiver<String>,
    broadcaster: Weak<Broadcaster>,
}

impl Broadcaster {
    /// Create an enabled broadcaster with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            enabled: AtomicBool::new(true),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Subscriber>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new listener at the end of the subscriber list.
    pub fn subscribe(self: &Arc<Self>) -> Subscription {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = mpsc::unbounded_channel();

        let mut subscribers = self.lock();
        subscribers.push(Subscriber { id, sender });
        info!("Listener {} subscribed ({} active)", id, subscribers.len());

        Subscription {
            id,
            receiver,
            broadcaster: Arc::downgrade(self),
        }
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.lock();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        let removed = subscribers.len() != before;
        if removed {
            info!("Listener {} unsubscribed ({} active)", id, subscribers.len());
        }
        removed
    }

    /// Send an event to every registered listener.
    ///
    /// Returns how many listeners it was delivered to. Listeners whose
    /// connection has gone away are dropped from the list without affecting
    /// delivery to the others.
    pub fn broadcast(&self, event: &TimerEvent) -> usize {
        if !self.is_enabled() {
            debug!("Notifications disabled, skipping {:?}", event);
            return 0;
        }

        let payload = match event.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Dropping notification for '{}': {}", event.task_name(), e);
                return 0;
            }
        };

        let mut subscribers = self.lock();
        subscribers.retain(|subscriber| match subscriber.sender.send(payload.clone()) {
            Ok(()) => true,
            Err(_) => {
                debug!("Listener {} is gone, removing it", subscriber.id);
                false
            }
        });

        debug!("Broadcast {} to {} listener(s)", payload, subscribers.len());
        subscribers.len()
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    /// Whether events are being delivered.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Stop delivering events. Used when the event endpoint is unavailable.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscription {
    /// Identifier of this listener.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next event payload.
    ///
    /// Returns `None` once the broadcaster has been dropped.
    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(broadcaster) = self.broadcaster.upgrade() {
            broadcaster.unsubscribe(self.id);
        }
    }
}
