//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`RegistryEvent`]s. Share it
//! via `Arc<EventBus>`.

use chrono::{DateTime, Utc};
use custody_core::types::{AssetId, Height, Principal};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event type names
// ---------------------------------------------------------------------------

pub const ASSET_REGISTERED: &str = "asset.registered";
pub const ASSET_MODIFIED: &str = "asset.modified";
pub const ASSET_TRANSFERRED: &str = "asset.transferred";
pub const ASSET_DESTROYED: &str = "asset.destroyed";
pub const ASSET_MARKERS_AUGMENTED: &str = "asset.markers_augmented";
pub const ASSET_ARCHIVED: &str = "asset.archived";
pub const ASSET_RESTRICTED: &str = "asset.restricted";
pub const ACCESS_GRANTED: &str = "access.granted";
pub const ACCESS_REVOKED: &str = "access.revoked";
pub const REGISTRY_ACTIVATION_CHANGED: &str = "registry.activation_changed";
pub const REGISTRY_MAINTENANCE_CHANGED: &str = "registry.maintenance_changed";

// ---------------------------------------------------------------------------
// RegistryEvent
// ---------------------------------------------------------------------------

/// A committed registry transition.
///
/// Constructed via [`RegistryEvent::new`] and enriched with
/// [`for_asset`](RegistryEvent::for_asset) and
/// [`with_payload`](RegistryEvent::with_payload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEvent {
    /// Dot-separated event name, e.g. `"asset.registered"`.
    pub event_type: String,

    /// The principal whose call produced the transition.
    pub actor: Principal,

    /// Height at which the transition was committed.
    pub height: Height,

    /// The asset affected, if any. Registry-wide flag changes carry `None`.
    pub asset_id: Option<AssetId>,

    /// Event-specific data.
    pub payload: serde_json::Value,

    /// Wall-clock time the host recorded the event (UTC).
    pub timestamp: DateTime<Utc>,
}

impl RegistryEvent {
    pub fn new(event_type: impl Into<String>, actor: Principal, height: Height) -> Self {
        Self {
            event_type: event_type.into(),
            actor,
            height,
            asset_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn for_asset(mut self, asset_id: AssetId) -> Self {
        self.asset_id = Some(asset_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use custody_core::types::Principal;
/// use custody_events::bus::{EventBus, RegistryEvent, ASSET_REGISTERED};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(RegistryEvent::new(ASSET_REGISTERED, Principal::new("alice"), 1).for_asset(1));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<RegistryEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unconsumed messages are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. Dropped if there are none.
    pub fn publish(&self, event: RegistryEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = RegistryEvent::new(ACCESS_GRANTED, Principal::new("alice"), 7)
            .for_asset(42)
            .with_payload(serde_json::json!({"beneficiary": "bob"}));

        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, ACCESS_GRANTED);
        assert_eq!(received.actor, Principal::new("alice"));
        assert_eq!(received.height, 7);
        assert_eq!(received.asset_id, Some(42));
        assert_eq!(received.payload["beneficiary"], "bob");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(RegistryEvent::new(ASSET_DESTROYED, Principal::new("a"), 1));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1.event_type, ASSET_DESTROYED);
        assert_eq!(e2.event_type, ASSET_DESTROYED);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(RegistryEvent::new(ASSET_ARCHIVED, Principal::new("a"), 1));
    }

    #[test]
    fn registry_wide_event_has_no_asset() {
        let event = RegistryEvent::new(REGISTRY_MAINTENANCE_CHANGED, Principal::new("exec"), 3);
        assert!(event.asset_id.is_none());
        assert!(event.payload.is_object());
    }
}
