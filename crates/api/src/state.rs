use std::sync::Arc;

use custody_core::registry::Registry;
use custody_events::{EventBus, EventJournal, RegistryEvent};
use tokio::sync::Mutex;

use crate::config::ServerConfig;
use crate::ledger::Ledger;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The single writer lock around registry state and height.
    pub ledger: Arc<Mutex<Ledger>>,
    pub config: Arc<ServerConfig>,
    /// Publishes every committed transition.
    pub event_bus: Arc<EventBus>,
    /// Recent events, fed from `event_bus` by a background task.
    pub journal: Arc<EventJournal>,
}

impl AppState {
    /// Build state from configuration: a fresh registry at genesis height.
    ///
    /// The journal task is not started here; see [`AppState::spawn_journal`].
    pub fn new(config: ServerConfig) -> Self {
        let registry =
            Registry::new(config.executive.clone()).with_activation(config.registry_active);
        let ledger = Ledger::new(registry, config.genesis_height);
        let journal = EventJournal::new(config.event_journal_capacity);

        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            config: Arc::new(config),
            event_bus: Arc::new(EventBus::default()),
            journal: Arc::new(journal),
        }
    }

    /// Start the journal subscriber. Ends when the event bus is dropped.
    pub fn spawn_journal(&self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(Arc::clone(&self.journal).run(self.event_bus.subscribe()))
    }

    pub fn publish(&self, event: RegistryEvent) {
        self.event_bus.publish(event);
    }
}
