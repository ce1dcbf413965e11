//! Bounded in-memory journal of recent registry events.
//!
//! [`EventJournal::run`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and appends every received [`RegistryEvent`], evicting the oldest entry
//! once `capacity` is reached. The loop exits when the bus is dropped.

use std::collections::VecDeque;
use std::sync::Arc;

use custody_core::types::AssetId;
use tokio::sync::{broadcast, RwLock};

use crate::bus::RegistryEvent;

pub struct EventJournal {
    capacity: usize,
    entries: RwLock<VecDeque<RegistryEvent>>,
}

impl EventJournal {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: RwLock::new(VecDeque::new()),
        }
    }

    /// Run the journal loop until the bus closes.
    pub async fn run(self: Arc<Self>, mut receiver: broadcast::Receiver<RegistryEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.record(event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event journal lagged, some events were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, journal shutting down");
                    break;
                }
            }
        }
    }

    pub async fn record(&self, event: RegistryEvent) {
        let mut entries = self.entries.write().await;
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(event);
    }

    /// Up to `limit` most recent events, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<RegistryEvent> {
        let entries = self.entries.read().await;
        entries.iter().rev().take(limit).cloned().collect()
    }

    /// Recent events affecting one asset, newest first.
    pub async fn for_asset(&self, asset_id: AssetId, limit: usize) -> Vec<RegistryEvent> {
        self.recent_where(limit, |e| e.asset_id == Some(asset_id))
            .await
    }

    /// Up to `limit` most recent events accepted by `keep`, newest first.
    /// The limit applies after filtering.
    pub async fn recent_where(
        &self,
        limit: usize,
        keep: impl Fn(&RegistryEvent) -> bool,
    ) -> Vec<RegistryEvent> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .rev()
            .filter(|&e| keep(e))
            .take(limit)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
