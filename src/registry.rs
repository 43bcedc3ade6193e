// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-layer lookup of coordinators per configured entry.
//!
//! Host frameworks typically keep one coordinator per configured stove
//! and need to locate it from setup and teardown paths. The registry is
//! that mapping made explicit; the coordinator itself carries no global
//! state.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::coordinator::StoveCoordinator;

/// Unique identifier for a configured stove entry.
///
/// A wrapper around UUID v4 providing a distinct type for entry
/// identification.
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Creates a new unique entry identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an entry identifier from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = &self.0.to_string()[..8];
        write!(f, "EntryId({short}...)")
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mapping from entry identifiers to their coordinators.
///
/// Cheap to clone; all clones share the same map.
///
/// # Examples
///
/// ```no_run
/// use winet_stove::{CoordinatorRegistry, EntryId, StoveConfig, StoveCoordinator};
///
/// # async fn example() -> winet_stove::Result<()> {
/// let registry = CoordinatorRegistry::new();
/// let coordinator = StoveCoordinator::new(&StoveConfig::with_token("ABCD1234"))?;
///
/// let entry_id = EntryId::new();
/// registry.insert(entry_id, coordinator).await;
///
/// if let Some(coordinator) = registry.get(entry_id).await {
///     coordinator.refresh().await?;
/// }
///
/// registry.remove(entry_id).await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoordinatorRegistry {
    entries: Arc<RwLock<HashMap<EntryId, Arc<StoveCoordinator>>>>,
}

impl CoordinatorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a coordinator for an entry, replacing any previous one.
    pub async fn insert(&self, entry_id: EntryId, coordinator: StoveCoordinator) {
        self.entries
            .write()
            .await
            .insert(entry_id, Arc::new(coordinator));
    }

    /// Looks up the coordinator for an entry.
    pub async fn get(&self, entry_id: EntryId) -> Option<Arc<StoveCoordinator>> {
        self.entries.read().await.get(&entry_id).cloned()
    }

    /// Removes an entry's coordinator.
    ///
    /// Returns the removed coordinator, or `None` if the entry was
    /// unknown.
    pub async fn remove(&self, entry_id: EntryId) -> Option<Arc<StoveCoordinator>> {
        self.entries.write().await.remove(&entry_id)
    }

    /// Returns all registered entry identifiers.
    pub async fn entry_ids(&self) -> Vec<EntryId> {
        self.entries.read().await.keys().copied().collect()
    }

    /// Returns the number of registered entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` when no entry is registered.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoveConfig;

    fn coordinator() -> StoveCoordinator {
        StoveCoordinator::new(&StoveConfig::with_token("ABCD1234")).unwrap()
    }

    #[tokio::test]
    async fn new_registry_is_empty() {
        let registry = CoordinatorRegistry::new();
        assert!(registry.is_empty().await);
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn insert_and_get() {
        let registry = CoordinatorRegistry::new();
        let entry_id = EntryId::new();

        registry.insert(entry_id, coordinator()).await;

        assert_eq!(registry.len().await, 1);
        assert!(registry.get(entry_id).await.is_some());
        assert!(registry.entry_ids().await.contains(&entry_id));
    }

    #[tokio::test]
    async fn get_unknown_returns_none() {
        let registry = CoordinatorRegistry::new();
        assert!(registry.get(EntryId::new()).await.is_none());
    }

    #[tokio::test]
    async fn remove_returns_coordinator() {
        let registry = CoordinatorRegistry::new();
        let entry_id = EntryId::new();
        registry.insert(entry_id, coordinator()).await;

        assert!(registry.remove(entry_id).await.is_some());
        assert!(registry.is_empty().await);
        assert!(registry.remove(entry_id).await.is_none());
    }

    #[tokio::test]
    async fn entry_ids_are_unique() {
        let id1 = EntryId::new();
        let id2 = EntryId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn entry_id_debug_is_shortened() {
        let id = EntryId::new();
        let debug = format!("{id:?}");
        assert!(debug.starts_with("EntryId("));
        assert!(debug.ends_with("...)"));
    }
}
