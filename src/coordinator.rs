// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status coordinator and deferred-ignition state machine.
//!
//! The coordinator owns the periodic refresh loop, holds the last-known
//! aggregated status plus the pending-ignition flag, and mediates user
//! commands against that state. It is the sole writer of device-command
//! intent ordering; host layers only read snapshots and invoke the
//! command methods.
//!
//! # Deferred ignition
//!
//! A stove in its final-cleaning cycle (status code 6) rejects ignition.
//! When the user asks to ignite during that window the request is queued
//! instead of sent: the pending-ignition flag is set and each refresh
//! reconciles it against the fresh status. Once the device reports idle
//! (code 0) the coordinator issues the ignition itself; if the device
//! turns out to be running already via another path, the queued request
//! is dropped. An explicit cancel or a shutdown request clears the flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::StoveClient;
use crate::config::StoveConfig;
use crate::error::Result;
use crate::status::StoveStatus;
use crate::types::PowerLevel;

/// Coordinator for one stove entry.
///
/// Cheap to clone; all clones share the same published status and
/// pending-ignition flag.
///
/// # Examples
///
/// ```no_run
/// use winet_stove::{StoveConfig, StoveCoordinator};
///
/// #[tokio::main]
/// async fn main() -> winet_stove::Result<()> {
///     let coordinator = StoveCoordinator::new(&StoveConfig::with_token("ABCD1234"))?;
///     coordinator.first_refresh().await?;
///     let poller = coordinator.spawn_poller();
///
///     coordinator.request_ignition().await?;
///     if coordinator.ignition_pending() {
///         println!("stove is cleaning; ignition queued");
///     }
///
///     poller.abort();
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StoveCoordinator {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    client: StoveClient,
    poll_interval: Duration,
    /// Set when the user requested ignition during final cleaning.
    /// Mutated only by the command handlers and the reconciliation step.
    pending_ignition: AtomicBool,
    /// Published snapshot slot; last write wins between overlapping
    /// refreshes.
    status_tx: watch::Sender<Option<StoveStatus>>,
}

impl StoveCoordinator {
    /// Creates a coordinator from a configuration.
    ///
    /// No request is made yet; call [`first_refresh`](Self::first_refresh)
    /// to authenticate and load the initial status.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be created.
    pub fn new(config: &StoveConfig) -> Result<Self> {
        let client = StoveClient::new(config)?;
        Ok(Self::from_client(client, config.poll_interval()))
    }

    /// Creates a coordinator around an existing client.
    #[must_use]
    pub fn from_client(client: StoveClient, poll_interval: Duration) -> Self {
        let (status_tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                client,
                poll_interval,
                pending_ignition: AtomicBool::new(false),
                status_tx,
            }),
        }
    }

    /// Authenticates and performs the initial refresh.
    ///
    /// Intended to run once at setup, before the poller is spawned, so
    /// setup fails loudly when the entry is misconfigured.
    ///
    /// # Errors
    ///
    /// Returns error if authentication or the refresh fails.
    pub async fn first_refresh(&self) -> Result<StoveStatus> {
        self.inner.client.authenticate().await?;
        self.refresh().await
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Fetches a fresh aggregated status, reconciles the queued ignition
    /// and publishes the result.
    ///
    /// On failure the previously published status stays in place and the
    /// pending-ignition flag is left untouched.
    ///
    /// # Errors
    ///
    /// Returns error if the aggregated fetch fails. A failing deferred
    /// ignition attempt does not fail the refresh; it is logged and
    /// retried on the next one.
    pub async fn refresh(&self) -> Result<StoveStatus> {
        let mut snapshot = self.inner.client.aggregated_status().await?;
        self.reconcile_pending_ignition(&snapshot).await;
        snapshot.pending_ignition = self.ignition_pending();
        self.inner.status_tx.send_replace(Some(snapshot.clone()));
        Ok(snapshot)
    }

    /// Spawns the periodic refresh task.
    ///
    /// The first tick fires immediately, then every poll interval. Tick
    /// failures are logged and leave the last good status visible; the
    /// loop never dies. Abort the returned handle to stop polling.
    #[must_use]
    pub fn spawn_poller(&self) -> JoinHandle<()> {
        let coordinator = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(coordinator.poll_interval());
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                coordinator.refresh_quietly().await;
            }
        })
    }

    /// Applies the deferred-ignition transitions against a fresh status.
    async fn reconcile_pending_ignition(&self, fresh: &StoveStatus) {
        if !self.ignition_pending() {
            return;
        }

        if fresh.is_idle() {
            match self.inner.client.ignite().await {
                Ok(()) => {
                    self.inner.pending_ignition.store(false, Ordering::SeqCst);
                    tracing::info!("queued ignition issued after final cleaning");
                }
                Err(err) => {
                    // Flag stays set; the next refresh retries.
                    tracing::warn!(error = %err, "queued ignition attempt failed");
                }
            }
        } else if fresh.is_on {
            // Running already, e.g. ignited manually at the stove.
            self.inner.pending_ignition.store(false, Ordering::SeqCst);
            tracing::info!("stove already running; dropping queued ignition");
        }
    }

    /// Refreshes and downgrades a failure to a stale-data warning.
    async fn refresh_quietly(&self) {
        if let Err(err) = self.refresh().await {
            tracing::warn!(error = %err, "refresh failed; keeping last known status");
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Requests ignition.
    ///
    /// If the device was last observed in final cleaning the request is
    /// queued instead of sent; the flag is replayed by the refresh loop
    /// once the device returns to idle. Otherwise the stove is ignited
    /// directly, superseding any stale queued request.
    ///
    /// # Errors
    ///
    /// Returns error if the direct ignition call fails.
    pub async fn request_ignition(&self) -> Result<()> {
        if self.is_final_cleaning() {
            self.inner.pending_ignition.store(true, Ordering::SeqCst);
            tracing::info!("stove in final cleaning; ignition queued until idle");
        } else {
            self.cancel_pending_ignition();
            self.inner.client.ignite().await?;
        }
        self.refresh_quietly().await;
        Ok(())
    }

    /// Requests shutdown, clearing any queued ignition first.
    ///
    /// # Errors
    ///
    /// Returns error if the shutdown call fails.
    pub async fn request_shutdown(&self) -> Result<()> {
        self.cancel_pending_ignition();
        self.inner.client.shutdown().await?;
        self.refresh_quietly().await;
        Ok(())
    }

    /// Drops a queued ignition request without touching the device.
    ///
    /// Idempotent: cancelling when nothing is queued does nothing and
    /// logs nothing.
    pub fn cancel_pending_ignition(&self) {
        if self.inner.pending_ignition.swap(false, Ordering::SeqCst) {
            tracing::info!("pending ignition cancelled");
        }
    }

    /// Sets the target temperature.
    ///
    /// # Errors
    ///
    /// Returns error if the value is out of range or the call fails.
    pub async fn request_temperature(&self, celsius: f64) -> Result<()> {
        self.inner.client.set_temperature(celsius).await?;
        self.refresh_quietly().await;
        Ok(())
    }

    /// Sets the flame power level.
    ///
    /// # Errors
    ///
    /// Returns error if the call fails.
    pub async fn request_power(&self, level: PowerLevel) -> Result<()> {
        self.inner.client.set_power(level).await?;
        self.refresh_quietly().await;
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the current published snapshot, if a refresh succeeded
    /// at least once.
    #[must_use]
    pub fn status(&self) -> Option<StoveStatus> {
        self.inner.status_tx.borrow().clone()
    }

    /// Creates a watch receiver notified on every published snapshot.
    #[must_use]
    pub fn watch_status(&self) -> watch::Receiver<Option<StoveStatus>> {
        self.inner.status_tx.subscribe()
    }

    /// Returns `true` while an ignition request is queued.
    #[must_use]
    pub fn ignition_pending(&self) -> bool {
        self.inner.pending_ignition.load(Ordering::SeqCst)
    }

    /// Returns `true` when the device was last observed in its
    /// final-cleaning cycle.
    #[must_use]
    pub fn is_final_cleaning(&self) -> bool {
        self.inner
            .status_tx
            .borrow()
            .as_ref()
            .is_some_and(StoveStatus::is_final_cleaning)
    }

    /// Returns the configured poll interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }
}
