// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `winet-stove` - A Rust library to monitor and control Ravelli Smart
//! Wi-Fi pellet stoves through the CloudWiNet JSON API.
//!
//! The library polls the cloud service on an interval, aggregates the
//! vendor's independent status calls into one coherent snapshot, and
//! mediates user commands against that state. Its centrepiece is the
//! [`StoveCoordinator`] and its deferred-ignition handling: a stove in
//! its final-cleaning cycle rejects ignition, so an ignition request
//! arriving during that window is queued and replayed automatically once
//! the device reports idle again.
//!
//! # Supported Features
//!
//! - **Status polling**: periodic aggregated refresh of status, power
//!   level, target temperature and ambient temperature
//! - **Commands**: ignite, shutdown, set target temperature, set power
//!   level
//! - **Deferred ignition**: queue-and-replay of ignition requests made
//!   during the final-cleaning window, with cancellation
//! - **Credential schemes**: opaque device token or account login
//!
//! # Quick Start
//!
//! ```no_run
//! use winet_stove::{PowerLevel, StoveConfig, StoveCoordinator};
//!
//! #[tokio::main]
//! async fn main() -> winet_stove::Result<()> {
//!     let config = StoveConfig::with_token("ABCD1234");
//!     let coordinator = StoveCoordinator::new(&config)?;
//!
//!     // Authenticate and load the initial status, then start polling.
//!     let status = coordinator.first_refresh().await?;
//!     println!("ambient: {} C", status.ambient_temperature);
//!     let poller = coordinator.spawn_poller();
//!
//!     // Commands reconcile against the observed device state.
//!     coordinator.request_temperature(21.0).await?;
//!     coordinator.request_power(PowerLevel::new(3)?).await?;
//!     coordinator.request_ignition().await?;
//!
//!     if coordinator.ignition_pending() {
//!         println!("stove is mid-cleaning; ignition will replay once idle");
//!     }
//!
//!     poller.abort();
//!     Ok(())
//! }
//! ```
//!
//! # Watching status updates
//!
//! ```no_run
//! use winet_stove::{StoveConfig, StoveCoordinator};
//!
//! #[tokio::main]
//! async fn main() -> winet_stove::Result<()> {
//!     let coordinator = StoveCoordinator::new(&StoveConfig::with_token("ABCD1234"))?;
//!     coordinator.first_refresh().await?;
//!
//!     let mut updates = coordinator.watch_status();
//!     let _poller = coordinator.spawn_poller();
//!
//!     while updates.changed().await.is_ok() {
//!         if let Some(status) = updates.borrow().clone() {
//!             println!("{}: on={}", status.fetched_at, status.is_on);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
mod client;
mod config;
mod coordinator;
pub mod error;
pub mod projection;
mod registry;
pub mod status;
pub mod types;

pub use auth::Credentials;
pub use client::{StoveClient, TEMPERATURE_MAX, TEMPERATURE_MIN};
pub use config::{DEFAULT_BASE_URL, StoveConfig};
pub use coordinator::StoveCoordinator;
pub use error::{Error, ParseError, RequestError, Result, ValueError};
pub use projection::{FieldValue, StatusField};
pub use registry::{CoordinatorRegistry, EntryId};
pub use status::{STATUS_FINAL_CLEANING, STATUS_IDLE, StoveStatus, derive_is_on};
pub use types::PowerLevel;
