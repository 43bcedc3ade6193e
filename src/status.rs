// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aggregated stove status.
//!
//! A [`StoveStatus`] is an immutable snapshot combining the four vendor
//! sub-queries (device status, power level, target temperature, ambient
//! temperature). The coordinator holds exactly one current snapshot and
//! replaces it wholesale on each successful refresh; readers never see a
//! partially updated status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vendor status code for an idle stove, ready to ignite.
pub const STATUS_IDLE: i64 = 0;

/// Vendor status code for the final-cleaning cycle.
///
/// While powering down the stove self-cleans and rejects ignition
/// commands until it returns to idle.
pub const STATUS_FINAL_CLEANING: i64 = 6;

/// Snapshot of the device state at one fetch instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoveStatus {
    /// Vendor status code, if the device reported one.
    pub status_code: Option<i64>,
    /// Human-readable status description from the device.
    pub status_text: Option<String>,
    /// Vendor error code, if any.
    pub error_code: Option<i64>,
    /// Vendor error description, if any.
    pub error_description: Option<String>,
    /// Current flame power level.
    pub power: f64,
    /// Target temperature in degrees Celsius.
    pub set_temperature: f64,
    /// Measured ambient temperature in degrees Celsius.
    pub ambient_temperature: f64,
    /// Whether the stove is actively heating or igniting.
    pub is_on: bool,
    /// Whether an ignition request is queued for after final cleaning.
    ///
    /// Injected by the coordinator; the device client always reports
    /// `false` here.
    pub pending_ignition: bool,
    /// Instant at which the four sub-queries were issued.
    pub fetched_at: DateTime<Utc>,
}

impl StoveStatus {
    /// Returns `true` when the device reported the idle status code.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.status_code == Some(STATUS_IDLE)
    }

    /// Returns `true` when the device is in its final-cleaning cycle.
    #[must_use]
    pub fn is_final_cleaning(&self) -> bool {
        self.status_code == Some(STATUS_FINAL_CLEANING)
    }
}

/// Derives the on/off classification from the vendor status.
///
/// Fixed rule: code 0 (idle) and code 6 (final cleaning) are off, any
/// other reported code is on. Only when no code is available does the
/// status text get inspected: the keywords `CLEANING`, `OFF` and `STOP`
/// (case-insensitive) force off, any other text counts as on, and no
/// text at all counts as off.
#[must_use]
pub fn derive_is_on(status_code: Option<i64>, status_text: Option<&str>) -> bool {
    match status_code {
        Some(STATUS_IDLE | STATUS_FINAL_CLEANING) => false,
        Some(_) => true,
        None => status_text.is_some_and(|text| {
            let normalized = text.to_uppercase();
            !["CLEANING", "OFF", "STOP"]
                .iter()
                .any(|keyword| normalized.contains(keyword))
        }),
    }
}
