// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only field projections of a status snapshot.
//!
//! Host display layers present individual status fields (sensors,
//! switches and the like). Instead of one hand-written adapter per
//! field, [`StatusField`] enumerates the projectable fields once; a host
//! layer iterates [`StatusField::ALL`] and builds whatever UI surface it
//! needs from the labels, units and projected values.

use std::fmt;

use crate::status::StoveStatus;

/// A projectable field of [`StoveStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusField {
    /// Raw vendor status code.
    StatusCode,
    /// Human-readable status description.
    StatusText,
    /// Vendor error code.
    ErrorCode,
    /// Vendor error description.
    ErrorDescription,
    /// Flame power level.
    Power,
    /// Target temperature.
    TargetTemperature,
    /// Measured ambient temperature.
    AmbientTemperature,
    /// Derived on/off classification.
    IsOn,
    /// Whether an ignition request is queued.
    PendingIgnition,
}

impl StatusField {
    /// All projectable fields, in display order.
    pub const ALL: [Self; 9] = [
        Self::AmbientTemperature,
        Self::TargetTemperature,
        Self::Power,
        Self::StatusText,
        Self::StatusCode,
        Self::ErrorCode,
        Self::ErrorDescription,
        Self::IsOn,
        Self::PendingIgnition,
    ];

    /// Stable machine-readable key for the field.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::StatusCode => "status_code",
            Self::StatusText => "status",
            Self::ErrorCode => "error",
            Self::ErrorDescription => "error_description",
            Self::Power => "power",
            Self::TargetTemperature => "set_temp",
            Self::AmbientTemperature => "ambient_temp",
            Self::IsOn => "is_on",
            Self::PendingIgnition => "pending_ignition",
        }
    }

    /// Human-readable label for the field.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::StatusCode => "Status Code",
            Self::StatusText => "Status",
            Self::ErrorCode => "Error Code",
            Self::ErrorDescription => "Error Description",
            Self::Power => "Power Level",
            Self::TargetTemperature => "Target Temperature",
            Self::AmbientTemperature => "Ambient Temperature",
            Self::IsOn => "Heating",
            Self::PendingIgnition => "Pending Ignition",
        }
    }

    /// Unit of measurement, where one applies.
    #[must_use]
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Self::TargetTemperature | Self::AmbientTemperature => Some("\u{b0}C"),
            _ => None,
        }
    }

    /// Projects this field out of a snapshot.
    #[must_use]
    pub fn project(&self, status: &StoveStatus) -> FieldValue {
        match self {
            Self::StatusCode => status.status_code.into(),
            Self::StatusText => status.status_text.clone().into(),
            Self::ErrorCode => status.error_code.into(),
            Self::ErrorDescription => status.error_description.clone().into(),
            Self::Power => FieldValue::Float(status.power),
            Self::TargetTemperature => FieldValue::Float(status.set_temperature),
            Self::AmbientTemperature => FieldValue::Float(status.ambient_temperature),
            Self::IsOn => FieldValue::Bool(status.is_on),
            Self::PendingIgnition => FieldValue::Bool(status.pending_ignition),
        }
    }
}

/// Value of one projected field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// An integer value.
    Integer(i64),
    /// A floating point value.
    Float(f64),
    /// A textual value.
    Text(String),
    /// A boolean value.
    Bool(bool),
    /// The field has no value in this snapshot.
    None,
}

impl From<Option<i64>> for FieldValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::None, Self::Integer)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::None, Self::Text)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::None => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::derive_is_on;
    use chrono::Utc;

    fn snapshot() -> StoveStatus {
        StoveStatus {
            status_code: Some(6),
            status_text: Some("FINAL CLEANING".to_string()),
            error_code: None,
            error_description: None,
            power: 3.0,
            set_temperature: 20.0,
            ambient_temperature: 19.5,
            is_on: derive_is_on(Some(6), Some("FINAL CLEANING")),
            pending_ignition: true,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn projects_every_field() {
        let status = snapshot();
        assert_eq!(
            StatusField::StatusCode.project(&status),
            FieldValue::Integer(6)
        );
        assert_eq!(
            StatusField::StatusText.project(&status),
            FieldValue::Text("FINAL CLEANING".to_string())
        );
        assert_eq!(StatusField::ErrorCode.project(&status), FieldValue::None);
        assert_eq!(
            StatusField::AmbientTemperature.project(&status),
            FieldValue::Float(19.5)
        );
        assert_eq!(StatusField::IsOn.project(&status), FieldValue::Bool(false));
        assert_eq!(
            StatusField::PendingIgnition.project(&status),
            FieldValue::Bool(true)
        );
    }

    #[test]
    fn all_covers_every_field_once() {
        let status = snapshot();
        let mut keys: Vec<&str> = StatusField::ALL.iter().map(StatusField::key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), StatusField::ALL.len());

        for field in StatusField::ALL {
            // Every field projects without panicking and has a label.
            let _ = field.project(&status);
            assert!(!field.label().is_empty());
        }
    }

    #[test]
    fn units_only_on_temperatures() {
        assert_eq!(StatusField::TargetTemperature.unit(), Some("\u{b0}C"));
        assert_eq!(StatusField::AmbientTemperature.unit(), Some("\u{b0}C"));
        assert_eq!(StatusField::Power.unit(), None);
        assert_eq!(StatusField::StatusText.unit(), None);
    }

    #[test]
    fn field_value_display() {
        assert_eq!(FieldValue::Integer(6).to_string(), "6");
        assert_eq!(FieldValue::Float(19.5).to_string(), "19.5");
        assert_eq!(FieldValue::Bool(true).to_string(), "true");
        assert_eq!(FieldValue::None.to_string(), "-");
    }
}
