// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Charger state response parsing.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Error;

/// Snapshot of a charger returned by `get_state`.
///
/// The `charging` group is absent when the service could not reach the
/// charger; accessors that need it then fail with
/// [`Error::MissingState`].
///
/// # Examples
///
/// ```
/// use juicenet_lib::response::ChargerState;
///
/// let json = r#"{
///     "success": true,
///     "state": "standby",
///     "charging": {"voltage": 240, "amps_current": 0, "watt_power": 0,
///                  "seconds_charging": 0, "wh_energy": 0},
///     "temperature": 25
/// }"#;
/// let state: ChargerState = serde_json::from_str(json).unwrap();
/// assert_eq!(state.status(), Some("standby"));
/// assert_eq!(state.charging().unwrap().voltage, Some(240.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChargerState {
    /// Whether the service could read the charger.
    #[serde(default)]
    pub success: bool,

    /// Charger status, e.g. `standby`, `plugged`, `charging`.
    #[serde(default)]
    pub state: Option<String>,

    /// Internal temperature of the unit.
    #[serde(default, deserialize_with = "number")]
    pub temperature: Option<f64>,

    /// Start of the active override, in unit-local epoch seconds.
    #[serde(default, deserialize_with = "epoch_seconds")]
    pub override_time: Option<i64>,

    /// Current time of the unit, in unit-local epoch seconds.
    #[serde(default, deserialize_with = "epoch_seconds")]
    pub unit_time: Option<i64>,

    /// Live charging measurements.
    #[serde(default)]
    pub charging: Option<ChargingData>,
}

impl ChargerState {
    /// Returns the charger status string.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Returns the charging group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingState`] if the snapshot has no `charging` group.
    pub fn charging(&self) -> Result<&ChargingData, Error> {
        self.charging.as_ref().ok_or(Error::MissingState { field: "charging" })
    }

    /// Returns the unit clock as a naive date-time.
    ///
    /// The value is already in the unit's local frame, so no timezone is
    /// attached.
    #[must_use]
    pub fn unit_local_time(&self) -> Option<NaiveDateTime> {
        self.unit_time.and_then(epoch_to_naive)
    }

    /// Returns the override start as a naive date-time in the unit's frame.
    ///
    /// `None` when no override is set (the service reports `0`).
    #[must_use]
    pub fn override_local_time(&self) -> Option<NaiveDateTime> {
        self.override_time
            .filter(|t| *t != 0)
            .and_then(epoch_to_naive)
    }
}

fn epoch_to_naive(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}

/// Reads a number sent as an integer, a float or a numeric string.
///
/// Any other value reads as absent, so one oddly typed field never fails the
/// whole snapshot.
fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(number.filter(|n: &f64| n.is_finite()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(number(deserializer)?
        .filter(|n| *n >= 0.0)
        .map(|n| n as u64))
}

#[allow(clippy::cast_possible_truncation)]
fn epoch_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(number(deserializer)?.map(|n| n as i64))
}

/// Charging measurements of a charger.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChargingData {
    /// Line voltage in Volts.
    #[serde(default, deserialize_with = "number")]
    pub voltage: Option<f64>,

    /// Current drawn in Amperes.
    #[serde(default, deserialize_with = "number")]
    pub amps_current: Option<f64>,

    /// Power delivered in Watts.
    #[serde(default, deserialize_with = "number")]
    pub watt_power: Option<f64>,

    /// Duration of the current session in seconds.
    #[serde(default, deserialize_with = "whole_seconds")]
    pub seconds_charging: Option<u64>,

    /// Energy delivered during the current session in Wh.
    #[serde(default, deserialize_with = "number")]
    pub wh_energy: Option<f64>,

    /// Energy the vehicle is configured to receive, in Wh.
    #[serde(default, deserialize_with = "number")]
    pub wh_energy_to_add: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_state() {
        let json = r#"{
            "success": true,
            "state": "charging",
            "temperature": 31.5,
            "override_time": 1700003600,
            "unit_time": 1700000000,
            "charging": {
                "voltage": 241.2,
                "amps_current": 31.8,
                "watt_power": 7670,
                "seconds_charging": 1800,
                "wh_energy": 3835,
                "wh_energy_to_add": 30000
            }
        }"#;
        let state: ChargerState = serde_json::from_str(json).unwrap();
        assert!(state.success);
        assert_eq!(state.status(), Some("charging"));
        assert_eq!(state.temperature, Some(31.5));
        assert_eq!(state.unit_time, Some(1_700_000_000));

        let charging = state.charging().unwrap();
        assert_eq!(charging.voltage, Some(241.2));
        assert_eq!(charging.amps_current, Some(31.8));
        assert_eq!(charging.watt_power, Some(7670.0));
        assert_eq!(charging.seconds_charging, Some(1800));
        assert_eq!(charging.wh_energy, Some(3835.0));
        assert_eq!(charging.wh_energy_to_add, Some(30_000.0));
    }

    #[test]
    fn fractional_counters_are_accepted() {
        let json = r#"{
            "success": true,
            "unit_time": 1700000000.0,
            "charging": {
                "voltage": "240",
                "seconds_charging": 12.0,
                "wh_energy": 1500.25,
                "wh_energy_to_add": 12500.5
            }
        }"#;
        let state: ChargerState = serde_json::from_str(json).unwrap();
        assert_eq!(state.unit_time, Some(1_700_000_000));

        let charging = state.charging().unwrap();
        assert_eq!(charging.voltage, Some(240.0));
        assert_eq!(charging.seconds_charging, Some(12));
        assert_eq!(charging.wh_energy, Some(1500.25));
        assert_eq!(charging.wh_energy_to_add, Some(12_500.5));
    }

    #[test]
    fn unexpected_field_types_read_as_absent() {
        let json = r#"{
            "success": true,
            "temperature": null,
            "charging": {
                "voltage": {"l1": 120},
                "amps_current": null,
                "seconds_charging": -4,
                "wh_energy_to_add": "lots"
            }
        }"#;
        let state: ChargerState = serde_json::from_str(json).unwrap();
        assert!(state.temperature.is_none());

        let charging = state.charging().unwrap();
        assert!(charging.voltage.is_none());
        assert!(charging.amps_current.is_none());
        assert!(charging.seconds_charging.is_none());
        assert!(charging.wh_energy_to_add.is_none());
    }

    #[test]
    fn failed_poll_has_no_charging_group() {
        let state: ChargerState =
            serde_json::from_str(r#"{"success": false, "error_message": "unit offline"}"#)
                .unwrap();
        assert!(!state.success);
        assert!(matches!(
            state.charging(),
            Err(Error::MissingState { field: "charging" })
        ));
    }

    #[test]
    fn unit_local_time_is_not_shifted() {
        let state = ChargerState {
            unit_time: Some(1_700_000_000),
            ..ChargerState::default()
        };
        let local = state.unit_local_time().unwrap();
        assert_eq!(local.to_string(), "2023-11-14 22:13:20");
    }

    #[test]
    fn zero_override_time_means_no_override() {
        let state = ChargerState {
            override_time: Some(0),
            ..ChargerState::default()
        };
        assert!(state.override_local_time().is_none());
    }
}
