// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single `JuiceNet` charger.
//!
//! Devices are created by [`Connection::list_devices`] and keep the last
//! state snapshot read from the service. Reading an accessor never touches
//! the network; call [`Device::refresh`] to poll.
//!
//! # Freshness
//!
//! A non-forced refresh within the freshness window of the previous one is
//! answered from the cache. The refresh instant is recorded *before* the
//! request is sent, so concurrent callers sharing a `&Device` see the guard
//! as soon as the first request is in flight.
//!
//! # Overrides
//!
//! [`Device::set_override`] re-reads the unit clock before writing because
//! the service schedules in the unit's local time frame.
//!
//! ```no_run
//! use juicenet_lib::Connection;
//!
//! # async fn example() -> juicenet_lib::Result<()> {
//! let connection = Connection::new("my-account-token")?;
//! let devices = connection.list_devices().await?;
//!
//! if let Some(charger) = devices.first() {
//!     if charger.set_override(true).await? {
//!         println!("charging until {:?}", charger.override_time());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Instant;

use chrono::NaiveDateTime;
use parking_lot::{Mutex, RwLock};

use crate::command::OverrideParams;
use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::response::{ChargerState, ChargingData, UnitSettings};

/// A charger bound to the account.
///
/// `Device` is `Send + Sync`; share it behind an `Arc` to poll it from
/// several tasks.
#[derive(Debug)]
pub struct Device {
    connection: Connection,
    settings: UnitSettings,
    state: RwLock<Option<ChargerState>>,
    last_updated_at: Mutex<Option<Instant>>,
}

impl Device {
    pub(crate) fn new(connection: Connection, settings: UnitSettings) -> Self {
        Self {
            connection,
            settings,
            state: RwLock::new(None),
            last_updated_at: Mutex::new(None),
        }
    }

    // ========== Settings ==========

    /// Returns the discovery settings of this charger.
    #[must_use]
    pub fn settings(&self) -> &UnitSettings {
        &self.settings
    }

    /// Returns the charger name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.settings.name()
    }

    /// Returns the device token.
    #[must_use]
    pub fn token(&self) -> &str {
        self.settings.token()
    }

    /// Returns the charger identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.settings.unit_id()
    }

    // ========== Refresh ==========

    /// Returns a copy of the last state snapshot, if any.
    #[must_use]
    pub fn state(&self) -> Option<ChargerState> {
        self.state.read().clone()
    }

    /// Returns when the last network refresh was started.
    #[must_use]
    pub fn last_updated_at(&self) -> Option<Instant> {
        *self.last_updated_at.lock()
    }

    /// Returns `true` if a non-forced refresh would be served from cache.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        let window = self.connection.freshness_window();
        self.last_updated_at
            .lock()
            .is_some_and(|at| at.elapsed() < window)
    }

    /// Updates the state snapshot from the service.
    ///
    /// Without `force`, a refresh inside the freshness window returns
    /// `Ok(true)` and sends nothing. Otherwise the snapshot is replaced by
    /// the service response and its `success` flag is returned.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails; the previous snapshot
    /// is then kept.
    pub async fn refresh(&self, force: bool) -> Result<bool> {
        {
            let window = self.connection.freshness_window();
            let mut last = self.last_updated_at.lock();
            if !force && last.is_some_and(|at| at.elapsed() < window) {
                tracing::trace!(unit_id = %self.id(), "State is fresh, skipping refresh");
                return Ok(true);
            }
            *last = Some(Instant::now());
        }

        let state = self.connection.fetch_state(&self.settings).await?;
        let success = state.success;

        if !success {
            tracing::debug!(unit_id = %self.id(), "State refresh reported failure");
        }

        *self.state.write() = Some(state);
        Ok(success)
    }

    /// Fetches the static information of this charger.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn fetch_info(&self) -> Result<serde_json::Value> {
        self.connection.fetch_info(&self.settings).await
    }

    // ========== Override ==========

    /// Forces a charging session now, or clears the override.
    ///
    /// With `charge_now`, the state is refreshed first and the override
    /// starts at the unit's own clock reading with the vehicle's configured
    /// energy target. Without it, the service is told to resume its
    /// schedule. The state is refreshed again after the write; a failure of
    /// that refresh is logged and ignored.
    ///
    /// Returns the `success` flag of the override command itself.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the first refresh or the write fails, or
    /// [`Error::MissingState`] if the refreshed state lacks `unit_time` or
    /// `charging.wh_energy_to_add`. No write is sent in those cases.
    pub async fn set_override(&self, charge_now: bool) -> Result<bool> {
        let params = if charge_now {
            self.refresh(true).await?;

            let unit_time = self
                .unit_time()
                .ok_or(Error::MissingState { field: "unit_time" })?;
            let energy_to_add = self.energy_to_add()?.ok_or(Error::MissingState {
                field: "charging.wh_energy_to_add",
            })?;

            OverrideParams::charge_now(unit_time, energy_to_add)
        } else {
            OverrideParams::clear()
        };

        tracing::debug!(
            unit_id = %self.id(),
            clear = params.is_clear(),
            ?params,
            "Setting override"
        );

        let response = self.connection.set_override(&self.settings, params).await?;

        if !response.success {
            tracing::warn!(
                unit_id = %self.id(),
                reason = response.error_message.as_deref().unwrap_or("none given"),
                "Override rejected by the service"
            );
        }

        match self.refresh(true).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(
                    unit_id = %self.id(),
                    "State refresh after override reported failure"
                );
            }
            Err(e) => {
                tracing::warn!(
                    unit_id = %self.id(),
                    error = %e,
                    "State refresh after override failed"
                );
            }
        }

        Ok(response.success)
    }

    // ========== Accessors ==========

    /// Returns the line voltage in Volts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingState`] if no charging data has been fetched.
    pub fn voltage(&self) -> Result<Option<f64>> {
        self.charging_field(|c| c.voltage)
    }

    /// Returns the current drawn in Amperes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingState`] if no charging data has been fetched.
    pub fn amps(&self) -> Result<Option<f64>> {
        self.charging_field(|c| c.amps_current)
    }

    /// Returns the power delivered in Watts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingState`] if no charging data has been fetched.
    pub fn watts(&self) -> Result<Option<f64>> {
        self.charging_field(|c| c.watt_power)
    }

    /// Returns the duration of the current session in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingState`] if no charging data has been fetched.
    pub fn charge_time(&self) -> Result<Option<u64>> {
        self.charging_field(|c| c.seconds_charging)
    }

    /// Returns the energy delivered during the current session in Wh.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingState`] if no charging data has been fetched.
    pub fn energy_added(&self) -> Result<Option<f64>> {
        self.charging_field(|c| c.wh_energy)
    }

    /// Returns the energy the vehicle is configured to receive in Wh.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingState`] if no charging data has been fetched.
    pub fn energy_to_add(&self) -> Result<Option<f64>> {
        self.charging_field(|c| c.wh_energy_to_add)
    }

    /// Returns the charger status, e.g. `standby` or `charging`.
    #[must_use]
    pub fn status(&self) -> Option<String> {
        self.state.read().as_ref().and_then(|s| s.state.clone())
    }

    /// Returns the unit temperature.
    #[must_use]
    pub fn temperature(&self) -> Option<f64> {
        self.state.read().as_ref().and_then(|s| s.temperature)
    }

    /// Returns the override start in unit-local epoch seconds.
    #[must_use]
    pub fn override_time(&self) -> Option<i64> {
        self.state.read().as_ref().and_then(|s| s.override_time)
    }

    /// Returns the unit clock in unit-local epoch seconds.
    #[must_use]
    pub fn unit_time(&self) -> Option<i64> {
        self.state.read().as_ref().and_then(|s| s.unit_time)
    }

    /// Returns the unit clock as a naive date-time in the unit's own frame.
    #[must_use]
    pub fn unit_local_time(&self) -> Option<NaiveDateTime> {
        self.state.read().as_ref().and_then(ChargerState::unit_local_time)
    }

    /// Returns the override start as a naive date-time in the unit's frame.
    ///
    /// `None` when no override is set.
    #[must_use]
    pub fn override_local_time(&self) -> Option<NaiveDateTime> {
        self.state
            .read()
            .as_ref()
            .and_then(ChargerState::override_local_time)
    }

    fn charging_field<T>(
        &self,
        field: impl FnOnce(&ChargingData) -> Option<T>,
    ) -> Result<Option<T>> {
        let state = self.state.read();
        let snapshot = state
            .as_ref()
            .ok_or(Error::MissingState { field: "charging" })?;
        Ok(field(snapshot.charging()?))
    }
}
