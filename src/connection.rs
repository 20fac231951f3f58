// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authenticated connection to the `JuiceNet` cloud service.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::command::{ApiRequest, CommandKind, OverrideParams};
use crate::device::Device;
use crate::error::{Error, Result};
use crate::protocol::{ApiConfig, HttpClient};
use crate::response::{AccountUnitsResponse, ChargerState, OverrideResponse, UnitSettings};

/// A connection to the cloud service for one account.
///
/// The connection owns the account token, a correlation identifier generated
/// once per instance, and the HTTP client. Cloning is cheap: clones share the
/// same correlation identifier and connection pool, which is how every
/// [`Device`] talks to the service.
///
/// # Examples
///
/// ```no_run
/// use juicenet_lib::Connection;
///
/// # async fn example() -> juicenet_lib::Result<()> {
/// let connection = Connection::new("my-account-token")?;
///
/// for device in connection.list_devices().await? {
///     println!("{:?}: {:?}", device.name(), device.status());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Connection {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    account_token: String,
    correlation_id: Uuid,
    client: HttpClient,
    freshness_window: Duration,
}

impl Connection {
    /// Creates a connection to the public service.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(account_token: impl Into<String>) -> Result<Self> {
        Self::with_config(account_token, ApiConfig::new())
    }

    /// Creates a connection with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid, or a
    /// transport error if the HTTP client cannot be created.
    pub fn with_config(account_token: impl Into<String>, config: ApiConfig) -> Result<Self> {
        let freshness_window = config.freshness_window();
        let client = config.into_client()?;

        Ok(Self {
            inner: Arc::new(Inner {
                account_token: account_token.into(),
                correlation_id: Uuid::new_v4(),
                client,
                freshness_window,
            }),
        })
    }

    /// Returns the correlation identifier sent as `device_id` with every
    /// request.
    #[must_use]
    pub fn correlation_id(&self) -> Uuid {
        self.inner.correlation_id
    }

    /// Returns the minimum interval between non-forced device refreshes.
    #[must_use]
    pub fn freshness_window(&self) -> Duration {
        self.inner.freshness_window
    }

    /// Discovers the chargers bound to the account.
    ///
    /// Each returned device has already been refreshed once, in discovery
    /// order, so its accessors can be read right away.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the service rejects the account
    /// token, or a transport error if discovery or any initial refresh fails.
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        let request = ApiRequest::account_units(self.correlation_id(), &self.inner.account_token);
        let response: AccountUnitsResponse = self.inner.client.post(&request).await?;

        if !response.success {
            let message = response.error_message.unwrap_or_default();
            tracing::warn!(message = %message, "Account discovery rejected");
            return Err(Error::Authentication { message });
        }

        tracing::debug!(count = response.units.len(), "Discovered chargers");

        let mut devices = Vec::with_capacity(response.units.len());
        for settings in response.units {
            let device = Device::new(self.clone(), settings);
            device.refresh(true).await?;
            devices.push(device);
        }

        Ok(devices)
    }

    /// Fetches the live state of a charger.
    ///
    /// The response is returned as-is; a `success: false` answer is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn fetch_state(&self, settings: &UnitSettings) -> Result<ChargerState> {
        self.device_command(CommandKind::GetState, settings).await
    }

    /// Fetches the static information of a charger.
    ///
    /// The payload is passed through without interpretation.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn fetch_info(&self, settings: &UnitSettings) -> Result<serde_json::Value> {
        self.device_command(CommandKind::GetInfo, settings).await
    }

    /// Sends an override command to a charger.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails.
    pub async fn set_override(
        &self,
        settings: &UnitSettings,
        params: OverrideParams,
    ) -> Result<OverrideResponse> {
        let request = ApiRequest::set_override(
            self.correlation_id(),
            settings.token(),
            &self.inner.account_token,
            params,
        );
        Ok(self.inner.client.post(&request).await?)
    }

    async fn device_command<T: serde::de::DeserializeOwned>(
        &self,
        cmd: CommandKind,
        settings: &UnitSettings,
    ) -> Result<T> {
        let request = ApiRequest::device(
            cmd,
            self.correlation_id(),
            settings.token(),
            &self.inner.account_token,
        );
        Ok(self.inner.client.post(&request).await?)
    }
}
