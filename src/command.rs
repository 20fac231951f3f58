// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `JuiceNet` API command definitions.
//!
//! Every call to the cloud service is a JSON `POST` whose body names the
//! operation in its `cmd` field.
//!
//! | Command | Endpoint | Extra fields |
//! |---------|----------|--------------|
//! | `get_account_units` | `/box_pin` | none |
//! | `get_state` | `/box_api_secure` | `token` |
//! | `get_info` | `/box_api_secure` | `token` |
//! | `set_override` | `/box_api_secure` | `token`, [`OverrideParams`] |
//!
//! All requests carry `device_id`, which is the per-client correlation
//! identifier and *not* a charger identifier.
//!
//! # Examples
//!
//! ```
//! use juicenet_lib::command::{ApiRequest, CommandKind};
//! use uuid::Uuid;
//!
//! let id = Uuid::new_v4();
//! let request = ApiRequest::device(CommandKind::GetState, id, "t1", "acct");
//! let body = serde_json::to_value(&request).unwrap();
//!
//! assert_eq!(body["cmd"], "get_state");
//! assert_eq!(body["token"], "t1");
//! assert_eq!(request.endpoint().path(), "/box_api_secure");
//! ```

use serde::Serialize;
use uuid::Uuid;

/// The operations understood by the cloud service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Lists the chargers bound to an account.
    GetAccountUnits,
    /// Reads the live telemetry of one charger.
    GetState,
    /// Reads the static information of one charger.
    GetInfo,
    /// Forces or clears a charging override.
    SetOverride,
}

impl CommandKind {
    /// Returns the wire name of the command.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetAccountUnits => "get_account_units",
            Self::GetState => "get_state",
            Self::GetInfo => "get_info",
            Self::SetOverride => "set_override",
        }
    }

    /// Returns the endpoint this command is posted to.
    #[must_use]
    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::GetAccountUnits => Endpoint::AccountUnits,
            Self::GetState | Self::GetInfo | Self::SetOverride => Endpoint::SecureApi,
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two paths exposed under the service base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Account-level discovery.
    AccountUnits,
    /// Per-device commands authenticated with the device token.
    SecureApi,
}

impl Endpoint {
    /// Returns the URL path of the endpoint.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::AccountUnits => "/box_pin",
            Self::SecureApi => "/box_api_secure",
        }
    }
}

/// Parameters of a `set_override` command.
///
/// The all-zero value (see [`OverrideParams::clear`]) tells the service to
/// drop any override and resume the configured schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverrideParams {
    /// Start of the override, in the unit's local time frame (epoch seconds).
    pub override_time: i64,
    /// Energy already in the vehicle when it was plugged in, in Wh.
    pub energy_at_plugin: u64,
    /// Energy to deliver during the override, in Wh.
    pub energy_to_add: u64,
}

impl OverrideParams {
    /// Override that starts charging now.
    ///
    /// `unit_time` must be the unit's own clock reading, not the caller's.
    /// The energy target is rounded to whole Wh; negative values become 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn charge_now(unit_time: i64, energy_to_add: f64) -> Self {
        Self {
            override_time: unit_time,
            energy_at_plugin: 0,
            energy_to_add: energy_to_add.max(0.0).round() as u64,
        }
    }

    /// Override that clears any forced session.
    #[must_use]
    pub const fn clear() -> Self {
        Self {
            override_time: 0,
            energy_at_plugin: 0,
            energy_to_add: 0,
        }
    }

    /// Returns `true` if these parameters clear the override.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        *self == Self::clear()
    }
}

/// JSON body of a request to the cloud service.
#[derive(Debug, Clone, Serialize)]
pub struct ApiRequest<'a> {
    device_id: Uuid,
    cmd: CommandKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
    account_token: &'a str,
    #[serde(flatten)]
    overrides: Option<OverrideParams>,
}

impl<'a> ApiRequest<'a> {
    /// Builds a `get_account_units` request.
    #[must_use]
    pub fn account_units(correlation_id: Uuid, account_token: &'a str) -> Self {
        Self {
            device_id: correlation_id,
            cmd: CommandKind::GetAccountUnits,
            token: None,
            account_token,
            overrides: None,
        }
    }

    /// Builds a per-device request without extra parameters.
    #[must_use]
    pub fn device(
        cmd: CommandKind,
        correlation_id: Uuid,
        device_token: &'a str,
        account_token: &'a str,
    ) -> Self {
        Self {
            device_id: correlation_id,
            cmd,
            token: Some(device_token),
            account_token,
            overrides: None,
        }
    }

    /// Builds a `set_override` request.
    #[must_use]
    pub fn set_override(
        correlation_id: Uuid,
        device_token: &'a str,
        account_token: &'a str,
        params: OverrideParams,
    ) -> Self {
        Self {
            overrides: Some(params),
            ..Self::device(
                CommandKind::SetOverride,
                correlation_id,
                device_token,
                account_token,
            )
        }
    }

    /// Returns the command carried by this request.
    #[must_use]
    pub fn cmd(&self) -> CommandKind {
        self.cmd
    }

    /// Returns the endpoint this request must be posted to.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        self.cmd.endpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn correlation_id() -> Uuid {
        Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap()
    }

    #[test]
    fn account_units_body() {
        let request = ApiRequest::account_units(correlation_id(), "acct");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "device_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "cmd": "get_account_units",
                "account_token": "acct"
            })
        );
        assert_eq!(request.endpoint(), Endpoint::AccountUnits);
    }

    #[test]
    fn get_info_body_has_device_token() {
        let request = ApiRequest::device(CommandKind::GetInfo, correlation_id(), "t1", "acct");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["cmd"], "get_info");
        assert_eq!(body["token"], "t1");
        assert_eq!(body["account_token"], "acct");
        assert!(body.get("override_time").is_none());
    }

    #[test]
    fn set_override_body_flattens_params() {
        let params = OverrideParams::charge_now(1_700_000_000, 30_000.0);
        let request = ApiRequest::set_override(correlation_id(), "t1", "acct", params);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "device_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "cmd": "set_override",
                "token": "t1",
                "account_token": "acct",
                "override_time": 1_700_000_000,
                "energy_at_plugin": 0,
                "energy_to_add": 30_000
            })
        );
        assert_eq!(request.endpoint(), Endpoint::SecureApi);
    }

    #[test]
    fn clear_params_are_all_zero() {
        let params = OverrideParams::clear();
        assert!(params.is_clear());
        assert_eq!(params, OverrideParams::default());
        assert!(!OverrideParams::charge_now(1, 0.0).is_clear());
    }

    #[test]
    fn charge_now_rounds_energy_target() {
        assert_eq!(OverrideParams::charge_now(1, 12_500.5).energy_to_add, 12_501);
        assert_eq!(OverrideParams::charge_now(1, -3.0).energy_to_add, 0);
    }

    #[test]
    fn command_names() {
        assert_eq!(CommandKind::GetAccountUnits.to_string(), "get_account_units");
        assert_eq!(CommandKind::SetOverride.as_str(), "set_override");
        assert_eq!(CommandKind::GetState.endpoint().path(), "/box_api_secure");
    }
}
