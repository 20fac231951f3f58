// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account discovery response parsing.

use serde::Deserialize;

/// Response to `get_account_units`.
///
/// # Examples
///
/// ```
/// use juicenet_lib::response::AccountUnitsResponse;
///
/// let json = r#"{
///     "success": true,
///     "units": [{"unit_id": "u1", "token": "t1", "name": "Garage"}]
/// }"#;
/// let response: AccountUnitsResponse = serde_json::from_str(json).unwrap();
/// assert!(response.success);
/// assert_eq!(response.units[0].name(), Some("Garage"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountUnitsResponse {
    /// Whether the service accepted the account token.
    #[serde(default)]
    pub success: bool,

    /// Reason for a rejected request.
    #[serde(default)]
    pub error_message: Option<String>,

    /// Chargers bound to the account.
    #[serde(default)]
    pub units: Vec<UnitSettings>,
}

/// Settings of one charger, as returned by discovery.
///
/// These never change after the device has been created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UnitSettings {
    /// User-facing name of the charger.
    #[serde(default)]
    name: Option<String>,

    /// Device token used to authenticate per-device commands.
    #[serde(default)]
    token: Option<String>,

    /// Identifier of the charger.
    #[serde(default)]
    unit_id: Option<String>,
}

impl UnitSettings {
    /// Creates settings for a charger.
    #[must_use]
    pub fn new(unit_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: None,
            token: Some(token.into()),
            unit_id: Some(unit_id.into()),
        }
    }

    /// Sets the charger name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the charger name, if the account gave it one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the device token, or an empty string if discovery gave none.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or("")
    }

    /// Returns the charger identifier, or an empty string if discovery gave
    /// none.
    #[must_use]
    pub fn unit_id(&self) -> &str {
        self.unit_id.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejected_account() {
        let json = r#"{"success": false, "error_message": "Invalid account token"}"#;
        let response: AccountUnitsResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(
            response.error_message.as_deref(),
            Some("Invalid account token")
        );
        assert!(response.units.is_empty());
    }

    #[test]
    fn parse_units_ignores_unknown_fields() {
        let json = r#"{
            "success": true,
            "units": [
                {"unit_id": "u1", "token": "t1", "name": "Garage", "unit_ip": "10.0.0.2"},
                {"unit_id": "u2", "token": "t2"}
            ]
        }"#;
        let response: AccountUnitsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.units.len(), 2);
        assert_eq!(
            response.units[0],
            UnitSettings::new("u1", "t1").with_name("Garage")
        );
        assert_eq!(response.units[1].name(), None);
        assert_eq!(response.units[1].token(), "t2");
    }

    #[test]
    fn null_settings_read_as_empty() {
        let json = r#"{
            "success": true,
            "units": [{"unit_id": null, "token": null, "name": null}]
        }"#;
        let response: AccountUnitsResponse = serde_json::from_str(json).unwrap();
        let unit = &response.units[0];
        assert_eq!(unit.unit_id(), "");
        assert_eq!(unit.token(), "");
        assert_eq!(unit.name(), None);
    }

    #[test]
    fn missing_success_means_failure() {
        let response: AccountUnitsResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.success);
        assert!(response.error_message.is_none());
    }
}
