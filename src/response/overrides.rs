// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Override command response parsing.

use serde::Deserialize;

/// Response to `set_override`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OverrideResponse {
    /// Whether the charger accepted the override.
    #[serde(default)]
    pub success: bool,

    /// Reason for a rejected override, when the service gives one.
    #[serde(default)]
    pub error_message: Option<String>,
}
