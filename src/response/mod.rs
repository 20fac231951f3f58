// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for `JuiceNet` JSON responses.
//!
//! Each response type corresponds to one API command. Fields the service may
//! omit are `Option`s, so that "missing" stays distinguishable from zero.

mod overrides;
mod state;
mod units;

pub use overrides::OverrideResponse;
pub use state::{ChargerState, ChargingData};
pub use units::{AccountUnitsResponse, UnitSettings};
