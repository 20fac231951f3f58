// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `JuiceNet` Lib - A Rust library to read and control `JuiceNet` EV chargers.
//!
//! This library provides an async client for the `JuiceNet` cloud service
//! used by `JuiceBox` and `JuicePoint` chargers.
//!
//! # Supported Features
//!
//! - **Discovery**: List the chargers bound to an account
//! - **Telemetry**: Voltage, current, power, session duration and energy
//! - **Overrides**: Start charging now, or clear a forced session
//!
//! # Quick Start
//!
//! ```no_run
//! use juicenet_lib::Connection;
//!
//! #[tokio::main]
//! async fn main() -> juicenet_lib::Result<()> {
//!     let connection = Connection::new("my-account-token")?;
//!
//!     // Every returned device already holds a fresh state snapshot
//!     for device in connection.list_devices().await? {
//!         println!(
//!             "{}: {:?} at {:?} W",
//!             device.name().unwrap_or("charger"),
//!             device.status(),
//!             device.watts()?
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Polling
//!
//! Non-forced refreshes are rate limited by the freshness window, so a UI
//! loop can call [`Device::refresh`] as often as it likes:
//!
//! ```no_run
//! use std::time::Duration;
//! use juicenet_lib::{ApiConfig, Connection};
//!
//! # async fn example() -> juicenet_lib::Result<()> {
//! let config = ApiConfig::new().with_freshness_window(Duration::from_secs(60));
//! let connection = Connection::with_config("my-account-token", config)?;
//! let devices = connection.list_devices().await?;
//!
//! for device in &devices {
//!     // `false` means the service could not reach the charger this time
//!     if device.refresh(false).await? {
//!         println!("{:?} V", device.voltage()?);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
mod connection;
mod device;
pub mod error;
pub mod protocol;
pub mod response;

pub use command::{ApiRequest, CommandKind, Endpoint, OverrideParams};
pub use connection::Connection;
pub use device::Device;
pub use error::{Error, Result, TransportError};
pub use protocol::{ApiConfig, HttpClient};
pub use response::{
    AccountUnitsResponse, ChargerState, ChargingData, OverrideResponse, UnitSettings,
};
