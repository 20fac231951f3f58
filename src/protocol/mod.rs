// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the `JuiceNet` cloud service.
//!
//! The service exposes a single family of JSON-over-HTTP `POST` endpoints.
//! [`ApiConfig`] holds the connection parameters and [`HttpClient`] performs
//! the round trips. There is no session state: each request is independent
//! and carries its own credentials.

mod http;

pub use http::{ApiConfig, HttpClient};
