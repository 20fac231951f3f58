// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `JuiceNet` library.
//!
//! Failures fall into three groups: the account was rejected during
//! discovery, the transport to the cloud service failed, or a device was
//! asked for a value its last state snapshot does not hold.
//!
//! A `success: false` answer to a state poll or an override is *not* an
//! error. Those flags are returned as data so that a long-lived polling loop
//! survives intermittent connectivity.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The service refused the account token during discovery.
    #[error("authentication failed: {message}")]
    Authentication {
        /// The `error_message` reported by the service.
        message: String,
    },

    /// The request could not be completed or its response could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The device state snapshot does not contain the requested value.
    ///
    /// This happens before the first successful refresh, or when the last
    /// state response omitted the field.
    #[error("device state is missing `{field}`")]
    MissingState {
        /// Path of the missing field, e.g. `charging.voltage`.
        field: &'static str,
    },

    /// The client configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Errors raised while talking to the cloud service.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Raw response body, for diagnostics.
        body: String,
    },

    /// The response body was not the expected JSON document.
    #[error("invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_error_display() {
        let err = Error::Authentication {
            message: "Invalid account token".to_string(),
        };
        assert_eq!(err.to_string(), "authentication failed: Invalid account token");
    }

    #[test]
    fn missing_state_display() {
        let err = Error::MissingState {
            field: "charging.voltage",
        };
        assert_eq!(err.to_string(), "device state is missing `charging.voltage`");
    }

    #[test]
    fn status_error_display() {
        let err = TransportError::Status {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "unexpected HTTP status 502: Bad Gateway");
    }

    #[test]
    fn error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err: Error = TransportError::from(json_err).into();
        assert!(matches!(
            err,
            Error::Transport(TransportError::InvalidBody(_))
        ));
    }
}
