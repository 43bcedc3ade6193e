// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `winet-stove` library.
//!
//! This module provides the error hierarchy for handling failures across
//! the library: vendor requests, response parsing, and value validation.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when talking
/// to the CloudWiNet service.
#[derive(Debug, Error)]
pub enum Error {
    /// A vendor request failed at the HTTP or payload level.
    #[error("request failed: {0}")]
    Request(#[from] RequestError),

    /// A vendor response could not be interpreted.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A caller-supplied value violated a domain constraint.
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

/// Errors raised while performing a vendor request.
///
/// Every variant that originates from a concrete endpoint carries the
/// endpoint name so failures can be attributed in logs and user-facing
/// messages.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Transport-level failure, including connect errors and timeouts.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("{endpoint} failed: HTTP {status} {body}")]
    Status {
        /// The endpoint that was called.
        endpoint: String,
        /// The HTTP status code of the response.
        status: u16,
        /// The raw response body, kept for diagnostics.
        body: String,
    },

    /// The service answered 200 but the payload did not carry a truthy
    /// success indicator.
    #[error("{endpoint} rejected: error {code:?} {description:?}")]
    Rejected {
        /// The endpoint that was called.
        endpoint: String,
        /// Vendor error code, if present in the payload.
        code: Option<i64>,
        /// Vendor error description, if present in the payload.
        description: Option<String>,
    },

    /// No session token is available yet.
    #[error("not authenticated: call authenticate() before issuing requests")]
    NotAuthenticated,
}

/// Errors raised while interpreting a vendor response body.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body was not valid JSON.
    #[error("{endpoint} returned invalid JSON: {body}")]
    InvalidJson {
        /// The endpoint that was called.
        endpoint: String,
        /// The raw response body, kept for diagnostics.
        body: String,
    },

    /// An expected field was absent from the payload.
    #[error("{endpoint} response missing field '{field}'")]
    MissingField {
        /// The endpoint that was called.
        endpoint: String,
        /// The field that was expected.
        field: &'static str,
    },

    /// A field was present but held an unusable value.
    #[error("{endpoint}: unexpected value for '{field}': {message}")]
    InvalidValue {
        /// The endpoint that was called.
        endpoint: String,
        /// The field that failed to parse.
        field: &'static str,
        /// Description of the failure.
        message: String,
    },
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A power level outside the permitted set 1-5 was supplied.
    #[error("power level {0} is outside the supported set [1, 5]")]
    UnsupportedPowerLevel(u8),

    /// A target temperature outside the supported range was supplied.
    #[error("target temperature {actual}\u{b0}C is out of range [{min}, {max}]")]
    TemperatureOutOfRange {
        /// Minimum supported target temperature in whole degrees.
        min: i64,
        /// Maximum supported target temperature in whole degrees.
        max: i64,
        /// The rounded value that was rejected.
        actual: i64,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
