// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client for the CloudWiNet JSON API.
//!
//! The client translates domain operations into vendor HTTP calls and
//! normalizes vendor responses into domain errors and values. It knows
//! nothing about scheduling or queued ignition; that lives in the
//! [`StoveCoordinator`](crate::StoveCoordinator).
//!
//! # Wire format
//!
//! Every call is an HTTP GET to `{base}/{Endpoint}/{token}` where the
//! token is URL-escaped. Command parameters are appended to the token
//! segment as a `;<integer>` suffix (e.g. `SetTemperature/{token};21`).
//! Responses are JSON envelopes carrying a mandatory `Success` flag plus
//! `Error`/`ErrorDescription` on failure and `Result` or
//! `Status`/`StatusDescription` on success.

use chrono::Utc;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::auth::{Credentials, redact};
use crate::config::StoveConfig;
use crate::error::{ParseError, RequestError, Result};
use crate::status::{StoveStatus, derive_is_on};
use crate::types::PowerLevel;

const GET_STATUS: &str = "GetStatus";
const GET_POWER: &str = "GetPower";
const GET_TEMPERATURE: &str = "GetTemperature";
const GET_ACTUAL_TEMPERATURE: &str = "GetActualTemperature";
const IGNIT: &str = "Ignit";
const SHUTDOWN: &str = "Shutdown";
const SET_TEMPERATURE: &str = "SetTemperature";
const SET_POWER: &str = "SetPower";
const LOGIN: &str = "Login";

/// Lowest accepted target temperature in whole degrees Celsius.
pub const TEMPERATURE_MIN: i64 = 5;

/// Highest accepted target temperature in whole degrees Celsius.
pub const TEMPERATURE_MAX: i64 = 30;

/// Client for one stove on the CloudWiNet service.
///
/// # Examples
///
/// ```no_run
/// use winet_stove::{StoveClient, StoveConfig};
///
/// #[tokio::main]
/// async fn main() -> winet_stove::Result<()> {
///     let client = StoveClient::new(&StoveConfig::with_token("ABCD1234"))?;
///     let status = client.aggregated_status().await?;
///     println!("stove is on: {}", status.is_on);
///     Ok(())
/// }
/// ```
pub struct StoveClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    /// Session token; present from construction for token credentials,
    /// populated by [`authenticate`](Self::authenticate) for logins.
    session_token: RwLock<Option<String>>,
    debug: bool,
}

// Manual impl so the session token never reaches Debug output.
impl std::fmt::Debug for StoveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoveClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl StoveClient {
    /// Creates a client from a configuration.
    ///
    /// Token credentials are usable immediately; login credentials
    /// require a call to [`authenticate`](Self::authenticate) first.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &StoveConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(RequestError::Http)?;

        let credentials = config.credentials().clone();
        let session_token = RwLock::new(credentials.static_token().map(str::to_string));

        Ok(Self {
            http,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            credentials,
            session_token,
            debug: config.debug(),
        })
    }

    /// Returns the base URL of the service.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Returns `true` once a session token is available.
    pub async fn is_authenticated(&self) -> bool {
        self.session_token.read().await.is_some()
    }

    /// Acquires a session token.
    ///
    /// A no-op for token credentials. For login credentials this calls
    /// the vendor `Login` endpoint and stores the returned token for all
    /// subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns error if the login call fails or its payload carries no
    /// token.
    pub async fn authenticate(&self) -> Result<()> {
        let Credentials::Login { email, password } = &self.credentials else {
            return Ok(());
        };

        let url = format!(
            "{}/{LOGIN}/{}/{}",
            self.base_url,
            urlencoding::encode(email),
            urlencoding::encode(password),
        );
        let envelope = self.fetch_envelope(LOGIN, url, password).await?;
        let envelope = Self::ensure_success(LOGIN, envelope)?;
        let token = envelope.result_string(LOGIN)?;

        *self.session_token.write().await = Some(token);
        tracing::debug!(email = %email, "login succeeded");
        Ok(())
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// Fetches the aggregated device status.
    ///
    /// Issues the four vendor sub-queries concurrently, waits for all of
    /// them, and combines the results into one [`StoveStatus`] stamped
    /// with a single fetch instant. A failure in any sub-query fails the
    /// whole aggregation; no partial status is ever produced.
    ///
    /// The snapshot's `pending_ignition` is always `false` here; the
    /// coordinator injects the real flag before publishing.
    ///
    /// # Errors
    ///
    /// Returns error if any of the four underlying calls fails.
    pub async fn aggregated_status(&self) -> Result<StoveStatus> {
        let fetched_at = Utc::now();

        let (status, power, set_temperature, ambient_temperature) = tokio::try_join!(
            self.device_status(),
            self.call_result(GET_POWER),
            self.call_result(GET_TEMPERATURE),
            self.call_result(GET_ACTUAL_TEMPERATURE),
        )?;

        let is_on = derive_is_on(status.status, status.status_description.as_deref());
        let snapshot = StoveStatus {
            status_code: status.status,
            status_text: status.status_description,
            error_code: status.error,
            error_description: status.error_description,
            power,
            set_temperature,
            ambient_temperature,
            is_on,
            pending_ignition: false,
            fetched_at,
        };

        if self.debug {
            tracing::debug!(?snapshot, "aggregated status");
        }
        Ok(snapshot)
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Ignites the stove.
    ///
    /// # Errors
    ///
    /// Returns error on a non-success vendor response. The device
    /// rejects this while in its final-cleaning cycle.
    pub async fn ignite(&self) -> Result<()> {
        let envelope = self.request(IGNIT, None).await?;
        Self::ensure_success(IGNIT, envelope)?;
        Ok(())
    }

    /// Shuts the stove down.
    ///
    /// # Errors
    ///
    /// Returns error on a non-success vendor response.
    pub async fn shutdown(&self) -> Result<()> {
        let envelope = self.request(SHUTDOWN, None).await?;
        Self::ensure_success(SHUTDOWN, envelope)?;
        Ok(())
    }

    /// Sets the target temperature.
    ///
    /// The value is rounded to the nearest integer degree (half-up)
    /// before transmission.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TemperatureOutOfRange`] if the rounded
    /// value falls outside 5-30 degrees C, or a request error on a
    /// non-success vendor response.
    ///
    /// [`ValueError::TemperatureOutOfRange`]: crate::error::ValueError::TemperatureOutOfRange
    pub async fn set_temperature(&self, celsius: f64) -> Result<()> {
        let target = rounded_target(celsius)?;
        let envelope = self
            .request(SET_TEMPERATURE, Some(format!(";{target}")))
            .await?;
        Self::ensure_success(SET_TEMPERATURE, envelope)?;
        Ok(())
    }

    /// Sets the flame power level.
    ///
    /// # Errors
    ///
    /// Returns error on a non-success vendor response.
    pub async fn set_power(&self, level: PowerLevel) -> Result<()> {
        let envelope = self
            .request(SET_POWER, Some(format!(";{}", level.value())))
            .await?;
        Self::ensure_success(SET_POWER, envelope)?;
        Ok(())
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Fetches and validates the `GetStatus` envelope.
    async fn device_status(&self) -> Result<Envelope> {
        let envelope = self.request(GET_STATUS, None).await?;
        Self::ensure_success(GET_STATUS, envelope)
    }

    /// Calls an endpoint whose payload carries a numeric `Result`.
    async fn call_result(&self, endpoint: &str) -> Result<f64> {
        let envelope = self.request(endpoint, None).await?;
        let envelope = Self::ensure_success(endpoint, envelope)?;
        Ok(envelope.result_number(endpoint)?)
    }

    /// Performs a token-authenticated GET against an endpoint.
    async fn request(&self, endpoint: &str, suffix: Option<String>) -> Result<Envelope> {
        let token = self
            .session_token
            .read()
            .await
            .clone()
            .ok_or(RequestError::NotAuthenticated)?;

        let url = endpoint_url(&self.base_url, endpoint, &token, suffix.as_deref());
        self.fetch_envelope(endpoint, url, &token).await
    }

    /// Sends one GET and parses the vendor envelope.
    ///
    /// `secret` is the credential embedded in the URL; it is masked
    /// before the URL reaches the log.
    async fn fetch_envelope(&self, endpoint: &str, url: String, secret: &str) -> Result<Envelope> {
        tracing::debug!(endpoint, url = %redact(&url, secret), "sending request");

        let response = self.http.get(&url).send().await.map_err(RequestError::Http)?;
        let status = response.status();
        let body = response.text().await.map_err(RequestError::Http)?;

        if !status.is_success() {
            return Err(RequestError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        if self.debug {
            tracing::debug!(endpoint, body = %body, "received response");
        }

        let envelope = serde_json::from_str(&body).map_err(|_| ParseError::InvalidJson {
            endpoint: endpoint.to_string(),
            body,
        })?;
        Ok(envelope)
    }

    /// Rejects envelopes whose `Success` flag is absent or false.
    fn ensure_success(endpoint: &str, envelope: Envelope) -> Result<Envelope> {
        if !envelope.success {
            return Err(RequestError::Rejected {
                endpoint: endpoint.to_string(),
                code: envelope.error,
                description: envelope.error_description,
            }
            .into());
        }
        Ok(envelope)
    }
}

/// Builds the URL for a token-authenticated endpoint call.
fn endpoint_url(base_url: &str, endpoint: &str, token: &str, suffix: Option<&str>) -> String {
    let mut url = format!("{base_url}/{endpoint}/{}", urlencoding::encode(token));
    if let Some(suffix) = suffix {
        url.push_str(suffix);
    }
    url
}

/// Rounds a target temperature half-up to the nearest whole degree and
/// checks the supported range.
fn rounded_target(celsius: f64) -> Result<i64> {
    #[allow(clippy::cast_possible_truncation)]
    let target = celsius.round() as i64;
    if !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&target) {
        return Err(crate::error::ValueError::TemperatureOutOfRange {
            min: TEMPERATURE_MIN,
            max: TEMPERATURE_MAX,
            actual: target,
        }
        .into());
    }
    Ok(target)
}

/// JSON envelope shared by all vendor endpoints.
///
/// Responses carry only the fields relevant to the endpoint; everything
/// is optional except the success flag, whose absence counts as failure.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Success", default)]
    success: bool,
    #[serde(rename = "Error", default)]
    error: Option<i64>,
    #[serde(rename = "ErrorDescription", default)]
    error_description: Option<String>,
    #[serde(rename = "Result", default)]
    result: Option<serde_json::Value>,
    #[serde(rename = "Status", default)]
    status: Option<i64>,
    #[serde(rename = "StatusDescription", default)]
    status_description: Option<String>,
}

impl Envelope {
    fn result_number(&self, endpoint: &str) -> std::result::Result<f64, ParseError> {
        let value = self.result.as_ref().ok_or(ParseError::MissingField {
            endpoint: endpoint.to_string(),
            field: "Result",
        })?;
        value.as_f64().ok_or_else(|| ParseError::InvalidValue {
            endpoint: endpoint.to_string(),
            field: "Result",
            message: format!("expected a number, got {value}"),
        })
    }

    fn result_string(&self, endpoint: &str) -> std::result::Result<String, ParseError> {
        let value = self.result.as_ref().ok_or(ParseError::MissingField {
            endpoint: endpoint.to_string(),
            field: "Result",
        })?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ParseError::InvalidValue {
                endpoint: endpoint.to_string(),
                field: "Result",
                message: format!("expected a string, got {value}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn endpoint_url_escapes_token() {
        let url = endpoint_url("https://example.invalid/json", "GetStatus", "AB/CD 12", None);
        assert_eq!(url, "https://example.invalid/json/GetStatus/AB%2FCD%2012");
    }

    #[test]
    fn endpoint_url_appends_suffix() {
        let url = endpoint_url(
            "https://example.invalid/json",
            "SetTemperature",
            "ABCD1234",
            Some(";21"),
        );
        assert_eq!(
            url,
            "https://example.invalid/json/SetTemperature/ABCD1234;21"
        );
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(rounded_target(21.6).unwrap(), 22);
        assert_eq!(rounded_target(21.5).unwrap(), 22);
        assert_eq!(rounded_target(21.4).unwrap(), 21);
        assert_eq!(rounded_target(21.0).unwrap(), 21);
    }

    #[test]
    fn rounding_checks_range() {
        assert!(rounded_target(4.4).is_err());
        assert!(rounded_target(30.6).is_err());
        assert_eq!(rounded_target(4.5).unwrap(), 5);
        assert_eq!(rounded_target(30.4).unwrap(), 30);
    }

    #[test]
    fn envelope_missing_success_is_failure() {
        let envelope: Envelope = serde_json::from_str(r#"{"Result": 3}"#).unwrap();
        assert!(!envelope.success);
        assert!(StoveClient::ensure_success("GetPower", envelope).is_err());
    }

    #[test]
    fn envelope_rejection_carries_vendor_error() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"Success": false, "Error": 7, "ErrorDescription": "not ready"}"#,
        )
        .unwrap();
        let err = StoveClient::ensure_success("Ignit", envelope).unwrap_err();
        match err {
            Error::Request(RequestError::Rejected {
                endpoint,
                code,
                description,
            }) => {
                assert_eq!(endpoint, "Ignit");
                assert_eq!(code, Some(7));
                assert_eq!(description.as_deref(), Some("not ready"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn envelope_result_number() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"Success": true, "Result": 19.5}"#).unwrap();
        assert!((envelope.result_number("GetActualTemperature").unwrap() - 19.5).abs() < 1e-9);
    }

    #[test]
    fn envelope_result_number_rejects_strings() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"Success": true, "Result": "three"}"#).unwrap();
        assert!(matches!(
            envelope.result_number("GetPower"),
            Err(ParseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn envelope_result_missing() {
        let envelope: Envelope = serde_json::from_str(r#"{"Success": true}"#).unwrap();
        assert!(matches!(
            envelope.result_number("GetPower"),
            Err(ParseError::MissingField { field: "Result", .. })
        ));
    }

    #[tokio::test]
    async fn token_client_is_authenticated_from_construction() {
        let client = StoveClient::new(&StoveConfig::with_token("ABCD1234")).unwrap();
        assert!(client.is_authenticated().await);
    }

    #[tokio::test]
    async fn login_client_requires_authentication() {
        let client =
            StoveClient::new(&StoveConfig::with_login("user@example.com", "secret")).unwrap();
        assert!(!client.is_authenticated().await);

        let err = client.ignite().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Request(RequestError::NotAuthenticated)
        ));
    }
}
