// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for a stove connection.
//!
//! A [`StoveConfig`] is assembled once at setup time and stays immutable
//! for the lifetime of the coordinator built from it.

use std::time::Duration;

use crate::auth::Credentials;

/// Default base URL of the vendor's production endpoint.
pub const DEFAULT_BASE_URL: &str = "https://ws.cloudwinet.it/WiNetStove.svc/json";

/// Configuration for one stove entry.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use winet_stove::StoveConfig;
///
/// // Simple configuration with an opaque device token
/// let config = StoveConfig::with_token("ABCD1234");
///
/// // With all options
/// let config = StoveConfig::with_login("user@example.com", "secret")
///     .with_base_url("https://staging.example.invalid/json")
///     .with_poll_interval(Duration::from_secs(60))
///     .with_timeout(Duration::from_secs(10))
///     .with_debug(true);
/// ```
#[derive(Debug, Clone)]
pub struct StoveConfig {
    base_url: String,
    credentials: Credentials,
    poll_interval: Duration,
    timeout: Duration,
    debug: bool,
}

impl StoveConfig {
    /// Default interval between two scheduled status refreshes.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a configuration that authenticates with an opaque device
    /// token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::new(Credentials::token(token))
    }

    /// Creates a configuration that authenticates with an account login.
    #[must_use]
    pub fn with_login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(Credentials::login(email, password))
    }

    /// Creates a configuration with explicit credentials.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            timeout: Self::DEFAULT_TIMEOUT,
            debug: false,
        }
    }

    /// Sets a custom base URL. Trailing slashes are trimmed.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the interval between scheduled refreshes.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables verbose payload logging.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the configured credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the poll interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns whether verbose payload logging is enabled.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }
}
