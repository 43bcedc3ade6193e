// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Credential variants for the CloudWiNet service.
//!
//! Two authentication schemes exist in the wild: an opaque per-device
//! token, and an account login that is exchanged for a session token via
//! the `Login` endpoint. Both live behind the client's `authenticate()` /
//! `is_authenticated()` surface; the variant is selected by configuration.

use std::fmt;

/// How the client obtains its session token.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Opaque device token, usable as-is.
    Token(String),
    /// Account credentials, exchanged for a token at authentication time.
    Login {
        /// Account email address.
        email: String,
        /// Account password.
        password: String,
    },
}

impl Credentials {
    /// Creates token credentials.
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// Creates login credentials.
    #[must_use]
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Login {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the token when it is available without a network round
    /// trip.
    #[must_use]
    pub fn static_token(&self) -> Option<&str> {
        match self {
            Self::Token(token) => Some(token),
            Self::Login { .. } => None,
        }
    }
}

// Secrets must never leak through Debug output of configs or clients.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => f.debug_tuple("Token").field(&redact(token, token)).finish(),
            Self::Login { email, .. } => f
                .debug_struct("Login")
                .field("email", email)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// Replaces every occurrence of `secret` in `value` with its first four
/// characters followed by `***`.
///
/// Used before logging request URLs so credentials never appear in full.
/// Returns `value` unchanged when the secret is empty or absent.
///
/// # Examples
///
/// ```
/// use winet_stove::auth::redact;
///
/// let url = "https://example.invalid/GetStatus/ABCD1234";
/// assert_eq!(redact(url, "ABCD1234"), "https://example.invalid/GetStatus/ABCD***");
/// ```
#[must_use]
pub fn redact(value: &str, secret: &str) -> String {
    if secret.is_empty() {
        return value.to_string();
    }
    let prefix: String = secret.chars().take(4).collect();
    value.replace(secret, &format!("{prefix}***"))
}
