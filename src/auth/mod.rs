//
//  stripe-kit
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Stripe authenticates server-side requests with an API key sent as a
//! bearer token. Two kinds of key can make those requests:
//!
//! - **Secret keys** (`sk_test_...`, `sk_live_...`): full account access.
//! - **Restricted keys** (`rk_test_...`, `rk_live_...`): scoped access.
//!
//! Publishable keys (`pk_...`) are for client-side code only and are
//! rejected here.
//!
//! ## Example
//!
//! ```rust
//! use stripe_kit::auth::{AuthCredential, KeyMode};
//!
//! let credential = AuthCredential::from_key("sk_test_4eC39HqLyjWDarjtT1zdp7dc")?;
//! assert_eq!(credential.mode(), KeyMode::Test);
//! assert_eq!(credential.masked(), "sk_test_...p7dc");
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fmt;

use anyhow::{bail, Result};
use reqwest::RequestBuilder;

/// Whether a key operates on test or live data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    Test,
    Live,
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMode::Test => f.write_str("test"),
            KeyMode::Live => f.write_str("live"),
        }
    }
}

/// A Stripe API key able to make server-side requests.
///
/// `Debug` output is masked so keys never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// Full-access secret key.
    SecretKey {
        /// The raw key, `sk_test_...` or `sk_live_...`.
        key: String,
    },
    /// Permission-scoped restricted key.
    RestrictedKey {
        /// The raw key, `rk_test_...` or `rk_live_...`.
        key: String,
    },
}

impl AuthCredential {
    /// Classifies a raw key by its prefix.
    ///
    /// # Errors
    ///
    /// Fails for publishable keys, for strings that are not Stripe keys, and
    /// for keys containing anything other than ASCII letters, digits and `_`.
    pub fn from_key(key: impl Into<String>) -> Result<Self> {
        let key = key.into().trim().to_string();

        if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            bail!("Invalid API key: only letters, digits and '_' are allowed");
        }

        if key.starts_with("sk_test_") || key.starts_with("sk_live_") {
            Ok(Self::SecretKey { key })
        } else if key.starts_with("rk_test_") || key.starts_with("rk_live_") {
            Ok(Self::RestrictedKey { key })
        } else if key.starts_with("pk_") {
            bail!("Publishable keys cannot authenticate server-side requests; use a secret key")
        } else {
            bail!("Not a Stripe API key (expected an sk_ or rk_ prefix)")
        }
    }

    /// Adds the `Authorization: Bearer <key>` header.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.key())
    }

    pub fn key(&self) -> &str {
        match self {
            Self::SecretKey { key } | Self::RestrictedKey { key } => key,
        }
    }

    pub fn mode(&self) -> KeyMode {
        if self.key()[3..].starts_with("live_") {
            KeyMode::Live
        } else {
            KeyMode::Test
        }
    }

    /// The key with everything between its prefix and last four characters
    /// hidden, e.g. `sk_test_...p7dc`.
    ///
    /// # Returns
    ///
    /// `****` when the key is too short to leave anything hidden.
    ///
    /// # Notes
    ///
    /// Slices on character boundaries, so a key that bypassed
    /// [`AuthCredential::from_key`] validation still masks without panicking.
    pub fn masked(&self) -> String {
        let key = self.key();
        let prefix_len = key.find('_').and_then(|first| {
            key[first + 1..].find('_').map(|second| first + second + 2)
        });
        let suffix_start = key.char_indices().rev().nth(3).map(|(i, _)| i);

        match (prefix_len, suffix_start) {
            (Some(prefix_len), Some(suffix_start)) if suffix_start > prefix_len => {
                format!("{}...{}", &key[..prefix_len], &key[suffix_start..])
            }
            _ => "****".to_string(),
        }
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SecretKey { .. } => write!(f, "SecretKey({})", self.masked()),
            Self::RestrictedKey { .. } => write!(f, "RestrictedKey({})", self.masked()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_keys() {
        assert!(matches!(
            AuthCredential::from_key("sk_live_abcdef123456").unwrap(),
            AuthCredential::SecretKey { .. }
        ));
        assert!(matches!(
            AuthCredential::from_key(" rk_test_abcdef123456\n").unwrap(),
            AuthCredential::RestrictedKey { .. }
        ));
        assert!(AuthCredential::from_key("pk_test_abcdef").is_err());
        assert!(AuthCredential::from_key("hunter2").is_err());
    }

    #[test]
    fn test_mode() {
        let live = AuthCredential::from_key("rk_live_abcdef123456").unwrap();
        let test = AuthCredential::from_key("sk_test_abcdef123456").unwrap();
        assert_eq!(live.mode(), KeyMode::Live);
        assert_eq!(test.mode(), KeyMode::Test);
    }

    #[test]
    fn test_debug_is_masked() {
        let credential = AuthCredential::from_key("sk_test_abcdef123456").unwrap();
        let debug = format!("{credential:?}");
        assert_eq!(debug, "SecretKey(sk_test_...3456)");
        assert!(!debug.contains("abcdef"));
    }

    #[test]
    fn test_short_key_fully_masked() {
        let credential = AuthCredential::from_key("sk_test_ab").unwrap();
        assert_eq!(credential.masked(), "****");
    }

    #[test]
    fn test_non_ascii_key_is_rejected() {
        assert!(AuthCredential::from_key("sk_test_ab€€").is_err());
        assert!(AuthCredential::from_key("sk_test_abc def1234").is_err());
    }

    #[test]
    fn test_masked_respects_char_boundaries() {
        let credential = AuthCredential::SecretKey {
            key: "sk_test_ab€€€€".to_string(),
        };
        assert_eq!(credential.masked(), "sk_test_...€€€€");

        let credential = AuthCredential::SecretKey {
            key: "sk_test_ab€€".to_string(),
        };
        assert_eq!(credential.masked(), "****");
    }
}
