// SPDX-License-Identifier: MPL-2.0
//! API token gate.
//!
//! Clients send `Authorization: Token <key>`. Only BLAKE3 digests of issued
//! keys are stored, so a leaked configuration file does not leak keys.

use crate::config::AuthConfig;

/// Keyword expected before the key in the `Authorization` header.
const TOKEN_KEYWORD: &str = "Token";

/// Random bytes per issued key (40 hex characters).
const KEY_BYTES: usize = 20;

/// A freshly issued token. The key is shown once; only the digest is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub key: String,
    pub digest: String,
}

/// Set of accepted token digests.
#[derive(Debug, Clone, Default)]
pub struct AccessTokens {
    digests: Vec<blake3::Hash>,
}

impl AccessTokens {
    /// Loads digests from configuration. Entries that are not valid
    /// 64-character hex digests are skipped.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        let digests = config
            .token_hashes
            .iter()
            .filter_map(|hex| blake3::Hash::from_hex(hex.trim()).ok())
            .collect();
        Self { digests }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    /// Checks an `Authorization` header value.
    ///
    /// The keyword is matched case-insensitively and must be followed by
    /// exactly one key.
    #[must_use]
    pub fn authorize(&self, header: Option<&str>) -> bool {
        let Some(key) = header.and_then(parse_token_header) else {
            return false;
        };
        let digest = blake3::hash(key.as_bytes());
        // blake3::Hash equality is constant-time.
        self.digests.iter().any(|known| *known == digest)
    }

    /// Issues a new random key and accepts it from now on.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS random source is unavailable.
    pub fn issue(&mut self) -> Result<IssuedToken, getrandom::Error> {
        let mut bytes = [0u8; KEY_BYTES];
        getrandom::fill(&mut bytes)?;
        let key: String = bytes.iter().map(|b| format!("{b:02x}")).collect();

        let digest = blake3::hash(key.as_bytes());
        self.digests.push(digest);

        Ok(IssuedToken {
            key,
            digest: digest.to_hex().to_string(),
        })
    }
}

fn parse_token_header(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    let keyword = parts.next()?;
    let key = parts.next()?;
    if parts.next().is_some() || !keyword.eq_ignore_ascii_case(TOKEN_KEYWORD) {
        return None;
    }
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_key_is_forty_hex_chars() {
        let mut tokens = AccessTokens::default();
        let issued = tokens.issue().expect("random source");
        assert_eq!(issued.key.len(), 40);
        assert!(issued.key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(issued.digest.len(), 64);
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn issued_key_is_authorized() {
        let mut tokens = AccessTokens::default();
        let issued = tokens.issue().expect("random source");

        assert!(tokens.authorize(Some(&format!("Token {}", issued.key))));
        assert!(tokens.authorize(Some(&format!("token   {}", issued.key))));
        assert!(!tokens.authorize(Some("Token wrong")));
        assert!(!tokens.authorize(Some(&format!("Bearer {}", issued.key))));
        assert!(!tokens.authorize(Some(&issued.key)));
        assert!(!tokens.authorize(None));
    }

    #[test]
    fn header_with_extra_parts_is_rejected() {
        assert_eq!(parse_token_header("Token abc def"), None);
        assert_eq!(parse_token_header("Token"), None);
        assert_eq!(parse_token_header("Token abc"), Some("abc"));
    }

    #[test]
    fn config_digests_round_trip() {
        let mut issuer = AccessTokens::default();
        let issued = issuer.issue().expect("random source");

        let config = AuthConfig {
            token_hashes: vec![issued.digest.clone(), "not-hex".into()],
        };
        let tokens = AccessTokens::from_config(&config);

        assert_eq!(tokens.len(), 1);
        assert!(tokens.authorize(Some(&format!("Token {}", issued.key))));
    }

    #[test]
    fn empty_set_rejects_everything() {
        let tokens = AccessTokens::default();
        assert!(tokens.is_empty());
        assert!(!tokens.authorize(Some("Token anything")));
    }
}
