//! HTTP Basic authentication gate.
//!
//! Pure credential checking, free of any transport type: the API layer hands
//! in the raw `Authorization` header value plus the configured expected pair
//! and gets back an allow/deny [`AuthDecision`]. Malformed headers and
//! missing configuration are errors rather than denials, so the caller can
//! tell a broken client from a broken deployment.

use crate::error::Error;
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;

/// Outcome of one authorization check. `principal` is the presented
/// username; it only names an authorized caller when `allow` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthDecision {
    pub allow: bool,
    pub principal: String,
}

/// Decode a `Basic` authorization header into its username/password pair.
///
/// # Errors
///
/// Returns [`Error::InvalidAuthHeader`] unless the header is exactly two
/// whitespace-separated tokens with a base64 `user:pass` payload, and
/// [`Error::UnsupportedAuthScheme`] for any scheme other than `Basic`.
pub fn decode_authorization(header: &str) -> Result<(String, String), Error> {
    let tokens: Vec<&str> = header.split_whitespace().collect();
    let [scheme, payload] = tokens[..] else {
        tracing::debug!("invalid authorization header: \"{header}\"");
        return Err(Error::InvalidAuthHeader);
    };

    if scheme != "Basic" {
        tracing::debug!("unsupported authorization scheme: \"{scheme}\"");
        return Err(Error::UnsupportedAuthScheme(scheme.to_string()));
    }

    let decoded = BASE64_ENGINE
        .decode(payload)
        .map_err(|_| Error::InvalidAuthHeader)?;
    let decoded = String::from_utf8(decoded).map_err(|_| Error::InvalidAuthHeader)?;

    let (username, password) = decoded.split_once(':').ok_or(Error::InvalidAuthHeader)?;
    Ok((username.to_string(), password.to_string()))
}

/// Check a presented `Authorization` header against the configured expected
/// credentials.
///
/// Comparison is plain string equality, not constant-time.
///
/// # Errors
///
/// Propagates [`decode_authorization`] errors, and returns
/// [`Error::MissingCredentials`] when either expected value is empty — a
/// configuration fault, not an authentication failure.
pub fn authorize(
    header: &str,
    expected_user: &str,
    expected_pass: &str,
) -> Result<AuthDecision, Error> {
    if expected_user.is_empty() || expected_pass.is_empty() {
        return Err(Error::MissingCredentials);
    }

    let (username, password) = decode_authorization(header)?;
    let allow = username == expected_user && password == expected_pass;
    Ok(AuthDecision {
        allow,
        principal: username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(user: &str, pass: &str) -> String {
        format!("Basic {}", BASE64_ENGINE.encode(format!("{user}:{pass}")))
    }

    #[test]
    fn matching_credentials_allow_with_the_username_as_principal() {
        let decision = authorize(&basic("user", "pass"), "user", "pass").unwrap();
        assert!(decision.allow);
        assert_eq!(decision.principal, "user");
    }

    #[test]
    fn wrong_password_denies() {
        let decision = authorize(&basic("user", "pass"), "user", "wrongpass").unwrap();
        assert!(!decision.allow);
    }

    #[test]
    fn wrong_username_denies() {
        let decision = authorize(&basic("eve", "pass"), "user", "pass").unwrap();
        assert!(!decision.allow);
    }

    #[test]
    fn password_may_contain_colons() {
        let decision = authorize(&basic("user", "pa:ss"), "user", "pa:ss").unwrap();
        assert!(decision.allow);
    }

    #[test]
    fn non_basic_scheme_is_unsupported() {
        let err = decode_authorization("Digest abcdef").unwrap_err();
        assert!(matches!(err, Error::UnsupportedAuthScheme(s) if s == "Digest"));
    }

    #[test]
    fn wrong_token_count_is_invalid() {
        assert!(matches!(
            decode_authorization("Basic").unwrap_err(),
            Error::InvalidAuthHeader
        ));
        assert!(matches!(
            decode_authorization("Basic a b").unwrap_err(),
            Error::InvalidAuthHeader
        ));
    }

    #[test]
    fn garbage_payload_is_invalid() {
        assert!(matches!(
            decode_authorization("Basic !!!not-base64!!!").unwrap_err(),
            Error::InvalidAuthHeader
        ));
        // Valid base64, but no colon separator.
        let no_colon = format!("Basic {}", BASE64_ENGINE.encode("userpass"));
        assert!(matches!(
            decode_authorization(&no_colon).unwrap_err(),
            Error::InvalidAuthHeader
        ));
    }

    #[test]
    fn missing_configured_credentials_is_a_configuration_error() {
        let err = authorize(&basic("user", "pass"), "", "pass").unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));
    }
}
