//! URL reconstruction and validation
//!
//! A [`UrlKey`] is the canonical absolute URL used as the lookup identity in
//! both the cache and the backing store. It is built from the scheme, host and
//! percent-encoded path supplied by a caller:
//!
//! ```text
//! scheme + "://" + host + "/" + decode(path)
//! ```
//!
//! The path is decoded before concatenation, so an encoded slash (`%2F`)
//! becomes part of the path rather than a new segment boundary.

use std::fmt;

use thiserror::Error;
use url::Url;

/// Scheme used when the caller supplies none
pub const DEFAULT_SCHEME: &str = "http";

const SCHEME_SEPARATOR: &str = "://";
const PATH_DELIMITER: &str = "/";

/// Failure to build a [`UrlKey`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// Malformed percent escape, carrying the offending escape sequence
    #[error("invalid URL escape {escape:?}")]
    Decode { escape: String },

    /// The reconstructed URL is not well formed. The parser's reason is not
    /// exposed.
    #[error("Invalid URL")]
    Invalid,
}

/// Canonical absolute URL (`scheme://host[:port]/path`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlKey(String);

impl UrlKey {
    /// Reconstructs and validates a URL from request-supplied parts.
    ///
    /// `path_encoded` is percent-decoded first; `scheme` falls back to
    /// [`DEFAULT_SCHEME`] and is otherwise used verbatim.
    pub fn reconstruct(
        scheme: Option<&str>,
        host: &str,
        path_encoded: &str,
    ) -> Result<Self, UrlError> {
        let path = percent_decode(path_encoded, false)?;
        Self::from_parts(scheme, host, &path)
    }

    /// Builds and validates a URL from an already decoded path
    pub fn from_parts(scheme: Option<&str>, host: &str, path: &str) -> Result<Self, UrlError> {
        let scheme = scheme.unwrap_or(DEFAULT_SCHEME);

        let candidate = format!("{scheme}{SCHEME_SEPARATOR}{host}{PATH_DELIMITER}{path}");
        validate(scheme, &candidate)?;

        Ok(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UrlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UrlKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strictly percent-decodes `input`.
///
/// Any `%` not followed by two hex digits fails with [`UrlError::Decode`]
/// holding the `%` and at most two following characters. With
/// `plus_as_space` set (form encoding), `+` decodes to a space. Decoded bytes
/// that are not valid UTF-8 become U+FFFD.
pub fn percent_decode(input: &str, plus_as_space: bool) -> Result<String, UrlError> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let high = bytes.get(i + 1).and_then(|b| hex_value(*b));
                let low = bytes.get(i + 2).and_then(|b| hex_value(*b));

                match (high, low) {
                    (Some(high), Some(low)) => {
                        decoded.push((high << 4) | low);
                        i += 3;
                    }
                    _ => {
                        return Err(UrlError::Decode {
                            escape: input[i..].chars().take(3).collect(),
                        });
                    }
                }
            }
            b'+' if plus_as_space => {
                decoded.push(b' ');
                i += 1;
            }
            b => {
                decoded.push(b);
                i += 1;
            }
        }
    }

    Ok(String::from_utf8_lossy(&decoded).into_owned())
}

fn hex_value(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

fn validate(scheme: &str, candidate: &str) -> Result<(), UrlError> {
    if !is_scheme(scheme) {
        return Err(UrlError::Invalid);
    }

    // The parser strips tab and newlines and escapes other controls silently
    if candidate.chars().any(|c| c.is_ascii_control()) {
        return Err(UrlError::Invalid);
    }

    let rest = &candidate[scheme.len() + SCHEME_SEPARATOR.len()..];
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..authority_end];

    if authority.is_empty() || !authority.chars().all(is_authority_char) {
        return Err(UrlError::Invalid);
    }

    let parsed = Url::parse(candidate).map_err(|_| UrlError::Invalid)?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlError::Invalid),
    }
}

// RFC 3986: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

// userinfo, reg-name, IP literal and port characters
fn is_authority_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.'
                | '_'
                | '~'
                | '!'
                | '$'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | ';'
                | '='
                | ':'
                | '@'
                | '['
                | ']'
                | '%'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheme() {
        let key = UrlKey::reconstruct(None, "www.compdata.ca", "catalog").unwrap();
        assert_eq!(key.as_str(), "http://www.compdata.ca/catalog");
    }

    #[test]
    fn test_explicit_scheme() {
        let key = UrlKey::reconstruct(Some("https"), "hybrid-analysis.com", "sample").unwrap();
        assert_eq!(key.as_str(), "https://hybrid-analysis.com/sample");
    }

    #[test]
    fn test_scheme_used_verbatim() {
        let key = UrlKey::reconstruct(Some("ftp"), "files.example.org", "pub").unwrap();
        assert_eq!(key.as_str(), "ftp://files.example.org/pub");
    }

    #[test]
    fn test_encoded_slash_becomes_path_content() {
        let key = UrlKey::reconstruct(None, "media0.mypage.cz", "files%2Fdc5.exe").unwrap();
        assert_eq!(key.as_str(), "http://media0.mypage.cz/files/dc5.exe");
    }

    #[test]
    fn test_host_with_port() {
        let key = UrlKey::reconstruct(None, "localhost:8081", "admin").unwrap();
        assert_eq!(key.as_str(), "http://localhost:8081/admin");
    }

    #[test]
    fn test_single_delimiter_inserted_regardless_of_slashes() {
        let key = UrlKey::reconstruct(None, "example.com", "%2Fetc%2Fpasswd").unwrap();
        assert_eq!(key.as_str(), "http://example.com//etc/passwd");
    }

    #[test]
    fn test_empty_path() {
        let key = UrlKey::reconstruct(None, "example.com", "").unwrap();
        assert_eq!(key.as_str(), "http://example.com/");
    }

    #[test]
    fn test_plus_is_literal_in_path() {
        let key = UrlKey::reconstruct(None, "example.com", "a+b").unwrap();
        assert_eq!(key.as_str(), "http://example.com/a+b");
    }

    #[test]
    fn test_backslash_in_host_is_invalid() {
        let err = UrlKey::reconstruct(None, "www.make\\invalid.compdata.ca", "catalog").unwrap_err();
        assert_eq!(err, UrlError::Invalid);
        assert_eq!(err.to_string(), "Invalid URL");
    }

    #[test]
    fn test_invalid_escape_in_path() {
        let err = UrlKey::reconstruct(None, "www.compdata.ca", "catalog%2resource").unwrap_err();
        assert_eq!(
            err,
            UrlError::Decode {
                escape: "%2r".to_string()
            }
        );
        assert_eq!(err.to_string(), r#"invalid URL escape "%2r""#);
    }

    #[test]
    fn test_truncated_escape_at_end() {
        let err = percent_decode("abc%4", false).unwrap_err();
        assert_eq!(err.to_string(), r#"invalid URL escape "%4""#);

        let err = percent_decode("abc%", false).unwrap_err();
        assert_eq!(err.to_string(), r#"invalid URL escape "%""#);
    }

    #[test]
    fn test_decoded_invalid_utf8_is_replaced() {
        assert_eq!(percent_decode("a%ffb", false).unwrap(), "a\u{FFFD}b");

        let key = UrlKey::reconstruct(None, "example.com", "a%ffb").unwrap();
        assert_eq!(key.as_str(), "http://example.com/a\u{FFFD}b");
    }

    #[test]
    fn test_control_characters_are_invalid() {
        for path in ["a%0Ab", "a%00b", "a%09b", "a%0Db", "a%7Fb"] {
            assert_eq!(
                UrlKey::reconstruct(None, "example.com", path),
                Err(UrlError::Invalid),
                "{path}"
            );
        }
    }

    #[test]
    fn test_plus_as_space_in_form_mode() {
        assert_eq!(percent_decode("a+b%20c", true).unwrap(), "a b c");
        assert_eq!(percent_decode("a+b", false).unwrap(), "a+b");
    }

    #[test]
    fn test_empty_scheme_is_invalid() {
        let err = UrlKey::reconstruct(Some(""), "example.com", "x").unwrap_err();
        assert_eq!(err, UrlError::Invalid);
    }

    #[test]
    fn test_malformed_scheme_is_invalid() {
        assert_eq!(
            UrlKey::reconstruct(Some("1http"), "example.com", "x"),
            Err(UrlError::Invalid)
        );
        assert_eq!(
            UrlKey::reconstruct(Some("ht tp"), "example.com", "x"),
            Err(UrlError::Invalid)
        );
    }

    #[test]
    fn test_empty_host_is_invalid() {
        assert_eq!(
            UrlKey::reconstruct(None, "", "catalog"),
            Err(UrlError::Invalid)
        );
    }

    #[test]
    fn test_non_numeric_port_is_invalid() {
        assert_eq!(
            UrlKey::reconstruct(None, "example.com:http", "x"),
            Err(UrlError::Invalid)
        );
    }

    #[test]
    fn test_out_of_range_port_is_invalid() {
        assert_eq!(
            UrlKey::reconstruct(None, "example.com:99999", "x"),
            Err(UrlError::Invalid)
        );
    }

    #[test]
    fn test_file_scheme_localhost_is_invalid() {
        assert_eq!(
            UrlKey::reconstruct(Some("file"), "localhost", "etc"),
            Err(UrlError::Invalid)
        );
    }

    #[test]
    fn test_host_with_space_is_invalid() {
        assert_eq!(
            UrlKey::reconstruct(None, "exa mple.com", "x"),
            Err(UrlError::Invalid)
        );
    }

    #[test]
    fn test_from_parts_does_not_decode() {
        let key = UrlKey::from_parts(None, "example.com", "100%25").unwrap();
        assert_eq!(key.as_str(), "http://example.com/100%25");
    }

    #[test]
    fn test_display_matches_as_str() {
        let key = UrlKey::reconstruct(Some("https"), "example.com", "a%20b").unwrap();
        assert_eq!(key.to_string(), "https://example.com/a b");
        assert_eq!(key.into_string(), "https://example.com/a b");
    }
}
