//! Redirect entity mapping a short key to a target location.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::key_codec::KeyCodec;
use crate::utils::uri_codec::{decode_uri, encode_uri};

/// Locations end up in `Location` headers and in the interstitial page's
/// links, so only web schemes are accepted.
const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Errors raised while building or decoding a [`Redirect`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Key \"{key}\" is invalid")]
    InvalidKey { key: String },

    #[error("Invalid url: {location} ({reason})")]
    InvalidLocation { location: String, reason: String },

    #[error("Record is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Record is malformed: {0}")]
    MalformedRecord(String),
}

/// Flat field set persisted by every storage engine.
///
/// `location` holds the URI-encoded form. Absent fields are tolerated here and
/// rejected by [`Redirect::from_record`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instant: Option<bool>,
}

/// An immutable key → location mapping.
///
/// Construct through [`Redirect::new`] (validating) or
/// [`Redirect::from_record`] (trusting storage). There are no setters; an
/// update is a delete followed by an insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    key: String,
    location: String,
    instant: bool,
}

impl Redirect {
    /// Validates the inputs and builds a redirect.
    ///
    /// When `key` is `None` a fresh one is drawn from `codec`; an explicit key
    /// must satisfy [`KeyCodec::validate`]. `location` must parse as an
    /// absolute `http` or `https` URL and is stored URI-encoded.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidKey`] if the explicit key fails the pattern
    /// - [`ValidationError::InvalidLocation`] if the location is not an absolute
    ///   `http`/`https` URL
    pub fn new(
        location: &str,
        key: Option<&str>,
        instant: bool,
        codec: &KeyCodec,
    ) -> Result<Self, ValidationError> {
        let key = match key {
            Some(key) if codec.validate(key) => key.to_string(),
            Some(key) => {
                return Err(ValidationError::InvalidKey {
                    key: key.to_string(),
                });
            }
            None => codec.generate(),
        };

        let url = Url::parse(location).map_err(|e| ValidationError::InvalidLocation {
            location: location.to_string(),
            reason: e.to_string(),
        })?;

        if !ALLOWED_SCHEMES.contains(&url.scheme()) {
            return Err(ValidationError::InvalidLocation {
                location: location.to_string(),
                reason: format!("scheme '{}' is not allowed", url.scheme()),
            });
        }

        Ok(Self {
            key,
            location: encode_uri(location),
            instant,
        })
    }

    /// Rebuilds a redirect from a stored record.
    ///
    /// Key pattern and URL syntax are not re-checked; they were validated when
    /// the record was written.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if `key` or `location` is
    /// absent or empty.
    pub fn from_record(record: RedirectRecord) -> Result<Self, ValidationError> {
        let key = record
            .key
            .filter(|k| !k.is_empty())
            .ok_or(ValidationError::MissingField("key"))?;
        let location = record
            .location
            .filter(|l| !l.is_empty())
            .ok_or(ValidationError::MissingField("location"))?;

        Ok(Self {
            key,
            location,
            instant: record.instant.unwrap_or(false),
        })
    }

    /// Produces the record persisted by storage engines.
    pub fn to_record(&self) -> RedirectRecord {
        RedirectRecord {
            key: Some(self.key.clone()),
            location: Some(self.location.clone()),
            instant: Some(self.instant),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The target location, decoded.
    pub fn location(&self) -> String {
        decode_uri(&self.location)
    }

    /// The target location as stored.
    pub fn encoded_location(&self) -> &str {
        &self.location
    }

    /// Whether resolution should redirect at the HTTP level without an
    /// interstitial page.
    pub fn instant(&self) -> bool {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> KeyCodec {
        KeyCodec::new("^[a-z0-9]{6}$").unwrap()
    }

    #[test]
    fn test_redirect_creation() {
        let redirect =
            Redirect::new("https://example.com/page", Some("abc123"), false, &codec()).unwrap();

        assert_eq!(redirect.key(), "abc123");
        assert_eq!(redirect.location(), "https://example.com/page");
        assert!(!redirect.instant());
    }

    #[test]
    fn test_redirect_generates_key_when_absent() {
        let codec = codec();
        let redirect = Redirect::new("https://example.com", None, true, &codec).unwrap();

        assert!(codec.validate(redirect.key()));
        assert!(redirect.instant());
    }

    #[test]
    fn test_redirect_rejects_invalid_key() {
        let result = Redirect::new("https://example.com", Some("AB!"), false, &codec());

        assert_eq!(
            result.unwrap_err(),
            ValidationError::InvalidKey {
                key: "AB!".to_string()
            }
        );
    }

    #[test]
    fn test_redirect_rejects_empty_key() {
        let result = Redirect::new("https://example.com", Some(""), false, &codec());
        assert!(matches!(result, Err(ValidationError::InvalidKey { .. })));
    }

    #[test]
    fn test_redirect_rejects_invalid_location() {
        for location in ["not-a-url", "", "/relative/path", "https://exa mple.com"] {
            let result = Redirect::new(location, Some("abc123"), false, &codec());

            match result {
                Err(ValidationError::InvalidLocation { location: l, .. }) => {
                    assert_eq!(l, location)
                }
                other => panic!("expected InvalidLocation for '{}', got {:?}", location, other),
            }
        }
    }

    #[test]
    fn test_redirect_rejects_non_web_schemes() {
        for location in [
            "javascript:alert(document.cookie)",
            "JavaScript:alert(1)",
            "data:text/html,<script>alert(1)</script>",
            "vbscript:msgbox(1)",
            "file:///etc/passwd",
            "mailto:someone@example.com",
        ] {
            let result = Redirect::new(location, Some("abc123"), false, &codec());

            match result {
                Err(ValidationError::InvalidLocation { reason, .. }) => {
                    assert!(reason.contains("not allowed"), "{}", reason)
                }
                other => panic!("expected InvalidLocation for '{}', got {:?}", location, other),
            }
        }
    }

    #[test]
    fn test_error_messages_name_offending_input() {
        let key_err = Redirect::new("https://example.com", Some("AB!"), false, &codec())
            .unwrap_err()
            .to_string();
        assert!(key_err.contains("AB!"));

        let url_err = Redirect::new("not-a-url", Some("abc123"), false, &codec())
            .unwrap_err()
            .to_string();
        assert!(url_err.contains("not-a-url"));
    }

    #[test]
    fn test_location_is_stored_encoded_and_read_decoded() {
        let redirect =
            Redirect::new("https://example.com/a b/ü", Some("abc123"), false, &codec()).unwrap();

        assert_eq!(redirect.encoded_location(), "https://example.com/a%20b/%C3%BC");
        assert_eq!(redirect.location(), "https://example.com/a b/ü");
    }

    #[test]
    fn test_record_round_trip() {
        let codec = codec();

        for (location, key, instant) in [
            ("https://example.com/page", "abc123", false),
            ("https://example.com/a b?q=ü#x", "zzz999", true),
            ("http://example.com:8080/", "plain1", false),
        ] {
            let redirect = Redirect::new(location, Some(key), instant, &codec).unwrap();
            let restored = Redirect::from_record(redirect.to_record()).unwrap();

            assert_eq!(restored, redirect);
            assert_eq!(restored.location(), location);
        }
    }

    #[test]
    fn test_to_record_fields() {
        let redirect =
            Redirect::new("https://example.com/a b", Some("abc123"), true, &codec()).unwrap();

        assert_eq!(
            redirect.to_record(),
            RedirectRecord {
                key: Some("abc123".to_string()),
                location: Some("https://example.com/a%20b".to_string()),
                instant: Some(true),
            }
        );
    }

    #[test]
    fn test_from_record_missing_fields() {
        let missing_key = RedirectRecord {
            key: None,
            location: Some("https://example.com".to_string()),
            instant: None,
        };
        assert_eq!(
            Redirect::from_record(missing_key).unwrap_err(),
            ValidationError::MissingField("key")
        );

        let empty_location = RedirectRecord {
            key: Some("abc123".to_string()),
            location: Some(String::new()),
            instant: None,
        };
        assert_eq!(
            Redirect::from_record(empty_location).unwrap_err(),
            ValidationError::MissingField("location")
        );
    }

    #[test]
    fn test_from_record_defaults_instant() {
        let record = RedirectRecord {
            key: Some("abc123".to_string()),
            location: Some("https://example.com".to_string()),
            instant: None,
        };

        assert!(!Redirect::from_record(record).unwrap().instant());
    }

    #[test]
    fn test_from_record_does_not_revalidate() {
        let record = RedirectRecord {
            key: Some("LEGACY-KEY".to_string()),
            location: Some("legacy".to_string()),
            instant: Some(false),
        };

        let redirect = Redirect::from_record(record).unwrap();
        assert_eq!(redirect.key(), "LEGACY-KEY");
    }

    #[test]
    fn test_record_json_shape() {
        let record = RedirectRecord {
            key: Some("abc123".to_string()),
            location: Some("https://example.com".to_string()),
            instant: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "key": "abc123", "location": "https://example.com" })
        );

        let parsed: RedirectRecord =
            serde_json::from_str(r#"{"key":"abc123","location":"x","_id":"ignored"}"#).unwrap();
        assert_eq!(parsed.instant, None);
    }
}
