//! Claim introspection for compact JWTs.
//!
//! The parser only decodes. It does **not** verify the signature segment and
//! does **not** compare `exp` with the current time; callers that need either
//! must do it themselves before trusting the claims.

use crate::photon_api::types::PhotonError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{decode_header, Algorithm};
use serde::{Deserialize, Deserializer, Serialize};

/// Audience claim, which providers send either as a string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(value) => value == audience,
            Audience::Multiple(values) => values.iter().any(|value| value == audience),
        }
    }
}

/// Claims decoded from a token payload
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JwtToken {
    /// Subject (`sub`)
    #[serde(rename = "sub", default, deserialize_with = "null_as_default")]
    pub subject: String,
    /// Group memberships (`groups`), in token order
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<String>,
    /// Expiry (`exp`), unix seconds
    #[serde(rename = "exp", default)]
    pub expires: i64,
    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(rename = "aud", default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    /// Signing algorithm from the header, when the header decodes
    #[serde(skip)]
    pub algorithm: Option<Algorithm>,
}

impl JwtToken {
    pub fn is_member_of(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Compare `exp` against a caller-supplied clock
    pub fn is_expired_at(&self, unix_seconds: i64) -> bool {
        self.expires <= unix_seconds
    }
}

/// Treat an explicit `null` claim like a missing one
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode the claims of a compact JWT without verifying it
///
/// # Errors
///
/// Returns [`PhotonError::MalformedToken`] when the token has fewer than three
/// dot-separated segments, or when the payload is not base64url-encoded JSON.
///
/// # Example
///
/// ```
/// use photon_sdk::parse_token_details;
///
/// // header {"alg":"RS256"}, payload {"sub":"admin","exp":1}
/// let token = "eyJhbGciOiJSUzI1NiJ9.eyJzdWIiOiJhZG1pbiIsImV4cCI6MX0.sig";
/// let claims = parse_token_details(token).unwrap();
/// assert_eq!(claims.subject, "admin");
/// assert_eq!(claims.expires, 1);
/// ```
pub fn parse_token_details(raw_token: &str) -> Result<JwtToken, PhotonError> {
    let segments = split_segments(raw_token)?;
    let payload = decode_segment(segments[1], "payload")?;

    let mut token: JwtToken = serde_json::from_slice(&payload).map_err(|e| {
        PhotonError::MalformedToken(format!("Token payload is not valid JSON: {}", e))
    })?;

    token.algorithm = decode_header(raw_token).ok().map(|header| header.alg);

    tracing::debug!(
        "Parsed token details: groups={}, exp={}",
        token.groups.len(),
        token.expires
    );
    Ok(token)
}

/// Decode the header and payload segments into their JSON text
///
/// Same structural rules as [`parse_token_details`]; the JSON itself is not
/// interpreted.
pub fn parse_raw_token_details(raw_token: &str) -> Result<Vec<String>, PhotonError> {
    let segments = split_segments(raw_token)?;

    segments[..2]
        .iter()
        .zip(["header", "payload"])
        .map(|(segment, name)| {
            let bytes = decode_segment(segment, name)?;
            String::from_utf8(bytes).map_err(|_| {
                PhotonError::MalformedToken(format!("Token {} is not valid UTF-8", name))
            })
        })
        .collect()
}

fn split_segments(raw_token: &str) -> Result<Vec<&str>, PhotonError> {
    let segments: Vec<&str> = raw_token.split('.').collect();
    if segments.len() < 3 {
        return Err(PhotonError::MalformedToken(format!(
            "Expected 3 token segments, found {}",
            segments.len()
        )));
    }
    Ok(segments)
}

fn decode_segment(segment: &str, name: &str) -> Result<Vec<u8>, PhotonError> {
    URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| {
            PhotonError::MalformedToken(format!("Token {} is not valid base64url: {}", name, e))
        })
}
