use std::str::FromStr;

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::{Position, Url};

use crate::credentials::Credentials;
use crate::encode;
use crate::error::{InputError, Result};
use crate::header::CONTENT_TYPE_FORM;
use crate::params::RequestParams;
use crate::util;
use crate::{
    OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY, OAUTH_SIGNATURE_METHOD_KEY,
    OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY, OAUTH_VERSION_KEY,
};

type HmacSha1 = Hmac<Sha1>;

const OAUTH_VALUE_VERSION: &str = "1.0";
const OAUTH_VALUE_SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// HTTP verbs the signer accepts. Parsed case-insensitively, spoken
/// uppercase everywhere the protocol sees them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }
}

impl FromStr for Method {
    type Err = InputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            _ => Err(InputError::UnknownMethod(s.to_string())),
        }
    }
}

/// The seven canonical `oauth_*` header fields in population order.
///
/// Serialization order is a wire contract (servers parse this header by
/// position), so the fields live in an explicit ordered sequence rather
/// than a map.
#[derive(Debug, Clone)]
pub struct AuthorizationParams {
    entries: Vec<(&'static str, String)>,
}

impl AuthorizationParams {
    fn new() -> Self {
        AuthorizationParams {
            entries: Vec::with_capacity(7),
        }
    }

    fn push(&mut self, key: &'static str, value: String) {
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Serializes as `OAuth key="value", ...` in field order.
    pub fn to_header_value(&self) -> String {
        let fields = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, v))
            .collect::<Vec<String>>()
            .join(", ");
        format!("OAuth {}", fields)
    }
}

/// Output of one signing operation: the serialized header plus the fields
/// it was assembled from.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub authorization: String,
    pub fields: AuthorizationParams,
}

/// OAuth 1.0a HMAC-SHA1 signature engine.
///
/// Pure and stateless aside from the bound credentials: every call
/// allocates its own nonce, timestamp and parameter entries, so a single
/// `Signer` is safe to use from many tasks at once.
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
    nonce: Option<String>,
    timestamp: Option<i64>,
}

impl Signer {
    pub fn new(credentials: Credentials) -> Self {
        Signer {
            credentials,
            nonce: None,
            timestamp: None,
        }
    }

    /// Pins the nonce instead of generating one per call. Intended for
    /// reproducing known signature vectors.
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Pins the timestamp instead of reading the clock per call.
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Signs one request and serializes the `Authorization` header.
    ///
    /// `content_type` is the value the request will be sent with, if any;
    /// it decides whether a POST body participates in the signature. The
    /// URL's own query string never does: only the explicit `params` are
    /// folded in.
    pub fn sign(
        &self,
        method: Method,
        url: &str,
        params: &RequestParams,
        content_type: Option<&str>,
    ) -> Result<SignedRequest> {
        let url = parse_endpoint(url)?;
        let endpoint = &url[..Position::AfterPath];

        let nonce = self
            .nonce
            .clone()
            .unwrap_or_else(util::uppercase_uuid);
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Utc::now().timestamp())
            .to_string();

        // field order here is the header serialization order
        let mut fields = AuthorizationParams::new();
        fields.push(OAUTH_NONCE_KEY, nonce);
        fields.push(OAUTH_TIMESTAMP_KEY, timestamp);
        fields.push(OAUTH_CONSUMER_KEY, self.credentials.consumer_key().to_string());
        fields.push(OAUTH_TOKEN_KEY, self.credentials.access_token().to_string());
        fields.push(OAUTH_VERSION_KEY, OAUTH_VALUE_VERSION.to_string());
        fields.push(
            OAUTH_SIGNATURE_METHOD_KEY,
            OAUTH_VALUE_SIGNATURE_METHOD.to_string(),
        );

        let base_string = build_base_string(method, endpoint, params, &fields, content_type)?;
        let signing_key = format!(
            "{}&{}",
            encode::percent_encode(self.credentials.consumer_secret()),
            encode::percent_encode(self.credentials.access_token_secret())
        );
        let signature = encode::percent_encode_str(&hmac_sha1_base64(&signing_key, &base_string));
        fields.push(OAUTH_SIGNATURE_KEY, signature);

        Ok(SignedRequest {
            authorization: fields.to_header_value(),
            fields,
        })
    }
}

/// Validates that `raw` is an absolute http(s) URL.
pub(crate) fn parse_endpoint(raw: &str) -> std::result::Result<Url, InputError> {
    let url = Url::parse(raw).map_err(|_| InputError::MalformedUrl(raw.to_string()))?;
    let supported = matches!(url.scheme(), "http" | "https");
    if supported && url.host_str().is_some() {
        Ok(url)
    } else {
        Err(InputError::MalformedUrl(raw.to_string()))
    }
}

/// True when the request parameters participate in the signature: always,
/// except a POST whose body is not form-encoded.
fn signs_request_params(method: Method, content_type: Option<&str>) -> bool {
    method != Method::Post || content_type == Some(CONTENT_TYPE_FORM)
}

/// Builds the canonical signature base string:
/// `METHOD&escape(endpoint)&escape(sorted key=value pairs)`.
///
/// Request parameters are percent-encoded individually here and again as
/// part of the whole parameter string; the `oauth_*` fields enter raw and
/// pick up their single encoding from the outer pass. Both behaviors are
/// protocol requirements, not choices.
fn build_base_string(
    method: Method,
    endpoint: &str,
    params: &RequestParams,
    fields: &AuthorizationParams,
    content_type: Option<&str>,
) -> Result<String> {
    let mut entries: Vec<(String, String)> = Vec::new();
    if signs_request_params(method, content_type) {
        for (key, value) in params.iter() {
            entries.push((
                encode::percent_encode_str(key),
                encode::percent_encode_str(&value.render()?),
            ));
        }
    }
    for (key, value) in fields.iter() {
        entries.push((key.to_string(), value.to_string()));
    }

    // byte-wise lexicographic order by key, then value
    entries.sort();

    let param_string = entries
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<String>>()
        .join("&");
    Ok(format!(
        "{}&{}&{}",
        method.as_str(),
        encode::percent_encode(endpoint),
        encode::percent_encode(&param_string)
    ))
}

fn hmac_sha1_base64(signing_key: &str, base_string: &str) -> String {
    // NOTE: HMAC-SHA1 accepts any size of keys, so this never fails.
    let mut mac = HmacSha1::new_varkey(signing_key.as_bytes()).unwrap();
    mac.input(base_string.as_bytes());
    let hash = mac.result().code();
    base64::encode(&hash)
}
