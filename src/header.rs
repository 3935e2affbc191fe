use chrono::Utc;
use url::Url;

use crate::signer::Method;
use crate::util;

/// The `Authorization` header key.
pub const AUTHORIZATION: &str = "Authorization";
/// Content type of a form-encoded POST body.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

pub(crate) const CONTENT_TYPE: &str = "Content-Type";

const CLIENT_VERSION: &str = "6.59.3";
const API_VERSION: &str = "5";
const CLIENT_NAME: &str = "Twitter-iPhone";
const CLIENT_LANGUAGE: &str = "ja";
const USER_AGENT_API: &str = "Twitter-iPhone/6.59.3 iOS/9.3.3 (Apple;iPhone8,2;;;;;1)";
const USER_AGENT_IMAGE: &str = "Twitter/6.59.3 CFNetwork/758.5.3 Darwin/15.6.0";
const USER_AGENT_VIDEO: &str =
    "AppleCoreMedia/1.0.0.13G34 (iPhone; U; CPU OS 9_3_3 like Mac OS X; ja_jp)";
const USER_AGENT_VMAP: &str = "Twitter-iPhone/6.59.3 iOS/9.3.3 (Apple;iPhone8,2)";

/// Header fields in emission order.
///
/// The emulated client sends its headers in a fixed order, so this is an
/// explicit sequence with add-or-overwrite semantics, not a map. The one
/// contract the signing core relies on: `set` can fill in `Authorization`
/// after the signature is computed.
#[derive(Debug, Clone, Default)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends the field, or overwrites it in place when already present.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Stable identifiers of the emulated device. When absent, fresh uppercase
/// UUIDs are generated per header build.
#[derive(Debug, Clone, Default)]
pub struct ClientIdentity {
    pub client_uuid: Option<String>,
    pub device_id: Option<String>,
}

/// The static per-endpoint header tables of the emulated mobile client,
/// selected explicitly by name.
#[derive(Debug, Clone)]
pub enum HeaderTemplate {
    /// Standard REST API endpoints.
    Api,
    /// Long-poll endpoints.
    Polling,
    /// Static image assets.
    Image,
    /// Video segment fetches, scoped to one playback session.
    Video { session_id: String },
    /// VMAP ad manifest fetches.
    Vmap,
}

impl HeaderTemplate {
    /// Builds the header set for one request. Field values and their order
    /// mimic the legacy client byte for byte; the dispatcher fills in
    /// `Authorization` afterwards.
    ///
    /// `url` must have a host (any URL the dispatcher accepts does); the
    /// `Host` field is derived from it.
    pub fn build(&self, method: Method, url: &Url, identity: &ClientIdentity) -> HeaderSet {
        let mut header = HeaderSet::new();
        header.set("Host", host_of(url));
        match self {
            HeaderTemplate::Api => {
                header.set("X-Twitter-Client-Version", CLIENT_VERSION);
                header.set("Accept", "*/*");
                header.set("X-Client-UUID", client_uuid(identity));
                header.set("X-Twitter-Client-Language", CLIENT_LANGUAGE);
                header.set("X-B3-TraceId", util::trace_id(Utc::now().timestamp()));
                header.set("Accept-Language", CLIENT_LANGUAGE);
                header.set("Accept-Encoding", "gzip, deflate");
                header.set("X-Twitter-Client-DeviceID", device_id(identity));
                if method == Method::Post {
                    header.set(CONTENT_TYPE, CONTENT_TYPE_FORM);
                }
                header.set("User-Agent", USER_AGENT_API);
                header.set("X-Twitter-Client-Limit-Ad-Tracking", "1");
                header.set("X-Twitter-API-Version", API_VERSION);
                header.set("X-Twitter-Client", CLIENT_NAME);
            }
            HeaderTemplate::Polling => {
                header.set("X-Twitter-Client-Version", CLIENT_VERSION);
                header.set("X-Twitter-Polling", "true");
                header.set("X-Client-UUID", client_uuid(identity));
                header.set("X-Twitter-Client-Language", CLIENT_LANGUAGE);
                header.set("X-B3-TraceId", util::trace_id(Utc::now().timestamp()));
                header.set("x-spdy-bypass", "1");
                header.set("Accept", "*/*");
                header.set("Accept-Language", CLIENT_LANGUAGE);
                header.set("Accept-Encoding", "gzip, deflate");
                header.set("X-Twitter-Client-DeviceID", device_id(identity));
                header.set("User-Agent", USER_AGENT_API);
                header.set("X-Twitter-API-Version", API_VERSION);
                header.set("X-Twitter-Client-Limit-Ad-Tracking", "1");
                header.set("X-Twitter-Client", CLIENT_NAME);
            }
            HeaderTemplate::Image => {
                header.set("Accept", "*/*");
                header.set("User-Agent", USER_AGENT_IMAGE);
                header.set("Accept-Language", "ja-jp");
                header.set("Accept-Encoding", "gzip, deflate");
            }
            HeaderTemplate::Video { session_id } => {
                header.set("X-Playback-Session-Id", session_id.clone());
                header.set("Accept", "*/*");
                header.set("User-Agent", USER_AGENT_VIDEO);
                header.set("Accept-Language", "ja-jp");
                header.set("Accept-Encoding", "identity");
            }
            HeaderTemplate::Vmap => {
                header.set("Accept", "*/*");
                header.set("User-Agent", USER_AGENT_VMAP);
                header.set("Accept-Language", "ja-jp");
                header.set("Accept-Encoding", "gzip, deflate");
            }
        }
        header
    }
}

fn host_of(url: &Url) -> String {
    debug_assert!(url.has_host(), "header templates need a URL with a host");
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

fn client_uuid(identity: &ClientIdentity) -> String {
    identity
        .client_uuid
        .clone()
        .unwrap_or_else(util::uppercase_uuid)
}

fn device_id(identity: &ClientIdentity) -> String {
    identity
        .device_id
        .clone()
        .unwrap_or_else(util::uppercase_uuid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_url() -> Url {
        Url::parse("https://api.example.com/1.1/test.json").unwrap()
    }

    #[test]
    fn api_template_field_order() {
        let identity = ClientIdentity {
            client_uuid: Some("CLIENT-UUID".to_string()),
            device_id: Some("DEVICE-ID".to_string()),
        };
        let header = HeaderTemplate::Api.build(Method::Get, &api_url(), &identity);
        let keys: Vec<&str> = header.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "Host",
                "X-Twitter-Client-Version",
                "Accept",
                "X-Client-UUID",
                "X-Twitter-Client-Language",
                "X-B3-TraceId",
                "Accept-Language",
                "Accept-Encoding",
                "X-Twitter-Client-DeviceID",
                "User-Agent",
                "X-Twitter-Client-Limit-Ad-Tracking",
                "X-Twitter-API-Version",
                "X-Twitter-Client",
            ]
        );
        assert_eq!(header.get("Host"), Some("api.example.com"));
        assert_eq!(header.get("X-Client-UUID"), Some("CLIENT-UUID"));
        assert_eq!(header.get("X-Twitter-Client-DeviceID"), Some("DEVICE-ID"));
        assert_eq!(header.get("X-B3-TraceId").unwrap().len(), 16);
    }

    #[test]
    fn post_adds_form_content_type_before_user_agent() {
        let header =
            HeaderTemplate::Api.build(Method::Post, &api_url(), &ClientIdentity::default());
        assert_eq!(header.get(CONTENT_TYPE), Some(CONTENT_TYPE_FORM));
        let keys: Vec<&str> = header.iter().map(|(k, _)| k).collect();
        let ct = keys.iter().position(|k| *k == CONTENT_TYPE).unwrap();
        let ua = keys.iter().position(|k| *k == "User-Agent").unwrap();
        assert!(ct < ua);
    }

    #[test]
    fn generated_identifiers_are_uppercase_uuids() {
        let header =
            HeaderTemplate::Polling.build(Method::Get, &api_url(), &ClientIdentity::default());
        let uuid = header.get("X-Client-UUID").unwrap();
        assert_eq!(uuid.len(), 36);
        assert_eq!(uuid, uuid.to_ascii_uppercase());
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut header =
            HeaderTemplate::Api.build(Method::Get, &api_url(), &ClientIdentity::default());
        let before: Vec<String> = header.iter().map(|(k, _)| k.to_string()).collect();
        header.set(AUTHORIZATION, "OAuth first");
        header.set(AUTHORIZATION, "OAuth second");
        assert_eq!(header.get(AUTHORIZATION), Some("OAuth second"));
        let after: Vec<String> = header.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(after.len(), before.len() + 1);
    }

    #[test]
    fn host_includes_explicit_port() {
        let url = Url::parse("http://localhost:8080/1.1/test.json").unwrap();
        let header = HeaderTemplate::Image.build(Method::Get, &url, &ClientIdentity::default());
        assert_eq!(header.get("Host"), Some("localhost:8080"));
    }

    #[test]
    #[should_panic(expected = "URL with a host")]
    fn build_rejects_host_less_urls() {
        let url = Url::parse("mailto:user@example.com").unwrap();
        HeaderTemplate::Api.build(Method::Get, &url, &ClientIdentity::default());
    }

    #[test]
    fn video_template_carries_playback_session() {
        let template = HeaderTemplate::Video {
            session_id: "SESSION".to_string(),
        };
        let header = template.build(Method::Get, &api_url(), &ClientIdentity::default());
        assert_eq!(header.get("X-Playback-Session-Id"), Some("SESSION"));
        assert_eq!(header.get("Accept-Encoding"), Some("identity"));
    }
}
