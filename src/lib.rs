/*!
OAuth 1.0a request signing for legacy mobile API endpoints.

This crate authenticates outgoing HTTP calls with the OAuth 1.0a HMAC-SHA1
protocol: it derives the canonical signature base string from the request
method, URL and parameters, signs it, and serializes the result into an
`Authorization` header. A small dispatcher assembles the static
client-identification headers the emulated mobile app sends, attaches the
signature, performs one round trip, and decodes the JSON response.

# Example

```no_run
use oauth1_signer::{
    Credentials, Dispatcher, Method, RequestParams, ReqwestTransport, Signer,
};

# async fn run() -> oauth1_signer::Result<()> {
let credentials = Credentials::new("ck", "cs", "at", "ats")?;
let dispatcher = Dispatcher::new(Signer::new(credentials), ReqwestTransport::new());

let timeline = dispatcher
    .execute(
        Method::Get,
        "https://api.example.com/1.1/statuses/home_timeline.json",
        RequestParams::new().param("count", "20"),
    )
    .await?;
println!("{}", timeline);
# Ok(())
# }
```

Signing itself is pure and synchronous; only the dispatcher touches the
network, so the `Signer` can also be used on its own to produce headers for
any other HTTP client.
*/
mod credentials;
mod dispatcher;
mod encode;
mod error;
mod header;
mod params;
mod signer;
mod transport;
mod util;

// exposed to external program
pub use credentials::Credentials;
pub use dispatcher::Dispatcher;
pub use error::{Error, InputError, Result};
pub use header::{ClientIdentity, HeaderSet, HeaderTemplate, AUTHORIZATION, CONTENT_TYPE_FORM};
pub use params::{ParamValue, RequestParams};
pub use signer::{AuthorizationParams, Method, SignedRequest, Signer};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::{RawResponse, Transport};

// exposed constant variables
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_consumer_key`.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
/// Represents `oauth_signature_method`.
pub const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
