use crate::error::{InputError, Result};

/// OAuth 1.0a credentials: the consumer key pair plus the access token pair.
///
/// Opaque strings supplied by the caller; the signer never derives or
/// mutates them. One `Credentials` value typically outlives many signing
/// operations, each of which borrows it read-only.
#[derive(Debug, Clone)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_token_secret: String,
}

impl Credentials {
    /// Builds credentials, rejecting any empty field up front so a bad
    /// configuration fails loudly instead of producing rejected requests.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        };
        let fields: [(&'static str, &str); 4] = [
            ("consumer_key", &credentials.consumer_key),
            ("consumer_secret", &credentials.consumer_secret),
            ("access_token", &credentials.access_token),
            ("access_token_secret", &credentials.access_token_secret),
        ];
        for &(name, value) in fields.iter() {
            if value.is_empty() {
                return Err(InputError::EmptyCredential(name).into());
            }
        }
        Ok(credentials)
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn access_token_secret(&self) -> &str {
        &self.access_token_secret
    }
}
