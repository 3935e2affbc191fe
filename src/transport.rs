use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::header::HeaderSet;

/// Raw transport response: status plus body text, no decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// The injected HTTP collaborator. One call is one round trip; retries, if
/// wanted, belong to a layer above.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET with `query` appended to the URL.
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &HeaderSet,
    ) -> Result<RawResponse>;

    /// Issues a POST with `form` as the form-encoded body.
    async fn post(
        &self,
        url: &str,
        form: &[(String, String)],
        headers: &HeaderSet,
    ) -> Result<RawResponse>;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use super::*;

    /// `Transport` backed by a shared `reqwest::Client`.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Default::default()
        }

        /// Wraps a caller-configured client (proxies, timeouts, etc.).
        pub fn with_client(client: reqwest::Client) -> Self {
            ReqwestTransport { client }
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn get(
            &self,
            url: &str,
            query: &[(String, String)],
            headers: &HeaderSet,
        ) -> Result<RawResponse> {
            let mut request = self.client.get(url);
            for (key, value) in headers.iter() {
                request = request.header(key, value);
            }
            let response = request.query(query).send().await.map_err(wrap)?;
            read(response).await
        }

        async fn post(
            &self,
            url: &str,
            form: &[(String, String)],
            headers: &HeaderSet,
        ) -> Result<RawResponse> {
            let mut request = self.client.post(url);
            for (key, value) in headers.iter() {
                request = request.header(key, value);
            }
            let response = request.form(form).send().await.map_err(wrap)?;
            read(response).await
        }
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(wrap)?;
        Ok(RawResponse { status, body })
    }

    fn wrap(err: reqwest::Error) -> Error {
        Error::Transport(Box::new(err))
    }
}
