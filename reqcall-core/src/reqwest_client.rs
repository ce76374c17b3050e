use std::time::Duration;

use crate::client::{HttpClient, HttpRequest, HttpResponse};
use crate::error::BoxError;

/// The default transport, backed by a `reqwest` blocking client.
///
/// The inner client pools connections and is safe to share between threads,
/// so one `ReqwestClient` serves every call made through a `Requester`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Build a client with a whole-request `timeout`. With `skip_tls_verify`
    /// any server certificate and host name is accepted.
    pub fn new(timeout: Duration, skip_tls_verify: bool) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::blocking::Client::builder().timeout(timeout);
        if skip_tls_verify {
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured reqwest client.
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl HttpClient for ReqwestClient {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let (parts, body) = request.into_parts();

        let mut builder = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers);
        if !body.is_empty() {
            builder = builder.body(body);
        }

        let response = builder.send()?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    v.to_str().unwrap_or("(binary)").to_string(),
                )
            })
            .collect();

        Ok(HttpResponse {
            status,
            headers,
            body: Box::new(response),
        })
    }
}
