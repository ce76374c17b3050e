//! Executor: sends a `RequestSpec` through the transport and checks the
//! response against the expected status.
use std::fmt;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::client::{HttpClient, HttpResponse};
use crate::config::ClientConfig;
use crate::decode::DecodeTarget;
use crate::error::{Error, Result};
use crate::request::RequestSpec;

/// Something that can run one request/expect/decode call.
///
/// `Requester` is the implementation; code that depends on this trait can be
/// handed a fake instead.
pub trait RequestExecutor: Send + Sync {
    fn execute(
        &self,
        spec: RequestSpec,
        expected_status: u16,
        body: Option<&mut dyn DecodeTarget>,
        body_error: Option<&mut dyn DecodeTarget>,
    ) -> Result<String>;
}

/// Handle over a transport. Cloning shares the transport.
#[derive(Clone)]
pub struct Requester {
    client: Arc<dyn HttpClient>,
}

impl Requester {
    /// Use `client` when given, otherwise build a reqwest transport with
    /// `timeout` (15s when absent or zero) and optional TLS bypass.
    pub fn new(
        client: Option<Arc<dyn HttpClient>>,
        timeout: Option<Duration>,
        skip_tls_verify: bool,
    ) -> Result<Self> {
        ClientConfig {
            timeout,
            skip_tls_verify,
            client,
        }
        .build()
    }

    pub fn from_client(client: impl HttpClient + 'static) -> Self {
        Self::from_shared(Arc::new(client))
    }

    pub fn from_shared(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// Send `spec` and compare the response status with `expected_status`.
    ///
    /// On a match the body is decoded into `body` (if given) and the call
    /// returns `{"status_code": S, "body": "B"}`. On a mismatch the body is
    /// decoded into `body_error` (if given) and the call fails with
    /// `Error::UnexpectedStatus`, or with `Error::ErrorBodyDecode` when that
    /// decode fails. A decode failure on the success path is an error too.
    pub fn execute(
        &self,
        spec: RequestSpec,
        expected_status: u16,
        body: Option<&mut dyn DecodeTarget>,
        body_error: Option<&mut dyn DecodeTarget>,
    ) -> Result<String> {
        let request = spec.into_request()?;
        debug!(method = %request.method(), url = %request.uri(), "sending request");

        let response = self.client.execute(request).map_err(Error::Transport)?;
        let status = response.status;
        let raw = read_body(response)?;
        debug!(status, expected_status, bytes = raw.len(), "response received");

        let text = String::from_utf8_lossy(&raw).into_owned();

        if status != expected_status {
            if let Some(target) = body_error {
                if let Err(source) = target.decode_into(&raw) {
                    return Err(Error::ErrorBodyDecode {
                        status,
                        body: text,
                        source,
                    });
                }
            }
            return Err(Error::UnexpectedStatus { status, body: text });
        }

        if let Some(target) = body {
            if let Err(source) = target.decode_into(&raw) {
                return Err(Error::SuccessBodyDecode {
                    status,
                    body: text,
                    source,
                });
            }
        }

        Ok(format!(r#"{{"status_code": {status}, "body": "{text}"}}"#))
    }
}

impl RequestExecutor for Requester {
    fn execute(
        &self,
        spec: RequestSpec,
        expected_status: u16,
        body: Option<&mut dyn DecodeTarget>,
        body_error: Option<&mut dyn DecodeTarget>,
    ) -> Result<String> {
        Requester::execute(self, spec, expected_status, body, body_error)
    }
}

impl fmt::Debug for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requester").finish_non_exhaustive()
    }
}

/// Drain the body. The response, and with it the connection, is released
/// when this returns.
fn read_body(mut response: HttpResponse) -> Result<Vec<u8>> {
    let mut raw = Vec::new();
    response
        .body
        .read_to_end(&mut raw)
        .map_err(Error::BodyRead)?;
    Ok(raw)
}
