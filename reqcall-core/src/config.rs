//! Client factory: turns a `ClientConfig` into a ready `Requester`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::client::HttpClient;
use crate::error::{Error, Result};
use crate::executor::Requester;
use crate::reqwest_client::ReqwestClient;

/// Timeout applied when none (or zero) is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// How the transport behind a `Requester` is obtained.
///
/// When `client` is set it is used as-is and the other fields are ignored.
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub timeout: Option<Duration>,
    pub skip_tls_verify: bool,
    pub client: Option<Arc<dyn HttpClient>>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Accept any server certificate. Only for talking to hosts you control.
    pub fn with_skip_tls_verify(mut self, skip: bool) -> Self {
        self.skip_tls_verify = skip;
        self
    }

    pub fn with_client(mut self, client: impl HttpClient + 'static) -> Self {
        self.client = Some(Arc::new(client));
        self
    }

    /// The timeout a freshly built transport would use.
    pub fn effective_timeout(&self) -> Duration {
        self.timeout
            .filter(|t| !t.is_zero())
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn build(self) -> Result<Requester> {
        if let Some(client) = self.client {
            return Ok(Requester::from_shared(client));
        }

        let timeout = self.effective_timeout();
        if self.skip_tls_verify {
            warn!("TLS certificate verification is disabled");
        }
        let client =
            ReqwestClient::new(timeout, self.skip_tls_verify).map_err(Error::ClientBuild)?;
        Ok(Requester::from_client(client))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("timeout", &self.timeout)
            .field("skip_tls_verify", &self.skip_tls_verify)
            .field("injected_client", &self.client.is_some())
            .finish()
    }
}
