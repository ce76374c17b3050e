use std::fmt;
use std::io::{Cursor, Read};
use std::sync::Arc;

use crate::error::BoxError;

/// A fully built outbound request, as handed to the transport.
pub type HttpRequest = http::Request<Vec<u8>>;

/// What a transport returns for a completed exchange.
///
/// The body is left as a stream; the executor drains it and drops the
/// response before returning.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Box<dyn Read + Send>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Box::new(body),
        }
    }

    /// Response with an in-memory body.
    pub fn from_bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, Cursor::new(body.into()))
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// A generic interface to submit an HTTP request.
/// Anything implementing this trait can back a `Requester`: the bundled
/// `ReqwestClient`, a recorder, or a fake returning canned responses.
pub trait HttpClient: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        (**self).execute(request)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for Box<C> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        (**self).execute(request)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        (**self).execute(request)
    }
}
