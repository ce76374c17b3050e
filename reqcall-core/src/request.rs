//! Structured description of one outbound call, and its conversion into an
//! `http::Request`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::{Cursor, Read};

use http::header::{HeaderName, HeaderValue};
use url::Url;

use crate::client::HttpRequest;
use crate::error::{Error, Result};

/// Method, path, body, headers and query parameters of a single request.
///
/// Headers and query parameters are keyed maps: setting a key twice keeps
/// the last value.
pub struct RequestSpec {
    pub method: String,
    pub path: String,
    pub body: Option<Box<dyn Read + Send>>,
    pub headers: HashMap<String, String>,
    pub query_params: HashMap<String, String>,
}

impl RequestSpec {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body: None,
            headers: HashMap::new(),
            query_params: HashMap::new(),
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Stream the body from `reader`. It is read to the end when the call is made.
    pub fn body(mut self, reader: impl Read + Send + 'static) -> Self {
        self.body = Some(Box::new(reader));
        self
    }

    pub fn body_bytes(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.body(Cursor::new(bytes.into()))
    }

    /// Resolve the URL, merge the query, read the body and apply headers.
    pub fn into_request(self) -> Result<HttpRequest> {
        let mut url = Url::parse(&self.path)?;
        merge_query(&mut url, &self.query_params);

        let mut body = Vec::new();
        if let Some(mut reader) = self.body {
            reader
                .read_to_end(&mut body)
                .map_err(|e| Error::RequestConstruction(e.into()))?;
        }

        let mut request = http::Request::builder()
            .method(self.method.as_str())
            .uri(url.as_str())
            .body(body)
            .map_err(|e| Error::RequestConstruction(e.into()))?;

        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::RequestConstruction(e.into()))?;
            let value = HeaderValue::from_bytes(value.as_bytes())
                .map_err(|e| Error::RequestConstruction(e.into()))?;
            request.headers_mut().insert(name, value);
        }

        Ok(request)
    }
}

impl fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSpec")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("has_body", &self.body.is_some())
            .field("headers", &self.headers)
            .field("query_params", &self.query_params)
            .finish()
    }
}

/// Overwrite `params` into the URL's query and re-encode it with keys sorted.
/// Keys not named in `params` keep all their existing values.
fn merge_query(url: &mut Url, params: &HashMap<String, String>) {
    let mut query: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in url.query_pairs() {
        query
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    for (key, value) in params {
        query.insert(key.clone(), vec![value.clone()]);
    }

    if query.is_empty() {
        url.set_query(None);
        return;
    }

    url.query_pairs_mut().clear().extend_pairs(
        query
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key, value))),
    );
}
