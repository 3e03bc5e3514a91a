use crate::CaptureResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single outgoing request, normalized from the capture format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEvent {
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub query_params: HashMap<String, String>,
    #[serde(default)]
    pub post_body: String,
    #[serde(default)]
    pub post_params: HashMap<String, String>,
}

impl NetworkEvent {
    /// Creates a GET event for `url` with no headers or parameters.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Adds a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Adds a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Looks up a header by name, ignoring ASCII case.
    ///
    /// HTTP/2 captures lower-case every header name, HTTP/1.1 captures
    /// usually don't, so exact-key lookup misses half the traffic.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true for write-style requests whose body may carry parameters.
    pub fn is_post(&self) -> bool {
        self.method.eq_ignore_ascii_case("POST")
    }
}

/// Anything that can produce the network events of one capture.
///
/// Reading is the only fallible step of a validation run; everything
/// downstream of the source is infallible.
pub trait EventSource {
    /// Reads every request in the capture, in capture order.
    fn events(&self) -> CaptureResult<Vec<NetworkEvent>>;
}

impl EventSource for Vec<NetworkEvent> {
    fn events(&self) -> CaptureResult<Vec<NetworkEvent>> {
        Ok(self.clone())
    }
}

impl EventSource for [NetworkEvent] {
    fn events(&self) -> CaptureResult<Vec<NetworkEvent>> {
        Ok(self.to_vec())
    }
}
