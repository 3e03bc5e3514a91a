//! HAR 1.2 reader.
//!
//! Only the request half of each entry is modelled; responses, timings
//! and creator metadata are skipped by serde.

use crate::{CaptureError, CaptureResult, EventSource, NetworkEvent};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Har {
    log: Log,
}

#[derive(Debug, Default, Deserialize)]
struct Log {
    #[serde(default)]
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    request: Request,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Request {
    #[serde(default)]
    method: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    headers: Vec<NameValue>,
    #[serde(default)]
    query_string: Vec<NameValue>,
    #[serde(default)]
    post_data: Option<PostData>,
}

#[derive(Debug, Deserialize)]
struct NameValue {
    name: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct PostData {
    #[serde(default)]
    text: String,
    #[serde(default)]
    params: Vec<NameValue>,
}

fn pairs_to_map(pairs: Vec<NameValue>) -> HashMap<String, String> {
    pairs.into_iter().map(|p| (p.name, p.value)).collect()
}

/// Parses `url`'s query component, keeping the first value of repeated keys.
pub(crate) fn query_from_url(url: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if let Ok(parsed) = url::Url::parse(url) {
        for (k, v) in parsed.query_pairs() {
            params.entry(k.into_owned()).or_insert_with(|| v.into_owned());
        }
    }
    params
}

impl From<Entry> for NetworkEvent {
    fn from(entry: Entry) -> Self {
        let req = entry.request;

        let mut query_params = pairs_to_map(req.query_string);
        if query_params.is_empty() {
            query_params = query_from_url(&req.url);
        }

        let (post_body, post_params) = match req.post_data {
            Some(pd) => (pd.text, pairs_to_map(pd.params)),
            None => (String::new(), HashMap::new()),
        };

        NetworkEvent {
            method: req.method,
            url: req.url,
            headers: pairs_to_map(req.headers),
            query_params,
            post_body,
            post_params,
        }
    }
}

/// Parses a HAR document held in memory.
pub fn parse_str(json: &str) -> CaptureResult<Vec<NetworkEvent>> {
    let har: Har = serde_json::from_str(json)?;
    Ok(har.log.entries.into_iter().map(NetworkEvent::from).collect())
}

/// Reads and parses a HAR file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> CaptureResult<Vec<NetworkEvent>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CaptureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let events = parse_str(&json)?;
    debug!(path = %path.display(), entries = events.len(), "Parsed HAR capture");
    Ok(events)
}

/// A HAR archive on disk, read lazily when events are requested.
#[derive(Debug, Clone)]
pub struct HarFile {
    path: PathBuf,
}

impl HarFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for HarFile {
    fn events(&self) -> CaptureResult<Vec<NetworkEvent>> {
        parse_file(&self.path)
    }
}
