use crate::Platform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One analytics call, normalized out of a vendor-specific request.
///
/// `evars` and `props` are keyed by the bare slot number (`"75"`, not
/// `"v75"` or `"eVar75"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beacon {
    pub vendor: String,
    pub raw_url: String,
    /// Report suite id (Adobe) or the vendor's equivalent account id.
    pub rsid: String,
    pub page_name: String,
    pub page_url: String,
    pub event_list: Vec<String>,
    pub evars: BTreeMap<String, String>,
    pub props: BTreeMap<String, String>,
    pub link_type: String,
    pub link_name: String,
    pub platform: Platform,
    pub raw_params: BTreeMap<String, String>,
}

impl Beacon {
    /// Returns true if `event` is among the fired events.
    pub fn fired(&self, event: &str) -> bool {
        self.event_list.iter().any(|e| e == event)
    }

    /// Value of eVar slot `n`, if set.
    pub fn evar(&self, n: &str) -> Option<&str> {
        self.evars.get(n).map(String::as_str)
    }

    /// Value of prop slot `n`, if set.
    pub fn prop(&self, n: &str) -> Option<&str> {
        self.props.get(n).map(String::as_str)
    }

    /// Raw parameter lookup by wire key.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.raw_params.get(key).map(String::as_str)
    }

    /// Custom-link calls carry a link type (`pe`); page views don't.
    pub fn is_link(&self) -> bool {
        !self.link_type.is_empty()
    }
}
