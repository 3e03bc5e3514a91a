use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Documentation-level descriptor of a vendor beacon protocol.
///
/// Loaded for completeness and listing; detection itself lives in the
/// compiled detectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    /// URL marker, e.g. `/b/ss/`.
    #[serde(default)]
    pub endpoint_pattern: String,
    /// Expected HTTP method.
    #[serde(default)]
    pub method: String,
    /// Parameter key -> documented meaning.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}
