use crate::Dimension;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A canonical tracking event and the dimensions it must carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: Vec<Dimension>,
    #[serde(default)]
    pub optional: Vec<Dimension>,
    /// Vendor id -> override.
    #[serde(default)]
    pub overrides: BTreeMap<String, PlatformOverride>,
}

impl EventSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends a dimension to the list matching its `required` flag.
    pub fn push_dimension(&mut self, dim: Dimension) {
        if dim.required {
            self.required.push(dim);
        } else {
            self.optional.push(dim);
        }
    }

    /// Required dimensions first, then optional, in document order.
    pub fn dimensions(&self) -> impl Iterator<Item = &Dimension> {
        self.required.iter().chain(self.optional.iter())
    }

    pub fn dimensions_mut(&mut self) -> impl Iterator<Item = &mut Dimension> {
        self.required.iter_mut().chain(self.optional.iter_mut())
    }

    /// The override declared for `vendor`, if any.
    pub fn override_for(&self, vendor: &str) -> Option<&PlatformOverride> {
        self.overrides.get(vendor)
    }
}

/// Vendor-specific refinement of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformOverride {
    /// Vendor id, e.g. `adobe_appmeasurement`.
    pub platform: String,
    /// Canonical dimension -> vendor field, e.g. `page_url` -> `eVar75`.
    #[serde(default)]
    pub dim_mappings: BTreeMap<String, String>,
    /// Vendor event that must fire alongside this event, e.g. `event1`.
    #[serde(default)]
    pub required_event: Option<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl PlatformOverride {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            ..Self::default()
        }
    }
}
