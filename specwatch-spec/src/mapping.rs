use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping titles longer than this are prose, not identifiers; the file
/// stem names the mapping instead.
pub const MAX_MAPPING_NAME_LEN: usize = 30;

/// Per-property translation of canonical names to vendor identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub name: String,
    /// Production report suite id.
    #[serde(default)]
    pub prod_rsid: String,
    /// Dev/QA report suite id.
    #[serde(default)]
    pub dev_rsid: String,
    /// Canonical dimension -> eVar/prop slots.
    #[serde(default)]
    pub dim_map: BTreeMap<String, DimMapping>,
    /// Canonical event -> vendor event id, e.g. `page_view` -> `event1`.
    #[serde(default)]
    pub event_map: BTreeMap<String, String>,
}

impl Mapping {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Bare eVar numbers referenced by any dimension entry (`v75` -> `75`).
    pub fn known_evar_slots(&self) -> BTreeSet<&str> {
        self.dim_map.values().filter_map(DimMapping::evar_slot).collect()
    }
}

/// The two independent vendor slots a canonical dimension may occupy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimMapping {
    pub canonical: String,
    /// Prefixed eVar field id, e.g. `v75`. Empty if unmapped.
    #[serde(default)]
    pub evar: String,
    /// Prefixed prop field id, e.g. `c75`. Empty if unmapped.
    #[serde(default)]
    pub prop: String,
    #[serde(default)]
    pub notes: String,
}

impl DimMapping {
    pub fn new(canonical: impl Into<String>, evar: impl Into<String>, prop: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            evar: evar.into(),
            prop: prop.into(),
            notes: String::new(),
        }
    }

    /// eVar number with the vendor prefix stripped.
    pub fn evar_slot(&self) -> Option<&str> {
        slot_number(&self.evar, "eVar", "v")
    }

    /// Prop number with the vendor prefix stripped.
    pub fn prop_slot(&self) -> Option<&str> {
        slot_number(&self.prop, "prop", "c")
    }

    /// Field id shown to users: the eVar if mapped, else the prop.
    pub fn display_field(&self) -> Option<&str> {
        [&self.evar, &self.prop]
            .into_iter()
            .find(|f| !f.is_empty())
            .map(String::as_str)
    }
}

/// Strips the long (`eVar75`) or short (`v75`) prefix from a field id.
fn slot_number<'a>(field: &'a str, long: &str, short: &str) -> Option<&'a str> {
    if field.is_empty() {
        return None;
    }
    Some(
        field
            .strip_prefix(long)
            .or_else(|| field.strip_prefix(short))
            .unwrap_or(field),
    )
}
