//! Library half of the `specwatch` binary: configuration, mapping
//! selection, and report renderers.

pub mod config;
pub mod render;

pub use config::{CliConfig, OutputFormat, DEFAULT_CONFIG_FILE};

use anyhow::{bail, Result};
use specwatch_spec::{Mapping, Spec};
use tracing::{info, warn};

/// Picks the mapping to validate against.
///
/// A named mapping must exist. With no name, a spec holding exactly one
/// mapping uses it; otherwise validation runs without a mapping.
pub fn select_mapping<'a>(spec: &'a Spec, name: Option<&str>) -> Result<Option<&'a Mapping>> {
    if let Some(name) = name {
        return match spec.mapping(name) {
            Some(mapping) => Ok(Some(mapping)),
            None => bail!(
                "mapping {name:?} not found (available: {})",
                available_mappings(spec)
            ),
        };
    }

    let mut mappings = spec.mappings.values();
    match (mappings.next(), mappings.next()) {
        (Some(only), None) => {
            info!(mapping = %only.name, "Using the only mapping in the spec");
            Ok(Some(only))
        }
        (None, _) => {
            warn!("Spec has no mappings; no beacon can match an event");
            Ok(None)
        }
        _ => {
            warn!(
                available = %available_mappings(spec),
                "No mapping selected; no beacon can match an event"
            );
            Ok(None)
        }
    }
}

fn available_mappings(spec: &Spec) -> String {
    if spec.mappings.is_empty() {
        return "none".to_string();
    }
    spec.mappings.keys().cloned().collect::<Vec<_>>().join(", ")
}
