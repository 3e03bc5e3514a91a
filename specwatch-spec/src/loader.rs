//! Spec directory loader.

use crate::parser::{parse_enums, parse_event, parse_mapping, parse_package};
use crate::{EnumSet, EventSpec, Mapping, Package, SpecError, SpecResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const ENUMS_FILE: [&str; 2] = ["_global", "enums.md"];
const EVENTS_DIR: &str = "events";
const MAPPINGS_DIR: &str = "mappings";
const PACKAGES_DIR: &str = "packages";

/// A fully loaded tracking spec.
///
/// Built once per run and read-only afterwards; share it by reference
/// (or behind an `Arc`) across validation runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    pub enums: BTreeMap<String, EnumSet>,
    pub events: BTreeMap<String, EventSpec>,
    pub mappings: BTreeMap<String, Mapping>,
    pub packages: BTreeMap<String, Package>,
}

impl Spec {
    /// Loads a spec directory. See [`load_spec`].
    pub fn load(dir: impl AsRef<Path>) -> SpecResult<Self> {
        load_spec(dir)
    }

    pub fn event(&self, name: &str) -> Option<&EventSpec> {
        self.events.get(name)
    }

    pub fn mapping(&self, name: &str) -> Option<&Mapping> {
        self.mappings.get(name)
    }

    pub fn enum_set(&self, name: &str) -> Option<&EnumSet> {
        self.enums.get(name)
    }

    /// Catalog sizes.
    pub fn summary(&self) -> SpecSummary {
        SpecSummary {
            enums: self.enums.len(),
            events: self.events.len(),
            mappings: self.mappings.len(),
            packages: self.packages.len(),
        }
    }

    /// Re-types `@enums/<name>` dimensions to `enum` when the set exists.
    ///
    /// Dangling references keep their declared type; validation reports
    /// them as warnings.
    pub fn resolve_enum_refs(&mut self) {
        let enums = &self.enums;
        for event in self.events.values_mut() {
            for dim in event.dimensions_mut() {
                if dim.enum_ref().is_some_and(|name| enums.contains_key(name)) {
                    dim.kind = crate::DimensionType::Enum;
                }
            }
        }
    }
}

/// Catalog counts for a loaded spec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecSummary {
    pub enums: usize,
    pub events: usize,
    pub mappings: usize,
    pub packages: usize,
}

impl fmt::Display for SpecSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} enum sets, {} events, {} mappings, {} packages",
            self.enums, self.events, self.mappings, self.packages
        )
    }
}

/// Reads a spec directory into a [`Spec`].
///
/// Missing subdirectories (and a missing `dir` itself) yield empty
/// catalogs. Any document that exists but cannot be read aborts the load.
pub fn load_spec(dir: impl AsRef<Path>) -> SpecResult<Spec> {
    let dir = dir.as_ref();
    let mut spec = Spec::default();

    let enums_path: PathBuf = ENUMS_FILE.iter().fold(dir.to_path_buf(), |p, part| p.join(part));
    if enums_path.is_file() {
        spec.enums = parse_enums(&read_document(&enums_path)?);
    }

    for path in markdown_files(&dir.join(EVENTS_DIR))? {
        let event = parse_event(&read_document(&path)?, &file_stem(&path));
        debug!(event = %event.name, path = %path.display(), "Loaded event spec");
        spec.events.insert(event.name.clone(), event);
    }

    for path in markdown_files(&dir.join(MAPPINGS_DIR))? {
        let mapping = parse_mapping(&read_document(&path)?, &file_stem(&path));
        debug!(mapping = %mapping.name, path = %path.display(), "Loaded mapping");
        spec.mappings.insert(mapping.name.clone(), mapping);
    }

    for path in markdown_files(&dir.join(PACKAGES_DIR))? {
        let package = parse_package(&read_document(&path)?, &file_stem(&path));
        debug!(package = %package.name, path = %path.display(), "Loaded package");
        spec.packages.insert(package.name.clone(), package);
    }

    spec.resolve_enum_refs();

    info!(dir = %dir.display(), "Loaded spec: {}", spec.summary());
    Ok(spec)
}

/// Invalid UTF-8 sequences become U+FFFD instead of failing the load.
fn read_document(path: &Path) -> SpecResult<String> {
    let bytes = std::fs::read(path).map_err(|source| SpecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `*.md` files directly under `dir`, sorted by file name.
fn markdown_files(dir: &Path) -> SpecResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let io_err = |source| SpecError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
