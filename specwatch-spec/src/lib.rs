//! Tracking spec catalogs and the markdown loader for specwatch.
//!
//! A spec directory is a tree of hand-written markdown documents:
//!
//! ```text
//! specs/
//!   _global/enums.md     ## <enum name> + "- value" bullets
//!   events/*.md          one canonical event per document
//!   mappings/*.md        one property (report suite) per document
//!   packages/*.md        one vendor package per document
//! ```
//!
//! [`load_spec`] turns that tree into a [`Spec`]: enum sets, event specs
//! with required/optional dimensions and per-vendor overrides, property
//! mappings, and vendor packages. Every subdirectory is optional.
//!
//! The parser is forgiving on purpose. The documents are prose written by
//! people, so malformed table rows and bullets are skipped rather than
//! reported; only I/O failures abort a load.

mod dimension;
mod enums;
mod error;
mod event;
mod loader;
mod mapping;
mod markdown;
mod package;
pub mod parser;

pub use dimension::{Dimension, DimensionType, ENUM_REF_PREFIX};
pub use enums::EnumSet;
pub use error::{SpecError, SpecResult};
pub use event::{EventSpec, PlatformOverride};
pub use loader::{load_spec, Spec, SpecSummary};
pub use mapping::{DimMapping, Mapping, MAX_MAPPING_NAME_LEN};
pub use package::Package;
