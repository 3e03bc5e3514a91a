use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation strings starting with this prefix reference an enum set.
pub const ENUM_REF_PREFIX: &str = "@enums/";

/// Declared value type of a dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionType {
    #[default]
    String,
    Enum,
    Datetime,
    Array,
    /// Anything else a document author wrote in the type column.
    Other(String),
}

impl DimensionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Enum => "enum",
            Self::Datetime => "datetime",
            Self::Array => "array",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for DimensionType {
    fn from(s: &str) -> Self {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "" | "string" => Self::String,
            "enum" => Self::Enum,
            "datetime" => Self::Datetime,
            "array" => Self::Array,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl fmt::Display for DimensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single analytics dimension expected on an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Canonical name, e.g. `page_url`.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DimensionType,
    /// Regex pattern, `@enums/<name>`, or empty for "any non-empty value".
    #[serde(default)]
    pub validation: String,
    #[serde(default)]
    pub notes: String,
    pub required: bool,
}

impl Dimension {
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            ..Self::default()
        }
    }

    /// Sets the validation rule.
    pub fn with_validation(mut self, validation: impl Into<String>) -> Self {
        self.validation = validation.into();
        self
    }

    /// Sets the declared type.
    pub fn with_kind(mut self, kind: DimensionType) -> Self {
        self.kind = kind;
        self
    }

    /// The referenced enum set name, if the rule is `@enums/<name>`.
    pub fn enum_ref(&self) -> Option<&str> {
        self.validation
            .strip_prefix(ENUM_REF_PREFIX)
            .filter(|name| !name.is_empty())
    }

    /// True if values are checked for enum membership.
    pub fn is_enum(&self) -> bool {
        self.kind == DimensionType::Enum || self.enum_ref().is_some()
    }
}
