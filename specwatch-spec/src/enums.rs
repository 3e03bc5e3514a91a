use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named set of allowed values, e.g. `page_types`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumSet {
    pub name: String,
    values: BTreeSet<String>,
}

impl EnumSet {
    /// Creates an empty set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeSet::new(),
        }
    }

    /// Creates a set from a list of values. Duplicates collapse.
    pub fn with_values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn insert(&mut self, value: impl Into<String>) -> bool {
        self.values.insert(value.into())
    }

    /// Returns true if `value` is an allowed member.
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    /// Iterates values in sorted order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
