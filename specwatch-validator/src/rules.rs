use crate::{DimensionResult, Status};
use specwatch_spec::{Dimension, EnumSet};
use std::collections::BTreeMap;

pub const MISSING_REQUIRED: &str = "MISSING — required dimension not found";
pub const NOT_SET_OPTIONAL: &str = "NOT SET — optional, but recommended";

/// Checks one resolved value against a dimension's rule.
///
/// An empty value fails a required dimension and warns on an optional one,
/// whatever the rule. Otherwise enum dimensions check set membership,
/// non-empty validation strings are regexes, and anything else passes.
/// A missing enum set or an invalid regex is a spec problem and yields
/// `Warning`. The returned result has no `field`; callers fill it in.
pub fn validate_dimension(
    dim: &Dimension,
    value: &str,
    enums: &BTreeMap<String, EnumSet>,
) -> DimensionResult {
    let result = |status, message: String| DimensionResult::new(&dim.name, value, status, message);

    if value.is_empty() {
        return if dim.required {
            result(Status::Fail, MISSING_REQUIRED.to_string())
        } else {
            result(Status::Warning, NOT_SET_OPTIONAL.to_string())
        };
    }

    if dim.is_enum() {
        let name = dim.enum_ref().unwrap_or(dim.validation.as_str());
        return match enums.get(name) {
            Some(set) if set.contains(value) => {
                result(Status::Pass, format!("{value:?} (valid enum)"))
            }
            Some(_) => result(Status::Fail, format!("{value:?} — not a valid {name} value")),
            None => result(Status::Warning, format!("enum set {name:?} not found in spec")),
        };
    }

    if !dim.validation.is_empty() {
        let pattern = &dim.validation;
        return match regex::Regex::new(pattern) {
            Err(_) => result(Status::Warning, format!("invalid regex {pattern:?} in spec")),
            Ok(re) if re.is_match(value) => result(Status::Pass, format!("{value:?}")),
            Ok(_) => result(Status::Fail, format!("{value:?} — fails regex {pattern}")),
        };
    }

    result(Status::Pass, format!("{value:?}"))
}
