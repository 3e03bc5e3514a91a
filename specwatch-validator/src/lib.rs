//! Validation of detected beacons against a loaded spec.
//!
//! A [`ValidationEngine`] is built from a [`Spec`](specwatch_spec::Spec)
//! and an optional [`Mapping`](specwatch_spec::Mapping). For every beacon
//! it finds the canonical event the beacon represents, resolves each
//! dimension's value through the mapping, and scores it with
//! [`validate_dimension`]. The outcome is a [`Report`].
//!
//! Spec mistakes (dangling enum references, broken regexes) and data
//! mismatches become `Warning`/`Fail` results. The only hard error is a
//! capture that cannot be read.

mod engine;
mod error;
mod results;
mod rules;

pub use engine::ValidationEngine;
pub use error::{ValidatorError, ValidatorResult};
pub use results::{
    build_top_issues, BeaconResult, DimensionResult, IssueSummary, Report, Status,
    TOP_ISSUE_LIMIT,
};
pub use rules::{validate_dimension, MISSING_REQUIRED, NOT_SET_OPTIONAL};
