//! Network capture ingestion for specwatch.
//!
//! This crate turns a recorded capture into a flat list of
//! [`NetworkEvent`]s, the vendor-neutral request shape every beacon
//! detector consumes:
//! - [`NetworkEvent`]: method, URL, headers, query/post parameters
//! - [`EventSource`]: anything that can yield network events
//! - [`HarFile`]: HAR 1.2 archives read from disk
//!
//! Responses are ignored; only outgoing requests matter for tracking audits.

mod error;
mod event;
pub mod har;

pub use error::{CaptureError, CaptureResult};
pub use event::{EventSource, NetworkEvent};
pub use har::HarFile;
