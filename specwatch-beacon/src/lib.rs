//! Beacon detection for specwatch.
//!
//! A [`DetectorRegistry`] holds an ordered list of [`Detector`]s. Each
//! network event is offered to the detectors in order and the first one
//! that recognizes it normalizes it into a [`Beacon`]. Events nobody
//! recognizes are dropped.
//!
//! Only Adobe AppMeasurement ([`AdobeAppMeasurement`]) ships today. New
//! vendors implement [`Detector`] and are appended to
//! [`DetectorRegistry::with_defaults`].

mod adobe;
mod beacon;
mod platform;
mod registry;

pub use adobe::AdobeAppMeasurement;
pub use beacon::Beacon;
pub use platform::Platform;
pub use registry::{Detector, DetectorRegistry};
