use crate::{AdobeAppMeasurement, Beacon};
use specwatch_capture::NetworkEvent;
use tracing::{debug, info};

/// A vendor beacon protocol.
///
/// `parse` is only called on events for which `detect` returned true.
pub trait Detector: Send + Sync {
    /// Stable vendor id, stamped onto every beacon this detector emits.
    fn vendor(&self) -> &str;

    /// Returns true if `event` is a beacon of this vendor.
    fn detect(&self, event: &NetworkEvent) -> bool;

    /// Normalizes a detected event into a [`Beacon`].
    fn parse(&self, event: &NetworkEvent) -> Beacon;
}

/// Ordered set of detectors. Registration order decides ties: the first
/// detector that claims an event parses it.
#[derive(Default)]
pub struct DetectorRegistry {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in detector, in priority order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AdobeAppMeasurement);
        registry
    }

    /// Appends a detector after every one already registered.
    pub fn register(&mut self, detector: impl Detector + 'static) -> &mut Self {
        self.detectors.push(Box::new(detector));
        self
    }

    /// Vendor ids in registration order.
    pub fn vendors(&self) -> impl Iterator<Item = &str> {
        self.detectors.iter().map(|d| d.vendor())
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Finds the detector that claims `event`, if any.
    pub fn detect(&self, event: &NetworkEvent) -> Option<&dyn Detector> {
        self.detectors
            .iter()
            .find(|d| d.detect(event))
            .map(|d| d.as_ref())
    }

    /// Parses every recognized event, preserving capture order.
    pub fn parse_all(&self, events: &[NetworkEvent]) -> Vec<Beacon> {
        let beacons: Vec<Beacon> = events
            .iter()
            .filter_map(|event| {
                let detector = self.detect(event)?;
                debug!(vendor = detector.vendor(), url = %event.url, "Beacon detected");
                Some(detector.parse(event))
            })
            .collect();
        info!(events = events.len(), beacons = beacons.len(), "Detection complete");
        beacons
    }
}

impl std::fmt::Debug for DetectorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.vendors()).finish()
    }
}
