use crate::results::build_top_issues;
use crate::{validate_dimension, BeaconResult, DimensionResult, Report, Status, ValidatorResult};
use specwatch_beacon::{Beacon, DetectorRegistry};
use specwatch_capture::{EventSource, NetworkEvent};
use specwatch_spec::{EventSpec, Mapping, Spec};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Event bound to beacons that fire no mapped event but carry a page name.
const DEFAULT_EVENT: &str = "page_view";

/// Failure messages and their occurrence counts for one run.
type IssueCounts = BTreeMap<String, usize>;

/// Scores beacons against a spec, optionally through one property mapping.
///
/// Without a mapping no beacon can match, since matching goes through the
/// mapping's event table.
pub struct ValidationEngine<'a> {
    spec: &'a Spec,
    mapping: Option<&'a Mapping>,
    registry: DetectorRegistry,
}

impl<'a> ValidationEngine<'a> {
    /// Creates an engine using the built-in detectors.
    pub fn new(spec: &'a Spec, mapping: Option<&'a Mapping>) -> Self {
        Self {
            spec,
            mapping,
            registry: DetectorRegistry::with_defaults(),
        }
    }

    /// Replaces the detector registry.
    pub fn with_registry(mut self, registry: DetectorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Reads every event from `source`, detects beacons and validates them.
    ///
    /// Fails only if the source cannot be read.
    pub fn validate_source<S>(&self, source: &S) -> ValidatorResult<Report>
    where
        S: EventSource + ?Sized,
    {
        let events = source.events()?;
        Ok(self.validate_events(&events))
    }

    /// Detects beacons in `events` and validates them.
    pub fn validate_events(&self, events: &[NetworkEvent]) -> Report {
        let beacons = self.registry.parse_all(events);
        let mut report = self.validate_beacons(&beacons);
        report.total_entries = events.len();
        report
    }

    /// Validates already-detected beacons.
    pub fn validate_beacons(&self, beacons: &[Beacon]) -> Report {
        let mut report = Report {
            mapping_name: self.mapping.map(|m| m.name.clone()).unwrap_or_default(),
            ..Report::default()
        };
        let mut issues = IssueCounts::new();

        for beacon in beacons {
            report.record(self.validate_beacon(beacon, &mut issues));
        }
        report.top_issues = build_top_issues(&issues);

        info!(
            beacons = report.total_calls,
            matched = report.matched,
            passed = report.passed,
            failed = report.failed,
            "Validation complete"
        );
        report
    }

    fn validate_beacon(&self, beacon: &Beacon, issues: &mut IssueCounts) -> BeaconResult {
        let mut br = BeaconResult {
            url: beacon.raw_url.clone(),
            vendor: beacon.vendor.clone(),
            rsid: beacon.rsid.clone(),
            events_fired: beacon.event_list.clone(),
            platform: beacon.platform,
            ..BeaconResult::default()
        };

        let Some(event) = self.match_event(beacon) else {
            debug!(url = %beacon.raw_url, "No matching event");
            return br;
        };
        br.matched = true;
        br.event_name = Some(event.name.clone());
        debug!(event = %event.name, url = %beacon.raw_url, "Beacon matched");

        if let Some(mapping) = self.mapping {
            let result = check_rsid(mapping, &beacon.rsid);
            if result.status == Status::Fail {
                count_issue(issues, result.message.clone());
            }
            br.push(result);
        }

        for dim in event.dimensions() {
            let value = self.resolve_value(beacon, &dim.name);
            let field = self.resolve_field_name(&dim.name);
            let result = validate_dimension(dim, value, &self.spec.enums);
            if result.status == Status::Fail {
                count_issue(issues, format!("{} {}", dim.name, result.message));
            }
            br.push(result.with_field(field));
        }

        if let Some(companion) = event
            .override_for(&beacon.vendor)
            .and_then(|ov| ov.required_event.as_deref())
        {
            let result = check_companion(event, companion, beacon);
            if result.status == Status::Fail {
                count_issue(issues, result.message.clone());
            }
            br.push(result);
        }

        if let Some(mapping) = self.mapping {
            let known = mapping.known_evar_slots();
            let mut unknown: Vec<_> = beacon
                .evars
                .iter()
                .filter(|(slot, _)| !known.contains(slot.as_str()))
                .collect();
            unknown.sort_by_key(|(slot, _)| slot.parse::<u32>().unwrap_or(u32::MAX));

            // props are not cross-checked
            for (slot, value) in unknown {
                br.push(
                    DimensionResult::new(
                        "UNKNOWN",
                        value,
                        Status::Warning,
                        format!("v{slot} = {value:?} — not in spec, possible debug value"),
                    )
                    .with_field(format!("v{slot}")),
                );
            }
        }

        br
    }

    /// Finds the canonical event `beacon` represents.
    ///
    /// Mapped events are tried in canonical-name order; the first whose
    /// vendor id was fired and which the spec defines wins. Page views
    /// (a page name and no link type) fall back to `page_view`.
    pub fn match_event(&self, beacon: &Beacon) -> Option<&'a EventSpec> {
        let mapping = self.mapping?;

        let mapped = mapping
            .event_map
            .iter()
            .filter(|(_, vendor_id)| beacon.fired(vendor_id))
            .find_map(|(canonical, _)| self.spec.event(canonical));
        if mapped.is_some() {
            return mapped;
        }

        if !beacon.page_name.is_empty() && !beacon.is_link() {
            return self.spec.event(DEFAULT_EVENT);
        }
        None
    }

    /// The value of canonical dimension `dim` on `beacon`, or `""`.
    ///
    /// Tries the mapped eVar, then the mapped prop (each only if
    /// non-empty), then a raw parameter named after the dimension, then
    /// the `page_url` / `page_title` shortcuts.
    pub fn resolve_value<'b>(&self, beacon: &'b Beacon, dim: &str) -> &'b str {
        if let Some(dm) = self.mapping.and_then(|m| m.dim_map.get(dim)) {
            let mapped = [
                dm.evar_slot().and_then(|n| beacon.evar(n)),
                dm.prop_slot().and_then(|n| beacon.prop(n)),
            ];
            if let Some(value) = mapped.into_iter().flatten().find(|v| !v.is_empty()) {
                return value;
            }
        }

        if let Some(value) = beacon.param(dim) {
            return value;
        }

        match dim {
            "page_url" => beacon.page_url.as_str(),
            "page_title" => beacon.param("pageName").unwrap_or_default(),
            _ => "",
        }
    }

    /// The vendor field shown for `dim`: mapped eVar, else prop, else the
    /// dimension name itself.
    pub fn resolve_field_name(&self, dim: &str) -> String {
        self.mapping
            .and_then(|m| m.dim_map.get(dim))
            .and_then(|dm| dm.display_field())
            .unwrap_or(dim)
            .to_string()
    }
}

fn count_issue(issues: &mut IssueCounts, message: String) {
    *issues.entry(message).or_default() += 1;
}

fn check_rsid(mapping: &Mapping, rsid: &str) -> DimensionResult {
    let (status, message) = if rsid.is_empty() {
        (Status::Fail, "MISSING — no RSID found".to_string())
    } else if rsid == mapping.prod_rsid {
        (Status::Pass, format!("{rsid} (matches {} mapping)", mapping.name))
    } else if rsid == mapping.dev_rsid {
        (Status::Pass, format!("{rsid} (dev/QA — matches {} mapping)", mapping.name))
    } else {
        (
            Status::Fail,
            format!(
                "{rsid} — does not match {} mapping (expected {} or {})",
                mapping.name, mapping.prod_rsid, mapping.dev_rsid
            ),
        )
    };
    DimensionResult::new("RSID", rsid, status, message)
}

fn check_companion(event: &EventSpec, companion: &str, beacon: &Beacon) -> DimensionResult {
    let fired = beacon.event_list.join(",");
    if beacon.fired(companion) {
        let message = format!("{companion} (required for {})", event.name);
        DimensionResult::new("events", fired, Status::Pass, message)
    } else {
        let message = format!("MISSING {companion} — required for {}", event.name);
        DimensionResult::new("events", fired, Status::Fail, message)
    }
}
