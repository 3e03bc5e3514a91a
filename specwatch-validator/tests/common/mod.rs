#![allow(dead_code)]

use specwatch_beacon::{AdobeAppMeasurement, Beacon, Detector};
use specwatch_capture::NetworkEvent;
use specwatch_spec::{Dimension, DimMapping, EnumSet, EventSpec, Mapping, PlatformOverride, Spec};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const ACME_BEACON: &str = "https://metrics.acme.com/b/ss/acme/1/JS-2.22.0/s1234";

/// `{v75: "http://x/y", events: "event1,event5"}` on report suite `rsid`.
pub fn page_view_event(rsid: &str) -> NetworkEvent {
    NetworkEvent::get(format!("https://metrics.acme.com/b/ss/{rsid}/1/JS-2.22.0/s1234"))
        .with_query("v75", "http://x/y")
        .with_query("events", "event1,event5")
}

pub fn beacon(event: &NetworkEvent) -> Beacon {
    AdobeAppMeasurement.parse(event)
}

/// Mapping `acme`: prod `acme`, `page_url` in v75, `page_view` -> event1.
pub fn acme_mapping() -> Mapping {
    let mut m = Mapping::new("acme");
    m.prod_rsid = "acme".into();
    m.dim_map
        .insert("page_url".into(), DimMapping::new("page_url", "v75", ""));
    m.event_map.insert("page_view".into(), "event1".into());
    m
}

/// `page_view` requiring a `page_url` that looks like a URL.
pub fn page_view() -> EventSpec {
    let mut ev = EventSpec::new("page_view");
    ev.push_dimension(Dimension::new("page_url", true).with_validation("^https?://"));
    ev
}

pub fn spec_with(events: impl IntoIterator<Item = EventSpec>) -> Spec {
    let mut spec = Spec::default();
    for ev in events {
        spec.events.insert(ev.name.clone(), ev);
    }
    spec.enums.insert(
        "page_types".into(),
        EnumSet::with_values("page_types", ["home", "article", "section"]),
    );
    spec
}

pub fn companion_override(event: &str) -> PlatformOverride {
    let mut ov = PlatformOverride::new(AdobeAppMeasurement::VENDOR);
    ov.required_event = Some(event.to_string());
    ov
}

// ── On-disk fixtures ─────────────────────────────────────────────

pub const PAGE_VIEW_MD: &str = "\
# page_view

Fires on every page load.

## Required Dimensions

| Dimension | Type | Validation | Notes |
|---|---|---|---|
| page_url | string | `^https?://` | |
| page_type | string | `@enums/page_types` | |

## Optional Dimensions

| Dimension | Type | Validation | Notes |
|---|---|---|---|
| section | string | | |

## Platform Overrides

### adobe_appmeasurement
- Requires: `events=event1`
";

pub const ENUMS_MD: &str = "\
## page_types
- home
- article
";

pub const ACME_MAPPING_MD: &str = "\
# acme

## Report Suite
- Production: `acme`
- Dev/QA: `acmedev`

## Dimension Mapping

| Canonical Name | eVar | Prop | Notes |
|---|---|---|---|
| page_url | v75 | c75 | |
| page_type | v3 | — | |
| section | — | c4 | |

## Event Mapping

| Canonical Event | Adobe |
|---|---|
| page_view | event1 |
";

/// Three requests: a passing page view, a failing one, and a script load.
pub const CAPTURE_HAR: &str = r#"{
  "log": {
    "version": "1.2",
    "entries": [
      {
        "request": {
          "method": "GET",
          "url": "https://metrics.acme.com/b/ss/acme/1/JS-2.22.0/s1?pageName=home&v75=https%3A%2F%2Facme.com%2F&v3=home&c4=news&events=event1",
          "headers": [{ "name": "User-Agent", "value": "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)" }],
          "queryString": []
        },
        "response": { "status": 200 }
      },
      {
        "request": {
          "method": "GET",
          "url": "https://metrics.acme.com/b/ss/acmestage/1/JS-2.22.0/s2?pageName=about&v75=about&v3=landing&events=event1",
          "headers": [],
          "queryString": []
        }
      },
      {
        "request": {
          "method": "GET",
          "url": "https://cdn.acme.com/app.js",
          "headers": [],
          "queryString": []
        }
      }
    ]
  }
}"#;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A spec tree plus `capture.har` in one temp dir.
pub fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "specs/_global/enums.md", ENUMS_MD);
    write(root, "specs/events/page_view.md", PAGE_VIEW_MD);
    write(root, "specs/mappings/acme.md", ACME_MAPPING_MD);
    write(root, "capture.har", CAPTURE_HAR);
    dir
}
