mod common;

use pretty_assertions::assert_eq;
use specwatch_spec::{load_spec, DimensionType, Spec, SpecError, SpecSummary};

#[test]
fn loads_every_catalog() {
    let dir = common::spec_tree();
    let spec = load_spec(dir.path()).unwrap();

    assert_eq!(
        spec.summary(),
        SpecSummary {
            enums: 2,
            events: 2,
            mappings: 2,
            packages: 1,
        }
    );
}

#[test]
fn enums_are_loaded_and_deduplicated() {
    let dir = common::spec_tree();
    let spec = load_spec(dir.path()).unwrap();

    let pt = spec.enum_set("page_types").unwrap();
    assert!(pt.contains("article"));
    assert!(pt.contains("homepage"));
    assert!(!pt.contains("nonexistent"));
    assert_eq!(pt.len(), 3);

    let platforms = spec.enum_set("platforms").unwrap();
    assert!(platforms.contains("ios"));
}

#[test]
fn event_dimensions_and_overrides() {
    let dir = common::spec_tree();
    let spec = load_spec(dir.path()).unwrap();

    let pv = spec.event("page_view").unwrap();
    assert_eq!(pv.description, "Fires once per page load. Includes SPA route changes.");
    let required: Vec<_> = pv.required.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(required, vec!["page_url", "page_type"]);
    let optional: Vec<_> = pv.optional.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(optional, vec!["author", "content_tier"]);
    assert!(pv.required.iter().all(|d| d.required));
    assert!(pv.optional.iter().all(|d| !d.required));

    assert_eq!(pv.required[0].validation, "^https?://");
    assert_eq!(pv.required[0].notes, "Full URL");

    let adobe = pv.override_for("adobe_appmeasurement").unwrap();
    assert_eq!(adobe.required_event.as_deref(), Some("event1"));
    assert_eq!(adobe.dim_mappings.get("page_url").map(String::as_str), Some("eVar75"));
    assert_eq!(adobe.notes, vec!["Sent via s.t()".to_string()]);

    let ga4 = pv.override_for("ga4").unwrap();
    assert_eq!(ga4.required_event, None);
    assert_eq!(ga4.dim_mappings.get("page_url").map(String::as_str), Some("page_location"));
}

#[test]
fn untitled_event_uses_file_stem() {
    let dir = common::spec_tree();
    let spec = load_spec(dir.path()).unwrap();

    let vs = spec.event("video_start").unwrap();
    assert_eq!(vs.required.len(), 1);
    assert_eq!(vs.required[0].validation, "");
    assert!(vs.description.is_empty());
}

#[test]
fn resolved_enum_refs_are_retyped() {
    let dir = common::spec_tree();
    let spec = load_spec(dir.path()).unwrap();
    let pv = spec.event("page_view").unwrap();

    assert_eq!(pv.required[1].kind, DimensionType::Enum);
    assert_eq!(pv.required[1].enum_ref(), Some("page_types"));
}

#[test]
fn dangling_enum_refs_keep_declared_type() {
    let dir = common::spec_tree();
    let spec = load_spec(dir.path()).unwrap();
    let tier = &spec.event("page_view").unwrap().optional[1];

    assert_eq!(tier.kind, DimensionType::String);
    assert_eq!(tier.enum_ref(), Some("missing_set"));
}

#[test]
fn mapping_report_suites_and_tables() {
    let dir = common::spec_tree();
    let spec = load_spec(dir.path()).unwrap();

    let m = spec.mapping("test_site").unwrap();
    assert_eq!(m.prod_rsid, "testsiteglobal");
    assert_eq!(m.dev_rsid, "testsitedev");
    assert_eq!(m.dim_map.len(), 2);
    assert_eq!(m.dim_map["page_url"].evar, "v75");
    assert_eq!(m.dim_map["page_url"].prop, "c75");
    assert_eq!(m.dim_map["page_url"].notes, "full url");
    assert_eq!(m.dim_map["page_type"].prop, "");
    assert_eq!(m.event_map.get("page_view").map(String::as_str), Some("event1"));
    assert_eq!(m.event_map.get("video_start").map(String::as_str), Some("event50"));
}

#[test]
fn long_mapping_title_falls_back_to_file_stem() {
    let dir = common::spec_tree();
    let spec = load_spec(dir.path()).unwrap();

    let m = spec.mapping("acme_combined").unwrap();
    assert_eq!(m.prod_rsid, "acmeglobal");
    assert_eq!(m.dev_rsid, "acmedev");
}

#[test]
fn packages_are_loaded() {
    let dir = common::spec_tree();
    let spec = load_spec(dir.path()).unwrap();

    let pkg = &spec.packages["adobe_appmeasurement"];
    assert_eq!(pkg.endpoint_pattern, "/b/ss/");
    assert_eq!(pkg.method, "GET or POST");
    assert_eq!(pkg.fields.get("pageName").map(String::as_str), Some("Page name"));
    assert_eq!(pkg.fields.get("events").map(String::as_str), Some("Comma separated event list"));
}

#[test]
fn nonexistent_dir_is_an_empty_spec() {
    let spec = load_spec("/nonexistent/spec/dir").unwrap();
    assert_eq!(spec, Spec::default());
}

#[test]
fn missing_subdirectories_yield_empty_catalogs() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "events/page_view.md", common::PAGE_VIEW_MD);

    let spec = Spec::load(dir.path()).unwrap();
    assert_eq!(spec.summary().events, 1);
    assert!(spec.enums.is_empty());
    assert!(spec.mappings.is_empty());
    assert!(spec.packages.is_empty());

    // No enum sets loaded, so the reference stays unresolved.
    let pv = spec.event("page_view").unwrap();
    assert_eq!(pv.required[1].kind, DimensionType::String);
}

#[test]
fn non_utf8_documents_are_read_lossily() {
    let dir = tempfile::tempdir().unwrap();
    let events = dir.path().join("events");
    std::fs::create_dir_all(&events).unwrap();
    // cp1252 "café" in the description.
    std::fs::write(
        events.join("page_view.md"),
        b"# page_view\n\nCaf\xe9 pages\n\n## Required Dimensions\n| page_url | string |\n",
    )
    .unwrap();

    let spec = load_spec(dir.path()).unwrap();
    let pv = spec.event("page_view").unwrap();
    assert_eq!(pv.description, "Caf\u{fffd} pages");
    assert_eq!(pv.required[0].name, "page_url");
}

#[test]
fn spec_error_names_the_path() {
    let err = SpecError::Io {
        path: "specs/events/page_view.md".into(),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    };
    let msg = format!("{err}");
    assert!(msg.starts_with("reading spec"));
    assert!(msg.contains("specs/events/page_view.md"));
}

#[test]
fn later_documents_overwrite_earlier_ones() {
    let dir = tempfile::tempdir().unwrap();
    common::write(dir.path(), "events/a.md", "# page_view\n\nfirst\n");
    common::write(dir.path(), "events/b.md", "# page_view\n\nsecond\n");

    let spec = load_spec(dir.path()).unwrap();
    assert_eq!(spec.events.len(), 1);
    assert_eq!(spec.event("page_view").unwrap().description, "second");
}

#[test]
fn spec_serializes_with_wire_names() {
    let dir = common::spec_tree();
    let spec = load_spec(dir.path()).unwrap();

    let json = serde_json::to_value(&spec).unwrap();
    let page_type = &json["events"]["page_view"]["required"][1];

    assert_eq!(page_type["type"], "enum");
    assert_eq!(page_type["validation"], "@enums/page_types");
    assert_eq!(json["events"]["page_view"]["overrides"]["adobe_appmeasurement"]["required_event"], "event1");

    let back: Spec = serde_json::from_value(json).unwrap();
    assert_eq!(back, spec);
}
