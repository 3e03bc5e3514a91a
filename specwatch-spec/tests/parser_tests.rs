use pretty_assertions::assert_eq;
use specwatch_spec::parser::{parse_enums, parse_event, parse_mapping, parse_package};
use specwatch_spec::{Dimension, DimensionType};

// ── Event documents ──────────────────────────────────────────────

#[test]
fn header_rows_are_skipped_case_insensitively() {
    let ev = parse_event(
        "# e\n## Required Dimensions\n| dimension | type |\n| a | string |\n",
        "fallback",
    );
    assert_eq!(ev.required.len(), 1);
    assert_eq!(ev.required[0].name, "a");
}

#[test]
fn short_rows_fill_what_they_have() {
    let ev = parse_event("## Optional Dimensions\n| only_name |\n", "e");
    assert_eq!(
        ev.optional,
        vec![Dimension {
            name: "only_name".into(),
            kind: DimensionType::String,
            validation: String::new(),
            notes: String::new(),
            required: false,
        }]
    );
}

#[test]
fn unknown_types_are_preserved() {
    let ev = parse_event("## Required Dimensions\n| ts | Datetime |\n| n | number |\n", "e");
    assert_eq!(ev.required[0].kind, DimensionType::Datetime);
    assert_eq!(ev.required[1].kind, DimensionType::Other("number".into()));
}

#[test]
fn rows_outside_dimension_sections_are_ignored() {
    let ev = parse_event("# e\n## Changelog\n| a | string |\n- bullet\n", "e");
    assert!(ev.required.is_empty());
    assert!(ev.optional.is_empty());
    assert!(ev.description.is_empty());
}

#[test]
fn subsections_outside_overrides_are_ignored() {
    let ev = parse_event("# e\n## Required Dimensions\n### adobe\n- Requires: `events=event1`\n", "e");
    assert!(ev.overrides.is_empty());
}

#[test]
fn override_bullets_before_a_vendor_heading_are_ignored() {
    let ev = parse_event("## Platform Overrides\n- Requires: `events=event1`\n### adobe\n", "e");
    assert_eq!(ev.overrides["adobe"].required_event, None);
}

#[test]
fn arrow_bullets_without_both_tokens_become_notes() {
    let ev = parse_event(
        "## Platform Overrides\n### adobe\n- page_url → eVar75 (legacy slot)\n- `section` → prop3\n- `page_url` → `eVar75`\n",
        "e",
    );
    let ov = &ev.overrides["adobe"];
    assert_eq!(
        ov.notes,
        vec!["page_url → eVar75 (legacy slot)".to_string(), "`section` → prop3".to_string()]
    );
    assert_eq!(ov.dim_mappings.len(), 1);
    assert_eq!(ov.dim_mappings["page_url"], "eVar75");
}

#[test]
fn a_new_section_closes_the_override_block() {
    let ev = parse_event(
        "## Platform Overrides\n### adobe\n## Notes\n- Requires: `events=event9`\n",
        "e",
    );
    assert_eq!(ev.overrides["adobe"].required_event, None);
}

#[test]
fn description_needs_a_title() {
    let ev = parse_event("orphan text\n# e\nreal text\n", "e");
    assert_eq!(ev.description, "real text");
}

#[test]
fn description_keeps_preamble_lines_verbatim() {
    let ev = parse_event(
        "# e\nFires on load.\n- once per view\n| a | b |\n## Required Dimensions\n",
        "e",
    );
    assert_eq!(ev.description, "Fires on load. - once per view | a | b |");
}

// ── Mapping documents ────────────────────────────────────────────

#[test]
fn mapping_title_is_normalized() {
    let m = parse_mapping("# Acme News\n", "file_stem");
    assert_eq!(m.name, "acme_news");
}

#[test]
fn mapping_title_limit_counts_bytes() {
    // 15 two-byte chars: 15 chars but 30 bytes, still within the limit.
    let m = parse_mapping(&format!("# {}\n", "é".repeat(15)), "stem");
    assert_eq!(m.name, "é".repeat(15));

    // 16 of them is 32 bytes.
    let m = parse_mapping(&format!("# {}\n", "é".repeat(16)), "stem");
    assert_eq!(m.name, "stem");
}

#[test]
fn mapping_without_title_uses_fallback() {
    let m = parse_mapping("## Report Suite\n- Production: `p`\n", "file_stem");
    assert_eq!(m.name, "file_stem");
    assert_eq!(m.prod_rsid, "p");
}

#[test]
fn mapping_cells_tolerate_backticks() {
    let m = parse_mapping(
        "## Dimension Mapping\n| `page_url` | `v75` | `c75` |\n## Event Mapping\n| `page_view` | `event1` |\n",
        "m",
    );
    assert_eq!(m.dim_map["page_url"].evar, "v75");
    assert_eq!(m.event_map["page_view"], "event1");
}

#[test]
fn event_mapping_needs_two_cells() {
    let m = parse_mapping("## Event Mapping\n| lonely |\n| Canonical Event | Adobe |\n", "m");
    assert!(m.event_map.is_empty());
}

#[test]
fn report_suite_bullets_elsewhere_are_ignored() {
    let m = parse_mapping("## Event Mapping\n- Production: `p`\n", "m");
    assert!(m.prod_rsid.is_empty());
}

// ── Enum and package documents ───────────────────────────────────

#[test]
fn enum_bullets_before_any_set_are_ignored() {
    let enums = parse_enums("- stray\n## colors\n- red\n- \n");
    assert_eq!(enums.len(), 1);
    assert_eq!(enums["colors"].values().collect::<Vec<_>>(), vec!["red"]);
}

#[test]
fn package_url_pattern_without_backticks() {
    let pkg = parse_package("## Endpoint Detection\n- URL pattern: /collect\n", "ga4");
    assert_eq!(pkg.name, "ga4");
    assert_eq!(pkg.endpoint_pattern, "/collect");
}
