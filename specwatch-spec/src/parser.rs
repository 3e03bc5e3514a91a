//! Document parsers for the spec markdown dialect.
//!
//! Each parser is a small state machine over the current `## section`
//! (and, for event documents, the current `### vendor` override block).
//! Lines that don't fit the current section are skipped without error.

use crate::markdown::{backtick_or_text, backtick_value, Line};
use crate::{
    DimMapping, Dimension, DimensionType, EnumSet, EventSpec, Mapping, Package, PlatformOverride,
    MAX_MAPPING_NAME_LEN,
};
use std::collections::BTreeMap;

const DIMENSION_HEADER: &str = "Dimension";
const DIM_MAPPING_HEADER: &str = "Canonical Name";
const EVENT_MAPPING_HEADER: &str = "Canonical Event";

/// Arrow separators accepted in override bullets, e.g. `` `page_url` → `eVar75` ``.
const ARROWS: [&str; 3] = ["→", "->", "=>"];

/// Named `##` sections with meaning to at least one document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before the first `##` heading.
    Preamble,
    RequiredDimensions,
    OptionalDimensions,
    PlatformOverrides,
    ReportSuite,
    DimensionMapping,
    EventMapping,
    EndpointDetection,
    BeaconParsing,
    Other,
}

impl Section {
    fn from_heading(heading: &str) -> Self {
        const NAMED: [(&str, Section); 8] = [
            ("Required Dimensions", Section::RequiredDimensions),
            ("Optional Dimensions", Section::OptionalDimensions),
            ("Platform Overrides", Section::PlatformOverrides),
            ("Report Suite", Section::ReportSuite),
            ("Dimension Mapping", Section::DimensionMapping),
            ("Event Mapping", Section::EventMapping),
            ("Endpoint Detection", Section::EndpointDetection),
            ("Beacon Parsing", Section::BeaconParsing),
        ];
        NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(heading))
            .map_or(Section::Other, |(_, section)| *section)
    }
}

/// Parses `_global/enums.md`: each `## name` opens a set, each bullet adds a value.
pub fn parse_enums(content: &str) -> BTreeMap<String, EnumSet> {
    let mut enums = BTreeMap::new();
    let mut current: Option<EnumSet> = None;

    for raw in content.lines() {
        match Line::classify(raw) {
            Line::Section(name) => {
                if let Some(set) = current.take() {
                    enums.insert(set.name.clone(), set);
                }
                current = Some(EnumSet::new(name));
            }
            Line::Bullet(value) => {
                if let Some(set) = current.as_mut() {
                    let value = value.trim_matches('`').trim();
                    if !value.is_empty() {
                        set.insert(value);
                    }
                }
            }
            _ => {}
        }
    }
    if let Some(set) = current {
        enums.insert(set.name.clone(), set);
    }
    enums
}

/// Parses one event document. `fallback_name` is used when there is no title.
pub fn parse_event(content: &str, fallback_name: &str) -> EventSpec {
    let mut parser = EventParser::default();
    for raw in content.lines() {
        parser.feed(raw.trim(), Line::classify(raw));
    }
    parser.finish(fallback_name)
}

#[derive(Default)]
struct EventParser {
    event: EventSpec,
    titled: bool,
    section: Option<Section>,
    platform: Option<String>,
}

impl EventParser {
    fn section(&self) -> Section {
        self.section.unwrap_or(Section::Preamble)
    }

    /// `trimmed` is the whole line; preamble text keeps its markdown.
    fn feed(&mut self, trimmed: &str, line: Line<'_>) {
        match line {
            Line::Title(name) => {
                self.event.name = name.to_string();
                self.titled = true;
            }
            Line::Section(heading) => {
                self.section = Some(Section::from_heading(heading));
                self.platform = None;
            }
            Line::Subsection(vendor) => {
                if self.section() == Section::PlatformOverrides {
                    self.event
                        .overrides
                        .insert(vendor.to_string(), PlatformOverride::new(vendor));
                    self.platform = Some(vendor.to_string());
                }
            }
            Line::Blank => {}
            _ if self.section() == Section::Preamble => {
                if !trimmed.starts_with('#') {
                    self.describe(trimmed);
                }
            }
            Line::Row(cells) => match self.section() {
                Section::RequiredDimensions => self.push_dimension(&cells, true),
                Section::OptionalDimensions => self.push_dimension(&cells, false),
                _ => {}
            },
            Line::Bullet(text) if self.section() == Section::PlatformOverrides => {
                self.override_bullet(text);
            }
            Line::Bullet(_) | Line::Text(_) | Line::Divider => {}
        }
    }

    fn describe(&mut self, text: &str) {
        if !self.titled {
            return;
        }
        if !self.event.description.is_empty() {
            self.event.description.push(' ');
        }
        self.event.description.push_str(text);
    }

    fn push_dimension(&mut self, cells: &[&str], required: bool) {
        let cell = |i: usize| cells.get(i).copied().unwrap_or_default();
        let name = cell(0);
        if name.is_empty() || name.eq_ignore_ascii_case(DIMENSION_HEADER) {
            return;
        }
        self.event.push_dimension(Dimension {
            name: name.trim_matches('`').to_string(),
            kind: DimensionType::from(cell(1)),
            validation: cell(2).trim_matches('`').to_string(),
            notes: cell(3).to_string(),
            required,
        });
    }

    fn override_bullet(&mut self, bullet: &str) {
        let Some(platform) = self.platform.as_deref() else {
            return;
        };
        let Some(ov) = self.event.overrides.get_mut(platform) else {
            return;
        };

        if let Some(event) = required_event(bullet) {
            ov.required_event = Some(event.to_string());
        } else if let Some((left, right)) = split_arrow(bullet) {
            match (backtick_value(left), backtick_value(right)) {
                ("", _) | (_, "") => ov.notes.push(bullet.to_string()),
                (dim, field) => {
                    ov.dim_mappings.insert(dim.to_string(), field.to_string());
                }
            }
        } else {
            ov.notes.push(bullet.to_string());
        }
    }

    fn finish(mut self, fallback_name: &str) -> EventSpec {
        if self.event.name.is_empty() {
            self.event.name = fallback_name.to_string();
        }
        self.event
    }
}

/// `Requires: events=event1`, with or without backticks.
fn required_event(bullet: &str) -> Option<&str> {
    let rest = bullet.strip_prefix("Requires:")?.trim_start();
    let rest = rest.strip_prefix('`').unwrap_or(rest);
    let id = rest.strip_prefix("events=")?;
    let id = id
        .split(|c: char| c == '`' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    (!id.is_empty()).then_some(id)
}

/// Splits on the earliest arrow separator.
fn split_arrow(s: &str) -> Option<(&str, &str)> {
    ARROWS
        .iter()
        .filter_map(|arrow| s.find(arrow).map(|at| (at, arrow.len())))
        .min_by_key(|(at, _)| *at)
        .map(|(at, len)| (&s[..at], &s[at + len..]))
}

/// Parses one mapping document. `fallback_name` is the file stem.
pub fn parse_mapping(content: &str, fallback_name: &str) -> Mapping {
    let mut mapping = Mapping::default();
    let mut section = Section::Preamble;

    for raw in content.lines() {
        match Line::classify(raw) {
            Line::Title(title) => {
                mapping.name = title.to_lowercase().replace(' ', "_");
            }
            Line::Section(heading) => section = Section::from_heading(heading),
            Line::Bullet(bullet) if section == Section::ReportSuite => {
                if let Some(rest) = bullet.strip_prefix("Production:") {
                    mapping.prod_rsid = backtick_or_text(rest).to_string();
                } else if let Some(rest) = bullet
                    .strip_prefix("Dev/QA:")
                    .or_else(|| bullet.strip_prefix("Dev:"))
                {
                    mapping.dev_rsid = backtick_or_text(rest).to_string();
                }
            }
            Line::Row(cells) if section == Section::DimensionMapping => {
                if cells.len() < 3 || cells[0].is_empty() || cells[0] == DIM_MAPPING_HEADER {
                    continue;
                }
                let canonical = cells[0].trim_matches('`');
                let mut dm = DimMapping::new(canonical, slot_cell(cells[1]), slot_cell(cells[2]));
                if let Some(notes) = cells.get(3) {
                    dm.notes = (*notes).to_string();
                }
                mapping.dim_map.insert(canonical.to_string(), dm);
            }
            Line::Row(cells) if section == Section::EventMapping => {
                if cells.len() < 2 || cells[0].is_empty() || cells[0] == EVENT_MAPPING_HEADER {
                    continue;
                }
                mapping.event_map.insert(
                    cells[0].trim_matches('`').to_string(),
                    cells[1].trim_matches('`').to_string(),
                );
            }
            _ => {}
        }
    }

    if mapping.name.is_empty() || mapping.name.len() > MAX_MAPPING_NAME_LEN {
        mapping.name = fallback_name.to_string();
    }
    mapping
}

/// Normalizes an eVar/prop cell; dashes and `n/a` mean "no slot".
fn slot_cell(cell: &str) -> &str {
    let cell = cell.trim_matches('`').trim();
    match cell {
        "-" | "—" | "–" => "",
        _ if cell.eq_ignore_ascii_case("n/a") => "",
        _ => cell,
    }
}

/// Parses one vendor package document.
pub fn parse_package(content: &str, fallback_name: &str) -> Package {
    let mut pkg = Package::default();
    let mut section = Section::Preamble;

    for raw in content.lines() {
        match Line::classify(raw) {
            Line::Title(title) => pkg.name = title.to_string(),
            Line::Section(heading) => section = Section::from_heading(heading),
            Line::Bullet(bullet) if section == Section::EndpointDetection => {
                if let Some(rest) = bullet.strip_prefix("URL pattern:") {
                    pkg.endpoint_pattern = backtick_or_text(rest).to_string();
                } else if let Some(rest) = bullet.strip_prefix("Method:") {
                    pkg.method = rest.trim().to_string();
                }
            }
            Line::Bullet(bullet) if section == Section::BeaconParsing => {
                if let Some((key, meaning)) = field_doc(bullet) {
                    pkg.fields.insert(key.to_string(), meaning.to_string());
                }
            }
            _ => {}
        }
    }

    if pkg.name.is_empty() {
        pkg.name = fallback_name.to_string();
    }
    pkg
}

/// `` `rsid` — Report Suite ID `` (em dash, hyphen or colon).
fn field_doc(bullet: &str) -> Option<(&str, &str)> {
    let rest = bullet.strip_prefix('`')?;
    let end = rest.find('`')?;
    let key = &rest[..end];
    let after = rest[end + 1..].trim_start();
    let meaning = ["—", "-", ":"]
        .iter()
        .find_map(|sep| after.strip_prefix(sep))?
        .trim();
    (!key.is_empty()).then_some((key, meaning))
}
