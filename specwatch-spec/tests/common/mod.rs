//! Shared spec-tree fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const ENUMS_MD: &str = "\
# Global Enums

Shared value lists.

## page_types
- article
- homepage
- video
- article

## platforms
- web
- `ios`
";

pub const PAGE_VIEW_MD: &str = "\
# page_view

Fires once per page load.
Includes SPA route changes.

## Required Dimensions

| Dimension | Type | Validation | Notes |
|-----------|------|------------|-------|
| page_url | string | `^https?://` | Full URL |
| page_type | string | `@enums/page_types` | |

## Optional Dimensions

| Dimension | Type | Validation | Notes |
|:---|:---:|---|---|
| author | string | `.+` | Byline |
| content_tier | string | `@enums/missing_set` | dangling reference |

## Platform Overrides

### adobe_appmeasurement
- Requires: `events=event1`
- `page_url` → `eVar75`
- Sent via s.t()

### ga4
- `page_url` -> `page_location`
";

pub const VIDEO_START_MD: &str = "\
## Required Dimensions

| Dimension | Type | Validation | Notes |
|---|---|---|---|
| video_id | string | | |
";

pub const TEST_SITE_MD: &str = "\
# Test Site

## Report Suite
- Production: `testsiteglobal`
- Dev/QA: `testsitedev`

## Dimension Mapping

| Canonical Name | eVar | Prop | Notes |
|---|---|---|---|
| page_url | v75 | c75 | full url |
| page_type | v3 | — | |
| broken row |

## Event Mapping

| Canonical Event | Adobe Event |
|---|---|
| page_view | event1 |
| video_start | event50 |
";

pub const LONG_TITLE_MAPPING_MD: &str = "\
# Acme News and Acme Business Combined Property Mapping

## Report Suite
- Production: acmeglobal
- Dev: acmedev
";

pub const ADOBE_PACKAGE_MD: &str = "\
# adobe_appmeasurement

## Endpoint Detection
- URL pattern: `/b/ss/`
- Method: GET or POST

## Beacon Parsing
- Parameters:
  - `pageName` — Page name
  - `events` - Comma separated event list
";

/// Writes `content` to `root/rel`, creating parent directories.
pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A complete spec tree in a temp directory.
pub fn spec_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "_global/enums.md", ENUMS_MD);
    write(root, "events/page_view.md", PAGE_VIEW_MD);
    write(root, "events/video_start.md", VIDEO_START_MD);
    write(root, "events/notes.txt", "ignored, not markdown");
    write(root, "mappings/test_site.md", TEST_SITE_MD);
    write(root, "mappings/acme_combined.md", LONG_TITLE_MAPPING_MD);
    write(root, "packages/adobe_appmeasurement.md", ADOBE_PACKAGE_MD);
    dir
}
