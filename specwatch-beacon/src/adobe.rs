//! Adobe Analytics AppMeasurement image requests (`/b/ss/{rsid}/...`).

use crate::{Beacon, Detector, Platform};
use specwatch_capture::NetworkEvent;
use std::collections::BTreeMap;

/// Path marker of the AppMeasurement collection endpoint.
const MARKER: &str = "/b/ss/";

/// Detector for Adobe AppMeasurement beacons.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdobeAppMeasurement;

impl AdobeAppMeasurement {
    pub const VENDOR: &'static str = "adobe_appmeasurement";
}

impl Detector for AdobeAppMeasurement {
    fn vendor(&self) -> &str {
        Self::VENDOR
    }

    fn detect(&self, event: &NetworkEvent) -> bool {
        event.url.contains(MARKER)
    }

    fn parse(&self, event: &NetworkEvent) -> Beacon {
        let params = merge_params(event);
        let get = |key: &str| params.get(key).cloned().unwrap_or_default();

        let page_url = [params.get("g"), params.get("r")]
            .into_iter()
            .flatten()
            .find(|v| !v.is_empty())
            .cloned()
            .unwrap_or_default();

        let event_list = params
            .get("events")
            .map(|events| {
                events
                    .split(',')
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let mut evars = BTreeMap::new();
        let mut props = BTreeMap::new();
        for (key, value) in &params {
            if let Some(n) = slot_number(key, 'v') {
                evars.insert(n.to_string(), value.clone());
            } else if let Some(n) = slot_number(key, 'c') {
                props.insert(n.to_string(), value.clone());
            }
        }

        Beacon {
            vendor: Self::VENDOR.to_string(),
            raw_url: event.url.clone(),
            rsid: report_suite(&event.url).unwrap_or_default().to_string(),
            page_name: get("pageName"),
            page_url,
            event_list,
            evars,
            props,
            link_type: get("pe"),
            link_name: get("pev2"),
            platform: event
                .header("User-Agent")
                .map_or(Platform::Web, Platform::from_user_agent),
            raw_params: params,
        }
    }
}

/// The path segment right after the marker, e.g. `acme` in `/b/ss/acme/1/`.
fn report_suite(url: &str) -> Option<&str> {
    let rest = &url[url.find(MARKER)? + MARKER.len()..];
    let end = rest.find('/')?;
    let rsid = &rest[..end];
    (!rsid.is_empty()).then_some(rsid)
}

/// `v75` → `75` for prefix `v`; anything else is not a slot key.
fn slot_number(key: &str, prefix: char) -> Option<&str> {
    let digits = key.strip_prefix(prefix)?;
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

/// Structured query params first. POST beacons also carry data in the raw
/// URL query (fills gaps only), the form body and the post params (both
/// overwrite).
fn merge_params(event: &NetworkEvent) -> BTreeMap<String, String> {
    let mut params: BTreeMap<String, String> = event
        .query_params
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if !event.is_post() {
        return params;
    }

    if let Ok(parsed) = url::Url::parse(&event.url) {
        for (k, v) in parsed.query_pairs() {
            params.entry(k.into_owned()).or_insert_with(|| v.into_owned());
        }
    }

    if event.post_body.contains('=') {
        let mut seen = std::collections::BTreeSet::new();
        for (k, v) in url::form_urlencoded::parse(event.post_body.as_bytes()) {
            // first value per key, like the URL query
            if seen.insert(k.clone()) {
                params.insert(k.into_owned(), v.into_owned());
            }
        }
    }

    params.extend(event.post_params.iter().map(|(k, v)| (k.clone(), v.clone())));
    params
}
