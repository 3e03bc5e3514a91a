use serde::{Deserialize, Serialize};
use std::fmt;

/// Device family inferred from the User-Agent header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Roku,
    #[serde(rename = "firetv")]
    FireTv,
    SamsungTv,
    Vizio,
    #[serde(rename = "tvos")]
    TvOs,
    Android,
    Ios,
    #[default]
    Web,
}

/// Checked in order; first hit wins. TV markers must precede `android`.
const MARKERS: &[(&[&str], Platform)] = &[
    (&["roku"], Platform::Roku),
    (&["firetv", "fire tv"], Platform::FireTv),
    (&["tizen"], Platform::SamsungTv),
    (&["vizio"], Platform::Vizio),
    (&["appletv", "tvos"], Platform::TvOs),
    (&["android"], Platform::Android),
    (&["iphone", "ipad"], Platform::Ios),
];

impl Platform {
    /// Classifies a User-Agent string. Unknown agents are [`Platform::Web`].
    pub fn from_user_agent(ua: &str) -> Self {
        let ua = ua.to_lowercase();
        MARKERS
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| ua.contains(n)))
            .map_or(Platform::Web, |(_, platform)| *platform)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Roku => "roku",
            Platform::FireTv => "firetv",
            Platform::SamsungTv => "samsung_tv",
            Platform::Vizio => "vizio",
            Platform::TvOs => "tvos",
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Web => "web",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
