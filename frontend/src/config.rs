use log::{debug, warn, Level};
use serde::Deserialize;
use yew::prelude::*;

use crate::error::Result;
use crate::scroll::threshold::Threshold;

/// Id of the `<script type="application/json">` element that may override the defaults.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Chatty lifecycle logs while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Seconds the smoothed position takes to catch up with the native scroll.
    pub smooth: f64,
    /// Parallax offsets for elements carrying a `data-speed` attribute.
    pub effects: bool,
    pub ignore_mobile_resize: bool,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            smooth: 1.2,
            effects: true,
            ignore_mobile_resize: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TriggerSettings {
    pub desktop_start: Threshold,
    pub mobile_start: Threshold,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            desktop_start: Threshold::DESKTOP_ENTRANCE,
            mobile_start: Threshold::MOBILE_ENTRANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub scroll: ScrollSettings,
    pub triggers: TriggerSettings,
    pub show_timeline: bool,
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the embedded config block, falling back to defaults when it is
    /// absent or malformed.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|element| element.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => match Self::from_json(&raw) {
                Ok(config) => {
                    debug!("Loaded site config: {:?}", config);
                    config
                }
                Err(err) => {
                    warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, err);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }
}

#[hook]
pub fn use_site_config() -> SiteConfig {
    use_context::<SiteConfig>().unwrap_or_default()
}
