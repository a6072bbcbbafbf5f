use log::warn;
use serde::Deserialize;
use web_sys::Document;

use crate::dom;
use crate::error::SiteError;

pub const STORAGE_KEY: &str = "solora-theme";
pub const CONFIG_SELECTOR: &str = "#siteConfig";

/// Knobs the page may override through an inline
/// `<script type="application/json" id="siteConfig">` block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub storage_key: String,
    pub reveal: RevealConfig,
    pub form: FormConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub submit_delay_ms: u32,
    pub messages: FormMessages,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormMessages {
    pub incomplete: String,
    pub sending: String,
    pub sent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            reveal: RevealConfig::default(),
            form: FormConfig::default(),
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            root_margin: "0px 0px -10% 0px".to_string(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1200,
            messages: FormMessages::default(),
        }
    }
}

impl Default for FormMessages {
    fn default() -> Self {
        Self {
            incomplete: "Please complete all fields before submitting.".to_string(),
            sending: "Sending your request…".to_string(),
            sent: "Thank you. We will reach out shortly with next steps.".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the inline config block if the page has one. Falls back to the
    /// defaults when it is missing or malformed.
    pub fn load(document: &Document) -> Self {
        let raw = dom::select(document, CONFIG_SELECTOR).and_then(|node| node.text_content());
        match raw.as_deref().map(str::trim) {
            None | Some("") => Self::default(),
            Some(raw) => Self::from_json(raw).unwrap_or_else(|err| {
                warn!("Ignoring site config: {}", err);
                Self::default()
            }),
        }
    }
}
