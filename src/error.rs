use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("javascript error: {0}")]
    Js(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Js(describe(&value))
    }
}

/// Best-effort text for a thrown JS value: the string itself when it is one,
/// its debug form otherwise.
pub fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
