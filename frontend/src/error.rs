use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SiteError {
    #[error("invalid trigger threshold {input:?}: {reason}")]
    Threshold { input: String, reason: &'static str },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("no browser window available")]
    NoWindow,

    #[error("element {0} is not attached")]
    Detached(&'static str),

    #[error("javascript call failed: {0}")]
    Js(String),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
