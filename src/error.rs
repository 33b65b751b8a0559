//! Host setup errors
//!
//! The simulation itself cannot fail; only wiring it to the browser can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FxError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("canvas #{0} not found")]
    MissingCanvas(String),
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),
    #[error("canvas 2d context unavailable")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
    #[error("logger already installed")]
    Logger(#[from] log::SetLoggerError),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FxError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        FxError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
