use spotlight_core::ConfigError;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    #[error("2d canvas context unavailable")]
    NoContext,

    #[error("{op} failed: {message}")]
    Js { op: &'static str, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DomError {
    /// Wrap an exception thrown by a DOM call.
    pub fn js(op: &'static str, value: JsValue) -> Self {
        let message = match value.dyn_ref::<js_sys::Error>() {
            Some(error) => String::from(error.message()),
            None => value.as_string().unwrap_or_else(|| format!("{value:?}")),
        };
        DomError::Js { op, message }
    }
}

impl From<DomError> for JsValue {
    fn from(error: DomError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}
