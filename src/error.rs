/// Convenience result type used across the crate.
pub type WarpResult<T> = Result<T, WarpError>;

/// Startup failures. Once the loops are running nothing can fail.
#[derive(thiserror::Error, Debug)]
pub enum WarpError {
    /// A config value breaks one of the table invariants.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The JSON override could not be parsed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The hosting page is missing something the entry point needs.
    #[error("dom error: {0}")]
    Dom(String),
}

impl WarpError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn dom(msg: impl Into<String>) -> Self {
        Self::Dom(msg.into())
    }
}

impl From<serde_json::Error> for WarpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<WarpError> for wasm_bindgen::JsValue {
    fn from(err: WarpError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
