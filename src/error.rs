use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no window")]
    MissingWindow,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("canvas #{0} has no 2d context")]
    NoContext(String),
    #[error("invalid scene manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SceneError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SceneError::Js(format!("{value:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SceneError> for wasm_bindgen::JsValue {
    fn from(err: SceneError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
