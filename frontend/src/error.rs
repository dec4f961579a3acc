use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("element not found: {0}")]
    MissingElement(String),

    #[error("render failed: {0}")]
    Render(String),

    #[error("browser API call failed: {0}")]
    Js(String),
}

impl From<gloo_net::Error> for SiteError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => SiteError::Decode(e.to_string()),
            other => SiteError::Network(other.to_string()),
        }
    }
}

impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SiteError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
