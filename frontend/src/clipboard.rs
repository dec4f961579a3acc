use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

use crate::error::SiteError;

pub const COPIED_LABEL: &str = "Copied!";

/// Copies `text`, preferring the async Clipboard API and falling back to a
/// hidden textarea with `execCommand("copy")` when it is missing or refuses.
pub async fn copy_text(text: &str) -> Result<(), SiteError> {
    let window = web_sys::window().ok_or_else(|| SiteError::MissingElement("window".to_string()))?;
    let clipboard = window.navigator().clipboard();
    if !clipboard.is_undefined() {
        match JsFuture::from(clipboard.write_text(text)).await {
            Ok(_) => return Ok(()),
            Err(e) => debug!("clipboard API refused, using fallback: {:?}", e),
        }
    }
    fallback_copy(text)
}

fn fallback_copy(text: &str) -> Result<(), SiteError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| SiteError::MissingElement("document".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| SiteError::MissingElement("body".to_string()))?;

    let textarea = document
        .create_element("textarea")?
        .dyn_into::<HtmlTextAreaElement>()
        .map_err(|_| SiteError::Js("textarea cast".to_string()))?;
    textarea.set_value(text);
    body.append_child(&textarea)?;
    textarea.select();

    let copied = document
        .dyn_into::<HtmlDocument>()
        .map_err(|_| SiteError::Js("not an HTML document".to_string()))
        .and_then(|doc| doc.exec_command("copy").map_err(SiteError::from));
    let _ = body.remove_child(&textarea);

    match copied? {
        true => Ok(()),
        false => Err(SiteError::Js("copy command rejected".to_string())),
    }
}

/// Text shown on a copy button, given whether the last copy is still fresh.
pub fn copy_label(idle: &str, copied: bool) -> &str {
    if copied {
        COPIED_LABEL
    } else {
        idle
    }
}
