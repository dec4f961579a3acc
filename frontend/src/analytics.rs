use gloo_net::http::Request;
use log::debug;
use serde::Serialize;
use wasm_bindgen_futures::spawn_local;

use crate::config::SiteConfig;
use crate::error::SiteError;

#[derive(Serialize, Debug, PartialEq)]
pub struct PageView {
    pub page: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct TrackedEvent {
    pub action: String,
    pub label: String,
}

impl TrackedEvent {
    pub fn click(name: &str) -> Self {
        Self {
            action: "click".to_string(),
            label: name.to_string(),
        }
    }

    /// Forms without an id are reported as `unknown`.
    pub fn form_submit(form_id: &str) -> Self {
        let label = if form_id.is_empty() { "unknown" } else { form_id };
        Self {
            action: "form_submit".to_string(),
            label: label.to_string(),
        }
    }
}

async fn post<T: Serialize>(url: String, body: &T) -> Result<(), SiteError> {
    Request::post(&url).json(body)?.send().await?;
    Ok(())
}

/// Fire-and-forget; failures are only logged at debug level.
fn send<T: Serialize + 'static>(url: String, body: T) {
    spawn_local(async move {
        if let Err(e) = post(url, &body).await {
            debug!("analytics dropped: {}", e);
        }
    });
}

pub fn track_page_view(config: &SiteConfig, page: &str) {
    send(
        config.url(&config.pageview_path),
        PageView {
            page: page.to_string(),
        },
    );
}

pub fn track_event(config: &SiteConfig, event: TrackedEvent) {
    send(config.url(&config.event_path), event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_match_endpoint_shape() {
        let view = serde_json::to_value(PageView { page: "/pricing".to_string() }).unwrap();
        assert_eq!(view, serde_json::json!({ "page": "/pricing" }));

        let click = serde_json::to_value(TrackedEvent::click("hero-download")).unwrap();
        assert_eq!(click, serde_json::json!({ "action": "click", "label": "hero-download" }));
    }

    #[test]
    fn anonymous_forms_are_labelled_unknown() {
        assert_eq!(TrackedEvent::form_submit("").label, "unknown");
        assert_eq!(TrackedEvent::form_submit("contactForm").label, "contactForm");
    }
}
