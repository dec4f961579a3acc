use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use web_sys::FormData;

use crate::components::notification::Notifier;
use crate::config::SiteConfig;
use crate::error::SiteError;

pub const ERROR_MESSAGE: &str = "Sorry, there was an error. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Newsletter,
    Download,
}

impl FormKind {
    pub fn form_id(&self) -> &'static str {
        match self {
            FormKind::Contact => "contactForm",
            FormKind::Newsletter => "newsletterForm",
            FormKind::Download => "downloadForm",
        }
    }

    pub fn path<'a>(&self, config: &'a SiteConfig) -> &'a str {
        match self {
            FormKind::Contact => &config.contact_path,
            FormKind::Newsletter => &config.newsletter_path,
            FormKind::Download => &config.download_path,
        }
    }

    /// Flash text on success; downloads open the instructions modal instead.
    pub fn success_message(&self) -> Option<&'static str> {
        match self {
            FormKind::Contact => Some("Thank you! We'll get back to you soon."),
            FormKind::Newsletter => Some("Successfully subscribed to our newsletter!"),
            FormKind::Download => None,
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct EmailPayload {
    pub email: String,
}

pub enum Payload {
    Form(FormData),
    Json(EmailPayload),
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadInfo {
    pub download_url: String,
    pub instructions: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Success {
        message: Option<&'static str>,
        download: Option<DownloadInfo>,
    },
    Failure,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Success { .. })
    }
}

/// Maps the raw result of a submission onto what the visitor should see.
pub fn interpret(kind: FormKind, result: Result<SubmitResponse, SiteError>) -> SubmitOutcome {
    match result {
        Ok(response) if response.success => {
            let download = match kind {
                FormKind::Download => Some(DownloadInfo {
                    download_url: response.download_url.unwrap_or_default(),
                    instructions: response.instructions.unwrap_or_default(),
                }),
                _ => None,
            };
            SubmitOutcome::Success {
                message: kind.success_message(),
                download,
            }
        }
        Ok(response) => {
            log::warn!(
                "{} rejected: {}",
                kind.form_id(),
                response.error.as_deref().unwrap_or("no reason given")
            );
            SubmitOutcome::Failure
        }
        Err(e) => {
            log::warn!("{} failed: {}", kind.form_id(), e);
            SubmitOutcome::Failure
        }
    }
}

/// Submit button state: disabled while a request is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitControl {
    idle_label: &'static str,
    busy_label: &'static str,
    busy: bool,
}

impl SubmitControl {
    pub fn new(idle_label: &'static str, busy_label: &'static str) -> Self {
        Self {
            idle_label,
            busy_label,
            busy: false,
        }
    }

    /// Returns false when a submission is already running.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// Re-enables the control whatever the outcome was.
    pub fn finish(&mut self) {
        self.busy = false;
    }

    pub fn disabled(&self) -> bool {
        self.busy
    }

    pub fn label(&self) -> &'static str {
        if self.busy {
            self.busy_label
        } else {
            self.idle_label
        }
    }
}

pub async fn send(config: &SiteConfig, kind: FormKind, payload: Payload) -> Result<SubmitResponse, SiteError> {
    let url = config.url(kind.path(config));
    let request = match payload {
        Payload::Form(data) => Request::post(&url).body(data),
        Payload::Json(body) => Request::post(&url).json(&body)?,
    };
    let response = request.send().await?;
    let status = response.status();
    match response.json::<SubmitResponse>().await {
        Ok(body) => Ok(body),
        Err(_) if !response.ok() => Err(SiteError::Status(status)),
        Err(e) => Err(e.into()),
    }
}

/// Posts the form, raises the matching notification and returns the outcome.
pub async fn submit(config: &SiteConfig, kind: FormKind, payload: Payload, notifier: &Notifier) -> SubmitOutcome {
    let outcome = interpret(kind, send(config, kind, payload).await);
    match &outcome {
        SubmitOutcome::Success { message: Some(text), .. } => notifier.success(*text),
        SubmitOutcome::Success { message: None, .. } => {}
        SubmitOutcome::Failure => notifier.error(ERROR_MESSAGE),
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> SubmitResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn success_flag_drives_outcome() {
        let ok = interpret(FormKind::Newsletter, Ok(response(r#"{"success": true}"#)));
        assert_eq!(
            ok,
            SubmitOutcome::Success {
                message: Some("Successfully subscribed to our newsletter!"),
                download: None
            }
        );
        let rejected = interpret(FormKind::Newsletter, Ok(response(r#"{"success": false}"#)));
        assert_eq!(rejected, SubmitOutcome::Failure);
    }

    #[test]
    fn missing_success_field_counts_as_failure() {
        assert_eq!(interpret(FormKind::Contact, Ok(response("{}"))), SubmitOutcome::Failure);
    }

    #[test]
    fn download_success_carries_instructions() {
        let body = r#"{
            "success": true,
            "download_url": "docker pull kubeopt/aks-optimizer:latest",
            "instructions": "Check your email for installation instructions"
        }"#;
        match interpret(FormKind::Download, Ok(response(body))) {
            SubmitOutcome::Success { message, download: Some(info) } => {
                assert_eq!(message, None);
                assert_eq!(info.download_url, "docker pull kubeopt/aks-optimizer:latest");
                assert_eq!(info.instructions, "Check your email for installation instructions");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejected_download_with_error_is_failure() {
        let outcome = interpret(
            FormKind::Download,
            Ok(response(r#"{"success": false, "error": "Email required"}"#)),
        );
        assert!(!outcome.is_success());
    }

    #[test]
    fn transport_errors_are_failures() {
        assert_eq!(
            interpret(FormKind::Contact, Err(SiteError::Network("offline".into()))),
            SubmitOutcome::Failure
        );
        assert_eq!(interpret(FormKind::Contact, Err(SiteError::Status(502))), SubmitOutcome::Failure);
    }

    #[test]
    fn control_reenables_after_finish() {
        let mut control = SubmitControl::new("Send Message", "Sending...");
        assert!(control.begin());
        assert!(control.disabled());
        assert_eq!(control.label(), "Sending...");
        control.finish();
        assert!(!control.disabled());
        assert_eq!(control.label(), "Send Message");
        assert!(control.begin());
    }

    #[test]
    fn control_rejects_double_submit() {
        let mut control = SubmitControl::new("Subscribe", "Subscribe");
        assert!(control.begin());
        assert!(!control.begin());
    }

    #[test]
    fn form_ids_match_page_markup() {
        assert_eq!(FormKind::Contact.form_id(), "contactForm");
        assert_eq!(FormKind::Newsletter.form_id(), "newsletterForm");
        assert_eq!(FormKind::Download.form_id(), "downloadForm");
        let config = SiteConfig::default();
        assert_eq!(FormKind::Download.path(&config), "/api/download");
    }

    #[test]
    fn email_payload_shape() {
        let body = serde_json::to_value(EmailPayload { email: "ops@example.com".into() }).unwrap();
        assert_eq!(body, serde_json::json!({ "email": "ops@example.com" }));
    }
}
