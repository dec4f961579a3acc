use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlFormElement, HtmlInputElement};
use yew::prelude::*;

use crate::analytics::{track_event, TrackedEvent};
use crate::components::modal::DownloadModal;
use crate::components::notification::use_notifier;
use crate::config::SiteConfig;
use crate::forms::submit::{submit, DownloadInfo, EmailPayload, FormKind, Payload, SubmitControl, SubmitOutcome};

#[derive(Properties, PartialEq)]
pub struct EmailFormProps {
    pub kind: FormKind,
    pub button_label: &'static str,
    #[prop_or("you@company.com")]
    pub placeholder: &'static str,
    #[prop_or_default]
    pub on_success: Callback<SubmitOutcome>,
}

/// Single email field posted as JSON; used by the newsletter and download forms.
#[function_component(EmailForm)]
pub fn email_form(props: &EmailFormProps) -> Html {
    let config = use_context::<SiteConfig>().unwrap_or_default();
    let notifier = use_notifier();
    let form_ref = use_node_ref();
    let input_ref = use_node_ref();
    let control = use_state(|| SubmitControl::new(props.button_label, "Sending..."));

    let onsubmit = {
        let form_ref = form_ref.clone();
        let input_ref = input_ref.clone();
        let control = control.clone();
        let kind = props.kind;
        let on_success = props.on_success.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            track_event(&config, TrackedEvent::form_submit(kind.form_id()));

            let mut busy = (*control).clone();
            if !busy.begin() {
                return;
            }
            let email = input_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            control.set(busy.clone());

            let config = config.clone();
            let notifier = notifier.clone();
            let control = control.clone();
            let form = form_ref.cast::<HtmlFormElement>();
            let on_success = on_success.clone();
            spawn_local(async move {
                let outcome = submit(&config, kind, Payload::Json(EmailPayload { email }), &notifier).await;
                if outcome.is_success() {
                    if let Some(form) = form {
                        form.reset();
                    }
                    on_success.emit(outcome.clone());
                }
                busy.finish();
                control.set(busy);
            });
        })
    };

    html! {
        <form id={props.kind.form_id()} class="email-form" ref={form_ref} {onsubmit}>
            <input ref={input_ref} type="email" name="email" placeholder={props.placeholder} required=true />
            <button type="submit" class="btn btn-primary" disabled={control.disabled()}>
                {control.label()}
            </button>
        </form>
    }
}

#[function_component(NewsletterForm)]
pub fn newsletter_form() -> Html {
    html! {
        <EmailForm kind={FormKind::Newsletter} button_label="Subscribe" />
    }
}

#[function_component(DownloadForm)]
pub fn download_form() -> Html {
    let download = use_state(|| None::<DownloadInfo>);

    let on_success = {
        let download = download.clone();
        Callback::from(move |outcome: SubmitOutcome| {
            if let SubmitOutcome::Success { download: Some(info), .. } = outcome {
                download.set(Some(info));
            }
        })
    };
    let on_close = {
        let download = download.clone();
        Callback::from(move |_| download.set(None))
    };

    html! {
        <>
            <EmailForm kind={FormKind::Download} button_label="Get kubeopt" {on_success} />
            if let Some(info) = (*download).clone() {
                <DownloadModal {info} {on_close} />
            }
        </>
    }
}
