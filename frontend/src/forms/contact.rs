use wasm_bindgen_futures::spawn_local;
use web_sys::{FormData, HtmlFormElement};
use yew::prelude::*;

use crate::analytics::{track_event, TrackedEvent};
use crate::components::notification::use_notifier;
use crate::config::SiteConfig;
use crate::forms::submit::{submit, FormKind, Payload, SubmitControl, ERROR_MESSAGE};

#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let config = use_context::<SiteConfig>().unwrap_or_default();
    let notifier = use_notifier();
    let form_ref = use_node_ref();
    let control = use_state(|| SubmitControl::new("Send Message", "Sending..."));

    let onsubmit = {
        let form_ref = form_ref.clone();
        let control = control.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let kind = FormKind::Contact;
            track_event(&config, TrackedEvent::form_submit(kind.form_id()));

            let mut busy = (*control).clone();
            if !busy.begin() {
                return;
            }

            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let data = match FormData::new_with_form(&form) {
                Ok(data) => data,
                Err(_) => {
                    notifier.error(ERROR_MESSAGE);
                    return;
                }
            };
            control.set(busy.clone());

            let config = config.clone();
            let notifier = notifier.clone();
            let control = control.clone();
            spawn_local(async move {
                let outcome = submit(&config, kind, Payload::Form(data), &notifier).await;
                if outcome.is_success() {
                    form.reset();
                }
                busy.finish();
                control.set(busy);
            });
        })
    };

    html! {
        <form id={FormKind::Contact.form_id()} class="contact-form" ref={form_ref} {onsubmit}>
            <div class="form-row">
                <input type="text" name="name" placeholder="Your name" required=true />
                <input type="email" name="email" placeholder="Work email" required=true />
            </div>
            <input type="text" name="company" placeholder="Company (optional)" />
            <textarea name="message" rows="5" placeholder="Tell us about your clusters" required=true />
            <button type="submit" class="btn btn-primary" disabled={control.disabled()}>
                {control.label()}
            </button>
        </form>
    }
}
