use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::clipboard::{copy_label, copy_text};
use crate::components::notification::use_notifier;
use crate::config::SiteConfig;

pub const COPY_LABEL: &str = "📋 Copy";

#[derive(Properties, PartialEq)]
pub struct CopyButtonProps {
    pub text: AttrValue,
    #[prop_or(COPY_LABEL)]
    pub label: &'static str,
}

#[function_component(CopyButton)]
pub fn copy_button(props: &CopyButtonProps) -> Html {
    let config = use_context::<SiteConfig>().unwrap_or_default();
    let notifier = use_notifier();
    let copied = use_state(|| false);

    // Restore the label once the feedback period is over.
    {
        let is_copied = *copied;
        let copied = copied.clone();
        let feedback_ms = config.copy_feedback_ms;
        use_effect_with_deps(
            move |is_copied| {
                let timeout = is_copied.then(|| Timeout::new(feedback_ms, move || copied.set(false)));
                move || drop(timeout)
            },
            is_copied,
        );
    }

    let onclick = {
        let text = props.text.clone();
        let copied = copied.clone();
        Callback::from(move |_: MouseEvent| {
            let text = text.clone();
            let copied = copied.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                match copy_text(&text).await {
                    Ok(()) => copied.set(true),
                    Err(e) => {
                        warn!("copy failed: {}", e);
                        notifier.error("Could not copy to clipboard.");
                    }
                }
            });
        })
    };

    html! {
        <button
            type="button"
            class={classes!("copy-button", (*copied).then_some("copied"))}
            {onclick}
        >
            {copy_label(props.label, *copied)}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct CodeBlockProps {
    pub code: AttrValue,
}

/// Command snippet with a copy button.
#[function_component(CodeBlock)]
pub fn code_block(props: &CodeBlockProps) -> Html {
    html! {
        <div class="code-block" style="position: relative;">
            <code>{&props.code}</code>
            <CopyButton text={props.code.clone()} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::COPIED_LABEL;

    #[test]
    fn label_follows_copied_state() {
        let config = SiteConfig::default();
        assert_eq!(config.copy_feedback_ms, 2_000);
        assert_eq!(copy_label(COPY_LABEL, false), COPY_LABEL);
        assert_eq!(copy_label(COPY_LABEL, true), COPIED_LABEL);
    }
}
