use stylist::css;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

use crate::components::copy_button::CodeBlock;
use crate::config::APP_NAME;
use crate::forms::submit::DownloadInfo;

#[derive(Properties, PartialEq)]
pub struct DownloadModalProps {
    pub info: DownloadInfo,
    pub on_close: Callback<()>,
}

/// True when a click landed on the backdrop itself rather than the dialog.
pub fn is_backdrop_click(target_class: &str) -> bool {
    target_class.split_whitespace().any(|c| c == "modal")
}

#[function_component(DownloadModal)]
pub fn download_modal(props: &DownloadModalProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            let class = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|el| el.class_name())
                .unwrap_or_default();
            if is_backdrop_click(&class) {
                on_close.emit(());
            }
        })
    };

    let overlay = css!(
        r#"
        position: fixed;
        inset: 0;
        background: rgba(17, 24, 39, 0.6);
        display: flex;
        align-items: center;
        justify-content: center;
        z-index: 1100;
        "#
    );

    html! {
        <div class={classes!("modal", overlay)} onclick={backdrop_click}>
            <div class="modal-content">
                <div class="modal-header">
                    <h3>{format!("Download {}", APP_NAME)}</h3>
                    <button class="modal-close" onclick={close}>{"×"}</button>
                </div>
                <div class="modal-body">
                    <p>{"Run this command to get started:"}</p>
                    <CodeBlock code={props.info.download_url.clone()} />
                    <p>{&props.info.instructions}</p>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_backdrop_closes() {
        assert!(is_backdrop_click("modal"));
        assert!(is_backdrop_click("modal stylist-abc123"));
        assert!(!is_backdrop_click("modal-content"));
        assert!(!is_backdrop_click("modal-body"));
        assert!(!is_backdrop_click(""));
    }
}
