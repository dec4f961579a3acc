use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::animation::visibility::use_on_visible;
use crate::config::SiteConfig;

/// First `chars` characters of `text`, never splitting a code point.
pub fn typed_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[derive(Properties, PartialEq)]
pub struct TypedCodeProps {
    pub text: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// Code block that types itself out once it scrolls into view.
#[function_component(TypedCode)]
pub fn typed_code(props: &TypedCodeProps) -> Html {
    let config = use_context::<SiteConfig>().unwrap_or_default();
    let node = use_node_ref();
    let started = use_state(|| false);
    let shown = use_state(|| 0usize);
    let total = props.text.chars().count();

    {
        let started = started.clone();
        use_on_visible(node.clone(), Callback::from(move |_| started.set(true)));
    }

    let running = *started && *shown < total;
    {
        let shown = shown.clone();
        use_interval(
            move || shown.set(*shown + 1),
            if running { config.typewriter_ms } else { 0 },
        );
    }

    let visible_text = if *started {
        typed_prefix(&props.text, *shown)
    } else {
        ""
    };

    html! {
        <pre ref={node} class={classes!("demo-code", props.class.clone())}>
            <code>{visible_text}</code>
        </pre>
    }
}
