use std::rc::Rc;

use gloo_timers::callback::Timeout;
use stylist::css;
use yew::prelude::*;

use crate::config::SiteConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

impl FlashKind {
    pub fn class(&self) -> &'static str {
        match self {
            FlashKind::Success => "flash-success",
            FlashKind::Error => "flash-error",
            FlashKind::Info => "flash-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlashMessage {
    pub id: u32,
    pub text: String,
    pub kind: FlashKind,
}

pub enum FlashAction {
    Show(String, FlashKind),
    Dismiss(u32),
}

/// Messages currently on screen, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlashQueue {
    next_id: u32,
    pub messages: Vec<FlashMessage>,
}

impl Reducible for FlashQueue {
    type Action = FlashAction;

    fn reduce(self: Rc<Self>, action: FlashAction) -> Rc<Self> {
        let mut queue = (*self).clone();
        match action {
            FlashAction::Show(text, kind) => {
                queue.messages.push(FlashMessage {
                    id: queue.next_id,
                    text,
                    kind,
                });
                queue.next_id = queue.next_id.wrapping_add(1);
            }
            FlashAction::Dismiss(id) => queue.messages.retain(|m| m.id != id),
        }
        Rc::new(queue)
    }
}

/// Handle for raising notifications from anywhere below `FlashProvider`.
#[derive(Clone, PartialEq)]
pub struct Notifier {
    dispatch: Callback<FlashAction>,
}

impl Notifier {
    pub fn show(&self, text: impl Into<String>, kind: FlashKind) {
        self.dispatch.emit(FlashAction::Show(text.into(), kind));
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(text, FlashKind::Success);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(text, FlashKind::Error);
    }
}

#[hook]
pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().unwrap_or(Notifier {
        dispatch: Callback::noop(),
    })
}

#[derive(Properties, PartialEq)]
pub struct FlashProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(FlashProvider)]
pub fn flash_provider(props: &FlashProviderProps) -> Html {
    let queue = use_reducer(FlashQueue::default);
    let notifier = {
        let dispatcher = queue.dispatcher();
        Notifier {
            dispatch: Callback::from(move |action| dispatcher.dispatch(action)),
        }
    };
    let on_dismiss = {
        let dispatcher = queue.dispatcher();
        Callback::from(move |id| dispatcher.dispatch(FlashAction::Dismiss(id)))
    };

    let container = css!(
        r#"
        position: fixed;
        top: 80px;
        right: 20px;
        z-index: 1000;
        display: flex;
        flex-direction: column;
        gap: 10px;
        "#
    );

    html! {
        <ContextProvider<Notifier> context={notifier}>
            { props.children.clone() }
            <div class={classes!("flash-messages", container)}>
                { for queue.messages.iter().map(|m| html! {
                    <FlashItem key={m.id} message={m.clone()} on_dismiss={on_dismiss.clone()} />
                }) }
            </div>
        </ContextProvider<Notifier>>
    }
}

#[derive(Properties, PartialEq)]
struct FlashItemProps {
    message: FlashMessage,
    on_dismiss: Callback<u32>,
}

#[function_component(FlashItem)]
fn flash_item(props: &FlashItemProps) -> Html {
    let config = use_context::<SiteConfig>().unwrap_or_default();

    // Auto-dismiss; the timer is cancelled if the message is closed first.
    {
        let id = props.message.id;
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(config.notification_ms, move || on_dismiss.emit(id));
                move || drop(timeout)
            },
            id,
        );
    }

    let close = {
        let id = props.message.id;
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    html! {
        <div class={classes!("flash-message", props.message.kind.class())}>
            <span class="flash-text">{&props.message.text}</span>
            <button class="flash-close" onclick={close}>{"×"}</button>
        </div>
    }
}
