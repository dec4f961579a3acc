use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::config::SiteConfig;
use crate::error::SiteError;

/// Keys waiting for their single visibility event.
///
/// `fire` succeeds at most once per registered key; the key is forgotten
/// as soon as it fires, so late or duplicated observer entries are ignored.
#[derive(Debug)]
pub struct OneShotSet<K> {
    pending: Vec<K>,
}

impl<K: PartialEq> Default for OneShotSet<K> {
    fn default() -> Self {
        Self { pending: Vec::new() }
    }
}

impl<K: PartialEq> OneShotSet<K> {
    /// Returns false if the key is already waiting.
    pub fn register(&mut self, key: K) -> bool {
        if self.pending.contains(&key) {
            return false;
        }
        self.pending.push(key);
        true
    }

    pub fn fire(&mut self, key: &K) -> bool {
        match self.pending.iter().position(|k| k == key) {
            Some(idx) => {
                self.pending.swap_remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Watches elements and calls back once per element when it scrolls into view.
///
/// The callback receives the element and its position among the elements
/// that became visible in the same observer batch. The observer is
/// disconnected when the trigger is dropped.
pub struct VisibilityTrigger {
    observer: IntersectionObserver,
    pending: Rc<RefCell<OneShotSet<Element>>>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl VisibilityTrigger {
    pub fn new<F>(threshold: f64, root_margin: &str, mut on_visible: F) -> Result<Self, SiteError>
    where
        F: FnMut(Element, usize) + 'static,
    {
        let pending: Rc<RefCell<OneShotSet<Element>>> = Rc::new(RefCell::new(OneShotSet::default()));

        let callback = {
            let pending = pending.clone();
            Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
                let mut batch_index = 0;
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    observer.unobserve(&target);
                    // Release the borrow before handing control to user code.
                    let fired = pending.borrow_mut().fire(&target);
                    if fired {
                        on_visible(target, batch_index);
                        batch_index += 1;
                    }
                }
            }) as Box<dyn FnMut(Array, IntersectionObserver)>)
        };

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        options.set_root_margin(root_margin);

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        Ok(Self {
            observer,
            pending,
            _callback: callback,
        })
    }

    pub fn from_config<F>(config: &SiteConfig, on_visible: F) -> Result<Self, SiteError>
    where
        F: FnMut(Element, usize) + 'static,
    {
        Self::new(config.visibility_threshold, &config.visibility_root_margin, on_visible)
    }

    pub fn observe(&self, element: &Element) {
        if self.pending.borrow_mut().register(element.clone()) {
            self.observer.observe(element);
        }
    }
}

impl Drop for VisibilityTrigger {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Emits `on_visible` the first time the referenced node enters the viewport.
#[hook]
pub fn use_on_visible(node: NodeRef, on_visible: Callback<()>) {
    let config = use_context::<SiteConfig>().unwrap_or_default();

    use_effect_with_deps(
        move |node| {
            let trigger = node.cast::<Element>().and_then(|element| {
                match VisibilityTrigger::from_config(&config, move |_, _| on_visible.emit(())) {
                    Ok(trigger) => {
                        trigger.observe(&element);
                        Some(trigger)
                    }
                    Err(e) => {
                        warn!("Visibility observer unavailable: {}", e);
                        None
                    }
                }
            });
            move || drop(trigger)
        },
        node,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_exactly_once_per_key() {
        let mut set = OneShotSet::default();
        assert!(set.register("stats"));
        assert!(set.fire(&"stats"));
        assert!(!set.fire(&"stats"));
        assert!(set.is_empty());
    }

    #[test]
    fn unregistered_keys_never_fire() {
        let mut set: OneShotSet<&str> = OneShotSet::default();
        assert!(!set.fire(&"hero"));
    }

    #[test]
    fn duplicate_registration_is_ignored() {
        let mut set = OneShotSet::default();
        assert!(set.register(1));
        assert!(!set.register(1));
        assert_eq!(set.len(), 1);
        assert!(set.fire(&1));
        assert!(!set.fire(&1));
    }

    #[test]
    fn keys_fire_independently() {
        let mut set = OneShotSet::default();
        set.register("a");
        set.register("b");
        assert!(set.fire(&"b"));
        assert!(set.is_pending(&"a"));
        assert!(set.fire(&"a"));
        assert!(!set.fire(&"b"));
    }
}
