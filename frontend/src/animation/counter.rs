use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::animation::visibility::use_on_visible;
use crate::charts::format::format_thousands;
use crate::config::SiteConfig;

/// Values shown by an animated counter, one per animation frame.
///
/// The accumulated value grows by `target / (duration / frame)` per frame
/// and is displayed floored; the last value yielded is always exactly the
/// target. Negative targets are treated as zero.
#[derive(Debug, Clone)]
pub struct CounterSequence {
    target: u64,
    increment: f64,
    accumulated: f64,
    done: bool,
}

impl CounterSequence {
    pub fn new(target: i64, duration_ms: u32, frame_ms: u32) -> Self {
        let target = target.max(0) as u64;
        let frames = (f64::from(duration_ms) / f64::from(frame_ms.max(1))).max(1.0);
        Self {
            target,
            increment: target as f64 / frames,
            accumulated: 0.0,
            done: false,
        }
    }

    pub fn from_config(target: i64, config: &SiteConfig) -> Self {
        Self::new(target, config.counter_duration_ms, config.frame_ms)
    }

    pub fn target(&self) -> u64 {
        self.target
    }
}

impl Iterator for CounterSequence {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }
        self.accumulated += self.increment;
        if self.accumulated < self.target as f64 {
            Some((self.accumulated.floor() as u64).min(self.target))
        } else {
            self.done = true;
            Some(self.target)
        }
    }
}

/// Drives `sequence` on the browser's animation-frame cadence.
pub fn animate<F>(mut sequence: CounterSequence, mut on_frame: F)
where
    F: FnMut(u64) + 'static,
{
    let Some(window) = web_sys::window() else {
        // No frame clock; jump straight to the end.
        if let Some(last) = sequence.last() {
            on_frame(last);
        }
        return;
    };

    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
        match sequence.next() {
            Some(value) => {
                on_frame(value);
                if let Some(window) = web_sys::window() {
                    if let Some(cb) = f.borrow().as_ref() {
                        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
                    }
                }
            }
            None => {
                let _ = f.borrow_mut().take();
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(cb) = g.borrow().as_ref() {
        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    };
}

#[derive(Properties, PartialEq)]
pub struct CounterProps {
    pub target: i64,
    #[prop_or_default]
    pub prefix: String,
    #[prop_or_default]
    pub suffix: String,
}

#[function_component(Counter)]
pub fn counter(props: &CounterProps) -> Html {
    let config = use_context::<SiteConfig>().unwrap_or_default();
    let node = use_node_ref();
    let shown = use_state(|| 0u64);

    let on_visible = {
        let setter = shown.setter();
        let target = props.target;
        Callback::from(move |_| {
            let setter = setter.clone();
            animate(CounterSequence::from_config(target, &config), move |v| setter.set(v));
        })
    };
    use_on_visible(node.clone(), on_visible);

    html! {
        <span ref={node} class="counter" data-target={props.target.to_string()}>
            {&props.prefix}{format_thousands(*shown)}{&props.suffix}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(target: i64, duration: u32) -> Vec<u64> {
        CounterSequence::new(target, duration, 16).collect()
    }

    #[test]
    fn ends_exactly_at_target() {
        for target in [1, 7, 100, 999, 12_500, 1_000_000] {
            let values = run(target, 2000);
            assert_eq!(*values.last().unwrap(), target as u64, "target {}", target);
        }
    }

    #[test]
    fn never_decreases() {
        for target in [3, 250, 8_420, 47_311] {
            let values = run(target, 2000);
            assert!(values.windows(2).all(|w| w[0] <= w[1]), "target {}", target);
            assert!(values.iter().all(|v| *v <= target as u64));
        }
    }

    #[test]
    fn frame_count_follows_duration() {
        // 2000ms at 16ms per frame is 125 frames.
        assert_eq!(run(12_500, 2000).len(), 125);
        assert_eq!(run(12_500, 160).len(), 10);
    }

    #[test]
    fn zero_target_yields_single_zero() {
        assert_eq!(run(0, 2000), vec![0]);
    }

    #[test]
    fn negative_target_is_clamped() {
        assert_eq!(run(-40, 2000), vec![0]);
    }

    #[test]
    fn duration_shorter_than_a_frame_finishes_immediately() {
        assert_eq!(run(500, 0), vec![500]);
        assert_eq!(CounterSequence::new(500, 2000, 0).last(), Some(500));
    }

    #[test]
    fn stops_after_target() {
        let mut seq = CounterSequence::new(10, 32, 16);
        assert_eq!(seq.next(), Some(5));
        assert_eq!(seq.next(), Some(10));
        assert_eq!(seq.next(), None);
        assert_eq!(seq.next(), None);
    }
}
