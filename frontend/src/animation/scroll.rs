use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

use crate::animation::visibility::VisibilityTrigger;
use crate::config::SiteConfig;

pub const REVEAL_SELECTOR: &str = ".animate-on-scroll";
pub const REVEALED_CLASS: &str = "animated";

const PARALLAX_RATE: f64 = -0.5;
const NAV_OFFSET: f64 = 100.0;

pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn parallax_offset(scroll_y: f64) -> f64 {
    scroll_y * PARALLAX_RATE
}

pub fn stagger_delay(index: usize, step_ms: u32) -> u32 {
    (index as u32).saturating_mul(step_ms)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// The section whose band `[top - 100, top - 100 + height)` holds `scroll_y`.
/// Later sections win when bands overlap.
pub fn active_section(scroll_y: f64, sections: &[SectionBounds]) -> Option<&str> {
    sections
        .iter()
        .filter(|s| {
            let start = s.top - NAV_OFFSET;
            scroll_y >= start && scroll_y < start + s.height
        })
        .last()
        .map(|s| s.id.as_str())
}

/// Collects `section[id]` bounds from the live document.
pub fn measure_sections() -> Vec<SectionBounds> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    let Ok(nodes) = document.query_selector_all("section[id]") else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|el| SectionBounds {
            id: el.id(),
            top: f64::from(el.offset_top()),
            height: f64::from(el.offset_height()),
        })
        .collect()
}

/// Section id named by an in-page link such as `#demo`.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Smoothly scrolls the section with `id` to the top of the viewport.
pub fn scroll_to_section(id: &str) -> bool {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return false;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
    true
}

/// Current vertical scroll offset of the window, updated on every scroll event.
#[hook]
pub fn use_scroll_y() -> f64 {
    let scroll_y = use_state(|| 0.0f64);

    {
        let scroll_y = scroll_y.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let scroll_callback = Closure::wrap(Box::new(move || {
                    if let Some(y) = web_sys::window().and_then(|w| w.scroll_y().ok()) {
                        scroll_y.set(y);
                    }
                }) as Box<dyn FnMut()>);

                if let Some(window) = &window {
                    let _ = window.add_event_listener_with_callback(
                        "scroll",
                        scroll_callback.as_ref().unchecked_ref(),
                    );
                }

                move || {
                    if let Some(window) = window {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            scroll_callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    *scroll_y
}

/// Adds the `animated` class to every `.animate-on-scroll` element the first
/// time it becomes visible, staggered by its position in the batch.
#[hook]
pub fn use_scroll_reveal() {
    let config = use_context::<SiteConfig>().unwrap_or_default();

    use_effect_with_deps(
        move |_| {
            let step = config.stagger_ms;
            let trigger = VisibilityTrigger::from_config(&config, move |element: Element, index| {
                Timeout::new(stagger_delay(index, step), move || {
                    let _ = element.class_list().add_1(REVEALED_CLASS);
                })
                .forget();
            });

            let trigger = match trigger {
                Ok(trigger) => {
                    if let Some(nodes) = web_sys::window()
                        .and_then(|w| w.document())
                        .and_then(|d| d.query_selector_all(REVEAL_SELECTOR).ok())
                    {
                        for i in 0..nodes.length() {
                            if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                                trigger.observe(&el);
                            }
                        }
                    }
                    Some(trigger)
                }
                Err(e) => {
                    warn!("Scroll reveal disabled: {}", e);
                    None
                }
            };

            move || drop(trigger)
        },
        (),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, top: f64, height: f64) -> SectionBounds {
        SectionBounds { id: id.to_string(), top, height }
    }

    #[test]
    fn header_turns_solid_past_threshold() {
        assert!(!is_scrolled(0.0, 100.0));
        assert!(!is_scrolled(100.0, 100.0));
        assert!(is_scrolled(100.5, 100.0));
    }

    #[test]
    fn parallax_moves_at_half_speed_upwards() {
        assert_eq!(parallax_offset(0.0), 0.0);
        assert_eq!(parallax_offset(300.0), -150.0);
    }

    #[test]
    fn stagger_grows_per_index() {
        assert_eq!(stagger_delay(0, 100), 0);
        assert_eq!(stagger_delay(3, 100), 300);
        assert_eq!(stagger_delay(usize::MAX, 100), u32::MAX);
    }

    #[test]
    fn active_section_uses_nav_offset() {
        let sections = vec![
            section("features", 600.0, 800.0),
            section("pricing", 1400.0, 700.0),
            section("contact", 2100.0, 500.0),
        ];
        assert_eq!(active_section(0.0, &sections), None);
        assert_eq!(active_section(500.0, &sections), Some("features"));
        assert_eq!(active_section(1299.0, &sections), Some("features"));
        assert_eq!(active_section(1300.0, &sections), Some("pricing"));
        assert_eq!(active_section(2450.0, &sections), Some("contact"));
        assert_eq!(active_section(2500.0, &sections), None);
    }

    #[test]
    fn in_page_links_name_their_section() {
        assert_eq!(anchor_target("#download"), Some("download"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/pricing"), None);
    }

    #[test]
    fn later_overlapping_section_wins() {
        let sections = vec![section("a", 100.0, 1000.0), section("b", 300.0, 200.0)];
        assert_eq!(active_section(250.0, &sections), Some("b"));
    }
}
