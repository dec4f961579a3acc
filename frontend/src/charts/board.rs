use log::info;
use yew::prelude::*;

use crate::charts::bootstrap::{bind_to_document, load_demo_data, ChartRegistry};
use crate::charts::data::DataSource;
use crate::charts::render::CanvasChart;
use crate::charts::spec::{demo_specs, showcase_specs};
use crate::charts::theme::ChartTheme;
use crate::config::SiteConfig;

/// Loads demo data once on mount and (re)binds every chart on the page.
/// Returns where the demo data came from once it is known.
#[hook]
pub fn use_chart_bootstrap() -> Option<DataSource> {
    let config = use_context::<SiteConfig>().unwrap_or_default();
    let theme = use_context::<ChartTheme>().unwrap_or_default();
    let registry = use_mut_ref(ChartRegistry::<CanvasChart>::default);
    let source = use_state(|| None::<DataSource>);

    {
        let source = source.clone();
        use_effect_with_deps(
            move |_| {
                // Showcase charts need no data; draw them straight away.
                let showcase = bind_to_document(&mut registry.borrow_mut(), &showcase_specs(&theme), &theme);
                info!("Bound {} showcase charts", showcase);

                wasm_bindgen_futures::spawn_local(async move {
                    let (data, data_source) = load_demo_data(&config).await;
                    let bound = bind_to_document(&mut registry.borrow_mut(), &demo_specs(&data, &theme), &theme);
                    info!("Bound {} demo charts from {:?} data", bound, data_source);
                    source.set(Some(data_source));
                });
                || ()
            },
            (),
        );
    }

    *source
}

#[derive(Properties, PartialEq)]
pub struct ChartCanvasProps {
    pub id: &'static str,
    #[prop_or(600)]
    pub width: u32,
    #[prop_or(400)]
    pub height: u32,
    #[prop_or_default]
    pub title: Option<AttrValue>,
}

#[function_component(ChartCanvas)]
pub fn chart_canvas(props: &ChartCanvasProps) -> Html {
    html! {
        <div class="chart-container">
            if let Some(title) = &props.title {
                <h4 class="chart-title">{title}</h4>
            }
            <canvas
                id={props.id}
                width={props.width.to_string()}
                height={props.height.to_string()}
                style="max-width: 100%;"
            />
        </div>
    }
}
