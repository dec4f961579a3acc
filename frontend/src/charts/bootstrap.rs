use gloo_net::http::Request;
use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::charts::data::{DataSource, DemoData};
use crate::charts::render::CanvasChart;
use crate::charts::spec::ChartSpec;
use crate::charts::theme::ChartTheme;
use crate::config::SiteConfig;
use crate::error::SiteError;

/// A live chart bound to a canvas.
pub trait ChartInstance {
    fn canvas_id(&self) -> &str;
    fn destroy(&mut self);
}

/// Live charts keyed by canvas; a canvas never holds two at once.
pub struct ChartRegistry<C: ChartInstance> {
    charts: Vec<C>,
}

impl<C: ChartInstance> Default for ChartRegistry<C> {
    fn default() -> Self {
        Self { charts: Vec::new() }
    }
}

impl<C: ChartInstance> ChartRegistry<C> {
    /// Destroys whatever chart currently occupies `canvas_id`.
    pub fn release(&mut self, canvas_id: &str) -> bool {
        match self.charts.iter().position(|c| c.canvas_id() == canvas_id) {
            Some(idx) => {
                let mut old = self.charts.swap_remove(idx);
                old.destroy();
                true
            }
            None => false,
        }
    }

    /// Binds `chart`, destroying any previous chart on the same canvas first.
    pub fn bind(&mut self, chart: C) {
        self.release(chart.canvas_id());
        self.charts.push(chart);
    }

    pub fn get(&self, canvas_id: &str) -> Option<&C> {
        self.charts.iter().find(|c| c.canvas_id() == canvas_id)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn clear(&mut self) {
        for mut chart in self.charts.drain(..) {
            chart.destroy();
        }
    }

    /// Rebinds every spec through `render`. The old chart is destroyed
    /// before `render` runs so two charts never share a canvas, even
    /// briefly. Specs whose canvas is missing (`Ok(None)`) are skipped.
    pub fn bind_all<F>(&mut self, specs: &[ChartSpec], mut render: F) -> usize
    where
        F: FnMut(&ChartSpec) -> Result<Option<C>, SiteError>,
    {
        let mut bound = 0;
        for spec in specs {
            self.release(spec.canvas_id);
            match render(spec) {
                Ok(Some(chart)) => {
                    self.bind(chart);
                    bound += 1;
                }
                Ok(None) => {}
                Err(e) => warn!("Could not draw {}: {}", spec.canvas_id, e),
            }
        }
        bound
    }
}

impl<C: ChartInstance> Drop for ChartRegistry<C> {
    fn drop(&mut self) {
        self.clear();
    }
}

pub async fn fetch_demo_data(config: &SiteConfig) -> Result<DemoData, SiteError> {
    let response = Request::get(&config.url(&config.demo_data_path)).send().await?;
    if !response.ok() {
        return Err(SiteError::Status(response.status()));
    }
    Ok(response.json::<DemoData>().await?)
}

/// Any failure to load demo data falls back to the static set.
pub fn resolve_demo_data(result: Result<DemoData, SiteError>) -> (DemoData, DataSource) {
    match result {
        Ok(data) => (data, DataSource::Remote),
        Err(e) => {
            info!("Charts will use static data ({})", e);
            (DemoData::fallback(), DataSource::Fallback)
        }
    }
}

pub async fn load_demo_data(config: &SiteConfig) -> (DemoData, DataSource) {
    resolve_demo_data(fetch_demo_data(config).await)
}

fn find_canvas(canvas_id: &str) -> Option<HtmlCanvasElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(canvas_id)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

/// Draws each spec onto the canvas with the matching id in the document.
pub fn bind_to_document(registry: &mut ChartRegistry<CanvasChart>, specs: &[ChartSpec], theme: &ChartTheme) -> usize {
    registry.bind_all(specs, |spec| match find_canvas(spec.canvas_id) {
        Some(canvas) => CanvasChart::render(canvas, spec, theme).map(Some),
        None => Ok(None),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;
    use crate::charts::spec::{demo_specs, showcase_specs};

    /// Tracks how many charts are live on each canvas.
    type Live = Rc<RefCell<HashMap<String, i32>>>;

    struct FakeChart {
        canvas_id: String,
        live: Live,
    }

    impl FakeChart {
        fn new(canvas_id: &str, live: &Live) -> Self {
            let mut counts = live.borrow_mut();
            let count = counts.entry(canvas_id.to_string()).or_insert(0);
            *count += 1;
            assert!(*count <= 1, "two live charts on {}", canvas_id);
            Self {
                canvas_id: canvas_id.to_string(),
                live: live.clone(),
            }
        }
    }

    impl ChartInstance for FakeChart {
        fn canvas_id(&self) -> &str {
            &self.canvas_id
        }

        fn destroy(&mut self) {
            *self.live.borrow_mut().get_mut(&self.canvas_id).unwrap() -= 1;
        }
    }

    fn all_specs() -> Vec<ChartSpec> {
        let theme = ChartTheme::default();
        let mut specs = demo_specs(&DemoData::fallback(), &theme);
        specs.extend(showcase_specs(&theme));
        specs
    }

    #[test]
    fn rebinding_destroys_previous_chart_first() {
        let live = Live::default();
        let mut registry = ChartRegistry::default();
        let specs = all_specs();

        for _ in 0..3 {
            let bound = registry.bind_all(&specs, |spec| Ok(Some(FakeChart::new(spec.canvas_id, &live))));
            assert_eq!(bound, specs.len());
            assert_eq!(registry.len(), specs.len());
        }
        assert!(live.borrow().values().all(|n| *n == 1));
    }

    #[test]
    fn bind_replaces_chart_on_same_canvas() {
        let live = Live::default();
        let mut registry = ChartRegistry::default();
        registry.bind(FakeChart::new("costTrendsChart", &live));
        registry.release("costTrendsChart");
        registry.bind(FakeChart::new("costTrendsChart", &live));
        assert_eq!(registry.len(), 1);
        assert_eq!(live.borrow()["costTrendsChart"], 1);
    }

    #[test]
    fn missing_canvases_and_render_errors_are_skipped() {
        let live = Live::default();
        let mut registry = ChartRegistry::default();
        let specs = all_specs();
        let bound = registry.bind_all(&specs, |spec| match spec.canvas_id {
            "efficiencyChart" => Ok(None),
            "savingsChart" => Err(SiteError::Render("boom".to_string())),
            id => Ok(Some(FakeChart::new(id, &live))),
        });
        assert_eq!(bound, specs.len() - 2);
        assert!(registry.get("efficiencyChart").is_none());
        assert!(registry.get("savingsChart").is_none());
        assert!(registry.get("costTrendsChart").is_some());
    }

    #[test]
    fn failed_rebind_leaves_canvas_empty() {
        let live = Live::default();
        let mut registry = ChartRegistry::default();
        registry.bind(FakeChart::new("savingsChart", &live));
        let specs: Vec<ChartSpec> = all_specs()
            .into_iter()
            .filter(|s| s.canvas_id == "savingsChart")
            .collect();
        registry.bind_all(&specs, |_| Err(SiteError::Render("boom".to_string())));
        assert!(registry.is_empty());
        assert_eq!(live.borrow()["savingsChart"], 0);
    }

    #[test]
    fn dropping_registry_destroys_charts() {
        let live = Live::default();
        {
            let mut registry = ChartRegistry::default();
            registry.bind(FakeChart::new("utilizationChart", &live));
        }
        assert_eq!(live.borrow()["utilizationChart"], 0);
    }

    #[test]
    fn server_error_falls_back_to_static_data() {
        let (data, source) = resolve_demo_data(Err(SiteError::Status(500)));
        assert_eq!(source, DataSource::Fallback);
        assert_eq!(data, DemoData::fallback());

        let dataset = data.cost_trends_dataset();
        assert_eq!(dataset.labels, ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
        assert_eq!(dataset.series[0].values, [12000.0, 14000.0, 13500.0, 15000.0, 16000.0, 14500.0]);
        assert_eq!(dataset.series[1].values, [8000.0, 9500.0, 9000.0, 10500.0, 11000.0, 9800.0]);
    }

    #[test]
    fn network_and_decode_errors_fall_back_too() {
        for err in [
            SiteError::Network("connection refused".to_string()),
            SiteError::Decode("expected value".to_string()),
        ] {
            assert_eq!(resolve_demo_data(Err(err)).1, DataSource::Fallback);
        }
    }

    #[test]
    fn remote_data_is_used_when_available() {
        let mut remote = DemoData::fallback();
        remote.cost_trends.current[5] = 8420.0;
        let (data, source) = resolve_demo_data(Ok(remote.clone()));
        assert_eq!(source, DataSource::Remote);
        assert_eq!(data, remote);
    }
}
