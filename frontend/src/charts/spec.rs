use crate::charts::data::{showcase, ChartDataset, DemoData};
use crate::charts::format::{dollars, dollars_in_thousands, percent};
use crate::charts::theme::ChartTheme;

pub const COST_TRENDS: &str = "costTrendsChart";
pub const UTILIZATION: &str = "utilizationChart";
pub const EFFICIENCY: &str = "efficiencyChart";
pub const SAVINGS: &str = "savingsChart";
pub const NODE_UTILIZATION: &str = "nodeUtilizationChart";
pub const COST_DISTRIBUTION: &str = "costDistributionChart";
pub const SAVINGS_BREAKDOWN: &str = "savingsBreakdownChart";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormat {
    /// `$12k`
    ThousandsOfDollars,
    /// `$3,500`
    Dollars,
    /// `85%`
    Percent,
}

impl TickFormat {
    pub fn label(&self, value: f64) -> String {
        match self {
            TickFormat::ThousandsOfDollars => dollars_in_thousands(value),
            TickFormat::Dollars => dollars(value),
            TickFormat::Percent => percent(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColoring {
    /// One colour per series; bars of a category are grouped side by side.
    BySeries,
    /// Single series, one colour per category.
    ByCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendStyle {
    Hidden,
    Plain,
    /// `label: $value (pct%)`
    Share,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Line { ticks: TickFormat },
    Bar { ticks: TickFormat, y_max: Option<f64>, coloring: BarColoring },
    Doughnut { cutout: f64 },
}

/// Everything needed to draw one chart onto one canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub canvas_id: &'static str,
    pub kind: ChartKind,
    pub dataset: ChartDataset,
    pub colors: Vec<&'static str>,
    pub legend: LegendStyle,
}

impl ChartSpec {
    /// Colour for series or category `index`, cycling through the list.
    pub fn color_at(&self, index: usize) -> &'static str {
        if self.colors.is_empty() {
            "#374151"
        } else {
            self.colors[index % self.colors.len()]
        }
    }
}

/// Upper bound of the value axis: the fixed maximum when given, otherwise
/// the data maximum plus ten percent headroom.
pub fn axis_max(data_max: f64, fixed: Option<f64>) -> f64 {
    match fixed {
        Some(max) => max,
        None if data_max > 0.0 => data_max * 1.1,
        None => 1.0,
    }
}

/// Category label for an x-axis tick, blank between categories.
pub fn category_label(labels: &[String], x: f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}

/// Charts fed by `/api/demo-data` (or its fallback).
pub fn demo_specs(data: &DemoData, theme: &ChartTheme) -> Vec<ChartSpec> {
    vec![
        ChartSpec {
            canvas_id: COST_TRENDS,
            kind: ChartKind::Line { ticks: TickFormat::ThousandsOfDollars },
            dataset: data.cost_trends_dataset(),
            colors: theme.comparison.to_vec(),
            legend: LegendStyle::Plain,
        },
        ChartSpec {
            canvas_id: UTILIZATION,
            kind: ChartKind::Bar {
                ticks: TickFormat::Percent,
                y_max: Some(100.0),
                coloring: BarColoring::BySeries,
            },
            dataset: data.utilization_dataset(),
            colors: theme.comparison.to_vec(),
            legend: LegendStyle::Plain,
        },
        ChartSpec {
            canvas_id: EFFICIENCY,
            kind: ChartKind::Doughnut { cutout: 0.7 },
            dataset: data.efficiency_dataset(),
            colors: theme.efficiency.to_vec(),
            legend: LegendStyle::Plain,
        },
        ChartSpec {
            canvas_id: SAVINGS,
            kind: ChartKind::Bar {
                ticks: TickFormat::Dollars,
                y_max: None,
                coloring: BarColoring::ByCategory,
            },
            dataset: data.savings_dataset(),
            colors: theme.savings.to_vec(),
            legend: LegendStyle::Hidden,
        },
    ]
}

/// Cluster analysis charts with fixed data.
pub fn showcase_specs(theme: &ChartTheme) -> Vec<ChartSpec> {
    vec![
        ChartSpec {
            canvas_id: NODE_UTILIZATION,
            kind: ChartKind::Bar {
                ticks: TickFormat::Percent,
                y_max: Some(100.0),
                coloring: BarColoring::BySeries,
            },
            dataset: showcase::node_utilization(),
            colors: theme.node_series().to_vec(),
            legend: LegendStyle::Plain,
        },
        ChartSpec {
            canvas_id: COST_DISTRIBUTION,
            kind: ChartKind::Doughnut { cutout: 0.6 },
            dataset: showcase::cost_distribution(),
            colors: theme.greens().to_vec(),
            legend: LegendStyle::Share,
        },
        ChartSpec {
            canvas_id: SAVINGS_BREAKDOWN,
            kind: ChartKind::Doughnut { cutout: 0.6 },
            dataset: showcase::savings_breakdown(),
            colors: theme.greens().to_vec(),
            legend: LegendStyle::Share,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_formats() {
        assert_eq!(TickFormat::ThousandsOfDollars.label(16000.0), "$16k");
        assert_eq!(TickFormat::Dollars.label(1200.0), "$1,200");
        assert_eq!(TickFormat::Percent.label(40.0), "40%");
    }

    #[test]
    fn axis_headroom() {
        assert_eq!(axis_max(85.0, Some(100.0)), 100.0);
        assert!((axis_max(16000.0, None) - 17600.0).abs() < 1e-9);
        assert_eq!(axis_max(0.0, None), 1.0);
    }

    #[test]
    fn category_labels_only_on_whole_ticks() {
        let labels: Vec<String> = ["Jan", "Feb", "Mar"].iter().map(|s| s.to_string()).collect();
        assert_eq!(category_label(&labels, 0.0), "Jan");
        assert_eq!(category_label(&labels, 2.0000000001), "Mar");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 3.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn colours_cycle() {
        let spec = &showcase_specs(&ChartTheme::default())[1];
        assert_eq!(spec.color_at(0), spec.color_at(3));
        assert_ne!(spec.color_at(0), spec.color_at(1));
    }

    #[test]
    fn one_spec_per_canvas() {
        let theme = ChartTheme::default();
        let mut ids: Vec<&str> = demo_specs(&DemoData::fallback(), &theme)
            .iter()
            .chain(showcase_specs(&theme).iter())
            .map(|s| s.canvas_id)
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 7);
    }

    #[test]
    fn cost_trends_spec_carries_demo_data() {
        let specs = demo_specs(&DemoData::fallback(), &ChartTheme::default());
        let cost = specs.iter().find(|s| s.canvas_id == COST_TRENDS).unwrap();
        assert_eq!(cost.dataset, DemoData::fallback().cost_trends_dataset());
        assert_eq!(cost.kind, ChartKind::Line { ticks: TickFormat::ThousandsOfDollars });
    }
}
