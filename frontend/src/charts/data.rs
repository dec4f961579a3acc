use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

/// Labels along the category axis plus one or more named value series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartDataset {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartDataset {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            series: Vec::new(),
        }
    }

    pub fn with_series(mut self, label: &str, values: Vec<f64>) -> Self {
        self.series.push(Series {
            label: label.to_string(),
            values,
        });
        self
    }

    /// Largest value across every series, `0.0` when empty.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }

    pub fn first_series_total(&self) -> f64 {
        self.series
            .first()
            .map(|s| s.values.iter().sum())
            .unwrap_or(0.0)
    }

    /// Every series has exactly one value per label.
    pub fn is_consistent(&self) -> bool {
        self.series.iter().all(|s| s.values.len() == self.labels.len())
    }
}

/// A before/after comparison as served by `/api/demo-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSection {
    pub labels: Vec<String>,
    pub current: Vec<f64>,
    pub optimized: Vec<f64>,
}

impl ComparisonSection {
    pub fn to_dataset(&self, current_label: &str, optimized_label: &str) -> ChartDataset {
        ChartDataset::new(&self.labels)
            .with_series(current_label, self.current.clone())
            .with_series(optimized_label, self.optimized.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSection {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl BreakdownSection {
    pub fn to_dataset(&self, label: &str) -> ChartDataset {
        ChartDataset::new(&self.labels).with_series(label, self.data.clone())
    }
}

/// Payload of `GET /api/demo-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoData {
    pub cost_trends: ComparisonSection,
    pub utilization: ComparisonSection,
    pub efficiency: BreakdownSection,
    pub savings: BreakdownSection,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl DemoData {
    /// Data shown when the demo endpoint cannot be reached.
    pub fn fallback() -> Self {
        Self {
            cost_trends: ComparisonSection {
                labels: strings(&["Jan", "Feb", "Mar", "Apr", "May", "Jun"]),
                current: vec![12000.0, 14000.0, 13500.0, 15000.0, 16000.0, 14500.0],
                optimized: vec![8000.0, 9500.0, 9000.0, 10500.0, 11000.0, 9800.0],
            },
            utilization: ComparisonSection {
                labels: strings(&["CPU", "Memory", "Storage", "Network"]),
                current: vec![85.0, 78.0, 92.0, 65.0],
                optimized: vec![72.0, 68.0, 80.0, 58.0],
            },
            efficiency: BreakdownSection {
                labels: strings(&["Optimized", "Over-provisioned", "Under-provisioned"]),
                data: vec![65.0, 25.0, 10.0],
            },
            savings: BreakdownSection {
                labels: strings(&["Compute", "Storage", "Network", "Other"]),
                data: vec![3500.0, 1200.0, 800.0, 400.0],
            },
        }
    }

    pub fn cost_trends_dataset(&self) -> ChartDataset {
        self.cost_trends.to_dataset("Current Cost", "Optimized Cost")
    }

    pub fn utilization_dataset(&self) -> ChartDataset {
        self.utilization.to_dataset("Current Usage", "Optimized Usage")
    }

    pub fn efficiency_dataset(&self) -> ChartDataset {
        self.efficiency.to_dataset("Efficiency")
    }

    pub fn savings_dataset(&self) -> ChartDataset {
        self.savings.to_dataset("Monthly Savings")
    }
}

/// Where the rendered demo data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Remote,
    Fallback,
}

/// Fixed data for the cluster analysis charts.
pub mod showcase {
    use super::ChartDataset;

    pub fn node_utilization() -> ChartDataset {
        let nodes = vec!["aks-agentpool-566764..."; 9];
        ChartDataset::new(nodes)
            .with_series("CPU Actual %", vec![45.0, 52.0, 38.0, 61.0, 33.0, 47.0, 55.0, 42.0, 39.0])
            .with_series("CPU Request %", vec![35.0, 42.0, 28.0, 51.0, 23.0, 37.0, 45.0, 32.0, 29.0])
            .with_series("Memory Actual %", vec![65.0, 72.0, 58.0, 81.0, 53.0, 67.0, 75.0, 62.0, 59.0])
            .with_series("Memory Request %", vec![55.0, 62.0, 48.0, 71.0, 43.0, 57.0, 65.0, 52.0, 49.0])
    }

    pub fn cost_distribution() -> ChartDataset {
        ChartDataset::new([
            "production",
            "staging",
            "development",
            "monitoring",
            "kube-system",
            "ingress-nginx",
        ])
        .with_series("Cost", vec![8420.0, 3280.0, 6720.0, 1200.0, 800.0, 1580.0])
    }

    pub fn savings_breakdown() -> ChartDataset {
        ChartDataset::new(["production", "staging", "development"])
            .with_series("Savings", vec![2100.0, 1200.0, 4068.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_cost_trends_match_published_numbers() {
        let data = DemoData::fallback();
        assert_eq!(data.cost_trends.labels, ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
        assert_eq!(
            data.cost_trends.current,
            [12000.0, 14000.0, 13500.0, 15000.0, 16000.0, 14500.0]
        );
        assert_eq!(
            data.cost_trends.optimized,
            [8000.0, 9500.0, 9000.0, 10500.0, 11000.0, 9800.0]
        );
    }

    #[test]
    fn decodes_demo_endpoint_payload() {
        let body = r#"{
            "cost_trends": {"labels": ["Jan","Feb"], "current": [12500, 13200], "optimized": [8200, 8400]},
            "utilization": {"labels": ["CPU"], "current": [45], "optimized": [65]},
            "efficiency": {"labels": ["Efficient","Over-provisioned","Under-provisioned"], "data": [67, 23, 10]},
            "savings": {"labels": ["Right-sizing"], "data": [1200]}
        }"#;
        let data: DemoData = serde_json::from_str(body).unwrap();
        assert_eq!(data.cost_trends.current, [12500.0, 13200.0]);
        assert_eq!(data.efficiency.data, [67.0, 23.0, 10.0]);
    }

    #[test]
    fn sections_convert_to_labelled_series() {
        let dataset = DemoData::fallback().cost_trends_dataset();
        assert_eq!(dataset.series.len(), 2);
        assert_eq!(dataset.series[0].label, "Current Cost");
        assert_eq!(dataset.series[1].label, "Optimized Cost");
        assert!(dataset.is_consistent());
        assert_eq!(dataset.max_value(), 16000.0);
    }

    #[test]
    fn every_fallback_and_showcase_dataset_is_consistent() {
        let data = DemoData::fallback();
        for dataset in [
            data.cost_trends_dataset(),
            data.utilization_dataset(),
            data.efficiency_dataset(),
            data.savings_dataset(),
            showcase::node_utilization(),
            showcase::cost_distribution(),
            showcase::savings_breakdown(),
        ] {
            assert!(dataset.is_consistent(), "{:?}", dataset.labels);
        }
    }

    #[test]
    fn totals_for_doughnuts() {
        assert_eq!(showcase::savings_breakdown().first_series_total(), 7368.0);
        assert_eq!(ChartDataset::default().first_series_total(), 0.0);
        assert_eq!(ChartDataset::default().max_value(), 0.0);
    }
}
