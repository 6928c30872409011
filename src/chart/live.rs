use super::{ChartModel, Series, SeriesKind};

/// Rolling index chart fed by the fast cadence. Built once, then mutated in
/// place: each update drops the oldest point and appends a new one.
#[derive(Debug)]
pub struct LiveChart {
    model: ChartModel,
    builds: u64,
    updates: u64,
}

impl LiveChart {
    pub fn seed(name: &str, labels: Vec<String>, values: Vec<f64>) -> Self {
        let len = labels.len().min(values.len());
        let labels: Vec<String> = labels.into_iter().take(len).collect();
        let values: Vec<f64> = values.into_iter().take(len).collect();
        Self {
            model: ChartModel {
                title: name.to_string(),
                labels,
                series: vec![Series::dense(name, SeriesKind::Live, &values)],
            },
            builds: 1,
            updates: 0,
        }
    }

    pub fn model(&self) -> &ChartModel {
        &self.model
    }

    pub fn builds(&self) -> u64 {
        self.builds
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn last_value(&self) -> Option<f64> {
        self.model
            .series
            .first()
            .and_then(|s| s.points.last().copied().flatten())
    }

    /// Shift out the oldest point, append `(label, value)`.
    pub fn update_incremental(&mut self, value: f64, label: String) {
        let window = self.model.labels.len();
        self.model.labels.push(label);
        if let Some(series) = self.model.series.first_mut() {
            series.points.push(Some(value));
            if window > 0 {
                series.points.remove(0);
            }
        }
        if window > 0 {
            self.model.labels.remove(0);
        }
        self.updates += 1;
    }
}
