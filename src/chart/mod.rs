mod history;
mod live;

pub use history::ChartController;
pub use live::LiveChart;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    History,
    Forecast,
    UpperBand,
    LowerBand,
    Live,
}

/// One plotted line. `None` is an explicit gap, so every series in a model
/// has the same length as the label axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub points: Vec<Option<f64>>,
}

impl Series {
    pub fn dense(name: impl Into<String>, kind: SeriesKind, values: &[f64]) -> Self {
        Self {
            name: name.into(),
            kind,
            points: values.iter().copied().map(Some).collect(),
        }
    }

    /// `(x, y)` pairs for the present points, x being the label index.
    pub fn plotted(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|y| (i as f64, y)))
            .collect()
    }
}

/// A fully built chart: one label axis and the series drawn against it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartModel {
    pub fn series(&self, kind: SeriesKind) -> Option<&Series> {
        self.series.iter().find(|s| s.kind == kind)
    }

    /// `(min, max)` over every present point.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().flatten().copied())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Points filling the area between the lower and upper bands. Each
    /// label interval is split into `steps` columns of `steps + 1` points,
    /// interpolated linearly between neighbouring band values.
    pub fn band_fill(&self, steps: usize) -> Vec<(f64, f64)> {
        let (Some(upper), Some(lower)) = (
            self.series(SeriesKind::UpperBand),
            self.series(SeriesKind::LowerBand),
        ) else {
            return Vec::new();
        };
        let steps = steps.max(1);
        let column = |i: usize| match (
            upper.points.get(i).copied().flatten(),
            lower.points.get(i).copied().flatten(),
        ) {
            (Some(u), Some(l)) => Some((l.min(u), l.max(u))),
            _ => None,
        };

        let mut points = Vec::new();
        for i in 0..self.labels.len() {
            let Some((lo, hi)) = column(i) else {
                continue;
            };
            let next = column(i + 1);
            let columns = if next.is_some() { steps } else { 1 };
            for k in 0..columns {
                let t = k as f64 / steps as f64;
                let (lo, hi) = match next {
                    Some((next_lo, next_hi)) => (lo + (next_lo - lo) * t, hi + (next_hi - hi) * t),
                    None => (lo, hi),
                };
                let x = i as f64 + t;
                for r in 0..=steps {
                    points.push((x, lo + (hi - lo) * r as f64 / steps as f64));
                }
            }
        }
        points
    }

    pub fn is_aligned(&self) -> bool {
        self.series.iter().all(|s| s.points.len() == self.labels.len())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("no daily history loaded")]
    NoHistory,

    #[error("forecast for {forecast} does not match chart symbol {chart}")]
    SymbolMismatch { chart: String, forecast: String },

    #[error("forecast starts at {first} but history ends at {last}")]
    Misaligned { first: String, last: String },

    #[error("forecast has no points")]
    EmptyForecast,
}
