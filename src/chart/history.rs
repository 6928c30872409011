use super::{ChartError, ChartModel, Series, SeriesKind};
use crate::api::{DailySeries, ForecastSeries};

/// Owns the per-symbol history chart.
///
/// Every render destroys the previous model and builds a new one; the label
/// axis changes shape between symbols and when a forecast is overlaid.
#[derive(Debug, Default)]
pub struct ChartController {
    history: Option<DailySeries>,
    forecast: Option<ForecastSeries>,
    model: Option<ChartModel>,
    builds: u64,
}

impl ChartController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self) -> Option<&ChartModel> {
        self.model.as_ref()
    }

    pub fn history(&self) -> Option<&DailySeries> {
        self.history.as_ref()
    }

    pub fn forecast(&self) -> Option<&ForecastSeries> {
        self.forecast.as_ref()
    }

    pub fn symbol(&self) -> Option<&str> {
        self.history.as_ref().map(|h| h.symbol.as_str())
    }

    /// Number of destroy-and-rebuild cycles so far.
    pub fn builds(&self) -> u64 {
        self.builds
    }

    /// Drop everything, e.g. when the selection moves to a symbol whose
    /// history has not arrived yet.
    pub fn clear(&mut self) {
        self.history = None;
        self.forecast = None;
        self.model = None;
    }

    pub fn render_history(&mut self, daily: DailySeries) -> &ChartModel {
        let model = ChartModel {
            title: format!("{} (History)", daily.symbol),
            labels: daily.labels.clone(),
            series: vec![Series::dense(
                format!("{} (History)", daily.symbol),
                SeriesKind::History,
                &daily.closes,
            )],
        };
        self.history = Some(daily);
        self.forecast = None;
        self.rebuild(model)
    }

    /// Rebuild with the forecast appended to the current history.
    ///
    /// The three forecast series start with `history_len - 1` gaps, repeat the
    /// last close at the last history position, then carry one value per
    /// forecast point.
    pub fn overlay_forecast(&mut self, forecast: ForecastSeries) -> Result<&ChartModel, ChartError> {
        let history = self.history.as_ref().ok_or(ChartError::NoHistory)?;
        if history.symbol != forecast.symbol {
            return Err(ChartError::SymbolMismatch {
                chart: history.symbol.clone(),
                forecast: forecast.symbol.clone(),
            });
        }
        let first = forecast
            .points
            .first()
            .ok_or(ChartError::EmptyForecast)?;
        let (last_label, last_close) = match (history.last_label(), history.last_close()) {
            (Some(label), Some(close)) => (label, close),
            _ => return Err(ChartError::NoHistory),
        };
        if first.label.as_str() <= last_label {
            return Err(ChartError::Misaligned {
                first: first.label.clone(),
                last: last_label.to_string(),
            });
        }

        let mut labels = history.labels.clone();
        labels.extend(forecast.points.iter().map(|p| p.label.clone()));

        let lead = history.len() - 1;
        let bridged = |pick: fn(&crate::api::ForecastPoint) -> f64| -> Vec<Option<f64>> {
            std::iter::repeat_n(None, lead)
                .chain(std::iter::once(Some(last_close)))
                .chain(forecast.points.iter().map(|p| Some(pick(p))))
                .collect()
        };

        let model = ChartModel {
            title: format!("{} (History + {}d Forecast)", history.symbol, forecast.horizon),
            labels,
            series: vec![
                Series {
                    name: format!("{} (History)", history.symbol),
                    kind: SeriesKind::History,
                    points: history
                        .closes
                        .iter()
                        .copied()
                        .map(Some)
                        .chain(std::iter::repeat_n(None, forecast.points.len()))
                        .collect(),
                },
                Series {
                    name: "Forecast".to_string(),
                    kind: SeriesKind::Forecast,
                    points: bridged(|p| p.estimate),
                },
                Series {
                    name: "Upper Band".to_string(),
                    kind: SeriesKind::UpperBand,
                    points: bridged(|p| p.upper),
                },
                Series {
                    name: "Lower Band".to_string(),
                    kind: SeriesKind::LowerBand,
                    points: bridged(|p| p.lower),
                },
            ],
        };
        debug_assert!(model.is_aligned());
        self.forecast = Some(forecast);
        Ok(self.rebuild(model))
    }

    fn rebuild(&mut self, model: ChartModel) -> &ChartModel {
        self.model = None;
        self.builds += 1;
        self.model.insert(model)
    }
}
