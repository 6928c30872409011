mod common;

use common::{make_daily, make_forecast};
use tickerboard::chart::{ChartController, ChartError, LiveChart, SeriesKind};

// --- history ---

#[test]
fn test_render_history_builds_fresh_model() {
    let mut chart = ChartController::new();
    let model = chart.render_history(make_daily("AAPL", &[1.0, 2.0, 3.0]));
    assert_eq!(model.labels.len(), 3);
    assert_eq!(model.series.len(), 1);
    assert_eq!(chart.builds(), 1);
    assert_eq!(chart.symbol(), Some("AAPL"));

    chart.render_history(make_daily("MSFT", &[4.0, 5.0]));
    assert_eq!(chart.builds(), 2);
    assert_eq!(chart.model().unwrap().labels.len(), 2);
    assert_eq!(chart.symbol(), Some("MSFT"));
}

#[test]
fn test_clear_drops_model() {
    let mut chart = ChartController::new();
    chart.render_history(make_daily("AAPL", &[1.0]));
    chart.clear();
    assert!(chart.model().is_none());
    assert!(chart.symbol().is_none());
}

// --- forecast overlay ---

#[test]
fn test_overlay_pads_and_bridges_forecast() {
    let mut chart = ChartController::new();
    chart.render_history(make_daily("AAPL", &[10.0, 11.0, 12.0, 13.0, 14.0]));
    let model = chart
        .overlay_forecast(make_forecast("AAPL", 6, &[15.0, 16.0, 17.0]))
        .unwrap();

    assert_eq!(model.labels.len(), 8);
    assert_eq!(model.labels[5], "2024-01-06");
    assert!(model.is_aligned());

    let forecast = model.series(SeriesKind::Forecast).unwrap();
    assert_eq!(forecast.points[..4], [None, None, None, None]);
    assert_eq!(forecast.points[4], Some(14.0));
    assert_eq!(
        forecast.points[5..],
        [Some(15.0), Some(16.0), Some(17.0)]
    );

    let upper = model.series(SeriesKind::UpperBand).unwrap();
    assert_eq!(upper.points[4], Some(14.0));
    assert_eq!(upper.points[7], Some(18.0));
    let lower = model.series(SeriesKind::LowerBand).unwrap();
    assert_eq!(lower.points[5], Some(14.0));

    let history = model.series(SeriesKind::History).unwrap();
    assert_eq!(history.points.len(), 8);
    assert_eq!(history.points[7], None);
    assert_eq!(chart.builds(), 2);
}

#[test]
fn test_overlay_replaces_previous_forecast() {
    let mut chart = ChartController::new();
    chart.render_history(make_daily("AAPL", &[1.0, 2.0]));
    chart
        .overlay_forecast(make_forecast("AAPL", 3, &[3.0, 4.0, 5.0]))
        .unwrap();
    let model = chart
        .overlay_forecast(make_forecast("AAPL", 3, &[3.5]))
        .unwrap();
    assert_eq!(model.labels.len(), 3);
    assert_eq!(chart.forecast().unwrap().horizon, 1);
}

#[test]
fn test_overlay_without_history_fails() {
    let mut chart = ChartController::new();
    let err = chart
        .overlay_forecast(make_forecast("AAPL", 6, &[1.0]))
        .unwrap_err();
    assert_eq!(err, ChartError::NoHistory);
    assert_eq!(chart.builds(), 0);
}

#[test]
fn test_overlay_other_symbol_fails() {
    let mut chart = ChartController::new();
    chart.render_history(make_daily("AAPL", &[1.0, 2.0]));
    let err = chart
        .overlay_forecast(make_forecast("MSFT", 3, &[1.0]))
        .unwrap_err();
    assert!(matches!(err, ChartError::SymbolMismatch { .. }));
    assert_eq!(chart.model().unwrap().labels.len(), 2);
}

#[test]
fn test_overlay_overlapping_dates_fails() {
    let mut chart = ChartController::new();
    chart.render_history(make_daily("AAPL", &[1.0, 2.0, 3.0]));
    let err = chart
        .overlay_forecast(make_forecast("AAPL", 3, &[4.0]))
        .unwrap_err();
    assert!(matches!(err, ChartError::Misaligned { .. }));
}

#[test]
fn test_overlay_empty_forecast_fails() {
    let mut chart = ChartController::new();
    chart.render_history(make_daily("AAPL", &[1.0]));
    let err = chart
        .overlay_forecast(make_forecast("AAPL", 2, &[]))
        .unwrap_err();
    assert_eq!(err, ChartError::EmptyForecast);
}

#[test]
fn test_band_fill_covers_area_between_bands() {
    let mut chart = ChartController::new();
    chart.render_history(make_daily("AAPL", &[10.0, 11.0, 12.0, 13.0, 14.0]));
    let model = chart
        .overlay_forecast(make_forecast("AAPL", 6, &[15.0, 16.0, 17.0]))
        .unwrap();

    let fill = model.band_fill(2);
    // columns at 4, 4.5, 5, 5.5, 6, 6.5 and 7, three points each
    assert_eq!(fill.len(), 21);
    assert!(fill.iter().all(|&(x, _)| (4.0..=7.0).contains(&x)));
    assert!(fill.iter().filter(|p| p.0 == 4.0).all(|p| p.1 == 14.0));

    let last: Vec<f64> = fill.iter().filter(|p| p.0 == 7.0).map(|p| p.1).collect();
    assert_eq!(last, vec![16.0, 17.0, 18.0]);
}

#[test]
fn test_band_fill_empty_without_forecast() {
    let mut chart = ChartController::new();
    let model = chart.render_history(make_daily("AAPL", &[1.0, 2.0, 3.0]));
    assert!(model.band_fill(4).is_empty());
}

// --- live ---

#[test]
fn test_live_chart_shifts_in_place() {
    let labels: Vec<String> = (0..4).map(|i| format!("t{}", i)).collect();
    let mut live = LiveChart::seed("SP500", labels, vec![1.0, 2.0, 3.0, 4.0]);
    live.update_incremental(5.0, "t4".to_string());
    live.update_incremental(6.0, "t5".to_string());

    let model = live.model();
    assert_eq!(model.labels, vec!["t2", "t3", "t4", "t5"]);
    assert_eq!(
        model.series[0].points,
        vec![Some(3.0), Some(4.0), Some(5.0), Some(6.0)]
    );
    assert_eq!(live.builds(), 1);
    assert_eq!(live.updates(), 2);
    assert_eq!(live.last_value(), Some(6.0));
}

#[test]
fn test_live_chart_seed_truncates_to_shorter_input() {
    let live = LiveChart::seed("SP500", vec!["a".to_string(), "b".to_string()], vec![1.0]);
    assert_eq!(live.model().labels.len(), 1);
    assert!(live.model().is_aligned());
}
