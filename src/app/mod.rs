mod assistant;
mod news;
mod portfolio;
mod predict;
mod selection;
mod tick;
mod watchlist;

pub use assistant::{ChatLine, GlossaryView, Speaker};
pub use news::NewsStrip;
pub use selection::Selection;

use crate::api::{
    Assistant, ChatReply, DailySeries, ForecastSeries, Headline, MarketFeed, NewsClient, Quote,
};
use crate::chart::{ChartController, LiveChart};
use crate::config::Config;
use crate::error::FetchResult;
use crate::market::{DataStore, DeltaSource, RandomWalk, default_indices};
use crate::sched::Scheduler;
use crate::view::binder::{self, BindContext};
use crate::view::{Board, CardAction};
use chrono::{DateTime, Duration as ChronoDuration, Local, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Index plotted by the live chart.
pub const LIVE_INDEX: &str = "SP500";
const LIVE_POINTS: usize = 20;
const LIVE_SPACING_MINUTES: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Watchlist,
    Analyze,
    Forecast,
    Glossary,
    Chat,
    PortfolioSymbol,
    PortfolioShares,
    Help,
}

/// Who asked for a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOrigin {
    /// Issued by a selection; only valid while that epoch is current.
    Selection(u64),
    /// Baseline or manual refresh; valid while the symbol is tracked.
    Refresh,
}

/// Result of a background request, delivered to the owning task.
#[derive(Debug)]
pub enum Completion {
    Quote {
        origin: RequestOrigin,
        symbol: String,
        result: FetchResult<Quote>,
    },
    Daily {
        epoch: u64,
        symbol: String,
        result: FetchResult<DailySeries>,
    },
    Prediction {
        epoch: u64,
        symbol: String,
        horizon: u32,
        result: FetchResult<ForecastSeries>,
    },
    Glossary {
        term: String,
        result: FetchResult<String>,
    },
    Chat {
        result: FetchResult<ChatReply>,
    },
    News {
        result: Result<Vec<Headline>, String>,
    },
}

pub struct App {
    pub config: Config,
    pub store: DataStore,
    pub board: Board,
    pub selection: Selection,
    pub chart: ChartController,
    pub live_chart: LiveChart,
    pub news: NewsStrip,
    pub scheduler: Scheduler,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub status_message: Option<String>,
    pub chart_status: Option<String>,
    pub predict_status: Option<String>,
    pub glossary: Option<GlossaryView>,
    pub chat_log: Vec<ChatLine>,
    pub cursor: usize,
    pub pending_symbol: Option<String>,
    deltas: Box<dyn DeltaSource + Send>,
    feed: Arc<dyn MarketFeed>,
    assistant: Arc<dyn Assistant>,
    news_client: Option<Arc<NewsClient>>,
    tx: UnboundedSender<Completion>,
    persist: bool,
}

impl App {
    /// Build an app around the given producers. Nothing is fetched until
    /// [`App::start`]; the config is never written back.
    pub fn with_feed(
        config: Config,
        feed: Arc<dyn MarketFeed>,
        assistant: Arc<dyn Assistant>,
        deltas: Box<dyn DeltaSource + Send>,
    ) -> (Self, UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut store = DataStore::new(config.bounds()).with_indices(default_indices());
        store.replace_watchlist(&config.watchlist);

        let mut board = Board::default();
        binder::rebuild_cards(&mut board, store.watchlist());

        let live_chart = seed_live_chart(&store, &mut RandomWalk::new(None), Local::now());
        let scheduler = Scheduler::new(
            Duration::from_millis(config.fast_interval_ms),
            Duration::from_secs(config.slow_interval_secs),
        );

        let mut app = Self {
            config,
            store,
            board,
            selection: Selection::default(),
            chart: ChartController::new(),
            live_chart,
            news: NewsStrip::default(),
            scheduler,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            status_message: None,
            chart_status: None,
            predict_status: None,
            glossary: None,
            chat_log: Vec::new(),
            cursor: 0,
            pending_symbol: None,
            deltas,
            feed,
            assistant,
            news_client: None,
            tx,
            persist: false,
        };
        let ctx = app.bind_context();
        binder::bind_index_tiles(&mut app.board, &app.store, &ctx);
        binder::bind_portfolio(&mut app.board, &app.store, &app.config.portfolio);
        (app, rx)
    }

    /// Fetch RSS headlines on the slow cadence instead of rotating the
    /// built-in set only.
    pub fn with_news_client(mut self, client: NewsClient) -> Self {
        self.news_client = Some(Arc::new(client));
        self
    }

    /// Write config changes back to disk.
    pub fn with_persistence(mut self) -> Self {
        self.persist = true;
        self
    }

    pub fn feed_label(&self) -> &'static str {
        self.config.feed.label()
    }

    /// Request baselines for every watchlist symbol, select the first card
    /// and arm the scheduler. Must run inside a tokio runtime.
    pub fn start(&mut self, now: Instant) {
        let symbols: Vec<String> = self.store.watchlist().to_vec();
        let first = symbols.first().cloned();
        for symbol in &symbols {
            self.spawn_quote(symbol.clone(), RequestOrigin::Refresh);
        }
        if let Some(first) = first {
            self.select(&first);
        }
        if !self.config.news_sources.is_empty() {
            self.spawn_news();
        }
        self.scheduler.start(now);
        tracing::info!(
            feed = self.feed.name(),
            symbols = symbols.len(),
            "dashboard started"
        );
    }

    /// Apply every completion already queued. Returns how many were applied.
    pub fn drain(&mut self, rx: &mut UnboundedReceiver<Completion>) -> usize {
        let mut applied = 0;
        while let Ok(completion) = rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Fold one completion into the store and board, dropping results for
    /// a superseded selection or an untracked symbol.
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Quote {
                origin,
                symbol,
                result,
            } => self.apply_quote(origin, &symbol, result),
            Completion::Daily {
                epoch,
                symbol,
                result,
            } => self.apply_daily(epoch, &symbol, result),
            Completion::Prediction {
                epoch,
                symbol,
                horizon,
                result,
            } => self.apply_prediction(epoch, &symbol, horizon, result),
            Completion::Glossary { term, result } => self.apply_glossary(term, result),
            Completion::Chat { result } => self.apply_chat(result),
            Completion::News { result } => self.apply_news(result),
        }
    }

    fn apply_quote(&mut self, origin: RequestOrigin, symbol: &str, result: FetchResult<Quote>) {
        if let RequestOrigin::Selection(epoch) = origin {
            if !self.selection.is_current(epoch) {
                tracing::debug!(symbol, epoch, "discarding quote for superseded selection");
                return;
            }
        }
        if !self.store.is_tracked(symbol) {
            tracing::debug!(symbol, "discarding quote for untracked symbol");
            return;
        }
        match result {
            Ok(quote) => {
                if self.store.upsert(symbol, quote.into_update()).is_none() {
                    return;
                }
                let ctx = self.bind_context();
                binder::bind_card(&mut self.board, &self.store, symbol, &ctx);
                binder::bind_detail(&mut self.board, &self.store, symbol, &ctx);
                binder::bind_portfolio(&mut self.board, &self.store, &self.config.portfolio);
            }
            Err(e) => {
                tracing::warn!(symbol, error = %e, "quote failed");
                binder::mark_unavailable(&mut self.board, symbol);
                if self.selection.current() == Some(symbol) {
                    self.status_message = Some(format!("Quote unavailable for {}: {}", symbol, e));
                }
            }
        }
    }

    fn apply_daily(&mut self, epoch: u64, symbol: &str, result: FetchResult<DailySeries>) {
        if !self.selection.is_current(epoch) {
            tracing::debug!(symbol, epoch, "discarding daily series for superseded selection");
            return;
        }
        match result {
            Ok(daily) => {
                self.chart.render_history(daily);
                self.chart_status = Some("Daily data loaded.".to_string());
            }
            Err(e) => {
                tracing::warn!(symbol, error = %e, "daily series failed");
                self.chart.clear();
                self.chart_status = Some("Failed to load daily data.".to_string());
            }
        }
    }

    fn apply_prediction(
        &mut self,
        epoch: u64,
        symbol: &str,
        horizon: u32,
        result: FetchResult<ForecastSeries>,
    ) {
        if !self.selection.is_current(epoch) {
            tracing::debug!(symbol, epoch, "discarding forecast for superseded selection");
            return;
        }
        let outcome = result
            .map_err(|e| e.to_string())
            .and_then(|forecast| {
                self.chart
                    .overlay_forecast(forecast)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            });
        self.predict_status = Some(match outcome {
            Ok(()) => format!("Forecast ready for {} day(s).", horizon),
            Err(message) => {
                tracing::warn!(symbol, horizon, error = %message, "forecast failed");
                format!("Prediction error: {}", message)
            }
        });
    }

    pub(crate) fn bind_context(&self) -> BindContext {
        self.bind_context_at(Utc::now())
    }

    pub(crate) fn bind_context_at(&self, now: DateTime<Utc>) -> BindContext {
        BindContext {
            thresholds: self.config.thresholds(),
            stale_after_secs: self.config.stale_after_secs,
            now,
        }
    }

    pub(crate) fn spawn_quote(&self, symbol: String, origin: RequestOrigin) {
        let feed = Arc::clone(&self.feed);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = feed.fetch_quote(&symbol).await;
            let _ = tx.send(Completion::Quote {
                origin,
                symbol,
                result,
            });
        });
    }

    pub(crate) fn spawn_daily(&self, symbol: String, epoch: u64) {
        let feed = Arc::clone(&self.feed);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = feed.fetch_daily(&symbol).await;
            let _ = tx.send(Completion::Daily {
                epoch,
                symbol,
                result,
            });
        });
    }

    pub(crate) fn spawn_prediction(&self, symbol: String, epoch: u64, horizon: u32) {
        let feed = Arc::clone(&self.feed);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = feed.fetch_prediction(&symbol, horizon).await;
            let _ = tx.send(Completion::Prediction {
                epoch,
                symbol,
                horizon,
                result,
            });
        });
    }

    pub(crate) fn save_config(&mut self) {
        if !self.persist {
            return;
        }
        if let Err(e) = self.config.save() {
            tracing::error!(error = %e, "failed to save config");
            self.status_message = Some(format!("Could not save config: {}", e));
        }
    }

    pub fn move_prev(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_next(&mut self) {
        let len = self.board.cards.len();
        if len > 0 && self.cursor < len - 1 {
            self.cursor += 1;
        }
    }

    /// Run the action of the card under the cursor.
    pub fn activate_cursor(&mut self) -> bool {
        let Some((id, _)) = self.board.cards.at(self.cursor) else {
            return false;
        };
        match self.board.cards.activate(id) {
            Some(CardAction::Select(symbol)) => self.select(&symbol),
            None => false,
        }
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.pending_symbol = None;
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn close_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

/// Seed the live chart with a short walk around the current index value,
/// one point every five minutes ending at `end`.
fn seed_live_chart(
    store: &DataStore,
    deltas: &mut dyn DeltaSource,
    end: DateTime<Local>,
) -> LiveChart {
    let anchor = store.index(LIVE_INDEX).map(|e| e.value).unwrap_or(0.0);
    let mut labels = Vec::with_capacity(LIVE_POINTS);
    let mut values = Vec::with_capacity(LIVE_POINTS);
    for i in (0..LIVE_POINTS as i64).rev() {
        let at = end - ChronoDuration::minutes(i * LIVE_SPACING_MINUTES);
        labels.push(at.format("%H:%M").to_string());
        let drift = deltas.index_delta(LIVE_INDEX);
        values.push(anchor + anchor * drift / 100.0);
    }
    LiveChart::seed(LIVE_INDEX, labels, values)
}
