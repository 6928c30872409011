use super::{App, LIVE_INDEX};
use crate::sched::Cadence;
use crate::view::binder;
use chrono::{DateTime, Local, Utc};
use std::time::Instant;

impl App {
    /// Fire whatever cadences are due at `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<Cadence> {
        let fired = self.scheduler.due(now);
        for cadence in &fired {
            match cadence {
                Cadence::Fast => self.on_fast_tick(now),
                Cadence::Slow => self.on_slow_tick(),
            }
        }
        fired
    }

    pub fn on_fast_tick(&mut self, now: Instant) {
        self.on_fast_tick_at(now, Utc::now());
    }

    /// One fast step: move every tracked price and index, then write the
    /// new values into every view, then advance the live chart.
    pub fn on_fast_tick_at(&mut self, now: Instant, wall: DateTime<Utc>) {
        let moved = self.store.jitter_entries(self.deltas.as_mut(), wall);
        self.store.jitter_indices(self.deltas.as_mut());

        let ctx = self.bind_context_at(wall);
        let bound = binder::bind_all_cards(&mut self.board, &self.store, &ctx);
        if let Some(symbol) = self.selection.current().map(str::to_string) {
            binder::bind_detail(&mut self.board, &self.store, &symbol, &ctx);
        }
        binder::bind_index_tiles(&mut self.board, &self.store, &ctx);
        binder::bind_portfolio(&mut self.board, &self.store, &self.config.portfolio);

        if let Some(index) = self.store.index(LIVE_INDEX) {
            let label = wall.with_timezone(&Local).format("%H:%M:%S").to_string();
            self.live_chart.update_incremental(index.value, label);
        }
        self.board.live.flash(now);
        tracing::trace!(moved, bound, "fast tick");
    }

    /// Rotate the news strip; fetch fresh headlines when feeds are configured.
    pub fn on_slow_tick(&mut self) {
        self.news.rotate();
        if !self.config.news_sources.is_empty() {
            self.spawn_news();
        }
        tracing::debug!(offset = self.news.offset(), "slow tick");
    }
}
