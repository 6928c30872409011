use super::{App, Completion};
use crate::api::{Headline, builtin_headlines};
use std::sync::Arc;

/// Rotating window over a headline set.
#[derive(Debug, Clone)]
pub struct NewsStrip {
    items: Vec<Headline>,
    offset: usize,
    width: usize,
}

impl Default for NewsStrip {
    fn default() -> Self {
        Self::new(builtin_headlines(), Self::WIDTH)
    }
}

impl NewsStrip {
    pub const WIDTH: usize = 3;

    pub fn new(items: Vec<Headline>, width: usize) -> Self {
        Self {
            items,
            offset: 0,
            width: width.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Headlines currently shown, wrapping past the end.
    pub fn visible(&self) -> Vec<&Headline> {
        let n = self.items.len();
        (0..self.width.min(n))
            .map(|i| &self.items[(self.offset + i) % n])
            .collect()
    }

    /// Advance the window by its width.
    pub fn rotate(&mut self) {
        if !self.items.is_empty() {
            self.offset = (self.offset + self.width) % self.items.len();
        }
    }

    /// Swap in a new set, starting again from the top. An empty set is
    /// ignored so the strip never goes blank.
    pub fn replace(&mut self, items: Vec<Headline>) -> bool {
        if items.is_empty() {
            return false;
        }
        self.items = items;
        self.offset = 0;
        true
    }
}

impl App {
    pub(crate) fn spawn_news(&self) {
        let Some(client) = self.news_client.as_ref().map(Arc::clone) else {
            return;
        };
        let urls = self.config.news_sources.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_all(&urls).await.map_err(|e| e.to_string());
            let _ = tx.send(Completion::News { result });
        });
    }

    pub(crate) fn apply_news(&mut self, result: Result<Vec<Headline>, String>) {
        match result {
            Ok(items) => {
                let count = items.len();
                if self.news.replace(items) {
                    tracing::info!(count, "headlines refreshed");
                }
            }
            Err(e) => tracing::warn!(error = %e, "headline refresh failed"),
        }
    }
}
