use anyhow::Result;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    Positive,
    Neutral,
    Negative,
}

impl Impact {
    pub fn label(&self) -> &'static str {
        match self {
            Impact::Positive => "Positive Impact",
            Impact::Neutral => "Neutral Impact",
            Impact::Negative => "Negative Impact",
        }
    }
}

/// A display-only news line. Never feeds market data.
#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    pub title: String,
    pub summary: String,
    pub impact: Impact,
    pub publisher: String,
    pub published_at: i64, // Unix timestamp, 0 when unknown
}

impl Headline {
    fn canned(title: &str, impact: Impact, summary: &str) -> Self {
        Self {
            title: title.to_string(),
            summary: summary.to_string(),
            impact,
            publisher: "Market Desk".to_string(),
            published_at: 0,
        }
    }
}

/// Headlines used when no RSS source is configured.
pub fn builtin_headlines() -> Vec<Headline> {
    vec![
        Headline::canned(
            "Fed Signals Potential Rate Cut",
            Impact::Positive,
            "Federal Reserve hints at monetary policy changes affecting tech stocks...",
        ),
        Headline::canned(
            "Tech Earnings Season Begins",
            Impact::Neutral,
            "Major tech companies report quarterly earnings with mixed results...",
        ),
        Headline::canned(
            "Oil Prices Surge on Supply Concerns",
            Impact::Negative,
            "Energy sector sees significant swings amid geopolitical tensions...",
        ),
        Headline::canned(
            "Chip Stocks Rally on New Breakthrough",
            Impact::Positive,
            "Semiconductor companies surge following a major product announcement...",
        ),
        Headline::canned(
            "Banking Sector Under Pressure",
            Impact::Negative,
            "Regional banks face headwinds from regulatory changes...",
        ),
        Headline::canned(
            "Crypto Market Shows Volatility",
            Impact::Neutral,
            "Digital assets experience mixed trading amid regulatory uncertainty...",
        ),
    ]
}

/// Extract a short publisher name from the feed URL's domain.
/// e.g. "https://feeds.marketwatch.com/marketwatch/topstories" → "marketwatch"
fn publisher_from_url(url: &str) -> String {
    let host = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
        .split('/')
        .next()
        .unwrap_or(url)
        .trim_start_matches("www.")
        .trim_start_matches("rss.")
        .trim_start_matches("feeds.");

    host.split('.').next().unwrap_or(host).to_string()
}

pub struct NewsClient {
    client: Client,
}

impl NewsClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;
        Ok(Self { client })
    }

    async fn fetch_feed(&self, url: &str) -> Result<Vec<Headline>> {
        let bytes = self.client.get(url).send().await?.bytes().await?;

        let feed = feed_rs::parser::parse(&bytes[..])?;

        let publisher = publisher_from_url(url);

        let items = feed
            .entries
            .into_iter()
            .map(|entry| {
                let title = entry
                    .title
                    .map(|t| t.content)
                    .unwrap_or_else(|| "(no title)".to_string());
                let published_at = entry
                    .published
                    .or(entry.updated)
                    .map(|dt| dt.timestamp())
                    .unwrap_or(0);
                let summary = entry.summary.map(|s| s.content).unwrap_or_default();

                Headline {
                    title,
                    summary,
                    impact: Impact::Neutral,
                    publisher: publisher.clone(),
                    published_at,
                }
            })
            .collect();

        Ok(items)
    }

    /// Fetch every feed concurrently; failed feeds are skipped.
    pub async fn fetch_all(&self, urls: &[String]) -> Result<Vec<Headline>> {
        let futures: Vec<_> = urls.iter().map(|url| self.fetch_feed(url)).collect();
        let results = futures::future::join_all(futures).await;
        let mut all_items: Vec<Headline> = Vec::new();
        for (url, result) in urls.iter().zip(results) {
            match result {
                Ok(items) => all_items.extend(items),
                Err(e) => tracing::warn!(%url, error = %e, "news feed failed"),
            }
        }
        all_items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(all_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publisher_strips_prefixes_and_tld() {
        assert_eq!(
            publisher_from_url("https://feeds.marketwatch.com/marketwatch/topstories"),
            "marketwatch"
        );
        assert_eq!(publisher_from_url("http://www.example.org/rss"), "example");
    }
}
