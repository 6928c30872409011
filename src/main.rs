use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tickerboard::api::{MarketFeed, NewsClient, RemoteQuoteClient, SimulatedFeed};
use tickerboard::app::{App, Completion, InputMode};
use tickerboard::config::{Config, FeedMode};
use tickerboard::market::RandomWalk;
use tickerboard::{logging, ui};
use tokio::sync::mpsc::UnboundedReceiver;

const MAX_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FeedArg {
    Simulated,
    Remote,
}

impl From<FeedArg> for FeedMode {
    fn from(arg: FeedArg) -> Self {
        match arg {
            FeedArg::Simulated => FeedMode::Simulated,
            FeedArg::Remote => FeedMode::Remote,
        }
    }
}

#[derive(Parser)]
#[command(name = "tickerboard")]
#[command(about = "Terminal live-market dashboard", long_about = None)]
struct Cli {
    /// Backend base URL, e.g. http://127.0.0.1:5000
    #[arg(long)]
    base_url: Option<String>,

    /// Data source for quotes, history and forecasts
    #[arg(long, value_enum)]
    feed: Option<FeedArg>,

    /// Fast refresh interval in milliseconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Seed for the simulated random walk
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for log files
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = match &cli.log_dir {
        Some(dir) => dir.clone(),
        None => logging::default_log_dir()?,
    };
    let _log_guard = logging::init(&log_dir)?;

    let mut config = Config::load()?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    if let Some(feed) = cli.feed {
        config.feed = feed.into();
    }
    if let Some(ms) = cli.interval {
        config.fast_interval_ms = ms.max(1);
    }

    let remote = Arc::new(RemoteQuoteClient::new(&config.base_url)?);
    let feed: Arc<dyn MarketFeed> = match config.feed {
        FeedMode::Simulated => Arc::new(SimulatedFeed::new(cli.seed)),
        FeedMode::Remote => remote.clone(),
    };
    tracing::info!(feed = feed.name(), base_url = %config.base_url, "starting");

    let (app, mut rx) = App::with_feed(config, feed, remote, Box::new(RandomWalk::new(cli.seed)));
    let mut app = app.with_persistence().with_news_client(NewsClient::new()?);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start(Instant::now());
    let result = run_app(&mut terminal, &mut app, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "dashboard exited with error");
        eprintln!("Error: {}", e);
    }
    app.scheduler.stop();

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: &mut UnboundedReceiver<Completion>,
) -> Result<()> {
    loop {
        app.drain(rx);
        let now = Instant::now();
        app.tick(now);

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Wake for the next tick, but keep the clock and flash smooth.
        let timeout = app
            .scheduler
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(MAX_POLL)
            .min(MAX_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if !handle_key(app, key) {
                    return Ok(());
                }
            }
        }
        tokio::task::yield_now().await;
    }
}

/// Returns false when the user asked to quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('?') => app.show_help(),
            KeyCode::Char('w') => app.start_watchlist_edit(),
            KeyCode::Char('/') => app.start_analyze(),
            KeyCode::Char('f') => app.start_forecast(),
            KeyCode::Char('g') => app.start_glossary(),
            KeyCode::Char('c') => app.start_chat(),
            KeyCode::Char('a') => app.start_portfolio_add(),
            KeyCode::Char('d') => {
                app.remove_selected_holding();
            }
            KeyCode::Char('r') => {
                app.refresh_all();
            }
            KeyCode::Up | KeyCode::Char('k') => app.move_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.move_next(),
            KeyCode::Enter => {
                app.activate_cursor();
            }
            _ => {}
        },
        InputMode::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?')) {
                app.close_help();
            }
        }
        mode => match key.code {
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => {
                app.input_buffer.pop();
            }
            KeyCode::Enter => match mode {
                InputMode::Watchlist => app.confirm_watchlist_edit(),
                InputMode::Analyze => app.confirm_analyze(),
                InputMode::Forecast => app.confirm_forecast(),
                InputMode::Glossary => app.confirm_glossary(),
                InputMode::Chat => {
                    app.submit_chat();
                }
                InputMode::PortfolioSymbol => app.confirm_portfolio_symbol(),
                InputMode::PortfolioShares => app.confirm_portfolio_shares(),
                InputMode::Normal | InputMode::Help => {}
            },
            KeyCode::Char(c) => {
                if accepts(mode, c) {
                    app.input_buffer.push(c);
                }
            }
            _ => {}
        },
    }
    true
}

fn accepts(mode: InputMode, c: char) -> bool {
    match mode {
        InputMode::Watchlist => c.is_alphanumeric() || matches!(c, ',' | ' ' | '.' | '-'),
        InputMode::Analyze | InputMode::PortfolioSymbol => {
            c.is_alphanumeric() || matches!(c, '.' | '-')
        }
        InputMode::Forecast | InputMode::PortfolioShares => c.is_ascii_digit() || c == '-',
        InputMode::Glossary | InputMode::Chat => !c.is_control(),
        InputMode::Normal | InputMode::Help => false,
    }
}
