use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    Positive,
    Negative,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Freshness {
    /// Nothing written yet.
    #[default]
    Pending,
    Fresh,
    Stale,
    Unavailable,
}

/// What activating a card does. Each card carries exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Select(String),
}

/// Handle to a card. Invalidated wholesale when the arena is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardNode {
    pub symbol: String,
    pub price_text: String,
    pub change_text: String,
    pub tone: Tone,
    pub last_text: String,
    pub freshness: Freshness,
    pub highlighted: bool,
    action: CardAction,
}

impl CardNode {
    fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            price_text: PLACEHOLDER.to_string(),
            change_text: PLACEHOLDER.to_string(),
            tone: Tone::Neutral,
            last_text: PLACEHOLDER.to_string(),
            freshness: Freshness::Pending,
            highlighted: false,
            action: CardAction::Select(symbol.to_string()),
        }
    }

    pub fn action(&self) -> &CardAction {
        &self.action
    }
}

/// Watchlist cards in display order, addressable by id or by symbol.
#[derive(Debug, Default)]
pub struct CardArena {
    generation: u32,
    nodes: Vec<CardNode>,
    by_symbol: HashMap<String, u32>,
}

impl CardArena {
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.by_symbol.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Append a card; a symbol already present keeps its existing card.
    pub fn create(&mut self, symbol: &str) -> CardId {
        if let Some(id) = self.id_of(symbol) {
            return id;
        }
        let index = self.nodes.len() as u32;
        self.nodes.push(CardNode::new(symbol));
        self.by_symbol.insert(symbol.to_string(), index);
        CardId {
            index,
            generation: self.generation,
        }
    }

    pub fn id_of(&self, symbol: &str) -> Option<CardId> {
        self.by_symbol.get(symbol).map(|&index| CardId {
            index,
            generation: self.generation,
        })
    }

    pub fn get(&self, id: CardId) -> Option<&CardNode> {
        if id.generation != self.generation {
            return None;
        }
        self.nodes.get(id.index as usize)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut CardNode> {
        if id.generation != self.generation {
            return None;
        }
        self.nodes.get_mut(id.index as usize)
    }

    pub fn by_symbol(&self, symbol: &str) -> Option<&CardNode> {
        self.id_of(symbol).and_then(|id| self.get(id))
    }

    pub fn by_symbol_mut(&mut self, symbol: &str) -> Option<&mut CardNode> {
        let id = self.id_of(symbol)?;
        self.get_mut(id)
    }

    /// Card at a display position.
    pub fn at(&self, position: usize) -> Option<(CardId, &CardNode)> {
        self.nodes.get(position).map(|node| {
            (
                CardId {
                    index: position as u32,
                    generation: self.generation,
                },
                node,
            )
        })
    }

    /// The card's action, or `None` for an id from a previous generation.
    pub fn activate(&self, id: CardId) -> Option<CardAction> {
        self.get(id).map(|node| node.action.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn position_of(&self, symbol: &str) -> Option<usize> {
        self.by_symbol.get(symbol).map(|&i| i as usize)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    pub symbol: Option<String>,
    pub price_text: String,
    pub change_text: String,
    pub tone: Tone,
    pub company: String,
    pub sector: String,
    pub market_cap: String,
    pub volume: String,
    pub pe_text: String,
    pub last_text: String,
    pub freshness: Freshness,
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self {
            symbol: None,
            price_text: PLACEHOLDER.to_string(),
            change_text: PLACEHOLDER.to_string(),
            tone: Tone::Neutral,
            company: String::new(),
            sector: String::new(),
            market_cap: PLACEHOLDER.to_string(),
            volume: PLACEHOLDER.to_string(),
            pe_text: PLACEHOLDER.to_string(),
            last_text: PLACEHOLDER.to_string(),
            freshness: Freshness::Pending,
        }
    }
}

impl DetailPanel {
    /// Point the panel at a new symbol with every value reset.
    pub fn retarget(&mut self, symbol: &str) {
        *self = DetailPanel {
            symbol: Some(symbol.to_string()),
            ..DetailPanel::default()
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexTile {
    pub name: String,
    pub value_text: String,
    pub change_text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioRow {
    pub symbol: String,
    pub shares: u32,
    pub gain_text: String,
    pub tone: Tone,
}

/// "LIVE" marker that flashes briefly on each fast tick.
#[derive(Debug, Default)]
pub struct LiveIndicator {
    flash_until: Option<Instant>,
}

impl LiveIndicator {
    pub const FLASH: Duration = Duration::from_millis(200);

    pub fn flash(&mut self, now: Instant) {
        self.flash_until = Some(now + Self::FLASH);
    }

    pub fn is_flashing(&self, now: Instant) -> bool {
        self.flash_until.is_some_and(|until| now < until)
    }
}

/// Retained view state. Binders write it, the terminal renderer reads it.
#[derive(Debug, Default)]
pub struct Board {
    pub cards: CardArena,
    pub detail: DetailPanel,
    pub indices: Vec<IndexTile>,
    pub portfolio: Vec<PortfolioRow>,
    pub live: LiveIndicator,
}
