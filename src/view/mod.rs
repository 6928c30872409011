pub mod binder;
mod board;

pub use binder::{BindContext, Thresholds};
pub use board::{
    Board, CardAction, CardArena, CardId, CardNode, DetailPanel, Freshness, IndexTile,
    LiveIndicator, PLACEHOLDER, PortfolioRow, Tone,
};
