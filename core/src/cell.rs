use serde::{Deserialize, Serialize};

pub const HIDDEN_SYMBOL: char = '~';
pub const FLAG_SYMBOL: char = '♥';
pub const MARKER_SYMBOL: char = '☺';

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    /// Revealed, showing how many of the neighbors hold a marker.
    Revealed(u8),
    /// End-of-game display of a marker cell, never produced by normal play.
    Marker,
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Hidden => HIDDEN_SYMBOL,
            Self::Flagged => FLAG_SYMBOL,
            Self::Marker => MARKER_SYMBOL,
            Self::Revealed(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            HIDDEN_SYMBOL => Some(Self::Hidden),
            FLAG_SYMBOL => Some(Self::Flagged),
            MARKER_SYMBOL => Some(Self::Marker),
            '0'..='8' => symbol.to_digit(10).map(|count| Self::Revealed(count as u8)),
            _ => None,
        }
    }
}
