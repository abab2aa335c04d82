use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CardError;

/// Card rank; 2–10 are numeric, 11–14 are J, Q, K and A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 14;

    pub fn new(value: u8) -> Result<Self, CardError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CardError::InvalidRank(value))
        }
    }

    /// Every rank in ascending order.
    pub fn all() -> impl Iterator<Item = Rank> {
        (Self::MIN..=Self::MAX).map(Rank)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Face label drawn in the card index.
    pub fn label(self) -> &'static str {
        match self.0 {
            2 => "2",
            3 => "3",
            4 => "4",
            5 => "5",
            6 => "6",
            7 => "7",
            8 => "8",
            9 => "9",
            10 => "10",
            11 => "J",
            12 => "Q",
            13 => "K",
            _ => "A",
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = CardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label for a raw rank number, rejecting anything outside 2..=14.
pub fn rank_label(value: u8) -> Result<&'static str, CardError> {
    Rank::new(value).map(Rank::label)
}

/// Output file name for a card: `<suit>_<rank:02>.png`.
pub fn card_file_name(suit: &str, rank: Rank) -> String {
    format!("{}_{:02}.png", suit, rank.value())
}
