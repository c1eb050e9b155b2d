mod error;
pub mod simulation;
pub mod strategy;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use strum_macros::Display;

pub use error::SimulationError;
pub use simulation::{
    hand::{low_score, score, Hand, HandOutcome},
    shoe::Shoe,
    strategy::{DealerStrategy, PlayerStrategy},
    Card, Rank, RoundResult, SimulatorEventHandler, Simulator, Suit,
};

pub const CARDS_PER_DECK: usize = 52;

/// The reference cut card sits after 80% of the shoe has been dealt.
pub const DEFAULT_CUT_CARD_PROPORTION: f64 = 0.2;

/// Largest accepted bet. A doubled hand must still fit in a `u32`.
pub const MAX_BET: u32 = u32::MAX / 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub number_of_decks: u8,
    /// Proportion of the shoe left when the cut card comes out.
    pub cut_card_proportion: f64,
    pub shoe_policy: ShoePolicy,
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            number_of_decks: 6,
            cut_card_proportion: DEFAULT_CUT_CARD_PROPORTION,
            shoe_policy: ShoePolicy::FreshPerRound,
        }
    }
}

/// What happens to the shoe between two rounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize_enum_str, Deserialize_enum_str)]
pub enum ShoePolicy {
    /// Every round starts from a full, freshly shuffled shoe.
    FreshPerRound,
    /// The shoe carries over and is only reshuffled once the cut card is reached.
    ReshuffleAtCutoff,
}

#[derive(Clone, Copy, Debug)]
pub struct InitialSituation {
    pub player_cards: (Card, Card),
    pub dealer_up_card: Card,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Decision {
    Hit,
    Stand,
    Double,
    Split,
}
