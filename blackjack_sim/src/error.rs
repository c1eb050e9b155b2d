use thiserror::Error;

use crate::{
    simulation::{Card, GamePhase, Rank},
    Decision,
};

/// Contract violations that abort a round. None of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("cannot deal from an empty shoe")]
    EmptyShoe,

    #[error("only two cards of the same rank can be split, got {cards:?}")]
    InvalidSplit { cards: Vec<Card> },

    #[error("dealer can only hit or stand, got {0}")]
    InvalidDealerDecision(Decision),

    #[error("a shoe needs at least one deck, got {0}")]
    InvalidNumberOfDecks(u8),

    #[error("bet must be between 1 and {max}, got {0}", max = crate::MAX_BET)]
    InvalidBet(u32),

    #[error("cut card proportion must be in [0, 1), got {0}")]
    InvalidCutCardProportion(f64),

    #[error("not enough cards of rank {0:?} left to stack the shoe")]
    UnavailableCard(Rank),

    #[error("{operation} is only allowed in {expected:?} phase, current phase is {actual:?}")]
    PhaseViolation {
        operation: &'static str,
        expected: GamePhase,
        actual: GamePhase,
    },
}
