use crate::SimulationError;

use super::Card;

const BLACKJACK: u16 = 21;

/// Best total of the cards: aces count 11 until that would bust the hand,
/// then they fall back to 1 one at a time.
pub fn score(cards: &[Card]) -> u16 {
    let mut total: u16 = cards.iter().map(|card| card.blackjack_value() as u16).sum();
    let mut soft_aces = cards.iter().filter(|card| card.is_ace()).count();
    while total > BLACKJACK && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    total
}

/// Total with every ace counted as 1.
pub fn low_score(cards: &[Card]) -> u16 {
    cards.iter().map(|card| card.low_value() as u16).sum()
}

/// True if at least one ace is still counted as 11.
pub fn is_soft(cards: &[Card]) -> bool {
    score(cards) != low_score(cards)
}

pub fn is_bust(cards: &[Card]) -> bool {
    score(cards) > BLACKJACK
}

/// Exactly two cards of the same rank. A Jack and a King are not a pair.
pub fn is_pair(cards: &[Card]) -> bool {
    cards.len() == 2 && cards[0].rank == cards[1].rank
}

/// Cards of one player (or dealer) hand and the money riding on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hand {
    cards: Vec<Card>,
    bet: u32,
    doubled: bool,
}

impl Hand {
    pub fn new() -> Hand {
        Hand::with_bet(0)
    }

    pub fn with_bet(bet: u32) -> Hand {
        Hand {
            cards: Vec::with_capacity(3),
            bet,
            doubled: false,
        }
    }

    pub fn receive_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn double_down(&mut self) {
        self.bet *= 2;
        self.doubled = true;
    }

    /// Splits a pair into two one-card hands, each carrying the original bet.
    pub fn split(self) -> Result<(Hand, Hand), SimulationError> {
        if !self.is_pair() {
            return Err(SimulationError::InvalidSplit { cards: self.cards });
        }
        let mut first = Hand::with_bet(self.bet);
        first.receive_card(self.cards[0]);
        let mut second = Hand::with_bet(self.bet);
        second.receive_card(self.cards[1]);
        Ok((first, second))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn score(&self) -> u16 {
        score(&self.cards)
    }

    pub fn low_score(&self) -> u16 {
        low_score(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        is_bust(&self.cards)
    }

    pub fn is_pair(&self) -> bool {
        is_pair(&self.cards)
    }

    pub fn into_outcome(self) -> HandOutcome {
        HandOutcome {
            total: self.score(),
            cards: self.cards,
            bet: self.bet,
            doubled: self.doubled,
        }
    }
}

/// A player hand that can take no more cards.
#[derive(Debug, Clone, PartialEq)]
pub struct HandOutcome {
    pub cards: Vec<Card>,
    pub total: u16,
    /// Money wagered on this hand, already doubled after a double down.
    pub bet: u32,
    pub doubled: bool,
}

impl HandOutcome {
    pub fn is_bust(&self) -> bool {
        self.total > BLACKJACK
    }
}
