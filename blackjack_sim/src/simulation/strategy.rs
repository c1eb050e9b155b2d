use crate::Decision;

use super::Card;

/// Decides how the player plays a hand. Only the dealer's up card is visible.
///
/// The simulator trusts the answer: `Split` must only come back for a pair, and
/// `Double` only for an untouched two-card hand.
pub trait PlayerStrategy {
    fn make_decision(&mut self, cards: &[Card], dealer_up_card: Card) -> Decision;
}

/// Decides how the dealer plays the dealer's hand. Must answer `Hit` or `Stand`.
pub trait DealerStrategy {
    fn make_decision(&mut self, cards: &[Card]) -> Decision;
}

impl<F> PlayerStrategy for F
where
    F: FnMut(&[Card], Card) -> Decision,
{
    fn make_decision(&mut self, cards: &[Card], dealer_up_card: Card) -> Decision {
        self(cards, dealer_up_card)
    }
}

impl<F> DealerStrategy for F
where
    F: FnMut(&[Card]) -> Decision,
{
    fn make_decision(&mut self, cards: &[Card]) -> Decision {
        self(cards)
    }
}
