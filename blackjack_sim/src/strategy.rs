use crate::{
    simulation::hand::{is_pair, is_soft, score},
    Card, DealerStrategy, Decision, PlayerStrategy, Rank,
};

/// The house policy: hit anything below 17, stand on every 17 including soft ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct DealerHitsBelow17;

impl DealerStrategy for DealerHitsBelow17 {
    fn make_decision(&mut self, cards: &[Card]) -> Decision {
        dealer_decision(cards)
    }
}

fn dealer_decision(cards: &[Card]) -> Decision {
    if score(cards) < 17 {
        Decision::Hit
    } else {
        Decision::Stand
    }
}

/// Plays the player hand with the same policy the dealer follows.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyDealer;

impl PlayerStrategy for CopyDealer {
    fn make_decision(&mut self, cards: &[Card], _: Card) -> Decision {
        dealer_decision(cards)
    }
}

/// (decision on two cards, decision once the hand holds more cards)
type ChartEntry = (Decision, Decision);

/// Chart lookup: pairs first, then soft totals, then hard totals.
/// Columns are the dealer's up card: A, 2, 3, ..., 10.
pub struct BasicStrategy {
    hard_charts: [[ChartEntry; 10]; 10],
    soft_charts: [[ChartEntry; 10]; 8],
    pair_charts: [[bool; 10]; 10],
}

impl BasicStrategy {
    pub fn new() -> BasicStrategy {
        const H: ChartEntry = (Decision::Hit, Decision::Hit);
        const S: ChartEntry = (Decision::Stand, Decision::Stand);
        const DH: ChartEntry = (Decision::Double, Decision::Hit);
        const DS: ChartEntry = (Decision::Double, Decision::Stand);
        const Y: bool = true;
        const N: bool = false;

        BasicStrategy {
            hard_charts: [
                [H, H, H, H, H, H, H, H, H, H], // 8, 8-
                [H, H, DH, DH, DH, DH, H, H, H, H],
                [H, DH, DH, DH, DH, DH, DH, DH, DH, H],
                [DH, DH, DH, DH, DH, DH, DH, DH, DH, DH],
                [H, H, H, S, S, S, H, H, H, H],
                [H, S, S, S, S, S, H, H, H, H],
                [H, S, S, S, S, S, H, H, H, H],
                [H, S, S, S, S, S, H, H, H, H],
                [H, S, S, S, S, S, H, H, H, H],
                [S, S, S, S, S, S, S, S, S, S], // 17, 17+
            ],
            soft_charts: [
                [H, H, H, H, DH, DH, H, H, H, H], // Ace + 2
                [H, H, H, H, DH, DH, H, H, H, H],
                [H, H, H, DH, DH, DH, H, H, H, H],
                [H, H, DH, DH, DH, DH, H, H, H, H],
                [H, H, DH, DH, DH, DH, H, H, H, H],
                [H, DS, DS, DS, DS, DS, S, S, H, H],
                [S, S, DS, DS, DS, DS, S, S, S, S],
                [S, S, S, S, S, S, S, S, S, S], // Ace + 9
            ],
            pair_charts: [
                [Y, Y, Y, Y, Y, Y, Y, Y, Y, Y], // Double Ace
                [N, Y, Y, Y, Y, Y, Y, N, N, N], // Double 2
                [N, Y, Y, Y, Y, Y, Y, N, N, N],
                [N, N, N, N, Y, Y, N, N, N, N],
                [N, N, N, N, N, N, N, N, N, N],
                [N, Y, Y, Y, Y, Y, N, N, N, N],
                [N, Y, Y, Y, Y, Y, Y, N, N, N],
                [Y, Y, Y, Y, Y, Y, Y, Y, Y, Y],
                [N, Y, Y, Y, Y, Y, N, Y, Y, N],
                [N, N, N, N, N, N, N, N, N, N], // Double 10
            ],
        }
    }
}

impl Default for BasicStrategy {
    fn default() -> Self {
        BasicStrategy::new()
    }
}

impl PlayerStrategy for BasicStrategy {
    fn make_decision(&mut self, cards: &[Card], dealer_up_card: Card) -> Decision {
        let col = chart_index(dealer_up_card.rank);

        if is_pair(cards) && self.pair_charts[chart_index(cards[0].rank)][col] {
            return Decision::Split;
        }

        let total = score(cards) as usize;
        let entry = if is_soft(cards) {
            match total {
                21 => (Decision::Stand, Decision::Stand),
                13..=20 => self.soft_charts[total - 13][col],
                _ => (Decision::Hit, Decision::Hit),
            }
        } else {
            self.hard_charts[total.clamp(8, 17) - 8][col]
        };

        if cards.len() == 2 {
            entry.0
        } else {
            entry.1
        }
    }
}

/// Ace first, then 2 to 10. Every ten-valued rank shares the last slot.
fn chart_index(rank: Rank) -> usize {
    (rank.low_value() - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Suit;
    use Rank::*;

    fn decide(hand: &[Rank], dealer_up: Rank) -> Decision {
        let cards: Vec<Card> = hand.iter().map(|&rank| Card::new(rank, Suit::Heart)).collect();
        BasicStrategy::new().make_decision(&cards, Card::new(dealer_up, Suit::Club))
    }

    #[test]
    fn splits_eights_against_six() {
        assert_eq!(decide(&[Eight, Eight], Six), Decision::Split);
        assert_eq!(decide(&[Eight, Eight], Ace), Decision::Split);
        assert_eq!(decide(&[Ace, Ace], King), Decision::Split);
    }

    #[test]
    fn never_splits_tens_or_fives() {
        assert_eq!(decide(&[Ten, Ten], Six), Decision::Stand);
        assert_eq!(decide(&[King, King], Six), Decision::Stand);
        assert_eq!(decide(&[Five, Five], Six), Decision::Double);
    }

    #[test]
    fn unsplit_pair_falls_back_to_totals() {
        assert_eq!(decide(&[Nine, Nine], Seven), Decision::Stand);
        assert_eq!(decide(&[Four, Four], Two), Decision::Hit);
    }

    #[test]
    fn hard_totals() {
        assert_eq!(decide(&[Ten, Six], Ten), Decision::Hit);
        assert_eq!(decide(&[Eight, Four], Four), Decision::Stand);
        assert_eq!(decide(&[Ten, Two], Three), Decision::Hit);
        assert_eq!(decide(&[King, Five], Five), Decision::Stand);
        assert_eq!(decide(&[Six, Five], Ace), Decision::Double);
        assert_eq!(decide(&[Two, Three], Six), Decision::Hit);
        assert_eq!(decide(&[Ten, Nine], Ace), Decision::Stand);
    }

    #[test]
    fn soft_totals() {
        assert_eq!(decide(&[Ace, Seven], Two), Decision::Double);
        assert_eq!(decide(&[Ace, Nine], Ten), Decision::Stand);
        assert_eq!(decide(&[Ace, Seven], Nine), Decision::Hit);
        assert_eq!(decide(&[Ace, Two], Five), Decision::Double);
        assert_eq!(decide(&[Ace, Ten], Six), Decision::Stand);
    }

    #[test]
    fn aces_that_turned_hard_use_hard_chart() {
        assert_eq!(decide(&[Ace, Five, Ace, Ten], Seven), Decision::Stand);
    }

    #[test]
    fn doubles_fall_back_after_two_cards() {
        assert_eq!(decide(&[Two, Four, Five], Six), Decision::Hit);
        assert_eq!(decide(&[Ace, Three, Four], Four), Decision::Stand);
    }

    #[test]
    fn dealer_stands_on_soft_seventeen() {
        let cards = [Card::new(Ace, Suit::Spade), Card::new(Six, Suit::Spade)];
        assert_eq!(DealerHitsBelow17.make_decision(&cards), Decision::Stand);
        let cards = [Card::new(Ten, Suit::Spade), Card::new(Six, Suit::Spade)];
        assert_eq!(DealerHitsBelow17.make_decision(&cards), Decision::Hit);
        assert_eq!(
            CopyDealer.make_decision(&cards, Card::new(Two, Suit::Heart)),
            Decision::Hit
        );
    }
}
