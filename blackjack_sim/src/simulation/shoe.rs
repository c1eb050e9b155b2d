use crate::{SimulationError, CARDS_PER_DECK};

use super::{Card, Rank, Suit};

use strum::IntoEnumIterator;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Represents a shoe in the real world. Cards are dealt from the back of `cards`.
/// Cards of finished rounds wait in `discards` until the next shuffle.
#[derive(Debug, Clone)]
pub struct Shoe {
    number_of_decks: u8,
    cut_card_threshold: usize,
    cards: Vec<Card>,
    discards: Vec<Card>,
    rng: SmallRng,
}

impl Shoe {
    /// Creates a shuffled shoe seeded from the OS.
    pub fn new(number_of_decks: u8, cut_card_proportion: f64) -> Result<Shoe, SimulationError> {
        Shoe::with_rng(number_of_decks, cut_card_proportion, SmallRng::from_entropy())
    }

    /// Creates a shuffled shoe whose every shuffle is reproducible from `seed`.
    pub fn with_seed(
        number_of_decks: u8,
        cut_card_proportion: f64,
        seed: u64,
    ) -> Result<Shoe, SimulationError> {
        Shoe::with_rng(
            number_of_decks,
            cut_card_proportion,
            SmallRng::seed_from_u64(seed),
        )
    }

    /// Creates a shoe whose first dealt cards have the given ranks, in order. The
    /// remaining cards are shuffled. Suits of the stacked cards are arbitrary.
    pub fn stacked(
        number_of_decks: u8,
        cut_card_proportion: f64,
        firsts: &[Rank],
        seed: u64,
    ) -> Result<Shoe, SimulationError> {
        let mut shoe = Shoe::with_seed(number_of_decks, cut_card_proportion, seed)?;
        let mut stacked = Vec::with_capacity(firsts.len());
        for &rank in firsts {
            let position = shoe
                .cards
                .iter()
                .position(|card| card.rank == rank)
                .ok_or(SimulationError::UnavailableCard(rank))?;
            stacked.push(shoe.cards.remove(position));
        }
        shoe.cards.extend(stacked.into_iter().rev());
        Ok(shoe)
    }

    fn with_rng(
        number_of_decks: u8,
        cut_card_proportion: f64,
        rng: SmallRng,
    ) -> Result<Shoe, SimulationError> {
        if number_of_decks == 0 {
            return Err(SimulationError::InvalidNumberOfDecks(number_of_decks));
        }
        if !(0.0..1.0).contains(&cut_card_proportion) {
            return Err(SimulationError::InvalidCutCardProportion(cut_card_proportion));
        }
        let total = number_of_decks as usize * CARDS_PER_DECK;
        let mut shoe = Shoe {
            number_of_decks,
            cut_card_threshold: (cut_card_proportion * total as f64) as usize,
            cards: Vec::with_capacity(total),
            discards: Vec::with_capacity(total),
            rng,
        };
        shoe.shuffle();
        Ok(shoe)
    }

    /// Returns the dealt cards back into the shoe and shuffles.
    pub fn shuffle(&mut self) {
        self.cards.clear();
        self.discards.clear();
        for _ in 0..self.number_of_decks {
            for suit in Suit::iter() {
                for rank in Rank::iter() {
                    self.cards.push(Card { rank, suit });
                }
            }
        }
        self.cards.shuffle(&mut self.rng);
    }

    /// Deals the next card. An empty shoe means the caller sized it wrong.
    pub fn deal_card(&mut self) -> Result<Card, SimulationError> {
        self.cards.pop().ok_or(SimulationError::EmptyShoe)
    }

    /// Puts the cards of a finished hand in the discard tray.
    pub fn discard(&mut self, cards: &[Card]) {
        self.discards.extend_from_slice(cards);
    }

    /// Shuffles the discard tray back into the shoe, leaving the cards still on
    /// the table out. Returns false if there was nothing to put back.
    pub fn reshuffle_discards(&mut self) -> bool {
        if self.discards.is_empty() {
            return false;
        }
        self.cards.append(&mut self.discards);
        self.cards.shuffle(&mut self.rng);
        true
    }

    /// Checks if the cut card has been reached.
    pub fn reached_cut_card(&self) -> bool {
        self.cards.len() <= self.cut_card_threshold
    }

    pub fn cut_card_threshold(&self) -> usize {
        self.cut_card_threshold
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn discarded(&self) -> usize {
        self.discards.len()
    }

    pub fn total(&self) -> usize {
        self.number_of_decks as usize * CARDS_PER_DECK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_CUT_CARD_PROPORTION;

    fn number_of_cards_is_correct(shoe: &Shoe) -> bool {
        let mut counts = [0usize; CARDS_PER_DECK];
        for card in &shoe.cards {
            counts[card.index()] += 1;
        }
        counts
            .iter()
            .all(|&count| count == shoe.number_of_decks as usize)
    }

    #[test]
    fn new_shoe_holds_every_card_of_every_deck() {
        for number_of_decks in 1..=8 {
            let shoe = Shoe::new(number_of_decks, DEFAULT_CUT_CARD_PROPORTION).unwrap();
            assert_eq!(shoe.remaining(), 52 * number_of_decks as usize);
            assert!(number_of_cards_is_correct(&shoe));
        }
    }

    #[test]
    fn zero_decks_is_rejected() {
        assert_eq!(
            Shoe::new(0, DEFAULT_CUT_CARD_PROPORTION).unwrap_err(),
            SimulationError::InvalidNumberOfDecks(0)
        );
    }

    #[test]
    fn drawing_past_the_last_card_fails() {
        let number_of_decks = 2;
        let mut shoe = Shoe::with_seed(number_of_decks, DEFAULT_CUT_CARD_PROPORTION, 5).unwrap();
        for k in 1..=104 {
            assert!(shoe.deal_card().is_ok());
            assert_eq!(shoe.remaining(), 104 - k);
        }
        assert_eq!(shoe.deal_card(), Err(SimulationError::EmptyShoe));
    }

    #[test]
    fn cut_card_threshold_rounds_down() {
        let shoe = Shoe::new(1, DEFAULT_CUT_CARD_PROPORTION).unwrap();
        assert_eq!(shoe.cut_card_threshold(), 10);
        let shoe = Shoe::new(6, DEFAULT_CUT_CARD_PROPORTION).unwrap();
        assert_eq!(shoe.cut_card_threshold(), 62);
    }

    #[test]
    fn cut_card_is_reached_at_threshold() {
        let mut shoe = Shoe::with_seed(1, DEFAULT_CUT_CARD_PROPORTION, 9).unwrap();
        for _ in 0..41 {
            _ = shoe.deal_card();
        }
        assert!(!shoe.reached_cut_card());
        _ = shoe.deal_card();
        assert!(shoe.reached_cut_card());
        shoe.shuffle();
        assert!(!shoe.reached_cut_card());
        assert!(number_of_cards_is_correct(&shoe));
    }

    #[test]
    fn same_seed_deals_same_sequence() {
        let mut a = Shoe::with_seed(6, DEFAULT_CUT_CARD_PROPORTION, 42).unwrap();
        let mut b = Shoe::with_seed(6, DEFAULT_CUT_CARD_PROPORTION, 42).unwrap();
        for _ in 0..2 {
            for _ in 0..312 {
                assert_eq!(a.deal_card(), b.deal_card());
            }
            a.shuffle();
            b.shuffle();
        }
    }

    #[test]
    fn stacked_shoe_deals_firsts_in_order() {
        let firsts = [Rank::Ace, Rank::Two, Rank::Six, Rank::Six, Rank::Nine];
        let mut shoe = Shoe::stacked(1, DEFAULT_CUT_CARD_PROPORTION, &firsts, 3).unwrap();
        assert!(number_of_cards_is_correct(&shoe));
        for rank in firsts {
            assert_eq!(shoe.deal_card().unwrap().rank, rank);
        }
    }

    #[test]
    fn stacking_more_cards_than_the_shoe_holds_fails() {
        let firsts = [Rank::Six; 5];
        assert_eq!(
            Shoe::stacked(1, DEFAULT_CUT_CARD_PROPORTION, &firsts, 3).unwrap_err(),
            SimulationError::UnavailableCard(Rank::Six)
        );
        assert!(Shoe::stacked(2, DEFAULT_CUT_CARD_PROPORTION, &firsts, 3).is_ok());
    }

    #[test]
    fn cut_card_proportion_must_be_a_fraction_of_the_shoe() {
        for cut_card_proportion in [-0.1, 1.0, 1.5, f64::NAN] {
            assert!(matches!(
                Shoe::new(6, cut_card_proportion),
                Err(SimulationError::InvalidCutCardProportion(_))
            ));
        }
        assert_eq!(Shoe::new(1, 0.0).unwrap().cut_card_threshold(), 0);
        assert_eq!(Shoe::new(1, 0.99).unwrap().cut_card_threshold(), 51);
    }

    #[test]
    fn discards_go_back_only_when_reshuffled() {
        let mut shoe = Shoe::with_seed(1, DEFAULT_CUT_CARD_PROPORTION, 11).unwrap();
        assert!(!shoe.reshuffle_discards());

        let finished: Vec<Card> = (0..30).map(|_| shoe.deal_card().unwrap()).collect();
        let on_table: Vec<Card> = (0..22).map(|_| shoe.deal_card().unwrap()).collect();
        shoe.discard(&finished);
        assert_eq!(shoe.remaining(), 0);
        assert_eq!(shoe.discarded(), 30);

        assert!(shoe.reshuffle_discards());
        assert_eq!(shoe.remaining(), 30);
        assert_eq!(shoe.discarded(), 0);
        let mut redealt: Vec<Card> = (0..30).map(|_| shoe.deal_card().unwrap()).collect();
        assert!(redealt.iter().all(|card| !on_table.contains(card)));
        redealt.sort_by_key(Card::index);
        let mut finished = finished;
        finished.sort_by_key(Card::index);
        assert_eq!(redealt, finished);

        shoe.discard(&on_table);
        shoe.shuffle();
        assert_eq!(shoe.discarded(), 0);
        assert!(number_of_cards_is_correct(&shoe));
    }
}
