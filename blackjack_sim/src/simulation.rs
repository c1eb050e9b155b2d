pub mod hand;
pub mod shoe;
pub mod strategy;

use crate::{Decision, InitialSituation, Rule, ShoePolicy, SimulationError, MAX_BET};
use blackjack_sim_macros::allowed_phase;
use log::{debug, trace};
use strum_macros::EnumIter;

use self::{
    hand::{Hand, HandOutcome},
    shoe::Shoe,
    strategy::{DealerStrategy, PlayerStrategy},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Suit {
    Diamond = 0,
    Club,
    Heart,
    Spade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Position in rank order: Two is 2, Ace is 14.
    pub fn rank_value(&self) -> u8 {
        *self as u8
    }

    pub fn blackjack_value(&self) -> u8 {
        match self {
            Rank::Ace => 11,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            _ => self.rank_value(),
        }
    }

    pub fn low_value(&self) -> u8 {
        match self {
            Rank::Ace => 1,
            _ => self.blackjack_value(),
        }
    }
}

/// Represents a card in the real world with a suit and a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    pub fn blackjack_value(&self) -> u8 {
        self.rank.blackjack_value()
    }

    pub fn low_value(&self) -> u8 {
        self.rank.low_value()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }

    /// Position of the card in a single ordered deck, in `0..52`.
    pub fn index(&self) -> usize {
        self.suit as usize * 13 + (self.rank.rank_value() - 2) as usize
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suit = match self.suit {
            Suit::Diamond => 'D',
            Suit::Club => 'C',
            Suit::Heart => 'H',
            Suit::Spade => 'S',
        };
        let rank = match self.rank {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };
        write!(f, "{}{}", suit, rank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    PlaceBets,
    DealInitialCards,
    PlayerPlay,
    DealerPlay,
    Summary,
    StartNewShoe,
}

/// How a single player hand ended against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Win,
    Push,
    Loss,
}

impl Settlement {
    /// Settles a hand that did not bust against the dealer's final total.
    pub fn between(player_total: u16, dealer_total: u16) -> Settlement {
        if dealer_total > 21 || player_total > dealer_total {
            Settlement::Win
        } else if player_total == dealer_total {
            Settlement::Push
        } else {
            Settlement::Loss
        }
    }

    /// Money handed back to the player for a hand wagering `bet`.
    pub fn returned_money(&self, bet: u32) -> u64 {
        match self {
            Settlement::Win => bet as u64 * 2,
            Settlement::Push => bet as u64,
            Settlement::Loss => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    /// Positive when the player gained money this round.
    pub net: i64,
    /// Sum of every bet placed, doubles and splits included.
    pub wagered: u64,
    pub hands_won: u32,
    pub hands_pushed: u32,
    pub hands_lost: u32,
    /// None when every player hand busted and the dealer never played.
    pub dealer_total: Option<u16>,
    pub outcomes: Vec<HandOutcome>,
}

/// Simulates one player against the dealer, one round at a time. The simulator
/// owns its shoe for its whole life.
pub struct Simulator<P: PlayerStrategy, D: DealerStrategy> {
    shoe_policy: ShoePolicy,
    player_strategy: P,
    dealer_strategy: D,

    // Game state
    current_game_phase: GamePhase,
    shoe: Shoe,
    player_hand: Hand,
    dealer_hand: Hand,
    outcomes: Vec<HandOutcome>,
    dealer_total: Option<u16>,
}

impl<P: PlayerStrategy, D: DealerStrategy> Simulator<P, D> {
    pub fn new(rule: &Rule, player_strategy: P, dealer_strategy: D) -> Result<Self, SimulationError> {
        let shoe = Shoe::new(rule.number_of_decks, rule.cut_card_proportion)?;
        Ok(Self::with_shoe(shoe, rule.shoe_policy, player_strategy, dealer_strategy))
    }

    /// Same as `new`, but every shuffle of the shoe is reproducible from `seed`.
    pub fn with_seed(
        rule: &Rule,
        seed: u64,
        player_strategy: P,
        dealer_strategy: D,
    ) -> Result<Self, SimulationError> {
        let shoe = Shoe::with_seed(rule.number_of_decks, rule.cut_card_proportion, seed)?;
        Ok(Self::with_shoe(shoe, rule.shoe_policy, player_strategy, dealer_strategy))
    }

    pub fn with_shoe(
        shoe: Shoe,
        shoe_policy: ShoePolicy,
        player_strategy: P,
        dealer_strategy: D,
    ) -> Self {
        Self {
            shoe_policy,
            player_strategy,
            dealer_strategy,
            current_game_phase: GamePhase::PlaceBets,
            shoe,
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
            outcomes: Vec::new(),
            dealer_total: None,
        }
    }

    /// Plays a whole round with a fixed bet. Can be called at PlaceBets phase.
    ///
    /// A round that fails leaves the simulator in the phase it failed in, so
    /// every later call reports `PhaseViolation` until `reset` is called.
    pub fn play_round(&mut self, bet: u32) -> Result<RoundResult, SimulationError> {
        self.play_round_with_handler(bet, &mut ())
    }

    /// Plays a whole round with a fixed bet, reporting every event to `handler`.
    /// Can be called at PlaceBets phase.
    pub fn play_round_with_handler<H: SimulatorEventHandler>(
        &mut self,
        bet: u32,
        handler: &mut H,
    ) -> Result<RoundResult, SimulationError> {
        self.place_bet(bet)?;

        let initial_situation = self.deal_initial_cards()?;
        handler.on_deal_cards(&initial_situation);

        self.play_player_hands(handler)?;
        if self.current_game_phase == GamePhase::DealerPlay {
            self.dealer_plays(handler)?;
        } else {
            handler.on_game_early_end();
        }

        let result = self.summary()?;
        handler.on_summary_game(&result);

        self.start_new_shoe_if_necessary()?;
        Ok(result)
    }

    /// Can be called at PlaceBets phase. The bet must be in `1..=MAX_BET`.
    #[allowed_phase(PlaceBets)]
    pub fn place_bet(&mut self, bet: u32) -> Result<(), SimulationError> {
        if bet == 0 || bet > MAX_BET {
            return Err(SimulationError::InvalidBet(bet));
        }
        self.player_hand = Hand::with_bet(bet);
        self.dealer_hand = Hand::new();
        self.outcomes.clear();
        self.dealer_total = None;
        self.current_game_phase = GamePhase::DealInitialCards;
        Ok(())
    }

    /// Can be called at DealInitialCards phase.
    /// Deals the player, the dealer's up card, the player again, then the hole card.
    #[allowed_phase(DealInitialCards)]
    pub fn deal_initial_cards(&mut self) -> Result<InitialSituation, SimulationError> {
        let player_first = self.draw_card()?;
        let dealer_up_card = self.draw_card()?;
        let player_second = self.draw_card()?;
        let dealer_hole_card = self.draw_card()?;

        self.player_hand.receive_card(player_first);
        self.player_hand.receive_card(player_second);
        self.dealer_hand.receive_card(dealer_up_card);
        self.dealer_hand.receive_card(dealer_hole_card);
        debug!(
            "dealt {} {} against dealer {}",
            player_first, player_second, dealer_up_card
        );

        self.current_game_phase = GamePhase::PlayerPlay;
        Ok(InitialSituation {
            player_cards: (player_first, player_second),
            dealer_up_card,
        })
    }

    /// Can be called at PlayerPlay phase.
    /// Plays the player hand, and every hand split from it, to the end.
    /// The dealer phase is skipped when every resulting hand busted.
    #[allowed_phase(PlayerPlay)]
    pub fn play_player_hands<H: SimulatorEventHandler>(
        &mut self,
        handler: &mut H,
    ) -> Result<&[HandOutcome], SimulationError> {
        let hand = std::mem::take(&mut self.player_hand);
        let dealer_up_card = self.dealer_hand.cards()[0];
        self.outcomes = self.play_player_hand(hand, dealer_up_card, handler)?;

        self.current_game_phase = if self.outcomes.iter().all(HandOutcome::is_bust) {
            debug!("every player hand busted, dealer does not play");
            GamePhase::Summary
        } else {
            GamePhase::DealerPlay
        };
        Ok(&self.outcomes)
    }

    /// Can be called at DealerPlay phase.
    /// Returns the dealer's final total.
    #[allowed_phase(DealerPlay)]
    pub fn dealer_plays<H: SimulatorEventHandler>(
        &mut self,
        handler: &mut H,
    ) -> Result<u16, SimulationError> {
        loop {
            let decision = self.dealer_strategy.make_decision(self.dealer_hand.cards());
            trace!("dealer {:?}: {}", self.dealer_hand.cards(), decision);
            handler.on_dealer_decision(decision, self.dealer_hand.cards());
            match decision {
                Decision::Hit => {
                    let card = self.draw_card()?;
                    self.dealer_hand.receive_card(card);
                }
                Decision::Stand => break,
                _ => return Err(SimulationError::InvalidDealerDecision(decision)),
            }
        }

        let dealer_total = self.dealer_hand.score();
        debug!("dealer stands on {}", dealer_total);
        self.dealer_total = Some(dealer_total);
        self.current_game_phase = GamePhase::Summary;
        Ok(dealer_total)
    }

    /// Can be called at Summary phase.
    /// Settles every player hand. A busted hand is lost whatever the dealer does.
    #[allowed_phase(Summary)]
    pub fn summary(&mut self) -> Result<RoundResult, SimulationError> {
        let outcomes = std::mem::take(&mut self.outcomes);
        for outcome in &outcomes {
            self.shoe.discard(&outcome.cards);
        }
        self.shoe.discard(self.dealer_hand.cards());

        let mut wagered = 0;
        let mut returned_money = 0;
        let (mut hands_won, mut hands_pushed, mut hands_lost) = (0, 0, 0);

        for outcome in &outcomes {
            wagered += outcome.bet as u64;
            let settlement = match self.dealer_total {
                Some(dealer_total) if !outcome.is_bust() => {
                    Settlement::between(outcome.total, dealer_total)
                }
                _ => Settlement::Loss,
            };
            match settlement {
                Settlement::Win => hands_won += 1,
                Settlement::Push => hands_pushed += 1,
                Settlement::Loss => hands_lost += 1,
            }
            returned_money += settlement.returned_money(outcome.bet);
        }

        let net = returned_money as i64 - wagered as i64;
        debug!("round settled: wagered {}, net {}", wagered, net);
        self.current_game_phase = GamePhase::StartNewShoe;
        Ok(RoundResult {
            net,
            wagered,
            hands_won,
            hands_pushed,
            hands_lost,
            dealer_total: self.dealer_total,
            outcomes,
        })
    }

    /// Can be called at StartNewShoe phase.
    /// Puts every card back into the shoe if the shoe policy asks for it.
    #[allowed_phase(StartNewShoe)]
    pub fn start_new_shoe_if_necessary(&mut self) -> Result<(), SimulationError> {
        let reshuffle = match self.shoe_policy {
            ShoePolicy::FreshPerRound => true,
            ShoePolicy::ReshuffleAtCutoff => self.shoe.reached_cut_card(),
        };
        if reshuffle {
            trace!("reshuffling with {} cards left", self.shoe.remaining());
            self.shoe.shuffle();
        }
        self.current_game_phase = GamePhase::PlaceBets;
        Ok(())
    }

    /// Abandons the current round, if any, and starts over at PlaceBets with a
    /// full, freshly shuffled shoe.
    pub fn reset(&mut self) {
        self.shoe.shuffle();
        self.player_hand = Hand::new();
        self.dealer_hand = Hand::new();
        self.outcomes.clear();
        self.dealer_total = None;
        self.current_game_phase = GamePhase::PlaceBets;
    }

    pub fn current_game_phase(&self) -> GamePhase {
        self.current_game_phase
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn dealer_cards(&self) -> &[Card] {
        self.dealer_hand.cards()
    }

    fn play_player_hand<H: SimulatorEventHandler>(
        &mut self,
        mut hand: Hand,
        dealer_up_card: Card,
        handler: &mut H,
    ) -> Result<Vec<HandOutcome>, SimulationError> {
        loop {
            let decision = self
                .player_strategy
                .make_decision(hand.cards(), dealer_up_card);
            trace!("player {:?}: {}", hand.cards(), decision);
            handler.on_make_decision(decision, hand.cards());

            match decision {
                Decision::Hit => {
                    let card = self.draw_card()?;
                    hand.receive_card(card);
                    if hand.is_bust() {
                        return Ok(vec![self.finish_hand(hand, handler)]);
                    }
                }
                Decision::Stand => return Ok(vec![self.finish_hand(hand, handler)]),
                Decision::Double => {
                    hand.double_down();
                    let card = self.draw_card()?;
                    hand.receive_card(card);
                    return Ok(vec![self.finish_hand(hand, handler)]);
                }
                Decision::Split => {
                    let (mut first, mut second) = hand.split()?;
                    handler.on_split(&first, &second);

                    let card = self.draw_card()?;
                    first.receive_card(card);
                    let mut outcomes = self.play_player_hand(first, dealer_up_card, handler)?;

                    let card = self.draw_card()?;
                    second.receive_card(card);
                    outcomes.extend(self.play_player_hand(second, dealer_up_card, handler)?);
                    return Ok(outcomes);
                }
            }
        }
    }

    /// Under `ReshuffleAtCutoff` a shoe that runs dry mid-round gets the
    /// discards of earlier rounds back, like a dealer would do at the table.
    fn draw_card(&mut self) -> Result<Card, SimulationError> {
        if self.shoe.remaining() == 0
            && self.shoe_policy == ShoePolicy::ReshuffleAtCutoff
            && self.shoe.reshuffle_discards()
        {
            debug!("shoe ran out mid-round, reshuffling {} cards", self.shoe.remaining());
        }
        self.shoe.deal_card()
    }

    fn finish_hand<H: SimulatorEventHandler>(&self, hand: Hand, handler: &mut H) -> HandOutcome {
        let outcome = hand.into_outcome();
        handler.on_hand_finished(&outcome);
        outcome
    }
}

/// Receives the events of rounds played by `Simulator::play_round_with_handler`.
/// Every method does nothing by default.
pub trait SimulatorEventHandler {
    fn on_deal_cards(&mut self, _initial_situation: &InitialSituation) {}
    fn on_make_decision(&mut self, _decision: Decision, _cards: &[Card]) {}
    fn on_split(&mut self, _first: &Hand, _second: &Hand) {}
    fn on_hand_finished(&mut self, _outcome: &HandOutcome) {}
    fn on_dealer_decision(&mut self, _decision: Decision, _cards: &[Card]) {}
    fn on_game_early_end(&mut self) {}
    fn on_summary_game(&mut self, _result: &RoundResult) {}
}

impl SimulatorEventHandler for () {}
