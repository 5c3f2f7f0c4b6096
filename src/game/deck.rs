//! Draw pile primitives
//!
//! There is no separate discard pile: the active card recycles to the back of
//! the draw pile at end of turn, and burned cards leave the game for good.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{AgentType, Card};
use crate::game::constants::DECK_SIZE;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deck {
    pub draw_pile: Vec<Card>,
}

impl Deck {
    /// Fresh deck in build order: all Scout cards, then Sniper, then Sergeant.
    pub fn starting() -> Deck {
        let mut draw_pile = Vec::with_capacity(DECK_SIZE);
        for kind in AgentType::ALL {
            for _ in 0..kind.starting_cards() {
                draw_pile.push(Card::new(kind));
            }
        }
        Deck { draw_pile }
    }

    /// Uniform Fisher-Yates shuffle of the draw pile.
    pub fn shuffle(&mut self, rng: &mut ChaCha8Rng) {
        self.draw_pile.shuffle(rng);
    }

    /// Remove and return the front card, if any.
    pub fn draw(&mut self) -> Option<Card> {
        if self.draw_pile.is_empty() {
            None
        } else {
            Some(self.draw_pile.remove(0))
        }
    }

    /// Return a card to the back of the pile.
    pub fn recycle(&mut self, card: Card) {
        self.draw_pile.push(card);
    }

    pub fn count(&self, kind: AgentType) -> usize {
        self.draw_pile.iter().filter(|c| c.agent == kind).count()
    }

    pub fn first_index_of(&self, kind: AgentType) -> Option<usize> {
        self.draw_pile.iter().position(|c| c.agent == kind)
    }

    pub fn take_at(&mut self, index: usize) -> Card {
        self.draw_pile.remove(index)
    }

    /// Remove one card of `kind` permanently. Returns false when none remain.
    pub fn burn(&mut self, kind: AgentType) -> bool {
        match self.first_index_of(kind) {
            Some(index) => {
                self.draw_pile.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw_pile.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_starting_composition() {
        let deck = Deck::starting();
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(deck.count(AgentType::Scout), 4);
        assert_eq!(deck.count(AgentType::Sniper), 3);
        assert_eq!(deck.count(AgentType::Sergeant), 3);
    }

    #[test]
    fn test_shuffle_preserves_composition() {
        let mut deck = Deck::starting();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        deck.shuffle(&mut rng);
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(deck.count(AgentType::Scout), 4);
        assert_eq!(deck.count(AgentType::Sniper), 3);
        assert_eq!(deck.count(AgentType::Sergeant), 3);
    }

    #[test]
    fn test_draw_takes_front_and_recycle_appends() {
        let mut deck = Deck::starting();
        let front = deck.draw_pile[0];
        let drawn = deck.draw().expect("deck not empty");
        assert_eq!(drawn, front);
        assert_eq!(deck.len(), DECK_SIZE - 1);

        deck.recycle(drawn);
        assert_eq!(*deck.draw_pile.last().expect("non-empty"), drawn);
    }

    #[test]
    fn test_draw_from_empty_deck() {
        let mut deck = Deck::default();
        assert!(deck.draw().is_none());
    }

    #[test]
    fn test_burn_removes_exactly_one() {
        let mut deck = Deck::starting();
        assert!(deck.burn(AgentType::Sniper));
        assert_eq!(deck.count(AgentType::Sniper), 2);
        assert!(deck.burn(AgentType::Sniper));
        assert!(deck.burn(AgentType::Sniper));
        assert!(!deck.burn(AgentType::Sniper));
        assert_eq!(deck.count(AgentType::Sniper), 0);
        // Other kinds untouched.
        assert_eq!(deck.count(AgentType::Scout), 4);
    }
}
