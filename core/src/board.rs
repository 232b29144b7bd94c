use alloc::vec::Vec;
use core::ops::Index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Shuffles `items` in place with Fisher-Yates, walking from the end and swapping each slot with a
/// uniformly chosen slot at or before it.
pub fn fisher_yates<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

fn check_pairs(faces: &[Face]) -> Result<()> {
    if faces.len() % 2 != 0 || faces.len() > usize::from(MAX_PAIRS) * 2 {
        return Err(GameError::UnpairedFaces);
    }
    for &face in faces {
        if faces.iter().filter(|&&other| other == face).count() != 2 {
            return Err(GameError::UnpairedFaces);
        }
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub const fn empty() -> Self {
        Self { cards: Vec::new() }
    }

    /// Deals `pairs` faces from [`ALPHABET`], two of each, in a random order.
    pub fn shuffled<R: Rng>(pairs: PairCount, rng: &mut R) -> Self {
        let pairs = pairs.min(MAX_PAIRS) as usize;
        let mut faces: Vec<Face> = ALPHABET[..pairs]
            .iter()
            .chain(ALPHABET[..pairs].iter())
            .copied()
            .collect();
        fisher_yates(&mut faces, rng);
        Self::from_faces_unchecked(&faces)
    }

    /// Lays out the given faces in order, rejecting layouts where some face is not paired exactly
    /// once.
    pub fn from_faces(faces: &[Face]) -> Result<Self> {
        check_pairs(faces)?;
        Ok(Self::from_faces_unchecked(faces))
    }

    fn from_faces_unchecked(faces: &[Face]) -> Self {
        let cards = faces
            .iter()
            .enumerate()
            .map(|(id, &face)| Card::new(id as CardId, face))
            .collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(usize::from(id))
    }

    pub fn views(&self) -> Vec<CardView> {
        self.cards.iter().map(Card::view).collect()
    }

    pub fn revealed_count(&self) -> usize {
        self.cards.iter().filter(|card| card.revealed).count()
    }

    pub(crate) fn set_revealed(&mut self, id: CardId, revealed: bool) {
        if let Some(card) = self.cards.get_mut(usize::from(id)) {
            card.revealed = revealed;
        }
    }

    pub(crate) fn set_all_revealed(&mut self, revealed: bool) {
        for card in &mut self.cards {
            card.revealed = revealed;
        }
    }
}

/// Rebuilds a board from stored cards, holding them to the same rules as [`Board::from_faces`]
/// plus ids matching positions.
impl TryFrom<Vec<Card>> for Board {
    type Error = GameError;

    fn try_from(cards: Vec<Card>) -> Result<Self> {
        if cards
            .iter()
            .enumerate()
            .any(|(index, card)| usize::from(card.id) != index)
        {
            return Err(GameError::MisplacedCard);
        }
        let faces: Vec<Face> = cards.iter().map(|card| card.face).collect();
        check_pairs(&faces)?;
        Ok(Self { cards })
    }
}

impl From<Board> for Vec<Card> {
    fn from(board: Board) -> Self {
        board.cards
    }
}

impl Index<CardId> for Board {
    type Output = Card;

    fn index(&self, id: CardId) -> &Self::Output {
        &self.cards[usize::from(id)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn shuffled_board_pairs_every_face() {
        let mut rng = SmallRng::seed_from_u64(7);
        let board = Board::shuffled(8, &mut rng);

        assert_eq!(board.len(), 16);
        for &face in &ALPHABET[..8] {
            let count = board.cards().iter().filter(|card| card.face == face).count();
            assert_eq!(count, 2, "face {face}");
        }
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn card_ids_follow_board_position() {
        let mut rng = SmallRng::seed_from_u64(1);
        let board = Board::shuffled(4, &mut rng);

        for (index, card) in board.cards().iter().enumerate() {
            assert_eq!(usize::from(card.id), index);
        }
    }

    #[test]
    fn same_seed_deals_same_board() {
        let a = Board::shuffled(8, &mut SmallRng::seed_from_u64(42));
        let b = Board::shuffled(8, &mut SmallRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn fisher_yates_keeps_single_element() {
        let mut items = vec!['A'];
        fisher_yates(&mut items, &mut SmallRng::seed_from_u64(0));
        assert_eq!(items, vec!['A']);

        let mut empty: Vec<Face> = Vec::new();
        fisher_yates(&mut empty, &mut SmallRng::seed_from_u64(0));
        assert!(empty.is_empty());
    }

    #[test]
    fn from_faces_rejects_unpaired_layouts() {
        assert_eq!(
            Board::from_faces(&['A', 'B', 'A']),
            Err(GameError::UnpairedFaces)
        );
        assert_eq!(
            Board::from_faces(&['A', 'A', 'A', 'A']),
            Err(GameError::UnpairedFaces)
        );
        assert_eq!(
            Board::from_faces(&['A', 'B', 'C', 'A']),
            Err(GameError::UnpairedFaces)
        );

        let board = Board::from_faces(&['B', 'A', 'A', 'B']).unwrap();
        assert_eq!(board[0].face, 'B');
        assert_eq!(board.pair_count(), 2);
    }

    #[test]
    fn stored_cards_must_pair_and_sit_at_their_ids() {
        let cards = |faces: &[(CardId, Face)]| -> Vec<Card> {
            faces.iter().map(|&(id, face)| Card::new(id, face)).collect()
        };

        assert_eq!(
            Board::try_from(cards(&[(0, 'A'), (1, 'A'), (2, 'A'), (3, 'B')])),
            Err(GameError::UnpairedFaces)
        );
        assert_eq!(
            Board::try_from(cards(&[(0, 'A'), (1, 'A'), (2, 'B'), (200, 'B')])),
            Err(GameError::MisplacedCard)
        );

        let board = Board::try_from(cards(&[(0, 'B'), (1, 'A'), (2, 'B'), (3, 'A')])).unwrap();
        assert_eq!(board, Board::from_faces(&['B', 'A', 'B', 'A']).unwrap());
    }
}
