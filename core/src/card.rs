use serde::{Deserialize, Serialize};

use crate::*;

/// A card as the controller stores it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub face: Face,
    pub revealed: bool,
}

impl Card {
    pub const fn new(id: CardId, face: Face) -> Self {
        Self {
            id,
            face,
            revealed: false,
        }
    }

    pub const fn view(&self) -> CardView {
        CardView {
            id: self.id,
            face: if self.revealed { Some(self.face) } else { None },
            revealed: self.revealed,
        }
    }

    pub const fn matches(&self, other: &Card) -> bool {
        self.face == other.face
    }
}

/// Renderer-facing projection of a [`Card`]. Hidden cards carry no face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub face: Option<Face>,
    pub revealed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_card_view_has_no_face() {
        let card = Card::new(3, 'C');
        assert_eq!(
            card.view(),
            CardView {
                id: 3,
                face: None,
                revealed: false
            }
        );
    }

    #[test]
    fn revealed_card_view_shows_face() {
        let mut card = Card::new(0, 'A');
        card.revealed = true;
        assert_eq!(card.view().face, Some('A'));
        assert!(card.matches(&Card::new(9, 'A')));
        assert!(!card.matches(&Card::new(9, 'B')));
    }
}
