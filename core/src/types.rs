/// Position of a card on the board, `0..N`.
pub type CardId = u8;

/// Symbol printed on a card face.
pub type Face = char;

/// Count type used for pair counts.
pub type PairCount = u8;

/// Whole seconds left on the countdown.
pub type Seconds = u32;

/// Score and score deltas. The score never drops below zero.
pub type Points = u32;

/// Faces a board draws from, in order.
pub const ALPHABET: [Face; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

pub const MAX_PAIRS: PairCount = ALPHABET.len() as PairCount;
