use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Game already started, reset before starting again")]
    AlreadyStarted,
    #[error("Board size does not match configured pair count")]
    BoardSizeMismatch,
    #[error("Every face must appear exactly twice")]
    UnpairedFaces,
    #[error("Card id does not match its board position")]
    MisplacedCard,
    #[error("Pair count must be between 1 and the alphabet size")]
    InvalidPairCount,
}

pub type Result<T> = core::result::Result<T, GameError>;
