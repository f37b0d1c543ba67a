use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveReason {
    OutOfRange,
    Occupied,
    GameOver,
    OutOfTurn,
}

impl fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMoveReason::OutOfRange => write!(f, "position out of range"),
            InvalidMoveReason::Occupied => write!(f, "cell is already marked"),
            InvalidMoveReason::GameOver => write!(f, "game is already over"),
            InvalidMoveReason::OutOfTurn => write!(f, "not the human's turn"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    InvalidMove { index: usize, reason: InvalidMoveReason },
    NoLegalMove,
}

impl GameError {
    pub fn invalid_move(index: usize, reason: InvalidMoveReason) -> Self {
        GameError::InvalidMove { index, reason }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidMove { index, reason } => {
                write!(f, "Invalid move at {}: {}", index, reason)
            }
            GameError::NoLegalMove => write!(f, "No legal move available"),
        }
    }
}

impl std::error::Error for GameError {}
