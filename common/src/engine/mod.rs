mod board;
mod error;
mod game;
mod search;
mod types;

pub use board::{Board, ScopedMove};
pub use error::{GameError, InvalidMoveReason};
pub use game::{apply_ai_move, apply_human_move, play_ai_move};
pub use search::{CandidateScore, Pruning, SearchOutcome, WIN_SCORE, best_move, score_candidates, search};
pub use types::{BOARD_SIZE, GameResult, Mark, WINNING_LINES};
