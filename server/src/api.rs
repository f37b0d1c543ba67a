use common::GameId;
use common::engine::{Board, GameResult};
use serde::{Deserialize, Serialize};

use crate::session_store::GameSnapshot;

#[derive(Debug, Serialize, Deserialize)]
pub struct NewGameResponse {
    pub game_id: GameId,
    pub board: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MoveRequest {
    pub game_id: GameId,
    pub position: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameStateResponse {
    pub board: Vec<String>,
    pub game_over: bool,
    pub winner: Option<String>,
    pub ai_move: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn board_symbols(board: &Board) -> Vec<String> {
    board
        .cells()
        .iter()
        .map(|mark| mark.symbol().to_string())
        .collect()
}

pub fn winner_label(result: GameResult) -> Option<&'static str> {
    match result {
        GameResult::InProgress => None,
        GameResult::HumanWins => Some("Human"),
        GameResult::AiWins => Some("AI"),
        GameResult::Draw => Some("Draw"),
    }
}

impl From<GameSnapshot> for GameStateResponse {
    fn from(snapshot: GameSnapshot) -> Self {
        Self {
            board: board_symbols(&snapshot.board),
            game_over: snapshot.result.is_terminal(),
            winner: winner_label(snapshot.result).map(str::to_string),
            ai_move: snapshot.ai_move,
        }
    }
}
