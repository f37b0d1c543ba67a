use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use common::engine::{Board, GameError, GameResult, apply_human_move, play_ai_move};
use common::id_generator::generate_game_id;
use common::{GameId, log};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub result: GameResult,
    pub ai_move: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    GameNotFound(GameId),
    GameOver,
    Move(GameError),
    Internal(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::GameNotFound(_) => write!(f, "Game not found"),
            SessionError::GameOver => write!(f, "Game is over"),
            SessionError::Move(e) => write!(f, "{}", e),
            SessionError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<GameError> for SessionError {
    fn from(e: GameError) -> Self {
        SessionError::Move(e)
    }
}

#[derive(Debug)]
struct GameSession {
    board: Board,
    result: GameResult,
}

impl GameSession {
    fn snapshot(&self, ai_move: Option<usize>) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            result: self.result,
            ai_move,
        }
    }
}

/// Games live for the whole process; each has its own lock so moves on one
/// game id are applied one at a time.
#[derive(Debug, Clone, Default)]
pub struct GameSessionStore {
    sessions: Arc<Mutex<HashMap<GameId, Arc<Mutex<GameSession>>>>>,
}

impl GameSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_game(&self) -> (GameId, GameSnapshot) {
        let mut sessions = self.sessions.lock().await;

        let mut game_id = generate_game_id();
        while sessions.contains_key(&game_id) {
            game_id = generate_game_id();
        }

        let session = GameSession {
            board: Board::new(),
            result: GameResult::InProgress,
        };
        let snapshot = session.snapshot(None);
        sessions.insert(game_id.clone(), Arc::new(Mutex::new(session)));

        log!("Game created: {} ({} active)", game_id, sessions.len());
        (game_id, snapshot)
    }

    pub async fn get_game(&self, game_id: &GameId) -> Result<GameSnapshot, SessionError> {
        let session = self.session(game_id).await?;
        let session = session.lock().await;
        Ok(session.snapshot(None))
    }

    /// Applies the human move and, if the game goes on, exactly one AI reply.
    pub async fn play_move(&self, game_id: &GameId, index: usize) -> Result<GameSnapshot, SessionError> {
        let session = self.session(game_id).await?;
        let mut session = session.lock().await;

        if session.result.is_terminal() {
            return Err(SessionError::GameOver);
        }

        // Work on a copy so the session only changes once the whole exchange
        // has finished; a request dropped mid-search leaves it untouched.
        let mut board = session.board;
        let result = apply_human_move(&mut board, index)?;
        log!("Game {}: human played {}", game_id, index);

        if result.is_terminal() {
            session.board = board;
            session.result = result;
            log!("Game {} over: {}", game_id, result);
            return Ok(session.snapshot(None));
        }

        let (outcome, result, board) = tokio::task::spawn_blocking(move || {
            let mut board = board;
            play_ai_move(&mut board).map(|(outcome, result)| (outcome, result, board))
        })
        .await
        .map_err(|e| SessionError::Internal(e.to_string()))??;

        session.board = board;
        session.result = result;
        log!(
            "Game {}: AI played {} (score {}, {} nodes)",
            game_id,
            outcome.index,
            outcome.score,
            outcome.nodes
        );

        if result.is_terminal() {
            log!("Game {} over: {}", game_id, result);
        }

        Ok(session.snapshot(Some(outcome.index)))
    }

    pub async fn game_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    async fn session(&self, game_id: &GameId) -> Result<Arc<Mutex<GameSession>>, SessionError> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(game_id)
            .cloned()
            .ok_or_else(|| SessionError::GameNotFound(game_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use common::engine::{InvalidMoveReason, Mark};

    fn assert_turns_balanced(snapshot: &GameSnapshot) {
        assert_eq!(
            snapshot.board.mark_count(Mark::Human),
            snapshot.board.mark_count(Mark::Ai),
            "board:\n{}",
            snapshot.board
        );
    }

    #[tokio::test]
    async fn test_create_game_starts_empty() {
        let store = GameSessionStore::new();
        let (game_id, snapshot) = store.create_game().await;

        assert_eq!(snapshot.board, Board::new());
        assert_eq!(snapshot.result, GameResult::InProgress);
        assert_eq!(store.get_game(&game_id).await.unwrap(), snapshot);
        assert_eq!(store.game_count().await, 1);
    }

    #[tokio::test]
    async fn test_games_are_isolated() {
        let store = GameSessionStore::new();
        let (first, _) = store.create_game().await;
        let (second, _) = store.create_game().await;
        assert_ne!(first, second);

        store.play_move(&first, 4).await.unwrap();
        assert_eq!(store.get_game(&second).await.unwrap().board, Board::new());
    }

    #[tokio::test]
    async fn test_move_gets_one_ai_reply() {
        let store = GameSessionStore::new();
        let (game_id, _) = store.create_game().await;

        let snapshot = store.play_move(&game_id, 4).await.unwrap();
        assert_eq!(snapshot.ai_move, Some(0));
        assert_eq!(snapshot.board.cell(4), Some(Mark::Human));
        assert_eq!(snapshot.board.cell(0), Some(Mark::Ai));
        assert_eq!(snapshot.board.mark_count(Mark::Ai), 1);
        assert_eq!(snapshot.result, GameResult::InProgress);
    }

    #[tokio::test]
    async fn test_unknown_game() {
        let store = GameSessionStore::new();
        let missing = GameId::from("0000000000000000");
        assert_eq!(
            store.play_move(&missing, 0).await,
            Err(SessionError::GameNotFound(missing.clone()))
        );
        assert!(store.get_game(&missing).await.is_err());
    }

    #[tokio::test]
    async fn test_occupied_cell_is_rejected_without_ai_reply() {
        let store = GameSessionStore::new();
        let (game_id, _) = store.create_game().await;
        let before = store.play_move(&game_id, 4).await.unwrap();

        let result = store.play_move(&game_id, 0).await;
        assert_eq!(
            result,
            Err(SessionError::Move(GameError::InvalidMove {
                index: 0,
                reason: InvalidMoveReason::Occupied
            }))
        );
        assert_eq!(store.get_game(&game_id).await.unwrap().board, before.board);
    }

    #[tokio::test]
    async fn test_game_over_rejects_moves() {
        let store = GameSessionStore::new();
        let (game_id, _) = store.create_game().await;

        let mut snapshot = store.get_game(&game_id).await.unwrap();
        while !snapshot.result.is_terminal() {
            let index = snapshot.board.empty_cells()[0];
            snapshot = store.play_move(&game_id, index).await.unwrap();
        }

        assert_ne!(snapshot.result, GameResult::HumanWins);
        let next = snapshot.board.empty_cells().first().copied().unwrap_or(0);
        assert_eq!(store.play_move(&game_id, next).await, Err(SessionError::GameOver));
    }

    #[tokio::test]
    async fn test_cancelled_move_leaves_game_playable() {
        let store = GameSessionStore::new();
        let (game_id, _) = store.create_game().await;

        let _ = tokio::time::timeout(Duration::ZERO, store.play_move(&game_id, 4)).await;

        let snapshot = store.get_game(&game_id).await.unwrap();
        assert_turns_balanced(&snapshot);
        assert_eq!(snapshot.result, GameResult::InProgress);

        let next = *snapshot.board.empty_cells().last().unwrap();
        let snapshot = store.play_move(&game_id, next).await.unwrap();
        assert!(snapshot.ai_move.is_some());
        assert_turns_balanced(&snapshot);
    }

    #[tokio::test]
    async fn test_rejected_moves_keep_turns_balanced() {
        let store = GameSessionStore::new();
        let (game_id, _) = store.create_game().await;
        store.play_move(&game_id, 4).await.unwrap();

        assert!(store.play_move(&game_id, 4).await.is_err());
        assert!(store.play_move(&game_id, 9).await.is_err());

        let snapshot = store.get_game(&game_id).await.unwrap();
        assert_turns_balanced(&snapshot);
        assert_eq!(snapshot.board.mark_count(Mark::Human), 1);
    }
}
