use super::board::Board;
use super::error::{GameError, InvalidMoveReason};
use super::search::{Pruning, SearchOutcome, search};
use super::types::{GameResult, Mark};

/// Places the human's mark. On error the board is left untouched.
pub fn apply_human_move(board: &mut Board, index: usize) -> Result<GameResult, GameError> {
    if board.status().is_terminal() {
        return Err(GameError::invalid_move(index, InvalidMoveReason::GameOver));
    }

    match board.cell(index) {
        None => return Err(GameError::invalid_move(index, InvalidMoveReason::OutOfRange)),
        Some(Mark::Empty) => {}
        Some(_) => return Err(GameError::invalid_move(index, InvalidMoveReason::Occupied)),
    }

    // The human opens, so it is their turn only when the marks are level.
    if board.mark_count(Mark::Human) > board.mark_count(Mark::Ai) {
        return Err(GameError::invalid_move(index, InvalidMoveReason::OutOfTurn));
    }

    board.place(index, Mark::Human)?;
    Ok(board.status())
}

pub fn apply_ai_move(board: &mut Board) -> Result<(usize, GameResult), GameError> {
    play_ai_move(board).map(|(outcome, result)| (outcome.index, result))
}

/// Same as [`apply_ai_move`] but also reports the search score and node count.
pub fn play_ai_move(board: &mut Board) -> Result<(SearchOutcome, GameResult), GameError> {
    let outcome = search(board, Pruning::AlphaBeta)?;
    board.place(outcome.index, Mark::Ai)?;
    Ok((outcome, board.status()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_human_move_updates_status() {
        let mut board = Board::new();
        assert_eq!(apply_human_move(&mut board, 4), Ok(GameResult::InProgress));
        assert_eq!(board.cell(4), Some(Mark::Human));
    }

    #[test]
    fn test_human_move_can_win() {
        let mut board = board("OO.XX.X..");
        assert_eq!(apply_human_move(&mut board, 2), Ok(GameResult::HumanWins));
    }

    #[test]
    fn test_human_move_can_draw() {
        let mut board = board("XOXXO.OXX");
        assert_eq!(apply_human_move(&mut board, 5), Ok(GameResult::Draw));
    }

    #[test]
    fn test_human_move_on_occupied_cell_leaves_board_unchanged() {
        let mut board = board("O...X....");
        let before = board;

        let result = apply_human_move(&mut board, 4);
        assert_eq!(
            result,
            Err(GameError::InvalidMove {
                index: 4,
                reason: InvalidMoveReason::Occupied
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_human_move_out_of_range() {
        let mut board = Board::new();
        assert!(matches!(
            apply_human_move(&mut board, 9),
            Err(GameError::InvalidMove { reason: InvalidMoveReason::OutOfRange, .. })
        ));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_human_move_after_game_over() {
        let mut board = board("XXXOO....");
        assert!(matches!(
            apply_human_move(&mut board, 8),
            Err(GameError::InvalidMove { reason: InvalidMoveReason::GameOver, .. })
        ));
    }

    #[test]
    fn test_human_cannot_move_twice() {
        let mut board = Board::new();
        apply_human_move(&mut board, 0).unwrap();
        assert!(matches!(
            apply_human_move(&mut board, 1),
            Err(GameError::InvalidMove { reason: InvalidMoveReason::OutOfTurn, .. })
        ));
        assert_eq!(board.mark_count(Mark::Human), 1);
    }

    #[test]
    fn test_ai_completes_its_line() {
        let mut board = board("XX OO    ");
        assert_eq!(apply_ai_move(&mut board), Ok((2, GameResult::AiWins)));
        assert_eq!(board.cell(2), Some(Mark::Ai));
    }

    #[test]
    fn test_ai_answers_center_with_corner() {
        let mut board = Board::new();
        apply_human_move(&mut board, 4).unwrap();
        let (index, result) = apply_ai_move(&mut board).unwrap();
        assert_eq!(index, 0);
        assert!([0, 2, 6, 8].contains(&index));
        assert_eq!(result, GameResult::InProgress);
    }

    #[test]
    fn test_ai_move_on_finished_board() {
        let mut full = board("XOXXOOOXX");
        assert_eq!(apply_ai_move(&mut full), Err(GameError::NoLegalMove));

        let mut won = board("OOOXX....");
        let before = won;
        assert_eq!(apply_ai_move(&mut won), Err(GameError::NoLegalMove));
        assert_eq!(won, before);
    }

    #[test]
    fn test_play_ai_move_reports_outcome() {
        let mut board = board("XOXXOOO..");
        let (outcome, result) = play_ai_move(&mut board).unwrap();
        assert_eq!(outcome.index, 7);
        assert_eq!(board.cell(outcome.index), Some(Mark::Ai));
        assert!(outcome.nodes > 0);
        assert_eq!(result, board.status());
    }

    #[test]
    fn test_full_game_alternates_until_terminal() {
        let mut board = Board::new();
        let human_moves = [0, 8, 2, 3, 7, 1, 5, 6, 4];
        let mut result = GameResult::InProgress;

        for index in human_moves {
            if board.cell(index) != Some(Mark::Empty) {
                continue;
            }
            result = apply_human_move(&mut board, index).unwrap();
            if result.is_terminal() {
                break;
            }
            let (_, after_ai) = apply_ai_move(&mut board).unwrap();
            result = after_ai;
            if result.is_terminal() {
                break;
            }
        }

        assert!(result.is_terminal());
        assert_ne!(result, GameResult::HumanWins);
        assert_eq!(result, board.status());
    }
}
