use super::board::Board;
use super::error::GameError;
use super::types::Mark;

/// Score of an immediate AI win. Wins found deeper score `WIN_SCORE - depth`.
pub const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pruning {
    #[default]
    AlphaBeta,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateScore {
    pub index: usize,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub index: usize,
    pub score: i32,
    pub nodes: u64,
}

pub fn best_move(board: &mut Board) -> Result<usize, GameError> {
    search(board, Pruning::AlphaBeta).map(|outcome| outcome.index)
}

/// Picks the candidate with the strictly greatest score, so the lowest index
/// wins ties. The board is unchanged on return.
pub fn search(board: &mut Board, pruning: Pruning) -> Result<SearchOutcome, GameError> {
    let mut searcher = Searcher::new(pruning);
    let candidates = searcher.score_root(board)?;

    let mut best: Option<CandidateScore> = None;
    for candidate in candidates {
        if best.is_none_or(|current| candidate.score > current.score) {
            best = Some(candidate);
        }
    }

    let best = best.ok_or(GameError::NoLegalMove)?;
    Ok(SearchOutcome {
        index: best.index,
        score: best.score,
        nodes: searcher.nodes,
    })
}

pub fn score_candidates(
    board: &mut Board,
    pruning: Pruning,
) -> Result<Vec<CandidateScore>, GameError> {
    Searcher::new(pruning).score_root(board)
}

struct Searcher {
    pruning: Pruning,
    nodes: u64,
}

impl Searcher {
    fn new(pruning: Pruning) -> Self {
        Self { pruning, nodes: 0 }
    }

    fn score_root(&mut self, board: &mut Board) -> Result<Vec<CandidateScore>, GameError> {
        if board.status().is_terminal() {
            return Err(GameError::NoLegalMove);
        }

        board
            .empty_cells()
            .into_iter()
            .map(|index| {
                let mut scoped = board.scoped_move(index, Mark::Ai)?;
                // Each root child gets a full window so its score is exact.
                let score = self.minimax(&mut scoped, 0, false, i32::MIN, i32::MAX)?;
                Ok(CandidateScore { index, score })
            })
            .collect()
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: i32,
        is_maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32, GameError> {
        self.nodes += 1;

        if board.is_winner(Mark::Ai) {
            return Ok(WIN_SCORE - depth);
        }
        if board.is_winner(Mark::Human) {
            return Ok(depth - WIN_SCORE);
        }
        if board.is_full() {
            return Ok(0);
        }

        if is_maximizing {
            let mut max_eval = i32::MIN;
            for index in board.empty_cells() {
                let mut scoped = board.scoped_move(index, Mark::Ai)?;
                let eval = self.minimax(&mut scoped, depth + 1, false, alpha, beta)?;

                max_eval = max_eval.max(eval);
                alpha = alpha.max(max_eval);
                if self.cutoff(alpha, beta) {
                    break;
                }
            }
            Ok(max_eval)
        } else {
            let mut min_eval = i32::MAX;
            for index in board.empty_cells() {
                let mut scoped = board.scoped_move(index, Mark::Human)?;
                let eval = self.minimax(&mut scoped, depth + 1, true, alpha, beta)?;

                min_eval = min_eval.min(eval);
                beta = beta.min(min_eval);
                if self.cutoff(alpha, beta) {
                    break;
                }
            }
            Ok(min_eval)
        }
    }

    fn cutoff(&self, alpha: i32, beta: i32) -> bool {
        self.pruning == Pruning::AlphaBeta && beta <= alpha
    }
}
