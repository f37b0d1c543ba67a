use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use super::error::{GameError, InvalidMoveReason};
use super::types::{BOARD_SIZE, GameResult, Mark, WINNING_LINES};

/// 3x3 grid, cells indexed 0..9 in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Mark; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Mark; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; BOARD_SIZE] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_winner(&self, mark: Mark) -> bool {
        if mark == Mark::Empty {
            return false;
        }
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == mark))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    /// Ascending indices of empty cells. Search relies on this order for tie-breaking.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Mark::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn mark_count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), GameError> {
        match self.cells.get(index) {
            None => Err(GameError::invalid_move(index, InvalidMoveReason::OutOfRange)),
            Some(Mark::Empty) => {
                self.cells[index] = mark;
                Ok(())
            }
            Some(_) => Err(GameError::invalid_move(index, InvalidMoveReason::Occupied)),
        }
    }

    pub fn clear(&mut self, index: usize) -> Result<(), GameError> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(GameError::invalid_move(index, InvalidMoveReason::OutOfRange))?;
        *cell = Mark::Empty;
        Ok(())
    }

    /// Places `mark` for the lifetime of the returned guard. The cell is
    /// emptied again when the guard drops.
    pub fn scoped_move(&mut self, index: usize, mark: Mark) -> Result<ScopedMove<'_>, GameError> {
        self.place(index, mark)?;
        Ok(ScopedMove { board: self, index })
    }

    /// Recomputed from the cells on every call; a win outranks a full board.
    pub fn status(&self) -> GameResult {
        if self.is_winner(Mark::Ai) {
            GameResult::AiWins
        } else if self.is_winner(Mark::Human) {
            GameResult::HumanWins
        } else if self.is_full() {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }
}

pub struct ScopedMove<'a> {
    board: &'a mut Board,
    index: usize,
}

impl ScopedMove<'_> {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Deref for ScopedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        // The index was validated by `place` when the guard was created.
        let _ = self.board.clear(self.index);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(3).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            let symbols: String = row.iter().map(|mark| mark.symbol()).collect();
            write!(f, "{}", symbols.replace(' ', "."))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = String;

    /// Accepts 9 symbols (`X`, `O`, and ` `, `.` or `-` for empty); newlines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Mark::Empty; BOARD_SIZE];
        let mut count = 0;

        for symbol in s.chars().filter(|c| *c != '\n' && *c != '\r') {
            let mark = Mark::from_symbol(symbol)
                .ok_or_else(|| format!("Invalid board symbol '{}'", symbol))?;
            if count >= BOARD_SIZE {
                return Err(format!("Board has more than {} cells", BOARD_SIZE));
            }
            cells[count] = mark;
            count += 1;
        }

        if count != BOARD_SIZE {
            return Err(format!("Board needs {} cells, got {}", BOARD_SIZE, count));
        }

        Ok(Self { cells })
    }
}
