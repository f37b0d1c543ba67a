use std::fmt;

pub const BOARD_SIZE: usize = 9;

pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    Human,
    Ai,
}

impl Mark {
    /// Symbol used on the wire and in board dumps: the AI plays `X`, the human `O`.
    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::Human => 'O',
            Mark::Ai => 'X',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Mark> {
        match symbol {
            ' ' | '.' | '-' => Some(Mark::Empty),
            'O' | 'o' => Some(Mark::Human),
            'X' | 'x' => Some(Mark::Ai),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    InProgress,
    HumanWins,
    AiWins,
    Draw,
}

impl GameResult {
    pub fn is_terminal(&self) -> bool {
        *self != GameResult::InProgress
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "in progress"),
            GameResult::HumanWins => write!(f, "human wins"),
            GameResult::AiWins => write!(f, "AI wins"),
            GameResult::Draw => write!(f, "draw"),
        }
    }
}
