use std::fmt;
use std::ops::Add;

use crate::error::PositionError;

pub const BOARD_SIZE: i8 = 8;

/// A square on the board. Coordinates are signed so that offsets can walk
/// off the edge; use `is_on_board` before reading the square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub col: i8,
    pub row: i8,
}

/// A (column, row) displacement used by the movement patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dcol: i8,
    pub drow: i8,
}

impl Offset {
    pub const fn new(dcol: i8, drow: i8) -> Self {
        Offset { dcol, drow }
    }
}

impl Position {
    pub const fn new(col: i8, row: i8) -> Self {
        Position { col, row }
    }

    pub fn is_on_board(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.col) && (0..BOARD_SIZE).contains(&self.row)
    }

    /// a1 is dark; squares alternate from there.
    pub fn is_light(&self) -> bool {
        (self.col + self.row) % 2 != 0
    }

    /// Row-major index into a 64-square array. Only meaningful on board.
    pub(crate) fn index(&self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + self.col as usize
    }

    pub fn to_algebraic(&self) -> String {
        format!("{}{}", (b'a' + self.col as u8) as char, self.row + 1)
    }

    pub fn from_algebraic(s: &str) -> Result<Self, PositionError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(PositionError::InvalidLength(s.to_string()));
        }

        let col = match bytes[0] {
            b @ b'a'..=b'h' => (b - b'a') as i8,
            b => return Err(PositionError::InvalidFile(b as char)),
        };
        let row = match bytes[1] {
            b @ b'1'..=b'8' => (b - b'1') as i8,
            b => return Err(PositionError::InvalidRank(b as char)),
        };

        Ok(Position { col, row })
    }
}

impl Add<Offset> for Position {
    type Output = Position;

    fn add(self, offset: Offset) -> Position {
        Position::new(self.col + offset.dcol, self.row + offset.drow)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}", self.to_algebraic())
        } else {
            write!(f, "({}, {})", self.col, self.row)
        }
    }
}
