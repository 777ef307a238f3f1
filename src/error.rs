use thiserror::Error;

use crate::color::Color;
use crate::pieces::PieceType;
use crate::position::Position;

/// Errors raised when reading a square name such as `e4`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("square name must be two characters, got {0:?}")]
    InvalidLength(String),
    #[error("invalid file character: {0}")]
    InvalidFile(char),
    #[error("invalid rank character: {0}")]
    InvalidRank(char),
}

/// Possible errors that can arise when parsing a FEN string into a `Board`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 6 fields, got {0}")]
    FieldCount(usize),
    #[error("expected 8 rows, got {0}")]
    RowCount(usize),
    #[error("row {0} does not sum to 8")]
    RowWidth(usize),
    #[error("unknown piece: {0}")]
    UnknownPiece(char),
    #[error("invalid side to move: {0:?}")]
    InvalidSideToMove(String),
    #[error("invalid castling character: {0}")]
    InvalidCastling(char),
    #[error("invalid en-passant square: {0}")]
    InvalidEnPassant(#[from] PositionError),
    #[error("en-passant square {0} is not on the third or sixth row")]
    EnPassantRow(Position),
    #[error("en-passant square {0} does not follow a double step")]
    EnPassantMismatch(Position),
    #[error("invalid halfmove clock: {0:?}")]
    InvalidHalfmove(String),
    #[error("invalid fullmove number: {0:?}")]
    InvalidFullmove(String),
    #[error("no {0} king on the board")]
    MissingKing(Color),
}

/// Errors raised by `Board::apply_move`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece at {0}")]
    EmptySquare(Position),
    #[error("square off board: {0}")]
    OffBoard(Position),
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceType),
}
