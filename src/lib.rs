//! Chess piece movement and move legality.
//!
//! `movegen` lists where a piece can go by geometry alone, `attacks` answers
//! whether a square is attacked, and `legality` drops moves that would leave
//! the mover's king in check. `Board` holds the position and plays moves.

pub mod attacks;
pub mod board;
pub mod color;
pub mod directions;
pub mod error;
pub mod legality;
pub mod movegen;
pub mod r#move;
pub mod pieces;
pub mod position;

pub use board::{Board, CastleSide, CastlingRights, EnPassant};
pub use color::Color;
pub use error::{FenError, MoveError, PositionError};
pub use legality::{all_valid_moves, valid_moves};
pub use movegen::{MoveList, moves};
pub use pieces::{Piece, PieceType};
pub use position::{Offset, Position};
