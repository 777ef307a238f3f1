//! Attack and check detection.
//!
//! Built only on `movegen::attacks`, so it is safe to call from castling
//! availability and from the legality filter without recursing.

use crate::board::Board;
use crate::color::Color;
use crate::movegen;
use crate::position::Position;

pub fn is_square_attacked(board: &Board, square: Position, by_color: Color) -> bool {
    board
        .pieces(by_color)
        .any(|(pos, _)| movegen::attacks(board, pos).contains(&square))
}

/// Whether `color`'s king is attacked. A board without that king is never
/// in check; legality queries assume both kings are present.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false,
    }
}

/// All squares of `by_color`'s pieces that attack `square`.
pub fn attackers(board: &Board, square: Position, by_color: Color) -> Vec<Position> {
    board
        .pieces(by_color)
        .filter(|(pos, _)| movegen::attacks(board, *pos).contains(&square))
        .map(|(pos, _)| pos)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{Piece, PieceType};

    fn place(board: &mut Board, col: i8, row: i8, piece_type: PieceType, color: Color) {
        board.set_piece(&Position::new(col, row), Some(Piece::new(piece_type, color)));
    }

    #[test]
    fn test_rook_attacks_lines() {
        let mut board = Board::empty();
        place(&mut board, 4, 4, PieceType::Rook, Color::White);

        assert!(is_square_attacked(&board, Position::new(4, 0), Color::White));
        assert!(is_square_attacked(&board, Position::new(0, 4), Color::White));
        assert!(!is_square_attacked(&board, Position::new(5, 5), Color::White));
        assert!(!is_square_attacked(&board, Position::new(4, 0), Color::Black));

        place(&mut board, 4, 6, PieceType::Pawn, Color::Black);
        assert!(is_square_attacked(&board, Position::new(4, 6), Color::White));
        assert!(!is_square_attacked(&board, Position::new(4, 7), Color::White));
    }

    #[test]
    fn test_pawn_attacks_forward_diagonals_only() {
        let mut board = Board::empty();
        place(&mut board, 3, 3, PieceType::Pawn, Color::Black);

        assert!(is_square_attacked(&board, Position::new(2, 2), Color::Black));
        assert!(is_square_attacked(&board, Position::new(4, 2), Color::Black));
        assert!(!is_square_attacked(&board, Position::new(3, 2), Color::Black));
        assert!(!is_square_attacked(&board, Position::new(4, 4), Color::Black));
    }

    #[test]
    fn test_is_in_check() {
        let mut board = Board::empty();
        place(&mut board, 4, 7, PieceType::King, Color::Black);
        place(&mut board, 4, 0, PieceType::Rook, Color::White);
        place(&mut board, 0, 0, PieceType::King, Color::White);

        assert!(is_in_check(&board, Color::Black));
        assert!(!is_in_check(&board, Color::White));

        place(&mut board, 4, 3, PieceType::Bishop, Color::Black);
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn test_no_king_is_not_check() {
        let mut board = Board::empty();
        place(&mut board, 4, 0, PieceType::Rook, Color::White);
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn test_attackers() {
        let board = Board::new("4k3/8/8/8/8/5n2/8/R3K2R w - - 0 1", true)
            .expect("Failed to parse FEN");
        // Knight on f3 hits e1 and h2; rook on h1 is not an attacker of e1.
        assert_eq!(
            attackers(&board, Position::new(4, 0), Color::Black),
            vec![Position::new(5, 2)]
        );
        assert!(attackers(&board, Position::new(4, 0), Color::White).is_empty());
    }
}
