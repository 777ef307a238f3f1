//! The check-safety filter.
//!
//! Every candidate from `movegen::moves` is played on a clone of the board
//! with `Board::apply_move`; the candidate survives if the mover's king is
//! not attacked afterwards. The board passed in is never mutated.

use crate::attacks;
use crate::board::Board;
use crate::color::Color;
use crate::movegen::{self, MoveList};
use crate::position::Position;

/// Legal destinations for the piece on `src`, in candidate order.
pub fn valid_moves(board: &Board, src: Position) -> MoveList {
    movegen::moves(board, src)
        .into_iter()
        .filter(|&dst| !moves_into_check(board, src, dst))
        .collect()
}

/// Whether playing `src -> dst` leaves the mover's king attacked.
pub fn moves_into_check(board: &Board, src: Position, dst: Position) -> bool {
    let Some(piece) = board.get_piece(&src) else {
        debug_assert!(false, "no piece at {src}");
        return true;
    };

    let mut scratch = board.clone();
    let into_check = match scratch.apply_move(src, dst) {
        Ok(_) => attacks::is_in_check(&scratch, piece.color),
        Err(_) => true,
    };

    if into_check {
        tracing::trace!(%src, %dst, color = %piece.color, "move leaves king in check");
    }

    into_check
}

/// Every legal `(src, dst)` pair for `color`, pieces in board scan order.
pub fn all_valid_moves(board: &Board, color: Color) -> Vec<(Position, Position)> {
    board
        .pieces(color)
        .flat_map(|(src, _)| valid_moves(board, src).into_iter().map(move |dst| (src, dst)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{Piece, PieceType};

    fn sq(col: i8, row: i8) -> Position {
        Position::new(col, row)
    }

    fn place(board: &mut Board, col: i8, row: i8, piece_type: PieceType, color: Color) {
        board.set_piece(&sq(col, row), Some(Piece::new(piece_type, color)));
    }

    #[test]
    fn test_king_cannot_stay_on_attacked_file() {
        let mut board = Board::empty();
        place(&mut board, 4, 7, PieceType::King, Color::Black);
        place(&mut board, 4, 0, PieceType::Rook, Color::White);
        place(&mut board, 0, 0, PieceType::King, Color::White);

        let valid = valid_moves(&board, sq(4, 7));
        assert!(!valid.contains(&sq(4, 6)));
        assert!(valid.contains(&sq(3, 7)));
        assert!(valid.contains(&sq(5, 7)));
        assert!(valid.contains(&sq(3, 6)));
        assert!(valid.contains(&sq(5, 6)));
        assert_eq!(valid.len(), 4);
    }

    #[test]
    fn test_only_blocking_moves_survive_check() {
        let mut board = Board::empty();
        place(&mut board, 4, 7, PieceType::King, Color::Black);
        place(&mut board, 4, 0, PieceType::Rook, Color::White);
        place(&mut board, 0, 0, PieceType::King, Color::White);
        place(&mut board, 0, 3, PieceType::Rook, Color::Black);

        // The black rook may only interpose on e4 while the king is in check.
        assert_eq!(valid_moves(&board, sq(0, 3)).to_vec(), vec![sq(4, 3)]);
    }

    #[test]
    fn test_capturing_the_checker_is_legal() {
        let mut board = Board::empty();
        place(&mut board, 4, 7, PieceType::King, Color::Black);
        place(&mut board, 4, 0, PieceType::Rook, Color::White);
        place(&mut board, 7, 7, PieceType::King, Color::White);
        place(&mut board, 0, 0, PieceType::Rook, Color::Black);

        assert_eq!(valid_moves(&board, sq(0, 0)).to_vec(), vec![sq(4, 0)]);
    }

    #[test]
    fn test_pinned_piece_keeps_only_pin_line() {
        let mut board = Board::empty();
        place(&mut board, 4, 7, PieceType::King, Color::Black);
        place(&mut board, 4, 5, PieceType::Rook, Color::Black);
        place(&mut board, 4, 0, PieceType::Rook, Color::White);
        place(&mut board, 0, 0, PieceType::King, Color::White);

        // Up to the king, or down the file as far as the pinning rook.
        assert_eq!(
            valid_moves(&board, sq(4, 5)).to_vec(),
            vec![sq(4, 6), sq(4, 4), sq(4, 3), sq(4, 2), sq(4, 1), sq(4, 0)]
        );

        // A pinned knight has nowhere to go.
        place(&mut board, 4, 5, PieceType::Knight, Color::Black);
        assert!(valid_moves(&board, sq(4, 5)).is_empty());
    }

    #[test]
    fn test_en_passant_exposing_king_is_rejected() {
        // Both pawns leave the fifth row; the rook then sees the king.
        let mut board = Board::new("4k3/3p4/8/K3P2r/8/8/8/8 b - - 0 1", true)
            .expect("Failed to parse FEN");
        board
            .apply_move(sq(3, 6), sq(3, 4))
            .expect("Failed to apply double step");

        let pseudo = movegen::moves(&board, sq(4, 4));
        assert!(pseudo.contains(&sq(3, 5)));
        let valid = valid_moves(&board, sq(4, 4));
        assert!(!valid.contains(&sq(3, 5)));
        assert!(valid.contains(&sq(4, 5)));
    }

    #[test]
    fn test_castling_through_check_excluded() {
        let board = Board::new("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1", true)
            .expect("Failed to parse FEN");
        let valid = valid_moves(&board, sq(4, 0));
        assert!(!valid.contains(&sq(6, 0)));
        assert!(!valid.contains(&sq(5, 0)));
        assert!(valid.contains(&sq(2, 0)));
    }

    #[test]
    fn test_valid_moves_do_not_touch_board() {
        let board = Board::standard();
        let before = board.clone();
        let _ = all_valid_moves(&board, Color::White);
        assert_eq!(board, before);
    }

    #[test]
    fn test_standard_position_has_twenty_moves() {
        let board = Board::standard();
        assert_eq!(all_valid_moves(&board, Color::White).len(), 20);
        assert_eq!(all_valid_moves(&board, Color::Black).len(), 20);
    }

    #[test]
    fn test_valid_moves_idempotent() {
        let board = Board::new(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            true,
        )
        .expect("Failed to parse FEN");
        let first = all_valid_moves(&board, Color::White);
        let second = all_valid_moves(&board, Color::White);
        assert_eq!(first, second);
        // Perft(1) of this position is 48.
        assert_eq!(first.len(), 48);
    }
}
