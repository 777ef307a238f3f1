//! Unfiltered move generation.
//!
//! Nothing in this module knows about check. `moves` is the pseudo-legal
//! move list a piece would offer a player; `attacks` is the set of squares a
//! piece bears on, which is what check and castling-path detection consume.
//! Neither calls into `legality`.

use arrayvec::ArrayVec;

use crate::board::{Board, CastleSide};
use crate::color::Color;
use crate::pieces::{Movement, Piece, PieceType};
use crate::position::{Offset, Position};

/// Destination squares for a single piece. A queen in the open has 27.
pub type MoveList = ArrayVec<Position, 32>;

/// Pseudo-legal destinations for the piece on `src`, including castling
/// squares for kings and home-corner rooks.
pub fn moves(board: &Board, src: Position) -> MoveList {
    let Some(piece) = board.get_piece(&src) else {
        debug_assert!(false, "no piece at {src}");
        return MoveList::new();
    };

    let mut moves = match piece.piece_type.movement() {
        Movement::Slide(directions) => sliding_moves(board, src, piece.color, directions),
        Movement::Step(offsets) => stepping_moves(board, src, piece.color, offsets),
        Movement::Pawn => pawn_moves(board, src, piece.color),
    };

    match piece.piece_type {
        PieceType::King => king_castling_moves(board, &piece, &mut moves),
        PieceType::Rook => rook_castling_moves(board, src, &piece, &mut moves),
        _ => {}
    }

    moves
}

/// Squares the piece on `src` attacks. Same geometry as `moves`, except
/// pawns cover both forward diagonals whether or not anything stands there,
/// pawn pushes are left out, and castling never appears.
pub fn attacks(board: &Board, src: Position) -> MoveList {
    let Some(piece) = board.get_piece(&src) else {
        debug_assert!(false, "no piece at {src}");
        return MoveList::new();
    };

    match piece.piece_type.movement() {
        Movement::Slide(directions) => sliding_moves(board, src, piece.color, directions),
        Movement::Step(offsets) => stepping_moves(board, src, piece.color, offsets),
        Movement::Pawn => forward_diagonals(src, piece.color)
            .into_iter()
            .filter(Position::is_on_board)
            .collect(),
    }
}

fn is_friendly(board: &Board, square: &Position, color: Color) -> bool {
    board.get_piece(square).is_some_and(|p| p.color == color)
}

pub fn sliding_moves(
    board: &Board,
    src: Position,
    color: Color,
    directions: &[Offset],
) -> MoveList {
    let mut moves = MoveList::new();

    for &direction in directions {
        let mut current = src + direction;

        while current.is_on_board() {
            if let Some(target) = board.get_piece(&current) {
                if target.color != color {
                    moves.push(current);
                }
                break;
            }

            moves.push(current);
            current = current + direction;
        }
    }

    moves
}

pub fn stepping_moves(board: &Board, src: Position, color: Color, offsets: &[Offset]) -> MoveList {
    offsets
        .iter()
        .map(|&offset| src + offset)
        .filter(|dst| dst.is_on_board() && !is_friendly(board, dst, color))
        .collect()
}

/// Captures, then pushes, then en passant.
pub fn pawn_moves(board: &Board, src: Position, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    diagonal_moves(board, src, color, &mut moves);
    vertical_moves(board, src, color, &mut moves);
    en_passant_moves(board, src, color, &mut moves);
    moves
}

fn forward_diagonals(src: Position, color: Color) -> [Position; 2] {
    let forward = color.forward();
    [
        src + Offset::new(1, forward),
        src + Offset::new(-1, forward),
    ]
}

fn diagonal_moves(board: &Board, src: Position, color: Color, moves: &mut MoveList) {
    for dst in forward_diagonals(src, color) {
        if dst.is_on_board() && board.get_piece(&dst).is_some_and(|p| p.color != color) {
            moves.push(dst);
        }
    }
}

fn vertical_moves(board: &Board, src: Position, color: Color, moves: &mut MoveList) {
    let one = src + Offset::new(0, color.forward());
    if !one.is_on_board() || board.get_piece(&one).is_some() {
        return;
    }
    moves.push(one);

    if src.row == color.pawn_start_row() {
        let two = one + Offset::new(0, color.forward());
        if board.get_piece(&two).is_none() {
            moves.push(two);
        }
    }
}

// The board only records en-passant state after a double step, and FEN
// loading rejects a target that is occupied, so the target is trusted.
fn en_passant_moves(board: &Board, src: Position, color: Color, moves: &mut MoveList) {
    let Some(ep) = board.en_passant() else {
        return;
    };

    if ep.color != color && forward_diagonals(src, color).contains(&ep.target) {
        push_unique(moves, ep.target);
    }
}

fn push_unique(moves: &mut MoveList, square: Position) {
    if !moves.contains(&square) {
        moves.push(square);
    }
}

fn king_castling_moves(board: &Board, king: &Piece, moves: &mut MoveList) {
    let row = king.color.home_row();
    for side in CastleSide::ALL {
        if board.can_castle(side, king.color) {
            push_unique(moves, Position::new(side.king_target_col(), row));
        }
    }
}

fn rook_castling_moves(board: &Board, src: Position, rook: &Piece, moves: &mut MoveList) {
    if let Some(side) = CastleSide::of_rook_square(src, rook.color) {
        if board.can_castle(side, rook.color) {
            push_unique(moves, Position::new(side.rook_target_col(), src.row));
        }
    }
}
