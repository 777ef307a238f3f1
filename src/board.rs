use arrayvec::ArrayVec;
use std::fmt;
use std::ops::{Range, RangeInclusive};

use crate::attacks;
use crate::color::Color;
use crate::error::{FenError, MoveError};
use crate::legality;
use crate::movegen::{self, MoveList};
use crate::pieces::{Piece, PieceType};
use crate::position::{BOARD_SIZE, Offset, Position};
use crate::r#move::{Move, MoveFlags};

pub const STANDARD_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const SQUARE_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);
const KING_HOME_COL: i8 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Towards the a-file.
    Queenside,
    /// Towards the h-file.
    Kingside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Queenside, CastleSide::Kingside];

    pub fn rook_home_col(&self) -> i8 {
        match self {
            CastleSide::Queenside => 0,
            CastleSide::Kingside => 7,
        }
    }

    pub fn rook_target_col(&self) -> i8 {
        match self {
            CastleSide::Queenside => 3,
            CastleSide::Kingside => 5,
        }
    }

    pub fn king_target_col(&self) -> i8 {
        match self {
            CastleSide::Queenside => 2,
            CastleSide::Kingside => 6,
        }
    }

    /// Columns between king and rook, which must be empty.
    fn between_cols(&self) -> Range<i8> {
        match self {
            CastleSide::Queenside => 1..KING_HOME_COL,
            CastleSide::Kingside => KING_HOME_COL + 1..7,
        }
    }

    /// Columns the king starts on, crosses and lands on, which must not be attacked.
    fn king_path_cols(&self) -> RangeInclusive<i8> {
        match self {
            CastleSide::Queenside => 2..=KING_HOME_COL,
            CastleSide::Kingside => KING_HOME_COL..=6,
        }
    }

    /// The side whose rook starts on `square`, if any.
    pub fn of_rook_square(square: Position, color: Color) -> Option<CastleSide> {
        if square.row != color.home_row() {
            return None;
        }
        CastleSide::ALL
            .into_iter()
            .find(|side| side.rook_home_col() == square.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::new()
    }
}

impl CastlingRights {
    pub fn new() -> Self {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn none() -> Self {
        CastlingRights {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    pub fn has_kingside(&self, color: Color) -> bool {
        self.has(CastleSide::Kingside, color)
    }

    pub fn has_queenside(&self, color: Color) -> bool {
        self.has(CastleSide::Queenside, color)
    }

    pub fn has(&self, side: CastleSide, color: Color) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside,
            (Color::White, CastleSide::Queenside) => self.white_queenside,
            (Color::Black, CastleSide::Kingside) => self.black_kingside,
            (Color::Black, CastleSide::Queenside) => self.black_queenside,
        }
    }

    fn slot(&mut self, side: CastleSide, color: Color) -> &mut bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => &mut self.white_kingside,
            (Color::White, CastleSide::Queenside) => &mut self.white_queenside,
            (Color::Black, CastleSide::Kingside) => &mut self.black_kingside,
            (Color::Black, CastleSide::Queenside) => &mut self.black_queenside,
        }
    }

    pub fn grant(&mut self, side: CastleSide, color: Color) {
        *self.slot(side, color) = true;
    }

    /// Returns whether the right was held before.
    pub fn revoke(&mut self, side: CastleSide, color: Color) -> bool {
        std::mem::replace(self.slot(side, color), false)
    }

    pub fn to_fen(&self) -> String {
        let mut s = String::new();
        if self.white_kingside {
            s.push('K');
        }
        if self.white_queenside {
            s.push('Q');
        }
        if self.black_kingside {
            s.push('k');
        }
        if self.black_queenside {
            s.push('q');
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }
}

/// En-passant opportunity left by the last move. Cleared by the next move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnPassant {
    /// Square the double-stepped pawn passed over.
    pub target: Position,
    /// Square of the pawn that can be taken.
    pub captured: Position,
    /// Color of the pawn that double-stepped.
    pub color: Color,
}

impl EnPassant {
    /// Rebuild the state from a FEN target square.
    pub fn from_target(target: Position) -> Option<Self> {
        [Color::White, Color::Black]
            .into_iter()
            .find(|color| target.row == color.pawn_start_row() + color.forward())
            .map(|color| EnPassant {
                target,
                captured: target + Offset::new(0, color.forward()),
                color,
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; SQUARE_COUNT],
    turn: Color,
    castling_rights: CastlingRights,
    castling_enabled: bool,
    en_passant: Option<EnPassant>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Board {
    /// Load a full six-field FEN. With `castling_enabled` false the castling
    /// field is validated but no rights are granted.
    pub fn new(fen: &str, castling_enabled: bool) -> Result<Self, FenError> {
        let mut parts: ArrayVec<&str, 6> = ArrayVec::new();
        for part in fen.split_whitespace() {
            parts
                .try_push(part)
                .map_err(|_| FenError::FieldCount(fen.split_whitespace().count()))?;
        }

        if parts.len() != 6 {
            return Err(FenError::FieldCount(parts.len()));
        }

        let mut board = Board::empty();
        board.castling_enabled = castling_enabled;
        board.load_placement(parts[0])?;

        board.turn = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        for c in parts[2].chars() {
            let (side, color) = match c {
                'K' => (CastleSide::Kingside, Color::White),
                'Q' => (CastleSide::Queenside, Color::White),
                'k' => (CastleSide::Kingside, Color::Black),
                'q' => (CastleSide::Queenside, Color::Black),
                '-' => continue,
                _ => return Err(FenError::InvalidCastling(c)),
            };
            if castling_enabled {
                board.castling_rights.grant(side, color);
            }
        }

        if parts[3] != "-" {
            let target = Position::from_algebraic(parts[3])?;
            board.en_passant =
                Some(EnPassant::from_target(target).ok_or(FenError::EnPassantRow(target))?);
        }

        board.halfmove_clock = parts[4]
            .parse()
            .map_err(|_| FenError::InvalidHalfmove(parts[4].to_string()))?;
        board.fullmove_number = parts[5]
            .parse()
            .map_err(|_| FenError::InvalidFullmove(parts[5].to_string()))?;

        for color in [Color::White, Color::Black] {
            if board.find_king(color).is_none() {
                return Err(FenError::MissingKing(color));
            }
        }

        if let Some(ep) = board.en_passant {
            let pawn_behind = board
                .get_piece(&ep.captured)
                .is_some_and(|p| p.is(PieceType::Pawn, ep.color));
            if board.get_piece(&ep.target).is_some() || !pawn_behind {
                return Err(FenError::EnPassantMismatch(ep.target));
            }
        }

        tracing::debug!(fen, castling_enabled, "loaded board");
        Ok(board)
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_FEN, true).expect("Failed to create standard board")
    }

    /// No pieces, white to move, no castling rights.
    pub fn empty() -> Self {
        Board {
            squares: [None; SQUARE_COUNT],
            turn: Color::White,
            castling_rights: CastlingRights::none(),
            castling_enabled: true,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn castling_rights(&self) -> &CastlingRights {
        &self.castling_rights
    }

    pub fn castling_enabled(&self) -> bool {
        self.castling_enabled
    }

    pub fn en_passant(&self) -> Option<EnPassant> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn get_piece(&self, pos: &Position) -> Option<Piece> {
        if pos.is_on_board() {
            self.squares[pos.index()]
        } else {
            None
        }
    }

    pub fn set_piece(&mut self, pos: &Position, piece: Option<Piece>) {
        if pos.is_on_board() {
            self.squares[pos.index()] = piece;
        }
    }

    pub fn clear(&mut self) {
        self.squares = [None; SQUARE_COUNT];
    }

    /// Occupied squares in row-major order from a1.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(col, row)))
            .filter_map(|pos| self.get_piece(&pos).map(|piece| (pos, piece)))
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces(color)
            .find(|(_, piece)| piece.piece_type == PieceType::King)
            .map(|(pos, _)| pos)
    }

    pub fn is_square_attacked(&self, square: Position, by_color: Color) -> bool {
        attacks::is_square_attacked(self, square, by_color)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        attacks::is_in_check(self, color)
    }

    /// Pseudo-legal destinations of the piece on `src`.
    pub fn moves(&self, src: Position) -> MoveList {
        movegen::moves(self, src)
    }

    /// Legal destinations of the piece on `src`.
    pub fn valid_moves(&self, src: Position) -> MoveList {
        legality::valid_moves(self, src)
    }

    /// Castling is available when the right is held, king and rook sit
    /// unmoved on their home squares, the squares between them are empty,
    /// and none of the squares the king stands on, crosses or lands on is
    /// attacked.
    pub fn can_castle(&self, side: CastleSide, color: Color) -> bool {
        if !self.castling_enabled || !self.castling_rights.has(side, color) {
            return false;
        }

        let row = color.home_row();
        let unmoved = |col: i8, piece_type: PieceType| {
            self.get_piece(&Position::new(col, row))
                .is_some_and(|p| p.is(piece_type, color) && !p.has_moved)
        };
        if !unmoved(KING_HOME_COL, PieceType::King) || !unmoved(side.rook_home_col(), PieceType::Rook)
        {
            return false;
        }

        if side
            .between_cols()
            .any(|col| self.get_piece(&Position::new(col, row)).is_some())
        {
            return false;
        }

        !side
            .king_path_cols()
            .any(|col| self.is_square_attacked(Position::new(col, row), color.opposite()))
    }

    /// Play `src -> dst`, promoting to a queen if a pawn reaches its last row.
    ///
    /// No legality check is made: the caller picks `dst` from `valid_moves`.
    ///
    /// A home-corner rook moving to its castling square (d1/f1, d8/f8) while
    /// `can_castle` holds for that side castles, bringing the king along. A
    /// plain rook move to that square cannot be played while castling is
    /// available.
    pub fn apply_move(&mut self, src: Position, dst: Position) -> Result<Move, MoveError> {
        self.play(src, dst, PieceType::Queen)
    }

    /// Like `apply_move`, with the piece a pawn promotes to. The choice is
    /// ignored when the move is not a promotion.
    pub fn apply_move_with_promotion(
        &mut self,
        src: Position,
        dst: Position,
        promotion: PieceType,
    ) -> Result<Move, MoveError> {
        if matches!(promotion, PieceType::Pawn | PieceType::King) {
            return Err(MoveError::InvalidPromotion(promotion));
        }
        self.play(src, dst, promotion)
    }

    fn play(
        &mut self,
        src: Position,
        dst: Position,
        promotion: PieceType,
    ) -> Result<Move, MoveError> {
        for square in [src, dst] {
            if !square.is_on_board() {
                return Err(MoveError::OffBoard(square));
            }
        }
        let piece = self.get_piece(&src).ok_or(MoveError::EmptySquare(src))?;
        let color = piece.color;

        // Decided before anything moves, while the rook is still home.
        let rook_castle = match piece.piece_type {
            PieceType::Rook => CastleSide::of_rook_square(src, color).filter(|side| {
                dst == Position::new(side.rook_target_col(), src.row)
                    && self.can_castle(*side, color)
            }),
            _ => None,
        };

        let mut flags = MoveFlags::empty();
        let captured = self.get_piece(&dst);
        if captured.is_some() {
            flags |= MoveFlags::CAPTURE;
        }

        if piece.piece_type == PieceType::Pawn && captured.is_none() && src.col != dst.col {
            if let Some(ep) = self
                .en_passant
                .filter(|ep| ep.target == dst && ep.color != color)
            {
                self.set_piece(&ep.captured, None);
                flags |= MoveFlags::CAPTURE | MoveFlags::EN_PASSANT;
            }
        }

        self.set_piece(&src, None);
        let landed = if piece.piece_type == PieceType::Pawn && dst.row == color.promotion_row() {
            flags |= MoveFlags::PROMOTION;
            Piece {
                piece_type: promotion,
                color,
                has_moved: true,
            }
        } else {
            Piece {
                has_moved: true,
                ..piece
            }
        };
        self.set_piece(&dst, Some(landed));

        let home_row = color.home_row();
        if piece.piece_type == PieceType::King
            && src == Position::new(KING_HOME_COL, home_row)
            && dst.row == home_row
            && (dst.col - src.col).abs() == 2
        {
            let side = if dst.col > src.col {
                CastleSide::Kingside
            } else {
                CastleSide::Queenside
            };
            self.relocate(
                Position::new(side.rook_home_col(), home_row),
                Position::new(side.rook_target_col(), home_row),
            );
            flags |= MoveFlags::CASTLE;
        }

        if let Some(side) = rook_castle {
            self.relocate(
                Position::new(KING_HOME_COL, home_row),
                Position::new(side.king_target_col(), home_row),
            );
            flags |= MoveFlags::CASTLE;
        }

        self.update_castling_rights(&piece, src, dst);

        self.en_passant = None;
        if piece.piece_type == PieceType::Pawn && (dst.row - src.row).abs() == 2 {
            flags |= MoveFlags::DOUBLE_PUSH;
            self.en_passant = Some(EnPassant {
                target: Position::new(src.col, (src.row + dst.row) / 2),
                captured: dst,
                color,
            });
        }

        if piece.piece_type == PieceType::Pawn || flags.contains(MoveFlags::CAPTURE) {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.turn = color.opposite();

        let mv = if flags.contains(MoveFlags::PROMOTION) {
            Move::with_promotion(src, dst, flags, promotion)
        } else {
            Move::new(src, dst, flags)
        };
        tracing::trace!(%src, %dst, ?flags, "applied move");
        Ok(mv)
    }

    fn relocate(&mut self, from: Position, to: Position) {
        if let Some(piece) = self.get_piece(&from) {
            self.set_piece(&from, None);
            self.set_piece(
                &to,
                Some(Piece {
                    has_moved: true,
                    ..piece
                }),
            );
        }
    }

    fn update_castling_rights(&mut self, piece: &Piece, src: Position, dst: Position) {
        if piece.piece_type == PieceType::King {
            for side in CastleSide::ALL {
                self.revoke_castling(side, piece.color);
            }
        }

        // A rook leaving its corner, or anything landing on one.
        for square in [src, dst] {
            for color in [Color::White, Color::Black] {
                if let Some(side) = CastleSide::of_rook_square(square, color) {
                    self.revoke_castling(side, color);
                }
            }
        }
    }

    fn revoke_castling(&mut self, side: CastleSide, color: Color) {
        if self.castling_rights.revoke(side, color) {
            tracing::trace!(?side, %color, "castling right revoked");
        }
    }

    /// Whether some pawn can legally take en passant right now.
    fn has_legal_en_passant(&self) -> bool {
        let Some(ep) = self.en_passant else {
            return false;
        };

        self.pieces(ep.color.opposite())
            .filter(|(_, piece)| piece.piece_type == PieceType::Pawn)
            .any(|(pos, _)| legality::valid_moves(self, pos).contains(&ep.target))
    }

    fn placement_to_fen(&self) -> String {
        let mut fen = String::new();

        for row in (0..BOARD_SIZE).rev() {
            let mut empty_count = 0;

            for col in 0..BOARD_SIZE {
                if let Some(piece) = self.get_piece(&Position::new(col, row)) {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }

            if row > 0 {
                fen.push('/');
            }
        }

        fen
    }

    /// Full FEN. The en-passant square is only written when a capture is
    /// actually available.
    pub fn to_fen(&self) -> String {
        let turn = match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let en_passant = match self.en_passant {
            Some(ep) if self.has_legal_en_passant() => ep.target.to_algebraic(),
            _ => "-".to_string(),
        };

        format!(
            "{} {} {} {} {} {}",
            self.placement_to_fen(),
            turn,
            self.castling_rights.to_fen(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    fn load_placement(&mut self, placement: &str) -> Result<(), FenError> {
        self.clear();

        let rows: ArrayVec<&str, 8> = placement.split('/').take(8).collect();
        let row_count = placement.split('/').count();
        if row_count != BOARD_SIZE as usize {
            return Err(FenError::RowCount(row_count));
        }

        for (row_idx, row_str) in rows.iter().enumerate() {
            let row = BOARD_SIZE - 1 - row_idx as i8;
            let mut col: i8 = 0;

            for c in row_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as i8;
                } else if let Some(piece) = Piece::from_char(c) {
                    if col >= BOARD_SIZE {
                        return Err(FenError::RowWidth(row as usize + 1));
                    }
                    self.set_piece(&Position::new(col, row), Some(piece));
                    col += 1;
                } else {
                    return Err(FenError::UnknownPiece(c));
                }

                if col > BOARD_SIZE {
                    return Err(FenError::RowWidth(row as usize + 1));
                }
            }

            if col != BOARD_SIZE {
                return Err(FenError::RowWidth(row as usize + 1));
            }
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..BOARD_SIZE {
                match self.get_piece(&Position::new(col, row)) {
                    Some(piece) => write!(f, "{} ", piece.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }

        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{} ", (b'a' + col as u8) as char)?;
        }
        Ok(())
    }
}
