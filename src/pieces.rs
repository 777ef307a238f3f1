use crate::color::Color;
use crate::directions::{DIAGONAL, KNIGHT, ROYAL, STRAIGHT};
use crate::position::Offset;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// The geometry a piece type moves with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    /// Rays along each offset until blocked or off board.
    Slide(&'static [Offset]),
    /// A single hop along each offset.
    Step(&'static [Offset]),
    Pawn,
}

impl PieceType {
    pub fn movement(&self) -> Movement {
        match self {
            PieceType::Pawn => Movement::Pawn,
            PieceType::Knight => Movement::Step(&KNIGHT),
            PieceType::Bishop => Movement::Slide(&DIAGONAL),
            PieceType::Rook => Movement::Slide(&STRAIGHT),
            PieceType::Queen => Movement::Slide(&ROYAL),
            PieceType::King => Movement::Step(&ROYAL),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    /// Set once the piece has been relocated by `Board::apply_move`.
    pub has_moved: bool,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Piece {
            piece_type,
            color,
            has_moved: false,
        }
    }

    pub fn is(&self, piece_type: PieceType, color: Color) -> bool {
        self.piece_type == piece_type && self.color == color
    }

    /// Unicode chess glyph for display.
    pub fn glyph(&self) -> char {
        match (self.color, self.piece_type) {
            (Color::White, PieceType::King) => '\u{2654}',
            (Color::White, PieceType::Queen) => '\u{2655}',
            (Color::White, PieceType::Rook) => '\u{2656}',
            (Color::White, PieceType::Bishop) => '\u{2657}',
            (Color::White, PieceType::Knight) => '\u{2658}',
            (Color::White, PieceType::Pawn) => '\u{2659}',
            (Color::Black, PieceType::King) => '\u{265a}',
            (Color::Black, PieceType::Queen) => '\u{265b}',
            (Color::Black, PieceType::Rook) => '\u{265c}',
            (Color::Black, PieceType::Bishop) => '\u{265d}',
            (Color::Black, PieceType::Knight) => '\u{265e}',
            (Color::Black, PieceType::Pawn) => '\u{265f}',
        }
    }

    pub fn to_char(&self) -> char {
        let c = match self.piece_type {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };

        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        let piece_type = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };

        Some(Piece::new(piece_type, color))
    }
}
