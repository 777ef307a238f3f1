//! Static offset tables for each movement geometry.

use crate::position::Offset;

pub const STRAIGHT: [Offset; 4] = [
    Offset::new(1, 0),
    Offset::new(0, 1),
    Offset::new(-1, 0),
    Offset::new(0, -1),
];

pub const DIAGONAL: [Offset; 4] = [
    Offset::new(1, 1),
    Offset::new(-1, 1),
    Offset::new(1, -1),
    Offset::new(-1, -1),
];

/// Straight followed by diagonal; used by the queen and the king.
pub const ROYAL: [Offset; 8] = [
    STRAIGHT[0],
    STRAIGHT[1],
    STRAIGHT[2],
    STRAIGHT[3],
    DIAGONAL[0],
    DIAGONAL[1],
    DIAGONAL[2],
    DIAGONAL[3],
];

pub const KNIGHT: [Offset; 8] = [
    Offset::new(-2, 1),
    Offset::new(-1, 2),
    Offset::new(2, 1),
    Offset::new(-2, -1),
    Offset::new(1, -2),
    Offset::new(-1, -2),
    Offset::new(2, -1),
    Offset::new(1, 2),
];
