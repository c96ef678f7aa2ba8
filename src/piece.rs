use derive_new::new;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::side::Side;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

// The occupant of a square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
pub struct BoardEntity {
    pub side: Side,
    pub kind: PieceKind,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::General => "General",
            PieceKind::Advisor => "Advisor",
            PieceKind::Elephant => "Elephant",
            PieceKind::Horse => "Horse",
            PieceKind::Chariot => "Chariot",
            PieceKind::Cannon => "Cannon",
            PieceKind::Soldier => "Soldier",
        }
    }

    // Upper-case FEN letter. Chosen to match the common Xiangqi FEN dialect, which borrows
    // chess letters: King, Bishop, kNight, Rook, Pawn.
    pub fn to_fen_char(self) -> char {
        match self {
            PieceKind::General => 'K',
            PieceKind::Advisor => 'A',
            PieceKind::Elephant => 'B',
            PieceKind::Horse => 'N',
            PieceKind::Chariot => 'R',
            PieceKind::Cannon => 'C',
            PieceKind::Soldier => 'P',
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'K' => Some(PieceKind::General),
            'A' => Some(PieceKind::Advisor),
            'B' => Some(PieceKind::Elephant),
            'N' => Some(PieceKind::Horse),
            'R' => Some(PieceKind::Chariot),
            'C' => Some(PieceKind::Cannon),
            'P' => Some(PieceKind::Soldier),
            _ => None,
        }
    }

    // Letter used in WXF move notation.
    pub fn to_wxf_char(self) -> char {
        match self {
            PieceKind::General => 'K',
            PieceKind::Advisor => 'A',
            PieceKind::Elephant => 'E',
            PieceKind::Horse => 'H',
            PieceKind::Chariot => 'R',
            PieceKind::Cannon => 'C',
            PieceKind::Soldier => 'P',
        }
    }

    // Accepts both the WXF letters and the FEN ones, plus 'G' and 'S'.
    pub fn from_wxf_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'K' | 'G' => Some(PieceKind::General),
            'A' => Some(PieceKind::Advisor),
            'E' | 'B' => Some(PieceKind::Elephant),
            'H' | 'N' => Some(PieceKind::Horse),
            'R' => Some(PieceKind::Chariot),
            'C' => Some(PieceKind::Cannon),
            'P' | 'S' => Some(PieceKind::Soldier),
            _ => None,
        }
    }
}

impl BoardEntity {
    pub fn to_fen_char(self) -> char {
        let ch = self.kind.to_fen_char();
        match self.side {
            Side::Red => ch,
            Side::Black => ch.to_ascii_lowercase(),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let kind = PieceKind::from_fen_char(ch)?;
        let side = if ch.is_ascii_uppercase() { Side::Red } else { Side::Black };
        Some(BoardEntity { side, kind })
    }
}

pub fn piece_to_pictogram(kind: PieceKind, side: Side) -> char {
    use self::PieceKind::*;
    use self::Side::*;
    match (side, kind) {
        (Red, General) => '帥',
        (Red, Advisor) => '仕',
        (Red, Elephant) => '相',
        (Red, Horse) => '傌',
        (Red, Chariot) => '俥',
        (Red, Cannon) => '炮',
        (Red, Soldier) => '兵',
        (Black, General) => '將',
        (Black, Advisor) => '士',
        (Black, Elephant) => '象',
        (Black, Horse) => '馬',
        (Black, Chariot) => '車',
        (Black, Cannon) => '砲',
        (Black, Soldier) => '卒',
    }
}
