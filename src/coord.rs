use std::fmt;
use std::ops;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::side::Side;


pub const NUM_FILES: i8 = 9;
pub const NUM_RANKS: i8 = 10;
pub const NUM_SQUARES: usize = (NUM_FILES as usize) * (NUM_RANKS as usize);

// The river runs between rank 4 and rank 5.
const RED_HALF_LAST_RANK: i8 = 4;
const PALACE_FILES: ops::RangeInclusive<i8> = 3..=5;
const PALACE_DEPTH: i8 = 3;


// Rank from a side's point of view: 0 is the side's own back rank.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct SubjectiveRank {
    idx: i8, // 0-based
}

impl SubjectiveRank {
    pub const fn from_zero_based(idx: i8) -> Self {
        assert!(0 <= idx && idx < NUM_RANKS);
        Self { idx }
    }
    pub const fn to_zero_based(self) -> i8 { self.idx }
    pub const fn to_rank(self, side: Side) -> i8 {
        match side {
            Side::Red => self.idx,
            Side::Black => NUM_RANKS - self.idx - 1,
        }
    }
    pub const fn from_rank(rank: i8, side: Side) -> Self {
        match side {
            Side::Red => Self::from_zero_based(rank),
            Side::Black => Self::from_zero_based(NUM_RANKS - rank - 1),
        }
    }
}


// A step between two squares. Never stored on the board, so it is not bounds-checked.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Delta {
    pub file: i8,
    pub rank: i8,
}

impl Delta {
    pub const ORTHOGONAL: [Delta; 4] =
        [Delta::new(1, 0), Delta::new(-1, 0), Delta::new(0, 1), Delta::new(0, -1)];
    pub const DIAGONAL: [Delta; 4] =
        [Delta::new(1, 1), Delta::new(1, -1), Delta::new(-1, 1), Delta::new(-1, -1)];

    pub const fn new(file: i8, rank: i8) -> Self { Self { file, rank } }

    pub fn is_orthogonal(self) -> bool { (self.file == 0) != (self.rank == 0) }

    // Unit step in the direction of an orthogonal or diagonal delta.
    pub fn signum(self) -> Self { Self::new(self.file.signum(), self.rank.signum()) }

    // Half of the delta, truncated toward zero. For a diagonal two-step this is the
    // midpoint offset; for an L-shaped step it is the orthogonal "leg" along the long
    // component, since the short component truncates to zero.
    pub fn halved(self) -> Self { Self::new(self.file / 2, self.rank / 2) }
}

impl ops::Mul<i8> for Delta {
    type Output = Self;
    fn mul(self, k: i8) -> Self::Output { Self::new(self.file * k, self.rank * k) }
}

impl ops::Neg for Delta {
    type Output = Self;
    fn neg(self) -> Self::Output { Self::new(-self.file, -self.rank) }
}


// A square on the 9x10 board. Always in bounds: construction outside the board either
// panics (`new`) or yields `None` (`try_new`, `offset`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    file: i8,
    rank: i8,
}

impl Position {
    pub const fn new(file: i8, rank: i8) -> Self {
        assert!(Self::in_bounds(file, rank));
        Self { file, rank }
    }
    pub const fn try_new(file: i8, rank: i8) -> Option<Self> {
        if Self::in_bounds(file, rank) { Some(Self { file, rank }) } else { None }
    }
    pub const fn in_bounds(file: i8, rank: i8) -> bool {
        0 <= file && file < NUM_FILES && 0 <= rank && rank < NUM_RANKS
    }

    pub const fn file(self) -> i8 { self.file }
    pub const fn rank(self) -> i8 { self.rank }

    // Rank-major order: a0, b0, ..., i0, a1, ...
    pub fn all() -> impl Iterator<Item = Position> + Clone {
        (0..NUM_RANKS).cartesian_product(0..NUM_FILES).map(|(rank, file)| Position { file, rank })
    }

    pub fn offset(self, delta: Delta) -> Option<Position> {
        Self::try_new(self.file + delta.file, self.rank + delta.rank)
    }

    // Squares strictly between `self` and `other`, which must share a file or a rank.
    pub fn squares_between(self, other: Position) -> impl Iterator<Item = Position> {
        let step = (other - self).signum();
        assert!(step.is_orthogonal(), "{:?} and {:?} are not on one line", self, other);
        let mut pos = self;
        std::iter::from_fn(move || {
            pos = pos.offset(step)?;
            (pos != other).then_some(pos)
        })
    }

    pub fn subjective_rank(self, side: Side) -> SubjectiveRank {
        SubjectiveRank::from_rank(self.rank, side)
    }

    pub fn is_in_palace(self, side: Side) -> bool {
        PALACE_FILES.contains(&self.file) && self.subjective_rank(side).to_zero_based() < PALACE_DEPTH
    }

    pub fn is_on_own_half(self, side: Side) -> bool {
        self.subjective_rank(side).to_zero_based() <= RED_HALF_LAST_RANK
    }

    pub fn has_crossed_river(self, side: Side) -> bool { !self.is_on_own_half(side) }

    // ICCS-style coordinates: file letter 'a'..'i' (left to right from Red), rank digit
    // '0'..'9' (from Red's back rank).
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let (file_char, rank_char) = s.trim().chars().collect_tuple()?;
        let file = (file_char.to_ascii_lowercase() as i32) - ('a' as i32);
        let rank = rank_char.to_digit(10)? as i32;
        Self::try_new(file.try_into().ok()?, rank.try_into().ok()?)
    }
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file as u8) as char, self.rank)
    }
}

impl ops::Sub for Position {
    type Output = Delta;
    fn sub(self, other: Self) -> Self::Output {
        Delta::new(self.file - other.file, self.rank - other.rank)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_algebraic())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
