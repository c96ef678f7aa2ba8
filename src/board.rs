use std::fmt;
use std::ops;

use enum_map::{EnumMap, enum_map};
use strum::IntoEnumIterator;

use crate::coord::{NUM_RANKS, Position};
use crate::error::BoardError;
use crate::grid::Grid;
use crate::internal_error_message;
use crate::janitor::Janitor;
use crate::piece::{BoardEntity, PieceKind};
use crate::side::Side;


// Everything needed to take back a provisional move.
#[derive(Clone, Copy, Debug)]
struct Undo {
    from: Position,
    to: Position,
    moved: BoardEntity,
    captured: Option<BoardEntity>,
}

// The 9x10 board: who stands where, plus where each General is.
//
// `version` grows with every committed change and is what derived caches are keyed on.
// Provisional changes made by `scoped_move`/`scoped_remove` are reverted before the
// version could be observed, so they do not bump it.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    generals: EnumMap<Side, Position>,
    version: u64,
}

fn new_red(kind: PieceKind) -> Option<BoardEntity> { Some(BoardEntity::new(Side::Red, kind)) }

fn setup_black_pieces_mirrorlike(grid: &mut Grid) {
    for (pos, entity) in grid.occupied().map(|(pos, entity)| (pos, *entity)).collect::<Vec<_>>() {
        if entity.side == Side::Red {
            let mirror = Position::new(pos.file(), NUM_RANKS - pos.rank() - 1);
            assert!(grid[mirror].is_none(), "{:?}", grid);
            grid[mirror] = Some(BoardEntity { side: Side::Black, ..entity });
        }
    }
}

fn generate_standard_grid() -> Grid {
    use PieceKind::*;
    let mut grid = Grid::new();
    let back_rank = [Chariot, Horse, Elephant, Advisor, General, Advisor, Elephant, Horse, Chariot];
    for (file, kind) in back_rank.into_iter().enumerate() {
        grid[Position::new(file as i8, 0)] = new_red(kind);
    }
    grid[Position::new(1, 2)] = new_red(Cannon);
    grid[Position::new(7, 2)] = new_red(Cannon);
    for file in (0..9).step_by(2) {
        grid[Position::new(file, 3)] = new_red(Soldier);
    }
    setup_black_pieces_mirrorlike(&mut grid);
    grid
}

fn find_generals(grid: &Grid) -> Result<EnumMap<Side, Position>, BoardError> {
    let mut found: EnumMap<Side, Option<Position>> = enum_map! { _ => None };
    for (pos, entity) in grid.occupied() {
        if entity.kind == PieceKind::General {
            if found[entity.side].replace(pos).is_some() {
                return Err(BoardError::ExtraGeneral(entity.side));
            }
            if !pos.is_in_palace(entity.side) {
                return Err(BoardError::GeneralOutsidePalace(entity.side, pos));
            }
        }
    }
    let mut generals = enum_map! { _ => Position::new(0, 0) };
    for side in Side::iter() {
        generals[side] = found[side].ok_or(BoardError::MissingGeneral(side))?;
    }
    Ok(generals)
}

impl Board {
    // The canonical Xiangqi starting layout.
    pub fn standard() -> Self {
        Self::from_grid(generate_standard_grid())
            .unwrap_or_else(|err| panic!("{}", internal_error_message!("{}", err)))
    }

    // Validates that each side has exactly one General, standing inside its palace.
    pub fn from_grid(grid: Grid) -> Result<Self, BoardError> {
        let generals = find_generals(&grid)?;
        Ok(Board { grid, generals, version: 0 })
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn get(&self, pos: Position) -> Option<BoardEntity> { self.grid[pos] }
    pub fn general(&self, side: Side) -> Position { self.generals[side] }
    pub fn version(&self) -> u64 { self.version }

    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Position, PieceKind)> + '_ {
        self.grid
            .occupied()
            .filter(move |(_, entity)| entity.side == side)
            .map(|(pos, entity)| (pos, entity.kind))
    }

    // Commits a move. Legality is the caller's responsibility. Returns the captured entity.
    pub(crate) fn apply_move(&mut self, from: Position, to: Position) -> Option<BoardEntity> {
        let undo = self.move_unversioned(from, to);
        self.version += 1;
        undo.captured
    }

    // Makes a provisional move that is taken back when the returned guard is dropped.
    pub(crate) fn scoped_move(
        &mut self, from: Position, to: Position,
    ) -> impl ops::DerefMut<Target = Board> + '_ {
        let undo = self.move_unversioned(from, to);
        Janitor::new(self, move |board: &mut Board| board.take_back(undo))
    }

    // Provisionally lifts a piece off the board. Generals cannot be lifted.
    pub(crate) fn scoped_remove(&mut self, pos: Position) -> impl ops::DerefMut<Target = Board> + '_ {
        let original = self.grid[pos].take();
        assert!(
            original.is_none_or(|entity| entity.kind != PieceKind::General),
            "{}",
            internal_error_message!("attempt to lift a General from {}", pos)
        );
        Janitor::new(self, move |board: &mut Board| board.grid[pos] = original)
    }

    fn move_unversioned(&mut self, from: Position, to: Position) -> Undo {
        let moved = self.grid[from].take().unwrap_or_else(|| {
            panic!("{}", internal_error_message!("no piece to move on {}", from))
        });
        let captured = self.grid[to].replace(moved);
        if let Some(captured) = captured {
            assert!(
                captured.side != moved.side && captured.kind != PieceKind::General,
                "{}",
                internal_error_message!("{:?} on {} cannot capture {:?}", moved, from, captured)
            );
        }
        if moved.kind == PieceKind::General {
            self.generals[moved.side] = to;
        }
        Undo { from, to, moved, captured }
    }

    fn take_back(&mut self, undo: Undo) {
        self.grid[undo.from] = Some(undo.moved);
        self.grid[undo.to] = undo.captured;
        if undo.moved.kind == PieceKind::General {
            self.generals[undo.moved.side] = undo.from;
        }
    }
}

// Boards are equal when the same entities stand on the same squares. Versions are
// bookkeeping and do not take part.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool { self.grid == other.grid }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::display::render_board(self, None))
    }
}
