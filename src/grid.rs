use std::{fmt, ops};

use ndarray::{Array, Array2};
use serde::{Deserialize, Serialize};

use crate::coord::{NUM_FILES, NUM_RANKS, Position};
use crate::piece::BoardEntity;


pub type Grid = GenericGrid<BoardEntity>;

// Fixed 10x9 arena indexed by (rank, file).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericGrid<T: Clone> {
    data: Array2<Option<T>>,
}

impl<T: Clone> GenericGrid<T> {
    pub fn new() -> Self {
        GenericGrid {
            data: Array::from_elem((NUM_RANKS as usize, NUM_FILES as usize), None),
        }
    }

    pub fn is_free(&self, pos: Position) -> bool { self[pos].is_none() }

    // Occupied squares in rank-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        Position::all().filter_map(|pos| self[pos].as_ref().map(|v| (pos, v)))
    }

    pub fn num_occupied(&self) -> usize { self.data.iter().filter(|v| v.is_some()).count() }
}

impl<T: Clone> ops::Index<Position> for GenericGrid<T> {
    type Output = Option<T>;
    fn index(&self, pos: Position) -> &Self::Output { &self.data[position_to_index(pos)] }
}

impl<T: Clone> ops::IndexMut<Position> for GenericGrid<T> {
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        &mut self.data[position_to_index(pos)]
    }
}

// `Position` is bounds-checked on construction, so indexing cannot fail.
fn position_to_index(pos: Position) -> [usize; 2] { [pos.rank() as usize, pos.file() as usize] }

fn debug_format_entity(entity: &BoardEntity) -> String {
    format!("{:?}-{:?}", entity.side, entity.kind)
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid ")?;
        f.debug_map()
            .entries(
                self.occupied()
                    .map(|(pos, entity)| (pos.to_algebraic(), debug_format_entity(entity))),
            )
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;
    use crate::side::Side;

    #[test]
    fn index_and_occupied() {
        let mut g = Grid::new();
        let a0 = Position::new(0, 0);
        let i9 = Position::new(8, 9);
        g[a0] = Some(BoardEntity::new(Side::Red, PieceKind::Chariot));
        g[i9] = Some(BoardEntity::new(Side::Black, PieceKind::Chariot));
        assert!(!g.is_free(a0));
        assert!(g.is_free(Position::new(1, 0)));
        assert_eq!(g.num_occupied(), 2);
        let occupied: Vec<_> = g.occupied().map(|(pos, _)| pos).collect();
        assert_eq!(occupied, vec![a0, i9]);
        g[a0] = None;
        assert_eq!(g.num_occupied(), 1);
    }
}
