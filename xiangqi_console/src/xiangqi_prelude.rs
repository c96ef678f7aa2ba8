// What to put in prelude? The idea is to expose game concepts directly: sides, pieces, boards,
// the engine. Auxiliary concepts (notation, legality internals, test utils) remain behind
// namespaces.

pub use xiangqi::board::*;
pub use xiangqi::coord::*;
pub use xiangqi::display::*;
pub use xiangqi::engine::*;
pub use xiangqi::error::*;
pub use xiangqi::piece::*;
pub use xiangqi::side::*;
