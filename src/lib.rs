#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod coord;
pub mod display;
pub mod engine;
pub mod error;
pub mod fen;
pub mod grid;
pub mod janitor;
pub mod legality;
pub mod movement;
pub mod notation;
pub mod piece;
pub mod rules;
pub mod side;
pub mod snapshot;
pub mod test_util;
