use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::fen::{self, FenError, FenPosition};
use crate::side::Side;


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum StartingPosition {
    Standard,
    // Any position in Xiangqi FEN, either the board field alone or the full six fields.
    Fen(String),
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct XiangqiRules {
    pub starting_position: StartingPosition,
}

impl XiangqiRules {
    pub fn standard() -> Self { Self { starting_position: StartingPosition::Standard } }

    pub fn from_fen(fen: impl Into<String>) -> Self {
        Self { starting_position: StartingPosition::Fen(fen.into()) }
    }

    pub fn starting_position(&self) -> Result<FenPosition, FenError> {
        match &self.starting_position {
            StartingPosition::Standard => Ok(FenPosition {
                board: Board::standard(),
                active_side: Side::Red,
                fullmove_number: 1,
            }),
            StartingPosition::Fen(fen) => fen::position_from_fen(fen),
        }
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn serde_round_trip() {
        let rules = XiangqiRules::from_fen("4k4/9/9/9/9/9/9/9/9/3K5 b - - 0 3");
        let json = serde_json::to_string(&rules).unwrap();
        assert_eq!(serde_json::from_str::<XiangqiRules>(&json).unwrap(), rules);

        let position = rules.starting_position().unwrap();
        assert_eq!(position.active_side, Side::Black);
        assert_eq!(position.fullmove_number, 3);
    }

    #[test]
    fn standard_matches_standard_fen() {
        let position = XiangqiRules::standard().starting_position().unwrap();
        assert_eq!(position.board, fen::board_from_fen(fen::STANDARD_FEN).unwrap());
    }
}
