// The public face of the rule engine: one game, moved forward one accepted move at a time.
//
// Derived state (legal moves, checkers, game status) lives in `Analysis`, which is computed
// lazily on the first query after a move and tagged with the board version it describes.
// The engine is `Send + Sync`: wrap it in a lock to share between a move producer and a
// renderer. Writers need `&mut self`, so a reader never sees a half-applied move.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use derive_new::new;
use enum_map::{EnumMap, enum_map};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use static_assertions::assert_impl_all;

use crate::board::Board;
use crate::coord::Position;
use crate::error::{BoardError, InvalidMove, InvalidMoveReason, TurnError};
use crate::fen::{self, FenError, FenPosition};
use crate::internal_error_message;
use crate::legality::{self, MoveTable};
use crate::notation;
use crate::piece::BoardEntity;
use crate::rules::XiangqiRules;
use crate::side::Side;
use crate::snapshot;


#[derive(Clone, Copy, PartialEq, Eq, Debug, new, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    pub moved: BoardEntity,
    pub captured: Option<BoardEntity>,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.captured.is_some() { 'x' } else { '-' };
        write!(f, "{} {}{}{}", self.moved.kind.name(), self.from, separator, self.to)
    }
}

// In terminal states the side is the one left without a legal move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Checkmate(Side),
    Stalemate(Side),
}

impl GameStatus {
    pub fn is_active(self) -> bool { self == GameStatus::Active }
}

#[derive(Clone, Debug)]
struct Analysis {
    version: u64,
    // Legal destinations for every piece of the side to move.
    legal_moves: MoveTable,
    checkers: EnumMap<Side, Vec<Position>>,
    status: GameStatus,
}

fn analyze(board: &Board, active_side: Side) -> Analysis {
    let mut scratch = board.clone();
    let legal_moves = legality::legal_moves(&mut scratch, active_side);
    let checkers = enum_map! { side => legality::checkers(board, side) };
    let status = if legality::has_legal_move(&legal_moves) {
        GameStatus::Active
    } else if !checkers[active_side].is_empty() {
        GameStatus::Checkmate(active_side)
    } else {
        GameStatus::Stalemate(active_side)
    };
    debug!(
        "Analyzed board version {}: {} legal moves for {:?}, status {:?}",
        board.version(),
        legal_moves.values().map(Vec::len).sum::<usize>(),
        active_side,
        status
    );
    match status {
        GameStatus::Active => {}
        GameStatus::Checkmate(side) => info!("{side:?} is checkmated, {:?} wins", side.opponent()),
        GameStatus::Stalemate(side) => info!("{side:?} has no moves, {:?} wins", side.opponent()),
    }
    Analysis { version: board.version(), legal_moves, checkers, status }
}

#[derive(Clone, Debug)]
pub struct XiangqiEngine {
    rules: XiangqiRules,
    board: Board,
    starting_side: Side,
    starting_fullmove_number: u32,
    active_side: Side,
    history: Vec<MoveRecord>,
    analysis: OnceLock<Analysis>,
}

assert_impl_all!(XiangqiEngine: Send, Sync);

impl XiangqiEngine {
    pub fn new(rules: XiangqiRules) -> Result<Self, FenError> {
        let position = rules.starting_position()?;
        Ok(Self::with_position(rules, position)?)
    }

    pub fn standard() -> Self {
        Self::new(XiangqiRules::standard())
            .unwrap_or_else(|err| panic!("{}", internal_error_message!("{}", err)))
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> { Self::new(XiangqiRules::from_fen(fen)) }

    pub fn from_position(board: Board, active_side: Side) -> Result<Self, BoardError> {
        let rules = XiangqiRules::from_fen(fen::position_to_fen(&board, active_side, 1));
        Self::with_position(rules, FenPosition { board, active_side, fullmove_number: 1 })
    }

    fn with_position(rules: XiangqiRules, position: FenPosition) -> Result<Self, BoardError> {
        let FenPosition { board, active_side, fullmove_number } = position;
        let inactive_side = active_side.opponent();
        if legality::is_in_check(&board, inactive_side) {
            return Err(BoardError::InactiveSideInCheck(inactive_side));
        }
        Ok(XiangqiEngine {
            rules,
            board,
            starting_side: active_side,
            starting_fullmove_number: fullmove_number,
            active_side,
            history: Vec::new(),
            analysis: OnceLock::new(),
        })
    }

    pub fn rules(&self) -> &XiangqiRules { &self.rules }
    pub fn board(&self) -> &Board { &self.board }
    pub fn active_side(&self) -> Side { self.active_side }
    pub fn history(&self) -> &[MoveRecord] { &self.history }
    pub fn last_move(&self) -> Option<&MoveRecord> { self.history.last() }

    pub fn fullmove_number(&self) -> u32 {
        let black_started = u32::from(self.starting_side == Side::Black);
        let plies = u32::try_from(self.history.len()).unwrap_or(u32::MAX);
        self.starting_fullmove_number.saturating_add(plies.saturating_add(black_started) / 2)
    }

    pub fn fen(&self) -> String {
        fen::position_to_fen(&self.board, self.active_side, self.fullmove_number())
    }

    fn analysis(&self) -> &Analysis {
        let analysis = self.analysis.get_or_init(|| analyze(&self.board, self.active_side));
        assert_eq!(
            analysis.version,
            self.board.version(),
            "{}",
            internal_error_message!("legality cache does not match the board")
        );
        analysis
    }

    pub fn status(&self) -> GameStatus { self.analysis().status }
    pub fn is_active(&self) -> bool { self.status().is_active() }

    // The side that is not stuck wins, in checkmate and in stalemate alike.
    pub fn winner(&self) -> Option<Side> {
        match self.status() {
            GameStatus::Active => None,
            GameStatus::Checkmate(side) | GameStatus::Stalemate(side) => Some(side.opponent()),
        }
    }

    pub fn is_in_check(&self, side: Side) -> bool { !self.analysis().checkers[side].is_empty() }
    pub fn is_checkmate(&self, side: Side) -> bool { self.status() == GameStatus::Checkmate(side) }
    pub fn is_stalemate(&self, side: Side) -> bool { self.status() == GameStatus::Stalemate(side) }

    // Enemy pieces currently attacking `side`'s General.
    pub fn checkers(&self, side: Side) -> &[Position] { &self.analysis().checkers[side] }

    // Legal destinations of the piece on `pos`. Empty if the square is empty, holds a piece
    // of the side not on move, or the game is over.
    pub fn valid_moves(&self, pos: Position) -> &[Position] {
        self.analysis().legal_moves.get(&pos).map_or(&[], Vec::as_slice)
    }

    pub fn legal_moves(&self) -> &MoveTable { &self.analysis().legal_moves }

    // Pieces of the side to move that shield their General, with the enemy pieces behind them.
    pub fn pins(&self) -> BTreeMap<Position, Vec<Position>> {
        let mut scratch = self.board.clone();
        legality::pins(&mut scratch, self.active_side)
    }

    // Either applies the move completely or returns an error and leaves the engine untouched.
    pub fn make_move(&mut self, from: Position, to: Position) -> Result<MoveRecord, InvalidMove> {
        let ret = self.try_move(from, to);
        if let Err(ref err) = ret {
            trace!("Rejected move: {err}");
        }
        ret
    }

    pub fn make_move_by_coords(
        &mut self, from: (i8, i8), to: (i8, i8),
    ) -> Result<MoveRecord, InvalidMove> {
        match (Position::try_new(from.0, from.1), Position::try_new(to.0, to.1)) {
            (Some(from), Some(to)) => self.make_move(from, to),
            (from, to) => {
                let piece = from.and_then(|pos| self.board.get(pos)).map(|entity| entity.kind);
                let reason = if self.is_active() {
                    InvalidMoveReason::OutOfBounds
                } else {
                    InvalidMoveReason::GameOver
                };
                let err = InvalidMove { piece, from, to, reason };
                trace!("Rejected move: {err}");
                Err(err)
            }
        }
    }

    pub fn make_move_wxf(&mut self, notation: &str) -> Result<MoveRecord, TurnError> {
        let (from, to) = notation::parse_wxf(&self.board, self.active_side, notation)?;
        Ok(self.make_move(from, to)?)
    }

    // ICCS ("h2e2") or WXF ("C2=5").
    pub fn make_move_text(&mut self, text: &str) -> Result<MoveRecord, TurnError> {
        match notation::parse_iccs(text) {
            Some((from, to)) => Ok(self.make_move(from, to)?),
            None => self.make_move_wxf(text),
        }
    }

    // Accepts a full picture of the board after one move, e.g. read from a camera, and
    // applies the move that produced it.
    pub fn apply_snapshot(&mut self, snapshot: &Board) -> Result<MoveRecord, TurnError> {
        let (from, to) = snapshot::infer_move(&self.board, snapshot, self.active_side)?;
        Ok(self.make_move(from, to)?)
    }

    fn try_move(&mut self, from: Position, to: Position) -> Result<MoveRecord, InvalidMove> {
        let entity = self.board.get(from);
        let piece = entity.map(|entity| entity.kind);
        let reject = |reason| Err(InvalidMove::new(piece, from, to, reason));
        if !self.is_active() {
            return reject(InvalidMoveReason::GameOver);
        }
        let Some(entity) = entity else {
            return reject(InvalidMoveReason::PieceMissing);
        };
        if entity.side != self.active_side {
            return reject(InvalidMoveReason::WrongTurnOrder);
        }
        if !self.valid_moves(from).contains(&to) {
            return reject(InvalidMoveReason::IllegalDestination);
        }

        let captured = self.board.apply_move(from, to);
        assert!(
            !legality::is_in_check(&self.board, entity.side),
            "{}",
            internal_error_message!("{:?} left its General in check with {}-{}", entity.side, from, to)
        );
        let record = MoveRecord::new(from, to, entity, captured);
        self.history.push(record);
        self.active_side = self.active_side.opponent();
        self.analysis = OnceLock::new();
        debug!("{:?} played {record}", entity.side);
        Ok(record)
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::piece::PieceKind;

    fn pos(s: &str) -> Position { Position::from_algebraic(s).unwrap() }

    #[test]
    fn cache_follows_board_version() {
        let mut engine = XiangqiEngine::standard();
        assert_eq!(engine.valid_moves(pos("b2")).len(), 12);
        assert_eq!(engine.analysis().version, 0);
        engine.make_move(pos("b2"), pos("e2")).unwrap();
        assert!(engine.analysis.get().is_none());
        assert!(engine.valid_moves(pos("b2")).is_empty());
        assert_eq!(engine.analysis().version, 1);
        assert!(!engine.valid_moves(pos("b7")).is_empty());
    }

    #[test]
    fn rejection_reasons() {
        let mut engine = XiangqiEngine::standard();
        let reason = |engine: &mut XiangqiEngine, from: &str, to: &str| {
            engine.make_move(pos(from), pos(to)).unwrap_err().reason
        };
        assert_eq!(reason(&mut engine, "e4", "e5"), InvalidMoveReason::PieceMissing);
        assert_eq!(reason(&mut engine, "e6", "e5"), InvalidMoveReason::WrongTurnOrder);
        assert_eq!(reason(&mut engine, "b0", "b2"), InvalidMoveReason::IllegalDestination);
        let err = engine.make_move_by_coords((4, 3), (4, 10)).unwrap_err();
        assert_eq!(err.reason, InvalidMoveReason::OutOfBounds);
        assert_eq!(err.piece, Some(PieceKind::Soldier));
        assert_eq!(err.to, None);
        assert!(engine.history().is_empty());
        assert_eq!(engine.active_side(), Side::Red);
    }

    #[test]
    fn fen_tracks_move_number() {
        let mut engine = XiangqiEngine::standard();
        assert_eq!(engine.fen(), fen::STANDARD_FEN);
        engine.make_move(pos("h2"), pos("e2")).unwrap();
        assert_eq!(
            engine.fen(),
            "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RNBAKABNR b - - 0 1"
        );
        engine.make_move(pos("h9"), pos("g7")).unwrap();
        assert_eq!(engine.fullmove_number(), 2);

        let engine = XiangqiEngine::from_fen("4k4/9/9/9/9/9/9/9/9/3K5 b - - 0 7").unwrap();
        assert_eq!(engine.fullmove_number(), 7);
    }

    #[test]
    fn rejects_position_with_inactive_side_in_check() {
        // Red to move while Black is attacked by the chariot on e5.
        let err = XiangqiEngine::from_fen("4k4/9/9/9/4R4/9/9/9/9/3K5 w - - 0 1").unwrap_err();
        assert_eq!(err, FenError::Board(BoardError::InactiveSideInCheck(Side::Black)));
        // Generals facing each other.
        assert!(XiangqiEngine::from_fen("4k4/9/9/9/9/9/9/9/9/4K4").is_err());
    }

    #[test]
    fn record_display() {
        let mut engine = XiangqiEngine::standard();
        let record = engine.make_move(pos("b2"), pos("b9")).unwrap();
        assert_eq!(record.to_string(), "Cannon b2xb9");
        assert_eq!(record.captured, Some(BoardEntity::new(Side::Black, PieceKind::Horse)));
    }
}
