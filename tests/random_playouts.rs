use rand::seq::IndexedRandom;
use xiangqi::coord::Position;
use xiangqi::engine::{GameStatus, XiangqiEngine};
use xiangqi::error::InvalidMoveReason;
use xiangqi::legality;
use xiangqi::notation;
use xiangqi::test_util::{all_legal_moves, deterministic_rng, random_legal_move};


const GAMES: usize = 4;
const MAX_PLIES: usize = 150;

#[test]
fn random_games_keep_invariants() {
    let rng = &mut deterministic_rng();
    for _ in 0..GAMES {
        let mut engine = XiangqiEngine::standard();
        for _ in 0..MAX_PLIES {
            let Some((from, to)) = random_legal_move(&engine, rng) else {
                break;
            };
            let mover = engine.active_side();
            let record = engine.make_move(from, to).unwrap();
            assert_eq!(record.moved.side, mover);
            assert_eq!(engine.active_side(), mover.opponent());
            assert!(!legality::is_in_check(engine.board(), mover));
        }
        if !engine.is_active() {
            let board_before = engine.board().clone();
            let err = engine.make_move(Position::new(0, 0), Position::new(0, 1)).unwrap_err();
            assert_eq!(err.reason, InvalidMoveReason::GameOver);
            assert_eq!(engine.board(), &board_before);
        }
    }
}

// Every move the engine offers must leave the mover's General safe.
#[test]
fn offered_moves_are_safe() {
    let rng = &mut deterministic_rng();
    let mut engine = XiangqiEngine::standard();
    for _ in 0..40 {
        let mover = engine.active_side();
        let moves = all_legal_moves(&engine);
        for &(from, to) in &moves {
            let mut probe = engine.clone();
            probe.make_move(from, to).unwrap();
            assert!(!legality::is_in_check(probe.board(), mover), "{from}{to} exposes {mover:?}");
        }
        let Some(&(from, to)) = moves.choose(rng) else {
            break;
        };
        engine.make_move(from, to).unwrap();
    }
}

// WXF text produced for a legal move parses back to the same move.
#[test]
fn wxf_describes_played_moves() {
    let rng = &mut deterministic_rng();
    let mut engine = XiangqiEngine::standard();
    for _ in 0..MAX_PLIES {
        let Some((from, to)) = random_legal_move(&engine, rng) else {
            break;
        };
        let side = engine.active_side();
        if let Some(text) = notation::to_wxf(engine.board(), from, to) {
            assert_eq!(
                notation::parse_wxf(engine.board(), side, &text),
                Ok((from, to)),
                "{text}"
            );
        }
        engine.make_move(from, to).unwrap();
    }
}

#[test]
fn status_matches_legal_moves() {
    let rng = &mut deterministic_rng();
    for _ in 0..GAMES {
        let mut engine = XiangqiEngine::standard();
        xiangqi::test_util::random_playout(&mut engine, rng, MAX_PLIES);
        let side = engine.active_side();
        let stuck = !legality::has_legal_move(engine.legal_moves());
        match engine.status() {
            GameStatus::Active => assert!(!stuck),
            GameStatus::Checkmate(loser) => {
                assert!(stuck);
                assert_eq!(loser, side);
                assert!(engine.is_in_check(side));
            }
            GameStatus::Stalemate(loser) => {
                assert!(stuck);
                assert_eq!(loser, side);
                assert!(!engine.is_in_check(side));
            }
        }
    }
}
