//! End-to-end match scenarios.
//!
//! These tests drive `Game` directly and through a `Session` with scripted
//! input, covering every way a turn can resolve and both ways a match ends.

use std::collections::VecDeque;

use memory_game::cards::{Card, CardId, CardKind};
use memory_game::core::{GameRng, GridConfig, MemoryConfig, Player, PlayerColor, PlayerId};
use memory_game::error::{SessionError, TurnError};
use memory_game::grid::{Coord, Grid, GridSize};
use memory_game::rules::{EndReason, Game, TurnOutcome, TurnPhase};
use memory_game::session::{InputProvider, Session};

fn grid_from(rows: usize, cols: usize, cards: Vec<(usize, usize, Card)>) -> Grid {
    let size = GridSize::new(rows, cols, &GridConfig::default()).unwrap();
    let mut grid = Grid::new(size);
    for (row, col, card) in cards {
        grid.set_card(Coord::new(row, col), card);
    }
    grid
}

/// A A B
/// B ¤ §
fn board() -> Grid {
    grid_from(
        2,
        3,
        vec![
            (1, 1, Card::normal(CardId::new(0), 'A', 2)),
            (1, 2, Card::normal(CardId::new(1), 'A', 2)),
            (1, 3, Card::normal(CardId::new(2), 'B', 7)),
            (2, 1, Card::normal(CardId::new(3), 'B', 7)),
            (2, 2, Card::bomb(CardId::new(4))),
            (2, 3, Card::jolly(CardId::new(5), 20)),
        ],
    )
}

fn players(names: &[&str]) -> Vec<Player> {
    names
        .iter()
        .map(|name| Player::new(*name, PlayerColor::White))
        .collect()
}

fn play(game: &mut Game, first: (usize, usize), second: Option<(usize, usize)>) -> TurnOutcome {
    game.guess(Coord::new(first.0, first.1)).unwrap();
    if let Some((row, col)) = second {
        game.guess(Coord::new(row, col)).unwrap();
    }
    game.resolve().unwrap().outcome
}

fn all_face_down(game: &Game) -> bool {
    game.grid().cards().all(|(_, card)| !card.is_face_up())
}

#[test]
fn test_match_scores_and_keeps_turn() {
    let mut game = Game::new(players(&["anna", "bert"]), board()).unwrap();

    let outcome = play(&mut game, (1, 1), Some((1, 2)));

    assert_eq!(outcome, TurnOutcome::Matched { points: 2 });
    assert_eq!(game.player(PlayerId::new(0)).score(), 2);
    assert_eq!(game.active_player(), Some(PlayerId::new(0)));
    assert!(game.grid().card(Coord::new(1, 1)).is_none());
    assert!(game.grid().card(Coord::new(1, 2)).is_none());
    assert_eq!(game.grid().occupied(), 4);
    assert!(all_face_down(&game));
}

#[test]
fn test_mismatch_passes_turn() {
    let mut game = Game::new(players(&["anna", "bert"]), board()).unwrap();

    let outcome = play(&mut game, (1, 1), Some((1, 3)));

    assert_eq!(outcome, TurnOutcome::Mismatched);
    assert_eq!(game.active_player(), Some(PlayerId::new(1)));
    assert_eq!(game.grid().occupied(), 6);
    assert!(all_face_down(&game));
}

#[test]
fn test_jolly_first_ends_turn_early_and_keeps_it() {
    let mut game = Game::new(players(&["anna", "bert"]), board()).unwrap();

    game.guess(Coord::new(2, 3)).unwrap();
    assert!(matches!(
        game.phase(),
        TurnPhase::TurnResolution { second: None, .. }
    ));
    assert_eq!(
        game.guess(Coord::new(1, 1)),
        Err(TurnError::AwaitingResolution)
    );

    let record = game.resolve().unwrap();
    assert_eq!(record.outcome, TurnOutcome::Bonus { points: 20 });
    assert_eq!(game.player(PlayerId::new(0)).score(), 20);
    assert_eq!(game.active_player(), Some(PlayerId::new(0)));
    assert!(game.grid().card(Coord::new(2, 3)).is_none());
}

#[test]
fn test_bomb_on_second_guess_eliminates() {
    let mut game = Game::new(players(&["anna", "bert"]), board()).unwrap();

    game.guess(Coord::new(1, 1)).unwrap();
    game.guess(Coord::new(2, 2)).unwrap();

    let snapshot = game.snapshot();
    assert_eq!(snapshot.grid.cards().filter(|(_, c)| c.is_face_up()).count(), 2);

    let record = game.resolve().unwrap();
    assert_eq!(record.outcome, TurnOutcome::Eliminated);
    assert!(!game.player(PlayerId::new(0)).is_alive());
    assert_eq!(game.active_player(), Some(PlayerId::new(1)));

    // The bomb is gone; the normal card goes back face down.
    assert!(game.grid().card(Coord::new(2, 2)).is_none());
    let first = game.grid().card(Coord::new(1, 1)).unwrap();
    assert!(!first.is_face_up());
    assert_eq!(game.grid().occupied(), 5);
}

#[test]
fn test_jolly_on_second_guess_ignores_first_card() {
    let mut game = Game::new(players(&["anna", "bert"]), board()).unwrap();

    let outcome = play(&mut game, (1, 3), Some((2, 3)));

    assert_eq!(outcome, TurnOutcome::Bonus { points: 20 });
    assert_eq!(game.player(PlayerId::new(0)).score(), 20);
    assert!(game.grid().card(Coord::new(1, 3)).is_some());
    assert_eq!(game.active_player(), Some(PlayerId::new(0)));
}

#[test]
fn test_same_cell_twice_is_mismatch() {
    let mut game = Game::new(players(&["anna", "bert"]), board()).unwrap();

    let outcome = play(&mut game, (1, 1), Some((1, 1)));

    assert_eq!(outcome, TurnOutcome::Mismatched);
    assert_eq!(game.player(PlayerId::new(0)).score(), 0);
    assert_eq!(game.grid().occupied(), 6);
}

#[test]
fn test_rejected_guesses_leave_state_untouched() {
    let mut game = Game::new(players(&["anna", "bert"]), board()).unwrap();
    play(&mut game, (1, 1), Some((1, 2)));
    let before = game.snapshot();

    assert!(matches!(
        game.guess(Coord::new(3, 1)),
        Err(TurnError::OutOfBounds { rows: 2, cols: 3, .. })
    ));
    assert_eq!(
        game.guess(Coord::new(1, 1)),
        Err(TurnError::EmptyCell(Coord::new(1, 1)))
    );
    assert_eq!(game.resolve(), Err(TurnError::NothingToResolve));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_last_survivor_plays_every_turn() {
    let mut game = Game::new(players(&["anna", "bert"]), board()).unwrap();

    play(&mut game, (2, 2), None);
    assert_eq!(game.active_player(), Some(PlayerId::new(1)));

    play(&mut game, (1, 1), Some((1, 3)));
    assert_eq!(game.active_player(), Some(PlayerId::new(1)));
    assert_eq!(game.living_players().collect::<Vec<_>>(), vec![PlayerId::new(1)]);
}

#[test]
fn test_clearing_the_grid_ends_the_game() {
    let mut game = Game::new(players(&["anna", "bert"]), board()).unwrap();

    play(&mut game, (1, 1), Some((1, 2)));
    play(&mut game, (1, 3), Some((2, 1)));
    play(&mut game, (2, 3), None);
    assert!(!game.is_over());
    play(&mut game, (2, 2), None);

    assert_eq!(game.end_reason(), Some(EndReason::GridCleared));
    assert!(game.grid().is_empty());
    assert_eq!(game.active_player(), None);
    assert_eq!(game.guess(Coord::new(1, 1)), Err(TurnError::GameOver));
    assert_eq!(game.resolve(), Err(TurnError::GameOver));

    let board = game.leaderboard();
    let leader = board.leader().unwrap();
    assert_eq!(leader.name, "anna");
    assert_eq!(leader.score, 29);
    assert!(!leader.alive);
    assert!(board.is_winner(PlayerId::new(0)));
    assert!(!board.is_winner(PlayerId::new(1)));
}

#[test]
fn test_everyone_eliminated_ends_the_game() {
    let grid = grid_from(
        2,
        2,
        vec![
            (1, 1, Card::normal(CardId::new(0), 'A', 1)),
            (1, 2, Card::normal(CardId::new(1), 'A', 1)),
            (2, 1, Card::bomb(CardId::new(2))),
            (2, 2, Card::bomb(CardId::new(3))),
        ],
    );
    let mut game = Game::new(players(&["anna", "bert"]), grid).unwrap();

    play(&mut game, (2, 1), None);
    play(&mut game, (2, 2), None);

    assert_eq!(game.end_reason(), Some(EndReason::AllEliminated));
    assert_eq!(game.grid().occupied(), 2);
    assert_eq!(game.living_players().count(), 0);
}

#[test]
fn test_history_records_every_turn() {
    let mut game = Game::new(players(&["anna", "bert"]), board()).unwrap();

    play(&mut game, (1, 1), Some((1, 3)));
    play(&mut game, (2, 3), None);
    play(&mut game, (2, 2), None);

    let history: Vec<_> = game
        .history()
        .iter()
        .map(|r| (r.turn, r.player, r.outcome, r.reveals().count()))
        .collect();
    assert_eq!(
        history,
        vec![
            (1, PlayerId::new(0), TurnOutcome::Mismatched, 2),
            (2, PlayerId::new(1), TurnOutcome::Bonus { points: 20 }, 1),
            (3, PlayerId::new(1), TurnOutcome::Eliminated, 1),
        ]
    );
    assert_eq!(game.turn(), 4);
}

#[test]
fn test_same_seed_deals_same_grid() {
    let config = MemoryConfig::default();
    let names = || vec!["anna".to_string(), "bert".to_string(), "carl".to_string()];

    let a = Game::setup(&config, names(), 6, 5, &mut GameRng::new(99)).unwrap();
    let b = Game::setup(&config, names(), 6, 5, &mut GameRng::new(99)).unwrap();
    assert_eq!(a.snapshot(), b.snapshot());

    let c = Game::setup(&config, names(), 6, 5, &mut GameRng::new(100)).unwrap();
    assert_ne!(a.grid(), c.grid());
}

/// Answers from fixed queues; runs dry with `InputClosed`.
struct Script {
    names: VecDeque<String>,
    grid: (usize, usize),
    coords: VecDeque<Coord>,
}

impl InputProvider for Script {
    fn read_roster_size(&mut self, _min: usize, _max: usize) -> Result<usize, SessionError> {
        Ok(self.names.len())
    }

    fn read_player_name(
        &mut self,
        _index: usize,
        _min_len: usize,
        _max_len: usize,
    ) -> Result<String, SessionError> {
        self.names.pop_front().ok_or(SessionError::InputClosed)
    }

    fn read_grid_size(&mut self, _limits: &GridConfig) -> Result<(usize, usize), SessionError> {
        Ok(self.grid)
    }

    fn read_coordinate(&mut self, _rows: usize, _cols: usize) -> Result<Coord, SessionError> {
        self.coords.pop_front().ok_or(SessionError::InputClosed)
    }
}

/// Every guess a player with perfect memory makes: all pairs, then the
/// jolly, then the bomb.
fn perfect_guesses(grid: &Grid) -> VecDeque<Coord> {
    let mut guesses = VecDeque::new();
    let mut special = Vec::new();
    for (coord, card) in grid.cards() {
        match card.kind() {
            CardKind::Normal => {
                let partner = grid
                    .cards()
                    .find(|(_, other)| card.matches(other))
                    .map(|(c, _)| c)
                    .unwrap();
                if coord < partner {
                    guesses.push_back(coord);
                    guesses.push_back(partner);
                }
            }
            CardKind::Jolly => special.insert(0, coord),
            CardKind::Bomb => special.push(coord),
        }
    }
    guesses.extend(special);
    guesses
}

#[test]
fn test_perfect_memory_session_clears_grid() {
    let config = MemoryConfig::default();
    let seed = 2024;
    let names = vec!["anna".to_string(), "bert".to_string()];

    let dealt = Game::setup(&config, names.clone(), 4, 5, &mut GameRng::new(seed)).unwrap();
    let script = Script {
        names: names.into_iter().collect(),
        grid: (4, 5),
        coords: perfect_guesses(dealt.grid()),
    };
    assert_eq!(script.coords.len(), 9 * 2 + 2);

    let mut session = Session::new(config, script, (), GameRng::new(seed));
    let board = session.run().unwrap();

    let jolly = 20;
    let leader = board.leader().unwrap();
    assert_eq!(leader.player, PlayerId::new(0));
    assert!(leader.score > jolly);
    assert!(!leader.alive);
    assert_eq!(board.iter().nth(1).unwrap().score, 0);

    let (script, ()) = session.into_parts();
    assert!(script.coords.is_empty());
}
