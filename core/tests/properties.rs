//! Property tests for board dealing and for arbitrary sequences of player input and elapsed time.
use pairs_core::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Copy, Clone, Debug)]
enum Action {
    Start,
    Select(CardId),
    Wait(u64),
    Reset,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        1 => Just(Action::Start),
        12 => (0u8..18).prop_map(Action::Select),
        4 => (0u64..8_000).prop_map(Action::Wait),
        1 => Just(Action::Reset),
    ]
}

proptest! {
    #[test]
    fn shuffle_deals_each_face_exactly_twice(seed in any::<u64>(), pairs in 1u8..=MAX_PAIRS) {
        let board = Board::shuffled(pairs, &mut SmallRng::seed_from_u64(seed));

        prop_assert_eq!(board.len(), usize::from(pairs) * 2);
        let mut counts = BTreeMap::new();
        for card in board.cards() {
            *counts.entry(card.face).or_insert(0) += 1;
        }
        prop_assert_eq!(counts.len(), usize::from(pairs));
        prop_assert!(counts.values().all(|&count| count == 2));
        prop_assert!(counts.keys().all(|face| ALPHABET[..usize::from(pairs)].contains(face)));
    }

    #[test]
    fn fisher_yates_is_a_permutation(seed in any::<u64>(), items in prop::collection::vec(any::<u16>(), 0..64)) {
        let mut shuffled = items.clone();
        fisher_yates(&mut shuffled, &mut SmallRng::seed_from_u64(seed));

        let mut expected = items;
        expected.sort_unstable();
        shuffled.sort_unstable();
        prop_assert_eq!(shuffled, expected);
    }

    #[test]
    fn round_invariants_hold_for_any_input(
        seed in any::<u64>(),
        actions in prop::collection::vec(action_strategy(), 1..200),
    ) {
        let clock = SimScheduler::new();
        let mut game = GameController::new(GameConfig::DEFAULT, clock.clone(), Vec::new(), seed);
        let mut game_overs = 0;

        for action in actions {
            let before = (game.phase(), game.turn(), game.score(), game.board().clone());
            game.observer_mut().clear();

            match action {
                Action::Start => {
                    let was_idle = before.0 == GamePhase::NotStarted;
                    prop_assert_eq!(game.start().is_ok(), was_idle);
                }
                Action::Select(id) => {
                    let outcome = game.select_card(id);
                    if !outcome.has_update() {
                        prop_assert!(game.observer().is_empty());
                        prop_assert_eq!(game.phase(), before.0);
                        prop_assert_eq!(game.turn(), before.1);
                        prop_assert_eq!(game.score(), before.2);
                        prop_assert_eq!(game.board(), &before.3);
                    }
                    if before.1.is_resolving() || before.0 != GamePhase::Playing {
                        prop_assert_eq!(outcome, SelectOutcome::Ignored);
                    }
                }
                Action::Wait(millis) => clock.advance(&mut game, Duration::from_millis(millis)),
                Action::Reset => {
                    game.reset();
                    game_overs = 0;
                    prop_assert_eq!(clock.pending(), 0);
                    prop_assert_eq!(game.phase(), GamePhase::NotStarted);
                }
            }

            game_overs += game.observer().iter().filter(|n| n.is_game_over()).count();
            prop_assert!(game_overs <= 1);

            prop_assert!(game.matched_pairs() <= GameConfig::DEFAULT.pairs);
            prop_assert_eq!(
                game.phase() == GamePhase::Won,
                game.matched_pairs() == GameConfig::DEFAULT.pairs
            );
            prop_assert!(game.remaining_secs() <= COUNTDOWN_SECS);

            match game.phase() {
                GamePhase::NotStarted => prop_assert_eq!(clock.pending(), 0),
                GamePhase::Previewing => {
                    prop_assert_eq!(game.board().revealed_count(), game.board().len());
                    prop_assert!(clock.is_pending(TimerKind::Preview));
                }
                GamePhase::Playing => {
                    prop_assert!(clock.is_pending(TimerKind::Countdown));
                    prop_assert_eq!(
                        clock.is_pending(TimerKind::Unflip),
                        game.turn().is_resolving()
                    );
                    let held = match game.turn() {
                        TurnState::Idle => 0,
                        TurnState::OneSelected(_) => 1,
                        TurnState::Resolving(..) => 2,
                    };
                    prop_assert_eq!(
                        game.board().revealed_count(),
                        usize::from(game.matched_pairs()) * 2 + held
                    );
                }
                GamePhase::Won | GamePhase::TimedOut => prop_assert_eq!(clock.pending(), 0),
            }
        }
    }
}

#[test]
fn notifications_serialize_hidden_faces_as_null() {
    let board = Board::from_faces(&['A', 'A']).unwrap();
    let json = serde_json::to_value(Notification::BoardRendered(board.views())).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "BoardRendered": [
                { "id": 0, "face": null, "revealed": false },
                { "id": 1, "face": null, "revealed": false },
            ]
        })
    );
}

#[test]
fn stored_boards_are_validated_on_load() {
    let card = |id: u32, face: char| serde_json::json!({ "id": id, "face": face, "revealed": false });

    let three_of_a_kind = serde_json::json!([card(0, 'A'), card(1, 'A'), card(2, 'A'), card(3, 'B')]);
    assert!(serde_json::from_value::<Board>(three_of_a_kind).is_err());

    let misplaced = serde_json::json!([card(0, 'A'), card(1, 'A'), card(2, 'B'), card(200, 'B')]);
    assert!(serde_json::from_value::<Board>(misplaced).is_err());

    let stored = serde_json::json!([card(0, 'B'), card(1, 'A'), card(2, 'A'), card(3, 'B')]);
    let board: Board = serde_json::from_value(stored.clone()).unwrap();
    assert_eq!(serde_json::to_value(&board).unwrap(), stored);

    let log: Vec<Notification> = Vec::new();
    let mut game = GameController::new(GameConfig::new(2), SimScheduler::new(), log, 0);
    game.start_with_board(board).unwrap();
    assert_eq!(game.phase(), GamePhase::Previewing);
    assert_eq!(game.board().revealed_count(), 4);
}
