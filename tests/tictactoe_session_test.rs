//! Tests for the tic-tac-toe turn coordinator and rule engine.

mod common;

use common::RecordingRoom;
use strictly_duel::tictactoe::{self, Board, MOVE_TAG, Mark, Move, Square, TicTacToe};
use strictly_duel::{DuelGame, GridPos, MoveError, Outcome, Phase, PlayError, WireMove};

fn started(is_host: bool) -> (TicTacToe, RecordingRoom) {
    let mut room = if is_host {
        RecordingRoom::host()
    } else {
        RecordingRoom::guest()
    };
    let mut game = TicTacToe::new(3);
    game.start(is_host, &mut room);
    (game, room)
}

fn board_from(moves: &[((i32, i32), Mark)]) -> Board {
    let mut board = Board::new(3);
    for (pos, mark) in moves {
        board.place(GridPos::from(*pos), *mark).unwrap();
    }
    board
}

#[test]
fn test_host_moves_first_and_hides_room() {
    let (game, room) = started(true);
    assert_eq!(game.local_mark(), Some(Mark::Circle));
    assert!(game.is_local_turn());
    assert_eq!(room.visible, Some(false));

    let (game, room) = started(false);
    assert_eq!(game.local_mark(), Some(Mark::Cross));
    assert!(!game.is_local_turn());
    assert_eq!(room.visible, None);
}

#[test]
fn test_turn_alternates_after_every_move() {
    let (mut game, mut room) = started(true);
    let script = [(1, 1), (0, 0), (2, 0), (0, 2)];

    for (i, pos) in script.into_iter().enumerate() {
        let before = game.is_local_turn();
        if before {
            game.play_local(GridPos::from(pos), &mut room).unwrap();
        } else {
            game.receive_remote(Move::new(pos, Mark::Cross), &mut room).unwrap();
        }
        assert_eq!(game.is_local_turn(), !before, "move {}", i);
    }
    assert_eq!(room.sent.len(), 2);
}

#[test]
fn test_local_move_is_sent_with_tag() {
    let (mut game, mut room) = started(true);
    game.play_local(GridPos::new(2, 1), &mut room).unwrap();

    let (tag, payload) = &room.sent[0];
    assert_eq!(*tag, MOVE_TAG);
    assert_eq!(
        Move::decode(*tag, payload),
        Ok(Move::new((2, 1), Mark::Circle))
    );
}

#[test]
fn test_rejected_local_moves_are_never_sent() {
    let (mut game, mut room) = started(false);
    assert_eq!(
        game.play_local(GridPos::new(0, 0), &mut room),
        Err(PlayError::Move(MoveError::NotYourTurn))
    );

    game.receive_remote(Move::new((0, 0), Mark::Circle), &mut room).unwrap();
    assert_eq!(
        game.play_local(GridPos::new(0, 0), &mut room),
        Err(PlayError::Move(MoveError::AlreadyOccupied(GridPos::new(0, 0))))
    );
    assert_eq!(
        game.play_local(GridPos::new(3, 0), &mut room),
        Err(PlayError::Move(MoveError::OutOfBounds(GridPos::new(3, 0))))
    );
    assert!(room.sent.is_empty());
    assert!(game.is_local_turn());
}

#[test]
fn test_moves_rejected_before_start() {
    let mut room = RecordingRoom::host();
    let mut game = TicTacToe::new(3);
    assert_eq!(
        game.play_local(GridPos::new(0, 0), &mut room),
        Err(PlayError::Move(MoveError::SessionNotActive))
    );
    assert_eq!(
        game.receive_remote(Move::new((0, 0), Mark::Circle), &mut room),
        Err(MoveError::SessionNotActive)
    );
    assert_eq!(game.board().filled(), 0);
}

#[test]
fn test_duplicate_remote_move_is_idempotent() {
    let (mut game, mut room) = started(false);
    let mov = Move::new((1, 1), Mark::Circle);
    let payload = mov.encode().unwrap();

    game.on_event_received(1, MOVE_TAG, &payload, &mut room);
    let board = game.board().clone();
    let history = game.history().to_vec();
    let turn = game.turn().clone();

    game.on_event_received(1, MOVE_TAG, &payload, &mut room);
    assert_eq!(game.board(), &board);
    assert_eq!(game.history(), history.as_slice());
    assert_eq!(game.turn(), &turn);
}

#[test]
fn test_peer_left_mid_game_resets() {
    let (mut game, mut room) = started(true);
    game.play_local(GridPos::new(0, 0), &mut room).unwrap();
    game.receive_remote(Move::new((1, 0), Mark::Cross), &mut room).unwrap();

    game.on_player_left(2);
    assert_eq!(game.phase(), Phase::NotStarted);
    assert_eq!(game.board().filled(), 0);
    assert!(game.history().is_empty());
    assert_eq!(game.local_mark(), None);
    assert!(!game.is_started());
}

#[test]
fn test_peer_left_after_finish_keeps_result() {
    let (mut game, mut room) = started(true);
    for (x, y) in [(0, 0), (1, 1), (2, 2)] {
        game.play_local(GridPos::new(x, y), &mut room).unwrap();
        if x < 2 {
            game.receive_remote(Move::new((x + 1, 0), Mark::Cross), &mut room).unwrap();
        }
    }
    assert_eq!(game.outcome(), Some(Outcome::Winner(Mark::Circle)));
    assert_eq!(game.result_label(), Some("You Win!"));
    assert_eq!(room.open, Some(false));
    assert_eq!(room.visible, Some(false));

    game.on_player_left(2);
    assert!(game.is_finished());
    assert_eq!(game.outcome(), Some(Outcome::Winner(Mark::Circle)));

    game.on_leave_room();
    assert_eq!(game.phase(), Phase::NotStarted);
}

#[test]
fn test_guest_finish_leaves_room_alone() {
    let (mut game, mut room) = started(false);
    for (pos, mark) in [
        ((0, 0), Mark::Circle),
        ((0, 1), Mark::Cross),
        ((1, 0), Mark::Circle),
        ((1, 1), Mark::Cross),
        ((2, 0), Mark::Circle),
    ] {
        game.receive_remote(Move::new(pos, mark), &mut room).unwrap();
    }
    assert_eq!(game.result_label(), Some("You Lose"));
    assert_eq!(room.open, None);
}

#[test]
fn test_moves_after_finish_are_dropped() {
    let (mut game, mut room) = started(false);
    for (pos, mark) in [
        ((0, 0), Mark::Circle),
        ((0, 1), Mark::Cross),
        ((1, 0), Mark::Circle),
        ((1, 1), Mark::Cross),
        ((2, 0), Mark::Circle),
    ] {
        game.receive_remote(Move::new(pos, mark), &mut room).unwrap();
    }
    assert_eq!(
        game.receive_remote(Move::new((2, 2), Mark::Cross), &mut room),
        Err(MoveError::SessionNotActive)
    );
    assert_eq!(game.board().read(GridPos::new(2, 2)), Some(Square::Empty));
}

#[test]
fn test_diagonal_win_scenario() {
    let board = board_from(&[
        ((0, 0), Mark::Circle),
        ((1, 1), Mark::Circle),
        ((2, 2), Mark::Circle),
    ]);
    assert_eq!(tictactoe::evaluate(&board), Some(Outcome::Winner(Mark::Circle)));
}

#[test]
fn test_full_board_draw_scenario() {
    // O X O
    // O X X
    // X O O
    let board = board_from(&[
        ((0, 0), Mark::Circle),
        ((1, 0), Mark::Cross),
        ((2, 0), Mark::Circle),
        ((0, 1), Mark::Circle),
        ((1, 1), Mark::Cross),
        ((2, 1), Mark::Cross),
        ((0, 2), Mark::Cross),
        ((1, 2), Mark::Circle),
        ((2, 2), Mark::Circle),
    ]);
    assert!(board.is_full());
    assert_eq!(tictactoe::evaluate(&board), Some(Outcome::Draw));
}

#[test]
fn test_evaluation_ignores_move_order() {
    let moves = [
        ((0, 0), Mark::Circle),
        ((1, 0), Mark::Cross),
        ((0, 1), Mark::Circle),
        ((1, 1), Mark::Cross),
        ((0, 2), Mark::Circle),
    ];
    let mut reversed = moves;
    reversed.reverse();

    let forward = board_from(&moves);
    let backward = board_from(&reversed);
    assert_eq!(forward, backward);
    assert_eq!(tictactoe::evaluate(&forward), tictactoe::evaluate(&backward));
    assert_eq!(tictactoe::evaluate(&forward), Some(Outcome::Winner(Mark::Circle)));
}

#[test]
fn test_out_of_range_remote_move_is_dropped() {
    let (mut game, mut room) = started(false);
    let payload = Move::new((7, -1), Mark::Circle).encode().unwrap();

    game.on_event_received(1, MOVE_TAG, &payload, &mut room);
    assert_eq!(game.board().filled(), 0);
    assert_eq!(game.outcome(), None);
    assert!(!game.is_local_turn());
}

#[test]
fn test_pending_input_played_on_update() {
    let (mut game, mut room) = started(true);
    game.queue_input("1 2").unwrap();
    assert_eq!(game.pending(), Some(GridPos::new(1, 2)));

    game.update(&mut room);
    assert_eq!(game.pending(), None);
    assert_eq!(
        game.board().read(GridPos::new(1, 2)),
        Some(Square::Occupied(Mark::Circle))
    );

    game.queue_input("0 0").unwrap();
    game.update(&mut room);
    assert_eq!(game.pending(), None, "rejected input is still cleared");
    assert_eq!(game.board().filled(), 1);
    assert!(game.queue_input("middle").is_err());
}

#[test]
fn test_legal_inputs_track_empty_squares() {
    let (mut game, mut room) = started(true);
    assert_eq!(game.legal_inputs().len(), 9);
    game.play_local(GridPos::new(0, 0), &mut room).unwrap();
    let inputs = game.legal_inputs();
    assert_eq!(inputs.len(), 8);
    assert!(!inputs.contains(&"0 0".to_string()));
}
