//! Tests for the dots-and-boxes turn coordinator and scoring.

mod common;

use common::RecordingRoom;
use strictly_duel::dots_and_boxes::{DotsAndBoxes, Edge, LineColor, MOVE_TAG, Move};
use strictly_duel::{DuelGame, GridPos, MoveError, Outcome, Phase, PlayError, WireMove};

fn started(width: usize, height: usize, is_host: bool) -> (DotsAndBoxes, RecordingRoom) {
    let mut room = if is_host {
        RecordingRoom::host()
    } else {
        RecordingRoom::guest()
    };
    let mut game = DotsAndBoxes::new(width, height);
    game.start(is_host, &mut room);
    (game, room)
}

/// Edges of cell `(x, y)` in the order top, bottom, left, right.
fn box_edges(x: i32, y: i32) -> [Edge; 4] {
    [
        Edge::top(x, y),
        Edge::top(x, y + 1),
        Edge::left(x, y),
        Edge::left(x + 1, y),
    ]
}

#[test]
fn test_host_plays_red_first() {
    let (game, room) = started(2, 2, true);
    assert_eq!(game.local_color(), Some(LineColor::Red));
    assert!(game.is_local_turn());
    assert_eq!(room.visible, Some(false));

    let (game, _) = started(2, 2, false);
    assert_eq!(game.local_color(), Some(LineColor::Blue));
    assert!(!game.is_local_turn());
}

#[test]
fn test_single_box_scored_for_red() {
    let (mut game, mut room) = started(2, 2, false);
    for edge in box_edges(0, 0) {
        game.receive_remote(Move::new(edge, LineColor::Red), &mut room)
            .unwrap();
    }

    assert_eq!(game.scores().get(LineColor::Red), 1);
    assert_eq!(game.scores().get(LineColor::Blue), 0);
    assert_eq!(game.board().owner(GridPos::new(0, 0)), Some(LineColor::Red));
    for cell in [(1, 0), (0, 1), (1, 1)] {
        assert_eq!(game.board().owner(GridPos::from(cell)), None);
    }
    assert_eq!(game.phase(), Phase::Active);
}

#[test]
fn test_turn_kept_on_capture_and_passed_otherwise() {
    let (mut game, mut room) = started(2, 2, true);
    let [top, bottom, left, right] = box_edges(0, 0);

    game.play_local(top, &mut room).unwrap();
    assert!(!game.is_local_turn());

    game.receive_remote(Move::new(Edge::top(1, 2), LineColor::Blue), &mut room)
        .unwrap();
    assert!(game.is_local_turn());

    game.play_local(bottom, &mut room).unwrap();
    game.receive_remote(Move::new(left, LineColor::Blue), &mut room)
        .unwrap();
    assert!(game.is_local_turn());

    let before = game.is_local_turn();
    game.play_local(right, &mut room).unwrap();
    assert_eq!(game.is_local_turn(), before, "capture keeps the turn");
    assert_eq!(game.scores().get(LineColor::Red), 1);

    game.play_local(Edge::left(2, 1), &mut room).unwrap();
    assert_ne!(game.is_local_turn(), before, "no capture passes the turn");
}

#[test]
fn test_remote_capture_keeps_remote_turn() {
    let (mut game, mut room) = started(1, 1, true);
    let [top, bottom, left, right] = box_edges(0, 0);
    game.play_local(top, &mut room).unwrap();
    game.receive_remote(Move::new(bottom, LineColor::Blue), &mut room)
        .unwrap();
    game.play_local(left, &mut room).unwrap();
    assert!(!game.is_local_turn());

    let outcome = game
        .receive_remote(Move::new(right, LineColor::Blue), &mut room)
        .unwrap();
    assert_eq!(outcome, Some(Outcome::Winner(LineColor::Blue)));
    assert_eq!(game.result_label(), Some("You Lose"));
    assert_eq!(room.open, Some(false));
    assert_eq!(room.visible, Some(false));
}

#[test]
fn test_game_ends_when_every_edge_is_drawn() {
    let (mut game, mut room) = started(2, 1, true);
    let edges = game.board().empty_edges();
    assert_eq!(edges.len(), 7);

    let mut outcome = None;
    for edge in edges {
        let color = if game.is_local_turn() {
            LineColor::Red
        } else {
            LineColor::Blue
        };
        outcome = if color == LineColor::Red {
            game.play_local(edge, &mut room).unwrap()
        } else {
            game.receive_remote(Move::new(edge, color), &mut room).unwrap()
        };
    }

    assert!(game.is_finished());
    assert_eq!(game.outcome(), outcome);
    assert_eq!(game.scores().total(), 2);
    assert_eq!(game.board().filled_edges(), game.board().total_edges());
}

#[test]
fn test_duplicate_remote_line_is_ignored() {
    let (mut game, mut room) = started(2, 2, false);
    let payload = Move::new(Edge::left(1, 1), LineColor::Red).encode().unwrap();

    game.on_event_received(1, MOVE_TAG, &payload, &mut room);
    assert!(game.is_local_turn());
    let board = game.board().clone();

    game.on_event_received(1, MOVE_TAG, &payload, &mut room);
    assert_eq!(game.board(), &board);
    assert!(game.is_local_turn());
}

#[test]
fn test_local_rejections() {
    let (mut game, mut room) = started(2, 2, true);
    assert_eq!(
        game.play_local(Edge::top(2, 0), &mut room),
        Err(PlayError::Move(MoveError::OutOfBounds(GridPos::new(2, 0))))
    );
    game.play_local(Edge::top(0, 0), &mut room).unwrap();
    assert_eq!(
        game.play_local(Edge::top(1, 0), &mut room),
        Err(PlayError::Move(MoveError::NotYourTurn))
    );
    assert_eq!(room.sent.len(), 1);
}

#[test]
fn test_peer_left_mid_game_clears_everything() {
    let (mut game, mut room) = started(2, 2, true);
    for edge in box_edges(1, 1) {
        game.receive_remote(Move::new(edge, LineColor::Blue), &mut room)
            .unwrap();
    }
    assert_eq!(game.scores().get(LineColor::Blue), 1);

    game.on_player_left(2);
    assert_eq!(game.phase(), Phase::NotStarted);
    assert_eq!(game.board().filled_edges(), 0);
    assert_eq!(game.board().owner(GridPos::new(1, 1)), None);
    assert_eq!(game.scores().total(), 0);
}

#[test]
fn test_text_input() {
    let (mut game, mut room) = started(2, 2, true);
    game.queue_input("left 2 1").unwrap();
    game.update(&mut room);
    assert_eq!(
        game.board().read(Edge::left(2, 1)),
        Some(Some(LineColor::Red))
    );
    assert!(game.queue_input("2 1").is_err());
    assert!(game.legal_inputs().contains(&"top 0 0".to_string()));
    assert!(!game.legal_inputs().contains(&"left 2 1".to_string()));
}

#[test]
fn test_foreign_tag_ignored() {
    let (mut game, mut room) = started(2, 2, false);
    let payload = Move::new(Edge::top(0, 0), LineColor::Red).encode().unwrap();
    game.on_event_received(1, 67, &payload, &mut room);
    assert_eq!(game.board().filled_edges(), 0);
}
