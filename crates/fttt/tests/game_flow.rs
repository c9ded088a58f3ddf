#![forbid(unsafe_code)]

//! End-to-end play through the facade: moves on leaf boards propagate wins
//! up the tree and show up in the rendered frame.

use fttt::prelude::*;

fn mark(glyph: char) -> Marker {
    Marker::new(glyph).unwrap()
}

fn sub_board(board: &Board, slot: usize) -> NodeId {
    board.drill(&[slot]).unwrap().id()
}

#[test]
fn winning_three_sub_boards_wins_the_game() {
    let x = mark('X');
    let mut board = Board::uniform(3, 3, 1).unwrap();

    // Major diagonal of boards, each won on its own major diagonal.
    for slot in [0, 4, 8] {
        let node = sub_board(&board, slot);
        for cell in [0, 4, 8] {
            assert!(board.root().winner().is_none());
            assert!(board.fill(node, cell, x).unwrap());
        }
        assert_eq!(board.node(node).unwrap().winner(), Some(x));
        assert_eq!(board.root().value_at(slot).unwrap(), Some(x));
    }

    assert_eq!(board.root().winner(), Some(x));
    assert!(!board.root().full());
}

#[test]
fn overwriting_a_leaf_can_revoke_a_win() {
    let x = mark('X');
    let o = mark('O');
    let mut board = Board::uniform(3, 3, 1).unwrap();

    for slot in [2, 4, 6] {
        let node = sub_board(&board, slot);
        for cell in [3, 4, 5] {
            board.set(node, cell, x).unwrap();
        }
    }
    assert_eq!(board.root().winner(), Some(x));

    let centre = sub_board(&board, 4);
    assert_eq!(board.set(centre, 4, o).unwrap(), x);
    assert_eq!(board.node(centre).unwrap().winner(), None);
    assert_eq!(board.root().winner(), None);
}

#[test]
fn fill_refuses_occupied_cells() {
    let mut board = Board::uniform(2, 2, 0).unwrap();
    assert!(board.fill(NodeId::ROOT, 0, mark('X')).unwrap());
    assert!(!board.fill(NodeId::ROOT, 0, mark('O')).unwrap());
    assert_eq!(board.root().value_at(0).unwrap(), Some(mark('X')));
}

#[test]
fn frames_track_the_board() {
    let mut board = Board::uniform(3, 3, 1).unwrap();
    let renderer = Renderer::new(&board);
    let node = sub_board(&board, 7);
    board.set(node, (2, 2), mark('O')).unwrap();

    let frame = renderer.render(&board);
    // Slot 7 sits at (4, 8); its bottom-right cell at (6, 10).
    assert_eq!(frame.get((6, 10)), Some('O'));
    assert_eq!(frame.to_text(), render(&board).to_text());
    assert_eq!(frame.to_text().matches('O').count(), 1);
}

#[test]
fn errors_surface_through_the_facade() {
    let board = Board::uniform(3, 3, 1).unwrap();
    let err: Error = board.drill(&[9]).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfBounds { .. }));

    let err = Marker::new('\n').unwrap_err();
    assert_eq!(err, Error::InvalidValue { glyph: Some('\n') });
}
