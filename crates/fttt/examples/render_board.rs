#![forbid(unsafe_code)]

//! Play a short scripted game on a 3x3 board of 3x3 boards and print each
//! frame.
//!
//! Run with:
//!   cargo run -p fttt --example render_board
//!   RUST_LOG=trace cargo run -p fttt --features tracing --example render_board

use fttt::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let x = Marker::new('X')?;
    let o = Marker::new('O')?;

    let mut board = Board::uniform(3, 3, 1)?;
    let renderer = Renderer::new(&board);

    // (sub-board slot, cell, marker)
    let script = [
        (0, 0, x),
        (0, 4, o),
        (0, 1, x),
        (4, 4, o),
        (0, 2, x),
        (1, 0, x),
        (1, 4, x),
        (8, 8, o),
        (1, 8, x),
        (2, 2, x),
        (2, 4, x),
        (2, 6, x),
    ];

    for (turn, (slot, cell, marker)) in script.into_iter().enumerate() {
        let node = board.drill(&[slot])?.id();
        if !board.fill(node, cell, marker)? {
            println!("turn {turn}: cell {cell} of board {slot} is taken");
            continue;
        }

        let sub = board.node(node)?;
        println!(
            "turn {turn}: {marker} plays cell {cell} of board {slot}{}",
            sub.winner()
                .map(|w| format!(", board {slot} won by {w}"))
                .unwrap_or_default()
        );
        println!("{}\n", renderer.render(&board));

        if let Some(winner) = board.root().winner() {
            println!("{winner} wins the game");
            break;
        }
    }

    Ok(())
}
