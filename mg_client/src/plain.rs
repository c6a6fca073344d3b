//! Line-oriented mode for terminals without TUI support.

use anyhow::{Context, Result};
use memory_game::{
    GameView, Session, SessionUpdate, Transition,
    view::{BoardView, CardView},
};
use std::{fmt::Write, time::Instant};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    commands::{Command, parse_command},
    logging::{log_performance, log_transition},
};

const RULE_WIDTH: usize = 72;

/// Run a session reading commands from stdin until EOF or `quit`.
pub async fn run(mut session: Session) -> Result<()> {
    let started = Instant::now();
    println!("Loading characters...");
    while session.is_loading() {
        match session.next_update().await {
            Some(update) => println!("{update}"),
            None => break,
        }
    }
    log_performance("roster_load", started.elapsed().as_millis() as u64, None);
    print!("{}", render_view(&session.view()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{}", help_text()),
                    Ok(Command::Restart) => {
                        session.restart();
                        print!("{}", render_view(&session.view()));
                    }
                    Ok(Command::Pick(position)) => {
                        let round = session.state().round();
                        match session.click_at(position) {
                            Ok(transition) => {
                                log_transition(round, position, &transition);
                                if transition == Transition::Ignored {
                                    println!("Round is over, wait for the next one");
                                }
                                print!("{}", render_view(&session.view()));
                            }
                            Err(e) => eprintln!("Error: {e}"),
                        }
                    }
                    Err(e) => eprintln!("Error: {e}"),
                }
            }
            update = session.next_update() => {
                if let Some(update @ SessionUpdate::RoundReset { .. }) = update {
                    println!("{update}");
                    print!("{}", render_view(&session.view()));
                }
            }
        }
    }

    println!("Thanks for playing!");
    Ok(())
}

fn help_text() -> &'static str {
    "\
Commands:
  <n> | pick <n>   Pick card number n
  restart          Start a new round now
  help             Show this message
  quit             Leave the game"
}

/// Render a view as plain text.
pub fn render_view(view: &GameView) -> String {
    match view {
        GameView::Loading => "Loading characters...\n".to_string(),
        GameView::Board(board) => render_board(board),
    }
}

fn render_board(board: &BoardView) -> String {
    let mut out = String::new();
    let heavy = "═".repeat(RULE_WIDTH);
    let light = "─".repeat(RULE_WIDTH);

    let _ = writeln!(out, "\n{heavy}");
    let _ = writeln!(out, "{}", board.header.title.to_uppercase());
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "{}", board.header.message);
    let _ = writeln!(out, "{}", board.header.scores);
    let _ = writeln!(out, "{light}");

    if let Some(notice) = &board.notice {
        let _ = writeln!(out, "Couldn't load characters: {notice}");
    }

    if board.cards.is_empty() {
        let _ = writeln!(out, "No cards to show");
    }
    for card in &board.cards {
        let _ = writeln!(out, "{}", render_card(card));
    }

    let _ = writeln!(out, "{light}");
    let _ = writeln!(out, "{}", board.footer);
    let _ = writeln!(out, "{heavy}");
    out
}

fn render_card(card: &CardView) -> String {
    match &card.image {
        Some(image) => format!("  {:>2}. {:<28} {}", card.position + 1, card.name, image),
        None => format!("  {:>2}. {}", card.position + 1, card.name),
    }
}
