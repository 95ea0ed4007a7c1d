//! Text driver for a hotseat game: reads commands from stdin, one per line.
//!
//! - `d`: dump the board
//! - `moves`: list legal moves of the player to move
//! - `moves <square>`: list legal destinations of the piece on the square
//! - `<from><to>` (e.g. `e2e4`): play a move
//! - `position startpos` or `position fen <FEN>`: start over
//! - `status`: print the game status
//! - `quit`: exit

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use hotseat::chess::core::{Move, Square};
use hotseat::{Game, GameConfig, MoveOutcome, Position};
use itertools::Itertools;

// Commands come from humans: reject anything the rules do not allow.
const CONFIG: GameConfig = GameConfig {
    validate_moves: true,
    record_history: true,
};

fn main() -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut stdin.lock(), &mut stdout.lock())
}

fn run(input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<()> {
    let mut game = Game::new(CONFIG);
    for line in input.lines() {
        let line = line.context("reading command")?;
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if command == "quit" {
            break;
        }
        match execute(&mut game, command) {
            Ok(response) => writeln!(output, "{response}")?,
            Err(e) => writeln!(output, "error: {e:#}")?,
        }
        output.flush()?;
    }
    Ok(())
}

fn execute(game: &mut Game, command: &str) -> anyhow::Result<String> {
    if command == "d" {
        return Ok(format!("{:?}", game.position()));
    }
    if command == "status" {
        return Ok(game.status().to_string());
    }
    if command == "moves" {
        return Ok(list(game.all_legal_moves().iter().map(ToString::to_string)));
    }
    if let Some(square) = command.strip_prefix("moves ") {
        let square = Square::try_from(square.trim())?;
        return Ok(list(
            game.legal_moves(square).iter().map(|square| square.to_string()),
        ));
    }
    if let Some(position) = command.strip_prefix("position ") {
        *game = match position.trim() {
            "startpos" => Game::new(CONFIG),
            other => match other.strip_prefix("fen ") {
                Some(fen) => Game::from_position(Position::try_from(fen)?, CONFIG),
                None => bail!("expected 'startpos' or 'fen <FEN>', got '{other}'"),
            },
        };
        return Ok(format!("{}", game.position()));
    }
    let next_move =
        Move::from_uci(command).with_context(|| format!("unknown command: {command}"))?;
    let outcome = game.make_move(next_move)?;
    Ok(describe(&outcome))
}

fn list(items: impl Iterator<Item = String>) -> String {
    let items = items.sorted().join(" ");
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items
    }
}

fn describe(outcome: &MoveOutcome) -> String {
    let mut response = outcome.played.to_string();
    for (name, _) in outcome.flags.iter_names() {
        response.push(' ');
        response.push_str(&name.to_lowercase());
    }
    if outcome.status.is_over() {
        response.push('\n');
        response.push_str(&outcome.status.to_string());
    }
    response
}
