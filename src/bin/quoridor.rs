//! Interactive Quoridor on the terminal.
//!
//! Every seat is a human at the keyboard unless it is handed to an AI with
//! `--ai <seat>=<1|2|3>`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use log::warn;

use quoridor_engine::agents::{create_agent, parse_seat_assignment, ActionSelector, Difficulty};
use quoridor_engine::config::{load_config, EngineConfig};
use quoridor_engine::game_runner::{play_match, AgentController, Command, Controller, Participant};
use quoridor_engine::game_state::{DiagonalChooser, Game};
use quoridor_engine::stats::Statistics;
use quoridor_engine::{Action, Outcome, Position, RuleError};

#[derive(Parser, Debug)]
#[command(
    name = "quoridor",
    about = "Play Quoridor against other people or computer opponents",
    version
)]
struct Args {
    /// Number of players (2 or 4)
    #[arg(long)]
    players: Option<usize>,

    /// Board size (odd, 3 to 25)
    #[arg(long)]
    board_size: Option<usize>,

    /// Give a seat to the computer, e.g. `--ai 2=3` for a minimax opponent in seat 2
    #[arg(long = "ai", value_parser = parse_seat_assignment)]
    ai: Vec<(usize, Difficulty)>,

    /// Player name, once per seat in order
    #[arg(long = "name")]
    names: Vec<String>,

    /// Seed for reproducible random opponents
    #[arg(long)]
    seed: Option<u64>,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

const HELP: &str = "\
Commands:
  M <N|S|E|W>        move one square; walks into a pawn become jumps
  T <row> <col>      move to a square, for explicit jumps
  W <row> <col> <H|V> place a wall on the intersection below-right of (row, col)
  H                  show this help
  Q                  quit the match";

fn prompt(input: &mut dyn BufRead, text: &str) -> Result<String> {
    print!("{}", text);
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read input")?;
    ensure!(read > 0, "Input closed");
    Ok(line.trim().to_string())
}

fn print_status(game: &Game) {
    println!();
    print!("{}", game.board());
    for (player, walls) in game.walls_remaining_all().iter().enumerate() {
        println!("  Player {}: {} walls left", player + 1, walls);
    }
}

/// A person typing commands.
struct Human {
    name: String,
    /// Reads stdin when unset.
    input: Option<Box<dyn BufRead>>,
}

impl Human {
    fn ask(&mut self, text: &str) -> Result<String> {
        match self.input.as_mut() {
            Some(input) => prompt(input.as_mut(), text),
            None => prompt(&mut io::stdin().lock(), text),
        }
    }
}

impl DiagonalChooser for Human {
    fn choose_diagonal(&mut self, _player: usize, options: [Position; 2]) -> Option<Position> {
        println!(
            "The straight jump is blocked. Land on 1) {} or 2) {}?",
            options[0], options[1]
        );
        let answer = match self.ask("> ") {
            Ok(answer) => answer,
            Err(err) => {
                warn!("{} could not choose a landing: {:#}", self.name, err);
                return None;
            }
        };
        match answer.as_str() {
            "1" => Some(options[0]),
            "2" => Some(options[1]),
            _ => None,
        }
    }
}

impl Controller for Human {
    fn next_command(&mut self, game: &Game) -> Result<Command> {
        print_status(game);
        let player = game.current_player().unwrap_or_default();
        loop {
            let line = self.ask(&format!(
                "{} (player {}) [H for help]: ",
                self.name,
                player + 1
            ))?;
            match line.to_ascii_uppercase().as_str() {
                "" => continue,
                "H" | "HELP" => println!("{}", HELP),
                "Q" | "QUIT" => return Ok(Command::Quit),
                _ => match line.parse::<Action>() {
                    Ok(action) => return Ok(Command::Act(action)),
                    Err(err) => println!("{}. Type H for help.", err),
                },
            }
        }
    }

    fn rejected(&mut self, action: Action, reason: RuleError) {
        println!("Cannot play {}: {}", action, reason);
    }
}

/// Prints what a computer seat plays.
struct Announced<C> {
    name: String,
    inner: C,
}

impl<C: DiagonalChooser> DiagonalChooser for Announced<C> {
    fn choose_diagonal(&mut self, player: usize, options: [Position; 2]) -> Option<Position> {
        self.inner.choose_diagonal(player, options)
    }
}

impl<C: Controller> Controller for Announced<C> {
    fn next_command(&mut self, game: &Game) -> Result<Command> {
        let command = self.inner.next_command(game)?;
        if let Command::Act(action) = command {
            println!("{} plays {}", self.name, action);
        }
        Ok(command)
    }

    fn rejected(&mut self, action: Action, reason: RuleError) {
        self.inner.rejected(action, reason);
    }
}

/// The difficulty of each seat, `None` for humans. The last `--ai` flag for
/// a seat wins.
fn seat_tiers(ai: &[(usize, Difficulty)], num_players: usize) -> Vec<Option<Difficulty>> {
    let mut tiers = vec![None; num_players];
    for &(seat, difficulty) in ai {
        if let Some(tier) = tiers.get_mut(seat) {
            *tier = Some(difficulty);
        }
    }
    tiers
}

/// Display names in seat order. Statistics are keyed by name, so names must
/// be unique.
fn seat_names(given: &[String], tiers: &[Option<Difficulty>]) -> Result<Vec<String>> {
    ensure!(
        given.len() <= tiers.len(),
        "Got {} names for {} seats",
        given.len(),
        tiers.len()
    );
    let mut names: Vec<String> = Vec::with_capacity(tiers.len());
    for (player, tier) in tiers.iter().enumerate() {
        let name = match (given.get(player), tier) {
            (Some(name), _) => name.trim().to_string(),
            (None, Some(difficulty)) => format!("Computer {} ({})", player + 1, difficulty),
            (None, None) => format!("Player {}", player + 1),
        };
        ensure!(!name.is_empty(), "Seat {} has an empty name", player + 1);
        if names.contains(&name) {
            bail!("The name '{}' is already taken", name);
        }
        names.push(name);
    }
    Ok(names)
}

fn build_participants(
    names: Vec<String>,
    tiers: &[Option<Difficulty>],
    config: &EngineConfig,
) -> Vec<Participant> {
    names
        .into_iter()
        .zip(tiers)
        .enumerate()
        .map(|(player, (name, tier))| match *tier {
            Some(difficulty) => {
                let seed = config.ai.seed.map(|seed| seed.wrapping_add(player as u64));
                let agent: Box<dyn ActionSelector + Send> =
                    create_agent(difficulty, &config.ai, seed);
                let controller = Announced {
                    name: name.clone(),
                    inner: AgentController::new(agent),
                };
                Participant::new(name, Box::new(controller))
            }
            None => {
                let human = Human {
                    name: name.clone(),
                    input: None,
                };
                Participant::new(name, Box::new(human))
            }
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(players) = args.players {
        config.game.num_players = players;
    }
    if let Some(board_size) = args.board_size {
        config.game.board_size = board_size;
    }
    if args.seed.is_some() {
        config.ai.seed = args.seed;
    }
    config.validate()?;

    for &(seat, _) in &args.ai {
        ensure!(
            seat < config.game.num_players,
            "--ai seat {} does not exist in a {}-player game",
            seat + 1,
            config.game.num_players
        );
    }

    let tiers = seat_tiers(&args.ai, config.game.num_players);
    let names = seat_names(&args.names, &tiers)?;

    let mut game = Game::new(&config.game)?;
    let mut participants = build_participants(names, &tiers, &config);

    println!(
        "Quoridor {}x{}, {} players. Player 1 starts at the top.",
        config.game.board_size, config.game.board_size, config.game.num_players
    );
    println!("{}", HELP);

    let mut stats = Statistics::new();
    let result = play_match(&mut game, &mut participants, &mut stats)?;

    println!();
    print!("{}", game.board());
    match result.outcome {
        Outcome::Winner(player) => println!("{} wins!", participants[player].name),
        Outcome::Draw => println!("Draw after {} actions.", result.total_actions),
        Outcome::Aborted => println!("Game aborted."),
    }
    print!("{}", stats);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quoridor_engine::Orientation;
    use std::io::Cursor;

    fn human(input: &str) -> Human {
        Human {
            name: "ann".to_string(),
            input: Some(Box::new(Cursor::new(input.to_string()))),
        }
    }

    #[test]
    fn test_human_picks_a_landing() {
        let options = [Position::new(3, 3), Position::new(3, 5)];
        assert_eq!(human("2\n").choose_diagonal(0, options), Some(options[1]));
        assert_eq!(human("left\n").choose_diagonal(0, options), None);
    }

    #[test]
    fn test_closed_input_declines_the_landing() {
        let options = [Position::new(3, 3), Position::new(3, 5)];
        assert_eq!(human("").choose_diagonal(0, options), None);
    }

    #[test]
    fn test_human_commands() {
        let game = Game::new(&Default::default()).unwrap();
        let mut seat = human("\nh\nbogus\nw 0 0 h\nq\n");
        assert_eq!(
            seat.next_command(&game).unwrap(),
            Command::Act(Action::wall(0, 0, Orientation::Horizontal))
        );
        assert_eq!(seat.next_command(&game).unwrap(), Command::Quit);
        assert!(seat.next_command(&game).is_err());
    }

    fn names(given: &[&str], tiers: &[Option<Difficulty>]) -> Result<Vec<String>> {
        let given: Vec<String> = given.iter().map(|name| name.to_string()).collect();
        seat_names(&given, tiers)
    }

    #[test]
    fn test_default_names() {
        let tiers = seat_tiers(&[(1, Difficulty::Minimax)], 2);
        assert_eq!(
            names(&[], &tiers).unwrap(),
            vec!["Player 1", "Computer 2 (minimax)"]
        );
    }

    #[test]
    fn test_last_ai_flag_wins() {
        let tiers = seat_tiers(&[(0, Difficulty::Random), (0, Difficulty::Greedy)], 2);
        assert_eq!(tiers, vec![Some(Difficulty::Greedy), None]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let tiers = vec![None, None];
        assert!(names(&["ann", "ann"], &tiers).is_err());
        assert!(names(&["ann", " ann "], &tiers).is_err());
        // a given name may not shadow a default one either
        assert!(names(&["Player 2"], &tiers).is_err());
        assert_eq!(names(&["ann", "bob"], &tiers).unwrap(), vec!["ann", "bob"]);
    }

    #[test]
    fn test_names_must_fit_the_table() {
        let tiers = vec![None, None];
        assert!(names(&["a", "b", "c"], &tiers).is_err());
        assert!(names(&["", "b"], &tiers).is_err());
    }
}
