//! Match loop.
//!
//! Seats are driven through the [`Controller`] trait so the runner works the
//! same for prompts, agents and test doubles. The runner owns no rules: every
//! action goes through [`Game::submit`].

use log::{info, warn};

use crate::actions::Action;
use crate::agents::ActionSelector;
use crate::error::RuleError;
use crate::game_state::{DiagonalChooser, Game, GameStatus, Outcome};
use crate::grid::Position;
use crate::stats::StatsRecorder;

/// What a controller wants to do on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Act(Action),
    Quit,
}

/// Source of actions for one seat.
pub trait Controller: DiagonalChooser {
    /// The next command for the player to act. An error aborts the match.
    fn next_command(&mut self, game: &Game) -> anyhow::Result<Command>;

    /// The last action was rejected; the same player acts again.
    fn rejected(&mut self, _action: Action, _reason: RuleError) {}
}

/// Adapts an [`ActionSelector`] to a seat.
///
/// Agents never face a fork since they propose explicit landings. A rejected
/// agent action is an internal fault, so the next command reports it as an
/// error and the match is aborted.
pub struct AgentController<A> {
    agent: A,
    last_rejection: Option<(Action, RuleError)>,
}

impl<A: ActionSelector> AgentController<A> {
    pub fn new(agent: A) -> Self {
        Self {
            agent,
            last_rejection: None,
        }
    }
}

impl<A> DiagonalChooser for AgentController<A> {
    fn choose_diagonal(&mut self, _player: usize, options: [Position; 2]) -> Option<Position> {
        Some(options[0])
    }
}

impl<A: ActionSelector> Controller for AgentController<A> {
    fn next_command(&mut self, game: &Game) -> anyhow::Result<Command> {
        if let Some((action, reason)) = self.last_rejection.take() {
            anyhow::bail!("Agent proposed illegal action {}: {}", action, reason);
        }
        Ok(Command::Act(self.agent.select_action(game)?))
    }

    fn rejected(&mut self, action: Action, reason: RuleError) {
        self.last_rejection = Some((action, reason));
    }
}

/// Lends a controller to [`Game::submit`] for fork resolution.
struct ChooserOf<'a>(&'a mut dyn Controller);

impl DiagonalChooser for ChooserOf<'_> {
    fn choose_diagonal(&mut self, player: usize, options: [Position; 2]) -> Option<Position> {
        self.0.choose_diagonal(player, options)
    }
}

/// A named seat at the table.
pub struct Participant {
    pub name: String,
    pub controller: Box<dyn Controller>,
}

impl Participant {
    pub fn new(name: impl Into<String>, controller: Box<dyn Controller>) -> Self {
        Self {
            name: name.into(),
            controller,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub outcome: Outcome,
    pub total_actions: u32,
    pub action_counts: Vec<u32>,
    pub elapsed_millis: u64,
}

/// Play `game` to the end with one participant per player.
///
/// Quitting or a controller failure ends the match as aborted. At the end the
/// recorder gets one call per player.
pub fn play_match(
    game: &mut Game,
    participants: &mut [Participant],
    recorder: &mut dyn StatsRecorder,
) -> anyhow::Result<MatchResult> {
    anyhow::ensure!(
        participants.len() == game.num_players(),
        "Expected {} participants, got {}",
        game.num_players(),
        participants.len()
    );

    while let GameStatus::AwaitingAction(player) = game.status() {
        let participant = &mut participants[player];

        let action = match participant.controller.next_command(game) {
            Ok(Command::Act(action)) => action,
            Ok(Command::Quit) => {
                info!("{} quit", participant.name);
                game.abort();
                break;
            }
            Err(err) => {
                warn!("{} failed, aborting match: {:#}", participant.name, err);
                game.abort();
                break;
            }
        };

        let mut chooser = ChooserOf(participant.controller.as_mut());
        if let Err(reason) = game.submit(action, &mut chooser) {
            participant.controller.rejected(action, reason);
        }
    }

    let GameStatus::GameOver(outcome) = game.status() else {
        anyhow::bail!("Match loop ended while a player was still to act");
    };

    let elapsed_millis = game.elapsed().as_millis() as u64;
    for (player, participant) in participants.iter().enumerate() {
        recorder.record_game(
            &participant.name,
            outcome == Outcome::Winner(player),
            game.action_count(player),
            elapsed_millis,
        );
    }

    Ok(MatchResult {
        outcome,
        total_actions: game.total_actions(),
        action_counts: (0..game.num_players())
            .map(|player| game.action_count(player))
            .collect(),
        elapsed_millis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::CandidateLimits;
    use crate::agents::{create_agent, Difficulty, GreedyAgent, RandomAgent};
    use crate::config::{AiConfig, GameConfig};
    use crate::grid::Direction;
    use crate::stats::Statistics;
    use std::collections::VecDeque;

    /// Replays a fixed script, then quits.
    struct Scripted {
        commands: VecDeque<Command>,
    }

    impl Scripted {
        fn new(lines: &[&str]) -> Self {
            let commands = lines
                .iter()
                .map(|line| Command::Act(line.parse().unwrap()))
                .collect();
            Self { commands }
        }
    }

    impl DiagonalChooser for Scripted {
        fn choose_diagonal(&mut self, _player: usize, options: [Position; 2]) -> Option<Position> {
            Some(options[1])
        }
    }

    impl Controller for Scripted {
        fn next_command(&mut self, _game: &Game) -> anyhow::Result<Command> {
            Ok(self.commands.pop_front().unwrap_or(Command::Quit))
        }
    }

    struct Failing;

    impl DiagonalChooser for Failing {
        fn choose_diagonal(&mut self, _player: usize, _options: [Position; 2]) -> Option<Position> {
            None
        }
    }

    impl Controller for Failing {
        fn next_command(&mut self, _game: &Game) -> anyhow::Result<Command> {
            anyhow::bail!("input closed")
        }
    }

    /// Always proposes the same move.
    struct Stubborn(Action);

    impl ActionSelector for Stubborn {
        fn select_action(&mut self, _game: &Game) -> anyhow::Result<Action> {
            Ok(self.0)
        }
    }

    fn small_game() -> Game {
        Game::new(&GameConfig {
            board_size: 3,
            ..GameConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_scripted_match_to_a_win() {
        let mut game = small_game();
        let mut seats = vec![
            Participant::new("north", Box::new(Scripted::new(&["M E", "M N", "M S", "M S"]))),
            Participant::new("south", Box::new(Scripted::new(&["M N", "M W"]))),
        ];
        let mut stats = Statistics::new();

        let result = play_match(&mut game, &mut seats, &mut stats).unwrap();

        // "M N" for north is off the board and does not use up the turn
        assert_eq!(result.outcome, Outcome::Winner(0));
        assert_eq!(result.action_counts, vec![3, 2]);
        assert_eq!(result.total_actions, 5);
        assert_eq!(stats.get("north").unwrap().wins, 1);
        assert_eq!(stats.get("south").unwrap().wins, 0);
        assert_eq!(stats.get("south").unwrap().games, 1);
    }

    #[test]
    fn test_quit_aborts_and_still_records() {
        let mut game = small_game();
        let mut seats = vec![
            Participant::new("a", Box::new(Scripted::new(&["M E"]))),
            Participant::new("b", Box::new(Scripted::new(&[]))),
        ];
        let mut stats = Statistics::new();

        let result = play_match(&mut game, &mut seats, &mut stats).unwrap();
        assert_eq!(result.outcome, Outcome::Aborted);
        assert_eq!(result.total_actions, 1);
        assert_eq!(stats.get("a").unwrap().games, 1);
        assert_eq!(stats.get("b").unwrap().actions, 0);
    }

    #[test]
    fn test_controller_failure_aborts() {
        let mut game = small_game();
        let mut seats = vec![
            Participant::new("a", Box::new(Failing)),
            Participant::new("b", Box::new(Failing)),
        ];
        let result = play_match(&mut game, &mut seats, &mut Statistics::new()).unwrap();
        assert_eq!(result.outcome, Outcome::Aborted);
    }

    #[test]
    fn test_illegal_agent_action_aborts() {
        let mut game = small_game();
        let mut seats = vec![
            Participant::new(
                "stubborn",
                Box::new(AgentController::new(Stubborn(Action::Move(Direction::North)))),
            ),
            Participant::new("b", Box::new(Failing)),
        ];
        let result = play_match(&mut game, &mut seats, &mut Statistics::new()).unwrap();
        assert_eq!(result.outcome, Outcome::Aborted);
        assert_eq!(game.total_actions(), 0);
    }

    #[test]
    fn test_participant_count_must_match() {
        let mut game = small_game();
        let mut seats = vec![Participant::new("solo", Box::new(Failing))];
        assert!(play_match(&mut game, &mut seats, &mut Statistics::new()).is_err());
    }

    #[test]
    fn test_agents_play_to_completion() {
        let mut game = Game::new(&GameConfig {
            board_size: 5,
            max_steps: Some(200),
            ..GameConfig::default()
        })
        .unwrap();
        let mut seats = vec![
            Participant::new(
                "random",
                Box::new(AgentController::new(RandomAgent::new(
                    CandidateLimits::default(),
                    Some(1),
                ))),
            ),
            Participant::new(
                "greedy",
                Box::new(AgentController::new(GreedyAgent::default())),
            ),
        ];
        let mut stats = Statistics::new();

        let result = play_match(&mut game, &mut seats, &mut stats).unwrap();
        assert_ne!(result.outcome, Outcome::Aborted);
        assert!(result.total_actions <= 200);
        assert_eq!(stats.names().count(), 2);
    }

    #[test]
    fn test_four_player_agents_play_to_completion() {
        let mut game = Game::new(&GameConfig {
            board_size: 7,
            num_players: 4,
            max_steps: Some(200),
            ..GameConfig::default()
        })
        .unwrap();
        let ai = AiConfig::default();
        let tiers = [
            Difficulty::Random,
            Difficulty::Greedy,
            Difficulty::Minimax,
            Difficulty::Random,
        ];
        let mut seats: Vec<Participant> = tiers
            .iter()
            .enumerate()
            .map(|(seat, &difficulty)| {
                let agent = create_agent(difficulty, &ai, Some(seat as u64));
                Participant::new(
                    format!("{seat}-{difficulty}"),
                    Box::new(AgentController::new(agent)),
                )
            })
            .collect();
        let mut stats = Statistics::new();

        let result = play_match(&mut game, &mut seats, &mut stats).unwrap();
        assert_ne!(result.outcome, Outcome::Aborted);
        assert_eq!(result.action_counts.len(), 4);
        assert_eq!(
            result.action_counts.iter().sum::<u32>(),
            result.total_actions
        );
        assert_eq!(stats.names().count(), 4);
    }
}
