//! Engine configuration loaded from YAML.
//!
//! Every field has a default, so missing sections fall back to a standard
//! 2-player 9x9 game with a depth-3 search. Unknown keys are ignored.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::actions::CandidateLimits;
use crate::game_state::DiagonalPolicy;
use crate::minimax::{Heuristic, SearchParams};

pub const MIN_BOARD_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 25;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub game: GameConfig,
    pub ai: AiConfig,
}

/// Rules for a single match.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    pub num_players: usize,
    /// Overrides the 10 (2-player) / 5 (4-player) wall budget.
    pub walls_per_player: Option<u32>,
    /// Total actions after which the match is drawn.
    pub max_steps: Option<u32>,
    pub diagonal_policy: DiagonalPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 9,
            num_players: 2,
            walls_per_player: None,
            max_steps: None,
            diagonal_policy: DiagonalPolicy::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size),
            "board_size must be between {} and {}, got {}",
            MIN_BOARD_SIZE,
            MAX_BOARD_SIZE,
            self.board_size
        );
        ensure!(
            self.board_size % 2 == 1,
            "board_size must be odd so pawns start on a centre square, got {}",
            self.board_size
        );
        ensure!(
            self.num_players == 2 || self.num_players == 4,
            "num_players must be 2 or 4, got {}",
            self.num_players
        );
        ensure!(
            self.max_steps != Some(0),
            "max_steps must be positive when set"
        );
        Ok(())
    }
}

/// Search settings shared by the AI tiers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub depth: u32,
    pub wall_window: usize,
    pub max_candidates: usize,
    pub heuristic: Heuristic,
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        let limits = CandidateLimits::default();
        Self {
            depth: 3,
            wall_window: limits.wall_window,
            max_candidates: limits.max_candidates,
            heuristic: Heuristic::default(),
            seed: None,
        }
    }
}

impl AiConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.depth > 0, "ai.depth must be at least 1");
        ensure!(
            self.max_candidates > 0,
            "ai.max_candidates must be at least 1"
        );
        ensure!(
            self.wall_window <= MAX_BOARD_SIZE,
            "ai.wall_window must be at most {}, got {}",
            MAX_BOARD_SIZE,
            self.wall_window
        );
        Ok(())
    }

    pub fn limits(&self) -> CandidateLimits {
        CandidateLimits {
            wall_window: self.wall_window,
            max_candidates: self.max_candidates,
        }
    }

    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            depth: self.depth,
            limits: self.limits(),
            heuristic: self.heuristic,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        self.game.validate().context("Invalid game section")?;
        self.ai.validate().context("Invalid ai section")?;
        Ok(())
    }
}

/// Load and validate an `EngineConfig` from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
    let config: EngineConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(yaml.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_load_full_config() {
        let f = write_config(
            r#"
game:
  board_size: 7
  num_players: 4
  walls_per_player: 3
  max_steps: 150
  diagonal_policy: first
ai:
  depth: 2
  wall_window: 3
  max_candidates: 12
  heuristic: path
  seed: 42
"#,
        );

        let config = load_config(f.path()).unwrap();
        assert_eq!(config.game.board_size, 7);
        assert_eq!(config.game.num_players, 4);
        assert_eq!(config.game.walls_per_player, Some(3));
        assert_eq!(config.game.max_steps, Some(150));
        assert_eq!(config.game.diagonal_policy, DiagonalPolicy::First);
        assert_eq!(config.ai.depth, 2);
        assert_eq!(config.ai.heuristic, Heuristic::Path);
        assert_eq!(config.ai.seed, Some(42));
        assert_eq!(
            config.ai.limits(),
            CandidateLimits {
                wall_window: 3,
                max_candidates: 12
            }
        );
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let f = write_config(
            r#"
game:
  board_size: 5
display:
  colour: true
"#,
        );

        let config = load_config(f.path()).unwrap();
        assert_eq!(config.game.board_size, 5);
        assert_eq!(config.game.num_players, 2);
        assert_eq!(config.game.diagonal_policy, DiagonalPolicy::Ask);
        assert_eq!(config.ai, AiConfig::default());
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ai.search_params().depth, 3);
    }

    #[test]
    fn test_rejects_invalid_values() {
        for yaml in [
            "game:\n  board_size: 8\n",
            "game:\n  board_size: 1\n",
            "game:\n  num_players: 3\n",
            "game:\n  max_steps: 0\n",
            "ai:\n  depth: 0\n",
            "ai:\n  wall_window: 26\n",
            "ai:\n  wall_window: 18446744073709551615\n",
        ] {
            let f = write_config(yaml);
            assert!(load_config(f.path()).is_err(), "accepted {yaml:?}");
        }
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let f = write_config("game: [not, a, map]\n");
        assert!(load_config(f.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/quoridor.yaml");
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to read config file"));
    }
}
