//! Per-player statistics across matches.

use std::collections::BTreeMap;
use std::fmt;

/// Receives one call per player when a match ends.
pub trait StatsRecorder {
    fn record_game(&mut self, name: &str, won: bool, action_count: u32, elapsed_millis: u64);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub games: u32,
    pub wins: u32,
    pub actions: u64,
    pub elapsed_millis: u64,
}

impl PlayerStats {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.games)
        }
    }

    pub fn average_actions(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.actions as f64 / f64::from(self.games)
        }
    }

    fn merge(&mut self, other: &PlayerStats) {
        self.games += other.games;
        self.wins += other.wins;
        self.actions += other.actions;
        self.elapsed_millis += other.elapsed_millis;
    }
}

/// In-memory tally keyed by player name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    players: BTreeMap<String, PlayerStats>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&PlayerStats> {
        self.players.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.players.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: Statistics) {
        for (name, stats) in other.players {
            self.players.entry(name).or_default().merge(&stats);
        }
    }
}

impl StatsRecorder for Statistics {
    fn record_game(&mut self, name: &str, won: bool, action_count: u32, elapsed_millis: u64) {
        let entry = self.players.entry(name.to_string()).or_default();
        entry.games += 1;
        entry.wins += u32::from(won);
        entry.actions += u64::from(action_count);
        entry.elapsed_millis += elapsed_millis;
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, stats) in &self.players {
            writeln!(
                f,
                "{:<16} games {:>4}  wins {:>4} ({:>5.1}%)  avg actions {:>6.1}  time {:.1}s",
                name,
                stats.games,
                stats.wins,
                stats.win_rate() * 100.0,
                stats.average_actions(),
                stats.elapsed_millis as f64 / 1000.0
            )?;
        }
        Ok(())
    }
}
