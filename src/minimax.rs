//! Fixed-depth minimax with alpha-beta pruning over speculative board copies.
//!
//! Each expanded node owns a [`SearchState`] cloned from its parent, so the
//! live game is never touched. Legality comes from the same validators the
//! turn engine uses, via [`candidate_actions`].

use log::trace;
use serde::{Deserialize, Serialize};

use crate::actions::{candidate_actions, Action, CandidateLimits};
use crate::board::Board;
use crate::grid::Position;
use crate::pathfinding::distance_to_goal;
use crate::players::Goal;
use crate::validation::resolve_step;

pub const WINNING_SCORE: i32 = 1_000_000;

/// Distance-to-goal estimate used for evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Row or column offset to the goal edge, ignoring walls.
    #[default]
    Offset,
    /// Shortest path length through the current walls.
    Path,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub depth: u32,
    pub limits: CandidateLimits,
    pub heuristic: Heuristic,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: 3,
            limits: CandidateLimits::default(),
            heuristic: Heuristic::default(),
        }
    }
}

/// Estimated number of steps from `pos` to `goal`.
///
/// `Path` falls back to the offset if the goal is unreachable, which cannot
/// happen on boards built through the wall validator.
pub fn distance_estimate(board: &Board, pos: Position, goal: Goal, heuristic: Heuristic) -> i32 {
    match heuristic {
        Heuristic::Offset => goal.offset(pos),
        Heuristic::Path => distance_to_goal(board, pos, goal)
            .map(|steps| steps as i32)
            .unwrap_or_else(|| goal.offset(pos)),
    }
}

/// Opponent's distance minus the agent's. Higher is better for `agent`.
pub fn evaluate_position(
    board: &Board,
    goals: &[Goal],
    agent: usize,
    opponent: usize,
    heuristic: Heuristic,
) -> i32 {
    let agent_distance =
        distance_estimate(board, board.pawn_position(agent), goals[agent], heuristic);
    let opponent_distance = distance_estimate(
        board,
        board.pawn_position(opponent),
        goals[opponent],
        heuristic,
    );
    opponent_distance - agent_distance
}

/// Board plus wall budgets: everything a speculative branch can change.
#[derive(Clone, Debug)]
pub struct SearchState {
    pub board: Board,
    pub walls_remaining: Vec<u32>,
}

impl SearchState {
    pub fn new(board: &Board, walls_remaining: &[u32]) -> Self {
        Self {
            board: board.snapshot_copy(),
            walls_remaining: walls_remaining.to_vec(),
        }
    }

    /// A copy of `self` with `action` applied for `player`.
    ///
    /// `action` must already be legal. Forked steps take the first diagonal.
    pub fn after(&self, player: usize, action: Action) -> Option<SearchState> {
        let mut next = self.clone();
        match action {
            Action::MoveTo(to) => next.board.move_pawn(player, to),
            Action::Move(direction) => {
                let resolution = resolve_step(&next.board, player, direction).ok()?;
                let to = *resolution.landings().first()?;
                next.board.move_pawn(player, to);
            }
            Action::Wall { .. } => {
                let wall = action.wall_segment(player)?;
                next.board.place_wall_segment(wall).ok()?;
                next.walls_remaining[player] = next.walls_remaining[player].checked_sub(1)?;
            }
        }
        Some(next)
    }
}

struct Search<'a> {
    goals: &'a [Goal],
    agent: usize,
    opponent: usize,
    params: &'a SearchParams,
    nodes: u64,
    cutoffs: u64,
}

impl Search<'_> {
    /// Win or loss score, preferring quicker wins and slower losses.
    fn terminal_score(&self, state: &SearchState, depth: u32) -> Option<i32> {
        let reached = |player: usize| self.goals[player].is_reached(state.board.pawn_position(player));
        if reached(self.agent) {
            Some(WINNING_SCORE + depth as i32)
        } else if reached(self.opponent) {
            Some(-WINNING_SCORE - depth as i32)
        } else {
            None
        }
    }

    fn evaluate(&self, state: &SearchState) -> i32 {
        evaluate_position(
            &state.board,
            self.goals,
            self.agent,
            self.opponent,
            self.params.heuristic,
        )
    }

    fn candidates(&self, state: &SearchState, mover: usize) -> Vec<Action> {
        let rival = if mover == self.agent {
            self.opponent
        } else {
            self.agent
        };
        candidate_actions(
            &state.board,
            self.goals,
            mover,
            state.walls_remaining[mover],
            state.board.pawn_position(rival),
            self.params.limits,
        )
    }

    fn minimax(
        &mut self,
        state: &SearchState,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if let Some(score) = self.terminal_score(state, depth) {
            return score;
        }
        if depth == 0 {
            return self.evaluate(state);
        }

        let mover = if maximizing { self.agent } else { self.opponent };
        let mut best: Option<i32> = None;

        for action in self.candidates(state, mover) {
            let Some(child) = state.after(mover, action) else {
                continue;
            };
            let score = self.minimax(&child, depth - 1, !maximizing, alpha, beta);

            if maximizing {
                best = Some(best.map_or(score, |b| b.max(score)));
                alpha = alpha.max(score);
            } else {
                best = Some(best.map_or(score, |b| b.min(score)));
                beta = beta.min(score);
            }

            if beta <= alpha {
                self.cutoffs += 1;
                break;
            }
        }

        // no candidates: score the position as it stands
        best.unwrap_or_else(|| self.evaluate(state))
    }
}

/// Score every root candidate for `agent` against `opponent`.
///
/// Each root child is searched with a full window, so the returned scores are
/// exact minimax values rather than pruning bounds.
pub fn evaluate_actions(
    board: &Board,
    goals: &[Goal],
    walls_remaining: &[u32],
    agent: usize,
    opponent: usize,
    params: &SearchParams,
) -> Vec<(Action, i32)> {
    let root = SearchState::new(board, walls_remaining);
    let mut search = Search {
        goals,
        agent,
        opponent,
        params,
        nodes: 0,
        cutoffs: 0,
    };

    let depth = params.depth.saturating_sub(1);
    let mut scored = Vec::new();
    for action in search.candidates(&root, agent) {
        let Some(child) = root.after(agent, action) else {
            continue;
        };
        let score = search.minimax(&child, depth, false, i32::MIN, i32::MAX);
        scored.push((action, score));
    }

    trace!(
        "minimax depth {}: {} root actions, {} nodes, {} cutoffs",
        params.depth,
        scored.len(),
        search.nodes,
        search.cutoffs
    );
    scored
}

/// The highest-scoring root action. Ties go to the earliest candidate.
pub fn best_action(
    board: &Board,
    goals: &[Goal],
    walls_remaining: &[u32],
    agent: usize,
    opponent: usize,
    params: &SearchParams,
) -> Option<(Action, i32)> {
    let mut best: Option<(Action, i32)> = None;
    for (action, score) in evaluate_actions(board, goals, walls_remaining, agent, opponent, params) {
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((action, score));
        }
    }
    best
}
