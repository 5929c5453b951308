//! Rule violations reported by the validators.
//!
//! Every variant is recoverable: the turn engine reports it and the same
//! player acts again.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    #[error("position is outside the board")]
    OutOfBounds,

    #[error("a wall blocks that way")]
    WallBlocked,

    #[error("that square is occupied")]
    Occupied,

    #[error("wall overlaps or crosses an existing wall")]
    Overlap,

    #[error("wall would leave a player without a path to their goal")]
    PathBlocked,

    #[error("no legal jump over that pawn")]
    NoLegalJump,

    #[error("could not understand that command")]
    InvalidFormat,

    #[error("no walls remaining")]
    NoWallsRemaining,
}
