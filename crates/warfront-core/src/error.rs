use thiserror::Error;

use crate::enums::BattleState;
use crate::types::{BattlefieldId, NationId, PlayerId, UnitId};

/// Rejections surfaced by battle manager operations.
///
/// Creating a battle twice for one location and deploying past the admission
/// cap are deliberately absent: the first returns the existing battle, the
/// second queues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BattleError {
    #[error("battlefield not found: {0}")]
    BattlefieldNotFound(BattlefieldId),

    #[error("{nation} has no faction on {battlefield}")]
    FactionNotFound {
        battlefield: BattlefieldId,
        nation: NationId,
    },

    #[error("unit not found: {0}")]
    UnitNotFound(UnitId),

    #[error("{battlefield} cannot go from {from:?} to {to:?}")]
    InvalidTransition {
        battlefield: BattlefieldId,
        from: BattleState,
        to: BattleState,
    },

    #[error("{player} cannot afford the requested deployment")]
    InsufficientResources { player: PlayerId },
}

pub type Result<T> = std::result::Result<T, BattleError>;
