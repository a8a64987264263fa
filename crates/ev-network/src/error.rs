//! Network-subsystem error type.

use thiserror::Error;

use ev_core::{EvError, VillageId};

/// Errors produced while assembling an `EvacNetwork`.
///
/// Searching never fails; an unreachable or unknown goal is `None`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("village {0} is not in the village table")]
    UnknownVillage(VillageId),

    #[error(transparent)]
    Core(#[from] EvError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
