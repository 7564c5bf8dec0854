use thiserror::Error;

use crate::support::network::resistance::ResistanceError;
use crate::support::network::{BuildError, SolveError, TrajectoryError};

use super::parameters::ParameterError;

/// Anything that can go wrong building or running the rig.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("invalid rig parameters")]
    Parameters(#[from] ParameterError),
    #[error("a heat path could not be reduced to a resistance")]
    Resistance(#[from] ResistanceError),
    #[error("the rig network failed to assemble")]
    Build(#[from] BuildError),
    #[error("the heating run failed to solve")]
    Solve(#[from] SolveError),
    #[error("a fluid history could not be read from the trajectory")]
    Trajectory(#[from] TrajectoryError),
}
