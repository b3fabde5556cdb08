//! Error type for analysis

use crate::arch::ArchName;
use crate::reg::CpuState;
use std::result;
use thiserror::Error;

/// Error type for analysis.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Dispatch reached an architecture with no registered decode strategy.
    #[error("no decode strategy is registered for {0:?}")]
    UnsupportedArchitecture(ArchName),

    /// An instruction record was queried before it was initialized.
    #[error("instruction record was queried before it was initialized")]
    NotInitialized,

    /// A register snapshot of the wrong processor was supplied to a strategy.
    #[error("the {strategy} decoder cannot resolve addresses with {state} registers")]
    StateMismatch {
        strategy: &'static str,
        state: &'static str,
    },
}

impl Error {
    pub fn state_mismatch(strategy: &'static str, state: &CpuState) -> Self {
        Error::StateMismatch {
            strategy,
            state: state.kind(),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
