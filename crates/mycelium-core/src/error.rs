//! Error types for the Mycelium simulator.
//!
//! The taxonomy is narrow: a propagator either fails outright
//! or leaves a non-finite value behind. The engine wraps either case in a
//! [`StepError`] naming the propagator that produced it.

use std::error::Error;
use std::fmt;

/// Errors from the engine during a single tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A propagator returned an error, or left non-finite values in a grid
    /// it declared as written.
    PropagatorFailed {
        /// Name of the failing propagator.
        name: String,
        /// The underlying propagator error.
        reason: PropagatorError,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PropagatorFailed { name, reason } => {
                write!(f, "propagator '{name}' failed: {reason}")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PropagatorFailed { reason, .. } => Some(reason),
        }
    }
}

/// Errors from individual propagator execution.
///
/// Returned by `Propagator::step()` and wrapped in
/// [`StepError::PropagatorFailed`] by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropagatorError {
    /// The propagator's step function failed.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// NaN or infinity detected in propagator output.
    NanDetected {
        /// The grid containing the value.
        field_id: crate::FieldId,
        /// Index of the first offending cell, if known.
        cell_index: Option<usize>,
    },
}

impl fmt::Display for PropagatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::NanDetected {
                field_id,
                cell_index,
            } => {
                write!(f, "non-finite value in field {field_id}")?;
                if let Some(idx) = cell_index {
                    write!(f, " at cell {idx}")?;
                }
                Ok(())
            }
        }
    }
}

impl Error for PropagatorError {}
