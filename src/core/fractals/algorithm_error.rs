use crate::core::data::frame_spec::MAX_SUPPORTED_ITERATIONS;
use std::{error::Error, fmt};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlgorithmConstructorError {
    ZeroMaxIterationsError,
    MaxIterationsTooLarge { max_iterations: u32 },
    NonFiniteConstant { a: f64, b: f64 },
}

impl fmt::Display for AlgorithmConstructorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxIterationsError => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::MaxIterationsTooLarge { max_iterations } => write!(
                f,
                "Maximum iterations {} exceeds {}",
                max_iterations, MAX_SUPPORTED_ITERATIONS
            ),
            Self::NonFiniteConstant { a, b } => {
                write!(f, "Julia constant must be finite, got ({}, {})", a, b)
            }
        }
    }
}

impl Error for AlgorithmConstructorError {}

pub(crate) fn check_max_iterations(max_iterations: u32) -> Result<(), AlgorithmConstructorError> {
    if max_iterations == 0 {
        return Err(AlgorithmConstructorError::ZeroMaxIterationsError);
    }

    if max_iterations > MAX_SUPPORTED_ITERATIONS {
        return Err(AlgorithmConstructorError::MaxIterationsTooLarge { max_iterations });
    }

    Ok(())
}
