use std::fmt::{Display, Debug, Formatter, Result};


/// Error set for fiber parameter derivation errors
pub enum ParameterError {
    /// Diameter is not one of the calibrated fiber diameters
    UnsupportedDiameter(f64),
    /// Derived internodal segment length is not positive
    NonPositiveInternodeLength(f64),
}

impl Display for ParameterError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ParameterError::UnsupportedDiameter(diameter) => write!(
                f, "{} um is not one of the calibrated fiber diameters", diameter
            ),
            ParameterError::NonPositiveInternodeLength(length) => write!(
                f, "Derived internodal segment length must be positive (got {} um)", length
            ),
        }
    }
}

impl Debug for ParameterError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for potential fiber construction errors
pub enum FiberError {
    /// Fiber needs at least two nodes to have an internodal segment
    InvalidNodeCount(usize),
}

impl Display for FiberError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            FiberError::InvalidNodeCount(count) => write!(
                f, "Fiber must have at least 2 nodes of Ranvier (got {})", count
            ),
        }
    }
}

impl Debug for FiberError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// Error set for extracellular field configuration errors
pub enum FieldError {
    /// A point source coincides with a compartment center (potential is undefined at r = 0)
    DegenerateSourcePlacement {
        /// Index of the offending source
        source: usize,
        /// Index of the coincident compartment
        compartment: usize,
    },
    /// Extracellular medium conductivity must be positive
    NonPositiveConductivity(f64),
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            FieldError::DegenerateSourcePlacement { source, compartment } => write!(
                f,
                "Point source {} coincides with compartment {} (source to fiber distance must be positive)",
                source, compartment
            ),
            FieldError::NonPositiveConductivity(sigma) => write!(
                f, "Extracellular conductivity must be positive (got {} S/mm)", sigma
            ),
        }
    }
}

impl Debug for FieldError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

/// A set of errors that may occur when using the library
pub enum MyelinatedAxonError {
    /// Errors related to parameter derivation
    ParameterRelatedError(ParameterError),
    /// Errors related to fiber construction
    FiberRelatedError(FiberError),
    /// Errors related to extracellular field configuration
    FieldRelatedError(FieldError),
}

impl Display for MyelinatedAxonError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            MyelinatedAxonError::ParameterRelatedError(err) => write!(f, "{}", err),
            MyelinatedAxonError::FiberRelatedError(err) => write!(f, "{}", err),
            MyelinatedAxonError::FieldRelatedError(err) => write!(f, "{}", err),
        }
    }
}

impl Debug for MyelinatedAxonError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "file: {}, line: {}, error: {}", file!(), line!(), self)
    }
}

impl From<ParameterError> for MyelinatedAxonError {
    fn from(err: ParameterError) -> MyelinatedAxonError {
        MyelinatedAxonError::ParameterRelatedError(err)
    }
}

impl From<FiberError> for MyelinatedAxonError {
    fn from(err: FiberError) -> MyelinatedAxonError {
        MyelinatedAxonError::FiberRelatedError(err)
    }
}

impl From<FieldError> for MyelinatedAxonError {
    fn from(err: FieldError) -> MyelinatedAxonError {
        MyelinatedAxonError::FieldRelatedError(err)
    }
}
