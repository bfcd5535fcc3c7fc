/// Error of the kinematic solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The two circles do not intersect, the linkage cannot be assembled at
    /// this input angle
    Infeasible,
    /// The precision points and angles make the coefficient determinant
    /// vanish, no finite dyad exists
    DegenerateSynthesis,
    /// Rejected before computation
    InvalidInput(&'static str),
    /// The half-chord went negative beyond the rounding tolerance
    NumericalInstability,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Infeasible => write!(f, "infeasible configuration"),
            Self::DegenerateSynthesis => write!(f, "degenerate synthesis"),
            Self::InvalidInput(s) => write!(f, "invalid input: {s}"),
            Self::NumericalInstability => write!(f, "numerical instability"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Return true if the error is expected during a motion sweep.
    ///
    /// The input angle is just out of the range of motion.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Infeasible)
    }
}

/// Result type of the solvers.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn check_finite(v: &[f64], msg: &'static str) -> Result<()> {
    if v.iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(Error::InvalidInput(msg))
    }
}

pub(crate) fn check_len(v: &[f64], msg: &'static str) -> Result<()> {
    check_finite(v, msg)?;
    if v.iter().all(|x| *x >= 0.) {
        Ok(())
    } else {
        Err(Error::InvalidInput(msg))
    }
}
