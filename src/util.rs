use std::convert::Infallible;
use std::fmt::Debug;

use rand::distributions::WeightedError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Broad category of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInputType,
    InvalidDomainValue,
    InvalidKey,
    InvalidArgument,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("a die needs at least one face")]
    EmptyFaces,
    #[error("face values must be unique, {0} appears more than once")]
    DuplicateFace(String),
    #[error("weights must have the same length as faces: expected {expected}, found {found}")]
    WeightCount { expected: usize, found: usize },
    #[error("weights must be non-negative, found {0}")]
    NegativeWeight(f64),
    #[error("weight value is not numeric: {0}")]
    NonNumericWeight(String),
    #[error("face value not valid: {0}")]
    InvalidFace(String),
    #[error("a coin must have exactly 2 faces, found {0}")]
    NotACoin(usize),
    #[error("at least one weight must be positive")]
    ZeroTotalWeight,
    #[error("sum of weights is not finite")]
    WeightOverflow,
    #[error("roll count must be positive")]
    ZeroRolls,
    #[error("a game needs at least one die")]
    NoDice,
    #[error("all dice must have the same number of faces: die {die} has {found}, expected {expected}")]
    FaceCountMismatch {
        die: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid option {0:?} passed, choose 'wide' or 'narrow'")]
    InvalidForm(String),
    #[error("sampling failed: {0}")]
    Sampling(#[from] WeightedError),
    #[error("roller returned {found} indices for {expected} rolls")]
    RollerCount { expected: usize, found: usize },
    #[error("roller returned index {index}, die has {faces} faces")]
    RollerIndex { index: usize, faces: usize },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NonNumericWeight(_) => ErrorKind::InvalidInputType,
            Error::InvalidFace(_) => ErrorKind::InvalidKey,
            Error::ZeroRolls
            | Error::InvalidForm(_)
            | Error::RollerCount { .. }
            | Error::RollerIndex { .. } => ErrorKind::InvalidArgument,
            Error::EmptyFaces
            | Error::DuplicateFace(_)
            | Error::WeightCount { .. }
            | Error::NegativeWeight(_)
            | Error::NotACoin(_)
            | Error::ZeroTotalWeight
            | Error::WeightOverflow
            | Error::NoDice
            | Error::FaceCountMismatch { .. }
            | Error::Sampling(_) => ErrorKind::InvalidDomainValue,
        }
    }

    pub(crate) fn invalid_face<T: Debug>(face: &T) -> Self {
        Error::InvalidFace(format!("{face:?}"))
    }

    pub(crate) fn duplicate_face<T: Debug>(face: &T) -> Self {
        Error::DuplicateFace(format!("{face:?}"))
    }
}

impl From<Infallible> for Error {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}
