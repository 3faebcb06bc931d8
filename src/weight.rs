use std::fmt;
use std::str::FromStr;

use crate::util::{Error, Result};

/// A validated face weight: finite and non-negative.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::NonNumericWeight(value.to_string()));
        }
        if value < 0.0 {
            return Err(Error::NegativeWeight(value));
        }
        // -0.0 + 0.0 == +0.0
        Ok(Self(value + 0.0))
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self(crate::DEFAULT_WEIGHT)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Weight> for f64 {
    fn from(value: Weight) -> Self {
        value.0
    }
}

impl TryFrom<f64> for Weight {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

macro_rules! impl_weight_from_lossless {
    ($typ:ty) => {
        impl TryFrom<$typ> for Weight {
            type Error = Error;

            fn try_from(value: $typ) -> Result<Self> {
                Self::new(f64::from(value))
            }
        }
    };
}

macro_rules! impl_weight_from_trunc {
    ($typ:ty) => {
        impl TryFrom<$typ> for Weight {
            type Error = Error;

            fn try_from(value: $typ) -> Result<Self> {
                Self::new(value as f64)
            }
        }
    };
}

impl_weight_from_lossless!(f32);
impl_weight_from_lossless!(u8);
impl_weight_from_lossless!(u16);
impl_weight_from_lossless!(u32);
impl_weight_from_lossless!(i8);
impl_weight_from_lossless!(i16);
impl_weight_from_lossless!(i32);
impl_weight_from_trunc!(u64);
impl_weight_from_trunc!(i64);
impl_weight_from_trunc!(usize);

/// Parses numeric text such as `"2.5"`. Non-numeric text is an input type error.
impl FromStr for Weight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| Error::NonNumericWeight(s.to_string()))?;
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn accepts_zero_and_positive() {
        assert_eq!(Weight::new(0.0).unwrap().get(), 0.0);
        assert_eq!(Weight::try_from(3).unwrap().get(), 3.0);
        assert_eq!(Weight::try_from(2.5f32).unwrap().get(), 2.5);
    }

    #[test]
    fn negative_zero_is_zero() {
        let w = Weight::new(-0.0).unwrap();
        assert!(w.get().is_sign_positive());
        assert_eq!(w.to_string(), "0");

        let die = crate::Die::weighted([1, 2], [-0.0, 1.0]).unwrap();
        die.change_weight(&2, -0.0).unwrap();
        assert!(die.show_state().weights().all(f64::is_sign_positive));
    }

    #[test]
    fn rejects_negative() {
        let err = Weight::new(-0.5).unwrap_err();
        assert_eq!(err, Error::NegativeWeight(-0.5));
        assert_eq!(err.kind(), ErrorKind::InvalidDomainValue);
        assert_eq!(
            Weight::try_from(-1i64).unwrap_err().kind(),
            ErrorKind::InvalidDomainValue
        );
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(
            Weight::new(f64::NAN).unwrap_err().kind(),
            ErrorKind::InvalidInputType
        );
        assert_eq!(
            Weight::new(f64::INFINITY).unwrap_err().kind(),
            ErrorKind::InvalidInputType
        );
    }

    #[test]
    fn parses_numeric_text() {
        assert_eq!("2.5".parse::<Weight>().unwrap().get(), 2.5);
        assert_eq!(" 4 ".parse::<Weight>().unwrap().get(), 4.0);
    }

    #[test]
    fn rejects_non_numeric_text() {
        let err = "heavy".parse::<Weight>().unwrap_err();
        assert_eq!(err, Error::NonNumericWeight("heavy".to_string()));
        assert_eq!(err.kind(), ErrorKind::InvalidInputType);
        assert_eq!(
            "-2".parse::<Weight>().unwrap_err().kind(),
            ErrorKind::InvalidDomainValue
        );
    }
}
