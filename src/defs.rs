//! Standard dice with faces `1..=n` and uniform weights.

use crate::die::{Die, DieOptions};
use crate::value::DefaultFace;

fn numeric(size: DefaultFace) -> Die {
    Die::new(1..=size).unwrap_or_else(|_| unreachable!("1..={size} has distinct faces"))
}

/// A fair two-sided coin with faces `"H"` and `"T"`.
#[must_use]
pub fn coin() -> Die<&'static str> {
    Die::with_options(["H", "T"], DieOptions::builder().coin(true).build())
        .unwrap_or_else(|_| unreachable!("a two-faced coin is valid"))
}

#[must_use]
pub fn d2() -> Die {
    numeric(2)
}

#[must_use]
pub fn d4() -> Die {
    numeric(4)
}

#[must_use]
pub fn d6() -> Die {
    numeric(6)
}

#[must_use]
pub fn d8() -> Die {
    numeric(8)
}

#[must_use]
pub fn d10() -> Die {
    numeric(10)
}

#[must_use]
pub fn d12() -> Die {
    numeric(12)
}

#[must_use]
pub fn d20() -> Die {
    numeric(20)
}

#[must_use]
pub fn d100() -> Die {
    numeric(100)
}
