mod analyzer;
pub mod defs;
mod die;
mod game;
mod print;
mod roller;
mod table;
mod util;
mod value;
mod weight;

use std::sync::Arc;

pub use analyzer::{Analyzer, Combination, FaceCounts, Frequencies, Permutation};
pub use die::{Die, DieOptions, DieState};
pub use game::Game;
pub use roller::Roller;
pub use table::{DieId, NarrowRow, NarrowTable, ResultForm, Results, WideTable};
pub use util::{Error, ErrorKind, Result};
pub use value::{DefaultFace, Face};
pub use weight::Weight;

type Ptr<T> = Arc<T>;

/// Weight given to every face unless the caller supplies one.
pub const DEFAULT_WEIGHT: f64 = 1.0;
/// Prefix of die column labels in result tables, as in `die_0`.
pub const DIE_COLUMN_PREFIX: &str = "die_";
