use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::util::{Error, Result};
use crate::value::DefaultFace;
use crate::DIE_COLUMN_PREFIX;

/// Position of a die within its game. Displays as `die_<n>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DieId(pub usize);

/// Layout of [`Game::show_results`](crate::Game::show_results).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResultForm {
    /// One row per roll, one column per die.
    #[default]
    Wide,
    /// One row per (roll, die) pair.
    Narrow,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Results<T = DefaultFace> {
    Wide(WideTable<T>),
    Narrow(NarrowTable<T>),
}

/// Roll-indexed results: row `r` (1-based) holds the face each die showed on roll `r`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WideTable<T = DefaultFace> {
    num_dice: usize,
    rows: Vec<Vec<T>>,
}

/// Long-format results, ordered by die and then by roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NarrowTable<T = DefaultFace> {
    rows: Vec<NarrowRow<T>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NarrowRow<T = DefaultFace> {
    pub roll: usize,
    pub die: DieId,
    pub outcome: T,
}

impl fmt::Display for DieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DIE_COLUMN_PREFIX}{}", self.0)
    }
}

impl FromStr for ResultForm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wide" => Ok(ResultForm::Wide),
            "narrow" => Ok(ResultForm::Narrow),
            _ => Err(Error::InvalidForm(s.to_string())),
        }
    }
}

impl fmt::Display for ResultForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultForm::Wide => f.write_str("wide"),
            ResultForm::Narrow => f.write_str("narrow"),
        }
    }
}

impl<T> Results<T> {
    #[must_use]
    pub fn form(&self) -> ResultForm {
        match self {
            Results::Wide(_) => ResultForm::Wide,
            Results::Narrow(_) => ResultForm::Narrow,
        }
    }

    /// Number of table rows in this layout.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Results::Wide(t) => t.num_rolls(),
            Results::Narrow(t) => t.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn into_wide(self) -> Option<WideTable<T>> {
        match self {
            Results::Wide(t) => Some(t),
            Results::Narrow(_) => None,
        }
    }

    #[must_use]
    pub fn into_narrow(self) -> Option<NarrowTable<T>> {
        match self {
            Results::Narrow(t) => Some(t),
            Results::Wide(_) => None,
        }
    }
}

impl<T> WideTable<T> {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            num_dice: 0,
            rows: Vec::new(),
        }
    }

    /// Builds a table from one equally long outcome sequence per die.
    pub(crate) fn from_columns(columns: Vec<Vec<T>>) -> Self {
        let num_dice = columns.len();
        let num_rolls = columns.first().map_or(0, Vec::len);
        debug_assert!(columns.iter().all(|c| c.len() == num_rolls));
        let mut columns: Vec<_> = columns.into_iter().map(Vec::into_iter).collect();
        let rows = (0..num_rolls)
            .map(|_| columns.iter_mut().filter_map(Iterator::next).collect())
            .collect();
        Self { num_dice, rows }
    }

    #[must_use]
    pub fn num_rolls(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn num_dice(&self) -> usize {
        self.num_dice
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = DieId> {
        (0..self.num_dice).map(DieId)
    }

    /// Rows paired with their 1-based roll number.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[T])> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i + 1, row.as_slice()))
    }

    #[must_use]
    pub fn row(&self, roll: usize) -> Option<&[T]> {
        roll.checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .map(Vec::as_slice)
    }

    #[must_use]
    pub fn get(&self, roll: usize, die: DieId) -> Option<&T> {
        self.row(roll).and_then(|row| row.get(die.0))
    }

    #[must_use]
    pub fn column(&self, die: DieId) -> Option<Vec<&T>> {
        (die.0 < self.num_dice).then(|| self.rows.iter().map(|row| &row[die.0]).collect())
    }
}

impl<T> WideTable<T>
where
    T: Clone,
{
    #[must_use]
    pub fn to_narrow(&self) -> NarrowTable<T> {
        let rows = self
            .columns()
            .flat_map(|die| {
                self.rows().map(move |(roll, row)| NarrowRow {
                    roll,
                    die,
                    outcome: row[die.0].clone(),
                })
            })
            .collect();
        NarrowTable { rows }
    }
}

impl<T> Default for WideTable<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> NarrowTable<T> {
    #[must_use]
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn rows(&self) -> &[NarrowRow<T>] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NarrowRow<T>> {
        self.rows.iter()
    }
}

impl<T> NarrowTable<T>
where
    T: Clone,
{
    /// Pivots back to the wide layout, one column per die.
    #[must_use]
    pub fn pivot(&self) -> WideTable<T> {
        let columns = self
            .rows
            .iter()
            .chunk_by(|r| r.die)
            .into_iter()
            .map(|(_, rows)| rows.map(|r| r.outcome.clone()).collect())
            .collect();
        WideTable::from_columns(columns)
    }
}

impl<T> Default for NarrowTable<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T> IntoIterator for &'a NarrowTable<T> {
    type Item = &'a NarrowRow<T>;
    type IntoIter = std::slice::Iter<'a, NarrowRow<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
