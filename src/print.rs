use std::fmt::{self, Display};
use std::iter;

use comfy_table::presets::UTF8_NO_BORDERS;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use itertools::Itertools;

use crate::analyzer::{Combination, FaceCounts, Frequencies, Permutation};
use crate::die::DieState;
use crate::table::{NarrowTable, Results, WideTable};
use crate::value::Face;

fn table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Display,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_NO_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.into_iter().map(Cell::new));
    table
}

fn number<T: Display>(value: T) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

impl<T> Display for WideTable<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.columns().map(|d| d.to_string());
        let mut t = table(iter::once("roll".to_string()).chain(header));
        for (roll, row) in self.rows() {
            t.add_row(iter::once(number(roll)).chain(row.iter().map(Cell::new)));
        }
        writeln!(f, "{t}")
    }
}

impl<T> Display for NarrowTable<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut t = table(["roll", "die", "outcome"]);
        for row in self {
            t.add_row(vec![
                number(row.roll),
                Cell::new(row.die),
                Cell::new(&row.outcome),
            ]);
        }
        writeln!(f, "{t}")
    }
}

impl<T> Display for Results<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Results::Wide(table) => Display::fmt(table, f),
            Results::Narrow(table) => Display::fmt(table, f),
        }
    }
}

impl<T> Display for FaceCounts<T>
where
    T: Face + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.faces().iter().map(T::to_string);
        let mut t = table(iter::once("roll".to_string()).chain(header));
        for (roll, counts) in self.rows() {
            t.add_row(iter::once(number(roll)).chain(counts.iter().map(number)));
        }
        writeln!(f, "{t}")
    }
}

impl<K> Display for Frequencies<K>
where
    K: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut t = table(["faces", "counts"]);
        for (key, count) in self.iter() {
            t.add_row(vec![Cell::new(key), number(count)]);
        }
        writeln!(f, "{t}")
    }
}

impl<T> Display for DieState<T>
where
    T: Face + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        let mut t = table(["face", "weight", "probability"]);
        for (face, weight) in self.iter() {
            let p = if total.is_finite() && total > 0.0 { weight / total } else { 0.0 };
            t.add_row(vec![
                Cell::new(face),
                number(weight),
                number(format!("{:6.2}%", p * 100.0)),
            ]);
        }
        writeln!(f, "{t}")
    }
}

impl<T> Display for Combination<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.faces().iter().join(", "))
    }
}

impl<T> Display for Permutation<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.faces().iter().join(", "))
    }
}
