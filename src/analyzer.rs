use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use itertools::Itertools;

use crate::game::Game;
use crate::table::WideTable;
use crate::value::{DefaultFace, Face};

/// Descriptive statistics over the latest results of one [`Game`].
///
/// Every query reads the game's current results at call time and never modifies the
/// game or its dice. Before the first play all queries report empty tables or zero.
#[derive(Clone, Debug)]
pub struct Analyzer<'a, T = DefaultFace>
where
    T: Face,
{
    game: &'a Game<T>,
}

/// Faces of one roll with their order dropped. Repeated faces are kept.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Combination<T = DefaultFace>(Vec<T>);

/// Faces of one roll in die order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permutation<T = DefaultFace>(Vec<T>);

/// Distinct keys with their occurrence counts, most frequent first. Keys with equal
/// counts keep the order in which they first appeared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frequencies<K> {
    entries: Vec<(K, usize)>,
}

/// Per-roll face counts: one column per face observed anywhere in the results, in
/// ascending face order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceCounts<T = DefaultFace> {
    faces: Vec<T>,
    rows: Vec<Vec<usize>>,
}

impl<'a, T> Analyzer<'a, T>
where
    T: Face,
{
    #[must_use]
    pub fn new(game: &'a Game<T>) -> Self {
        Self { game }
    }

    #[must_use]
    pub fn game(&self) -> &'a Game<T> {
        self.game
    }

    /// Number of rolls in which every die showed the same face.
    #[must_use]
    pub fn jackpot(&self) -> usize {
        self.rows().filter(|(_, row)| row.iter().all_equal()).count()
    }

    /// Roll numbers of every jackpot, ascending.
    #[must_use]
    pub fn jackpot_rolls(&self) -> Vec<usize> {
        self.rows()
            .filter(|(_, row)| row.iter().all_equal())
            .map(|(roll, _)| roll)
            .collect()
    }

    #[must_use]
    pub fn face_counts_per_roll(&self) -> FaceCounts<T> {
        let faces: Vec<T> = self
            .rows()
            .flat_map(|(_, row)| row.iter().cloned())
            .sorted()
            .dedup()
            .collect();

        let rows = self
            .rows()
            .map(|(_, row)| {
                let mut counts = vec![0; faces.len()];
                for face in row {
                    if let Ok(i) = faces.binary_search(face) {
                        counts[i] += 1;
                    }
                }
                counts
            })
            .collect();

        FaceCounts { faces, rows }
    }

    #[must_use]
    pub fn combo_count(&self) -> Frequencies<Combination<T>> {
        tally(
            self.rows()
                .map(|(_, row)| Combination::new(row.iter().cloned())),
        )
    }

    #[must_use]
    pub fn distinct_permutations(&self) -> Frequencies<Permutation<T>> {
        tally(
            self.rows()
                .map(|(_, row)| Permutation::new(row.iter().cloned())),
        )
    }

    fn rows(&self) -> impl Iterator<Item = (usize, &'a [T])> + 'a {
        self.game.last_results().into_iter().flat_map(WideTable::rows)
    }
}

/// Counts keys in one pass, then orders them by count descending. The sort is stable,
/// so ties stay in first-occurrence order.
fn tally<K, I>(keys: I) -> Frequencies<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index = HashMap::new();
    let mut entries: Vec<(K, usize)> = Vec::new();

    for key in keys {
        match index.entry(key) {
            Entry::Vacant(e) => {
                entries.push((e.key().clone(), 1));
                e.insert(entries.len() - 1);
            }
            Entry::Occupied(e) => {
                entries[*e.get()].1 += 1;
            }
        }
    }

    Frequencies {
        entries: entries
            .into_iter()
            .sorted_by(|(_, a), (_, b)| b.cmp(a))
            .collect(),
    }
}

impl<T> Combination<T>
where
    T: Ord,
{
    pub fn new<I>(faces: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self(faces.into_iter().sorted().collect())
    }
}

impl<T> Combination<T> {
    /// Faces in ascending order.
    #[must_use]
    pub fn faces(&self) -> &[T] {
        &self.0
    }
}

impl<T> Permutation<T> {
    pub fn new<I>(faces: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self(faces.into_iter().collect())
    }

    #[must_use]
    pub fn faces(&self) -> &[T] {
        &self.0
    }
}

impl<K> Frequencies<K> {
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> + '_ {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, which equals the number of rolls.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

impl<K> Frequencies<K>
where
    K: PartialEq,
{
    /// Occurrences of `key`; zero when it never occurred.
    #[must_use]
    pub fn count(&self, key: &K) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, c)| *c)
    }
}

impl<K> IntoIterator for Frequencies<K> {
    type Item = (K, usize);
    type IntoIter = std::vec::IntoIter<(K, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T> FaceCounts<T>
where
    T: Face,
{
    #[must_use]
    pub fn faces(&self) -> &[T] {
        &self.faces
    }

    #[must_use]
    pub fn num_rolls(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i + 1, row.as_slice()))
    }

    #[must_use]
    pub fn row(&self, roll: usize) -> Option<&[usize]> {
        roll.checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .map(Vec::as_slice)
    }

    /// Count of `face` on roll `roll` (1-based). `None` when the roll does not exist or
    /// the face was never rolled at all.
    #[must_use]
    pub fn get(&self, roll: usize, face: &T) -> Option<usize> {
        let i = self.faces.binary_search(face).ok()?;
        self.row(roll).map(|row| row[i])
    }
}
