use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bon::Builder;
use itertools::Itertools;
use log::{debug, trace, warn};
use rand::thread_rng;

use crate::roller::Roller;
use crate::util::{Error, Result};
use crate::value::{DefaultFace, Face};
use crate::weight::Weight;
use crate::Ptr;

/// Construction options for a [`Die`].
#[derive(Debug, Clone, Default, Builder)]
pub struct DieOptions {
    /// One weight per face, in face order. Uniform when absent.
    weights: Option<Vec<f64>>,
    /// Rolling a coin requires exactly two faces.
    #[builder(default)]
    coin: bool,
}

/// A die with fixed faces and mutable, non-negative weights.
///
/// `Die` is a shared handle: clones refer to the same faces and weights, so a weight
/// change through one clone is seen by every game holding another.
#[derive(Clone)]
pub struct Die<T = DefaultFace>(Ptr<RwLock<DieInner<T>>>)
where
    T: Face;

#[derive(Clone, Debug)]
struct DieInner<T>
where
    T: Face,
{
    faces: Vec<T>,
    index: HashMap<T, usize>,
    weights: Vec<f64>,
    coin: bool,
}

/// Owned snapshot of a die's weights, in face order.
#[derive(Clone, Debug, PartialEq)]
pub struct DieState<T = DefaultFace> {
    entries: Vec<(T, f64)>,
}

impl<T> Die<T>
where
    T: Face,
{
    /// Die with every face weighted [`DEFAULT_WEIGHT`](crate::DEFAULT_WEIGHT).
    pub fn new<I>(faces: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::with_options(faces, DieOptions::default())
    }

    pub fn weighted<I, W>(faces: I, weights: W) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        W: IntoIterator<Item = f64>,
    {
        Self::with_options(
            faces,
            DieOptions::builder()
                .weights(weights.into_iter().collect())
                .build(),
        )
    }

    pub fn with_options<I>(faces: I, options: DieOptions) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let faces: Vec<T> = faces.into_iter().collect();
        if faces.is_empty() {
            return Err(Error::EmptyFaces);
        }

        let mut index = HashMap::with_capacity(faces.len());
        for (i, face) in faces.iter().enumerate() {
            if index.insert(face.clone(), i).is_some() {
                return Err(Error::duplicate_face(face));
            }
        }

        let weights = match options.weights {
            None => vec![Weight::default().get(); faces.len()],
            Some(weights) => {
                if weights.len() != faces.len() {
                    return Err(Error::WeightCount {
                        expected: faces.len(),
                        found: weights.len(),
                    });
                }
                weights
                    .into_iter()
                    .map(|w| Weight::new(w).map(Weight::get))
                    .collect::<Result<Vec<_>>>()?
            }
        };

        Ok(Self(Ptr::new(RwLock::new(DieInner {
            faces,
            index,
            weights,
            coin: options.coin,
        }))))
    }

    #[must_use]
    pub fn faces(&self) -> Vec<T> {
        self.read().faces.clone()
    }

    #[must_use]
    pub fn num_faces(&self) -> usize {
        self.read().faces.len()
    }

    #[must_use]
    pub fn is_coin(&self) -> bool {
        self.read().coin
    }

    /// Overwrites the weight of one face. Other faces keep their weights.
    pub fn change_weight<W>(&self, face: &T, weight: W) -> Result<()>
    where
        W: TryInto<Weight>,
        Error: From<W::Error>,
    {
        let mut inner = self.write();
        let i = *inner.index.get(face).ok_or_else(|| Error::invalid_face(face))?;
        let weight = weight.try_into()?.get();
        debug!("face {face:?} weight {} -> {weight}", inner.weights[i]);
        inner.weights[i] = weight;
        Ok(())
    }

    /// Rolls the die `times` times with the thread-local generator.
    pub fn roll(&self, times: usize) -> Result<Vec<T>> {
        self.roll_with(times, &mut thread_rng())
    }

    /// Rolls the die `times` times, drawing with replacement from `roller`.
    pub fn roll_with<R>(&self, times: usize, roller: &mut R) -> Result<Vec<T>>
    where
        R: Roller + ?Sized,
    {
        if times == 0 {
            return Err(Error::ZeroRolls);
        }
        let inner = self.read();
        if inner.coin && inner.faces.len() != 2 {
            return Err(Error::NotACoin(inner.faces.len()));
        }
        let total: f64 = inner.weights.iter().sum();
        if !total.is_finite() {
            warn!("refusing to roll a die whose weights sum to {total}");
            return Err(Error::WeightOverflow);
        }
        if total == 0.0 {
            warn!("refusing to roll a die whose weights are all zero");
            return Err(Error::ZeroTotalWeight);
        }

        let indices = roller.roll_indices(&inner.weights, times)?;
        if indices.len() != times {
            return Err(Error::RollerCount {
                expected: times,
                found: indices.len(),
            });
        }
        trace!("rolled {times} times over {} faces", inner.faces.len());
        indices
            .into_iter()
            .map(|i| {
                inner.faces.get(i).cloned().ok_or(Error::RollerIndex {
                    index: i,
                    faces: inner.faces.len(),
                })
            })
            .collect()
    }

    #[must_use]
    pub fn show_state(&self) -> DieState<T> {
        let inner = self.read();
        DieState {
            entries: inner
                .faces
                .iter()
                .cloned()
                .zip(inner.weights.iter().copied())
                .collect(),
        }
    }

    pub fn probabilities(&self) -> Result<Vec<(T, f64)>> {
        self.show_state().probabilities()
    }

    /// Faces carrying the greatest weight, in face order.
    #[must_use]
    pub fn modes(&self) -> Vec<T> {
        let inner = self.read();
        inner
            .faces
            .iter()
            .zip(&inner.weights)
            .max_set_by(|(_, a), (_, b)| a.total_cmp(b))
            .into_iter()
            .map(|(f, _)| f.clone())
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, DieInner<T>> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DieInner<T>> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Debug for Die<T>
where
    T: Face,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.read();
        f.debug_struct("Die")
            .field("faces", &inner.faces)
            .field("weights", &inner.weights)
            .field("coin", &inner.coin)
            .finish()
    }
}

impl<T> DieState<T>
where
    T: Face,
{
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.entries.iter().map(|(f, w)| (f, *w))
    }

    pub fn faces(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().map(|(f, _)| f)
    }

    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, w)| *w)
    }

    #[must_use]
    pub fn weight(&self, face: &T) -> Option<f64> {
        self.entries
            .iter()
            .find(|(f, _)| f == face)
            .map(|(_, w)| *w)
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `weight / total` per face.
    pub fn probabilities(&self) -> Result<Vec<(T, f64)>> {
        let total = self.total();
        if !total.is_finite() {
            return Err(Error::WeightOverflow);
        }
        if total == 0.0 {
            return Err(Error::ZeroTotalWeight);
        }
        Ok(self
            .entries
            .iter()
            .map(|(f, w)| (f.clone(), w / total))
            .collect())
    }
}

impl<T> IntoIterator for DieState<T> {
    type Item = (T, f64);
    type IntoIter = std::vec::IntoIter<(T, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roller::ScriptedRoller;
    use crate::ErrorKind;

    fn d6() -> Die {
        Die::new(1..=6).unwrap()
    }

    #[test]
    fn uniform_by_default() {
        let state = d6().show_state();
        assert_eq!(state.len(), 6);
        assert!(state.weights().all(|w| w == 1.0));
        assert_eq!(state.faces().copied().collect_vec(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn categorical_faces() {
        let die = Die::new(["heads", "tails"]).unwrap();
        assert_eq!(die.faces(), vec!["heads", "tails"]);
    }

    #[test]
    fn duplicate_faces_rejected() {
        let err = Die::new([1, 2, 2, 3]).unwrap_err();
        assert_eq!(err, Error::DuplicateFace("2".to_string()));
        assert_eq!(err.kind(), ErrorKind::InvalidDomainValue);
    }

    #[test]
    fn empty_faces_rejected() {
        assert_eq!(Die::<i32>::new([]).unwrap_err(), Error::EmptyFaces);
    }

    #[test]
    fn initial_weights_validated() {
        assert_eq!(
            Die::weighted([1, 2, 3], [1.0, 2.0]).unwrap_err(),
            Error::WeightCount {
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            Die::weighted([1, 2], [1.0, -2.0]).unwrap_err(),
            Error::NegativeWeight(-2.0)
        );
        let die = Die::weighted([1, 2], [0.5, 3.0]).unwrap();
        assert_eq!(die.show_state().weight(&2), Some(3.0));
    }

    #[test]
    fn change_weight_touches_one_face() {
        let die = d6();
        die.change_weight(&1, 2.5).unwrap();
        let state = die.show_state();
        assert_eq!(state.weight(&1), Some(2.5));
        assert!((2..=6).all(|f| state.weight(&f) == Some(1.0)));
    }

    #[test]
    fn change_weight_accepts_integers_and_parsed_text() {
        let die = d6();
        die.change_weight(&2, 4u32).unwrap();
        die.change_weight(&3, "0.25".parse::<Weight>().unwrap())
            .unwrap();
        let state = die.show_state();
        assert_eq!(state.weight(&2), Some(4.0));
        assert_eq!(state.weight(&3), Some(0.25));
    }

    #[test]
    fn change_weight_errors() {
        let die = d6();
        let err = die.change_weight(&7, 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
        assert_eq!(
            die.change_weight(&1, -1.0).unwrap_err(),
            Error::NegativeWeight(-1.0)
        );
        assert_eq!(
            die.change_weight(&1, f64::NAN).unwrap_err().kind(),
            ErrorKind::InvalidInputType
        );
        assert_eq!(die.show_state().weight(&1), Some(1.0));
    }

    #[test]
    fn state_is_a_snapshot() {
        let die = d6();
        let before = die.show_state();
        die.change_weight(&6, 9.0).unwrap();
        assert_eq!(before.weight(&6), Some(1.0));
        assert_eq!(die.show_state().weight(&6), Some(9.0));
    }

    #[test]
    fn clones_share_weights() {
        let die = d6();
        let other = die.clone();
        other.change_weight(&4, 0.0).unwrap();
        assert_eq!(die.show_state().weight(&4), Some(0.0));
    }

    #[test]
    fn roll_maps_indices_to_faces() {
        let die = Die::new(['a', 'b', 'c']).unwrap();
        let mut roller = ScriptedRoller::new([2, 2, 0, 1]);
        assert_eq!(
            die.roll_with(4, &mut roller).unwrap(),
            vec!['c', 'c', 'a', 'b']
        );
    }

    struct FixedRoller(Vec<usize>);

    impl Roller for FixedRoller {
        fn roll_indices(&mut self, _weights: &[f64], _times: usize) -> Result<Vec<usize>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn roller_index_out_of_range() {
        let err = d6().roll_with(1, &mut FixedRoller(vec![6])).unwrap_err();
        assert_eq!(err, Error::RollerIndex { index: 6, faces: 6 });
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn roller_count_must_match() {
        assert_eq!(
            d6().roll_with(5, &mut FixedRoller(vec![0, 1])).unwrap_err(),
            Error::RollerCount {
                expected: 5,
                found: 2
            }
        );
        assert_eq!(
            d6().roll_with(2, &mut FixedRoller(vec![0, 1, 2]))
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn roll_returns_requested_count() {
        let outcomes = d6().roll(25).unwrap();
        assert_eq!(outcomes.len(), 25);
        assert!(outcomes.iter().all(|f| (1..=6).contains(f)));
    }

    #[test]
    fn zero_rolls_rejected() {
        assert_eq!(d6().roll(0).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn all_zero_weights_cannot_roll() {
        let die = Die::weighted([1, 2], [0.0, 0.0]).unwrap();
        assert_eq!(die.roll(1).unwrap_err(), Error::ZeroTotalWeight);
    }

    #[test]
    fn overflowing_total_weight() {
        let die = Die::weighted([1, 2], [f64::MAX, f64::MAX]).unwrap();
        let err = die.roll(10).unwrap_err();
        assert_eq!(err, Error::WeightOverflow);
        assert_eq!(err.kind(), ErrorKind::InvalidDomainValue);
        assert_eq!(die.probabilities().unwrap_err(), Error::WeightOverflow);

        let die = d6();
        die.change_weight(&1, 1e308).unwrap();
        die.change_weight(&2, 1e308).unwrap();
        assert_eq!(die.roll(1).unwrap_err(), Error::WeightOverflow);
    }

    #[test]
    fn zero_weight_face_never_rolled() {
        let die = d6();
        for face in 2..=6 {
            die.change_weight(&face, 0u8).unwrap();
        }
        assert!(die.roll(200).unwrap().iter().all(|&f| f == 1));
    }

    #[test]
    fn coin_needs_two_faces() {
        let options = DieOptions::builder().coin(true).build();
        let die = Die::with_options(1..=3, options.clone()).unwrap();
        assert!(die.is_coin());
        assert_eq!(die.roll(1).unwrap_err(), Error::NotACoin(3));

        let coin = Die::with_options(["H", "T"], options).unwrap();
        assert_eq!(coin.roll(10).unwrap().len(), 10);
    }

    #[test]
    fn probabilities_and_modes() {
        let die = Die::weighted([1, 2, 3, 4], [1.0, 3.0, 3.0, 1.0]).unwrap();
        assert_eq!(
            die.probabilities().unwrap(),
            vec![(1, 0.125), (2, 0.375), (3, 0.375), (4, 0.125)]
        );
        assert_eq!(die.modes(), vec![2, 3]);
    }
}
