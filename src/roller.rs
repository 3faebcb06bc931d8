use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::util::Result;

/// Source of weighted draws.
///
/// Every [`rand::Rng`] is a roller. Each draw picks index `i` with probability
/// `weights[i] / sum(weights)`, independently of earlier draws.
pub trait Roller {
    fn roll_indices(&mut self, weights: &[f64], times: usize) -> Result<Vec<usize>>;
}

impl<R: Rng> Roller for R {
    fn roll_indices(&mut self, weights: &[f64], times: usize) -> Result<Vec<usize>> {
        let dist = WeightedIndex::<f64>::new(weights)?;
        Ok((0..times).map(|_| dist.sample(&mut *self)).collect())
    }
}

#[cfg(test)]
pub(crate) use scripted::ScriptedRoller;

#[cfg(test)]
mod scripted {
    use std::collections::VecDeque;

    use super::*;

    /// Replays a fixed sequence of face indices, ignoring weights.
    pub(crate) struct ScriptedRoller {
        indices: VecDeque<usize>,
    }

    impl ScriptedRoller {
        pub fn new<I>(indices: I) -> Self
        where
            I: IntoIterator<Item = usize>,
        {
            Self {
                indices: indices.into_iter().collect(),
            }
        }
    }

    impl Roller for ScriptedRoller {
        fn roll_indices(&mut self, weights: &[f64], times: usize) -> Result<Vec<usize>> {
            let out: Vec<_> = (0..times)
                .map(|_| self.indices.pop_front().expect("script exhausted"))
                .collect();
            assert!(out.iter().all(|&i| i < weights.len()));
            Ok(out)
        }
    }
}
