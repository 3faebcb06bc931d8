use log::debug;
use rand::thread_rng;

use crate::die::Die;
use crate::roller::Roller;
use crate::table::{NarrowTable, ResultForm, Results, WideTable};
use crate::util::{Error, Result};
use crate::value::{DefaultFace, Face};

/// An ordered set of dice with the same number of faces, rolled together.
#[derive(Clone, Debug)]
pub struct Game<T = DefaultFace>
where
    T: Face,
{
    dice: Vec<Die<T>>,
    last_results: Option<WideTable<T>>,
}

impl<T> Game<T>
where
    T: Face,
{
    pub fn new<I>(dice: I) -> Result<Self>
    where
        I: IntoIterator<Item = Die<T>>,
    {
        let dice: Vec<_> = dice.into_iter().collect();
        let expected = dice.first().ok_or(Error::NoDice)?.num_faces();
        if let Some((die, found)) = dice
            .iter()
            .map(Die::num_faces)
            .enumerate()
            .find(|&(_, n)| n != expected)
        {
            return Err(Error::FaceCountMismatch {
                die,
                expected,
                found,
            });
        }
        Ok(Self {
            dice,
            last_results: None,
        })
    }

    #[must_use]
    pub fn dice(&self) -> &[Die<T>] {
        &self.dice
    }

    #[must_use]
    pub fn num_dice(&self) -> usize {
        self.dice.len()
    }

    /// Rolls every die `times` times with the thread-local generator.
    pub fn play(&mut self, times: usize) -> Result<()> {
        self.play_with(times, &mut thread_rng())
    }

    /// Rolls every die `times` times, die by die in game order, and replaces the
    /// previous results. On error the previous results are kept.
    pub fn play_with<R>(&mut self, times: usize, roller: &mut R) -> Result<()>
    where
        R: Roller + ?Sized,
    {
        let columns = self
            .dice
            .iter()
            .map(|die| die.roll_with(times, &mut *roller))
            .collect::<Result<Vec<_>>>()?;
        debug!("played {times} rolls of {} dice", self.dice.len());
        self.last_results = Some(WideTable::from_columns(columns));
        Ok(())
    }

    /// Copy of the latest results in the requested layout; empty before the first play.
    #[must_use]
    pub fn show_results(&self, form: ResultForm) -> Results<T> {
        match form {
            ResultForm::Wide => Results::Wide(self.wide()),
            ResultForm::Narrow => Results::Narrow(self.narrow()),
        }
    }

    #[must_use]
    pub fn wide(&self) -> WideTable<T> {
        self.last_results.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn narrow(&self) -> NarrowTable<T> {
        self.last_results
            .as_ref()
            .map(WideTable::to_narrow)
            .unwrap_or_default()
    }

    pub(crate) fn last_results(&self) -> Option<&WideTable<T>> {
        self.last_results.as_ref()
    }
}
